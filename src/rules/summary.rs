//! Typed, read-only view over the embedded template.

use serde::Deserialize;

/// Top-level shape of the template as far as this crate cares.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSummary {
    /// Template id.
    pub id: String,
    /// Template metadata block.
    pub info: RuleInfo,
    /// HTTP request blocks.
    #[serde(default)]
    pub requests: Vec<RuleRequest>,
}

/// Template metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleInfo {
    /// Human-readable template name.
    pub name: String,
    /// Template author.
    #[serde(default)]
    pub author: Option<String>,
    /// Severity label.
    pub severity: String,
}

/// One request block with its matchers.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleRequest {
    /// HTTP method.
    pub method: String,
    /// Requested paths.
    #[serde(default)]
    pub path: Vec<String>,
    /// How matchers are combined (`and`/`or`).
    #[serde(rename = "matchers-condition", default)]
    pub matchers_condition: Option<String>,
    /// Individual matchers.
    #[serde(default)]
    pub matchers: Vec<Matcher>,
}

/// One matcher; only its kind and label are read.
#[derive(Debug, Clone, Deserialize)]
pub struct Matcher {
    /// Matcher type (`status`, `word`, `regex`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Provider label, absent for the status matcher.
    #[serde(default)]
    pub name: Option<String>,
}

impl RuleSummary {
    /// Provider labels in document order, duplicates included.
    #[must_use]
    pub fn check_names(&self) -> Vec<&str> {
        self.requests
            .iter()
            .flat_map(|r| r.matchers.iter())
            .filter_map(|m| m.name.as_deref())
            .collect()
    }
}

/// What: Parse [`super::RULE_DOCUMENT`] into a [`RuleSummary`].
///
/// # Errors
/// - Returns the YAML error if the embedded text does not match the expected shape.
pub fn summary() -> Result<RuleSummary, serde_norway::Error> {
    serde_norway::from_str(super::RULE_DOCUMENT)
}
