//! Embedded takeover template and its materialization on disk.
//!
//! The document is opaque data for nuclei. This crate only writes it out,
//! and reads it back through [`summary`] for logging.

mod summary;

pub use summary::{Matcher, RuleInfo, RuleRequest, RuleSummary, summary};

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Nuclei template with one check per hosting provider, compiled in verbatim.
pub const RULE_DOCUMENT: &str = include_str!("../../assets/subdomain-takeover.yaml");

/// File name the template is written under.
pub const RULE_FILE_NAME: &str = "subdomain-takeover.yaml";

/// Permission bits applied to the written template (rw-r--r--).
pub const RULE_FILE_MODE: u32 = 0o644;

/// Location of the template inside `dir`.
#[must_use]
pub fn rule_path(dir: &Path) -> PathBuf {
    dir.join(RULE_FILE_NAME)
}

/// What: Write [`RULE_DOCUMENT`] to `dir/subdomain-takeover.yaml`.
///
/// Inputs:
/// - `dir`: Existing directory, normally the system temp dir.
///
/// Output:
/// - Path of the written file.
///
/// # Errors
/// - Returns the underlying I/O error when the file cannot be opened, written, or chmod-ed.
///
/// Details:
/// - Truncates and overwrites whatever was there; no temp-then-rename.
/// - On Unix the mode is re-applied after writing so an older file with other bits is normalized.
pub fn materialize(dir: &Path) -> std::io::Result<PathBuf> {
    let path = rule_path(dir);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(RULE_FILE_MODE);
    }
    let mut file = options.open(&path)?;
    file.write_all(RULE_DOCUMENT.as_bytes())?;
    file.flush()?;
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(RULE_FILE_MODE))?;
    }

    match summary() {
        Ok(doc) => tracing::debug!(
            path = %path.display(),
            id = %doc.id,
            checks = doc.check_names().len(),
            "rule document written"
        ),
        Err(e) => tracing::warn!(error = %e, "embedded rule document did not parse"),
    }
    Ok(path)
}
