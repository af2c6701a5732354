//! Runtime settings for the install → write rules → scan pipeline.
//!
//! There is no settings file: [`Settings::default`] is the production
//! configuration, and tests construct their own values to point the pipeline
//! at fake programs and scratch directories.

use std::path::PathBuf;

/// Shell used to interpret the installer command.
pub const DEFAULT_INSTALL_SHELL: &str = "sh";

/// Scanner executable looked up on `PATH`.
pub const DEFAULT_SCANNER_PROGRAM: &str = "nuclei";

/// What: Programs and locations the pipeline operates on.
///
/// Details:
/// - `install_command` is handed to `install_shell -c` verbatim.
/// - `rule_dir` receives the rule document under its fixed file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Command interpreter for the installer (e.g. `sh`).
    pub install_shell: String,
    /// Full installer command line.
    pub install_command: String,
    /// Scanner program name or path.
    pub scanner_program: String,
    /// Directory that receives the rule document.
    pub rule_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            install_shell: DEFAULT_INSTALL_SHELL.to_string(),
            install_command: crate::install::NUCLEI_INSTALL_COMMAND.to_string(),
            scanner_program: DEFAULT_SCANNER_PROGRAM.to_string(),
            rule_dir: std::env::temp_dir(),
        }
    }
}

impl Settings {
    /// Where the rule document is written for this configuration.
    #[must_use]
    pub fn rule_path(&self) -> PathBuf {
        crate::rules::rule_path(&self.rule_dir)
    }
}
