//! Command-line argument definition and validation.

use std::ffi::{OsStr, OsString};

use clap::Parser;

use crate::pipeline::PipelineError;

/// Subsdrain - Subdomain takeover detector driven by a nuclei template
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "subsdrain")]
#[command(about = "Subdomain takeover detector driven by a nuclei template", long_about = None)]
pub struct Args {
    /// Path to the subdomain list file
    #[arg(short = 'f', value_name = "FILE")]
    pub file: Option<OsString>,
}

impl Args {
    /// What: Return the target list path given with `-f`.
    ///
    /// Output:
    /// - The path exactly as typed, non-UTF-8 bytes included; existence and contents are not checked.
    ///
    /// # Errors
    /// - Returns `PipelineError::Usage` when `-f` is absent or empty.
    pub fn target_list(&self) -> Result<&OsStr, PipelineError> {
        match self.file.as_deref() {
            Some(path) if !path.is_empty() => Ok(path),
            Some(_) => Err(PipelineError::usage("the -f value is empty")),
            None => Err(PipelineError::usage("the -f flag is missing")),
        }
    }
}
