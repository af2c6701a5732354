//! Linear install → write rules → scan pipeline.
//!
//! Every step returns a `Result`; the first failure aborts the run and is
//! handed back as a [`PipelineFailure`] tagged with the stage it happened in.
//! Only `main` turns that into log output and an exit code.

use std::fmt;
use std::path::PathBuf;

use crate::args::Args;
use crate::settings::Settings;
use crate::util::command::{CapturedOutput, CommandError, CommandRunner};
use crate::{install, rules, scan};

/// Pipeline position, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Arguments not yet validated.
    Start,
    /// Installer subprocess running.
    Installing,
    /// Rule document being written.
    WritingRules,
    /// Scanner subprocess running.
    Scanning,
    /// Scanner exited 0.
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Installing => "installing",
            Self::WritingRules => "writing-rules",
            Self::Scanning => "scanning",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// What: The four ways a run can fail.
///
/// Details:
/// - All are fatal; [`PipelineError::exit_code`] maps every kind to the same code.
#[derive(Debug)]
pub enum PipelineError {
    /// `-f` absent or empty.
    Usage {
        /// Which of the two it was.
        reason: String,
    },
    /// Installer could not run or exited non-zero.
    Installation(CommandError),
    /// Rule document could not be written.
    Persistence {
        /// Target path of the write.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },
    /// Scanner could not run or exited non-zero.
    Execution(CommandError),
}

impl PipelineError {
    /// Build a usage error.
    pub(crate) fn usage(reason: impl Into<String>) -> Self {
        Self::Usage {
            reason: reason.into(),
        }
    }

    /// Combined output of the failed subprocess, when there is one.
    #[must_use]
    pub fn captured_output(&self) -> Option<&[u8]> {
        match self {
            Self::Installation(e) | Self::Execution(e) => e.output(),
            Self::Usage { .. } | Self::Persistence { .. } => None,
        }
    }

    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        1
    }

    /// What: Render the user-facing diagnostic.
    ///
    /// Output:
    /// - The error message, followed by `Output:` and the captured subprocess output if any.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let mut text = self.to_string();
        if let Some(output) = self.captured_output() {
            text.push_str("\nOutput:\n");
            text.push_str(&String::from_utf8_lossy(output));
        }
        text
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage { reason } => write!(
                f,
                "Please provide a subdomain list file using the -f flag ({reason})."
            ),
            Self::Installation(err) => write!(f, "Failed to install Nuclei: {err}"),
            Self::Persistence { path, source } => {
                write!(f, "Failed to save template to {}: {source}", path.display())
            }
            Self::Execution(err) => write!(f, "Error running Nuclei: {err}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Usage { .. } => None,
            Self::Installation(err) | Self::Execution(err) => Some(err),
            Self::Persistence { source, .. } => Some(source),
        }
    }
}

/// A [`PipelineError`] together with the stage that produced it.
#[derive(Debug)]
pub struct PipelineFailure {
    /// Stage that was running when the error occurred.
    pub stage: Stage,
    /// What went wrong.
    pub error: PipelineError,
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aborted while {}: {}", self.stage, self.error)
    }
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Where the rule document was written.
    pub rule_path: PathBuf,
    /// Scanner output, stdout and stderr combined.
    pub output: CapturedOutput,
}

/// Log and return the stage being entered.
fn enter(stage: Stage) -> Stage {
    tracing::debug!(stage = %stage, "pipeline stage");
    stage
}

/// What: Execute the whole pipeline once.
///
/// Inputs:
/// - `args`: Parsed command line; `-f` is validated first.
/// - `settings`: Programs and rule directory.
/// - `runner`: Executes the installer and scanner.
///
/// Output:
/// - `Ok(ScanReport)` when the scanner exits 0.
///
/// # Errors
/// - `Usage` at `Start` before anything is spawned or written
/// - `Installation` at `Installing`; the rule file is not touched
/// - `Persistence` at `WritingRules`; the scanner is not started
/// - `Execution` at `Scanning`, carrying the scanner's combined output
///
/// Details:
/// - Progress markers (`[*]`, `[+]`) go to stderr so stdout carries only scanner output.
/// - The installer runs unconditionally on every call.
pub fn run<R: CommandRunner + ?Sized>(
    args: &Args,
    settings: &Settings,
    runner: &R,
) -> Result<ScanReport, PipelineFailure> {
    let mut stage = enter(Stage::Start);
    let fail = |stage: Stage, error: PipelineError| PipelineFailure { stage, error };

    let target_list = args.target_list().map_err(|e| fail(stage, e))?;

    stage = enter(Stage::Installing);
    eprintln!("[*] Installing Nuclei...");
    install::install_scanner(runner, settings)
        .map_err(|e| fail(stage, PipelineError::Installation(e)))?;
    eprintln!("[+] Nuclei installed successfully.");
    if install::scanner_on_path(&settings.scanner_program).is_none() {
        tracing::warn!(
            scanner = %settings.scanner_program,
            "scanner not found on PATH after install"
        );
    }

    stage = enter(Stage::WritingRules);
    let rule_path = settings.rule_path();
    eprintln!("[*] Saving custom template to: {}", rule_path.display());
    rules::materialize(&settings.rule_dir).map_err(|source| {
        fail(
            stage,
            PipelineError::Persistence {
                path: rule_path.clone(),
                source,
            },
        )
    })?;

    stage = enter(Stage::Scanning);
    eprintln!("[*] Running Nuclei to detect subdomain takeovers...");
    let output = scan::run_scan(runner, settings, &rule_path, target_list)
        .map_err(|e| fail(stage, PipelineError::Execution(e)))?;

    enter(Stage::Done);
    Ok(ScanReport { rule_path, output })
}
