use std::ffi::OsStr;
use std::path::Path;

use crate::settings::Settings;
use crate::util::command::{CapturedOutput, CommandError, CommandRunner, run_checked};

/// What: Build the scanner argument list.
///
/// Inputs:
/// - `rule_path`: Materialized template path.
/// - `target_list`: Caller-supplied list path, passed through untouched.
///
/// Output:
/// - `["-t", rule_path, "-l", target_list]`, byte for byte.
#[must_use]
pub fn scanner_args<'a>(rule_path: &'a Path, target_list: &'a OsStr) -> [&'a OsStr; 4] {
    [
        OsStr::new("-t"),
        rule_path.as_os_str(),
        OsStr::new("-l"),
        target_list,
    ]
}

/// What: Run the scanner against the target list and return its combined output.
///
/// Inputs:
/// - `runner`: Command runner used for execution.
/// - `settings`: Supplies the scanner program.
/// - `rule_path`: Template written by the rules step.
/// - `target_list`: Path from `-f`; never opened here.
///
/// Output:
/// - Captured output when the scanner exits 0.
///
/// # Errors
/// - Returns `Err(CommandError::Spawn)` when the scanner cannot be started
/// - Returns `Err(CommandError::Failed)` with the combined output on a non-zero exit
///
/// Details:
/// - Blocks until the scanner exits; nothing is streamed while it runs.
pub fn run_scan<R: CommandRunner + ?Sized>(
    runner: &R,
    settings: &Settings,
    rule_path: &Path,
    target_list: &OsStr,
) -> Result<CapturedOutput, CommandError> {
    let args = scanner_args(rule_path, target_list);
    tracing::info!(
        scanner = %settings.scanner_program,
        rules = %rule_path.display(),
        targets = %target_list.display(),
        "running scanner"
    );
    let output = run_checked(runner, &settings.scanner_program, &args)?;
    tracing::info!(bytes = output.combined.len(), "scanner finished");
    Ok(output)
}
