use std::ffi::OsStr;
use std::path::PathBuf;

use crate::settings::Settings;
use crate::util::command::{CapturedOutput, CommandError, CommandRunner, run_checked};

/// Installer command run through `sh -c`.
pub const NUCLEI_INSTALL_COMMAND: &str =
    "go install -v github.com/projectdiscovery/nuclei/v2/cmd/nuclei@latest";

/// What: Install (or refresh) the scanner by running the configured installer command.
///
/// Inputs:
/// - `runner`: Command runner used for execution.
/// - `settings`: Supplies the shell and the command line.
///
/// Output:
/// - Captured installer output on exit 0.
///
/// # Errors
/// - Returns `Err(CommandError::Spawn)` when the shell cannot be started
/// - Returns `Err(CommandError::Failed)` with the combined output when the installer exits non-zero
///
/// Details:
/// - Executes `<install_shell> -c <install_command>`; no retry.
pub fn install_scanner<R: CommandRunner + ?Sized>(
    runner: &R,
    settings: &Settings,
) -> Result<CapturedOutput, CommandError> {
    tracing::info!(
        shell = %settings.install_shell,
        command = %settings.install_command,
        "installing scanner"
    );
    let output = run_checked(
        runner,
        &settings.install_shell,
        &[OsStr::new("-c"), OsStr::new(&settings.install_command)],
    )?;
    tracing::info!(bytes = output.combined.len(), "scanner installer finished");
    Ok(output)
}

/// What: Locate the scanner executable on `PATH`.
///
/// Output:
/// - `Some(path)` if `which` finds it, `None` otherwise.
///
/// Details:
/// - Only used for diagnostics; `go install` drops binaries into `$GOPATH/bin`,
///   which is often missing from `PATH`.
#[must_use]
pub fn scanner_on_path(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}
