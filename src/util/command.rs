//! Command execution abstraction for the installer and scanner steps.
//!
//! This module provides the [`CommandRunner`] trait and implementations for
//! executing system commands with their stdout and stderr captured as one
//! stream, enabling testability through dependency injection.

use std::ffi::OsStr;
use std::fmt;
use std::io::Read;
use std::process::{Command, Stdio};

/// What: Exit code and combined output of a finished subprocess.
///
/// Details:
/// - `combined` holds stdout and stderr interleaved in the order the child wrote them.
/// - `code` is `None` when the child was terminated by a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code reported by the operating system.
    pub code: Option<i32>,
    /// Interleaved stdout and stderr bytes.
    pub combined: Vec<u8>,
}

impl CapturedOutput {
    /// Build a captured result from an exit code and output bytes.
    pub fn new(code: Option<i32>, combined: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            combined: combined.into(),
        }
    }

    /// `true` only for a clean exit with status 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Lossy UTF-8 view of the combined output.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.combined).into_owned()
    }
}

/// What: Abstract command execution interface used for spawning the installer
/// shell and the scanner binary.
///
/// Inputs:
/// - `program`: Executable name or path to run (for example, `"nuclei"`).
/// - `args`: Slice of positional arguments passed to the executable, not required to be UTF-8.
///
/// Output:
/// - `Ok(CapturedOutput)` once the process has exited, whatever its status.
/// - `Err(CommandError)` when the process could not be spawned or its output could not be read.
///
/// # Errors
/// - Returns `Err(CommandError::Spawn)` when the executable cannot be started
/// - Returns `Err(CommandError::Io)` when the output pipe cannot be created or read
///
/// Details:
/// - A non-zero exit is not an error at this level; see [`run_checked`].
/// - Implementations may stub command results to enable deterministic unit testing.
/// - Production code relies on [`SystemCommandRunner`].
pub trait CommandRunner {
    /// # Errors
    /// - Returns `Err(CommandError::Spawn)` when the executable cannot be started
    /// - Returns `Err(CommandError::Io)` when the output pipe cannot be created or read
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<CapturedOutput, CommandError>;
}

/// What: Real command runner backed by `std::process::Command`.
///
/// Output:
/// - Executes commands on the host system, blocking until they exit.
///
/// Details:
/// - One anonymous pipe is handed to both stdout and stderr, so the captured
///   bytes keep the child's own write order.
/// - stdin is null; no timeout is applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<CapturedOutput, CommandError> {
        let (mut reader, writer) = std::io::pipe()?;
        let mut child = {
            let mut cmd = Command::new(program);
            cmd.args(args)
                .stdin(Stdio::null())
                .stdout(writer.try_clone()?)
                .stderr(writer);
            cmd.spawn().map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?
            // `cmd` drops here and releases the parent's write ends, so EOF
            // arrives once the child (and anything it forked) closes them.
        };
        tracing::debug!(program, pid = child.id(), "spawned subprocess");

        let mut combined = Vec::new();
        let read = reader.read_to_end(&mut combined);
        let status = child.wait()?;
        read?;

        tracing::debug!(
            program,
            code = ?status.code(),
            bytes = combined.len(),
            "subprocess finished"
        );
        Ok(CapturedOutput {
            code: status.code(),
            combined,
        })
    }
}

/// What: Run a command and turn a non-zero exit into [`CommandError::Failed`].
///
/// Inputs:
/// - `runner`: Command runner used for execution.
/// - `program`: Executable to run.
/// - `args`: Arguments passed through unchanged.
///
/// Output:
/// - `Ok(CapturedOutput)` when the command exits 0.
///
/// # Errors
/// - Propagates spawn and I/O errors from the runner
/// - Returns `Err(CommandError::Failed)` carrying the combined output when the exit status is non-zero
pub fn run_checked<R: CommandRunner + ?Sized>(
    runner: &R,
    program: &str,
    args: &[&OsStr],
) -> Result<CapturedOutput, CommandError> {
    let output = runner.run(program, args)?;
    if output.success() {
        return Ok(output);
    }
    Err(CommandError::Failed {
        program: program.to_string(),
        args: args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect(),
        code: output.code,
        output: output.combined,
    })
}

/// What: Error type capturing command spawning, I/O, and non-success exits.
///
/// Details:
/// - `Failed` keeps the combined output so callers can show it to the user.
#[derive(Debug)]
pub enum CommandError {
    /// Pipe creation, read, or wait failed.
    Io(std::io::Error),
    /// The executable could not be started.
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying OS error.
        source: std::io::Error,
    },
    /// Command exited with a non-zero status.
    Failed {
        /// Program name that failed.
        program: String,
        /// Command arguments, lossily decoded for display.
        args: Vec<String>,
        /// Exit code, `None` if killed by a signal.
        code: Option<i32>,
        /// Combined stdout and stderr.
        output: Vec<u8>,
    },
}

impl CommandError {
    /// Combined output of a failed command, if it ran far enough to produce one.
    #[must_use]
    pub fn output(&self) -> Option<&[u8]> {
        match self {
            Self::Failed { output, .. } => Some(output),
            Self::Io(_) | Self::Spawn { .. } => None,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Spawn { program, source } => write!(f, "failed to start {program:?}: {source}"),
            Self::Failed {
                program,
                args,
                code: Some(code),
                ..
            } => write!(f, "{program:?} {args:?} exited with status {code}"),
            Self::Failed {
                program,
                args,
                code: None,
                ..
            } => write!(f, "{program:?} {args:?} was terminated by a signal"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) | Self::Spawn { source: err, .. } => Some(err),
            Self::Failed { .. } => None,
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
