//! subsdrain binary entrypoint kept minimal. The pipeline lives in the library.

use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use subsdrain::args::Args;
use subsdrain::settings::Settings;
use subsdrain::util::command::SystemCommandRunner;

const BANNER: &str = r"
███████╗██╗   ██╗██████╗ ███████╗██████╗ ██████╗  █████╗ ██╗███╗   ██╗
██╔════╝██║   ██║██╔══██╗██╔════╝██╔══██╗██╔══██╗██╔══██╗██║████╗  ██║
███████╗██║   ██║██████╔╝███████╗██║  ██║██████╔╝███████║██║██╔██╗ ██║
╚════██║██║   ██║██╔══██╗╚════██║██║  ██║██╔══██╗██╔══██║██║██║╚██╗██║
███████║╚██████╔╝██████╔╝███████║██████╔╝██║  ██║██║  ██║██║██║ ╚████║
╚══════╝ ╚═════╝ ╚═════╝ ╚══════╝╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝╚═╝  ╚═══╝
                          Subdomain Takeover Detector
";

/// Log timer printing local time at second precision.
struct SubsdrainTimer;

impl tracing_subscriber::fmt::time::FormatTime for SubsdrainTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&subsdrain::util::log_timestamp())
    }
}

/// What: Install the global tracing subscriber on stderr.
///
/// Output:
/// - The non-blocking writer guard; keep it alive until exit so buffered lines are flushed.
///
/// Details:
/// - stderr is the only log sink: the rule file stays the one file this program writes.
/// - Filter comes from `RUST_LOG`, defaulting to `warn` so progress markers stay readable.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_timer(SubsdrainTimer)
        .init();
    guard
}

fn main() -> ExitCode {
    eprintln!("{BANNER}");
    let args = Args::parse();
    // Usage errors end the run before the logger or any subprocess exists.
    if let Err(err) = args.target_list() {
        eprintln!("[-] {}", err.diagnostic());
        return ExitCode::from(err.exit_code());
    }

    let log_guard = init_logging();
    tracing::info!(target_list = ?args.file, "subsdrain starting");

    let settings = Settings::default();
    let code = match subsdrain::run(&args, &settings, &SystemCommandRunner) {
        Ok(report) => {
            tracing::info!(rules = %report.rule_path.display(), "scan completed");
            eprintln!("[+] Nuclei Output:");
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout
                .write_all(&report.output.combined)
                .and_then(|()| stdout.flush())
            {
                tracing::error!(error = %e, "failed to write scanner output");
                eprintln!("[-] Failed to write scanner output: {e}");
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(failure) => {
            tracing::error!(stage = %failure.stage, error = %failure.error, "pipeline aborted");
            eprintln!("[-] {}", failure.error.diagnostic());
            ExitCode::from(failure.error.exit_code())
        }
    };
    drop(log_guard);
    code
}
