//! Scanner invocation step.

mod runner;

pub use runner::{run_scan, scanner_args};
