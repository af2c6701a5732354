//! Scanner installation step.
//!
//! Runs the fixed installer command through a shell on every invocation.
//! There is no "already installed" shortcut: the installer itself is expected
//! to be cheap when nuclei is current.

mod installer;

pub use installer::{NUCLEI_INSTALL_COMMAND, install_scanner, scanner_on_path};
