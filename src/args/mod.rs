//! Command-line argument parsing and handling.

pub mod definition;

// Re-export commonly used items
pub use definition::Args;
