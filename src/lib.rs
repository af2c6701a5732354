//! Library entry for subsdrain exposing the pipeline for the binary and integration tests.

pub mod args;
pub mod install;
pub mod pipeline;
pub mod rules;
pub mod scan;
pub mod settings;
pub mod util;

#[cfg(test)]
mod test_utils;

pub use pipeline::{PipelineError, PipelineFailure, ScanReport, Stage, run};
