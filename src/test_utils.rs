//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

use crate::util::command::{CapturedOutput, CommandError, CommandRunner};

/// What: Command runner that returns canned results per program and records every call.
///
/// Details:
/// - Programs without a scripted response fail to spawn with `NotFound`, like a missing binary.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    /// Canned result per program name.
    responses: HashMap<String, CapturedOutput>,
    /// `(program, args)` in call order, arguments kept as raw OS strings.
    calls: RefCell<Vec<(String, Vec<OsString>)>>,
}

impl ScriptedRunner {
    /// Empty runner: every program is "missing".
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `program` to exit with `code` after writing `output`.
    pub fn respond(mut self, program: &str, code: i32, output: &str) -> Self {
        self.responses.insert(
            program.to_string(),
            CapturedOutput::new(Some(code), output.as_bytes()),
        );
        self
    }

    /// Snapshot of the calls made so far, arguments lossily decoded.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls
            .borrow()
            .iter()
            .map(|(program, args)| {
                let args = args
                    .iter()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect();
                (program.clone(), args)
            })
            .collect()
    }

    /// Exact arguments of the `index`-th call.
    pub fn raw_args(&self, index: usize) -> Vec<OsString> {
        self.calls.borrow()[index].1.clone()
    }

    /// Program names in call order.
    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(p, _)| p.clone()).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<CapturedOutput, CommandError> {
        self.calls.borrow_mut().push((
            program.to_string(),
            args.iter().map(|a| a.to_os_string()).collect(),
        ));
        self.responses
            .get(program)
            .cloned()
            .ok_or_else(|| CommandError::Spawn {
                program: program.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}
