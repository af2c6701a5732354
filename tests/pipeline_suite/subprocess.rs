//! End-to-end pipeline runs against real `sh` processes.
//!
//! Tests cover:
//! - Success path output relay and argument shape
//! - Rule file contents at scan time
//! - Installer and scanner failure propagation
//! - Target list pass-through

#![cfg(unix)]

use subsdrain::rules::{RULE_DOCUMENT, RULE_FILE_NAME};
use subsdrain::util::command::SystemCommandRunner;
use subsdrain::{PipelineError, Stage};

use super::common;

#[test]
/// What: Scanner output is relayed unchanged and the scanner sees the expected flags.
///
/// Inputs:
/// - Installer `exit 0`; scanner prints "no issues found" and exits 0; `-f targets.txt`.
///
/// Output:
/// - Report output is exactly "no issues found".
/// - Scanner argv is `-t <rule path> -l targets.txt`.
/// - The rule file the scanner read equals the embedded document.
fn pipeline_success_relays_scanner_output() {
    let _guard = common::serial();
    let bin = tempfile::tempdir().expect("tempdir");
    let tmp = tempfile::tempdir().expect("tempdir");
    let scanner = common::recording_scanner(bin.path(), "printf 'no issues found'");
    let settings = common::settings("exit 0", &scanner, tmp.path());

    let report = subsdrain::run(&common::args_for("targets.txt"), &settings, &SystemCommandRunner)
        .expect("pipeline succeeds");

    assert_eq!(report.output.text(), "no issues found");
    let rule_path = tmp.path().join(RULE_FILE_NAME);
    assert_eq!(report.rule_path, rule_path);

    let argv = std::fs::read_to_string(bin.path().join("scanner-args.txt")).expect("argv file");
    assert_eq!(
        argv,
        format!("-t\n{}\n-l\ntargets.txt\n", rule_path.display())
    );
    let seen = std::fs::read(bin.path().join("rules-seen.yaml")).expect("rules snapshot");
    assert_eq!(seen, RULE_DOCUMENT.as_bytes());
}

#[test]
/// What: Installer output and exit status abort the run before anything else.
///
/// Inputs:
/// - Installer prints to stderr and exits 7.
///
/// Output:
/// - `Installation` failure at `Installing`, diagnostic includes the stderr text.
/// - No rule file, scanner never ran.
fn pipeline_installer_failure_is_fatal() {
    let _guard = common::serial();
    let bin = tempfile::tempdir().expect("tempdir");
    let tmp = tempfile::tempdir().expect("tempdir");
    let scanner = common::recording_scanner(bin.path(), "exit 0");
    let settings = common::settings("echo 'go: command not found' >&2; exit 7", &scanner, tmp.path());

    let failure = subsdrain::run(&common::args_for("targets.txt"), &settings, &SystemCommandRunner)
        .expect_err("installer fails");

    assert_eq!(failure.stage, Stage::Installing);
    assert!(matches!(failure.error, PipelineError::Installation(_)));
    assert!(failure.error.diagnostic().contains("go: command not found"));
    assert!(!tmp.path().join(RULE_FILE_NAME).exists());
    assert!(!bin.path().join("scanner-args.txt").exists());
}

#[test]
/// What: Scanner failure carries both streams in the diagnostic.
///
/// Inputs:
/// - Scanner writes one line to stdout, one to stderr, exits 1.
///
/// Output:
/// - `Execution` failure whose diagnostic contains both lines in order.
fn pipeline_scanner_failure_includes_combined_output() {
    let _guard = common::serial();
    let bin = tempfile::tempdir().expect("tempdir");
    let tmp = tempfile::tempdir().expect("tempdir");
    let scanner = common::recording_scanner(
        bin.path(),
        "echo '[INF] loading templates'; echo '[FTL] no targets' >&2; exit 1",
    );
    let settings = common::settings("exit 0", &scanner, tmp.path());

    let failure = subsdrain::run(&common::args_for("targets.txt"), &settings, &SystemCommandRunner)
        .expect_err("scanner fails");

    assert_eq!(failure.stage, Stage::Scanning);
    assert!(matches!(failure.error, PipelineError::Execution(_)));
    assert_eq!(
        failure.error.captured_output(),
        Some(&b"[INF] loading templates\n[FTL] no targets\n"[..])
    );
    assert!(failure.error.diagnostic().ends_with("[FTL] no targets\n"));
}

#[test]
/// What: Missing, empty and malformed target lists all reach the scanner untouched.
///
/// Inputs:
/// - Scanner fails unless `$4` is a non-empty file.
/// - Three `-f` values: nonexistent path, empty file, binary garbage file.
///
/// Output:
/// - Nonexistent and empty lists fail as `Execution`, never `Usage`.
/// - The garbage file passes, proving contents are not inspected.
fn pipeline_target_list_is_opaque() {
    let _guard = common::serial();
    let bin = tempfile::tempdir().expect("tempdir");
    let tmp = tempfile::tempdir().expect("tempdir");
    let scanner = common::recording_scanner(
        bin.path(),
        "if [ -s \"$4\" ]; then echo ok; else echo \"cannot read $4\"; exit 2; fi",
    );
    let settings = common::settings("exit 0", &scanner, tmp.path());

    let missing = tmp.path().join("missing.txt");
    let empty = tmp.path().join("empty.txt");
    std::fs::write(&empty, "").expect("empty list");
    let garbage = tmp.path().join("garbage.txt");
    std::fs::write(&garbage, [0xff_u8, 0x00, b'\n', b':']).expect("garbage list");

    for list in [&missing, &empty] {
        let list = list.to_string_lossy();
        let failure = subsdrain::run(&common::args_for(&list), &settings, &SystemCommandRunner)
            .expect_err("scanner rejects list");
        assert!(matches!(failure.error, PipelineError::Execution(_)));
        assert!(failure.error.diagnostic().contains(&*list));
    }

    let report = subsdrain::run(
        &common::args_for(&garbage.to_string_lossy()),
        &settings,
        &SystemCommandRunner,
    )
    .expect("scanner accepts list");
    assert_eq!(report.output.text(), "ok\n");
}

#[test]
/// What: A scanner that cannot be started is an execution error.
///
/// Inputs:
/// - Scanner path pointing at a file that does not exist.
///
/// Output:
/// - `Execution` failure after the rule file was written.
fn pipeline_missing_scanner_binary() {
    let _guard = common::serial();
    let tmp = tempfile::tempdir().expect("tempdir");
    let scanner = tmp.path().join("not-installed");
    let settings = common::settings("exit 0", &scanner, tmp.path());

    let failure = subsdrain::run(&common::args_for("targets.txt"), &settings, &SystemCommandRunner)
        .expect_err("spawn fails");

    assert_eq!(failure.stage, Stage::Scanning);
    assert!(matches!(failure.error, PipelineError::Execution(_)));
    assert_eq!(
        std::fs::read(tmp.path().join(RULE_FILE_NAME)).expect("rule file"),
        RULE_DOCUMENT.as_bytes()
    );
}
