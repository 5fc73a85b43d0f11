//! Integration test: checked-in fixture projects
//!
//! Validates that:
//! 1. The consistent fixture passes with and without strict coverage.
//! 2. The drifted fixture reports every argument and struct drift, in order.
//! 3. The run log carries per-file, per-function and per-argument marks.
//!
//! Run: cargo test -p bindcheck-harness --test fixture_gate_test

use std::path::{Path, PathBuf};

use bindcheck_core::CheckerKind;
use bindcheck_harness::{CheckConfig, CheckReport, ConsoleLog, RunObserver, finish_run, run_checks};

fn workspace_root() -> PathBuf {
    let manifest = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture_config(name: &str) -> CheckConfig {
    CheckConfig::default().rebased(&workspace_root().join("tests/fixtures").join(name))
}

fn run(config: &CheckConfig) -> (CheckReport, String) {
    let mut observer = RunObserver::new(ConsoleLog::new(Vec::new()), None);
    let report = run_checks(config, &mut observer).expect("fixture inputs should be readable");
    finish_run(&report, &mut observer).unwrap();
    let log = String::from_utf8(observer.into_console().into_inner()).unwrap();
    (report, log)
}

#[test]
fn consistent_fixture_passes() {
    let (report, log) = run(&fixture_config("consistent"));
    assert!(report.passed(), "unexpected failures: {:?}", report.failures);
    assert_eq!(report.exit_status(), 0);
    assert!(log.ends_with("All checks passed.\n"), "{log}");
}

#[test]
fn consistent_fixture_passes_strict_coverage() {
    let mut config = fixture_config("consistent");
    config.strict_coverage = true;
    let (report, _) = run(&config);
    assert!(report.passed(), "unexpected failures: {:?}", report.failures);
}

#[test]
fn consistent_fixture_logs_every_checked_argument() {
    let (_, log) = run(&fixture_config("consistent"));
    for expected in [
        "In wgpuDeviceCreateBuffer:",
        "  ✔ descriptor: &wgt::BufferDescriptor<Label>",
        "  ✔ data: *const u8",
        "  ✔ limits: &mut CExtent3D",
        "✔ Checked build.rs struct WGPUExtent3D",
        "✔ Checked build.rs struct WGPUBufferDescriptor",
    ] {
        assert!(log.lines().any(|l| l == expected), "missing {expected:?} in:\n{log}");
    }
    // Three binding files plus the build script.
    assert_eq!(log.lines().filter(|l| l.starts_with("== Checking ")).count(), 4);
}

#[test]
fn drifted_fixture_reports_in_discovery_order() {
    let (report, log) = run(&fixture_config("drifted"));
    let messages: Vec<&str> = report.failures.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "wgpuDeviceCreateBuffer has missing args: {descriptor}",
            "✖ wgpuAdapterGetLimits: limits: CExtent3D",
            "✖ Key mismatch in build.rs struct WGPUExtent3D: {depth, height}",
            "✖ Unknown build.rs struct WGPUColorValue",
        ]
    );
    assert_eq!(report.exit_status(), 1);
    assert!(log.contains("There were 4 failed checks:\n"), "{log}");
    assert!(log.ends_with("Failed\n"), "{log}");
    assert!(log.lines().any(|l| l == "  ✖ limits: CExtent3D"), "{log}");
}

#[test]
fn drifted_fixture_strict_coverage_flags_unbound_function() {
    let mut config = fixture_config("drifted");
    config.strict_coverage = true;
    let (report, _) = run(&config);

    let coverage: Vec<&str> = report
        .by_checker(CheckerKind::Coverage)
        .map(|f| f.message.as_str())
        .collect();
    assert_eq!(
        coverage,
        ["wgpuQueueWriteBuffer is not bound in any source file"]
    );
    // Coverage gaps close the argument section, ahead of struct failures.
    assert_eq!(report.failures[2].checker, CheckerKind::Coverage);
    assert_eq!(report.failures.len(), 5);
}

#[test]
fn repeated_runs_are_identical() {
    let config = fixture_config("drifted");
    let (first, first_log) = run(&config);
    let (second, second_log) = run(&config);
    assert_eq!(first, second);
    assert_eq!(first_log, second_log);
}
