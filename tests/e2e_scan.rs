// TimeScan - tests/e2e_scan.rs
//
// End-to-end tests for the scan pipeline.
//
// These tests exercise the real filesystem: the on-disk fixture tree holds
// verbatim benchmark output from both the Rust and C++ reduction binaries,
// and temporary trees cover the failure paths. No mocks, no stubs.

use std::fs;
use std::path::{Path, PathBuf};
use timescan::app::scan::Scanner;
use timescan::core::discovery::discover_grid;
use timescan::core::export::{export_csv, export_json};
use timescan::core::model::GridConfig;
use timescan::util::error::{ScanError, TimeScanError};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture tree.
fn fixture_base() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("reduction")
}

fn fixture_grid() -> GridConfig {
    GridConfig {
        languages: vec!["c++".into(), "rust".into()],
        power_flags: vec!["0".into()],
        sizes: vec!["1000".into()],
        thread_counts: vec![1, 2],
        base_dir: fixture_base(),
    }
}

fn run_text(grid: &GridConfig, marker: &str) -> (String, Result<(), TimeScanError>) {
    let mut out = Vec::new();
    let result = Scanner::new(grid, marker).run(&mut out);
    (String::from_utf8(out).unwrap(), result)
}

fn write_log(base: &Path, rel: &str, body: &str) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

// =============================================================================
// Text output
// =============================================================================

#[test]
fn e2e_text_output_over_fixture_tree() {
    let (out, result) = run_text(&fixture_grid(), "par");
    result.unwrap();
    assert_eq!(
        out,
        "c++\n1000\n0.004,0.003,\n\n\nrust\n1000\n0.012,0.007,\n\n\n"
    );
}

#[test]
fn e2e_serial_marker_selects_serial_timings() {
    let (out, result) = run_text(&fixture_grid(), "serial");
    result.unwrap();
    assert_eq!(out, "c++\n1000\n0.003,0.003,\n\n\nrust\n1000\n0.011,0.011,\n\n\n");
}

#[test]
fn e2e_repeated_runs_are_byte_identical() {
    let (first, r1) = run_text(&fixture_grid(), "par");
    let (second, r2) = run_text(&fixture_grid(), "par");
    r1.unwrap();
    r2.unwrap();
    assert_eq!(first, second);
}

#[test]
fn e2e_single_parenthesised_line() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "rust/thread_1_10_0.log", "iter 1 par (2.500) done\n");
    let grid = GridConfig {
        languages: vec!["rust".into()],
        power_flags: vec!["0".into()],
        sizes: vec!["10".into()],
        thread_counts: vec![1],
        base_dir: dir.path().to_path_buf(),
    };
    let (out, result) = run_text(&grid, "par");
    result.unwrap();
    assert_eq!(out, "rust\n10\n2.500,\n\n\n");
}

#[test]
fn e2e_power_flags_repeat_size_headers() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "rust/thread_1_10_0.log", "a par [1] ms\n");
    write_log(dir.path(), "rust/thread_1_10_1.log", "a par [2] ms\n");
    let grid = GridConfig {
        languages: vec!["rust".into()],
        power_flags: vec!["0".into(), "1".into()],
        sizes: vec!["10".into()],
        thread_counts: vec![1],
        base_dir: dir.path().to_path_buf(),
    };
    let (out, result) = run_text(&grid, "par");
    result.unwrap();
    assert_eq!(out, "rust\n10\n1,\n\n10\n2,\n\n\n");
}

// =============================================================================
// Fail-fast
// =============================================================================

#[test]
fn e2e_missing_file_stops_before_later_combinations() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "a/thread_1_10_0.log", "x par [1] ms\n");
    // a/thread_2_10_0.log is missing
    write_log(dir.path(), "b/thread_1_10_0.log", "x par [3] ms\n");
    write_log(dir.path(), "b/thread_2_10_0.log", "x par [4] ms\n");
    let grid = GridConfig {
        languages: vec!["a".into(), "b".into()],
        power_flags: vec!["0".into()],
        sizes: vec!["10".into()],
        thread_counts: vec![1, 2],
        base_dir: dir.path().to_path_buf(),
    };

    let (out, result) = run_text(&grid, "par");
    assert_eq!(out, "a\n10\n1,");
    match result {
        Err(TimeScanError::Scan(ScanError::FileAccess { path, .. })) => {
            assert!(path.ends_with("thread_2_10_0.log"), "got {path:?}");
        }
        other => panic!("expected FileAccess, got {other:?}"),
    }
}

#[test]
fn e2e_single_token_marker_line_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "rust/thread_1_10_0.log", "header\npar\n");
    let grid = GridConfig {
        languages: vec!["rust".into()],
        power_flags: vec!["0".into()],
        sizes: vec!["10".into()],
        thread_counts: vec![1],
        base_dir: dir.path().to_path_buf(),
    };
    let (_, result) = run_text(&grid, "par");
    assert!(
        matches!(
            result,
            Err(TimeScanError::Scan(ScanError::MalformedLine { line_number: 2, .. }))
        ),
        "got {result:?}"
    );
}

#[test]
fn e2e_one_char_token_is_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "rust/thread_1_10_0.log", "par 5 ms\n");
    let grid = GridConfig {
        languages: vec!["rust".into()],
        power_flags: vec!["0".into()],
        sizes: vec!["10".into()],
        thread_counts: vec![1],
        base_dir: dir.path().to_path_buf(),
    };
    let err = Scanner::new(&grid, "par").collect().unwrap_err();
    assert!(matches!(err, ScanError::OutOfRange { ref token, .. } if token == "5"));
}

// =============================================================================
// Discovery + structured export
// =============================================================================

#[test]
fn e2e_discovered_fixture_grid_scans_cleanly() {
    let grid = discover_grid(&fixture_base()).unwrap();
    assert_eq!(grid, fixture_grid());

    let (out, result) = run_text(&grid, "par");
    result.unwrap();
    assert!(out.starts_with("c++\n1000\n0.004,0.003,"));
}

#[test]
fn e2e_csv_export_of_fixture_samples() {
    let samples = Scanner::new(&fixture_grid(), "par").collect().unwrap();
    let mut buf = Vec::new();
    assert_eq!(export_csv(&samples, &mut buf).unwrap(), 4);

    let csv = String::from_utf8(buf).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(
        rows,
        vec![
            "language,power_flag,size,threads,line,value",
            "c++,0,1000,1,11,0.004",
            "c++,0,1000,2,11,0.003",
            "rust,0,1000,1,12,0.012",
            "rust,0,1000,2,12,0.007",
        ]
    );
}

#[test]
fn e2e_json_export_of_fixture_samples() {
    let samples = Scanner::new(&fixture_grid(), "par").collect().unwrap();
    let mut buf = Vec::new();
    export_json(&samples, &mut buf).unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let values: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["0.004", "0.003", "0.012", "0.007"]);
}
