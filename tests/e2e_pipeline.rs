// SimHist - tests/e2e_pipeline.rs
//
// End-to-end tests for the extraction and aggregation pipeline.
//
// These tests run against real files: the fixture logs under
// tests/fixtures/dimers, plus temp directories for the collection file.
// No mocks, no stubs.

use simhist::app::run::{self, extract_file, run_pipeline, RunOptions};
use simhist::core::collection::aggregate;
use simhist::core::export::export_to_file;
use simhist::core::extract::ExtractConfig;
use simhist::platform::config::AppConfig;
use simhist::util::error::{ExtractError, SimHistError};
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("dimers")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

fn options_for(out_dir: &tempfile::TempDir) -> RunOptions {
    let (mut options, warnings) =
        RunOptions::from_config(&AppConfig::default(), out_dir.path().join("energies.txt"));
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    options.input_dir = fixtures_dir();
    options
}

// =============================================================================
// Extraction E2E
// =============================================================================

#[test]
fn e2e_extracts_first_row_under_marker() {
    let value = extract_file(&fixture("graphene_all_1000.log"), &ExtractConfig::default()).unwrap();
    assert_eq!(value, Some(-8823.5421));
}

#[test]
fn e2e_blank_line_after_marker_is_skipped() {
    let value = extract_file(&fixture("graphene_all_2000.log"), &ExtractConfig::default()).unwrap();
    assert_eq!(value, Some(-4451.25));
}

#[test]
fn e2e_log_without_marker_has_no_value() {
    let value = extract_file(&fixture("graphene_all_3000.log"), &ExtractConfig::default()).unwrap();
    assert_eq!(value, None);
}

#[test]
fn e2e_missing_log_is_not_found() {
    let err = extract_file(&fixture("graphene_all_9999.log"), &ExtractConfig::default())
        .unwrap_err();
    assert!(matches!(err, ExtractError::NotFound { .. }), "got {err:?}");
}

// =============================================================================
// Pipeline E2E
// =============================================================================

/// The manifest sorts first and is skipped; the four logs are processed in
/// name order and the marker-less one is recorded as missing.
#[test]
fn e2e_run_over_fixture_directory() {
    let out = tempfile::tempdir().unwrap();
    let options = options_for(&out);

    let report = run_pipeline(&options).unwrap();

    assert_eq!(report.summary.files_processed, 4);
    assert_eq!(report.summary.values_extracted, 3);
    assert_eq!(report.summary.missing, 1);
    assert_eq!(report.dataset, vec![-8823.5421, -4451.25, -8874.0]);

    let names: Vec<String> = report
        .extractions
        .iter()
        .map(|e| e.source_file.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "graphene_all_1000.log",
            "graphene_all_2000.log",
            "graphene_all_3000.log",
            "graphene_all_4000.log",
        ]
    );

    // [-8900,-8850) holds -8874, [-8850,-8800) holds -8823.5,
    // [-4475,-4450) holds -4451.25.
    assert_eq!(
        report.summary.histogram.counts,
        vec![0, 0, 1, 1, 0, 0, 1, 0, 0]
    );

    let written = fs::read_to_string(&options.output_file).unwrap();
    assert_eq!(
        written,
        "-8823.5421\n-4451.25\nNone\n-8874.0\n# end files=4\n"
    );
}

/// Reading the collection file back and aggregating it by hand gives the
/// same dataset as the run itself.
#[test]
fn e2e_collection_file_aggregates_to_dataset() {
    let out = tempfile::tempdir().unwrap();
    let options = options_for(&out);
    let report = run_pipeline(&options).unwrap();

    let text = fs::read_to_string(&options.output_file).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(aggregate(&lines[..]).unwrap(), report.dataset);
    assert!(report.dataset.len() <= lines.len() - 1);
}

#[test]
fn e2e_rerun_replaces_collection() {
    let out = tempfile::tempdir().unwrap();
    let options = options_for(&out);
    run_pipeline(&options).unwrap();
    let first = fs::read_to_string(&options.output_file).unwrap();
    run_pipeline(&options).unwrap();
    let second = fs::read_to_string(&options.output_file).unwrap();
    assert_eq!(first, second);
}

#[test]
fn e2e_missing_input_dir_fails() {
    let out = tempfile::tempdir().unwrap();
    let mut options = options_for(&out);
    options.input_dir = out.path().join("no_such_dir");
    let err = run_pipeline(&options).unwrap_err();
    assert!(matches!(err, SimHistError::Discovery(_)), "got {err:?}");
}

#[test]
fn e2e_export_csv_and_json() {
    let out = tempfile::tempdir().unwrap();
    let options = options_for(&out);
    let report = run_pipeline(&options).unwrap();

    let csv_path = out.path().join("bins.csv");
    assert_eq!(export_to_file(&report.summary, &csv_path).unwrap(), 9);
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.lines().any(|l| l == "-8850,-8800,1"), "{csv}");

    let json_path = out.path().join("run.json");
    export_to_file(&report.summary, &json_path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["dataset_len"], 3);
}

// =============================================================================
// Single-file extract E2E
// =============================================================================

/// Appending per file and closing with a trailer reproduces the run's file.
#[test]
fn e2e_single_file_extracts_build_same_collection() {
    let out = tempfile::tempdir().unwrap();
    let collection = out.path().join("manual.txt");
    let config = ExtractConfig::default();

    for name in [
        "graphene_all_1000.log",
        "graphene_all_2000.log",
        "graphene_all_3000.log",
        "graphene_all_4000.log",
    ] {
        run::extract_to_collection(&fixture(name), &collection, &config).unwrap();
    }
    let text = fs::read_to_string(&collection).unwrap();
    let mut lines: Vec<&str> = text.lines().collect();
    lines.push("# end files=4");

    assert_eq!(
        aggregate(&lines[..]).unwrap(),
        vec![-8823.5421, -4451.25, -8874.0]
    );
}
