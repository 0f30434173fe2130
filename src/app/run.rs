// SimHist - app/run.rs
//
// Run lifecycle. Orchestrates discovery, per-file extraction, the output
// collection file, aggregation and binning.
//
// Architecture:
//   - Strictly sequential: one log is read and its entry appended before
//     the next log is opened.
//   - Extraction is an in-process call returning `Option<f64>`; the
//     collection file is the run's persisted record, written in append
//     phase and read back once in aggregate phase.
//   - The first extraction failure aborts the run unless `keep_going` is
//     set, in which case the log is recorded as missing and counted.

use crate::core::collection::{self, aggregate};
use crate::core::discovery::{self, DiscoveryConfig};
use crate::core::extract::{self, ExtractConfig};
use crate::core::histogram;
use crate::core::model::{Extraction, Histogram, RunSummary};
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::error::{CollectionError, ExtractError, Result};
use std::io;
use std::path::{Path, PathBuf};

// =============================================================================
// Options
// =============================================================================

/// Everything a run needs, resolved from config.toml and the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory listed for logs.
    pub input_dir: PathBuf,

    /// Collection file, deleted and rewritten by every run.
    pub output_file: PathBuf,

    pub discovery: DiscoveryConfig,
    pub extract: ExtractConfig,

    /// Validated histogram bin edges.
    pub bin_edges: Vec<f64>,

    /// Record failing logs as missing instead of aborting.
    pub keep_going: bool,
}

impl RunOptions {
    /// Build run options from a validated config.
    ///
    /// Bin edges that break the histogram rules produce a warning and fall
    /// back to the default edges.
    pub fn from_config(config: &AppConfig, output_file: PathBuf) -> (Self, Vec<String>) {
        use crate::util::constants;

        let mut warnings = Vec::new();
        let bin_edges = match histogram::validate_edges(&config.bin_edges) {
            Ok(()) => config.bin_edges.clone(),
            Err(e) => {
                warnings.push(format!(
                    "[histogram] bin_edges rejected: {e}. Using default edges."
                ));
                constants::DEFAULT_BIN_EDGES.to_vec()
            }
        };

        let options = Self {
            input_dir: config.input_dir.clone(),
            output_file,
            discovery: DiscoveryConfig {
                skip_leading: config.skip_leading,
                include_patterns: config.include_patterns.clone(),
                exclude_patterns: config.exclude_patterns.clone(),
                ..DiscoveryConfig::default()
            },
            extract: extract_config(config),
            bin_edges,
            keep_going: false,
        };
        (options, warnings)
    }
}

/// Extraction settings from a validated config.
pub fn extract_config(config: &AppConfig) -> ExtractConfig {
    ExtractConfig {
        marker: config.marker.clone(),
        field_index: config.field_index,
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,

    /// One extraction per processed log, in processing order.
    pub extractions: Vec<Extraction>,

    /// The aggregated dataset the histogram was built from.
    pub dataset: Vec<f64>,
}

// =============================================================================
// Extraction
// =============================================================================

/// Read the log at `path` and extract its value.
pub fn extract_file(
    path: &Path,
    config: &ExtractConfig,
) -> std::result::Result<Option<f64>, ExtractError> {
    let content = fs::read_file_lossy(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExtractError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ExtractError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    extract::extract_value(&content, path, config)
}

/// Extract one log and append its entry to the collection at `output`.
///
/// This is the single-file surface: nothing is reset, and no trailer is
/// written.
pub fn extract_to_collection(
    log_path: &Path,
    output: &Path,
    config: &ExtractConfig,
) -> Result<Extraction> {
    let value = extract_file(log_path, config)?;
    append_entry(output, value)?;
    tracing::info!(
        file = %log_path.display(),
        value = ?value,
        output = %output.display(),
        "Entry appended"
    );
    Ok(Extraction {
        source_file: log_path.to_path_buf(),
        value,
    })
}

// =============================================================================
// Pipeline
// =============================================================================

/// Run the whole pipeline: reset, extract every log, aggregate, bin.
pub fn run_pipeline(options: &RunOptions) -> Result<RunReport> {
    let output = options.output_file.as_path();

    let removed = fs::reset_file(output).map_err(|e| collection_io(output, "reset", e))?;
    tracing::debug!(output = %output.display(), removed, "Output collection reset");

    let files = discovery::list_input_files(&options.input_dir, &options.discovery)?;
    tracing::info!(
        input = %options.input_dir.display(),
        files = files.len(),
        "Run started"
    );

    let mut extractions: Vec<Extraction> = Vec::with_capacity(files.len());
    let mut failed = 0usize;
    for path in files {
        let value = match extract_file(&path, &options.extract) {
            Ok(v) => v,
            Err(e) if options.keep_going => {
                tracing::warn!(
                    file = %path.display(),
                    error = %e,
                    "Extraction failed; recorded as missing"
                );
                failed += 1;
                None
            }
            Err(e) => return Err(e.into()),
        };
        append_entry(output, value)?;
        tracing::debug!(file = %path.display(), value = ?value, "Extracted");
        extractions.push(Extraction {
            source_file: path,
            value,
        });
    }

    fs::append_line(output, &collection::trailer_line(extractions.len()))
        .map_err(|e| collection_io(output, "append", e))?;

    let entries = fs::read_lines(output).map_err(|e| collection_io(output, "read", e))?;
    let dataset = aggregate(&entries[..])?;
    let histogram = Histogram::compute(&options.bin_edges, &dataset)?;

    let values_extracted = extractions.iter().filter(|e| !e.is_missing()).count();
    let summary = RunSummary {
        generated_at: chrono::Utc::now(),
        input_dir: options.input_dir.clone(),
        output_file: options.output_file.clone(),
        files_processed: extractions.len(),
        values_extracted,
        missing: extractions.len() - values_extracted - failed,
        failed,
        dataset_len: dataset.len(),
        histogram,
    };

    tracing::info!(
        files = summary.files_processed,
        values = summary.values_extracted,
        missing = summary.missing,
        failed = summary.failed,
        dataset = summary.dataset_len,
        "Run complete"
    );

    Ok(RunReport {
        summary,
        extractions,
        dataset,
    })
}

fn append_entry(output: &Path, value: Option<f64>) -> Result<()> {
    fs::append_line(output, &collection::format_entry(value))
        .map_err(|e| collection_io(output, "append", e).into())
}

fn collection_io(path: &Path, operation: &'static str, source: io::Error) -> CollectionError {
    CollectionError::Io {
        path: path.to_path_buf(),
        operation,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::SimHistError;
    use std::fs as stdfs;
    use tempfile::TempDir;

    const WITH_MARKER: &str = "LAMMPS (29 Oct 2020)\n\
                               Atoms Step Temp PotEng\n\
                               200 0 300.0 -8823.5\n";

    fn setup(logs: &[(&str, &str)]) -> (TempDir, RunOptions) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("logs");
        stdfs::create_dir(&input).unwrap();
        for (name, content) in logs {
            stdfs::write(input.join(name), content).unwrap();
        }
        let (mut options, warnings) =
            RunOptions::from_config(&AppConfig::default(), dir.path().join("energies.txt"));
        assert!(warnings.is_empty());
        options.input_dir = input;
        (dir, options)
    }

    #[test]
    fn test_pipeline_collects_and_bins() {
        let (_dir, options) = setup(&[
            ("a_skipped.txt", "not a log"),
            ("b.log", WITH_MARKER),
            ("c.log", "no marker here\n"),
            ("d.log", "Atoms Step Temp PotEng\n100 0 10.0 -4450.0\n"),
        ]);
        let report = run_pipeline(&options).unwrap();

        assert_eq!(report.summary.files_processed, 3);
        assert_eq!(report.summary.values_extracted, 2);
        assert_eq!(report.summary.missing, 1);
        assert_eq!(report.dataset, vec![-8823.5, -4450.0]);
        assert_eq!(report.summary.histogram.binned(), 2);

        let written = stdfs::read_to_string(&options.output_file).unwrap();
        assert_eq!(written, "-8823.5\nNone\n-4450.0\n# end files=3\n");
    }

    #[test]
    fn test_pipeline_resets_previous_output() {
        let (_dir, options) = setup(&[("a", ""), ("b.log", WITH_MARKER)]);
        stdfs::write(&options.output_file, "stale\nstale\n").unwrap();
        let report = run_pipeline(&options).unwrap();
        assert_eq!(report.dataset, vec![-8823.5]);
    }

    #[test]
    fn test_parse_failure_aborts_run() {
        let (_dir, options) = setup(&[
            ("a", ""),
            ("b.log", "Atoms Step Temp PotEng\n1 2 3\n"),
            ("c.log", WITH_MARKER),
        ]);
        let err = run_pipeline(&options).unwrap_err();
        assert!(matches!(
            err,
            SimHistError::Extract(ExtractError::MissingField { .. })
        ));
        // Nothing after the failing log was appended.
        let written = stdfs::read_to_string(&options.output_file).unwrap_or_default();
        assert!(written.is_empty());
    }

    #[test]
    fn test_keep_going_records_missing() {
        let (_dir, mut options) = setup(&[
            ("a", ""),
            ("b.log", "Atoms Step Temp PotEng\n1 2 3 nan-ish\n"),
            ("c.log", WITH_MARKER),
        ]);
        options.keep_going = true;
        let report = run_pipeline(&options).unwrap();
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.missing, 0);
        assert_eq!(report.dataset, vec![-8823.5]);
    }

    #[test]
    fn test_extract_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            extract_file(&dir.path().join("gone.log"), &ExtractConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }));
    }

    #[test]
    fn test_extract_to_collection_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("one.log");
        let out = dir.path().join("out.txt");
        stdfs::write(&log, WITH_MARKER).unwrap();

        extract_to_collection(&log, &out, &ExtractConfig::default()).unwrap();
        stdfs::write(&log, "nothing\n").unwrap();
        let second = extract_to_collection(&log, &out, &ExtractConfig::default()).unwrap();

        assert!(second.is_missing());
        assert_eq!(stdfs::read_to_string(&out).unwrap(), "-8823.5\nNone\n");
    }

    #[test]
    fn test_bad_config_edges_fall_back() {
        let config = AppConfig {
            bin_edges: vec![0.0, 0.0],
            ..AppConfig::default()
        };
        let (options, warnings) = RunOptions::from_config(&config, PathBuf::from("out.txt"));
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            options.bin_edges,
            crate::util::constants::DEFAULT_BIN_EDGES.to_vec()
        );
    }
}
