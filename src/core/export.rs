// SimHist - core/export.rs
//
// CSV and JSON export of a finished run.
// Core layer: the exporters write to any Write trait object;
// `export_to_file` only adds opening the destination.

use crate::core::model::RunSummary;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Export format, chosen from the export path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick the format from `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ExportError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Export histogram bins to CSV format.
///
/// Writes: lower, upper, count. Returns the number of bin rows written.
pub fn export_csv<W: Write>(
    summary: &RunSummary,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["lower", "upper", "count"])
        .map_err(csv_err)?;

    let mut count = 0;
    for bin in summary.histogram.bins() {
        csv_writer
            .write_record([
                bin.lower.to_string(),
                bin.upper.to_string(),
                bin.count.to_string(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export the whole run summary (counts and histogram) as pretty JSON.
pub fn export_json<W: Write>(
    summary: &RunSummary,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, summary).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(summary.histogram.counts.len())
}

/// Write `summary` to `path` in the format implied by its extension.
pub fn export_to_file(summary: &RunSummary, path: &Path) -> Result<usize, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: PathBuf::from(path),
        source: e,
    })?;
    let mut writer = std::io::BufWriter::new(file);
    let rows = match format {
        ExportFormat::Csv => export_csv(summary, &mut writer, path)?,
        ExportFormat::Json => export_json(summary, &mut writer, path)?,
    };
    writer.flush().map_err(|e| ExportError::Io {
        path: PathBuf::from(path),
        source: e,
    })?;
    tracing::info!(path = %path.display(), ?format, rows, "Export written");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Histogram;
    use chrono::Utc;

    fn make_summary() -> RunSummary {
        let histogram = Histogram::compute(
            &[-9000.0, -8950.0, -8900.0],
            &[-8960.0, -8910.5, -8901.0],
        )
        .unwrap();
        RunSummary {
            generated_at: Utc::now(),
            input_dir: PathBuf::from("Sem1_dimers_data"),
            output_file: PathBuf::from("energies.txt"),
            files_processed: 4,
            values_extracted: 3,
            missing: 1,
            failed: 0,
            dataset_len: 3,
            histogram,
        }
    }

    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        let rows = export_csv(&make_summary(), &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(rows, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "lower,upper,count");
        assert_eq!(lines[1], "-9000,-8950,1");
        assert_eq!(lines[2], "-8950,-8900,2");
    }

    #[test]
    fn test_json_export() {
        let mut buf = Vec::new();
        export_json(&make_summary(), &mut buf, Path::new("out.json")).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["files_processed"], 4);
        assert_eq!(value["missing"], 1);
        assert_eq!(value["histogram"]["counts"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("bins.CSV")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("run.json")).unwrap(),
            ExportFormat::Json
        );
        assert!(ExportFormat::from_path(Path::new("plot.png")).is_err());
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bins.csv");
        let rows = export_to_file(&make_summary(), &path).unwrap();
        assert_eq!(rows, 2);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("lower,upper,count"));
    }
}
