// SimHist - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Extraction
// =============================================================================

/// The value read out of one simulation log.
///
/// `value` is `None` when the log never reached the marker line. Inside the
/// process this is the only representation of "missing"; the textual
/// sentinel exists only in the collection file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    /// Path of the log the value was read from.
    pub source_file: PathBuf,

    /// Energy reading, if the marker was found.
    pub value: Option<f64>,
}

impl Extraction {
    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

// =============================================================================
// Histogram
// =============================================================================

/// Fixed-edge histogram over the dataset.
///
/// `counts[i]` holds the values in `[edges[i], edges[i + 1])`; the last bin
/// also includes its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges, strictly increasing, `counts.len() + 1` of them.
    pub edges: Vec<f64>,

    /// Number of values per bin.
    pub counts: Vec<u64>,

    /// Values below the first edge.
    pub underflow: u64,

    /// Values above the last edge.
    pub overflow: u64,

    /// NaN values, which fall in no bin.
    pub non_finite: u64,
}

/// One bin, as handed to renderers and exporters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

impl Histogram {
    /// Iterate over bins in ascending edge order.
    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        self.counts.iter().enumerate().map(move |(i, &count)| Bin {
            lower: self.edges[i],
            upper: self.edges[i + 1],
            count,
        })
    }

    /// Total number of values that landed in a bin.
    pub fn binned(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest single bin count (0 for an empty histogram).
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

// =============================================================================
// Run summary
// =============================================================================

/// Everything a finished run reports: counts at each stage plus the
/// histogram. Serialised as-is by the JSON exporter.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// When the run finished.
    pub generated_at: DateTime<Utc>,

    /// Directory the logs were listed from.
    pub input_dir: PathBuf,

    /// Collection file written during the run.
    pub output_file: PathBuf,

    /// Number of log files handed to the extractor.
    pub files_processed: usize,

    /// Logs that yielded a value.
    pub values_extracted: usize,

    /// Logs without a marker line.
    pub missing: usize,

    /// Logs that failed to parse and were recorded as missing
    /// (only non-zero when the run keeps going past failures).
    pub failed: usize,

    /// Length of the aggregated dataset.
    pub dataset_len: usize,

    pub histogram: Histogram,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Histogram {
        Histogram {
            edges: vec![0.0, 1.0, 2.0, 4.0],
            counts: vec![3, 0, 5],
            underflow: 1,
            overflow: 0,
            non_finite: 0,
        }
    }

    #[test]
    fn test_bins_pair_edges_with_counts() {
        let bins: Vec<Bin> = sample().bins().collect();
        assert_eq!(bins.len(), 3);
        assert_eq!(
            bins[2],
            Bin {
                lower: 2.0,
                upper: 4.0,
                count: 5
            }
        );
    }

    #[test]
    fn test_binned_excludes_underflow() {
        let h = sample();
        assert_eq!(h.binned(), 8);
        assert_eq!(h.max_count(), 5);
    }

    #[test]
    fn test_extraction_missing() {
        let e = Extraction {
            source_file: PathBuf::from("a.log"),
            value: None,
        };
        assert!(e.is_missing());
    }
}
