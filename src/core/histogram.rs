// SimHist - core/histogram.rs
//
// Fixed-edge binning of the dataset.
//
// Bins follow the usual plotting convention: every bin is half-open
// [lower, upper) except the last, which also takes values equal to the
// final edge. Values outside the edges are counted but not binned.

use crate::core::model::Histogram;
use crate::util::error::HistogramError;

/// Check that `edges` can define a histogram.
pub fn validate_edges(edges: &[f64]) -> Result<(), HistogramError> {
    if edges.len() < 2 {
        return Err(HistogramError::TooFewEdges { count: edges.len() });
    }
    for (index, &value) in edges.iter().enumerate() {
        if !value.is_finite() {
            return Err(HistogramError::NonFiniteEdge { index, value });
        }
    }
    for (index, pair) in edges.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(HistogramError::NotIncreasing {
                index: index + 1,
                previous: pair[0],
                value: pair[1],
            });
        }
    }
    Ok(())
}

impl Histogram {
    /// Bin `data` into the bins described by `edges`.
    pub fn compute(edges: &[f64], data: &[f64]) -> Result<Self, HistogramError> {
        validate_edges(edges)?;

        let mut hist = Histogram {
            edges: edges.to_vec(),
            counts: vec![0; edges.len() - 1],
            underflow: 0,
            overflow: 0,
            non_finite: 0,
        };

        for &v in data {
            match bin_index(edges, v) {
                Placement::Bin(i) => hist.counts[i] += 1,
                Placement::Below => hist.underflow += 1,
                Placement::Above => hist.overflow += 1,
                Placement::NaN => hist.non_finite += 1,
            }
        }

        tracing::debug!(
            values = data.len(),
            bins = hist.counts.len(),
            underflow = hist.underflow,
            overflow = hist.overflow,
            "Histogram computed"
        );
        Ok(hist)
    }
}

enum Placement {
    Bin(usize),
    Below,
    Above,
    NaN,
}

/// Locate `v` among validated `edges`.
fn bin_index(edges: &[f64], v: f64) -> Placement {
    if v.is_nan() {
        return Placement::NaN;
    }
    let last = edges.len() - 1;
    if v < edges[0] {
        return Placement::Below;
    }
    if v > edges[last] {
        return Placement::Above;
    }
    if v == edges[last] {
        return Placement::Bin(last - 1);
    }
    // Number of edges <= v; v sits in the bin starting at the last of them.
    let upto = edges.partition_point(|&e| e <= v);
    Placement::Bin(upto - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants::DEFAULT_BIN_EDGES;

    #[test]
    fn test_default_edges_are_valid() {
        assert!(validate_edges(DEFAULT_BIN_EDGES).is_ok());
        assert_eq!(DEFAULT_BIN_EDGES.len(), 10);
    }

    #[test]
    fn test_two_populations() {
        let data = [-8823.5, -8810.0, -8960.0, -4450.0, -4430.0, -4410.5];
        let h = Histogram::compute(DEFAULT_BIN_EDGES, &data).unwrap();
        // [-9000,-8950) [-8950,-8900) [-8900,-8850) [-8850,-8800) [-8800,-4600)
        // [-4600,-4475) [-4475,-4450) [-4450,-4425) [-4425,-4400]
        assert_eq!(h.counts, vec![1, 0, 0, 2, 0, 0, 0, 2, 1]);
        assert_eq!(h.underflow + h.overflow + h.non_finite, 0);
    }

    #[test]
    fn test_edges_are_left_closed() {
        let h = Histogram::compute(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap();
        assert_eq!(h.counts, vec![1, 1]);
    }

    #[test]
    fn test_last_edge_is_included() {
        let h = Histogram::compute(&[0.0, 1.0, 2.0], &[2.0]).unwrap();
        assert_eq!(h.counts, vec![0, 1]);
        assert_eq!(h.overflow, 0);
    }

    #[test]
    fn test_out_of_range_and_nan() {
        let data = [-9500.0, -4000.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY];
        let h = Histogram::compute(DEFAULT_BIN_EDGES, &data).unwrap();
        assert_eq!(h.binned(), 0);
        assert_eq!(h.underflow, 2);
        assert_eq!(h.overflow, 2);
        assert_eq!(h.non_finite, 1);
    }

    #[test]
    fn test_empty_dataset() {
        let h = Histogram::compute(DEFAULT_BIN_EDGES, &[]).unwrap();
        assert_eq!(h.counts, vec![0; 9]);
    }

    #[test]
    fn test_invalid_edges() {
        assert_eq!(
            validate_edges(&[1.0]),
            Err(HistogramError::TooFewEdges { count: 1 })
        );
        assert!(matches!(
            validate_edges(&[0.0, f64::INFINITY]),
            Err(HistogramError::NonFiniteEdge { index: 1, .. })
        ));
        assert!(matches!(
            validate_edges(&[0.0, 2.0, 2.0]),
            Err(HistogramError::NotIncreasing { index: 2, .. })
        ));
    }
}
