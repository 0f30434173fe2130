// SimHist - ui/chart.rs
//
// Horizontal bar chart of a histogram, one row per bin, for stdout.

use crate::core::model::Histogram;
use std::fmt::Write;

const BAR_CHAR: char = '#';

/// Render `hist` as a text chart whose longest bar is `bar_width` wide.
///
/// Every bin gets a row, including empty ones, so the gap between the two
/// energy populations stays visible. Non-empty bins always get at least one
/// bar character. Underflow, overflow and NaN counts are listed below the
/// chart when non-zero.
pub fn render_text(hist: &Histogram, bar_width: usize) -> String {
    let max = hist.max_count();
    let last = hist.counts.len().saturating_sub(1);

    let labels: Vec<String> = hist
        .bins()
        .enumerate()
        .map(|(i, bin)| {
            let close = if i == last { ']' } else { ')' };
            format!("[{}, {}{close}", bin.lower, bin.upper)
        })
        .collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);
    let count_width = max.to_string().len();

    let mut out = String::new();
    for (label, bin) in labels.iter().zip(hist.bins()) {
        let bar = BAR_CHAR.to_string().repeat(bar_len(bin.count, max, bar_width));
        let _ = writeln!(
            out,
            "{label:<label_width$} | {bar:<bar_width$} {count:>count_width$}",
            count = bin.count
        );
    }

    if hist.underflow > 0 {
        let _ = writeln!(out, "below {}: {}", hist.edges[0], hist.underflow);
    }
    if hist.overflow > 0 {
        let _ = writeln!(
            out,
            "above {}: {}",
            hist.edges[hist.edges.len() - 1],
            hist.overflow
        );
    }
    if hist.non_finite > 0 {
        let _ = writeln!(out, "not a number: {}", hist.non_finite);
    }
    let _ = writeln!(out, "total binned: {}", hist.binned());
    out
}

/// Bar length for `count`, scaled so that `max` fills `width`.
fn bar_len(count: u64, max: u64, width: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let scaled = (count as f64 / max as f64 * width as f64).round() as usize;
    scaled.max(1)
}
