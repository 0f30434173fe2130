// SimHist - core/collection.rs
//
// Text format of the output collection and the aggregation step that turns
// it into the dataset.
//
// File format: one entry per processed log, newline separated. An entry is
// either a float literal or the missing sentinel ("None"). The final line of
// a complete collection is a trailer written by the driver and carries no
// data; `aggregate` always drops it.

use crate::util::constants;
use crate::util::error::AggregateError;

/// Render one extraction result as a collection line (without newline).
///
/// Values always carry a decimal point (`-4450.0`, not `-4450`) so the file
/// reads the same as one written by the simulation tooling.
pub fn format_entry(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:?}"),
        None => constants::MISSING_SENTINEL.to_string(),
    }
}

/// The non-data line appended once every log has been processed.
pub fn trailer_line(files: usize) -> String {
    format!("{} files={files}", constants::TRAILER_PREFIX)
}

/// Parse one collection line back into an optional value.
///
/// Surrounding whitespace (including the newline) is ignored.
/// `line_number` is one-based and used only for error context.
pub fn parse_entry(text: &str, line_number: usize) -> Result<Option<f64>, AggregateError> {
    let trimmed = text.trim();
    if trimmed == constants::MISSING_SENTINEL {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|source| AggregateError::InvalidEntry {
            line_number,
            text: trimmed.to_string(),
            source,
        })
}

/// Build the dataset from the collection entries.
///
/// The last entry is dropped unconditionally, whatever it contains; an empty
/// input yields an empty dataset. Missing entries are discarded, everything
/// else is parsed and kept in order. The first entry that is neither a
/// number nor the sentinel aborts with `AggregateError::InvalidEntry`.
pub fn aggregate<S: AsRef<str>>(entries: &[S]) -> Result<Vec<f64>, AggregateError> {
    let data = match entries.split_last() {
        Some((_, rest)) => rest,
        None => return Ok(Vec::new()),
    };

    let mut dataset = Vec::with_capacity(data.len());
    for (idx, entry) in data.iter().enumerate() {
        if let Some(v) = parse_entry(entry.as_ref(), idx + 1)? {
            dataset.push(v);
        }
    }

    tracing::debug!(
        entries = entries.len(),
        dataset = dataset.len(),
        "Collection aggregated"
    );
    Ok(dataset)
}
