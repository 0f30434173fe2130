// SimHist - core/extract.rs
//
// Reads the energy value out of a simulation log.
// Core layer: accepts file content as a string, never touches the
// filesystem directly (the app layer reads the file).
//
// The log holds a tabular thermo section introduced by a header row
// starting with "Atoms Step". The value of interest is one column of the
// first data row under that header.

use crate::util::error::ExtractError;
use crate::util::logging::preview;
use std::path::Path;

/// Configuration for extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// The two leading tokens of the header row.
    pub marker: [String; 2],

    /// Zero-based column of the value in the data row.
    pub field_index: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        use crate::util::constants;
        Self {
            marker: [
                constants::MARKER_FIRST.to_string(),
                constants::MARKER_SECOND.to_string(),
            ],
            field_index: constants::DEFAULT_FIELD_INDEX,
        }
    }
}

impl ExtractConfig {
    fn is_marker(&self, tokens: &[&str]) -> bool {
        tokens[0] == self.marker[0] && tokens[1] == self.marker[1]
    }
}

/// Extract the value from the content of one log file.
///
/// Lines with fewer than two tokens are never considered, neither as the
/// marker nor as the data row. The first remaining line after the marker is
/// the data row and is the only one inspected: if it is too short or its
/// field is not a number, extraction fails instead of moving on.
///
/// Returns `Ok(None)` when no marker is found before the end of content.
///
/// # Arguments
/// * `content` - File content (the app layer handles reading)
/// * `file` - Path to the source file, for error context only
/// * `config` - Marker tokens and field index
pub fn extract_value(
    content: &str,
    file: &Path,
    config: &ExtractConfig,
) -> Result<Option<f64>, ExtractError> {
    let mut found = false;

    for (line_idx, line) in content.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() <= 1 {
            continue;
        }

        if config.is_marker(&tokens) {
            tracing::trace!(
                file = %file.display(),
                line = line_idx + 1,
                "Marker line found"
            );
            found = true;
            continue;
        }

        if found {
            let line_number = (line_idx as u64) + 1;
            tracing::debug!(
                file = %file.display(),
                line = line_number,
                row = preview(line),
                "Data row"
            );
            return parse_field(&tokens, file, line_number, config.field_index).map(Some);
        }
    }

    tracing::debug!(file = %file.display(), "No marker line; no value");
    Ok(None)
}

/// Parse the token at `field_index` of a data row.
fn parse_field(
    tokens: &[&str],
    file: &Path,
    line_number: u64,
    field_index: usize,
) -> Result<f64, ExtractError> {
    let token = tokens
        .get(field_index)
        .ok_or_else(|| ExtractError::MissingField {
            file: file.to_path_buf(),
            line_number,
            field_index,
            tokens: tokens.len(),
        })?;

    token
        .parse::<f64>()
        .map_err(|source| ExtractError::InvalidNumber {
            file: file.to_path_buf(),
            line_number,
            token: (*token).to_string(),
            source,
        })
}

// =============================================================================
// Tests
// =============================================================================
