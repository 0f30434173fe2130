// SimHist - core/discovery.rs
//
// Listing of the simulation logs in the input directory.
//
// The directory is read one level deep with `walkdir` and sorted by file
// name, so a run over the same directory always processes logs in the same
// order. The simulation tool leaves a non-log entry at the head of that
// listing; the first `skip_leading` files are therefore dropped before any
// pattern filtering.
//
// Only file *metadata* is touched here, never contents.

use crate::util::error::DiscoveryError;
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for listing the input directory.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Leading entries of the sorted listing that are not logs.
    pub skip_leading: usize,

    /// Glob patterns a file name MUST match to be processed.
    /// An empty list means "every file that is not excluded".
    pub include_patterns: Vec<String>,

    /// Glob patterns for file names that are never processed.
    pub exclude_patterns: Vec<String>,

    /// Maximum number of files returned before giving up.
    pub max_files: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        use crate::util::constants;
        Self {
            skip_leading: constants::DEFAULT_SKIP_LEADING,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            max_files: constants::MAX_INPUT_FILES,
        }
    }
}

// =============================================================================
// Listing
// =============================================================================

/// List the logs under `root` in processing order.
///
/// Returns `Err` if the root is missing, not a directory, or cannot be read.
/// Unlike a recursive scan, a single unreadable entry in a flat input
/// directory is treated as fatal: a silently shorter dataset is worse than a
/// failed run.
pub fn list_input_files(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    preflight(root)?;

    tracing::debug!(
        root = %root.display(),
        skip_leading = config.skip_leading,
        include = ?config.include_patterns,
        exclude = ?config.exclude_patterns,
        "Listing input directory"
    );

    let include_pats = compile_patterns(&config.include_patterns, "include");
    let exclude_pats = compile_patterns(&config.exclude_patterns, "exclude");

    let walker = walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut listing: Vec<PathBuf> = Vec::new();
    for entry_result in walker {
        let entry = entry_result.map_err(|source| DiscoveryError::Traversal {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            tracing::trace!(path = %entry.path().display(), "Skipping non-file entry");
            continue;
        }
        listing.push(entry.into_path());
    }

    let total = listing.len();
    let mut files: Vec<PathBuf> = Vec::new();
    for path in listing.into_iter().skip(config.skip_leading) {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => {
                tracing::warn!(path = %path.display(), "Skipping non-UTF-8 file name");
                continue;
            }
        };

        if is_excluded(file_name, &exclude_pats) {
            tracing::trace!(file = file_name, "Excluded by pattern");
            continue;
        }
        if !is_included(file_name, &include_pats) {
            tracing::trace!(file = file_name, "Not matched by include patterns");
            continue;
        }

        if files.len() >= config.max_files {
            return Err(DiscoveryError::MaxFilesExceeded {
                max: config.max_files,
            });
        }
        files.push(path);
    }

    tracing::debug!(
        listed = total,
        selected = files.len(),
        "Listing complete"
    );
    Ok(files)
}

/// Fail early with a specific error when `root` cannot be listed.
///
/// `fs::metadata` is used instead of `Path::is_dir` so that permission
/// failures are not reported as "does not exist".
fn preflight(root: &Path) -> Result<(), DiscoveryError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DiscoveryError::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(DiscoveryError::PermissionDenied {
                path: root.to_path_buf(),
                source: e,
            })
        }
        Err(_) => Err(DiscoveryError::RootNotFound {
            path: root.to_path_buf(),
        }),
    }
}

// =============================================================================
// Glob helpers
// =============================================================================

/// Compile a list of glob pattern strings into `glob::Pattern` objects.
/// Patterns that fail to compile are logged as warnings and skipped.
fn compile_patterns(patterns: &[String], kind: &str) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                tracing::warn!(pattern = p, kind, error = %e, "Invalid glob pattern, skipping");
                None
            }
        })
        .collect()
}

/// Returns true if `file_name` matches any exclude pattern.
fn is_excluded(file_name: &str, exclude_pats: &[glob::Pattern]) -> bool {
    exclude_pats.iter().any(|p| p.matches(file_name))
}

/// Returns true if `file_name` matches at least one include pattern.
/// An empty include list means "include all" (returns true).
fn is_included(file_name: &str, include_pats: &[glob::Pattern]) -> bool {
    if include_pats.is_empty() {
        return true;
    }
    include_pats.iter().any(|p| p.matches(file_name))
}

// =============================================================================
// Tests
// =============================================================================
