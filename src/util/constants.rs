// SimHist - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SimHist";

/// Application identifier used for config directories.
pub const APP_ID: &str = "SimHist";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Extraction
// =============================================================================

/// First token of the header row that precedes the data row of interest.
pub const MARKER_FIRST: &str = "Atoms";

/// Second token of the header row.
pub const MARKER_SECOND: &str = "Step";

/// Zero-based index of the energy column in the data row.
pub const DEFAULT_FIELD_INDEX: usize = 3;

/// Upper bound on a configurable field index. Data rows in the simulation
/// thermo output never come close to this many columns.
pub const MAX_FIELD_INDEX: usize = 64;

// =============================================================================
// Output collection
// =============================================================================

/// Text written to the collection file when a log has no marker line.
pub const MISSING_SENTINEL: &str = "None";

/// Prefix of the non-data line written once a run has finished.
pub const TRAILER_PREFIX: &str = "# end";

// =============================================================================
// Discovery
// =============================================================================

/// Directory the simulation tool drops its logs into, relative to the
/// working directory.
pub const DEFAULT_INPUT_DIR: &str = "Sem1_dimers_data";

/// Number of leading entries of the sorted input listing that are not logs.
pub const DEFAULT_SKIP_LEADING: usize = 1;

/// Hard upper bound on `skip_leading` (prevents configuration mistakes).
pub const MAX_SKIP_LEADING: usize = 1_000;

/// Maximum number of input files processed in one run.
pub const MAX_INPUT_FILES: usize = 100_000;

// =============================================================================
// Histogram
// =============================================================================

/// Bin edges for the energy histogram: two dense ranges, one per population
/// in the dimer simulations.
pub const DEFAULT_BIN_EDGES: &[f64] = &[
    -9000.0, -8950.0, -8900.0, -8850.0, -8800.0, -4600.0, -4475.0, -4450.0, -4425.0, -4400.0,
];

/// Maximum number of bin edges accepted from config.toml.
pub const MAX_BIN_EDGES: usize = 1_000;

/// Width in characters of the longest bar in the text chart.
pub const DEFAULT_BAR_WIDTH: usize = 50;

/// Minimum configurable bar width.
pub const MIN_BAR_WIDTH: usize = 5;

/// Maximum configurable bar width.
pub const MAX_BAR_WIDTH: usize = 200;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
