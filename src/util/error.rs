// SimHist - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation: every variant carries the path or
// line it refers to, and keeps the underlying error as its `source()`.

use std::fmt;
use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;

/// Top-level error type for all SimHist operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum SimHistError {
    /// Reading a value out of a simulation log failed.
    Extract(ExtractError),

    /// An entry of the output collection could not be aggregated.
    Aggregate(AggregateError),

    /// Histogram bin edges are unusable.
    Histogram(HistogramError),

    /// Listing the input directory failed.
    Discovery(DiscoveryError),

    /// Writing or reading the output collection file failed.
    Collection(CollectionError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for SimHistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extract(e) => write!(f, "Extraction error: {e}"),
            Self::Aggregate(e) => write!(f, "Aggregation error: {e}"),
            Self::Histogram(e) => write!(f, "Histogram error: {e}"),
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Collection(e) => write!(f, "Output collection error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for SimHistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Extract(e) => Some(e),
            Self::Aggregate(e) => Some(e),
            Self::Histogram(e) => Some(e),
            Self::Discovery(e) => Some(e),
            Self::Collection(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Extract errors
// ---------------------------------------------------------------------------

/// Errors raised while extracting the energy value from one log file.
#[derive(Debug)]
pub enum ExtractError {
    /// The log file does not exist.
    NotFound { path: PathBuf },

    /// Any other I/O error while reading the log file.
    Io { path: PathBuf, source: io::Error },

    /// The data row after the marker has too few tokens.
    MissingField {
        file: PathBuf,
        line_number: u64,
        field_index: usize,
        tokens: usize,
    },

    /// The token at the expected position is not a floating-point number.
    InvalidNumber {
        file: PathBuf,
        line_number: u64,
        token: String,
        source: ParseFloatError,
    },
}

impl ExtractError {
    /// True for the two parse failures (as opposed to I/O failures).
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::InvalidNumber { .. }
        )
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Log file '{}' does not exist", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "'{}': I/O error: {source}", path.display())
            }
            Self::MissingField {
                file,
                line_number,
                field_index,
                tokens,
            } => write!(
                f,
                "'{}' line {line_number}: expected a value at field {field_index}, \
                 but the row has only {tokens} fields",
                file.display()
            ),
            Self::InvalidNumber {
                file,
                line_number,
                token,
                source,
            } => write!(
                f,
                "'{}' line {line_number}: cannot parse '{token}' as a number: {source}",
                file.display()
            ),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidNumber { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExtractError> for SimHistError {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

// ---------------------------------------------------------------------------
// Aggregate errors
// ---------------------------------------------------------------------------

/// Errors raised while turning collection entries into the dataset.
#[derive(Debug)]
pub enum AggregateError {
    /// An entry is neither the missing sentinel nor a number.
    InvalidEntry {
        line_number: usize,
        text: String,
        source: ParseFloatError,
    },
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEntry {
                line_number,
                text,
                source,
            } => write!(
                f,
                "entry {line_number} ('{text}') is neither a number nor the missing marker: {source}"
            ),
        }
    }
}

impl std::error::Error for AggregateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEntry { source, .. } => Some(source),
        }
    }
}

impl From<AggregateError> for SimHistError {
    fn from(e: AggregateError) -> Self {
        Self::Aggregate(e)
    }
}

// ---------------------------------------------------------------------------
// Histogram errors
// ---------------------------------------------------------------------------

/// Errors related to histogram bin edges.
#[derive(Debug, PartialEq)]
pub enum HistogramError {
    /// Fewer than two edges means there is no bin at all.
    TooFewEdges { count: usize },

    /// An edge is NaN or infinite.
    NonFiniteEdge { index: usize, value: f64 },

    /// Edges must strictly increase.
    NotIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },
}

impl fmt::Display for HistogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewEdges { count } => {
                write!(f, "at least 2 bin edges are required, got {count}")
            }
            Self::NonFiniteEdge { index, value } => {
                write!(f, "bin edge {index} is not finite ({value})")
            }
            Self::NotIncreasing {
                index,
                previous,
                value,
            } => write!(
                f,
                "bin edge {index} ({value}) is not greater than the previous edge ({previous})"
            ),
        }
    }
}

impl std::error::Error for HistogramError {}

impl From<HistogramError> for SimHistError {
    fn from(e: HistogramError) -> Self {
        Self::Histogram(e)
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to listing the input directory.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The input directory does not exist.
    RootNotFound { path: PathBuf },

    /// The input path is not a directory.
    NotADirectory { path: PathBuf },

    /// Permission denied accessing the input directory.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// Walkdir traversal error.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Maximum file count exceeded.
    MaxFilesExceeded { max: usize },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Input directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Input path '{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "Permission denied accessing '{}': {source}",
                    path.display()
                )
            }
            Self::Traversal { path, source } => {
                write!(f, "Error listing '{}': {source}", path.display())
            }
            Self::MaxFilesExceeded { max } => {
                write!(
                    f,
                    "Input directory holds more than {max} files. \
                     Narrow it down with [discovery] include_patterns."
                )
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for SimHistError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Collection errors
// ---------------------------------------------------------------------------

/// Errors related to the output collection file.
#[derive(Debug)]
pub enum CollectionError {
    /// I/O error with path and operation context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CollectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<CollectionError> for SimHistError {
    fn from(e: CollectionError) -> Self {
        Self::Collection(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The export path has no recognised extension.
    UnknownFormat { path: PathBuf },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::UnknownFormat { path } => write!(
                f,
                "Cannot tell export format from '{}'. Use a .csv or .json extension.",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for SimHistError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for SimHistError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for SimHist results.
pub type Result<T> = std::result::Result<T, SimHistError>;
