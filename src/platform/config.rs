// SimHist - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation. Invalid values produce actionable warnings and fall back to
// defaults; a config file named explicitly on the command line must exist
// and parse.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SimHist configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/simhist/ or %APPDATA%\SimHist\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Location of the default config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml shape
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub input: InputSection,
    pub discovery: DiscoverySection,
    pub extract: ExtractSection,
    pub histogram: HistogramSection,
    pub logging: LoggingSection,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Directory holding the simulation logs.
    pub directory: Option<String>,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Leading listing entries to skip.
    pub skip_leading: Option<usize>,
    /// Include glob patterns.
    pub include_patterns: Option<Vec<String>>,
    /// Exclude glob patterns.
    pub exclude_patterns: Option<Vec<String>>,
}

/// `[extract]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// The two header tokens, e.g. ["Atoms", "Step"].
    pub marker: Option<Vec<String>>,
    /// Zero-based column of the value in the data row.
    pub field_index: Option<usize>,
}

/// `[histogram]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct HistogramSection {
    /// Bin edges, strictly increasing.
    pub bin_edges: Option<Vec<f64>>,
    /// Width of the longest bar in the text chart.
    pub bar_width: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

// =============================================================================
// Validated configuration
// =============================================================================

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Input / discovery --
    pub input_dir: PathBuf,
    pub skip_leading: usize,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,

    // -- Extraction --
    pub marker: [String; 2],
    pub field_index: usize,

    // -- Histogram --
    /// Count-checked only; ordering is checked by the app layer against
    /// the histogram rules.
    pub bin_edges: Vec<f64>,
    pub bar_width: usize,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(constants::DEFAULT_INPUT_DIR),
            skip_leading: constants::DEFAULT_SKIP_LEADING,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            marker: [
                constants::MARKER_FIRST.to_string(),
                constants::MARKER_SECOND.to_string(),
            ],
            field_index: constants::DEFAULT_FIELD_INDEX,
            bin_edges: constants::DEFAULT_BIN_EDGES.to_vec(),
            bar_width: constants::DEFAULT_BAR_WIDTH,
            log_level: None,
        }
    }
}

/// Load and validate the config file at `config_path`, if there is one.
///
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match load_config_strict(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Load and validate a config file that must exist and parse.
///
/// Out-of-range values are still reported as warnings, not errors.
pub fn load_config_strict(config_path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    Ok(validate(raw))
}

/// Validate each field against named constants, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    // -- Input: directory --
    if let Some(dir) = raw.input.directory {
        if dir.trim().is_empty() {
            warnings.push(format!(
                "[input] directory is empty. Using default ({}).",
                constants::DEFAULT_INPUT_DIR
            ));
        } else {
            config.input_dir = PathBuf::from(dir);
        }
    }

    // -- Discovery --
    if let Some(skip) = raw.discovery.skip_leading {
        if skip <= constants::MAX_SKIP_LEADING {
            config.skip_leading = skip;
        } else {
            warnings.push(format!(
                "[discovery] skip_leading = {skip} is out of range (0-{}). Using default ({}).",
                constants::MAX_SKIP_LEADING,
                constants::DEFAULT_SKIP_LEADING,
            ));
        }
    }
    if let Some(patterns) = raw.discovery.include_patterns {
        config.include_patterns = patterns;
    }
    if let Some(patterns) = raw.discovery.exclude_patterns {
        config.exclude_patterns = patterns;
    }

    // -- Extract: marker --
    if let Some(marker) = raw.extract.marker {
        let well_formed = marker.len() == 2
            && marker
                .iter()
                .all(|t| !t.is_empty() && !t.chars().any(char::is_whitespace));
        if well_formed {
            config.marker = [marker[0].clone(), marker[1].clone()];
        } else {
            warnings.push(format!(
                "[extract] marker = {marker:?} must be exactly two tokens without spaces. \
                 Using default ([\"{}\", \"{}\"]).",
                constants::MARKER_FIRST,
                constants::MARKER_SECOND,
            ));
        }
    }

    // -- Extract: field_index --
    if let Some(index) = raw.extract.field_index {
        if index <= constants::MAX_FIELD_INDEX {
            config.field_index = index;
        } else {
            warnings.push(format!(
                "[extract] field_index = {index} is out of range (0-{}). Using default ({}).",
                constants::MAX_FIELD_INDEX,
                constants::DEFAULT_FIELD_INDEX,
            ));
        }
    }

    // -- Histogram: bin_edges --
    if let Some(edges) = raw.histogram.bin_edges {
        if (2..=constants::MAX_BIN_EDGES).contains(&edges.len()) {
            config.bin_edges = edges;
        } else {
            warnings.push(format!(
                "[histogram] bin_edges has {} edges, expected 2-{}. Using default edges.",
                edges.len(),
                constants::MAX_BIN_EDGES,
            ));
        }
    }

    // -- Histogram: bar_width --
    if let Some(width) = raw.histogram.bar_width {
        if (constants::MIN_BAR_WIDTH..=constants::MAX_BAR_WIDTH).contains(&width) {
            config.bar_width = width;
        } else {
            warnings.push(format!(
                "[histogram] bar_width = {width} is out of range ({}-{}). Using default ({}).",
                constants::MIN_BAR_WIDTH,
                constants::MAX_BAR_WIDTH,
                constants::DEFAULT_BAR_WIDTH,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
