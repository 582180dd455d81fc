// TimeScan - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.
//
// Precedence: CLI flags > config.toml > built-in defaults.

use crate::core::model::{GridConfig, OutputFormat};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for TimeScan configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/timescan/ or %APPDATA%\TimeScan\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    /// Runs before logging is initialised, so it emits no events.
    pub fn resolve() -> Self {
        match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => Self {
                config_dir: proj_dirs.config_dir().to_path_buf(),
            },
            None => Self {
                config_dir: PathBuf::from("."),
            },
        }
    }

    /// Default location of config.toml.
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
    /// `[grid]` section.
    pub grid: GridSection,
    /// `[extract]` section.
    pub extract: ExtractSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[grid]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct GridSection {
    pub languages: Option<Vec<String>>,
    pub power_flags: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub thread_counts: Option<Vec<i64>>,
    pub base_dir: Option<String>,
}

/// `[extract]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Marker substring selecting timing lines.
    pub marker: Option<String>,
    /// Output format: "text", "csv" or "json".
    pub format: Option<String>,
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

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub marker: String,
    pub format: OutputFormat,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            marker: constants::DEFAULT_MARKER.to_string(),
            format: OutputFormat::default(),
            log_level: None,
        }
    }
}

/// Command-line values that replace configured ones when present.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_dir: Option<PathBuf>,
    pub languages: Vec<String>,
    pub power_flags: Vec<String>,
    pub sizes: Vec<String>,
    pub thread_counts: Vec<u32>,
    pub marker: Option<String>,
    pub format: Option<OutputFormat>,
}

impl AppConfig {
    /// Apply CLI overrides. A bad CLI value is a hard error, unlike a bad
    /// config.toml value.
    pub fn apply_overrides(&mut self, o: Overrides) -> Result<(), ConfigError> {
        if let Some(base) = o.base_dir {
            self.grid.base_dir = base;
        }
        if !o.languages.is_empty() {
            self.grid.languages = validate_names("language", o.languages)?;
        }
        if !o.power_flags.is_empty() {
            self.grid.power_flags = validate_names("power", o.power_flags)?;
        }
        if !o.sizes.is_empty() {
            self.grid.sizes = validate_names("size", o.sizes)?;
        }
        if !o.thread_counts.is_empty() {
            let counts = o.thread_counts.into_iter().map(i64::from).collect();
            self.grid.thread_counts = validate_thread_counts(counts)?;
        }
        if let Some(marker) = o.marker {
            self.marker = validate_marker(marker)?;
        }
        if let Some(format) = o.format {
            self.format = format;
        }
        Ok(())
    }
}

// =============================================================================
// Field validators
// =============================================================================

/// Grid names are spliced into paths, so they must be non-empty single
/// path components.
pub fn validate_names(field: &str, values: Vec<String>) -> Result<Vec<String>, ConfigError> {
    for v in &values {
        if v.is_empty() || v.contains(['/', '\\']) || v == "." || v == ".." {
            return Err(ConfigError::ValueOutOfRange {
                field: field.to_string(),
                value: v.clone(),
                expected: "a non-empty name without path separators".to_string(),
            });
        }
    }
    Ok(values)
}

/// Thread counts must be in `1..=MAX_THREAD_COUNT`.
pub fn validate_thread_counts(values: Vec<i64>) -> Result<Vec<u32>, ConfigError> {
    values
        .into_iter()
        .map(|v| {
            u32::try_from(v)
                .ok()
                .filter(|n| (1..=constants::MAX_THREAD_COUNT).contains(n))
                .ok_or_else(|| ConfigError::ValueOutOfRange {
                    field: "thread_counts".to_string(),
                    value: v.to_string(),
                    expected: format!("1-{}", constants::MAX_THREAD_COUNT),
                })
        })
        .collect()
}

/// An empty marker would match every line.
pub fn validate_marker(marker: String) -> Result<String, ConfigError> {
    if marker.is_empty() {
        return Err(ConfigError::ValueOutOfRange {
            field: "marker".to_string(),
            value: marker,
            expected: "a non-empty substring".to_string(),
        });
    }
    Ok(marker)
}

// =============================================================================
// config.toml loading
// =============================================================================

/// Load and validate config.toml at `path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. Invalid individual values fall back to their defaults.
///
/// A missing file yields defaults when `required` is false (the implicit
/// platform location) and an error when true (an explicit `--config`).
/// An unreadable or unparseable file is always an error.
///
/// Called before the subscriber exists: the outcome is reported through the
/// return value only, and the caller logs it once logging is up.
pub fn load_config(path: &Path, required: bool) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let mut warnings: Vec<String> = Vec::new();

    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok((AppConfig::default(), warnings));
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if meta.len() > constants::MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            max_size: constants::MAX_CONFIG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;

    let config = validate_raw(raw, &mut warnings);
    Ok((config, warnings))
}

/// Validate each field of `raw`, accumulating a warning per rejected value.
fn validate_raw(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Grid: name lists --
    apply_names(
        "languages",
        raw.grid.languages,
        &mut config.grid.languages,
        warnings,
    );
    apply_names(
        "power_flags",
        raw.grid.power_flags,
        &mut config.grid.power_flags,
        warnings,
    );
    apply_names("sizes", raw.grid.sizes, &mut config.grid.sizes, warnings);

    // -- Grid: thread_counts --
    if let Some(counts) = raw.grid.thread_counts {
        match validate_thread_counts(counts) {
            Ok(v) => config.grid.thread_counts = v,
            Err(e) => warnings.push(format!("[grid] thread_counts: {e}. Using default.")),
        }
    }

    // -- Grid: base_dir --
    if let Some(base) = raw.grid.base_dir {
        if base.is_empty() {
            warnings.push(format!(
                "[grid] base_dir is empty. Using default ({}).",
                constants::DEFAULT_BASE_DIR
            ));
        } else {
            config.grid.base_dir = PathBuf::from(base);
        }
    }

    // -- Extract: marker --
    if let Some(marker) = raw.extract.marker {
        match validate_marker(marker) {
            Ok(m) => config.marker = m,
            Err(e) => warnings.push(format!(
                "[extract] {e}. Using default (\"{}\").",
                constants::DEFAULT_MARKER
            )),
        }
    }

    // -- Extract: format --
    if let Some(ref format) = raw.extract.format {
        match OutputFormat::from_str_loose(format) {
            Some(f) => config.format = f,
            None => warnings.push(format!(
                "[extract] format = \"{format}\" is not recognised. \
                 Expected \"text\", \"csv\" or \"json\". Using default (text).",
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL
            ));
        }
    }

    config
}

/// Replace `slot` with `value` if it validates; otherwise keep the default
/// already in `slot` and record a warning.
fn apply_names(
    field: &str,
    value: Option<Vec<String>>,
    slot: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let Some(values) = value else {
        return;
    };
    match validate_names(field, values) {
        Ok(v) => *slot = v,
        Err(e) => warnings.push(format!(
            "[grid] {field}: {e}. Using default ({}).",
            slot.join(", ")
        )),
    }
}
