// TimeScan - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every scan error aborts the whole run; nothing here is retried.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all TimeScan operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum TimeScanError {
    /// Reading or extracting from a log file failed.
    Scan(ScanError),

    /// Grid discovery failed.
    Discovery(DiscoveryError),

    /// Structured export failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context (e.g. writing to stdout).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for TimeScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(e) => write!(f, "Scan error: {e}"),
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
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

impl std::error::Error for TimeScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scan(e) => Some(e),
            Self::Discovery(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction errors (path-free, produced by core::extract)
// ---------------------------------------------------------------------------

/// Failure extracting the positional token from a single marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The line matched the marker but has too few whitespace tokens.
    MalformedLine { line: String, tokens: usize },

    /// The positional token is too short to strip its delimiters.
    OutOfRange { token: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { line, tokens } => write!(
                f,
                "marker line has {tokens} token(s), at least 2 required: '{line}'"
            ),
            Self::OutOfRange { token } => write!(
                f,
                "token '{token}' is too short to strip its enclosing characters"
            ),
        }
    }
}

impl std::error::Error for ExtractError {}

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

/// Errors raised while walking the grid and reading log files.
#[derive(Debug)]
pub enum ScanError {
    /// The log file for a grid combination is absent or unreadable.
    FileAccess { path: PathBuf, source: io::Error },

    /// A marker line has fewer than two whitespace-separated tokens.
    MalformedLine {
        path: PathBuf,
        line_number: u64,
        line: String,
    },

    /// The positional token has fewer than two characters to strip.
    OutOfRange {
        path: PathBuf,
        line_number: u64,
        token: String,
    },
}

impl ScanError {
    /// Attach file context to a path-free extraction failure.
    pub fn from_extract(path: PathBuf, line_number: u64, err: ExtractError) -> Self {
        match err {
            ExtractError::MalformedLine { line, .. } => Self::MalformedLine {
                path,
                line_number,
                line,
            },
            ExtractError::OutOfRange { token } => Self::OutOfRange {
                path,
                line_number,
                token,
            },
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileAccess { path, source } => {
                write!(f, "cannot read log file '{}': {source}", path.display())
            }
            Self::MalformedLine {
                path,
                line_number,
                line,
            } => write!(
                f,
                "'{}' line {line_number}: marker line has fewer than 2 tokens: '{line}'",
                path.display()
            ),
            Self::OutOfRange {
                path,
                line_number,
                token,
            } => write!(
                f,
                "'{}' line {line_number}: token '{token}' is too short to strip",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileAccess { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ScanError> for TimeScanError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to inferring a grid from a log tree.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The base directory does not exist or is not accessible.
    RootNotFound { path: PathBuf },

    /// The base path is not a directory.
    NotADirectory { path: PathBuf },

    /// No `thread_<N>_<size>_<power>.log` file was found under the base.
    NoLogFiles { path: PathBuf },

    /// The file-name pattern failed to compile.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// Walkdir traversal error.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Base directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Base path '{}' is not a directory", path.display())
            }
            Self::NoLogFiles { path } => write!(
                f,
                "No thread_<N>_<size>_<power>.log files found under '{}'",
                path.display()
            ),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid file-name pattern '{pattern}': {source}")
            }
            Self::Traversal { path, source } => {
                write!(f, "Error traversing '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for TimeScanError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to CSV/JSON output.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error flushing the output sink.
    Io { source: io::Error },

    /// CSV serialisation error.
    Csv { source: csv::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { source } => write!(f, "Export I/O error: {source}"),
            Self::Csv { source } => write!(f, "CSV export error: {source}"),
            Self::Json { source } => write!(f, "JSON export error: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::Csv { source } => Some(source),
            Self::Json { source } => Some(source),
        }
    }
}

impl From<ExportError> for TimeScanError {
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

    /// Config file exceeds the maximum accepted size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A config or CLI value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
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
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Config '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
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
            _ => None,
        }
    }
}

impl From<ConfigError> for TimeScanError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for TimeScan results.
pub type Result<T> = std::result::Result<T, TimeScanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_scan_error_keeps_io_source() {
        let err = TimeScanError::from(ScanError::FileAccess {
            path: PathBuf::from("reduction/rust/thread_1_5_0.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        });
        let msg = err.to_string();
        assert!(msg.contains("thread_1_5_0.log"), "got: {msg}");
        assert!(err.source().and_then(|s| s.source()).is_some());
    }

    #[test]
    fn test_from_extract_carries_location() {
        let err = ScanError::from_extract(
            PathBuf::from("a.log"),
            7,
            ExtractError::OutOfRange {
                token: "x".to_string(),
            },
        );
        assert!(matches!(
            err,
            ScanError::OutOfRange { line_number: 7, ref token, .. } if token == "x"
        ));
        assert!(err.to_string().contains("line 7"));
    }
}
