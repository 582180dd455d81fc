// TimeScan - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "TimeScan";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "TimeScan";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Default grid
// =============================================================================

/// Directory holding one sub-directory of logs per language.
pub const DEFAULT_BASE_DIR: &str = "reduction";

/// Language implementations the reduction benchmark was run for.
pub const DEFAULT_LANGUAGES: &[&str] = &["c++", "rust"];

/// Power flags: "0" = plain reduce, "1" = square-then-reduce.
pub const DEFAULT_POWER_FLAGS: &[&str] = &["0", "1"];

/// Input sizes (element counts), kept as strings because they are spliced
/// verbatim into file names and headers.
pub const DEFAULT_SIZES: &[&str] = &["500000000", "1000000000", "2000000000"];

/// Thread counts swept for each (language, power, size).
pub const DEFAULT_THREAD_COUNTS: &[u32] = &[1, 2, 4, 6, 8, 12, 16];

/// Hard upper bound on a configured thread count.
pub const MAX_THREAD_COUNT: u32 = 4_096;

// =============================================================================
// Extraction
// =============================================================================

/// Substring selecting the timing lines of interest.
pub const DEFAULT_MARKER: &str = "par";

/// Minimum whitespace-separated tokens a marker line must carry.
pub const MIN_TOKENS_PER_MATCH: usize = 2;

/// Prefix of every per-configuration log file name.
pub const LOG_FILE_PREFIX: &str = "thread_";

/// Extension of every per-configuration log file name.
pub const LOG_FILE_EXTENSION: &str = "log";

/// Pattern matching `thread_<threads>_<size>_<power>.log`, used by grid
/// discovery.
pub const LOG_FILE_NAME_PATTERN: &str = r"^thread_(\d+)_([^_]+)_([^_]+)\.log$";

/// Discovery descends at most `<base>/<language>/<file>`.
pub const DISCOVERY_MAX_DEPTH: usize = 2;

// =============================================================================
// Output
// =============================================================================

/// Separator written after every extracted value in text output.
pub const VALUE_SEPARATOR: &str = ",";

/// CSV header row for structured output.
pub const CSV_HEADER: [&str; 6] = ["language", "power_flag", "size", "threads", "line", "value"];

// =============================================================================
// Configuration & logging
// =============================================================================

/// Default tracing filter when neither RUST_LOG, --debug nor config set one.
/// Kept at "warn" because stdout carries data and stderr should stay quiet.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Maximum size of config.toml accepted before parsing.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024; // 1 MiB

/// Accepted `[logging] level` values.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
