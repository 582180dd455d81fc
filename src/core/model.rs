// TimeScan - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Grid configuration
// =============================================================================

/// The configuration grid walked by the scanner.
///
/// The Cartesian product is iterated language -> power flag -> size ->
/// thread count; that order determines output grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Language implementations, one log sub-directory each.
    pub languages: Vec<String>,

    /// Power flags ("0"/"1"), spliced verbatim into file names.
    pub power_flags: Vec<String>,

    /// Input sizes, spliced verbatim into file names and headers.
    pub sizes: Vec<String>,

    /// Thread counts (always positive).
    pub thread_counts: Vec<u32>,

    /// Directory containing `<language>/` sub-directories.
    pub base_dir: PathBuf,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            languages: to_strings(constants::DEFAULT_LANGUAGES),
            power_flags: to_strings(constants::DEFAULT_POWER_FLAGS),
            sizes: to_strings(constants::DEFAULT_SIZES),
            thread_counts: constants::DEFAULT_THREAD_COUNTS.to_vec(),
            base_dir: PathBuf::from(constants::DEFAULT_BASE_DIR),
        }
    }
}

impl GridConfig {
    /// Every combination in nested iteration order.
    pub fn combinations(&self) -> impl Iterator<Item = GridCombination<'_>> + '_ {
        self.languages.iter().flat_map(move |language| {
            self.power_flags.iter().flat_map(move |power_flag| {
                self.sizes.iter().flat_map(move |size| {
                    self.thread_counts
                        .iter()
                        .map(move |&threads| GridCombination {
                            language,
                            power_flag,
                            size,
                            threads,
                        })
                })
            })
        })
    }

    /// Number of log files the grid addresses.
    pub fn file_count(&self) -> usize {
        self.languages.len() * self.power_flags.len() * self.sizes.len() * self.thread_counts.len()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// =============================================================================
// Grid combination
// =============================================================================

/// One (language, power flag, size, thread count) tuple borrowed from a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCombination<'a> {
    pub language: &'a str,
    pub power_flag: &'a str,
    pub size: &'a str,
    pub threads: u32,
}

impl GridCombination<'_> {
    /// `thread_<threads>_<size>_<power>.log`
    pub fn file_name(&self) -> String {
        format!(
            "{}{}_{}_{}.{}",
            constants::LOG_FILE_PREFIX,
            self.threads,
            self.size,
            self.power_flag,
            constants::LOG_FILE_EXTENSION
        )
    }

    /// `<base_dir>/<language>/thread_<threads>_<size>_<power>.log`
    pub fn log_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.language).join(self.file_name())
    }
}

// =============================================================================
// Timing sample
// =============================================================================

/// One extracted value with the combination and line it came from.
///
/// Produced by `Scanner::collect` for the structured output formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingSample {
    pub language: String,
    pub power_flag: String,
    pub size: String,
    pub threads: u32,
    /// 1-based line number of the marker line in its log file.
    pub line: u64,
    /// Second-to-last token with its enclosing characters stripped.
    pub value: String,
}

impl TimingSample {
    pub fn new(combo: &GridCombination<'_>, line: u64, value: &str) -> Self {
        Self {
            language: combo.language.to_string(),
            power_flag: combo.power_flag.to_string(),
            size: combo.size.to_string(),
            threads: combo.threads,
            line,
            value: value.to_string(),
        }
    }
}

// =============================================================================
// Output format
// =============================================================================

/// How extracted values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Grouped comma-separated values with header lines.
    #[default]
    Text,
    /// One CSV record per sample.
    Csv,
    /// Pretty-printed JSON array of samples.
    Json,
}

impl OutputFormat {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Parse a case-insensitive format name.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
