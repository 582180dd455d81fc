// TimeScan - app/scan.rs
//
// The log scanner. Walks the configuration grid in nested order, reads one
// log file per combination and extracts the timing values from marker lines.
//
// Fail-fast: the first missing file or malformed marker line aborts the
// whole run. Text output is streamed, so anything already written for
// earlier combinations stays in the sink.

use crate::core::extract;
use crate::core::model::{GridCombination, GridConfig, TimingSample};
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{Result, ScanError, TimeScanError};
use std::io::Write;
use std::path::PathBuf;

/// Scans a grid of benchmark logs for one marker.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    grid: &'a GridConfig,
    marker: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(grid: &'a GridConfig, marker: &'a str) -> Self {
        Self { grid, marker }
    }

    /// Read the whole log for `combo`. The handle is closed before returning.
    fn read_log(
        &self,
        combo: &GridCombination<'_>,
    ) -> std::result::Result<(PathBuf, String), ScanError> {
        let path = combo.log_path(&self.grid.base_dir);
        let content = fs::read_file(&path).map_err(|source| ScanError::FileAccess {
            path: path.clone(),
            source,
        })?;
        Ok((path, content))
    }

    /// Read the log for `combo` and extract all marker values in line order.
    pub fn scan_file(
        &self,
        combo: &GridCombination<'_>,
    ) -> std::result::Result<Vec<(u64, String)>, ScanError> {
        let (path, content) = self.read_log(combo)?;

        let values = extract::extract_values(&content, self.marker)
            .map_err(|(line_number, e)| ScanError::from_extract(path.clone(), line_number, e))?;

        tracing::debug!(
            path = %path.display(),
            values = values.len(),
            "Scanned log file"
        );

        Ok(values
            .into_iter()
            .map(|(line, value)| (line, value.to_string()))
            .collect())
    }

    /// Stream grouped text output to `out`.
    ///
    /// Layout per language: the language name, then for every (power, size)
    /// the size name, one `value,` per extracted value across all thread
    /// counts, and a blank line. One more blank line closes the language.
    ///
    /// Each value is written as its line is processed, and `out` is flushed
    /// even when the scan aborts.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        tracing::info!(
            files = self.grid.file_count(),
            marker = self.marker,
            base = %self.grid.base_dir.display(),
            "Scan started"
        );

        let result = self.write_text(out);
        let flushed = out.flush();
        result?;
        flushed.map_err(sink_err)?;

        tracing::info!("Scan completed");
        Ok(())
    }

    fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        for language in &self.grid.languages {
            writeln!(out, "{language}").map_err(sink_err)?;
            for power_flag in &self.grid.power_flags {
                for size in &self.grid.sizes {
                    writeln!(out, "{size}").map_err(sink_err)?;
                    for &threads in &self.grid.thread_counts {
                        let combo = GridCombination {
                            language,
                            power_flag,
                            size,
                            threads,
                        };
                        self.write_file_values(&combo, out)?;
                    }
                    // Ends the value line, then a blank separator line.
                    write!(out, "\n\n").map_err(sink_err)?;
                }
            }
            writeln!(out).map_err(sink_err)?;
        }
        Ok(())
    }

    /// Write `value,` for each marker line of one log, stopping at the first
    /// bad line after everything before it has been written.
    fn write_file_values<W: Write>(
        &self,
        combo: &GridCombination<'_>,
        out: &mut W,
    ) -> Result<()> {
        let (path, content) = self.read_log(combo)?;
        let mut count = 0usize;
        for (idx, line) in extract::log_lines(&content).enumerate() {
            let line_number = idx as u64 + 1;
            match extract::extract_value(line, self.marker) {
                Ok(Some(value)) => {
                    write!(out, "{value}{}", constants::VALUE_SEPARATOR).map_err(sink_err)?;
                    count += 1;
                }
                Ok(None) => {}
                Err(e) => return Err(ScanError::from_extract(path, line_number, e).into()),
            }
        }
        tracing::debug!(path = %path.display(), values = count, "Scanned log file");
        Ok(())
    }

    /// Collect every extracted value as a `TimingSample`, in grid order.
    pub fn collect(&self) -> std::result::Result<Vec<TimingSample>, ScanError> {
        let mut samples = Vec::new();
        for combo in self.grid.combinations() {
            for (line, value) in self.scan_file(&combo)? {
                samples.push(TimingSample::new(&combo, line, &value));
            }
        }
        tracing::info!(samples = samples.len(), "Samples collected");
        Ok(samples)
    }
}

fn sink_err(source: std::io::Error) -> TimeScanError {
    TimeScanError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write",
        source,
    }
}
