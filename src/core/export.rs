// TimeScan - core/export.rs
//
// CSV and JSON rendering of collected timing samples.
// Core layer: writes to any Write trait object.

use crate::core::model::TimingSample;
use crate::util::constants::CSV_HEADER;
use crate::util::error::ExportError;
use std::io::Write;

/// Export samples to CSV format.
///
/// Writes: language, power_flag, size, threads, line, value
pub fn export_csv<W: Write>(samples: &[TimingSample], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|source| ExportError::Csv { source })?;

    let mut count = 0;
    for sample in samples {
        let threads = sample.threads.to_string();
        let line = sample.line.to_string();
        csv_writer
            .write_record([
                sample.language.as_str(),
                sample.power_flag.as_str(),
                sample.size.as_str(),
                threads.as_str(),
                line.as_str(),
                sample.value.as_str(),
            ])
            .map_err(|source| ExportError::Csv { source })?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|source| ExportError::Io { source })?;

    Ok(count)
}

/// Export samples to JSON format (array of objects).
pub fn export_json<W: Write>(
    samples: &[TimingSample],
    mut writer: W,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(&mut writer, samples)
        .map_err(|source| ExportError::Json { source })?;
    writeln!(writer).map_err(|source| ExportError::Io { source })?;
    Ok(samples.len())
}
