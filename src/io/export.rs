//! CSV export for I-V curve samples.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::model::CurvePoint;

/// Column header for I-V curve CSV export.
const HEADER: &str = "voltage_v,current_a,power_w";

/// Exports an I-V curve to a CSV file at the given path.
///
/// Writes a header row followed by one data row per sample. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `curve` - Sampled curve points
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(curve: &[CurvePoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(curve, buf)
}

/// Writes an I-V curve as CSV to any writer.
///
/// # Arguments
///
/// * `curve` - Sampled curve points
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(curve: &[CurvePoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for point in curve {
        wtr.write_record(&[
            format!("{:.6}", point.voltage_v),
            format!("{:.6}", point.current_a),
            format!("{:.6}", point.power_w),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
