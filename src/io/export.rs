//! CSV export for analyzed series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::AnalyzedRow;

/// Column header for CSV export.
const HEADER: &str = "time,solar_kw,home_load_kw,battery_pct,net_load_kw,solar_utilization";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Exports an analyzed series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(rows: &[AnalyzedRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(rows, buf)
}

/// Writes an analyzed series as CSV to any writer.
///
/// Hours without solar generation leave the `solar_utilization` cell empty.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(rows: &[AnalyzedRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in rows {
        wtr.write_record(&[
            r.timestamp.format(TIME_FORMAT).to_string(),
            format!("{:.4}", r.solar_kw),
            format!("{:.4}", r.home_load_kw),
            format!("{:.4}", r.battery_pct),
            format!("{:.4}", r.net_load_kw),
            r.solar_utilization
                .map(|u| format!("{u:.4}"))
                .unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the first `n` rows as CSV, e.g. for a console preview.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_preview(rows: &[AnalyzedRow], n: usize, writer: impl Write) -> io::Result<()> {
    write_csv(&rows[..n.min(rows.len())], writer)
}
