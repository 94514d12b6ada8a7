//! Derived columns: net load and direct solar utilization.

use tracing::debug;

use super::types::{AnalyzedRow, TimeSeriesRow};

/// Share of this hour's solar generation consumed by the home.
///
/// Returns `None` when there is no generation, never a numeric zero.
pub fn solar_utilization(solar_kw: f64, home_load_kw: f64) -> Option<f64> {
    if solar_kw <= 0.0 {
        return None;
    }
    Some(home_load_kw.min(solar_kw) / solar_kw)
}

/// Extends one row with its analysis columns.
pub fn analyze_row(row: &TimeSeriesRow) -> AnalyzedRow {
    AnalyzedRow {
        timestamp: row.timestamp,
        solar_kw: row.solar_kw,
        home_load_kw: row.home_load_kw,
        battery_pct: row.battery_pct,
        net_load_kw: row.home_load_kw - row.solar_kw,
        solar_utilization: solar_utilization(row.solar_kw, row.home_load_kw),
    }
}

/// Derives the analyzed view of `series`, preserving order and length.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hess_sim::sim::analysis::analyze;
/// use hess_sim::sim::types::TimeSeriesRow;
///
/// let timestamp = NaiveDate::from_ymd_opt(2024, 6, 21)
///     .and_then(|d| d.and_hms_opt(12, 0, 0))
///     .unwrap();
/// let rows = [TimeSeriesRow { timestamp, solar_kw: 4.0, home_load_kw: 3.0, battery_pct: 60.0 }];
/// let analyzed = analyze(&rows);
/// assert_eq!(analyzed[0].net_load_kw, -1.0);
/// assert_eq!(analyzed[0].solar_utilization, Some(0.75));
/// ```
pub fn analyze(series: &[TimeSeriesRow]) -> Vec<AnalyzedRow> {
    let analyzed: Vec<AnalyzedRow> = series.iter().map(analyze_row).collect();
    debug!(rows = analyzed.len(), "analyzed series");
    analyzed
}
