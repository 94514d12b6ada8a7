//! Daily summary statistics and their text rendering.

use std::fmt;

use crate::error::HessError;
use crate::sim::types::AnalyzedRow;

const BANNER: &str = "================ HESS Daily Summary ================";
const FOOTER: &str = "====================================================";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Aggregate statistics over an analyzed series.
///
/// Computed post-hoc from `&[AnalyzedRow]`; the last-hour snapshot is a
/// verbatim copy of the row with the latest timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    /// Mean solar generation (kW).
    pub avg_solar_kw: f64,
    /// Mean home load (kW).
    pub avg_home_load_kw: f64,
    /// Mean battery state of charge (%).
    pub avg_battery_pct: f64,
    /// Mean net load (kW).
    pub avg_net_load_kw: f64,
    /// Rows with negative net load.
    pub surplus_hours: usize,
    /// Rows with positive net load.
    pub deficit_hours: usize,
    /// Number of rows summarized.
    pub total_hours: usize,
    /// Mean utilization over rows with generation; `None` if there are none.
    pub avg_solar_utilization: Option<f64>,
    /// Row with the maximum timestamp.
    pub last_hour: AnalyzedRow,
}

impl SummaryReport {
    /// Computes the summary of `series`.
    ///
    /// Rows without a defined solar utilization are left out of its mean
    /// rather than counted as zero. Rows with zero net load count as neither
    /// surplus nor deficit.
    ///
    /// # Errors
    ///
    /// Returns [`HessError::EmptySeries`] if `series` has no rows.
    pub fn from_series(series: &[AnalyzedRow]) -> Result<Self, HessError> {
        let last_hour = series
            .iter()
            .max_by_key(|r| r.timestamp)
            .cloned()
            .ok_or(HessError::EmptySeries)?;

        let n = series.len() as f64;
        let mut solar_sum = 0.0_f64;
        let mut load_sum = 0.0_f64;
        let mut battery_sum = 0.0_f64;
        let mut net_sum = 0.0_f64;
        let mut surplus = 0_usize;
        let mut deficit = 0_usize;
        let mut util_sum = 0.0_f64;
        let mut util_count = 0_usize;

        for r in series {
            solar_sum += r.solar_kw;
            load_sum += r.home_load_kw;
            battery_sum += r.battery_pct;
            net_sum += r.net_load_kw;

            if r.net_load_kw < 0.0 {
                surplus += 1;
            } else if r.net_load_kw > 0.0 {
                deficit += 1;
            }

            if let Some(u) = r.solar_utilization {
                util_sum += u;
                util_count += 1;
            }
        }

        let avg_solar_utilization = (util_count > 0).then(|| util_sum / util_count as f64);

        Ok(Self {
            avg_solar_kw: solar_sum / n,
            avg_home_load_kw: load_sum / n,
            avg_battery_pct: battery_sum / n,
            avg_net_load_kw: net_sum / n,
            surplus_hours: surplus,
            deficit_hours: deficit,
            total_hours: series.len(),
            avg_solar_utilization,
            last_hour,
        })
    }
}

/// Computes the summary of an analyzed series.
///
/// # Errors
///
/// Returns [`HessError::EmptySeries`] if `series` has no rows.
pub fn summarize(series: &[AnalyzedRow]) -> Result<SummaryReport, HessError> {
    SummaryReport::from_series(series)
}

/// Renders `report` as the multi-line daily summary.
pub fn format_report(report: &SummaryReport) -> String {
    report.to_string()
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f, "Average Solar Generation : {:.2} kW", self.avg_solar_kw)?;
        writeln!(f, "Average Home Load        : {:.2} kW", self.avg_home_load_kw)?;
        writeln!(f, "Average Battery Level    : {:.1} %", self.avg_battery_pct)?;
        writeln!(f, "Average Net Load         : {:.2} kW", self.avg_net_load_kw)?;
        writeln!(f)?;
        writeln!(
            f,
            "Hours with solar surplus (Net Load < 0): {} / {}",
            self.surplus_hours, self.total_hours
        )?;
        writeln!(
            f,
            "Hours with energy deficit (Net Load > 0): {} / {}",
            self.deficit_hours, self.total_hours
        )?;
        writeln!(f)?;
        match self.avg_solar_utilization {
            Some(u) => writeln!(
                f,
                "Average Solar Utilization (when solar > 0): {:.1} %",
                u * 100.0
            )?,
            None => writeln!(
                f,
                "Average Solar Utilization (when solar > 0): N/A (no solar generation in series)"
            )?,
        }
        writeln!(f)?;

        let last = &self.last_hour;
        writeln!(f, "----- Last Hour Snapshot -----")?;
        writeln!(f, "Time               : {}", last.timestamp.format(TIME_FORMAT))?;
        writeln!(f, "Solar (kW)         : {:.2}", last.solar_kw)?;
        writeln!(f, "Home Load (kW)     : {:.2}", last.home_load_kw)?;
        writeln!(f, "Net Load (kW)      : {:.2}", last.net_load_kw)?;
        writeln!(f, "Battery Level (%)  : {:.1}", last.battery_pct)?;
        match last.solar_utilization {
            Some(u) => writeln!(f, "Solar Utilization  : {:.1} %", u * 100.0)?,
            None => writeln!(f, "Solar Utilization  : N/A (no solar in this hour)")?,
        }
        write!(f, "{FOOTER}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 21)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn make_row(hour: i64, solar_kw: f64, home_load_kw: f64, battery_pct: f64) -> AnalyzedRow {
        AnalyzedRow {
            timestamp: base_time() + Duration::hours(hour),
            solar_kw,
            home_load_kw,
            battery_pct,
            net_load_kw: home_load_kw - solar_kw,
            solar_utilization: (solar_kw > 0.0).then(|| home_load_kw.min(solar_kw) / solar_kw),
        }
    }

    #[test]
    fn means_and_counts() {
        // net loads: [3.0, -2.0, 0.0, 1.0]
        let rows = vec![
            make_row(0, 0.0, 3.0, 50.0),
            make_row(1, 4.0, 2.0, 52.0),
            make_row(2, 2.0, 2.0, 54.0),
            make_row(3, 1.0, 2.0, 56.0),
        ];
        let report = SummaryReport::from_series(&rows).unwrap();
        assert!((report.avg_solar_kw - 1.75).abs() < 1e-12);
        assert!((report.avg_home_load_kw - 2.25).abs() < 1e-12);
        assert!((report.avg_battery_pct - 53.0).abs() < 1e-12);
        assert!((report.avg_net_load_kw - 0.5).abs() < 1e-12);
        assert_eq!(report.surplus_hours, 1);
        assert_eq!(report.deficit_hours, 2);
        assert_eq!(report.total_hours, 4);
    }

    #[test]
    fn utilization_mean_skips_undefined_rows() {
        // defined utilizations: 0.5 and 1.0; the zero-solar row is ignored
        let rows = vec![
            make_row(0, 0.0, 3.0, 50.0),
            make_row(1, 4.0, 2.0, 50.0),
            make_row(2, 1.0, 2.0, 50.0),
        ];
        let report = summarize(&rows).unwrap();
        assert_eq!(report.avg_solar_utilization, Some(0.75));
    }

    #[test]
    fn utilization_none_without_any_solar() {
        let rows = vec![make_row(0, 0.0, 3.0, 50.0), make_row(1, 0.0, 2.0, 50.0)];
        let report = summarize(&rows).unwrap();
        assert_eq!(report.avg_solar_utilization, None);
        let text = format_report(&report);
        assert!(text.contains("Average Solar Utilization (when solar > 0): N/A"));
        assert!(text.contains("Solar Utilization  : N/A (no solar in this hour)"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn last_hour_is_latest_timestamp() {
        let rows = vec![
            make_row(5, 1.0, 2.0, 50.0),
            make_row(7, 3.0, 4.0, 60.0),
            make_row(6, 2.0, 3.0, 55.0),
        ];
        let report = summarize(&rows).unwrap();
        assert_eq!(report.last_hour, rows[1]);
    }

    #[test]
    fn empty_series_fails() {
        assert_eq!(summarize(&[]), Err(HessError::EmptySeries));
    }

    #[test]
    fn rendered_sections_in_order() {
        let rows = vec![make_row(0, 0.0, 3.0, 55.0), make_row(1, 4.0, 2.0, 65.0)];
        let text = format_report(&summarize(&rows).unwrap());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[1], "Average Solar Generation : 2.00 kW");
        assert_eq!(lines[2], "Average Home Load        : 2.50 kW");
        assert_eq!(lines[3], "Average Battery Level    : 60.0 %");
        assert_eq!(lines[4], "Average Net Load         : 0.50 kW");
        assert_eq!(lines[6], "Hours with solar surplus (Net Load < 0): 1 / 2");
        assert_eq!(lines[7], "Hours with energy deficit (Net Load > 0): 1 / 2");
        assert_eq!(lines[9], "Average Solar Utilization (when solar > 0): 50.0 %");
        assert_eq!(lines[11], "----- Last Hour Snapshot -----");
        assert_eq!(lines[12], "Time               : 2024-06-21 01:00:00");
        assert_eq!(lines[13], "Solar (kW)         : 4.00");
        assert_eq!(lines[14], "Home Load (kW)     : 2.00");
        assert_eq!(lines[15], "Net Load (kW)      : -2.00");
        assert_eq!(lines[16], "Battery Level (%)  : 65.0");
        assert_eq!(lines[17], "Solar Utilization  : 50.0 %");
        assert_eq!(lines.last().copied(), Some(FOOTER));
    }
}
