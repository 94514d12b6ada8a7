//! Generator → Analyzer → Reporter wiring.

use crate::error::HessError;
use crate::reporting::SummaryReport;
use crate::sim::analysis::analyze;
use crate::sim::clock::{Clock, SystemClock};
use crate::sim::generator::generate;
use crate::sim::types::{AnalyzedRow, GenerationParams};

/// Output of one full pipeline run.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Analyzed hourly series, oldest first.
    pub series: Vec<AnalyzedRow>,
    /// Aggregate statistics over `series`.
    pub report: SummaryReport,
}

/// Generates and analyzes a series anchored at the current wall-clock time.
///
/// # Errors
///
/// Returns [`HessError::InvalidParameter`] for a zero horizon or a rejected
/// battery level.
pub fn simulate(
    battery_level: f64,
    hours: usize,
    seed: u64,
) -> Result<Vec<AnalyzedRow>, HessError> {
    let params = GenerationParams::new(battery_level, hours, seed);
    simulate_with_clock(&params, &SystemClock)
}

/// Generates and analyzes a series anchored at `clock.now()`.
///
/// # Errors
///
/// Same conditions as [`crate::sim::generator::generate`].
pub fn simulate_with_clock(
    params: &GenerationParams,
    clock: &impl Clock,
) -> Result<Vec<AnalyzedRow>, HessError> {
    let series = generate(params, clock)?;
    Ok(analyze(&series))
}

/// Runs generation, analysis and summarization in one pass.
///
/// # Errors
///
/// Propagates generator errors; [`HessError::EmptySeries`] cannot occur
/// because the generator never yields an empty series.
pub fn run_pipeline(
    params: &GenerationParams,
    clock: &impl Clock,
) -> Result<SimulationResult, HessError> {
    let series = simulate_with_clock(params, clock)?;
    let report = SummaryReport::from_series(&series)?;
    Ok(SimulationResult { series, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 6, 21)
                .and_then(|d| d.and_hms_opt(20, 0, 0))
                .unwrap(),
        )
    }

    #[test]
    fn default_pipeline_covers_a_day() {
        let result = run_pipeline(&GenerationParams::default(), &clock()).unwrap();
        assert_eq!(result.series.len(), 24);
        assert_eq!(result.report.total_hours, 24);
        assert_eq!(result.report.last_hour, result.series[23]);
    }

    #[test]
    fn simulate_uses_wall_clock_but_keeps_shape() {
        let a = simulate(65.0, 24, 42).unwrap();
        let b = simulate(65.0, 24, 42).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.solar_kw, y.solar_kw);
            assert_eq!(x.home_load_kw, y.home_load_kw);
            assert_eq!(x.battery_pct, y.battery_pct);
        }
    }

    #[test]
    fn zero_hours_surfaces_generator_error() {
        let err = run_pipeline(&GenerationParams::new(65.0, 0, 42), &clock()).unwrap_err();
        assert!(matches!(err, HessError::InvalidParameter { .. }));
    }
}
