//! Synthetic hourly series: solar curve, random home load, battery ramp.

use std::f64::consts::PI;

use chrono::{Duration, NaiveDateTime};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, warn};

use super::clock::Clock;
use super::types::{BatteryRangePolicy, GenerationParams, TimeSeriesRow};
use crate::error::HessError;

/// Peak of the half-sine solar curve (kW).
pub const SOLAR_PEAK_KW: f64 = 8.0;
/// Lower bound of the uniform home-load draw (kW, inclusive).
pub const HOME_LOAD_MIN_KW: f64 = 2.0;
/// Upper bound of the uniform home-load draw (kW, exclusive).
pub const HOME_LOAD_MAX_KW: f64 = 5.0;
/// Span of the battery ramp ending at the requested level (percentage points).
pub const BATTERY_RAMP_SPAN_PCT: f64 = 10.0;

/// Generates a series seeded from `params.seed`.
///
/// The last row is stamped with `clock.now()` and earlier rows follow at
/// one-hour steps backwards. Identical parameters and clock yield identical
/// rows.
///
/// # Errors
///
/// Returns [`HessError::InvalidParameter`] if `hours` is zero, if the battery
/// level is not finite or violates a rejecting policy, or if the timestamps
/// would leave the representable date range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hess_sim::sim::clock::FixedClock;
/// use hess_sim::sim::generator::generate;
/// use hess_sim::sim::types::GenerationParams;
///
/// let anchor = NaiveDate::from_ymd_opt(2024, 6, 21)
///     .and_then(|d| d.and_hms_opt(23, 0, 0))
///     .unwrap();
/// let rows = generate(&GenerationParams::default(), &FixedClock::new(anchor)).unwrap();
/// assert_eq!(rows.len(), 24);
/// assert_eq!(rows[23].timestamp, anchor);
/// ```
pub fn generate(
    params: &GenerationParams,
    clock: &impl Clock,
) -> Result<Vec<TimeSeriesRow>, HessError> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    generate_with_rng(params, &mut rng, clock)
}

/// Generates a series drawing home load from a caller-owned RNG.
///
/// `params.seed` is ignored; all randomness comes from `rng`.
///
/// # Errors
///
/// Same conditions as [`generate`].
pub fn generate_with_rng<R: Rng>(
    params: &GenerationParams,
    rng: &mut R,
    clock: &impl Clock,
) -> Result<Vec<TimeSeriesRow>, HessError> {
    let hours = params.hours;
    if hours == 0 {
        return Err(HessError::invalid("hours", "must be > 0"));
    }
    check_battery_level(params.battery_level, params.battery_policy)?;

    let timestamps = hourly_timestamps(clock.now(), hours)?;
    let solar = solar_curve(hours);
    let battery = battery_ramp(params.battery_level, hours, params.battery_policy);

    let rows: Vec<TimeSeriesRow> = timestamps
        .into_iter()
        .zip(solar)
        .zip(battery)
        .map(|((timestamp, solar_kw), battery_pct)| TimeSeriesRow {
            timestamp,
            solar_kw,
            home_load_kw: rng.random_range(HOME_LOAD_MIN_KW..HOME_LOAD_MAX_KW),
            battery_pct,
        })
        .collect();

    debug!(
        battery_level = params.battery_level,
        hours,
        seed = params.seed,
        policy = %params.battery_policy,
        rows = rows.len(),
        "generated series"
    );
    Ok(rows)
}

fn check_battery_level(level: f64, policy: BatteryRangePolicy) -> Result<(), HessError> {
    if !level.is_finite() {
        return Err(HessError::invalid(
            "battery_level",
            format!("must be finite, got {level}"),
        ));
    }
    let in_range = (0.0..=100.0).contains(&level);
    match policy {
        BatteryRangePolicy::Reject if !in_range => Err(HessError::invalid(
            "battery_level",
            format!("must be in [0, 100], got {level}"),
        )),
        BatteryRangePolicy::Permissive
            if !in_range || level - BATTERY_RAMP_SPAN_PCT < 0.0 =>
        {
            warn!(
                battery_level = level,
                "battery ramp leaves [0, 100]; values passed through unchanged"
            );
            Ok(())
        }
        _ => Ok(()),
    }
}

/// `hours` instants one hour apart, the last one equal to `end`.
fn hourly_timestamps(end: NaiveDateTime, hours: usize) -> Result<Vec<NaiveDateTime>, HessError> {
    (0..hours)
        .map(|i| {
            let back = i64::try_from(hours - 1 - i).unwrap_or(i64::MAX);
            Duration::try_hours(back)
                .and_then(|d| end.checked_sub_signed(d))
                .ok_or_else(|| {
                    HessError::invalid("hours", format!("{hours} hours before {end} is out of range"))
                })
        })
        .collect()
}

/// Half-sine daylight profile over `[0, π]`, clamped at zero.
fn solar_curve(hours: usize) -> Vec<f64> {
    linspace(0.0, PI, hours)
        .into_iter()
        .map(|x| (x.sin() * SOLAR_PEAK_KW).max(0.0))
        .collect()
}

fn battery_ramp(level: f64, hours: usize, policy: BatteryRangePolicy) -> Vec<f64> {
    let ramp = linspace(level - BATTERY_RAMP_SPAN_PCT, level, hours);
    match policy {
        BatteryRangePolicy::Clamp => ramp.into_iter().map(|v| v.clamp(0.0, 100.0)).collect(),
        _ => ramp,
    }
}

/// `n` evenly spaced samples from `start` to `stop` inclusive.
///
/// A single sample is `start`; with two or more the last sample is exactly
/// `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 6, 21)
                .and_then(|d| d.and_hms_opt(18, 15, 0))
                .unwrap(),
        )
    }

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(55.0, 65.0, 24);
        assert_eq!(v.len(), 24);
        assert_eq!(v[0], 55.0);
        assert_eq!(v[23], 65.0);
    }

    #[test]
    fn test_linspace_single_and_empty() {
        assert_eq!(linspace(0.0, PI, 1), vec![0.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_zero_hours_rejected() {
        let params = GenerationParams::new(65.0, 0, 42);
        let err = generate(&params, &clock()).unwrap_err();
        assert!(matches!(err, HessError::InvalidParameter { name: "hours", .. }));
    }

    #[test]
    fn test_row_count_and_anchor() {
        let c = clock();
        let rows = generate(&GenerationParams::new(65.0, 12, 1), &c).unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows.last().map(|r| r.timestamp), Some(c.now()));
    }

    #[test]
    fn test_hourly_spacing() {
        let rows = generate(&GenerationParams::default(), &clock()).unwrap();
        for pair in rows.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn test_solar_shape() {
        let rows = generate(&GenerationParams::new(65.0, 25, 0), &clock()).unwrap();
        assert_eq!(rows[0].solar_kw, 0.0);
        // midpoint of 25 samples sits at π/2
        assert!((rows[12].solar_kw - SOLAR_PEAK_KW).abs() < 1e-12);
        assert!(rows[24].solar_kw.abs() < 1e-12);
        assert!(rows.iter().all(|r| r.solar_kw >= 0.0));
    }

    #[test]
    fn test_home_load_in_range() {
        let rows = generate(&GenerationParams::new(65.0, 200, 9), &clock()).unwrap();
        for r in &rows {
            assert!(r.home_load_kw >= HOME_LOAD_MIN_KW && r.home_load_kw < HOME_LOAD_MAX_KW);
        }
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let a = generate(&GenerationParams::new(65.0, 24, 42), &clock()).unwrap();
        let b = generate(&GenerationParams::new(65.0, 24, 42), &clock()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_produce_different_load() {
        let a = generate(&GenerationParams::new(65.0, 24, 42), &clock()).unwrap();
        let b = generate(&GenerationParams::new(65.0, 24, 43), &clock()).unwrap();
        assert!(a.iter().zip(&b).any(|(x, y)| x.home_load_kw != y.home_load_kw));
    }

    #[test]
    fn test_caller_rng_matches_seeded_generate() {
        let params = GenerationParams::new(50.0, 24, 7);
        let mut rng = StdRng::seed_from_u64(7);
        let a = generate_with_rng(&params, &mut rng, &clock()).unwrap();
        let b = generate(&params, &clock()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_permissive_ramp_goes_negative() {
        let rows = generate(&GenerationParams::new(5.0, 3, 0), &clock()).unwrap();
        assert_eq!(rows[0].battery_pct, -5.0);
        assert_eq!(rows[2].battery_pct, 5.0);
    }

    #[test]
    fn test_clamp_policy_bounds_ramp() {
        let params = GenerationParams::new(5.0, 3, 0).with_policy(BatteryRangePolicy::Clamp);
        let rows = generate(&params, &clock()).unwrap();
        assert_eq!(rows[0].battery_pct, 0.0);
        assert_eq!(rows[1].battery_pct, 0.0);
        assert_eq!(rows[2].battery_pct, 5.0);
    }

    #[test]
    fn test_reject_policy_refuses_out_of_range() {
        let params = GenerationParams::new(120.0, 3, 0).with_policy(BatteryRangePolicy::Reject);
        let err = generate(&params, &clock()).unwrap_err();
        assert!(matches!(
            err,
            HessError::InvalidParameter {
                name: "battery_level",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_level_rejected() {
        let params = GenerationParams::new(f64::NAN, 3, 0);
        assert!(generate(&params, &clock()).is_err());
    }
}
