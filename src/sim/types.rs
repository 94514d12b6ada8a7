//! Series row types and generation parameters.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Deserialize;

/// Default battery state of charge used by the simulation entry point (%).
pub const DEFAULT_BATTERY_LEVEL: f64 = 65.0;
/// Default horizon of a simulated day (hours).
pub const DEFAULT_HOURS: usize = 24;
/// Default random seed.
pub const DEFAULT_SEED: u64 = 42;

/// One hourly sample of the generated series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRow {
    /// Start of the hour this sample describes.
    pub timestamp: NaiveDateTime,
    /// Solar generation (kW, never negative).
    pub solar_kw: f64,
    /// Household consumption (kW).
    pub home_load_kw: f64,
    /// Battery state of charge (%).
    pub battery_pct: f64,
}

/// A [`TimeSeriesRow`] with the derived analysis columns.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedRow {
    /// Start of the hour this sample describes.
    pub timestamp: NaiveDateTime,
    /// Solar generation (kW, never negative).
    pub solar_kw: f64,
    /// Household consumption (kW).
    pub home_load_kw: f64,
    /// Battery state of charge (%).
    pub battery_pct: f64,
    /// `home_load_kw - solar_kw`; negative means surplus generation.
    pub net_load_kw: f64,
    /// Share of solar consumed directly by the home, `None` without generation.
    pub solar_utilization: Option<f64>,
}

/// How the generator treats battery levels outside `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryRangePolicy {
    /// Accept any finite level and leave the ramp untouched.
    #[default]
    Permissive,
    /// Fail with `InvalidParameter` when the level is outside `[0, 100]`.
    Reject,
    /// Clamp every ramp value into `[0, 100]`.
    Clamp,
}

impl BatteryRangePolicy {
    /// Policy names accepted on the command line and in TOML.
    pub const NAMES: &[&str] = &["permissive", "reject", "clamp"];
}

impl FromStr for BatteryRangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" => Ok(Self::Permissive),
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            other => Err(format!(
                "unknown battery policy \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for BatteryRangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Permissive => "permissive",
            Self::Reject => "reject",
            Self::Clamp => "clamp",
        };
        f.write_str(name)
    }
}

/// Inputs of one generation request.
///
/// # Examples
///
/// ```
/// use hess_sim::sim::types::GenerationParams;
///
/// let params = GenerationParams::default();
/// assert_eq!(params.battery_level, 65.0);
/// assert_eq!(params.hours, 24);
/// assert_eq!(params.seed, 42);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Battery state of charge at the final hour (%).
    pub battery_level: f64,
    /// Number of hourly rows to generate (must be > 0).
    pub hours: usize,
    /// Seed for the home-load random draws.
    pub seed: u64,
    /// Treatment of battery levels outside `[0, 100]`.
    pub battery_policy: BatteryRangePolicy,
}

impl GenerationParams {
    /// Creates parameters with the permissive battery policy.
    pub fn new(battery_level: f64, hours: usize, seed: u64) -> Self {
        Self {
            battery_level,
            hours,
            seed,
            battery_policy: BatteryRangePolicy::Permissive,
        }
    }

    /// Returns a copy using `policy` for out-of-range battery levels.
    pub fn with_policy(mut self, policy: BatteryRangePolicy) -> Self {
        self.battery_policy = policy;
        self
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::new(DEFAULT_BATTERY_LEVEL, DEFAULT_HOURS, DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_known_names() {
        for name in BatteryRangePolicy::NAMES {
            let policy: BatteryRangePolicy = name.parse().unwrap();
            assert_eq!(policy.to_string(), *name);
        }
    }

    #[test]
    fn policy_rejects_unknown_name() {
        let err = "strict".parse::<BatteryRangePolicy>().unwrap_err();
        assert!(err.contains("unknown battery policy"));
    }

    #[test]
    fn default_params_match_entry_point_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.battery_level, DEFAULT_BATTERY_LEVEL);
        assert_eq!(params.hours, DEFAULT_HOURS);
        assert_eq!(params.seed, DEFAULT_SEED);
        assert_eq!(params.battery_policy, BatteryRangePolicy::Permissive);
    }

    #[test]
    fn with_policy_overrides_only_policy() {
        let params = GenerationParams::new(10.0, 6, 7).with_policy(BatteryRangePolicy::Clamp);
        assert_eq!(params.battery_level, 10.0);
        assert_eq!(params.hours, 6);
        assert_eq!(params.battery_policy, BatteryRangePolicy::Clamp);
    }
}
