//! TOML-based scenario configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::dashboard::{DashboardInputs, HOME_LOAD_SLIDER_MAX_KW, SOLAR_SLIDER_MAX_KW};
use crate::sim::types::{
    BatteryRangePolicy, DEFAULT_BATTERY_LEVEL, DEFAULT_HOURS, DEFAULT_SEED, GenerationParams,
};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the simulation entry point. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or start from
/// [`ScenarioConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Series generation parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Initial values of the dashboard controls.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Series generation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Battery state of charge at the final hour (%).
    pub battery_level: f64,
    /// Number of hourly rows (must be > 0).
    pub hours: usize,
    /// Random seed.
    pub seed: u64,
    /// Treatment of battery levels outside `[0, 100]`.
    pub battery_policy: BatteryRangePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            battery_level: DEFAULT_BATTERY_LEVEL,
            hours: DEFAULT_HOURS,
            seed: DEFAULT_SEED,
            battery_policy: BatteryRangePolicy::Permissive,
        }
    }
}

/// Initial values of the dashboard controls.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Battery level slider (%).
    pub battery_level: u8,
    /// EV charging toggle.
    pub ev_charging: bool,
    /// Solar output slider (kW).
    pub solar_output_kw: f64,
    /// Home load slider (kW).
    pub home_load_kw: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let inputs = DashboardInputs::default();
        Self {
            battery_level: inputs.battery_level,
            ev_charging: inputs.ev_charging,
            solar_output_kw: inputs.solar_output_kw,
            home_load_kw: inputs.home_load_kw,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Generation parameters described by the `[simulation]` section.
    pub fn generation_params(&self) -> GenerationParams {
        let s = &self.simulation;
        GenerationParams::new(s.battery_level, s.hours, s.seed).with_policy(s.battery_policy)
    }

    /// Dashboard inputs described by the `[dashboard]` section.
    pub fn dashboard_inputs(&self) -> DashboardInputs {
        let d = &self.dashboard;
        DashboardInputs {
            battery_level: d.battery_level,
            ev_charging: d.ev_charging,
            solar_output_kw: d.solar_output_kw,
            home_load_kw: d.home_load_kw,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.hours == 0 {
            errors.push(ConfigError::new("simulation.hours", "must be > 0"));
        }
        if !s.battery_level.is_finite() {
            errors.push(ConfigError::new("simulation.battery_level", "must be finite"));
        } else if s.battery_policy == BatteryRangePolicy::Reject
            && !(0.0..=100.0).contains(&s.battery_level)
        {
            errors.push(ConfigError::new(
                "simulation.battery_level",
                "must be in [0, 100] when battery_policy = \"reject\"",
            ));
        }

        let d = &self.dashboard;
        if d.battery_level > 100 {
            errors.push(ConfigError::new("dashboard.battery_level", "must be <= 100"));
        }
        if !(0.0..=SOLAR_SLIDER_MAX_KW).contains(&d.solar_output_kw) {
            errors.push(ConfigError::new(
                "dashboard.solar_output_kw",
                format!("must be in [0, {SOLAR_SLIDER_MAX_KW}]"),
            ));
        }
        if !(0.0..=HOME_LOAD_SLIDER_MAX_KW).contains(&d.home_load_kw) {
            errors.push(ConfigError::new(
                "dashboard.home_load_kw",
                format!("must be in [0, {HOME_LOAD_SLIDER_MAX_KW}]"),
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let cfg = ScenarioConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn default_generation_params_match_entry_point() {
        assert_eq!(
            ScenarioConfig::default().generation_params(),
            GenerationParams::default()
        );
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
battery_level = 40.0
hours = 48
seed = 99
battery_policy = "clamp"

[dashboard]
battery_level = 15
ev_charging = false
solar_output_kw = 6.5
home_load_kw = 2.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.hours), Some(48));
        assert_eq!(
            cfg.as_ref().map(|c| c.simulation.battery_policy),
            Some(BatteryRangePolicy::Clamp)
        );
        assert_eq!(cfg.as_ref().map(|c| c.dashboard.ev_charging), Some(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[simulation]
hours = 24
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn unknown_policy_rejected() {
        let toml = r#"
[simulation]
battery_policy = "strict"
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
seed = 7
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.seed), Some(7));
        assert_eq!(cfg.as_ref().map(|c| c.simulation.hours), Some(24));
        assert_eq!(cfg.as_ref().map(|c| c.dashboard.battery_level), Some(65));
    }

    #[test]
    fn validation_catches_zero_hours() {
        let mut cfg = ScenarioConfig::default();
        cfg.simulation.hours = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.hours"));
    }

    #[test]
    fn validation_respects_battery_policy() {
        let mut cfg = ScenarioConfig::default();
        cfg.simulation.battery_level = 120.0;
        assert!(cfg.validate().is_empty());

        cfg.simulation.battery_policy = BatteryRangePolicy::Reject;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.battery_level"));
    }

    #[test]
    fn validation_catches_dashboard_ranges() {
        let mut cfg = ScenarioConfig::default();
        cfg.dashboard.battery_level = 101;
        cfg.dashboard.solar_output_kw = 12.0;
        cfg.dashboard.home_load_kw = -1.0;
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"dashboard.battery_level".to_string()));
        assert!(fields.contains(&"dashboard.solar_output_kw".to_string()));
        assert!(fields.contains(&"dashboard.home_load_kw".to_string()));
    }

    #[test]
    fn error_display_includes_field() {
        let e = ConfigError::new("simulation.hours", "must be > 0");
        assert_eq!(e.to_string(), "config error: simulation.hours: must be > 0");
    }
}
