//! Dashboard presentation model: control values, panels and recommendations.
//!
//! Front ends (the `tui` feature) render this model; nothing here draws.

use crate::error::HessError;
use crate::sim::clock::Clock;
use crate::sim::generator::generate;
use crate::sim::types::{DEFAULT_HOURS, GenerationParams, TimeSeriesRow};

/// Upper bound of the solar output slider (kW).
pub const SOLAR_SLIDER_MAX_KW: f64 = 10.0;
/// Upper bound of the home load slider (kW).
pub const HOME_LOAD_SLIDER_MAX_KW: f64 = 8.0;
/// Step of the kW sliders.
pub const KW_SLIDER_STEP: f64 = 0.1;
/// EV charging rate shown while charging is enabled (kW).
pub const EV_CHARGING_RATE_KW: f64 = 7.2;
/// Battery level below which the low-battery alert is raised (%).
pub const LOW_BATTERY_THRESHOLD_PCT: u8 = 20;

/// User-adjustable dashboard controls.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardInputs {
    /// Battery level slider, `0..=100` (%).
    pub battery_level: u8,
    /// EV charging toggle.
    pub ev_charging: bool,
    /// Solar output slider, `0..=10` (kW).
    pub solar_output_kw: f64,
    /// Home load slider, `0..=8` (kW).
    pub home_load_kw: f64,
}

impl Default for DashboardInputs {
    fn default() -> Self {
        Self {
            battery_level: 65,
            ev_charging: true,
            solar_output_kw: 4.5,
            home_load_kw: 3.2,
        }
    }
}

impl DashboardInputs {
    /// Moves the battery slider by `delta` percent, saturating at `0..=100`.
    pub fn adjust_battery(&mut self, delta: i16) {
        let level = i16::from(self.battery_level) + delta;
        self.battery_level = u8::try_from(level.clamp(0, 100)).unwrap_or(100);
    }

    /// Moves the solar slider by `steps` slider steps.
    pub fn adjust_solar(&mut self, steps: i32) {
        self.solar_output_kw = step_kw(self.solar_output_kw, steps, SOLAR_SLIDER_MAX_KW);
    }

    /// Moves the home load slider by `steps` slider steps.
    pub fn adjust_home_load(&mut self, steps: i32) {
        self.home_load_kw = step_kw(self.home_load_kw, steps, HOME_LOAD_SLIDER_MAX_KW);
    }

    /// Flips the EV charging toggle.
    pub fn toggle_ev_charging(&mut self) {
        self.ev_charging = !self.ev_charging;
    }

    /// Status of the EV charging panel.
    pub fn ev_status(&self) -> EvStatus {
        if self.ev_charging {
            EvStatus::Enabled {
                rate_kw: EV_CHARGING_RATE_KW,
            }
        } else {
            EvStatus::Disabled
        }
    }
}

/// Snaps to the slider grid so repeated steps do not accumulate drift.
fn step_kw(value: f64, steps: i32, max: f64) -> f64 {
    let ticks = (value / KW_SLIDER_STEP).round() + f64::from(steps);
    (ticks * KW_SLIDER_STEP).clamp(0.0, max)
}

/// EV charging panel state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvStatus {
    /// Charging at a fixed rate.
    Enabled {
        /// Charging power (kW).
        rate_kw: f64,
    },
    /// Charging paused.
    Disabled,
}

impl EvStatus {
    /// Short status label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Enabled { .. } => "Enabled",
            Self::Disabled => "Disabled",
        }
    }

    /// Detail line below the label.
    pub fn detail(&self) -> String {
        match self {
            Self::Enabled { rate_kw } => format!("Charging Rate: {rate_kw:.1} kW"),
            Self::Disabled => "Charging paused".to_string(),
        }
    }
}

/// Advice derived from the current control values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Solar output exceeds home load.
    Surplus,
    /// Home load meets or exceeds solar output.
    Deficit,
    /// Battery below [`LOW_BATTERY_THRESHOLD_PCT`].
    LowBattery,
}

/// Severity used by front ends to pick a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Positive advice.
    Success,
    /// Advisory warning.
    Warning,
    /// Alert.
    Error,
}

impl Recommendation {
    /// Message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Surplus => {
                "You are generating more power than consuming. Consider charging your EV or storing energy."
            }
            Self::Deficit => {
                "Your home load exceeds solar generation. Consider reducing appliance usage or using stored battery power."
            }
            Self::LowBattery => {
                "Battery low. Avoid scheduling EV charging until battery exceeds 30%."
            }
        }
    }

    /// Display severity.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Surplus => Severity::Success,
            Self::Deficit => Severity::Warning,
            Self::LowBattery => Severity::Error,
        }
    }
}

/// Applies the threshold rules to the control values.
///
/// Always yields exactly one of `Surplus` / `Deficit`, followed by
/// `LowBattery` when the battery is below the threshold.
///
/// # Examples
///
/// ```
/// use hess_sim::dashboard::{DashboardInputs, Recommendation, recommendations};
///
/// let inputs = DashboardInputs { battery_level: 10, ..DashboardInputs::default() };
/// assert_eq!(
///     recommendations(&inputs),
///     vec![Recommendation::Surplus, Recommendation::LowBattery]
/// );
/// ```
pub fn recommendations(inputs: &DashboardInputs) -> Vec<Recommendation> {
    let mut out = Vec::with_capacity(2);
    if inputs.solar_output_kw > inputs.home_load_kw {
        out.push(Recommendation::Surplus);
    } else {
        out.push(Recommendation::Deficit);
    }
    if inputs.battery_level < LOW_BATTERY_THRESHOLD_PCT {
        out.push(Recommendation::LowBattery);
    }
    out
}

/// Regenerates the unanalyzed day used for the trends chart.
///
/// # Errors
///
/// Propagates generator errors; none occur for slider-range inputs.
pub fn chart_series(
    inputs: &DashboardInputs,
    seed: u64,
    clock: &impl Clock,
) -> Result<Vec<TimeSeriesRow>, HessError> {
    let params = GenerationParams::new(f64::from(inputs.battery_level), DEFAULT_HOURS, seed);
    generate(&params, clock)
}
