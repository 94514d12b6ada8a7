//! Dashboard application state.

use crate::dashboard::{self, DashboardInputs, Recommendation};
use crate::sim::clock::{Clock, SystemClock};
use crate::sim::types::TimeSeriesRow;

/// Control currently targeted by the adjust keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    /// Battery level (%).
    Battery,
    /// Solar output (kW).
    Solar,
    /// Home load (kW).
    HomeLoad,
}

impl Slider {
    /// All sliders in display order.
    pub const ALL: [Slider; 3] = [Slider::Battery, Slider::Solar, Slider::HomeLoad];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Battery => "Battery Level (%)",
            Self::Solar => "Solar Output (kW)",
            Self::HomeLoad => "Home Load (kW)",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Battery => Self::Solar,
            Self::Solar => Self::HomeLoad,
            Self::HomeLoad => Self::Battery,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Battery => Self::HomeLoad,
            Self::Solar => Self::Battery,
            Self::HomeLoad => Self::Solar,
        }
    }
}

/// TUI application state.
pub struct App<C: Clock = SystemClock> {
    /// Current control values.
    pub inputs: DashboardInputs,
    /// Slider targeted by the adjust keys.
    pub selected: Slider,
    /// Seed of the chart series currently shown.
    pub seed: u64,
    /// Unanalyzed series for the trends chart.
    pub chart: Vec<TimeSeriesRow>,
    /// Last chart generation failure, if any.
    pub error: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
    clock: C,
}

impl App<SystemClock> {
    /// Creates an app anchored on the wall clock.
    pub fn new(inputs: DashboardInputs, seed: u64) -> Self {
        Self::with_clock(inputs, seed, SystemClock)
    }
}

impl<C: Clock> App<C> {
    /// Creates an app anchored on `clock`.
    pub fn with_clock(inputs: DashboardInputs, seed: u64, clock: C) -> Self {
        let mut app = Self {
            inputs,
            selected: Slider::Battery,
            seed,
            chart: Vec::new(),
            error: None,
            quit: false,
            clock,
        };
        app.refresh_chart();
        app
    }

    /// Regenerates the chart series from the current inputs and seed.
    pub fn refresh_chart(&mut self) {
        match dashboard::chart_series(&self.inputs, self.seed, &self.clock) {
            Ok(rows) => {
                self.chart = rows;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Draws a fresh chart with the next seed.
    pub fn reroll(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.refresh_chart();
    }

    pub fn select_next(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.prev();
    }

    /// Moves the selected slider by one step in the sign of `direction`.
    pub fn adjust(&mut self, direction: i8) {
        let steps = i32::from(direction.signum());
        match self.selected {
            Slider::Battery => {
                self.inputs.adjust_battery(i16::from(direction.signum()));
                // the battery ramp is part of the chart
                self.refresh_chart();
            }
            Slider::Solar => self.inputs.adjust_solar(steps),
            Slider::HomeLoad => self.inputs.adjust_home_load(steps),
        }
    }

    pub fn toggle_ev(&mut self) {
        self.inputs.toggle_ev_charging();
    }

    /// Recommendations for the current inputs.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        dashboard::recommendations(&self.inputs)
    }

    /// Display value of `slider`.
    pub fn slider_value(&self, slider: Slider) -> String {
        match slider {
            Slider::Battery => format!("{}", self.inputs.battery_level),
            Slider::Solar => format!("{:.1}", self.inputs.solar_output_kw),
            Slider::HomeLoad => format!("{:.1}", self.inputs.home_load_kw),
        }
    }
}
