//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

use crate::dashboard::Severity;

/// Solar generation line color.
pub const SOLAR_COLOR: Color = Color::Yellow;
/// Home load line color.
pub const LOAD_COLOR: Color = Color::Cyan;
/// Battery gauge color when high (>= 50%).
pub const SOC_HIGH: Color = Color::Green;
/// Battery gauge color when medium (>= 20%).
pub const SOC_MID: Color = Color::Yellow;
/// Battery gauge color when low (< 20%).
pub const SOC_LOW: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Highlight for the selected slider.
pub const SELECTED_FG: Color = Color::LightBlue;

/// Returns a color based on the battery level in percent.
pub fn battery_color(level: u8) -> Color {
    if level >= 50 {
        SOC_HIGH
    } else if level >= 20 {
        SOC_MID
    } else {
        SOC_LOW
    }
}

/// Returns the text color for a recommendation severity.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(solar: &[(f64, f64)], load: &[(f64, f64)]) -> [f64; 2] {
    let all = solar.iter().chain(load.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
