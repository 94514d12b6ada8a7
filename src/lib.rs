//! Home energy storage day simulator: synthetic series, analysis, summary.

pub mod cli;
/// TOML scenario configuration.
pub mod config;
pub mod dashboard;
pub mod error;
pub mod io;
/// Daily summary statistics and rendering.
pub mod reporting;
pub mod runner;
/// Series generation and analysis.
pub mod sim;
pub mod telemetry;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::HessError;
pub use reporting::{SummaryReport, format_report, summarize};
pub use runner::{SimulationResult, run_pipeline, simulate, simulate_with_clock};
pub use sim::analysis::analyze;
pub use sim::generator::generate;
