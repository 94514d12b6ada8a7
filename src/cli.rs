//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::config::ScenarioConfig;
use crate::sim::types::BatteryRangePolicy;

/// Parsed command-line options; `None` fields keep the scenario value.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub battery_level: Option<f64>,
    pub hours: Option<usize>,
    pub seed: Option<u64>,
    pub battery_policy: Option<BatteryRangePolicy>,
    pub csv_out: Option<PathBuf>,
    pub tui: bool,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--battery-level" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --battery-level (expected a number)",
                )?;
                let level = raw.parse::<f64>().map_err(|_| {
                    format!("--battery-level value \"{raw}\" is not a valid number")
                })?;
                opts.battery_level = Some(level);
            }
            "--hours" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --hours (expected a positive integer)",
                )?;
                let hours = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--hours value \"{raw}\" is not a valid hour count"))?;
                opts.hours = Some(hours);
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--battery-policy" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --battery-policy (expected permissive, reject or clamp)",
                )?;
                opts.battery_policy = Some(raw.parse()?);
            }
            "--csv-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --csv-out (expected a file path)")?;
                if opts.csv_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--csv-out provided more than once".to_string());
                }
            }
            "--tui" => opts.tui = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(opts)
}

impl CliOptions {
    /// Applies command-line overrides on top of a loaded scenario.
    pub fn apply_to(&self, scenario: &mut ScenarioConfig) {
        let sim = &mut scenario.simulation;
        if let Some(level) = self.battery_level {
            sim.battery_level = level;
        }
        if let Some(hours) = self.hours {
            sim.hours = hours;
        }
        if let Some(seed) = self.seed {
            sim.seed = seed;
        }
        if let Some(policy) = self.battery_policy {
            sim.battery_policy = policy;
        }
    }
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("hess-sim: home energy storage day simulator");
    eprintln!();
    eprintln!("Usage: hess-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>          Load parameters from a TOML file");
    eprintln!("  --battery-level <f64>      Battery level at the final hour in % (default: 65)");
    eprintln!("  --hours <usize>            Number of hourly rows (default: 24)");
    eprintln!("  --seed <u64>               Random seed (default: 42)");
    eprintln!("  --battery-policy <name>    permissive | reject | clamp (default: permissive)");
    eprintln!("  --csv-out <path>           Write the analyzed series to CSV");
    eprintln!("  --tui                      Open the interactive terminal dashboard");
    eprintln!("  --help                     Show this help message");
}
