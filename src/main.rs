//! hess-sim entry point: CLI wiring and the generate → analyze → report run.

use std::io::{self, Write};
use std::process;

use tracing::info;

use hess_sim::cli::{self, CliOptions};
use hess_sim::config::ScenarioConfig;
use hess_sim::io::export::{export_csv, write_preview};
use hess_sim::reporting::format_report;
use hess_sim::runner::run_pipeline;
use hess_sim::sim::clock::SystemClock;
use hess_sim::telemetry;

/// Rows shown in the console preview.
const PREVIEW_ROWS: usize = 5;

fn load_scenario(cli: &CliOptions) -> ScenarioConfig {
    let mut scenario = match cli.scenario {
        Some(ref path) => match ScenarioConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => ScenarioConfig::default(),
    };
    cli.apply_to(&mut scenario);

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    scenario
}

#[cfg(feature = "tui")]
fn run_dashboard(scenario: &ScenarioConfig) {
    if let Err(e) = hess_sim::tui::run(scenario.dashboard_inputs(), scenario.simulation.seed) {
        eprintln!("error: dashboard crashed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_dashboard(_scenario: &ScenarioConfig) {
    eprintln!("error: --tui requires building with `--features tui`");
    process::exit(1);
}

fn main() {
    telemetry::init_tracing();

    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        return;
    }

    let scenario = load_scenario(&cli);

    if cli.tui {
        run_dashboard(&scenario);
        return;
    }

    let params = scenario.generation_params();
    info!(?params, "running simulation");
    let result = match run_pipeline(&params, &SystemClock) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let printed = writeln!(
        out,
        "First {PREVIEW_ROWS} rows of the simulated dataset with analysis:\n"
    )
    .and_then(|()| write_preview(&result.series, PREVIEW_ROWS, &mut out))
    .and_then(|()| writeln!(out, "\n{}", format_report(&result.report)));
    if let Err(e) = printed {
        eprintln!("error: failed to write report: {e}");
        process::exit(1);
    }

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&result.series, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Series written to {}", path.display());
    }
}
