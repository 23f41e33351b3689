//! Microgrid dispatch entry point: CLI wiring, config loading and output.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use microgrid_dispatch::io::export::export_dispatch_csv;
use microgrid_dispatch::io::snapshot::AdvisorySnapshot;
use microgrid_dispatch::sim::types::Strategy;
use microgrid_dispatch::{Error, Result, SimulationConfig, logging, run_simulation};

/// Hourly microgrid dispatch and arbitrage engine.
///
/// If neither `--scenario` nor `--preset` is given, the `agra_summer`
/// preset is used.
#[derive(Debug, Parser)]
#[command(name = "microgrid-dispatch", version, about)]
struct Cli {
    /// Load the site configuration from a TOML file.
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset.
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Override the requested strategy (standard, arbitrage, self_consumption).
    #[arg(long, value_parser = parse_strategy)]
    strategy: Option<Strategy>,

    /// Write hourly dispatch records to CSV.
    #[arg(long, value_name = "PATH")]
    csv_out: Option<PathBuf>,

    /// Write the advisory JSON snapshot.
    #[arg(long, value_name = "PATH")]
    snapshot_out: Option<PathBuf>,

    /// Skip printing hourly records and the audit.
    #[arg(long, short)]
    quiet: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "MICROGRID_LOG", default_value = "info")]
    log_level: String,

    /// Start the REST API after the run.
    #[cfg(feature = "api")]
    #[arg(long)]
    serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

fn parse_strategy(name: &str) -> std::result::Result<Strategy, String> {
    Strategy::from_name(name).ok_or_else(|| {
        format!("unknown strategy \"{name}\", expected standard, arbitrage or self_consumption")
    })
}

fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = if let Some(path) = &cli.scenario {
        SimulationConfig::from_toml_file(path)?
    } else if let Some(name) = &cli.preset {
        SimulationConfig::from_preset(name)?
    } else {
        SimulationConfig::default()
    };

    if let Some(strategy) = cli.strategy {
        config = config.with_strategy(strategy);
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(Error::Invalid(errors));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    info!(
        scenario = %config.grid.scenario,
        strategy = %config.strategy(),
        "configuration loaded"
    );

    let result = run_simulation(&config, &config.overrides.load, &config.overrides.tariff);

    if !cli.quiet {
        for r in &result.records {
            println!("{r}");
        }
        println!("\n{}", result.audit);
    }

    if let Some(path) = &cli.csv_out {
        export_dispatch_csv(&result.records, path)?;
        info!(path = %path.display(), "dispatch CSV written");
    }

    let snapshot = AdvisorySnapshot::new(&config, &result);
    if let Some(path) = &cli.snapshot_out {
        snapshot.export(path)?;
        info!(path = %path.display(), "snapshot written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(microgrid_dispatch::api::AppState { result, snapshot });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(microgrid_dispatch::api::serve(state, addr))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_and_preset_conflict() {
        let parsed = Cli::try_parse_from([
            "microgrid-dispatch",
            "--scenario",
            "site.toml",
            "--preset",
            "islanded",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn strategy_flag_overrides_preset() {
        let cli = Cli::try_parse_from([
            "microgrid-dispatch",
            "--preset",
            "time_of_day",
            "--strategy",
            "self-consumption",
        ])
        .expect("arguments should parse");
        let config = load_config(&cli).expect("preset should load");
        assert_eq!(config.strategy(), Strategy::SelfConsumption);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let parsed = Cli::try_parse_from(["microgrid-dispatch", "--strategy", "greedy"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_preset_surfaces_config_error() {
        let cli = Cli::try_parse_from(["microgrid-dispatch", "--preset", "nope"])
            .expect("arguments should parse");
        assert!(matches!(load_config(&cli), Err(Error::Config(_))));
    }
}
