use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use steam_solver::{
    PropertyId, Region, Solver, SolverConfig, SolverError, StateQuery, classify_region,
    classify_region_by_pressure,
};
use steam_tables::{TableError, TableStore, load, save_json, save_yaml, steam_tables};
use tracing::info;

#[derive(Parser)]
#[command(name = "steam")]
#[command(about = "Table-based water/steam property calculator", long_about = None)]
struct Cli {
    /// Table store file (YAML or JSON); defaults to the built-in tables
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
    /// Solver configuration YAML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a state from known properties
    State {
        /// Known property as name=value (e.g. P=1000, T=400, h=2800)
        #[arg(short = 'k', long = "known", value_parser = parse_known)]
        knowns: Vec<(PropertyId, f64)>,
    },
    /// Classify a (pressure, temperature) point
    Region {
        /// Pressure in kPa
        #[arg(short, long)]
        pressure: f64,
        /// Temperature in °C
        #[arg(short, long)]
        temperature: f64,
        /// Compare pressure against Psat(T) instead of temperature against Tsat(P)
        #[arg(long)]
        by_pressure: bool,
    },
    /// Saturation state at a pressure or a temperature
    #[command(subcommand)]
    Sat(SatPoint),
    /// Inspect and export table stores
    #[command(subcommand)]
    Tables(TablesCommands),
}

#[derive(Subcommand)]
enum SatPoint {
    /// Saturation state at a pressure in kPa
    Pressure { value: f64 },
    /// Saturation state at a temperature in °C
    Temperature { value: f64 },
}

#[derive(Subcommand)]
enum TablesCommands {
    /// Load a table file and check its integrity
    Validate {
        /// Path to the table file
        path: PathBuf,
    },
    /// Write the active tables to a file
    Export {
        /// Output path
        path: PathBuf,
        /// Write JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Serialize)]
struct RegionReport {
    pressure: f64,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    saturation_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saturation_pressure: Option<f64>,
    region: Region,
}

#[derive(Serialize)]
struct TablesSummary {
    source: Option<String>,
    saturation_rows: usize,
    superheated_blocks: usize,
    compressed_blocks: usize,
    pressure_range: (f64, f64),
}

impl TablesSummary {
    fn of(store: &TableStore) -> Self {
        Self {
            source: store.source().map(str::to_owned),
            saturation_rows: store.saturation().len(),
            superheated_blocks: store.superheated().blocks().len(),
            compressed_blocks: store.compressed().blocks().len(),
            pressure_range: store.saturation().pressure_domain(),
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let output = run(cli)?;
    println!("{output}");
    Ok(())
}

fn run(cli: Cli) -> CliResult<String> {
    let tables = cli.tables.as_deref();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::State { knowns } => cmd_state(tables, config, knowns),
        Commands::Region {
            pressure,
            temperature,
            by_pressure,
        } => cmd_region(tables, config, pressure, temperature, by_pressure),
        Commands::Sat(point) => cmd_sat(tables, point),
        Commands::Tables(tables_cmd) => match tables_cmd {
            TablesCommands::Validate { path } => cmd_tables_validate(&path),
            TablesCommands::Export { path, json } => cmd_tables_export(tables, &path, json),
        },
    }
}

fn parse_known(text: &str) -> Result<(PropertyId, f64), String> {
    StateQuery::parse_assignment(text).map_err(|e| e.to_string())
}

fn load_store(path: Option<&Path>) -> CliResult<TableStore> {
    let store = match path {
        Some(path) => load(path)?,
        None => steam_tables()?,
    };
    Ok(store)
}

fn load_config(path: Option<&Path>) -> CliResult<SolverConfig> {
    match path {
        Some(path) => {
            let config = steam_solver::config::load_yaml(path)?;
            info!(path = %path.display(), "loaded solver config");
            Ok(config)
        }
        None => Ok(SolverConfig::default()),
    }
}

fn cmd_state(
    tables: Option<&Path>,
    config: SolverConfig,
    knowns: Vec<(PropertyId, f64)>,
) -> CliResult<String> {
    let store = load_store(tables)?;
    let solver = Solver::with_config(&store, config);
    let query: StateQuery = knowns.into_iter().collect();
    let result = solver.solve(&query)?;
    Ok(serde_json::to_string_pretty(&result)?)
}

fn cmd_region(
    tables: Option<&Path>,
    config: SolverConfig,
    pressure: f64,
    temperature: f64,
    by_pressure: bool,
) -> CliResult<String> {
    let store = load_store(tables)?;
    let report = if by_pressure {
        let region = classify_region_by_pressure(
            &store,
            temperature,
            pressure,
            config.saturation_pressure_tolerance,
        )?;
        RegionReport {
            pressure,
            temperature,
            saturation_temperature: None,
            saturation_pressure: Some(store.saturation().psat(temperature)?),
            region,
        }
    } else {
        let region = classify_region(&store, pressure, temperature, config.saturation_tolerance)?;
        RegionReport {
            pressure,
            temperature,
            saturation_temperature: Some(store.saturation().tsat(pressure)?),
            saturation_pressure: None,
            region,
        }
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn cmd_sat(tables: Option<&Path>, point: SatPoint) -> CliResult<String> {
    let store = load_store(tables)?;
    let saturation = store.saturation();
    let state = match point {
        SatPoint::Pressure { value } => saturation.at_pressure(value)?,
        SatPoint::Temperature { value } => saturation.at_temperature(value)?,
    };
    Ok(serde_json::to_string_pretty(&state)?)
}

fn cmd_tables_validate(path: &Path) -> CliResult<String> {
    let store = load(path)?;
    info!(path = %path.display(), "tables are valid");
    Ok(serde_json::to_string_pretty(&TablesSummary::of(&store))?)
}

fn cmd_tables_export(tables: Option<&Path>, path: &Path, json: bool) -> CliResult<String> {
    let store = load_store(tables)?;
    if json {
        save_json(path, &store)?;
    } else {
        save_yaml(path, &store)?;
    }
    info!(path = %path.display(), "exported tables");
    Ok(serde_json::to_string_pretty(&TablesSummary::of(&store))?)
}
