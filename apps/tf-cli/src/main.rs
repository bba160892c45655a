use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tf_core::{Quantity, UnitError, k, pa, parse_quantity};
use tf_db::{Database, DbError};
use tf_engine::{
    AqueousConvention, EngineConfig, EngineError, SweepDefinition, SweepError, SweepType,
    ThermoEngine, WaterConvention, execute_sweep_parallel,
};
use tf_models::ModelRegistry;
use tf_results::{PropertyRow, ResultsError, append_row, append_rows};

#[derive(Parser)]
#[command(name = "tf-cli")]
#[command(about = "Standard-state thermodynamic properties of substances and reactions", long_about = None)]
struct Cli {
    /// Path to the thermodynamic dataset (YAML or JSON)
    #[arg(short, long, global = true, default_value = "data/demo.yaml")]
    database: PathBuf,

    /// Engine configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Symbol of the solvent record, overriding the configuration
    #[arg(long, global = true)]
    solvent: Option<String>,

    #[arg(long, global = true, value_enum)]
    aqueous_convention: Option<AqueousArg>,

    #[arg(long, global = true, value_enum)]
    water_convention: Option<WaterArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum AqueousArg {
    BensonHelgeson,
    BermanBrown,
}

#[derive(Clone, Copy, ValueEnum)]
enum WaterArg {
    Default,
    SteamTables,
}

#[derive(Clone, Copy, ValueEnum)]
enum SweepAxis {
    Temperature,
    Pressure,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a dataset and evaluate every substance at its reference state
    Check,
    /// Properties of a substance
    Substance {
        symbol: String,
        /// Temperature, e.g. "25 C" or "298.15"
        #[arg(short, long, default_value = "298.15 K")]
        temperature: String,
        /// Pressure, e.g. "1 bar" or "100000"
        #[arg(short, long, default_value = "1 bar")]
        pressure: String,
        /// Append the result to a CSV table
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Properties of a reaction from its own model
    Reaction {
        symbol: String,
        #[arg(short, long, default_value = "298.15 K")]
        temperature: String,
        #[arg(short, long, default_value = "1 bar")]
        pressure: String,
    },
    /// Properties of a reaction summed from its components
    ReactionFromReactants {
        symbol: String,
        #[arg(short, long, default_value = "298.15 K")]
        temperature: String,
        #[arg(short, long, default_value = "1 bar")]
        pressure: String,
    },
    /// Bulk properties of a solvent
    ///
    /// The built-in registry ships no water equation of state, so this
    /// reports an unsupported method unless the solvent record uses a model
    /// registered by the embedding program.
    Solvent {
        symbol: Option<String>,
        #[arg(short, long, default_value = "298.15 K")]
        temperature: String,
        #[arg(short, long, default_value = "1 bar")]
        pressure: String,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Dielectric properties and Born functions of a solvent
    ///
    /// Needs the solvent's bulk properties first; with the built-in registry
    /// (no water equation of state) this reports an unsupported method.
    Electro {
        symbol: Option<String>,
        #[arg(short, long, default_value = "298.15 K")]
        temperature: String,
        #[arg(short, long, default_value = "1 bar")]
        pressure: String,
    },
    /// Sweep a substance over temperature or pressure
    Sweep {
        symbol: String,
        #[arg(value_enum)]
        axis: SweepAxis,
        /// Start of the swept range
        start: String,
        /// End of the swept range
        end: String,
        #[arg(short, long, default_value_t = 11)]
        points: usize,
        #[arg(long)]
        log: bool,
        /// Fixed pressure of a temperature sweep, or fixed temperature of a pressure sweep
        #[arg(short, long)]
        fixed: Option<String>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Database(#[from] DbError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Unit(#[from] UnitError),
    #[error(transparent)]
    Sweep(#[from] SweepError),
    #[error(transparent)]
    Results(#[from] ResultsError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{failed} of {total} substances failed")]
    CheckFailed { failed: usize, total: usize },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let engine = build_engine(&cli)?;

    match cli.command {
        Commands::Check => cmd_check(&engine),
        Commands::Substance {
            symbol,
            temperature,
            pressure,
            csv,
        } => cmd_substance(&engine, &symbol, &temperature, &pressure, csv.as_deref()),
        Commands::Reaction {
            symbol,
            temperature,
            pressure,
        } => {
            let (t, p) = state_point(&temperature, &pressure)?;
            print_json(&engine.reaction_properties(k(t), pa(p), &symbol)?)
        }
        Commands::ReactionFromReactants {
            symbol,
            temperature,
            pressure,
        } => {
            let (t, p) = state_point(&temperature, &pressure)?;
            print_json(&engine.reaction_properties_from_reactants(k(t), pa(p), &symbol)?)
        }
        Commands::Solvent {
            symbol,
            temperature,
            pressure,
            csv,
        } => cmd_solvent(&engine, symbol, &temperature, &pressure, csv.as_deref()),
        Commands::Electro {
            symbol,
            temperature,
            pressure,
        } => {
            let (t, p) = state_point(&temperature, &pressure)?;
            let symbol = symbol.unwrap_or_else(|| engine.solvent_symbol().to_string());
            print_json(&engine.electro_solvent_properties(k(t), pa(p), &symbol)?)
        }
        Commands::Sweep {
            symbol,
            axis,
            start,
            end,
            points,
            log,
            fixed,
            csv,
        } => cmd_sweep(
            &engine,
            &symbol,
            axis,
            (start.as_str(), end.as_str()),
            points,
            log,
            fixed.as_deref(),
            csv.as_deref(),
        ),
    }
}

fn build_engine(cli: &Cli) -> CliResult<ThermoEngine> {
    let db: Database = tf_db::load(&cli.database)?;
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(solvent) = &cli.solvent {
        config.solvent_symbol = solvent.clone();
    }
    if let Some(aqueous) = cli.aqueous_convention {
        config.conventions.aqueous = match aqueous {
            AqueousArg::BensonHelgeson => AqueousConvention::BensonHelgeson,
            AqueousArg::BermanBrown => AqueousConvention::BermanBrown,
        };
    }
    if let Some(water) = cli.water_convention {
        config.conventions.water = match water {
            WaterArg::Default => WaterConvention::Default,
            WaterArg::SteamTables => WaterConvention::SteamTables,
        };
    }
    tracing::info!(
        database = %cli.database.display(),
        substances = db.num_substances(),
        reactions = db.num_reactions(),
        "loaded dataset"
    );
    Ok(ThermoEngine::with_config(
        Arc::new(db),
        ModelRegistry::default(),
        config,
    ))
}

fn state_point(temperature: &str, pressure: &str) -> CliResult<(f64, f64)> {
    Ok((
        parse_quantity(temperature, Quantity::Temperature)?,
        parse_quantity(pressure, Quantity::Pressure)?,
    ))
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_check(engine: &ThermoEngine) -> CliResult<()> {
    let db = Arc::clone(engine.database());
    let (t, p) = (tf_core::constants::REFERENCE_T, tf_core::constants::REFERENCE_P);
    let mut failed = 0;
    for substance in db.substances() {
        match engine.substance_properties(k(t), pa(p), &substance.symbol) {
            Ok(tps) => println!("✓ {:<24} G = {:.3} J/mol", substance.symbol, tps.gibbs_energy),
            Err(err) => {
                failed += 1;
                println!("✗ {:<24} {err}", substance.symbol);
            }
        }
    }
    let total = db.num_substances();
    if failed > 0 {
        return Err(CliError::CheckFailed { failed, total });
    }
    println!("All {total} substances evaluated");
    Ok(())
}

fn cmd_substance(
    engine: &ThermoEngine,
    symbol: &str,
    temperature: &str,
    pressure: &str,
    csv: Option<&Path>,
) -> CliResult<()> {
    let (t, p) = state_point(temperature, pressure)?;
    let tps = engine.substance_properties(k(t), pa(p), symbol)?;
    if let Some(path) = csv {
        append_row(path, &PropertyRow::from_properties(t, p, &tps, 0.0))?;
    }
    print_json(&tps)
}

fn cmd_solvent(
    engine: &ThermoEngine,
    symbol: Option<String>,
    temperature: &str,
    pressure: &str,
    csv: Option<&Path>,
) -> CliResult<()> {
    let (t, p) = state_point(temperature, pressure)?;
    let symbol = symbol.unwrap_or_else(|| engine.solvent_symbol().to_string());
    let ps = engine.solvent_properties(k(t), pa(p), &symbol)?;
    if let Some(path) = csv {
        let tps = engine.substance_properties(k(t), pa(p), &symbol)?;
        append_row(path, &PropertyRow::from_properties(t, p, &tps, ps.density))?;
    }
    print_json(&ps)
}

#[allow(clippy::too_many_arguments)]
fn cmd_sweep(
    engine: &ThermoEngine,
    symbol: &str,
    axis: SweepAxis,
    (start, end): (&str, &str),
    points: usize,
    log: bool,
    fixed: Option<&str>,
    csv: Option<&Path>,
) -> CliResult<()> {
    let sweep_type = if log {
        SweepType::Logarithmic
    } else {
        SweepType::Linear
    };
    let (quantity, fixed_quantity, fixed_default) = match axis {
        SweepAxis::Temperature => (Quantity::Temperature, Quantity::Pressure, "1 bar"),
        SweepAxis::Pressure => (Quantity::Pressure, Quantity::Temperature, "298.15 K"),
    };
    let sweep_def = SweepDefinition::from_text(start, end, quantity, points, sweep_type)?;
    let fixed = parse_quantity(fixed.unwrap_or(fixed_default), fixed_quantity)?;

    println!("Sweeping {symbol}: {sweep_def}");
    let started = Instant::now();
    let result = execute_sweep_parallel(
        engine.database(),
        engine.models(),
        engine.config(),
        symbol,
        &sweep_def,
        fixed,
    )?;
    println!(
        "✓ {} points in {:.3}s ({} failed)",
        result.num_successful,
        started.elapsed().as_secs_f64(),
        result.num_failed
    );

    println!("{:>14} {:>14} {:>16} {:>14} {:>12}", "T [K]", "P [Pa]", "G [J/mol]", "H [J/mol]", "Cp");
    for (t, p, tps) in result.successful_points() {
        println!(
            "{:>14.4} {:>14.1} {:>16.3} {:>14.3} {:>12.4}",
            t, p, tps.gibbs_energy, tps.enthalpy, tps.heat_capacity_cp
        );
    }

    if let Some(path) = csv {
        let rows: Vec<PropertyRow> = result
            .successful_points()
            .map(|(t, p, tps)| PropertyRow::from_properties(t, p, tps, 0.0))
            .collect();
        append_rows(path, &rows)?;
        println!("Wrote {} rows to {}", rows.len(), path.display());
    }
    Ok(())
}
