//! gaffctl — run gaff sequences against the simulated device
//!
//! Usage:
//!   gaffctl list [--all]                       - List registered sequences
//!   gaffctl show <name>                        - Print a sequence definition
//!   gaffctl run <name> [--seed N]              - Run a sequence, print the JSON report
//!   gaffctl select --table FILE --input k=v... - Select a payload from a table

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use gf_gaff::{GaffConfig, GaffSequences};
use gf_lab::{LabConfig, SimulatedDevice};
use gf_select::{InputMap, SelectorTable};

#[derive(Parser)]
#[command(name = "gaffctl", about = "GaffForge sequence runner")]
struct Cli {
    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Gaff config (.json / .yaml) adding sequences and runner policy
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered sequences
    List {
        /// Include hidden sequences
        #[arg(short, long)]
        all: bool,
    },
    /// Print a sequence definition as JSON
    Show { name: String },
    /// Run a sequence against a fresh simulated device
    Run {
        name: String,
        /// Device RNG seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Lab config (.json / .yaml) describing the device
        #[arg(long)]
        lab: Option<PathBuf>,
    },
    /// Select a payload from a selector table
    Select {
        /// Table file (.json / .yaml)
        #[arg(short, long)]
        table: PathBuf,
        /// Inputs as hint=value
        #[arg(short, long = "input")]
        inputs: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => GaffConfig::load(path)
            .with_context(|| format!("Failed to load gaff config {}", path.display()))?,
        None => GaffConfig::default(),
    };

    match cli.command {
        Commands::List { all } => list(&config.registry(), all),
        Commands::Show { name } => show(&config.registry(), &name),
        Commands::Run { name, seed, lab } => run(&config, &name, seed, lab.as_deref()),
        Commands::Select { table, inputs } => select(&table, &inputs),
    }
}

fn list(registry: &GaffSequences, all: bool) -> Result<()> {
    for sequence in registry.get_sequences() {
        if sequence.hidden && !all {
            continue;
        }
        let marker = if sequence.hidden { " (hidden)" } else { "" };
        println!(
            "{:<24} {} steps{marker}  {}",
            sequence.name,
            sequence.len(),
            sequence.description
        );
    }
    Ok(())
}

fn show(registry: &GaffSequences, name: &str) -> Result<()> {
    let sequence = registry.require(name)?;
    println!("{}", serde_json::to_string_pretty(sequence)?);
    Ok(())
}

fn run(config: &GaffConfig, name: &str, seed: Option<u64>, lab: Option<&Path>) -> Result<()> {
    let registry = config.registry();
    let sequence = registry.require(name)?;

    let mut lab_config = match lab {
        Some(path) => LabConfig::load(path)
            .with_context(|| format!("Failed to load lab config {}", path.display()))?,
        None => LabConfig::default(),
    };
    if let Some(seed) = seed {
        lab_config.seed = seed;
    }

    let mut device = SimulatedDevice::new(lab_config)?;
    let report = sequence.run(&mut device, &config.runner)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    log::info!("Device stats: {:?}", device.stats());
    Ok(())
}

fn select(table_path: &Path, inputs: &[String]) -> Result<()> {
    let text = std::fs::read_to_string(table_path)
        .with_context(|| format!("Failed to read {}", table_path.display()))?;
    let table: SelectorTable<serde_json::Value> =
        match table_path.extension().and_then(|e| e.to_str()) {
            Some("json") => SelectorTable::from_json_str(&text)?,
            Some("yaml") | Some("yml") => SelectorTable::from_yaml_str(&text)?,
            _ => bail!("Unsupported table format: {}", table_path.display()),
        };

    let inputs = InputMap::parse_pairs(inputs.iter().map(String::as_str))
        .map_err(anyhow::Error::msg)?;
    let payload = table.select(&inputs)?;
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}
