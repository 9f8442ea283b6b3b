//! matgen - normalize an API document for MATLAB code generation
//!
//! Reads a parsed source document (JSON) and an optional generator config
//! (TOML), runs the transformation pipeline and writes the normalized model
//! graph as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use matgen_core::{GeneratorConfig, NameRole, TruncationRegistry, generate_from_json, sanitize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "matgen", version, about = "MATLAB generator model normalizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a source document into a generation-ready model graph
    Normalize(NormalizeArgs),
    /// Sanitize names for one identifier role, one per output line
    Sanitize(SanitizeArgs),
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    #[arg(value_name = "INPUT", help = "Source document (JSON)")]
    input: PathBuf,
    #[arg(long, short = 'c', help = "Generator config (TOML)")]
    config: Option<PathBuf>,
    #[arg(long, short = 'o', help = "Output file. Defaults to stdout")]
    output: Option<PathBuf>,
    #[arg(long, help = "Override the configured package name")]
    package_name: Option<String>,
}

#[derive(Args, Debug)]
struct SanitizeArgs {
    #[arg(value_name = "ROLE", help = "model, field, parameter, operation or tag")]
    role: NameRole,
    #[arg(value_name = "NAMES", required = true)]
    names: Vec<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "matgen=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Normalize(args) => run_normalize(args),
        Command::Sanitize(args) => run_sanitize(&args),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run_normalize(args: NormalizeArgs) -> Result<(), String> {
    let json = read(&args.input)?;

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_toml_str(&read(path)?).map_err(|e| e.to_string())?,
        None => GeneratorConfig::default(),
    };
    if let Some(package_name) = args.package_name {
        config.package_name = package_name;
    }
    debug!(package = %config.package_name, flavor = ?config.flavor, "Loaded generator config.");

    let api = generate_from_json(&json, config).map_err(|e| e.to_string())?;
    let rendered = serde_json::to_string_pretty(&api)
        .map_err(|e| format!("Failed to serialize model graph: {e}"))?;

    match args.output {
        Some(path) => {
            fs::write(&path, rendered + "\n")
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            info!(path = %path.display(), "Wrote normalized model graph.");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_sanitize(args: &SanitizeArgs) -> Result<(), String> {
    let mut registry = TruncationRegistry::new();
    for name in &args.names {
        let sanitized = sanitize(name, args.role, &mut registry).map_err(|e| e.to_string())?;
        println!("{sanitized}");
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))
}
