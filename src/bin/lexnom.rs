//! lexnom CLI - flattens a directory of dictionary corpus files into one table
//!
//! Reads every corpus file in the input directory and writes one row per
//! lexical entry to the output file.

use clap::Parser;
use lexnom::runtime::{run, ExtractConfig, OutputFormat};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexnom")]
#[command(version, about = "Flatten attribute/value dictionary corpora into tabular records", long_about = None)]
struct Cli {
    /// Input file directory [default: 2024_01]
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output file path [default: results.csv]
    #[arg(short, long)]
    output_filename: Option<PathBuf>,

    /// Optional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = extract(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Resolve configuration with precedence: CLI > ENV > config file > defaults
fn resolve_config(cli: &Cli) -> Result<ExtractConfig, String> {
    // 1. Config file (or defaults)
    let mut config = match &cli.config {
        Some(path) => ExtractConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => ExtractConfig::default(),
    };

    // 2. Environment variables
    config.apply_env_overrides();

    // 3. CLI flags (highest priority)
    if let Some(input_dir) = &cli.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(output) = &cli.output_filename {
        config.output_path = output.clone();
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    Ok(config)
}

fn extract(cli: Cli) -> Result<(), String> {
    let config = resolve_config(&cli)?;

    let summary = run(&config).map_err(|e| e.to_string())?;

    tracing::info!(%summary, "done");
    println!(
        "Saved {} records to {}",
        summary.entries_emitted,
        config.output_path.display()
    );
    Ok(())
}
