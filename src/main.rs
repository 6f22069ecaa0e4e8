use abvcalc_core::{Directory, FileStore};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{CalcCommand, ConfigCommand, KnownCommand, MixCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "abv")]
#[command(version)]
#[command(about = "Estimate the ABV of a mixed drink", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the strength of a mix in one go
    Calc(CalcCommand),

    /// Build a mix interactively
    Mix(MixCommand),

    /// Manage ingredients with a known ABV
    Known(KnownCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abvcalc=warn,abvcalc_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    let store = FileStore::new(config.data_dir.value.clone());

    match &cli.command {
        Some(Commands::Calc(cmd)) => {
            let directory = Directory::load(store);
            cmd.run(&directory, &config)?;
        }
        Some(Commands::Mix(cmd)) => {
            let directory = Directory::load(store);
            cmd.run(&directory, &config)?;
        }
        Some(Commands::Known(cmd)) => {
            let mut directory = Directory::load(store);
            cmd.run(&mut directory)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
