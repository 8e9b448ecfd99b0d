mod commands;

use clap::{Parser, Subcommand};
use commands::{check, emit, watch};
use std::error::Error;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jsastc")]
#[command(author, version, about = "Emit JavaScript from a lowered statement tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    async fn run(self) -> Result<(), Box<dyn Error>> {
        match self.command {
            Commands::Emit(args) => emit::run(args).await,
            Commands::Check(args) => check::run(args).await,
            Commands::Watch(args) => watch::run(args).await,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Preprocess a JSON program and emit JavaScript
    Emit(commands::emit::EmitArgs),

    /// Run passes and lints only
    Check(commands::check::CheckArgs),

    /// Emit on every change of the input directory
    Watch(commands::watch::WatchArgs),
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter (e.g. JSAST_LOG=debug)
    let filter = match EnvFilter::try_from_env("JSAST_LOG") {
        Ok(f) => f,
        Err(_) => EnvFilter::new("info"),
    };

    // stdout carries emitted code, logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
