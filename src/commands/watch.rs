use std::{error::Error, path::{Path, PathBuf}};

use clap::Args;
use jsast::filewatcher::watcher::spawn_watcher;
use tracing::{error, info};

use super::emit::EmitJob;

/// Emit, then re-emit whenever the input directory changes.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// JSON program produced by the lowering stage
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file for the emitted JavaScript
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Emitter config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub async fn run(args: WatchArgs) -> Result<(), Box<dyn Error>> {
    let job = EmitJob::new(&args.input, args.config.as_deref(), Some(args.output.as_path()))?;
    info!(input = %job.input, "starting watch");

    // a broken first build should not stop the watcher
    if let Err(err) = job.run() {
        error!(error = %err, "Initial emit failed");
    }

    let root = Path::new(&job.input)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let ignore: Vec<PathBuf> = job.output.iter().map(PathBuf::from).collect();
    spawn_watcher(root, ignore, move || job.run())?;

    tokio::signal::ctrl_c().await?;
    info!("stopping watch");
    Ok(())
}
