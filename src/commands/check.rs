use std::{error::Error, path::PathBuf};

use clap::Args;
use jsast::{
    config::resolver::{get_path_cwd, load_emit_config},
    js::{ast::program::load_program, preprocess::preprocess},
};
use tracing::{error, info};

/// Run the passes and lints without emitting.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON program produced by the lowering stage
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Emitter config file (selects the passes)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub async fn run(args: CheckArgs) -> Result<(), Box<dyn Error>> {
    let input = get_path_cwd(&args.input.to_string_lossy())?;
    let config_path = args
        .config
        .as_ref()
        .map(|p| get_path_cwd(&p.to_string_lossy()))
        .transpose()?;
    let config = load_emit_config(config_path.as_deref())?;

    let program = load_program(&input)?;
    let result = preprocess(program, &config.passes);
    if result.errors.is_empty() {
        info!(%input, "no problems found");
        return Ok(());
    }

    for err in &result.errors {
        error!(pos = %err.pos, rule = err.rule, "{}", err.message);
    }
    Err(format!("{}: {} lint error(s)", input, result.errors.len()).into())
}
