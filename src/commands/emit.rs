use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use clap::Args;
use jsast::{
    config::resolver::{get_path_cwd, load_emit_config},
    js::{ast::program::load_program, pipeline::compile},
};
use tracing::info;

/// Emit JavaScript from a JSON program.
#[derive(Args, Debug)]
pub struct EmitArgs {
    /// JSON program produced by the lowering stage
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Emitter config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// One load-preprocess-emit run with absolute paths.
#[derive(Debug, Clone)]
pub struct EmitJob {
    pub input: String,
    pub config: Option<String>,
    pub output: Option<String>,
}

impl EmitJob {
    pub fn new(input: &Path, config: Option<&Path>, output: Option<&Path>) -> Result<Self, String> {
        let abs = |p: &Path| get_path_cwd(&p.to_string_lossy());
        Ok(EmitJob {
            input: abs(input)?,
            config: config.map(abs).transpose()?,
            output: output.map(abs).transpose()?,
        })
    }

    pub fn run(&self) -> Result<(), String> {
        let config = load_emit_config(self.config.as_deref())?;
        let program = load_program(&self.input)?;
        let compiled = compile(program, &config).map_err(|e| format!("{}: {}", self.input, e))?;

        match &self.output {
            Some(out) => {
                fs::write(out, &compiled.code)
                    .map_err(|e| format!("Failed to write '{}': {}", out, e))?;
                info!(%out, bytes = compiled.code.len(), "emit succeeded");
            }
            None => print!("{}", compiled.code),
        }
        Ok(())
    }
}

pub async fn run(args: EmitArgs) -> Result<(), Box<dyn Error>> {
    let job = EmitJob::new(&args.input, args.config.as_deref(), args.output.as_deref())?;
    info!(input = %job.input, "starting emit");
    job.run()?;
    Ok(())
}
