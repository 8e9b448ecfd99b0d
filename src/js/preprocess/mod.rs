pub mod lints;
pub mod transforms;

use crate::{
    config::resolved::PassConfig,
    js::{ast::program::Program, preprocess::lints::error::LintError},
};

/// Result of preprocessing a program.
/// If `errors` is non-empty, the caller should log them and decide whether to emit.
pub struct PreprocessResult {
    pub errors: Vec<LintError>,
    pub program: Program,
}

/// Runs the enabled transforms, then the lints on the transformed tree.
pub fn preprocess(mut program: Program, passes: &PassConfig) -> PreprocessResult {
    transforms::run_transforms(&mut program.body, passes);

    let errors = lints::run_lints(&program.body);

    PreprocessResult { errors, program }
}
