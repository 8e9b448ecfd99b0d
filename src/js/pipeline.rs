use std::fmt;

use tracing::{debug, warn};

use crate::{
    config::resolved::EmitConfig,
    js::{
        ast::program::Program,
        emitter::{emit_program, errors::EmitError},
        preprocess::{lints::error::LintError, preprocess},
    },
};

/// Emitted code plus the lint errors that did not stop it.
#[derive(Debug)]
pub struct Compiled {
    pub code: String,
    pub lints: Vec<LintError>,
}

#[derive(Debug)]
pub enum CompileError {
    /// Lints failed and the config asks to stop on them.
    Lint(Vec<LintError>),
    Emit(EmitError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lint(errs) => write!(f, "{} lint error(s)", errs.len()),
            CompileError::Emit(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<EmitError> for CompileError {
    fn from(e: EmitError) -> Self {
        CompileError::Emit(e)
    }
}

/// Preprocess, lint and emit one program.
pub fn compile(program: Program, config: &EmitConfig) -> Result<Compiled, CompileError> {
    let result = preprocess(program, &config.passes);
    for err in &result.errors {
        warn!(pos = %err.pos, rule = err.rule, "{}", err.message);
    }
    if config.fail_on_lint && !result.errors.is_empty() {
        return Err(CompileError::Lint(result.errors));
    }

    let code = emit_program(&result.program, config)?;
    debug!(statements = result.program.body.len(), "compiled program");
    Ok(Compiled {
        code,
        lints: result.errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::js::ast::program::parse_program;

    #[test]
    fn lint_errors_stop_emission_by_default() {
        let program = parse_program(r#"{"body":[{"type":"break"}]}"#).unwrap();
        match compile(program, &EmitConfig::default()) {
            Err(CompileError::Lint(errs)) => assert_eq!(errs.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn lint_errors_can_be_tolerated() {
        let program = parse_program(r#"{"body":[{"type":"break"}]}"#).unwrap();
        let config = EmitConfig {
            fail_on_lint: false,
            ..EmitConfig::default()
        };
        let compiled = compile(program, &config).unwrap();
        assert_eq!(compiled.code, "break;\n");
        assert_eq!(compiled.lints.len(), 1);
    }
}
