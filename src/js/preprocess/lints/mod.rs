pub mod error;
pub mod jump_targets;
pub mod scope_leak;

use crate::js::{ast::block::Block, preprocess::lints::error::LintError};

/// Returns every lint error, sorted by position (empty if OK).
pub fn run_lints(block: &Block) -> Vec<LintError> {
    let mut errs = Vec::new();

    errs.extend(scope_leak::run(block));
    errs.extend(jump_targets::run(block));

    errs.sort();
    errs
}
