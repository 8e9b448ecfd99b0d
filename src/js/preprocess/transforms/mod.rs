use tracing::debug;

use crate::{
    config::resolved::PassConfig,
    js::ast::{
        block::Block,
        position::Position,
        visitor::{Fold, VisitMut},
    },
};

pub mod dead_code;
pub mod flatten;
pub mod inline;

pub fn run_transforms(block: &mut Block, passes: &PassConfig) {
    if passes.inline_calls {
        let mut pass = inline::InlineCalls::for_program(block);
        pass.run(block);
        debug!(inlined = pass.inlined, "inline pass done");
    }
    if passes.strip_dead_code {
        let mut pass = dead_code::DeadCodeStrip::default();
        pass.visit_block_mut(block);
        debug!(removed = pass.removed, "dead code pass done");
    }
    if passes.flatten_virtual_blocks {
        let mut pass = flatten::FlattenVirtual::default();
        let root = std::mem::replace(block, Block::new_virtual(Vec::new(), Position::UNKNOWN));
        *block = pass.fold_block(root);
        debug!(spliced = pass.spliced, "flatten pass done");
    }
}
