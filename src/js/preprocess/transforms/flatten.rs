use crate::js::ast::{
    block::Block,
    node::Located,
    stmt::StmtKind,
    visitor::{fold_block, Fold},
};

/// Splices virtual blocks found in statement lists into the enclosing list.
#[derive(Default)]
pub struct FlattenVirtual {
    pub spliced: usize,
}

impl Fold for FlattenVirtual {
    fn fold_block(&mut self, b: Block) -> Block {
        let mut b = fold_block(self, b);

        let has_virtual = b
            .iter()
            .any(|s| matches!(&s.kind, StmtKind::Block { block } if block.is_virtual()));
        if !has_virtual {
            return b;
        }

        let mut out = Vec::with_capacity(b.len());
        for s in std::mem::take(&mut b.stmts) {
            match s.kind {
                StmtKind::Block { block } if block.is_virtual() => {
                    self.spliced += 1;
                    out.extend(block.into_stmts());
                }
                kind => out.push(Located::new(kind, s.pos)),
            }
        }
        b.stmts = out;
        b
    }
}
