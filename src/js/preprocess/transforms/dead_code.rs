use crate::js::ast::{
    block::Block,
    expr::Expr,
    node::Located,
    stmt::{Stmt, StmtKind, VarKind},
    visitor::{walk_stmt, walk_stmt_mut, Visit, VisitMut},
};

/// Drops statements that follow one that always leaves the block.
///
/// Hoisted declarations survive: function declarations are kept as they are
/// and `var` names reappear as bare `var name;`.
#[derive(Default)]
pub struct DeadCodeStrip {
    pub removed: usize,
}

impl VisitMut for DeadCodeStrip {
    fn visit_block_mut(&mut self, b: &mut Block) {
        // First recurse inside statements
        for s in &mut b.stmts {
            walk_stmt_mut(self, s);
        }

        let mut out = Vec::with_capacity(b.stmts.len());
        let mut live = true;
        for s in std::mem::take(&mut b.stmts) {
            if live {
                live = !stmt_terminates(&s);
                out.push(s);
                continue;
            }
            if let StmtKind::Function { .. } = s.kind {
                out.push(s);
                continue;
            }
            self.removed += 1;
            let mut vars = HoistedVars::default();
            vars.visit_stmt(&s);
            for name in vars.names {
                if !declares_var(&out, &name) {
                    out.push(Located::new(
                        StmtKind::Var {
                            kind: VarKind::Var,
                            name,
                            init: None,
                        },
                        s.pos,
                    ));
                }
            }
        }
        b.stmts = out;
    }
}

/// Does control never reach the statement after `s`?
pub fn stmt_terminates(s: &Stmt) -> bool {
    match &s.kind {
        StmtKind::Return { .. }
        | StmtKind::Throw { .. }
        | StmtKind::Break { .. }
        | StmtKind::Continue { .. } => true,
        StmtKind::If {
            then_block,
            else_block,
            ..
        } => {
            block_terminates(then_block)
                && else_block.as_ref().map(block_terminates).unwrap_or(false)
        }
        // either kind: a virtual block runs inline, a scoped one just adds a scope
        StmtKind::Block { block } => block_terminates(block),
        _ => false,
    }
}

pub fn block_terminates(b: &Block) -> bool {
    b.iter().any(stmt_terminates)
}

fn declares_var(stmts: &[Stmt], name: &str) -> bool {
    stmts.iter().any(|s| {
        matches!(&s.kind, StmtKind::Var { kind: VarKind::Var, name: n, init: None } if n == name)
    })
}

/// `var` names declared anywhere in `b`, not looking into nested functions.
pub fn hoisted_vars(b: &Block) -> Vec<String> {
    let mut vars = HoistedVars::default();
    vars.visit_block(b);
    vars.names
}

/// `var` names declared in a statement, not looking into nested functions.
#[derive(Default)]
struct HoistedVars {
    names: Vec<String>,
}

impl Visit for HoistedVars {
    fn visit_stmt(&mut self, s: &Stmt) {
        match &s.kind {
            StmtKind::Function { .. } => {}
            StmtKind::Var {
                kind: VarKind::Var,
                name,
                ..
            } => {
                if !self.names.contains(name) {
                    self.names.push(name.clone());
                }
            }
            _ => walk_stmt(self, s),
        }
    }

    // expressions cannot declare `var`s outside a nested function
    fn visit_expr(&mut self, _e: &Expr) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::js::ast::{expr::ExprKind, literal::Literal, position::Position};

    fn call(name: &str) -> Stmt {
        Stmt::synthetic(StmtKind::Expr {
            expr: Expr::synthetic(ExprKind::Call {
                callee: Box::new(Expr::synthetic(ExprKind::Ident { name: name.into() })),
                args: vec![],
            }),
        })
    }

    fn ret() -> Stmt {
        Stmt::synthetic(StmtKind::Return { value: None })
    }

    fn var(kind: VarKind, name: &str) -> Stmt {
        Stmt::synthetic(StmtKind::Var {
            kind,
            name: name.into(),
            init: Some(Expr::synthetic(ExprKind::Literal {
                value: Literal::Number(1.0),
            })),
        })
    }

    #[test]
    fn drops_after_return() {
        let mut b = Block::new(vec![call("a"), ret(), call("b"), call("c")], Position::UNKNOWN);
        let mut pass = DeadCodeStrip::default();
        pass.visit_block_mut(&mut b);
        assert_eq!(b.stmts(), &[call("a"), ret()]);
        assert_eq!(pass.removed, 2);
    }

    #[test]
    fn terminating_virtual_block_ends_parent() {
        let inner = Block::new_virtual(vec![call("a"), ret(), call("dead")], Position::UNKNOWN);
        let mut b = Block::new(vec![Stmt::block(inner), call("b")], Position::UNKNOWN);
        DeadCodeStrip::default().visit_block_mut(&mut b);

        assert_eq!(b.len(), 1);
        let StmtKind::Block { block } = &b.stmts()[0].kind else {
            panic!("expected block");
        };
        assert!(block.is_virtual());
        assert_eq!(block.stmts(), &[call("a"), ret()]);
    }

    #[test]
    fn if_needs_both_branches() {
        let only_then = Stmt::synthetic(StmtKind::If {
            condition: Expr::synthetic(ExprKind::Ident { name: "c".into() }),
            then_block: Block::new(vec![ret()], Position::UNKNOWN),
            else_block: None,
        });
        let mut b = Block::new(vec![only_then, call("b")], Position::UNKNOWN);
        DeadCodeStrip::default().visit_block_mut(&mut b);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn keeps_hoisted_declarations() {
        let func = Stmt::synthetic(StmtKind::Function {
            name: "f".into(),
            params: vec![],
            body: Block::new(vec![], Position::UNKNOWN),
        });
        let nested_var = Stmt::block(Block::new(vec![var(VarKind::Var, "y")], Position::UNKNOWN));
        let mut b = Block::new(
            vec![
                ret(),
                var(VarKind::Var, "x"),
                var(VarKind::Let, "z"),
                func.clone(),
                nested_var,
            ],
            Position::UNKNOWN,
        );
        DeadCodeStrip::default().visit_block_mut(&mut b);

        let bare = |name: &str| {
            Stmt::synthetic(StmtKind::Var {
                kind: VarKind::Var,
                name: name.into(),
                init: None,
            })
        };
        assert_eq!(b.stmts(), &[ret(), bare("x"), func, bare("y")]);
    }
}
