use std::collections::HashMap;

use crate::js::{
    ast::{
        block::Block,
        expr::{Expr, ExprKind},
        position::Position,
        stmt::{Stmt, StmtKind},
        visitor::{walk_block, walk_expr, walk_stmt, Visit},
    },
    preprocess::lints::error::LintError,
};

pub const RULE: &str = "scope-leak";

pub fn run(block: &Block) -> Vec<LintError> {
    let mut v = ScopeLeaks::default();
    v.in_frame(&[], true, |this| walk_block(this, block));
    v.errors
}

struct Decl {
    pos: Position,
    lexical: bool,
    via_virtual: bool,
}

/// Names declared in one emitted scope.
#[derive(Default)]
struct Frame {
    decls: HashMap<String, Decl>,
    /// `var`s from nested blocks that pass through this scope on their way to the function.
    hoisted: HashMap<String, Position>,
    /// Function body or program root: where `var`s stop.
    function: bool,
}

/// Reports `let`/`const` collisions in each emitted scope. Statements of a
/// virtual block in a list count towards the scope around it.
#[derive(Default)]
struct ScopeLeaks {
    frames: Vec<Frame>,
    virtual_depth: usize,
    errors: Vec<LintError>,
}

impl ScopeLeaks {
    fn in_frame<F>(&mut self, params: &[String], function: bool, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let mut frame = Frame {
            function,
            ..Frame::default()
        };
        for p in params {
            frame.decls.insert(
                p.clone(),
                Decl {
                    pos: Position::UNKNOWN,
                    lexical: false,
                    via_virtual: false,
                },
            );
        }
        self.frames.push(frame);
        // a virtual block's contents stop leaking at the next real scope
        let depth = std::mem::take(&mut self.virtual_depth);
        f(self);
        self.virtual_depth = depth;
        self.frames.pop();
    }

    fn declare(&mut self, name: &str, lexical: bool, pos: Position) {
        let via_virtual = self.virtual_depth > 0;
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        let message = match frame.decls.get(name) {
            Some(prev) if lexical || prev.lexical => Some(if via_virtual || prev.via_virtual {
                format!(
                    "`{}` declared through a virtual block collides with the declaration at {}",
                    name, prev.pos
                )
            } else {
                format!("`{}` is already declared in this scope, at {}", name, prev.pos)
            }),
            Some(_) => None,
            None => {
                let hoisted = frame.hoisted.get(name).copied().filter(|_| lexical);
                frame.decls.insert(
                    name.to_string(),
                    Decl {
                        pos,
                        lexical,
                        via_virtual,
                    },
                );
                hoisted.map(|at| {
                    format!("`{}` collides with the `var` declared in a nested block at {}", name, at)
                })
            }
        };
        if let Some(m) = message {
            self.errors.push(LintError::new(pos, RULE, m));
        }
    }

    /// A `var` also lands in every enclosing scope up to its function.
    fn hoist_var(&mut self, name: &str, pos: Position) {
        let mut idx = self.frames.len().saturating_sub(1);
        while idx > 0 && !self.frames[idx].function {
            idx -= 1;
            let frame = &mut self.frames[idx];
            if let Some(prev) = frame.decls.get(name).filter(|d| d.lexical) {
                let message = format!(
                    "`var {}` is hoisted into a scope that already declares it, at {}",
                    name, prev.pos
                );
                self.errors.push(LintError::new(pos, RULE, message));
                return;
            }
            frame.hoisted.entry(name.to_string()).or_insert(pos);
        }
    }
}

impl Visit for ScopeLeaks {
    /// Blocks reached here are body slots, which always get braces.
    fn visit_block(&mut self, b: &Block) {
        self.in_frame(&[], false, |this| walk_block(this, b));
    }

    fn visit_stmt(&mut self, s: &Stmt) {
        match &s.kind {
            StmtKind::Block { block } if block.is_virtual() => {
                self.virtual_depth += 1;
                walk_block(self, block);
                self.virtual_depth -= 1;
            }
            StmtKind::Var { kind, name, .. } => {
                self.declare(name, kind.is_lexical(), s.pos);
                if !kind.is_lexical() {
                    self.hoist_var(name, s.pos);
                }
                walk_stmt(self, s);
            }
            StmtKind::Function { name, params, body } => {
                self.declare(name, false, s.pos);
                self.in_frame(params, true, |this| walk_block(this, body));
            }
            StmtKind::For {
                init,
                condition,
                increment,
                body,
            } => {
                // the loop header has its own scope around the body's
                self.in_frame(&[], false, |this| {
                    if let Some(s0) = init.as_deref() {
                        this.visit_stmt(s0);
                    }
                    if let Some(c) = condition {
                        this.visit_expr(c);
                    }
                    if let Some(i) = increment {
                        this.visit_expr(i);
                    }
                    this.visit_block(body);
                });
            }
            StmtKind::Switch {
                discriminant,
                cases,
            } => {
                self.visit_expr(discriminant);
                // all unbraced cases share the switch body's scope
                self.in_frame(&[], false, |this| {
                    for case in cases {
                        if let Some(t) = &case.test {
                            this.visit_expr(t);
                        }
                        if case.body.is_virtual() {
                            walk_block(this, &case.body);
                        } else {
                            this.visit_block(&case.body);
                        }
                    }
                });
            }
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => {
                self.visit_block(block);
                if let Some(h) = handler {
                    let params: Vec<String> = h.param.iter().cloned().collect();
                    self.in_frame(&params, false, |this| {
                        // `catch (e) { let e; }` is a redeclaration
                        if let Some(frame) = this.frames.last_mut() {
                            for decl in frame.decls.values_mut() {
                                decl.lexical = true;
                            }
                        }
                        walk_block(this, &h.body)
                    });
                }
                if let Some(f) = finalizer {
                    self.visit_block(f);
                }
            }
            _ => walk_stmt(self, s),
        }
    }

    fn visit_expr(&mut self, e: &Expr) {
        match &e.kind {
            ExprKind::Function { params, body, .. } => {
                self.in_frame(params, true, |this| walk_block(this, body));
            }
            _ => walk_expr(self, e),
        }
    }
}
