use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::js::{
    ast::{
        block::Block,
        expr::{Expr, ExprKind},
        stmt::{Stmt, StmtKind},
        visitor::{
            walk_block_mut, walk_expr, walk_expr_mut, walk_stmt, walk_stmt_mut, Visit, VisitMut,
        },
    },
    preprocess::transforms::dead_code::hoisted_vars,
};

/// Replaces `f();` statements by a copy of `f`'s body.
///
/// Only top-level functions without parameters, `var`s, `return`, `this` or
/// `arguments` qualify, and only if `f` is never reassigned. A call is left
/// alone when a local binding around it shadows `f` or a name the body reads.
/// The copy is a virtual block unless the body has top-level lexical
/// declarations, which need a scope of their own.
pub struct InlineCalls {
    candidates: HashMap<String, Candidate>,
    /// Local bindings around the statement being visited, innermost last.
    scopes: Vec<HashSet<String>>,
    pub inlined: usize,
}

struct Candidate {
    body: Block,
    /// Names the body resolves in the scope around it.
    free: HashSet<String>,
}

impl InlineCalls {
    pub fn for_program(root: &Block) -> Self {
        let mut top_level = Vec::new();
        scope_stmts(root, &mut top_level);

        let mut seen = HashSet::new();
        let mut rejected = HashSet::new();
        let mut candidates = HashMap::new();
        for s in top_level {
            match &s.kind {
                StmtKind::Function { name, params, body } => {
                    // a redeclared name is ambiguous at any given call site
                    if !seen.insert(name.as_str()) {
                        rejected.insert(name.clone());
                    } else if params.is_empty() && is_inlinable(body) {
                        let candidate = Candidate {
                            free: free_names(body),
                            body: body.clone(),
                        };
                        candidates.insert(name.clone(), candidate);
                    }
                }
                StmtKind::Var { kind, name, .. } if kind.is_lexical() => {
                    rejected.insert(name.clone());
                }
                _ => {}
            }
        }
        // a global `var f` or any `f = ...` rebinds the function
        rejected.extend(hoisted_vars(root));
        rejected.extend(assigned_names(root));
        candidates.retain(|name, _| !rejected.contains(name));

        Self {
            candidates,
            scopes: Vec::new(),
            inlined: 0,
        }
    }

    /// Inlines calls anywhere under `root`, the program's top-level scope.
    pub fn run(&mut self, root: &mut Block) {
        walk_block_mut(self, root);
        self.inline_calls(root);
    }

    fn scoped<F>(&mut self, names: HashSet<String>, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.scopes.push(names);
        f(self);
        self.scopes.pop();
    }

    fn is_shadowed(&self, name: &str, candidate: &Candidate) -> bool {
        self.scopes.iter().any(|scope| {
            scope.contains(name) || candidate.free.iter().any(|n| scope.contains(n))
        })
    }

    fn replacement(&self, s: &Stmt) -> Option<(String, Block)> {
        let StmtKind::Expr { expr } = &s.kind else {
            return None;
        };
        let ExprKind::Call { callee, args } = &expr.kind else {
            return None;
        };
        if !args.is_empty() {
            return None;
        }
        let name = callee.as_ident()?;
        let candidate = self.candidates.get(name)?;
        if self.is_shadowed(name, candidate) {
            debug!(function = %name, pos = %s.pos, "call shadowed, not inlined");
            return None;
        }
        let stmts = candidate.body.stmts.clone();
        let block = if has_lexical_decls(&candidate.body) {
            Block::new(stmts, s.pos)
        } else {
            Block::new_virtual(stmts, s.pos)
        };
        Some((name.to_string(), block))
    }

    fn inline_calls(&mut self, b: &mut Block) {
        if self.candidates.is_empty() {
            return;
        }
        for s in b.stmts.iter_mut() {
            if let Some((name, block)) = self.replacement(s) {
                debug!(function = %name, virtual_block = block.is_virtual(), pos = %s.pos, "inlined call");
                *s = Stmt::block(block);
                self.inlined += 1;
            }
        }
    }
}

impl VisitMut for InlineCalls {
    fn visit_block_mut(&mut self, b: &mut Block) {
        let names = lexical_names(b);
        self.scoped(names, |this| {
            walk_block_mut(this, b);
            this.inline_calls(b);
        });
    }

    fn visit_stmt_mut(&mut self, s: &mut Stmt) {
        if let StmtKind::For { init: Some(init), .. } = &s.kind {
            let mut names = HashSet::new();
            declare_lexical(init, &mut names);
            self.scoped(names, |this| walk_stmt_mut(this, s));
            return;
        }
        match &mut s.kind {
            StmtKind::Function { params, body, .. } => {
                let names = function_scope(params, body);
                self.scoped(names, |this| this.visit_block_mut(body));
            }
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => {
                self.visit_block_mut(block);
                if let Some(h) = handler {
                    let names = h.param.iter().cloned().collect();
                    self.scoped(names, |this| this.visit_block_mut(&mut h.body));
                }
                if let Some(f) = finalizer {
                    self.visit_block_mut(f);
                }
            }
            _ => walk_stmt_mut(self, s),
        }
    }

    fn visit_expr_mut(&mut self, e: &mut Expr) {
        match &mut e.kind {
            ExprKind::Function { name, params, body } => {
                let mut names = function_scope(params, body);
                names.extend(name.iter().cloned());
                self.scoped(names, |this| this.visit_block_mut(body));
            }
            _ => walk_expr_mut(self, e),
        }
    }
}

/// Declarations that would land in the caller's scope if spliced.
pub fn has_lexical_decls(b: &Block) -> bool {
    !lexical_names(b).is_empty()
}

/// Statements of `b`'s own scope, looking through virtual blocks.
fn scope_stmts<'a>(b: &'a Block, out: &mut Vec<&'a Stmt>) {
    for s in b.iter() {
        match &s.kind {
            StmtKind::Block { block } if block.is_virtual() => scope_stmts(block, out),
            _ => out.push(s),
        }
    }
}

fn declare_lexical(s: &Stmt, names: &mut HashSet<String>) {
    match &s.kind {
        StmtKind::Var { kind, name, .. } if kind.is_lexical() => {
            names.insert(name.clone());
        }
        StmtKind::Function { name, .. } => {
            names.insert(name.clone());
        }
        StmtKind::Block { block } if block.is_virtual() => {
            for inner in block.iter() {
                declare_lexical(inner, names);
            }
        }
        _ => {}
    }
}

/// `let`, `const` and `function` names declared into `b`'s own scope.
fn lexical_names(b: &Block) -> HashSet<String> {
    let mut names = HashSet::new();
    for s in b.iter() {
        declare_lexical(s, &mut names);
    }
    names
}

/// Everything a function binds at the top of its body.
fn function_scope(params: &[String], body: &Block) -> HashSet<String> {
    let mut names = lexical_names(body);
    names.extend(params.iter().cloned());
    names.extend(hoisted_vars(body));
    names
}

/// Identifiers `body` reads without declaring them itself.
fn free_names(body: &Block) -> HashSet<String> {
    let mut refs = References::default();
    refs.visit_block(body);
    let own = lexical_names(body);
    refs.names.retain(|n| !own.contains(n));
    refs.names
}

fn assigned_names(root: &Block) -> HashSet<String> {
    let mut v = Assignments::default();
    v.visit_block(root);
    v.names
}

fn is_inlinable(body: &Block) -> bool {
    let mut finder = Blockers::default();
    finder.visit_block(body);
    // a copied `var` would land in the caller's function scope
    !finder.found && hoisted_vars(body).is_empty()
}

/// Looks for constructs whose meaning depends on the enclosing function.
#[derive(Default)]
struct Blockers {
    found: bool,
}

impl Visit for Blockers {
    fn visit_stmt(&mut self, s: &Stmt) {
        match &s.kind {
            StmtKind::Return { .. } => self.found = true,
            StmtKind::Function { .. } => {}
            _ => walk_stmt(self, s),
        }
    }

    fn visit_expr(&mut self, e: &Expr) {
        match &e.kind {
            ExprKind::Ident { name } if name == "this" || name == "arguments" => {
                self.found = true
            }
            ExprKind::Function { .. } => {}
            _ => walk_expr(self, e),
        }
    }
}

#[derive(Default)]
struct References {
    names: HashSet<String>,
}

impl Visit for References {
    fn visit_expr(&mut self, e: &Expr) {
        if let ExprKind::Ident { name } = &e.kind {
            self.names.insert(name.clone());
        }
        walk_expr(self, e);
    }
}

#[derive(Default)]
struct Assignments {
    names: HashSet<String>,
}

impl Visit for Assignments {
    fn visit_expr(&mut self, e: &Expr) {
        if let ExprKind::Assign { target, .. } = &e.kind {
            if let Some(name) = target.as_ident() {
                self.names.insert(name.to_string());
            }
        }
        walk_expr(self, e);
    }
}
