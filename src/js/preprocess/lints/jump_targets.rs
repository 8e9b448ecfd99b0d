use crate::js::{
    ast::{
        block::Block,
        expr::{Expr, ExprKind},
        stmt::{Stmt, StmtKind},
        visitor::{walk_block, walk_expr, walk_stmt, Visit},
    },
    preprocess::lints::error::LintError,
};

pub const RULE: &str = "jump-target";

pub fn run(block: &Block) -> Vec<LintError> {
    let mut v = JumpTargets::default();
    v.visit_block(block);
    v.errors
}

/// What a `break`/`continue` can reach inside one function body.
#[derive(Default)]
struct Context {
    loops: usize,
    switches: usize,
    labels: Vec<(String, bool)>, // (label, labels a loop)
}

struct JumpTargets {
    stack: Vec<Context>,
    errors: Vec<LintError>,
}

impl Default for JumpTargets {
    fn default() -> Self {
        Self {
            stack: vec![Context::default()],
            errors: Vec::new(),
        }
    }
}

impl JumpTargets {
    fn ctx(&mut self) -> &mut Context {
        if self.stack.is_empty() {
            self.stack.push(Context::default());
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn in_function(&mut self, body: &Block) {
        self.stack.push(Context::default());
        walk_block(self, body);
        self.stack.pop();
    }

    fn check_break(&mut self, s: &Stmt, label: Option<&str>) {
        let ctx = self.ctx();
        let message = match label {
            None if ctx.loops == 0 && ctx.switches == 0 => {
                Some("`break` outside of a loop or switch".to_string())
            }
            Some(l) if !ctx.labels.iter().any(|(name, _)| name == l) => {
                Some(format!("`break` to unknown label `{}`", l))
            }
            _ => None,
        };
        if let Some(m) = message {
            self.errors.push(LintError::new(s.pos, RULE, m));
        }
    }

    fn check_continue(&mut self, s: &Stmt, label: Option<&str>) {
        let ctx = self.ctx();
        let message = match label {
            None if ctx.loops == 0 => Some("`continue` outside of a loop".to_string()),
            Some(l) => match ctx.labels.iter().rev().find(|(name, _)| name == l) {
                None => Some(format!("`continue` to unknown label `{}`", l)),
                Some((_, false)) => Some(format!("`continue` target `{}` is not a loop", l)),
                Some((_, true)) => None,
            },
            None => None,
        };
        if let Some(m) = message {
            self.errors.push(LintError::new(s.pos, RULE, m));
        }
    }
}

impl Visit for JumpTargets {
    fn visit_stmt(&mut self, s: &Stmt) {
        match &s.kind {
            StmtKind::While { .. } | StmtKind::DoWhile { .. } | StmtKind::For { .. } => {
                self.ctx().loops += 1;
                walk_stmt(self, s);
                self.ctx().loops -= 1;
            }
            StmtKind::Switch { .. } => {
                self.ctx().switches += 1;
                walk_stmt(self, s);
                self.ctx().switches -= 1;
            }
            StmtKind::Labeled { label, body } => {
                self.ctx().labels.push((label.clone(), body.unlabeled().is_loop()));
                self.visit_stmt(body);
                self.ctx().labels.pop();
            }
            StmtKind::Break { label } => self.check_break(s, label.as_deref()),
            StmtKind::Continue { label } => self.check_continue(s, label.as_deref()),
            StmtKind::Function { body, .. } => self.in_function(body),
            _ => walk_stmt(self, s),
        }
    }

    fn visit_expr(&mut self, e: &Expr) {
        match &e.kind {
            ExprKind::Function { body, .. } => self.in_function(body),
            _ => walk_expr(self, e),
        }
    }
}
