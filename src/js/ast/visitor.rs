use super::{
    block::Block,
    expr::{Expr, ExprKind, Property},
    node::{HasPos, Located},
    stmt::{CatchClause, Stmt, StmtKind, SwitchCase},
};

// Walks never look at `Block::is_virtual`: both kinds are traversed alike.

pub trait Visit {
    fn visit_block(&mut self, b: &Block) {
        walk_block(self, b)
    }
    fn visit_stmt(&mut self, s: &Stmt) {
        walk_stmt(self, s)
    }
    fn visit_expr(&mut self, e: &Expr) {
        walk_expr(self, e)
    }
}

pub fn walk_block<V: Visit + ?Sized>(v: &mut V, b: &Block) {
    for s in b.iter() {
        v.visit_stmt(s);
    }
}

pub fn walk_stmt<V: Visit + ?Sized>(v: &mut V, s: &Stmt) {
    match &s.kind {
        StmtKind::Block { block } => v.visit_block(block),
        StmtKind::Var { init, .. } => {
            if let Some(e) = init {
                v.visit_expr(e);
            }
        }
        StmtKind::Expr { expr } => v.visit_expr(expr),
        StmtKind::Return { value } => {
            if let Some(e) = value {
                v.visit_expr(e);
            }
        }
        StmtKind::If {
            condition,
            then_block,
            else_block,
        } => {
            v.visit_expr(condition);
            v.visit_block(then_block);
            if let Some(b) = else_block {
                v.visit_block(b);
            }
        }
        StmtKind::While { condition, body } => {
            v.visit_expr(condition);
            v.visit_block(body);
        }
        StmtKind::DoWhile { body, condition } => {
            v.visit_block(body);
            v.visit_expr(condition);
        }
        StmtKind::For {
            init,
            condition,
            increment,
            body,
        } => {
            if let Some(s0) = init.as_deref() {
                v.visit_stmt(s0);
            }
            if let Some(c) = condition {
                v.visit_expr(c);
            }
            if let Some(inc) = increment {
                v.visit_expr(inc);
            }
            v.visit_block(body);
        }
        StmtKind::Switch {
            discriminant,
            cases,
        } => {
            v.visit_expr(discriminant);
            for case in cases {
                if let Some(t) = &case.test {
                    v.visit_expr(t);
                }
                v.visit_block(&case.body);
            }
        }
        StmtKind::Function { body, .. } => v.visit_block(body),
        StmtKind::Throw { value } => v.visit_expr(value),
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => {
            v.visit_block(block);
            if let Some(h) = handler {
                v.visit_block(&h.body);
            }
            if let Some(f) = finalizer {
                v.visit_block(f);
            }
        }
        StmtKind::Labeled { body, .. } => v.visit_stmt(body),
        StmtKind::Break { .. }
        | StmtKind::Continue { .. }
        | StmtKind::Debugger
        | StmtKind::Empty => {}
    }
}

pub fn walk_expr<V: Visit + ?Sized>(v: &mut V, e: &Expr) {
    match &e.kind {
        ExprKind::Literal { .. } | ExprKind::Ident { .. } => {}
        ExprKind::Array { items } => {
            for it in items {
                v.visit_expr(it);
            }
        }
        ExprKind::Object { properties } => {
            for p in properties {
                v.visit_expr(&p.value);
            }
        }
        ExprKind::Member { object, .. } => v.visit_expr(object),
        ExprKind::Index { object, index } => {
            v.visit_expr(object);
            v.visit_expr(index);
        }
        ExprKind::Call { callee, args } | ExprKind::New { callee, args } => {
            v.visit_expr(callee);
            for a in args {
                v.visit_expr(a);
            }
        }
        ExprKind::Unary { operand, .. } => v.visit_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        ExprKind::Assign { target, value } => {
            v.visit_expr(target);
            v.visit_expr(value);
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr(test);
            v.visit_expr(consequent);
            v.visit_expr(alternate);
        }
        ExprKind::Function { body, .. } => v.visit_block(body),
    }
}

pub trait VisitMut {
    fn visit_block_mut(&mut self, b: &mut Block) {
        walk_block_mut(self, b)
    }
    fn visit_stmt_mut(&mut self, s: &mut Stmt) {
        walk_stmt_mut(self, s)
    }
    fn visit_expr_mut(&mut self, e: &mut Expr) {
        walk_expr_mut(self, e)
    }
}

pub fn walk_block_mut<V: VisitMut + ?Sized>(v: &mut V, b: &mut Block) {
    for s in &mut b.stmts {
        v.visit_stmt_mut(s);
    }
}

pub fn walk_stmt_mut<V: VisitMut + ?Sized>(v: &mut V, s: &mut Stmt) {
    match &mut s.kind {
        StmtKind::Block { block } => v.visit_block_mut(block),
        StmtKind::Var { init, .. } => {
            if let Some(e) = init {
                v.visit_expr_mut(e);
            }
        }
        StmtKind::Expr { expr } => v.visit_expr_mut(expr),
        StmtKind::Return { value } => {
            if let Some(e) = value {
                v.visit_expr_mut(e);
            }
        }
        StmtKind::If {
            condition,
            then_block,
            else_block,
        } => {
            v.visit_expr_mut(condition);
            v.visit_block_mut(then_block);
            if let Some(b) = else_block {
                v.visit_block_mut(b);
            }
        }
        StmtKind::While { condition, body } => {
            v.visit_expr_mut(condition);
            v.visit_block_mut(body);
        }
        StmtKind::DoWhile { body, condition } => {
            v.visit_block_mut(body);
            v.visit_expr_mut(condition);
        }
        StmtKind::For {
            init,
            condition,
            increment,
            body,
        } => {
            if let Some(s0) = init.as_deref_mut() {
                v.visit_stmt_mut(s0);
            }
            if let Some(c) = condition {
                v.visit_expr_mut(c);
            }
            if let Some(inc) = increment {
                v.visit_expr_mut(inc);
            }
            v.visit_block_mut(body);
        }
        StmtKind::Switch {
            discriminant,
            cases,
        } => {
            v.visit_expr_mut(discriminant);
            for case in cases.iter_mut() {
                if let Some(t) = &mut case.test {
                    v.visit_expr_mut(t);
                }
                v.visit_block_mut(&mut case.body);
            }
        }
        StmtKind::Function { body, .. } => v.visit_block_mut(body),
        StmtKind::Throw { value } => v.visit_expr_mut(value),
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => {
            v.visit_block_mut(block);
            if let Some(h) = handler {
                v.visit_block_mut(&mut h.body);
            }
            if let Some(f) = finalizer {
                v.visit_block_mut(f);
            }
        }
        StmtKind::Labeled { body, .. } => v.visit_stmt_mut(body),
        StmtKind::Break { .. }
        | StmtKind::Continue { .. }
        | StmtKind::Debugger
        | StmtKind::Empty => {}
    }
}

pub fn walk_expr_mut<V: VisitMut + ?Sized>(v: &mut V, e: &mut Expr) {
    match &mut e.kind {
        ExprKind::Literal { .. } | ExprKind::Ident { .. } => {}
        ExprKind::Array { items } => {
            for it in items {
                v.visit_expr_mut(it);
            }
        }
        ExprKind::Object { properties } => {
            for p in properties {
                v.visit_expr_mut(&mut p.value);
            }
        }
        ExprKind::Member { object, .. } => v.visit_expr_mut(object),
        ExprKind::Index { object, index } => {
            v.visit_expr_mut(object);
            v.visit_expr_mut(index);
        }
        ExprKind::Call { callee, args } | ExprKind::New { callee, args } => {
            v.visit_expr_mut(callee);
            for a in args {
                v.visit_expr_mut(a);
            }
        }
        ExprKind::Unary { operand, .. } => v.visit_expr_mut(operand),
        ExprKind::Binary { left, right, .. } => {
            v.visit_expr_mut(left);
            v.visit_expr_mut(right);
        }
        ExprKind::Assign { target, value } => {
            v.visit_expr_mut(target);
            v.visit_expr_mut(value);
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr_mut(test);
            v.visit_expr_mut(consequent);
            v.visit_expr_mut(alternate);
        }
        ExprKind::Function { body, .. } => v.visit_block_mut(body),
    }
}

//
// ----------------------------- Fold (return-new) ----------------------------
//

pub trait Fold {
    fn fold_block(&mut self, b: Block) -> Block {
        fold_block(self, b)
    }
    fn fold_stmt(&mut self, s: Stmt) -> Stmt {
        fold_stmt(self, s)
    }
    fn fold_expr(&mut self, e: Expr) -> Expr {
        fold_expr(self, e)
    }
}

/// Rebuilds the children; kind and position of the block are kept.
pub fn fold_block<F: Fold + ?Sized>(f: &mut F, mut b: Block) -> Block {
    let stmts = std::mem::take(&mut b.stmts)
        .into_iter()
        .map(|s| f.fold_stmt(s))
        .collect();
    b.stmts = stmts;
    b
}

pub fn fold_stmt<F: Fold + ?Sized>(f: &mut F, s: Stmt) -> Stmt {
    let pos = s.pos();
    let kind = match s.kind {
        StmtKind::Block { block } => StmtKind::Block {
            block: f.fold_block(block),
        },
        StmtKind::Var { kind, name, init } => StmtKind::Var {
            kind,
            name,
            init: init.map(|e| f.fold_expr(e)),
        },
        StmtKind::Expr { expr } => StmtKind::Expr {
            expr: f.fold_expr(expr),
        },
        StmtKind::Return { value } => StmtKind::Return {
            value: value.map(|e| f.fold_expr(e)),
        },
        StmtKind::If {
            condition,
            then_block,
            else_block,
        } => {
            let condition = f.fold_expr(condition);
            let then_block = f.fold_block(then_block);
            let else_block = else_block.map(|b| f.fold_block(b));
            StmtKind::If {
                condition,
                then_block,
                else_block,
            }
        }
        StmtKind::While { condition, body } => {
            let condition = f.fold_expr(condition);
            let body = f.fold_block(body);
            StmtKind::While { condition, body }
        }
        StmtKind::DoWhile { body, condition } => {
            let body = f.fold_block(body);
            let condition = f.fold_expr(condition);
            StmtKind::DoWhile { body, condition }
        }
        StmtKind::For {
            init,
            condition,
            increment,
            body,
        } => {
            let init = init.map(|s| Box::new(f.fold_stmt(*s)));
            let condition = condition.map(|e| f.fold_expr(e));
            let increment = increment.map(|e| f.fold_expr(e));
            let body = f.fold_block(body);
            StmtKind::For {
                init,
                condition,
                increment,
                body,
            }
        }
        StmtKind::Switch {
            discriminant,
            cases,
        } => {
            let discriminant = f.fold_expr(discriminant);
            let cases = cases
                .into_iter()
                .map(|c| SwitchCase {
                    test: c.test.map(|e| f.fold_expr(e)),
                    body: f.fold_block(c.body),
                })
                .collect();
            StmtKind::Switch {
                discriminant,
                cases,
            }
        }
        StmtKind::Function { name, params, body } => StmtKind::Function {
            name,
            params,
            body: f.fold_block(body),
        },
        StmtKind::Throw { value } => StmtKind::Throw {
            value: f.fold_expr(value),
        },
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => {
            let block = f.fold_block(block);
            let handler = handler.map(|h| CatchClause {
                param: h.param,
                body: f.fold_block(h.body),
            });
            let finalizer = finalizer.map(|b| f.fold_block(b));
            StmtKind::Try {
                block,
                handler,
                finalizer,
            }
        }
        StmtKind::Labeled { label, body } => StmtKind::Labeled {
            label,
            body: Box::new(f.fold_stmt(*body)),
        },
        other @ (StmtKind::Break { .. }
        | StmtKind::Continue { .. }
        | StmtKind::Debugger
        | StmtKind::Empty) => other,
    };
    Located::new(kind, pos)
}

pub fn fold_expr<F: Fold + ?Sized>(f: &mut F, e: Expr) -> Expr {
    let pos = e.pos();
    let kind = match e.kind {
        leaf @ (ExprKind::Literal { .. } | ExprKind::Ident { .. }) => leaf,
        ExprKind::Array { items } => ExprKind::Array {
            items: items.into_iter().map(|it| f.fold_expr(it)).collect(),
        },
        ExprKind::Object { properties } => ExprKind::Object {
            properties: properties
                .into_iter()
                .map(|p| Property {
                    key: p.key,
                    value: f.fold_expr(p.value),
                })
                .collect(),
        },
        ExprKind::Member { object, property } => ExprKind::Member {
            object: Box::new(f.fold_expr(*object)),
            property,
        },
        ExprKind::Index { object, index } => {
            let object = Box::new(f.fold_expr(*object));
            let index = Box::new(f.fold_expr(*index));
            ExprKind::Index { object, index }
        }
        ExprKind::Call { callee, args } => {
            let callee = Box::new(f.fold_expr(*callee));
            let args = args.into_iter().map(|a| f.fold_expr(a)).collect();
            ExprKind::Call { callee, args }
        }
        ExprKind::New { callee, args } => {
            let callee = Box::new(f.fold_expr(*callee));
            let args = args.into_iter().map(|a| f.fold_expr(a)).collect();
            ExprKind::New { callee, args }
        }
        ExprKind::Unary { op, operand } => ExprKind::Unary {
            op,
            operand: Box::new(f.fold_expr(*operand)),
        },
        ExprKind::Binary { op, left, right } => {
            let left = Box::new(f.fold_expr(*left));
            let right = Box::new(f.fold_expr(*right));
            ExprKind::Binary { op, left, right }
        }
        ExprKind::Assign { target, value } => {
            let target = Box::new(f.fold_expr(*target));
            let value = Box::new(f.fold_expr(*value));
            ExprKind::Assign { target, value }
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            let test = Box::new(f.fold_expr(*test));
            let consequent = Box::new(f.fold_expr(*consequent));
            let alternate = Box::new(f.fold_expr(*alternate));
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            }
        }
        ExprKind::Function { name, params, body } => ExprKind::Function {
            name,
            params,
            body: f.fold_block(body),
        },
    };
    Located::new(kind, pos)
}
