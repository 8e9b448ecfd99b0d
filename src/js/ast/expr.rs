use serde::{Deserialize, Serialize};

use crate::js::ast::{
    binop::{precedence, BinOp, UnaryOp},
    block::Block,
    literal::Literal,
    node::Located,
};

/// A position-carrying expression.
pub type Expr = Located<ExprKind>;

impl Expr {
    /// Binding strength of the expression's outermost operator.
    pub fn precedence(&self) -> u8 {
        match &self.kind {
            ExprKind::Assign { .. } => precedence::ASSIGN,
            ExprKind::Conditional { .. } => precedence::CONDITIONAL,
            ExprKind::Binary { op, .. } => op.precedence(),
            ExprKind::Unary { .. } => precedence::UNARY,
            ExprKind::Call { .. }
            | ExprKind::New { .. }
            | ExprKind::Member { .. }
            | ExprKind::Index { .. } => precedence::CALL,
            ExprKind::Literal { .. }
            | ExprKind::Ident { .. }
            | ExprKind::Array { .. }
            | ExprKind::Object { .. }
            | ExprKind::Function { .. } => precedence::PRIMARY,
        }
    }

    /// Only identifiers and property accesses may be assigned to.
    pub fn is_assign_target(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Ident { .. } | ExprKind::Member { .. } | ExprKind::Index { .. }
        )
    }

    /// Returns the expression printed first, e.g. `f` in `f().x + 1`.
    pub fn leftmost(&self) -> &Expr {
        let mut e = self;
        loop {
            match &e.kind {
                ExprKind::Call { callee, .. } => e = callee,
                ExprKind::Member { object, .. } | ExprKind::Index { object, .. } => e = object,
                ExprKind::Binary { left, .. } => e = left,
                ExprKind::Assign { target, .. } => e = target,
                ExprKind::Conditional { test, .. } => e = test,
                _ => return e,
            }
        }
    }

    /// Name of a plain identifier expression.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident { name } => Some(name.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExprKind {
    Literal {
        value: Literal,
    },

    /// Variable reference, also used for `this` and `undefined`.
    Ident {
        name: String,
    },

    /// `[a, b, ...]`
    Array {
        items: Vec<Expr>,
    },

    /// `{ key: value, ... }`, properties kept in source order.
    Object {
        properties: Vec<Property>,
    },

    /// `obj.prop`
    Member {
        object: Box<Expr>,
        property: String,
    },

    /// `obj[idx]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },

    /// `callee(args...)`
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },

    /// `new callee(args...)`
    New {
        callee: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `target = value`
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },

    /// `test ? consequent : alternate`
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },

    /// `function name?(params) { body }`
    Function {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        params: Vec<String>,
        body: Block,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: Expr,
}
