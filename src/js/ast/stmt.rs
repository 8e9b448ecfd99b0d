use serde::{Deserialize, Serialize};

use crate::js::ast::{block::Block, expr::Expr, node::Located};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn keyword(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }

    /// `let` and `const` are block scoped.
    pub fn is_lexical(self) -> bool {
        !matches!(self, VarKind::Var)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StmtKind {
    /// Nested block, scoped or virtual.
    Block { block: Block },

    /// `var|let|const name = <expr>?;`
    Var {
        kind: VarKind,
        name: String,
        #[serde(default)]
        init: Option<Expr>,
    },

    /// Standalone expression statement.
    Expr { expr: Expr },

    /// `return <expr>?;`
    Return {
        #[serde(default)]
        value: Option<Expr>,
    },

    /// `if (cond) { then_block } else { else_block? }`
    If {
        condition: Expr,
        then_block: Block,
        #[serde(default)]
        else_block: Option<Block>,
    },

    While { condition: Expr, body: Block },

    DoWhile { body: Block, condition: Expr },

    /// `for (init; condition; increment) { body }`
    For {
        /// `var` declaration or expression statement
        #[serde(default)]
        init: Option<Box<Stmt>>,
        #[serde(default)]
        condition: Option<Expr>,
        #[serde(default)]
        increment: Option<Expr>,
        body: Block,
    },

    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },

    /// Function declaration.
    Function {
        name: String,
        #[serde(default)]
        params: Vec<String>,
        body: Block,
    },

    Throw { value: Expr },

    Try {
        block: Block,
        #[serde(default)]
        handler: Option<CatchClause>,
        #[serde(default)]
        finalizer: Option<Block>,
    },

    Labeled { label: String, body: Box<Stmt> },

    Break {
        #[serde(default)]
        label: Option<String>,
    },

    Continue {
        #[serde(default)]
        label: Option<String>,
    },

    Debugger,

    Empty,
}

/// `case test:` or `default:` when `test` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    #[serde(default)]
    pub test: Option<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    #[serde(default)]
    pub param: Option<String>,
    pub body: Block,
}

pub type Stmt = Located<StmtKind>;

impl Stmt {
    /// Wraps a block as a statement at the block's position.
    pub fn block(block: Block) -> Self {
        let pos = block.pos;
        Located::new(StmtKind::Block { block }, pos)
    }

    pub fn is_loop(&self) -> bool {
        matches!(
            self.kind,
            StmtKind::While { .. } | StmtKind::DoWhile { .. } | StmtKind::For { .. }
        )
    }

    /// The statement under any number of labels, e.g. the loop in `a: b: while (..)`.
    pub fn unlabeled(&self) -> &Stmt {
        let mut s = self;
        while let StmtKind::Labeled { body, .. } = &s.kind {
            s = body;
        }
        s
    }
}
