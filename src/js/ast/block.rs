use serde::{Deserialize, Serialize};

use crate::js::ast::{errors::AstError, node::HasPos, position::Position, stmt::Stmt};

/// Whether a block introduces its own braces and lexical scope when emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// `{ ... }`, a new lexical scope.
    #[default]
    Scoped,
    /// A grouping only: its statements are emitted into the surrounding scope.
    Virtual,
}

/// An ordered list of statements; order is execution order.
///
/// The kind is fixed at construction. Every traversal treats both kinds the
/// same; only the emitter and scope-aware lints look at [`Block::is_virtual`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub pos: Position, // position of the opening brace or start of block
    kind: BlockKind,
}

impl Block {
    /// A scoped block.
    #[inline]
    pub fn new(stmts: Vec<Stmt>, pos: Position) -> Self {
        Self::with_kind(BlockKind::Scoped, stmts, pos)
    }

    /// A virtual block: spliced into the parent scope on output.
    #[inline]
    pub fn new_virtual(stmts: Vec<Stmt>, pos: Position) -> Self {
        Self::with_kind(BlockKind::Virtual, stmts, pos)
    }

    #[inline]
    pub fn with_kind(kind: BlockKind, stmts: Vec<Stmt>, pos: Position) -> Self {
        Self { stmts, pos, kind }
    }

    /// Builds a block from statement slots as handed over by a lowering stage.
    ///
    /// Fails on the first empty slot; nothing is built in that case.
    pub fn try_from_slots(
        kind: BlockKind,
        slots: Vec<Option<Stmt>>,
        pos: Position,
    ) -> Result<Self, AstError> {
        let mut stmts = Vec::with_capacity(slots.len());
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(stmt) => stmts.push(stmt),
                None => return Err(AstError::NullStatement { index, pos }),
            }
        }
        Ok(Self::with_kind(kind, stmts, pos))
    }

    #[inline]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.kind == BlockKind::Virtual
    }

    /// Should an emitter open braces and a new scope for this block?
    #[inline]
    pub fn opens_scope(&self) -> bool {
        !self.is_virtual()
    }

    #[inline]
    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.stmts.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    #[inline]
    pub fn push(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }

    /// Inserts at `index`; panics if `index > len`, like `Vec::insert`.
    #[inline]
    pub fn insert(&mut self, index: usize, stmt: Stmt) {
        self.stmts.insert(index, stmt);
    }

    /// Removes the statement at `index`, or returns `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<Stmt> {
        if index < self.stmts.len() {
            Some(self.stmts.remove(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn into_stmts(self) -> Vec<Stmt> {
        self.stmts
    }
}

impl HasPos for Block {
    #[inline]
    fn pos(&self) -> Position {
        self.pos
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Stmt;
    type IntoIter = std::slice::Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.stmts.iter()
    }
}

/// Wire form of a block: statement slots may be `null` and are checked on the way in.
#[derive(Serialize, Deserialize)]
struct RawBlock {
    #[serde(default)]
    kind: BlockKind,
    stmts: Vec<Option<Stmt>>,
    #[serde(default, skip_serializing_if = "Position::is_unknown")]
    pos: Position,
}

impl TryFrom<RawBlock> for Block {
    type Error = AstError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Block::try_from_slots(raw.kind, raw.stmts, raw.pos)
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        RawBlock {
            kind: block.kind,
            stmts: block.stmts.into_iter().map(Some).collect(),
            pos: block.pos,
        }
    }
}
