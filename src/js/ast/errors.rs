use std::fmt;

use crate::js::ast::position::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// A statement slot handed to a block constructor was empty.
    NullStatement { index: usize, pos: Position },
}

impl AstError {
    pub fn pos(&self) -> Position {
        match *self {
            AstError::NullStatement { pos, .. } => pos,
        }
    }
}

impl fmt::Display for AstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstError::NullStatement { index, pos } => write!(
                f,
                "Statement {} of block is null, at {}",
                index, pos
            ),
        }
    }
}

impl std::error::Error for AstError {}
