use serde::{Deserialize, Serialize};

use super::position::Position;

/// Position-carrying wrapper for statement and expression kinds.
///
/// Serialized flat: the kind's fields sit next to an optional `pos` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Located<T> {
    #[serde(flatten)]
    pub kind: T,
    #[serde(default, skip_serializing_if = "Position::is_unknown")]
    pub pos: Position,
}

impl<T> Located<T> {
    #[inline]
    pub fn new(kind: T, pos: Position) -> Self {
        Self { kind, pos }
    }

    /// Wraps a kind that has no source position.
    #[inline]
    pub fn synthetic(kind: T) -> Self {
        Self::new(kind, Position::UNKNOWN)
    }

    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Located<U> {
        Located {
            kind: f(self.kind),
            pos: self.pos,
        }
    }
}

pub trait HasPos {
    fn pos(&self) -> Position;
}

impl<T> HasPos for Located<T> {
    #[inline]
    fn pos(&self) -> Position {
        self.pos
    }
}
