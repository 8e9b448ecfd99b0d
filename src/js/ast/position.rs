use core::fmt;

use serde::{Deserialize, Serialize};

/// Source position carried by every node; `0:0` means the lowering stage had none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const UNKNOWN: Position = Position { line: 0, column: 0 };

    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "?:?")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}
