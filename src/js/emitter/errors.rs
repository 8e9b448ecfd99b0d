use std::fmt;

use crate::js::ast::position::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// `for` initializer that is neither a `var` declaration nor an expression.
    InvalidForInit(Position),
    InvalidAssignmentTarget(Position),
    /// Name, label or parameter that is not a JavaScript identifier.
    InvalidIdentifier(String, Position),
}

impl EmitError {
    pub fn pos(&self) -> Position {
        match *self {
            EmitError::InvalidForInit(pos)
            | EmitError::InvalidAssignmentTarget(pos)
            | EmitError::InvalidIdentifier(_, pos) => pos,
        }
    }
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::InvalidForInit(at) => write!(
                f,
                "'for' initializer must be a declaration or an expression, at {}",
                at
            ),
            EmitError::InvalidAssignmentTarget(at) => {
                write!(f, "Invalid assignment target, at {}", at)
            }
            EmitError::InvalidIdentifier(name, at) => {
                write!(f, "'{}' is not a valid identifier, at {}", name, at)
            }
        }
    }
}

impl std::error::Error for EmitError {}
