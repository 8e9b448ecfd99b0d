use std::cmp::Ordering;
use std::fmt;

use crate::js::ast::position::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintError {
    pub pos: Position,
    pub rule: &'static str,
    pub message: String,
}

impl LintError {
    #[inline]
    pub fn new(pos: Position, rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            pos,
            rule,
            message: message.into(),
        }
    }
}

impl Ord for LintError {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.pos.line, self.pos.column)
            .cmp(&(other.pos.line, other.pos.column))
            .then_with(|| self.message.cmp(&other.message))
            .then_with(|| self.rule.cmp(other.rule))
    }
}

impl PartialOrd for LintError {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.pos, self.rule, self.message)
    }
}
