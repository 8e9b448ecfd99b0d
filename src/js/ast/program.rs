use std::{fs, io::ErrorKind};

use serde::{Deserialize, Serialize};

use crate::js::ast::{
    block::{Block, BlockKind},
    errors::AstError,
    position::Position,
    stmt::Stmt,
};

/// A compilation unit. The root body is a virtual block: the global scope has no braces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProgram", into = "RawProgram")]
pub struct Program {
    pub body: Block,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self {
            body: Block::new_virtual(stmts, Position::UNKNOWN),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawProgram {
    body: Vec<Option<Stmt>>,
}

impl TryFrom<RawProgram> for Program {
    type Error = AstError;

    fn try_from(raw: RawProgram) -> Result<Self, Self::Error> {
        let body = Block::try_from_slots(BlockKind::Virtual, raw.body, Position::UNKNOWN)?;
        Ok(Program { body })
    }
}

impl From<Program> for RawProgram {
    fn from(program: Program) -> Self {
        RawProgram {
            body: program.body.into_stmts().into_iter().map(Some).collect(),
        }
    }
}

pub fn parse_program(source: &str) -> Result<Program, String> {
    serde_json::from_str(source).map_err(|e| format!("Invalid program: {}", e))
}

pub fn load_program(path: &str) -> Result<Program, String> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            format!("Input file '{}' not found.", path)
        } else {
            format!("Failed to read input file '{}': {}", path, e)
        }
    })?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse program '{}': {}", path, e))
}
