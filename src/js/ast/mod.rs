pub mod binop;
pub mod block;
pub mod errors;
pub mod expr;
pub mod literal;
pub mod node;
pub mod position;
pub mod program;
pub mod stmt;
pub mod visitor;
