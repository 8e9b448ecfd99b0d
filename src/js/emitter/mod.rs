pub mod errors;
pub mod printer;
pub mod strings;

pub use printer::{emit_block, emit_program, EmitResult};
