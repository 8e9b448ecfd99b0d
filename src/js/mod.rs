pub mod ast;
pub mod emitter;
pub mod pipeline;
pub mod preprocess;
