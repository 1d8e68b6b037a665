pub mod assembler;
pub mod ir;

pub use assembler::{AsmError, Program, assemble};
