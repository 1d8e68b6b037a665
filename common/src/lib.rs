pub mod asm;
pub mod constants;

pub use asm::{DecodeError, Instr, Opcode};
