
use common::asm::Opcode;

/// An operand as tokenized, before the fixup pass. Numeric operands are
/// held wide so over-range values surface as `EncodingOverflow` at
/// packing time instead of being mistaken for symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOperand {
    Val(u32),
    Symbol(String),
}

/// One instruction awaiting the fixup pass.
#[derive(Debug, Clone)]
pub struct PendingIns {
    pub addr: u16,
    pub op: Opcode,
    pub operand: RawOperand,
    pub line: usize,
}
