
use crate::constants::{OPERAND_BITS, OPERAND_MASK};

use std::fmt;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use thiserror::Error;

/// The 16 opcodes of the accumulator machine, one per value of the
/// instruction word's top nibble. Shared by the CPU, the assembler, and
/// the disassembler so encode/decode is a bijection per valid instruction.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum Opcode {
    Hlt = 0x0,
    Lda,
    Sta,
    Add,
    Sub,
    And,
    Or,
    Xor,
    Not,
    Shl,
    Shr,
    Bra,
    Brp,
    Brz,
    Inp,
    Out,
}

pub const NUM_OPCODES: usize = 16;

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Hlt => "hlt",
            Lda => "lda",
            Sta => "sta",
            Add => "add",
            Sub => "sub",
            And => "and",
            Or => "or",
            Xor => "xor",
            Not => "not",
            Shl => "shl",
            Shr => "shr",
            Bra => "bra",
            Brp => "brp",
            Brz => "brz",
            Inp => "inp",
            Out => "out",
        }
    }

    /// Mnemonic lookup. Expects a lowercase token (the assembler
    /// normalizes each source line before tokenizing).
    pub fn from_mnemonic(tok: &str) -> Option<Opcode> {
        (0..NUM_OPCODES as u16)
            .filter_map(Opcode::from_u16)
            .find(|op| op.mnemonic() == tok)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("illegal opcode {0:#x}")]
    IllegalOpcode(u16),
}

/// One decoded instruction word: opcode in the top 4 bits, operand in
/// the bottom 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    pub op: Opcode,
    pub operand: u16,
}

impl Instr {
    pub fn new(op: Opcode, operand: u16) -> Instr {
        assert_eq!(operand & !OPERAND_MASK, 0);
        Instr { op, operand }
    }

    pub fn encode(self) -> u16 {
        (self.op.to_u16().unwrap() << OPERAND_BITS) | (self.operand & OPERAND_MASK)
    }

    /// With the full 4-bit table every word decodes, but a partial table
    /// must surface `IllegalOpcode` rather than misdecode.
    pub fn decode(word: u16) -> Result<Instr, DecodeError> {
        let op = word >> OPERAND_BITS;
        let op = Opcode::from_u16(op).ok_or(DecodeError::IllegalOpcode(op))?;
        Ok(Instr { op, operand: word & OPERAND_MASK })
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} 0x{:X}", self.op.mnemonic().to_uppercase(), self.operand)
    }
}
