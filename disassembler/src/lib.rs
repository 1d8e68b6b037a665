
use common::asm::Instr;
use image::Image;

use std::fmt;

/// One disassembled record. `interp` is `None` for a word whose opcode
/// is outside the table (unreachable with the full 4-bit table, but a
/// partial table must render the raw word rather than misdecode).
pub struct Disassembled {
    pub addr: u16,
    pub word: u16,
    pub interp: Option<Instr>,
}

impl fmt::Display for Disassembled {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Addresses are rendered literally, never as recovered labels;
        // label identity is not preserved in encoded form.
        match &self.interp {
            Some(instr) => write!(f, "{:04}\t\t {}", self.addr, instr),
            None => write!(f, "{:04}\t\t {:#06x}", self.addr, self.word),
        }
    }
}

pub fn disassemble_word(addr: u16, word: u16) -> Disassembled {
    Disassembled { addr, word, interp: Instr::decode(word).ok() }
}

pub fn disassemble(image: &Image) -> Vec<Disassembled> {
    image
        .records
        .iter()
        .map(|&(addr, word)| disassemble_word(addr, word))
        .collect()
}
