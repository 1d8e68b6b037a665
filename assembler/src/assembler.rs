
use crate::ir::{PendingIns, RawOperand};
use common::asm::{Instr, Opcode};
use common::constants::OPERAND_MASK;
use image::Image;

use std::collections::HashMap;

use log::{trace, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AsmError {
    #[error("line {line}: illegal origin: expected integer, found {found}")]
    IllegalOrigin { line: usize, found: String },

    #[error("line {line}: undefined symbol {name:?}")]
    UndefinedSymbol { line: usize, name: String },

    #[error("line {line}: operand {operand:#x} exceeds the 12-bit operand field")]
    EncodingOverflow { line: usize, operand: u32 },
}

pub struct Program {
    pub image: Image,
    pub symbols: HashMap<String, u16>,
}

pub fn assemble(src: &str) -> Result<Program, AsmError> {
    Assembler::new().assemble(src)
}

/// Splits one lowercased source line into whitespace-delimited tokens.
struct Lexer<'a> {
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Lexer<'a> {
    fn new(line: &'a str) -> Lexer<'a> {
        Lexer { tokens: line.split_whitespace() }
    }

    fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }
}

fn parse_int(tok: &str) -> Option<u32> {
    if let Some(hex) = tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if !tok.is_empty() && tok.chars().all(|c| c.is_ascii_digit()) {
        tok.parse().ok()
    } else {
        None
    }
}

struct Assembler {
    current_address: u16,
    symbols: HashMap<String, u16>,
    pending: Vec<PendingIns>,
}

impl Assembler {
    fn new() -> Assembler {
        Assembler {
            current_address: 0,
            symbols: HashMap::new(),
            pending: Vec::new(),
        }
    }

    fn assemble(mut self, src: &str) -> Result<Program, AsmError> {
        for (line, num) in src.lines().zip(1..) {
            let lowered = line.to_lowercase();
            self.parse_line(&lowered, num)?;
        }
        self.fixup()
    }

    // Token classes, in priority order: label declaration, comment,
    // directive, instruction. Anything else is skipped with a warning.
    fn parse_line(&mut self, line: &str, num: usize) -> Result<(), AsmError> {
        let mut lexer = Lexer::new(line);
        while let Some(tok) = lexer.next_token() {
            if let Some(label) = tok.strip_suffix(':') {
                // A label consumes no address slot. Redeclaration keeps
                // the last definition.
                trace!("line {num}: label {label:?} at {:#05x}", self.current_address);
                self.symbols.insert(label.to_string(), self.current_address);
            } else if tok.starts_with('#') {
                break;
            } else if let Some(directive) = tok.strip_suffix('.') {
                self.directive(directive, &mut lexer, num)?;
                break;
            } else if let Some(op) = Opcode::from_mnemonic(tok) {
                if self.instruction(op, &mut lexer, num) {
                    break;
                }
            } else {
                warn!("line {num}: skipping unrecognized token {tok:?}");
            }
        }
        Ok(())
    }

    fn directive(&mut self, name: &str, lexer: &mut Lexer, num: usize) -> Result<(), AsmError> {
        if name != "org" {
            warn!("line {num}: ignoring unknown directive {name:?}");
            return Ok(());
        }

        let tok = lexer.next_token();
        let addr = tok.and_then(parse_int).and_then(|val| u16::try_from(val).ok());
        match addr {
            Some(addr) => {
                trace!("line {num}: origin set to {addr:#05x}");
                self.current_address = addr;
                Ok(())
            }
            None => Err(AsmError::IllegalOrigin {
                line: num,
                found: tok.unwrap_or("end of line").to_string(),
            }),
        }
    }

    // Returns true when the rest of the line was consumed by a comment.
    fn instruction(&mut self, op: Opcode, lexer: &mut Lexer, num: usize) -> bool {
        let mut comment = false;
        let operand = match lexer.next_token() {
            // Operandless mnemonics (hlt, not, shl, shr) encode a zero field.
            None => {
                comment = true;
                RawOperand::Val(0)
            }
            Some(tok) if tok.starts_with('#') => {
                comment = true;
                RawOperand::Val(0)
            }
            Some(tok) => self.classify_operand(tok),
        };

        self.pending.push(PendingIns {
            addr: self.current_address,
            op,
            operand,
            line: num,
        });
        self.current_address = self.current_address.wrapping_add(1);
        comment
    }

    fn classify_operand(&self, tok: &str) -> RawOperand {
        if let Some(val) = parse_int(tok) {
            RawOperand::Val(val)
        } else if let Some(&addr) = self.symbols.get(tok) {
            // Backward reference: resolved immediately.
            RawOperand::Val(u32::from(addr))
        } else {
            // Forward reference: deferred to the fixup pass.
            RawOperand::Symbol(tok.to_string())
        }
    }

    // Resolves every pending operand against the now-complete symbol
    // table and packs the machine words. Fails without partial output.
    fn fixup(self) -> Result<Program, AsmError> {
        let mut image = Image::new();
        for pending in &self.pending {
            let val = match &pending.operand {
                RawOperand::Val(val) => *val,
                RawOperand::Symbol(name) => match self.symbols.get(name) {
                    Some(&addr) => u32::from(addr),
                    None => {
                        return Err(AsmError::UndefinedSymbol {
                            line: pending.line,
                            name: name.clone(),
                        });
                    }
                },
            };

            if val > u32::from(OPERAND_MASK) {
                return Err(AsmError::EncodingOverflow { line: pending.line, operand: val });
            }

            image.push(pending.addr, Instr::new(pending.op, val as u16).encode());
        }
        Ok(Program { image, symbols: self.symbols })
    }
}
