
use crate::Bus;
use common::asm::{DecodeError, Instr, Opcode};
use common::constants::{INPUT_PORT, OPERAND_MASK, OUTPUT_PORT, SIGN_BIT};
use image::Image;

use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CpuError {
    #[error(transparent)]
    IllegalOpcode(#[from] DecodeError),
}

/// The fetch-decode-execute engine. Owns the bus; all memory and port
/// traffic goes through it.
pub struct Cpu {
    acc: u16,
    pc: u16,
    ir: u16,
    z_flag: bool,
    p_flag: bool,
    active: bool,
    bus: Bus,
}

impl Cpu {
    pub fn new(bus: Bus) -> Cpu {
        Cpu {
            acc: 0,
            pc: 0,
            ir: 0,
            z_flag: true,
            p_flag: true,
            active: true,
            bus,
        }
    }

    pub fn acc(&self) -> u16 {
        self.acc
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc & OPERAND_MASK;
    }

    pub fn zero(&self) -> bool {
        self.z_flag
    }

    pub fn positive(&self) -> bool {
        self.p_flag
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// One bus write per image record.
    pub fn load_image(&mut self, image: &Image) {
        for &(addr, word) in &image.records {
            self.bus.write(addr, word);
        }
    }

    // Every accumulator write recomputes the derived flags. Positive is
    // a test of the top bit, not a signed-magnitude comparison.
    fn set_acc(&mut self, value: u16) {
        self.z_flag = value == 0;
        self.p_flag = value & SIGN_BIT == 0;
        self.acc = value;
    }

    // Memory-space read. Addresses wrap at the 12-bit operand space;
    // unwired memory reads as 0, which decodes to hlt.
    fn fetch(&mut self, address: u16) -> u16 {
        self.bus.read(address & OPERAND_MASK).unwrap_or(0)
    }

    /// A single instruction cycle. Calling `step` after a halt is a no-op.
    pub fn step(&mut self) -> Result<(), CpuError> {
        if !self.active {
            return Ok(());
        }

        let at = self.pc;
        self.ir = self.fetch(at);
        self.pc = (self.pc + 1) & OPERAND_MASK;
        let instr = Instr::decode(self.ir)?;
        debug!("PC {at:#05x}: {instr}");
        self.execute(instr);
        Ok(())
    }

    /// Loop `step` until a halt.
    pub fn run(&mut self) -> Result<(), CpuError> {
        while self.active {
            self.step()?;
        }
        Ok(())
    }

    pub fn run_at(&mut self, pc: u16) -> Result<(), CpuError> {
        self.set_pc(pc);
        self.run()
    }

    fn execute(&mut self, instr: Instr) {
        let operand = instr.operand;
        match instr.op {
            Opcode::Hlt => self.active = false,
            Opcode::Lda => {
                let val = self.fetch(operand);
                self.set_acc(val);
            }
            Opcode::Sta => self.bus.write(operand, self.acc),
            Opcode::Add => {
                let val = self.fetch(operand);
                self.set_acc(self.acc.wrapping_add(val));
            }
            Opcode::Sub => {
                let val = self.fetch(operand);
                self.set_acc(self.acc.wrapping_sub(val));
            }
            Opcode::And => {
                let val = self.fetch(operand);
                self.set_acc(self.acc & val);
            }
            Opcode::Or => {
                let val = self.fetch(operand);
                self.set_acc(self.acc | val);
            }
            Opcode::Xor => {
                let val = self.fetch(operand);
                self.set_acc(self.acc ^ val);
            }
            Opcode::Not => self.set_acc(!self.acc),
            Opcode::Shl => self.set_acc(self.acc << 1),
            Opcode::Shr => self.set_acc(self.acc >> 1),
            Opcode::Bra => self.set_pc(operand),
            Opcode::Brp => {
                if self.p_flag {
                    self.set_pc(operand);
                }
            }
            Opcode::Brz => {
                if self.z_flag {
                    self.set_pc(operand);
                }
            }
            // The port addresses are fixed by hardware convention; the
            // operand field plays no part in either transfer.
            Opcode::Inp => {
                self.bus.set_io_request();
                let byte = self.bus.read(INPUT_PORT).unwrap_or(0) & 0xff;
                self.bus.clear_io_request();
                self.set_acc(byte);
            }
            Opcode::Out => {
                self.bus.set_io_request();
                self.bus.write(OUTPUT_PORT, self.acc & 0xff);
                self.bus.clear_io_request();
            }
        }
    }
}
