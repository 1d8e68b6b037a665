
use crate::bus::BusDevice;

use log::trace;

/// A word-addressed memory array. Each instance owns its backing storage;
/// the base address and size are fixed at construction.
pub struct Ram {
    base: u16,
    cells: Vec<u16>,
}

impl Ram {
    pub fn new(base: u16, size: usize) -> Ram {
        Ram { base, cells: vec![0; size] }
    }

    pub fn fill(&mut self, value: u16) {
        self.cells.fill(value);
    }

    fn index(&self, address: u16) -> usize {
        (address - self.base) as usize
    }
}

impl BusDevice for Ram {
    fn should_respond(&self, address: u16, is_io_request: bool) -> bool {
        !is_io_request && address >= self.base && self.index(address) < self.cells.len()
    }

    fn read(&mut self, address: u16) -> Option<u16> {
        self.cells.get(self.index(address)).copied()
    }

    fn write(&mut self, address: u16, data: u16) {
        trace!("Ram: writing {data:#06x} to {address:#06x}");
        let index = self.index(address);
        self.cells[index] = data;
    }
}
