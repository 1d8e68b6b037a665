
use crate::bus::BusDevice;
use common::constants::{INPUT_PORT, OUTPUT_PORT};

use std::collections::VecDeque;
use std::io::{Read, Write, stdin, stdout};
use std::sync::{Arc, Mutex};

use log::warn;

/// Byte transport behind the console. Swapped out in tests so programs
/// can be driven without a real terminal.
pub trait Channel: Send + Sync {
    fn put_byte(&self, val: u8);

    /// Blocks until a byte is available; `None` on end of input. The CPU
    /// treats this as an ordinary, possibly slow, bus transaction.
    fn get_byte(&self) -> Option<u8>;
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Default, Clone, Copy)]
struct StdIo();

impl Channel for StdIo {
    fn put_byte(&self, val: u8) {
        let mut out = stdout().lock();
        out.write_all(&[val]).unwrap();
        out.flush().unwrap();
    }

    fn get_byte(&self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match stdin().lock().read_exact(&mut buf) {
            Ok(()) => Some(buf[0]),
            Err(_) => None, // EOF
        }
    }
}

const STDIO: StdIo = StdIo();

////////////////////////////////////////////////////////////////////////////////

/// In-memory channel for tests: input is queued up front, output is
/// captured for inspection.
#[derive(Default)]
pub struct PipeChannel {
    in_buf: Mutex<VecDeque<u8>>,
    out_buf: Mutex<VecDeque<u8>>,
}

impl PipeChannel {
    pub fn push_input(&self, val: u8) {
        self.in_buf.lock().unwrap().push_back(val);
    }

    pub fn write_input(&self, vals: &[u8]) {
        for val in vals {
            self.push_input(*val);
        }
    }

    pub fn take_output(&self) -> VecDeque<u8> {
        std::mem::take(&mut self.out_buf.lock().unwrap())
    }

    pub fn pop_output(&self) -> Option<u8> {
        self.out_buf.lock().unwrap().pop_front()
    }
}

impl Channel for PipeChannel {
    fn put_byte(&self, val: u8) {
        self.out_buf.lock().unwrap().push_back(val);
    }

    fn get_byte(&self) -> Option<u8> {
        self.in_buf.lock().unwrap().pop_front()
    }
}

////////////////////////////////////////////////////////////////////////////////

/// The console device: input port 0xfe, output port 0xff, port space only.
pub struct Console {
    channel: Arc<dyn Channel>,
}

impl Default for Console {
    fn default() -> Self {
        Console::new_to_stdio()
    }
}

impl Console {
    pub fn new(channel: Arc<dyn Channel>) -> Console {
        Console { channel }
    }

    pub fn new_to_stdio() -> Console {
        Console::new(Arc::new(STDIO))
    }
}

impl BusDevice for Console {
    fn should_respond(&self, address: u16, is_io_request: bool) -> bool {
        is_io_request && (address == INPUT_PORT || address == OUTPUT_PORT)
    }

    fn read(&mut self, address: u16) -> Option<u16> {
        if address != INPUT_PORT {
            warn!("Console: read of output port {address:#04x}");
            return None;
        }
        self.channel.get_byte().map(u16::from)
    }

    fn write(&mut self, address: u16, data: u16) {
        if address == OUTPUT_PORT {
            self.channel.put_byte(data as u8);
        } else {
            warn!("Console: write of {data:#06x} to input port {address:#04x} ignored");
        }
    }
}
