
use common::constants::IO_PORT_MASK;

use log::{trace, warn};

/// The contract every bus-attached peripheral implements. The predicate
/// alone determines address ownership; the bus enforces no exclusivity
/// and holds no address map of its own.
pub trait BusDevice {
    fn should_respond(&self, address: u16, is_io_request: bool) -> bool;
    fn read(&mut self, address: u16) -> Option<u16>;
    fn write(&mut self, address: u16, data: u16);
}

/// Arbitrates a shared address/data path among registered devices.
///
/// Devices are registered once at setup and never removed. Registration
/// order matters: on overlapping ranges a read takes the last matching
/// device's value, while a write fans out to every matching device.
#[derive(Default)]
pub struct Bus {
    devices: Vec<Box<dyn BusDevice>>,
    is_io_request: bool,

    // Latched image of the last transaction driven on the lines.
    address: u16,
    data: Option<u16>,
}

impl Bus {
    pub fn new() -> Bus {
        Default::default()
    }

    pub fn register_device(&mut self, device: Box<dyn BusDevice>) {
        self.devices.push(device);
    }

    pub fn set_io_request(&mut self) {
        self.is_io_request = true;
    }

    pub fn clear_io_request(&mut self) {
        self.is_io_request = false;
    }

    pub fn is_io_request(&self) -> bool {
        self.is_io_request
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn data(&self) -> Option<u16> {
        self.data
    }

    fn effective_address(&self, address: u16) -> u16 {
        if self.is_io_request {
            address & IO_PORT_MASK
        } else {
            address
        }
    }

    /// Returns `None` when no device claims the address; "nothing wired
    /// here" is a deliberate outcome, not a failure.
    pub fn read(&mut self, address: u16) -> Option<u16> {
        let address = self.effective_address(address);
        self.address = address;
        self.data = None;
        for device in &mut self.devices {
            if device.should_respond(address, self.is_io_request) {
                self.data = device.read(address);
            }
        }
        trace!(
            "Bus: read {:?} from {:#06x} (io: {})",
            self.data, address, self.is_io_request
        );
        self.data
    }

    pub fn write(&mut self, address: u16, data: u16) {
        let address = self.effective_address(address);
        self.address = address;
        self.data = Some(data);
        let mut matched = false;
        for device in &mut self.devices {
            if device.should_respond(address, self.is_io_request) {
                device.write(address, data);
                matched = true;
            }
        }
        trace!(
            "Bus: write {:#06x} to {:#06x} (io: {})",
            data, address, self.is_io_request
        );
        if !matched {
            warn!("Bus: write of {data:#06x} to {address:#06x} matched no device");
        }
    }
}
