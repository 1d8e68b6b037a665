pub mod bus;
pub mod cpu;
pub mod io;

pub use bus::{Bus, BusDevice};
pub use cpu::{Cpu, CpuError};
