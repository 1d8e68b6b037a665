pub mod console;
pub mod ram;

pub use console::{Channel, Console, PipeChannel};
pub use ram::Ram;
