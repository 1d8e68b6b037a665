
use emu_lib::io::{Console, Ram};
use emu_lib::{Bus, Cpu};
use image::Image;

use std::process::exit;

use clap::Parser;

/// Accumulator-machine emulator: load a machine-code image and run it.
#[derive(Parser)]
struct Args {
    /// Machine-code image file
    #[arg(short = 'i', long = "ifile")]
    input: String,

    /// Words of RAM at address 0
    #[arg(long, default_value_t = 4096)]
    ram: usize,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let text = std::fs::read_to_string(&args.input).unwrap_or_else(|e| {
        eprintln!("emu_cli: {}: {e}", args.input);
        exit(2);
    });
    let image = Image::read_from(text.as_bytes()).unwrap_or_else(|e| {
        eprintln!("emu_cli: {e}");
        exit(2);
    });

    let mut bus = Bus::new();
    bus.register_device(Box::new(Ram::new(0, args.ram)));
    bus.register_device(Box::new(Console::new_to_stdio()));

    let mut cpu = Cpu::new(bus);
    cpu.load_image(&image);
    if let Err(e) = cpu.run() {
        eprintln!("emu_cli: {e}");
        exit(1);
    }
}
