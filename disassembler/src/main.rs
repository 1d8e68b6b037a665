
use disassembler::disassemble;
use image::Image;

use std::io::Write;
use std::process::exit;

use clap::Parser;

/// Accumulator-machine disassembler.
#[derive(Parser)]
struct Args {
    /// Machine-code image file
    #[arg(short = 'i', long = "ifile")]
    input: String,

    /// Output listing file (defaults to stdout)
    #[arg(short = 'o', long = "ofile")]
    output: Option<String>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let text = std::fs::read_to_string(&args.input).unwrap_or_else(|e| {
        eprintln!("disassembler: {}: {e}", args.input);
        exit(2);
    });
    let image = Image::read_from(text.as_bytes()).unwrap_or_else(|e| {
        eprintln!("disassembler: {e}");
        exit(2);
    });

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(std::fs::File::create(path).unwrap_or_else(|e| {
            eprintln!("disassembler: {path}: {e}");
            exit(2);
        })),
        None => Box::new(std::io::stdout()),
    };

    for dis in disassemble(&image) {
        writeln!(out, "{dis}").unwrap_or_else(|e| {
            eprintln!("disassembler: {e}");
            exit(2);
        });
    }
}
