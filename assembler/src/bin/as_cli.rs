
use as_lib::assemble;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;

/// Accumulator-machine assembler.
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Input assembly file
    #[arg(short = 'i', long = "ifile")]
    input: String,

    /// Output image file (defaults to <input>.bin)
    #[arg(short = 'o', long = "ofile")]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let src = std::fs::read_to_string(&args.input).unwrap_or_else(|e| {
        eprintln!("as_cli: {}: {e}", args.input);
        exit(2);
    });

    let prog = assemble(&src).unwrap_or_else(|e| {
        eprintln!("as_cli: {e}");
        exit(1);
    });

    let outname = args
        .output
        .unwrap_or_else(|| Path::new(&args.input).with_extension("bin"));
    let mut out = File::create(&outname).unwrap_or_else(|e| {
        eprintln!("as_cli: {}: {e}", outname.display());
        exit(2);
    });
    prog.image.write_to(&mut out).unwrap_or_else(|e| {
        eprintln!("as_cli: {e}");
        exit(2);
    });

    println!("Assembled {} to {}", args.input, outname.display());
}
