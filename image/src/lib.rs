//! Assembled-program file format: one `<decimal address> <decimal word>`
//! record per line. The assembler writes it, the disassembler and the
//! emulator's loader read it back.

use std::io::{BufRead, BufReader, Read, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("malformed record on line {line}: {text:?}")]
    MalformedRecord { line: usize, text: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An ordered sequence of (address, word) pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Image {
    pub records: Vec<(u16, u16)>,
}

impl Image {
    pub fn new() -> Image {
        Default::default()
    }

    pub fn push(&mut self, addr: u16, word: u16) {
        self.records.push((addr, word));
    }

    pub fn read_from(reader: impl Read) -> Result<Image, ImageError> {
        let mut image = Image::new();
        for (line, num) in BufReader::new(reader).lines().zip(1..) {
            let line = line?;
            let malformed = || ImageError::MalformedRecord { line: num, text: line.clone() };

            let mut fields = line.split_whitespace();
            let (Some(addr), Some(word), None) = (fields.next(), fields.next(), fields.next())
            else {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(malformed());
            };

            let addr = addr.parse().map_err(|_| malformed())?;
            let word = word.parse().map_err(|_| malformed())?;
            image.push(addr, word);
        }
        Ok(image)
    }

    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), ImageError> {
        for (addr, word) in &self.records {
            writeln!(writer, "{addr:04} {word}")?;
        }
        Ok(())
    }
}
