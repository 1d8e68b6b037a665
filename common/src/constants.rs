
pub const WORD_BITS: u32 = 16;
pub const OPCODE_BITS: u32 = 4;
pub const OPERAND_BITS: u32 = WORD_BITS - OPCODE_BITS;

pub const WORD_MASK: u16 = 0xffff;
pub const OPERAND_MASK: u16 = (1u16 << OPERAND_BITS) - 1;
pub const SIGN_BIT: u16 = 1u16 << (WORD_BITS - 1);

// The io-request flag narrows addressing to a 256-entry port space
// layered over the same physical lines as the memory space.
pub const IO_PORT_MASK: u16 = 0xff;
pub const INPUT_PORT: u16 = 0xfe;
pub const OUTPUT_PORT: u16 = 0xff;
