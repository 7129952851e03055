pub mod instruction;
pub mod token;

pub use token::{parse_word, WordParseError};

pub type Word = u16;
pub type Byte = u8;
pub type ByteSigned = i8;

pub type Register = usize;
pub type Immediate = Byte;

pub const REGISTER_COUNT: usize = 16;
pub const MEMORY_SIZE: usize = 256;
pub const OPCODE_COUNT: usize = 16;

/// Upper bound (inclusive) of any 4-bit field: opcode, register index or rotate count.
pub const NIBBLE_MAX: usize = 0xF;

pub fn opcode(word: Word) -> usize {
    ((word >> 12) & 0xF) as usize
}

/// Bits 11..8, the destination (or single operand) register.
pub fn reg_a(word: Word) -> Register {
    ((word >> 8) & 0xF) as Register
}

/// Bits 7..4.
pub fn reg_b(word: Word) -> Register {
    ((word >> 4) & 0xF) as Register
}

/// Bits 3..0, also used as the rotate count.
pub fn reg_c(word: Word) -> Register {
    (word & 0xF) as Register
}

/// Bits 7..0, an immediate value or a memory address.
pub fn immediate(word: Word) -> Immediate {
    (word & 0xFF) as Immediate
}
