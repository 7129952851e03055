use std::fmt::Display;

use kind::{InstructionFormat, InstructionKind};
use thiserror::Error;

use crate::{Immediate, Register, Word};

pub mod assembler;
pub mod kind;


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Missing register {0}")]
    MissingRegister(char),

    #[error("Missing immediate")]
    MissingImmediate,

    #[error("Register %{0} out of range")]
    RegisterOutOfRange(Register),

    #[error("Immediate {value} exceeds {max}")]
    ImmediateOutOfRange { value: Immediate, max: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InstructionDeassemblyError {
    #[error("Unassigned opcode {0}")]
    UnassignedOpcode(usize),
}

/// A decoded instruction word. Register fields are named after their bit position in the word:
/// `reg_a` is bits 11..8, `reg_b` bits 7..4 and `reg_c` bits 3..0. The immediate holds either the
/// 8-bit value in bits 7..0 or, for rotates, the 4-bit count in bits 3..0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub reg_a: Option<Register>,
    pub reg_b: Option<Register>,
    pub reg_c: Option<Register>,
    pub immediate: Option<Immediate>,
}

impl Instruction {
    pub const fn new(kind: InstructionKind) -> Self {
        Self {
            kind,
            reg_a: None,
            reg_b: None,
            reg_c: None,
            immediate: None,
        }
    }

    pub const fn with_reg_a(mut self, reg_a: Register) -> Self {
        self.reg_a = Some(reg_a);
        self
    }

    pub const fn with_reg_b(mut self, reg_b: Register) -> Self {
        self.reg_b = Some(reg_b);
        self
    }

    pub const fn with_reg_c(mut self, reg_c: Register) -> Self {
        self.reg_c = Some(reg_c);
        self
    }

    pub const fn with_immediate(mut self, immediate: Immediate) -> Self {
        self.immediate = Some(immediate);
        self
    }

    pub fn assemble(self) -> Result<Word, AssemblyError> {
        let kind = self.kind;

        let reg_a = Self::register_field(kind.has_reg_a(), self.reg_a, 'A')?;
        let reg_b = Self::register_field(kind.has_reg_b(), self.reg_b, 'B')?;
        let reg_c = Self::register_field(kind.has_reg_c(), self.reg_c, 'C')?;

        let immediate = match kind.immediate_max() {
            Some(max) => {
                let immediate = self.immediate.ok_or(AssemblyError::MissingImmediate)?;
                if immediate as usize > max {
                    return Err(AssemblyError::ImmediateOutOfRange {
                        value: immediate,
                        max,
                    });
                }
                immediate as usize
            }
            None => 0,
        };

        Ok((kind.opcode() << 12 | reg_a << 8 | reg_b << 4 | reg_c | immediate) as Word)
    }

    pub fn deassemble_instruction_word(
        instruction: Word,
    ) -> Result<Self, InstructionDeassemblyError> {
        let opcode = crate::opcode(instruction);

        let kind = InstructionKind::from_opcode(opcode)
            .ok_or(InstructionDeassemblyError::UnassignedOpcode(opcode))?;

        let reg_a = crate::reg_a(instruction);
        let reg_b = crate::reg_b(instruction);
        let reg_c = crate::reg_c(instruction);

        let immediate = match kind.format() {
            InstructionFormat::RegImm => Some(crate::immediate(instruction)),
            InstructionFormat::RegCount => Some(reg_c as Immediate),
            _ => None,
        };

        Ok(Self {
            kind,
            reg_a: kind.has_reg_a().then_some(reg_a),
            reg_b: kind.has_reg_b().then_some(reg_b),
            reg_c: kind.has_reg_c().then_some(reg_c),
            immediate,
        })
    }

    fn register_field(
        used: bool,
        register: Option<Register>,
        name: char,
    ) -> Result<usize, AssemblyError> {
        if !used {
            return Ok(0);
        }

        let register = register.ok_or(AssemblyError::MissingRegister(name))?;
        if register > crate::NIBBLE_MAX {
            return Err(AssemblyError::RegisterOutOfRange(register));
        }

        Ok(register)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.kind))?;

        let mut separator = " ";
        let registers = [self.reg_a, self.reg_b, self.reg_c];

        for register in registers.into_iter().flatten() {
            f.write_fmt(format_args!("{}%{}", separator, register))?;
            separator = ", ";
        }

        if let Some(immediate) = self.immediate {
            f.write_fmt(format_args!("{}${:#04X}", separator, immediate))?;
        }

        Ok(())
    }
}
