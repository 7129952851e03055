use std::fmt::Display;

use bimap::BiMap;
use lazy_static::lazy_static;

lazy_static! {
    static ref KIND_OPCODE_BIMAP: BiMap<InstructionKind, usize> = BiMap::from_iter([
        (InstructionKind::Nop, 0),
        (InstructionKind::Load, 1),
        (InstructionKind::LoadI, 2),
        (InstructionKind::Store, 3),
        (InstructionKind::Cpy, 4),
        (InstructionKind::Add, 5),
        (InstructionKind::AddF, 6),
        (InstructionKind::Or, 7),
        (InstructionKind::And, 8),
        (InstructionKind::Xor, 9),
        (InstructionKind::Ror, 10),
        (InstructionKind::JmpEq, 11),
        (InstructionKind::Halt, 12),
        (InstructionKind::JmpGt, 13),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Nop,

    Load,
    LoadI,
    Store,
    Cpy,

    Add,
    AddF,

    Or,
    And,
    Xor,
    Ror,

    JmpEq,
    Halt,
    JmpGt,
}

/// Which bit fields of the instruction word an instruction kind reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionFormat {
    /// No operands.
    None,
    /// Register A and an 8-bit immediate (or address) in bits 7..0.
    RegImm,
    /// Register A and register C, bits 7..4 are ignored.
    RegReg,
    /// Register A, register B and register C.
    RegRegReg,
    /// Register A and a 4-bit count in bits 3..0.
    RegCount,
}

impl InstructionKind {
    pub fn from_opcode(opcode: usize) -> Option<Self> {
        KIND_OPCODE_BIMAP.get_by_right(&opcode).copied()
    }

    pub fn opcode(&self) -> usize {
        *KIND_OPCODE_BIMAP
            .get_by_left(self)
            .expect("No opcode mapping for instruction kind")
    }

    pub fn format(&self) -> InstructionFormat {
        match self {
            Self::Nop | Self::Halt => InstructionFormat::None,
            Self::Load | Self::LoadI | Self::Store | Self::JmpEq | Self::JmpGt => {
                InstructionFormat::RegImm
            }
            Self::Cpy => InstructionFormat::RegReg,
            Self::Add | Self::AddF | Self::Or | Self::And | Self::Xor => {
                InstructionFormat::RegRegReg
            }
            Self::Ror => InstructionFormat::RegCount,
        }
    }

    pub fn has_reg_a(&self) -> bool {
        self.format() != InstructionFormat::None
    }

    pub fn has_reg_b(&self) -> bool {
        self.format() == InstructionFormat::RegRegReg
    }

    pub fn has_reg_c(&self) -> bool {
        matches!(
            self.format(),
            InstructionFormat::RegReg | InstructionFormat::RegRegReg
        )
    }

    /// Largest immediate the kind can encode, if it takes one.
    pub fn immediate_max(&self) -> Option<usize> {
        match self.format() {
            InstructionFormat::RegImm => Some(0xFF),
            InstructionFormat::RegCount => Some(crate::NIBBLE_MAX),
            _ => None,
        }
    }
}

impl Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Nop => "nop",
            Self::Load => "load",
            Self::LoadI => "loadi",
            Self::Store => "store",
            Self::Cpy => "cpy",
            Self::Add => "add",
            Self::AddF => "addf",
            Self::Or => "or",
            Self::And => "and",
            Self::Xor => "xor",
            Self::Ror => "ror",
            Self::JmpEq => "jeq",
            Self::Halt => "halt",
            Self::JmpGt => "jgt",
        })
    }
}
