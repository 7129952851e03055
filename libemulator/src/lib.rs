use execute::table::OpcodeTable;
use libq8isa::{Byte, Register, Word};
use memory::{MainMemory, RegFile, Storage};

pub mod alu;
pub mod execute;
pub mod memory;

pub use execute::{ExecuteStatus, RunSummary};

pub struct Emulator {
    pub memory: MainMemory,
    pub reg_file: RegFile,

    // Neither is read by any instruction. The instruction register holds the last executed word,
    // the program counter is never advanced.
    pub pc: Byte,
    pub ir: Word,

    opcode_table: OpcodeTable,
}

impl Emulator {
    pub fn new() -> Self {
        Self::with_main_memory(MainMemory::new())
    }

    /// Creates an emulator with main memory preloaded from the given image.
    pub fn with_memory(image: Vec<Byte>) -> anyhow::Result<Self> {
        Ok(Self::with_main_memory(MainMemory::new_with_data(image)?))
    }

    fn with_main_memory(memory: MainMemory) -> Self {
        Self {
            memory,
            reg_file: RegFile::new(),
            pc: 0,
            ir: 0,
            opcode_table: OpcodeTable::new(),
        }
    }

    pub fn register(&self, index: Register) -> Byte {
        self.reg_file.read(index)
    }

    pub fn opcode_table(&self) -> &OpcodeTable {
        &self.opcode_table
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
