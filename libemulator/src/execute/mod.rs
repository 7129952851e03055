use libq8isa::{instruction::Instruction, Word};
use log::{debug, info, log_enabled, trace, Level};

use crate::Emulator;

mod handlers;
pub mod table;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteStatus {
    Normal,
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub executed: usize,
    pub halted: bool,
}

impl Emulator {
    /// Decodes and executes a single instruction word. Never fails: unassigned opcodes do nothing.
    pub fn execute(&mut self, word: Word) -> ExecuteStatus {
        self.ir = word;

        if log_enabled!(Level::Trace) {
            match Instruction::deassemble_instruction_word(word) {
                Ok(instruction) => trace!("{:02X}: {:04X} {}", self.pc, word, instruction),
                Err(e) => trace!("{:02X}: {:04X} <{}>", self.pc, word, e),
            }
        }

        let status = self
            .opcode_table
            .dispatch(word, &mut self.reg_file, &mut self.memory);

        if status == ExecuteStatus::Halted {
            info!("Halted by {:04X}", word);
        }

        status
    }

    /// Executes the words in order, stopping after the first one that halts.
    pub fn execute_all<I>(&mut self, words: I) -> RunSummary
    where
        I: IntoIterator<Item = Word>,
    {
        let mut summary = RunSummary::default();

        for word in words {
            summary.executed += 1;

            if self.execute(word) == ExecuteStatus::Halted {
                summary.halted = true;
                break;
            }
        }

        debug!(
            "Executed {} instructions{}",
            summary.executed,
            if summary.halted { " (halted)" } else { "" }
        );

        summary
    }
}
