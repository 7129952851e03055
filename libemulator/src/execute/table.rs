use libq8isa::Word;
use log::debug;

use super::{handlers::HANDLERS, ExecuteStatus};
use crate::memory::{MainMemory, RegFile};

/// An instruction implementation. Gets the whole instruction word and picks its own fields.
pub type Handler = fn(Word, &mut RegFile, &mut MainMemory) -> ExecuteStatus;

/// Opcode indexed handlers. Empty slots (opcode 0 and the unassigned 14 and 15) are no-ops.
pub struct OpcodeTable([Option<Handler>; libq8isa::OPCODE_COUNT]);

impl OpcodeTable {
    pub fn new() -> Self {
        let mut handlers: [Option<Handler>; libq8isa::OPCODE_COUNT] =
            [None; libq8isa::OPCODE_COUNT];

        for (kind, handler) in HANDLERS {
            handlers[kind.opcode()] = Some(handler);
        }

        Self(handlers)
    }

    pub fn handler(&self, opcode: usize) -> Option<Handler> {
        self.0.get(opcode).copied().flatten()
    }

    pub fn registered(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(opcode, handler)| handler.map(|_| opcode))
    }

    pub fn dispatch(
        &self,
        word: Word,
        reg_file: &mut RegFile,
        memory: &mut MainMemory,
    ) -> ExecuteStatus {
        let opcode = libq8isa::opcode(word);

        match self.handler(opcode) {
            Some(handler) => handler(word, reg_file, memory),
            None => {
                debug!("No handler for opcode {} ({:04X}), skipping", opcode, word);
                ExecuteStatus::Normal
            }
        }
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new()
    }
}
