use std::fmt::Display;

use libq8isa::{
    instruction::{Instruction, InstructionDeassemblyError},
    parse_word, Word, WordParseError,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deassembly {
    Instruction(Word, Instruction),
    Unassigned(Word, InstructionDeassemblyError),
    Invalid(WordParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeassembledLine<'a> {
    pub line: usize,
    pub token: &'a str,
    pub deassembly: Deassembly,
}

/// Deassembles program text line by line. Blank lines and `#` comments are skipped, the same way
/// the emulator's loader skips them.
pub struct Deassembler<I> {
    lines: I,
    line: usize,
}

impl<'a, I> Deassembler<I>
where
    I: Iterator<Item = &'a str>,
{
    pub fn new(lines: I) -> Self {
        Self { lines, line: 0 }
    }

    pub fn deassemble(self) -> Vec<DeassembledLine<'a>> {
        self.collect()
    }

    pub fn deassemble_text(self) -> String {
        self.map(|line| format!("{}\n", line)).collect()
    }
}

impl<'a, I> Iterator for Deassembler<I>
where
    I: Iterator<Item = &'a str>,
{
    type Item = DeassembledLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.lines.next()?;
            self.line += 1;

            let token = text.trim();
            if token.is_empty() || token.starts_with('#') {
                continue;
            }

            return Some(DeassembledLine {
                line: self.line,
                token,
                deassembly: deassemble_token(token),
            });
        }
    }
}

pub fn deassemble_token(token: &str) -> Deassembly {
    match parse_word(token) {
        Ok(word) => match Instruction::deassemble_instruction_word(word) {
            Ok(instruction) => Deassembly::Instruction(word, instruction),
            Err(e) => Deassembly::Unassigned(word, e),
        },
        Err(e) => Deassembly::Invalid(e),
    }
}

impl Display for DeassembledLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.deassembly {
            Deassembly::Instruction(word, instruction) => {
                write!(f, "{:>4}: {:04X} {}", self.line, word, instruction)
            }
            Deassembly::Unassigned(word, e) => write!(f, "{:>4}: {:04X} <{}>", self.line, word, e),
            Deassembly::Invalid(e) => write!(f, "{:>4}: {} <{}>", self.line, self.token, e),
        }
    }
}
