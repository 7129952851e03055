use super::{AssemblyError, Instruction};
use crate::Word;

pub fn assemble<I>(instructions: I) -> Result<Vec<Word>, AssemblyError>
where
    I: IntoIterator<Item = Instruction>,
{
    instructions
        .into_iter()
        .map(|instruction| instruction.assemble())
        .collect()
}

/// Assembles the instructions into program text, one four digit hex token per line.
pub fn assemble_text<I>(instructions: I) -> Result<String, AssemblyError>
where
    I: IntoIterator<Item = Instruction>,
{
    let words = assemble(instructions)?;

    Ok(words
        .iter()
        .map(|word| format!("{:04X}\n", word))
        .collect())
}
