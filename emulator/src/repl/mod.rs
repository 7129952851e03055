use std::io::{self, BufRead, Write};

use libq8emulator::{memory::Storage, Emulator, ExecuteStatus};
use libq8isa::{instruction::Instruction, Byte};
use thiserror::Error;

use crate::{
    command::{Command, CommandError},
    display,
};


const HELP: &str = "\
x <word>              execute one instruction word (4 hex digits)
m [addr] [len]        dump memory from hex addr, len bytes (decimal)
r                     dump registers
set r <index> <byte>  set register (decimal index, hex byte)
set m <addr> <byte>   set memory byte (hex addr, hex byte)
dis <word>            show the instruction a word decodes to
h, help               show this help
q                     quit
";

#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("{0} out of range (size {1})")]
    OutOfRange(usize, usize),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads and runs commands until `q` or the end of input.
pub fn run<R, W>(emulator: &mut Emulator, input: &mut R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    while let Some(command) = Command::prompt(input, output)? {
        match execute_command(&command, emulator, output) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(ReplError::Io(e)) => return Err(e),
            Err(e) => writeln!(output, "!> {}", e)?,
        }
    }

    Ok(())
}

pub fn execute_command<W>(
    command: &Command,
    emulator: &mut Emulator,
    output: &mut W,
) -> Result<Flow, ReplError>
where
    W: Write,
{
    let mut args = command.args();

    // Empty line
    let Some(name) = args.next_optional() else {
        return Ok(Flow::Continue);
    };

    match name {
        "x" => {
            let word = args.next_word()?;
            args.finish()?;

            let status = emulator.execute(word);

            let register_changes = display::register_patches(emulator.reg_file.pop_patches());
            let memory_changes = display::memory_patches(emulator.memory.pop_patches());
            write!(output, "{}{}", register_changes, memory_changes)?;

            if status == ExecuteStatus::Halted {
                writeln!(output, "Halted")?;
            }
        }
        "m" => {
            let begin = args.next_byte_optional()?.unwrap_or(0) as usize;
            let len = args
                .next_parsed_optional()?
                .unwrap_or(emulator.memory.size());
            args.finish()?;

            write!(output, "{}", display::memory_dump(&emulator.memory, begin, len))?;
        }
        "r" => {
            args.finish()?;
            write!(output, "{}", display::register_dump(&emulator.reg_file))?;
        }
        "set" => {
            let target = args.next()?;

            match target {
                "r" => {
                    let index: usize = args.next_parsed()?;
                    let value = args.next_byte()?;
                    args.finish()?;

                    poke(&mut emulator.reg_file, index, value)?;
                    emulator.reg_file.clear_patches();
                }
                "m" => {
                    let addr = args.next_byte()? as usize;
                    let value = args.next_byte()?;
                    args.finish()?;

                    poke(&mut emulator.memory, addr, value)?;
                    emulator.memory.clear_patches();
                }
                other => {
                    return Err(CommandError::UnknownCommand(format!("set {}", other)).into())
                }
            }
        }
        "dis" => {
            let word = args.next_word()?;
            args.finish()?;

            match Instruction::deassemble_instruction_word(word) {
                Ok(instruction) => writeln!(output, "{}", instruction)?,
                Err(e) => writeln!(output, "<{}>", e)?,
            }
        }
        "h" | "help" => write!(output, "{}", HELP)?,
        "q" => return Ok(Flow::Quit),
        other => return Err(CommandError::UnknownCommand(other.to_string()).into()),
    }

    Ok(Flow::Continue)
}

fn poke<S>(storage: &mut S, addr: usize, value: Byte) -> Result<(), ReplError>
where
    S: Storage,
{
    if addr >= storage.size() {
        return Err(ReplError::OutOfRange(addr, storage.size()));
    }

    storage.store(addr, value);
    Ok(())
}
