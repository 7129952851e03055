use std::io::{self, Write};

use libq8emulator::{Emulator, ExecuteStatus, RunSummary};

use crate::{display, loader::ProgramLine};


/// Runs a loaded program, stopping after the first halt. With `verbose`, every instruction is
/// followed by the registers and memory cells it changed.
pub fn run_program<W>(
    emulator: &mut Emulator,
    program: &[ProgramLine],
    verbose: bool,
    output: &mut W,
) -> io::Result<RunSummary>
where
    W: Write,
{
    let mut summary = RunSummary::default();

    for program_line in program {
        let status = emulator.execute(program_line.word);
        summary.executed += 1;

        let register_changes = emulator.reg_file.pop_patches();
        let memory_changes = emulator.memory.pop_patches();

        if verbose {
            writeln!(output, "{:>4}: {:04X}", program_line.line, program_line.word)?;
            write!(output, "{}", display::register_patches(register_changes))?;
            write!(output, "{}", display::memory_patches(memory_changes))?;
        }

        if status == ExecuteStatus::Halted {
            summary.halted = true;
            writeln!(output, "Halted at line {}", program_line.line)?;
            break;
        }
    }

    Ok(summary)
}
