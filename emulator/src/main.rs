use std::{
    fs::{self, File},
    io::{self, BufReader, IsTerminal},
    path::{Path, PathBuf},
    process::exit,
};

use anyhow::Context;
use clap::Parser;
use libq8emulator::Emulator;
use loader::{InvalidLinePolicy, Loader, ProgramLine};
use log::info;

mod command;
mod display;
mod loader;
mod repl;
mod runner;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Program file, one 4 digit hex instruction word per line
    program: Option<PathBuf>,

    /// Fail on the first invalid program line
    #[arg(long, conflicts_with = "prompt")]
    strict: bool,

    /// Ask for a replacement for every invalid program line (default when stdin is a terminal)
    #[arg(long)]
    prompt: bool,

    /// Enter the command prompt after running the program
    #[arg(short, long)]
    interactive: bool,

    /// Raw binary image (up to 256 bytes) loaded into main memory before running
    #[arg(short, long)]
    memory_image: Option<PathBuf>,

    /// Print the registers and memory changed by each instruction
    #[arg(short, long)]
    verbose: bool,

    /// Don't print the register and memory dumps at the end
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn invalid_line_policy(&self) -> InvalidLinePolicy {
        if self.strict {
            InvalidLinePolicy::Strict
        } else if self.prompt || io::stdin().is_terminal() {
            InvalidLinePolicy::Prompt
        } else {
            InvalidLinePolicy::Strict
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut emulator = match &args.memory_image {
        Some(path) => {
            let image = fs::read(path)
                .with_context(|| format!("Failed to read memory image {}", path.display()))?;
            Emulator::with_memory(image)?
        }
        None => Emulator::new(),
    };

    if let Some(path) = &args.program {
        let program = load_program(path, args.invalid_line_policy())?;
        let summary =
            runner::run_program(&mut emulator, &program, args.verbose, &mut io::stdout())?;
        info!(
            "Executed {} of {} instructions",
            summary.executed,
            program.len()
        );
    }

    if args.interactive {
        repl::run(&mut emulator, &mut io::stdin().lock(), &mut io::stdout())?;
    }

    if !args.quiet {
        println!("Memory:");
        print!(
            "{}",
            display::memory_dump(&emulator.memory, 0, libq8isa::MEMORY_SIZE)
        );
        println!();
        println!("Registers:");
        print!("{}", display::register_dump(&emulator.reg_file));
    }

    Ok(())
}

fn load_program(path: &Path, policy: InvalidLinePolicy) -> anyhow::Result<Vec<ProgramLine>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open program file {}", path.display()))?;

    let program = Loader::new(policy, io::stdin().lock(), io::stdout())
        .load(BufReader::new(file))
        .with_context(|| format!("Failed to load {}", path.display()))?;

    info!(
        "Loaded {} instructions from {}",
        program.len(),
        path.display()
    );

    Ok(program)
}
