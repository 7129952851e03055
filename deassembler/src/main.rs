use std::{fs, path::PathBuf, process::exit};

use anyhow::Context;
use clap::Parser;
use libq8deassembler::Deassembler;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Program file, one 4 digit hex instruction word per line
    program: PathBuf,
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
    let program = fs::read_to_string(&args.program)
        .with_context(|| format!("Error reading program file {}", args.program.display()))?;

    info!(
        "Deassembling {} lines from {}",
        program.lines().count(),
        args.program.display()
    );

    let deassembler = Deassembler::new(program.lines());
    print!("{}", deassembler.deassemble_text());

    Ok(())
}
