//! Seeker interpreter.
//!
//! Loads a Seeker program and runs it until no thread is left running or a
//! breakpoint pauses it.
//!
//! # Usage
//! ```text
//! seeker <program> [OPTIONS]
//! ```
//!
//! # Options
//! - `-i, --input <file>`: Bytes read through the IO node (defaults to none)
//! - `-o, --output <file>`: Write output to a file instead of standard output
//! - `-v, --verbose`: Trace every instruction, move, stall and termination
//! - `-x, --extended`: Enable `CREATE_THREAD` (7) and `BREAKPOINT` (8)
//!
//! # Examples
//! ```text
//! seeker hello.skr
//! seeker cat.skr -i input.txt -o output.txt
//! seeker threads.skr -x -v
//! ```

use seeker::virtual_machine::config::Config;
use seeker::virtual_machine::errors::VMError;
use seeker::virtual_machine::io::IoChannel;
use seeker::virtual_machine::program::Program;
use seeker::virtual_machine::vm::{RunOutcome, VM};
use seeker::{error, info};
use std::env;
use std::fs;
use std::io;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let program_path = &args[1];
    let mut input_path: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut config = Config::default();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            k @ ("--input" | "-i" | "--output" | "-o") => {
                i += 1;
                if i >= args.len() {
                    error!("{k} requires an argument");
                    process::exit(1);
                }
                if matches!(k, "--input" | "-i") {
                    input_path = Some(args[i].clone());
                } else {
                    output_path = Some(args[i].clone());
                }
            }
            "--verbose" | "-v" => config = config.with_verbose(true),
            "--extended" | "-x" => config = config.with_extended(true),
            other => {
                error!("Unexpected argument: {}\n", other);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = run(program_path, input_path.as_deref(), output_path.as_deref(), config) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(
    program_path: &str,
    input_path: Option<&str>,
    output_path: Option<&str>,
    config: Config,
) -> Result<(), VMError> {
    let program = Program::from_file(program_path)?;

    let input = match input_path {
        Some(path) => fs::read(path).map_err(|e| VMError::ReadInput {
            path: path.to_string(),
            reason: e.to_string(),
        })?,
        None => Vec::new(),
    };

    let io = match output_path {
        Some(_) => IoChannel::new(input),
        None => IoChannel::new(input).with_echo(io::stdout()),
    };

    let mut vm = VM::new(program, config, io);
    if vm.threads().is_empty() {
        info!("{program_path} defines no nodes 0 and 1, nothing to run");
    }

    if vm.run() == RunOutcome::Paused {
        info!("Program paused at a breakpoint");
    }

    if let Some(path) = output_path {
        fs::write(path, vm.io().output()).map_err(|e| VMError::WriteOutput {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
    }

    Ok(())
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <program> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -i, --input <file>    Input bytes read through node 0");
    eprintln!("  -o, --output <file>   Write output to a file instead of stdout");
    eprintln!("  -v, --verbose         Trace execution step by step");
    eprintln!("  -x, --extended        Enable opcodes 7 (create thread) and 8 (breakpoint)");
}
