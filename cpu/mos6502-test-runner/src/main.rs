mod json;
mod program;

use clap::{Parser, Subcommand};
use env_logger::Env;
use std::num::ParseIntError;
use std::path::PathBuf;

#[derive(Debug, Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run single-instruction JSON conformance tests (one `<opcode>.json` file per opcode)
    JsonTests {
        /// Directory containing JSON tests
        #[arg(long, short = 'd')]
        dir_path: PathBuf,

        /// Also run tests for undocumented opcodes
        #[arg(long)]
        include_undocumented: bool,
    },
    /// Run a raw program image until it traps on a jump-to-self
    Program(program::ProgramArgs),
}

/// Parse a hexadecimal address, with or without a `$` or `0x` prefix.
fn parse_address(s: &str) -> Result<u16, ParseIntError> {
    let digits =
        s.strip_prefix('$').or_else(|| s.strip_prefix("0x")).or_else(|| s.strip_prefix("0X"));
    u16::from_str_radix(digits.unwrap_or(s), 16)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Command::JsonTests { dir_path, include_undocumented } => {
            json::run_tests(&dir_path, include_undocumented)
        }
        Command::Program(program_args) => program::run(&program_args),
    }
}
