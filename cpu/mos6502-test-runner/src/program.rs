//! Runs a raw binary image (e.g. a functional test ROM) until it traps on a jump-to-self.

use clap::Args;
use mos6502_emu::Mos6502;
use mos6502_emu::bus::InMemoryBus;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

const ADDRESS_SPACE_LEN: usize = 0x10000;

#[derive(Debug, Args)]
pub struct ProgramArgs {
    /// Raw binary image
    #[arg(long, short = 'i')]
    image: PathBuf,

    /// Address to load the image at (hex)
    #[arg(long, value_parser = crate::parse_address)]
    load_address: u16,

    /// Entry point (hex); written to the RESET vector before reset. If not set, the image's own
    /// RESET vector is used
    #[arg(long, value_parser = crate::parse_address)]
    start: Option<u16>,

    /// Trap address (hex) that indicates success
    #[arg(long, value_parser = crate::parse_address)]
    success_pc: Option<u16>,

    /// Give up after this many instructions
    #[arg(long, default_value_t = 100_000_000)]
    max_instructions: u64,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image is {len} bytes, which does not fit at {load_address:04X} ({available} bytes available)")]
    TooLarge { len: usize, load_address: u16, available: usize },
}

#[derive(Debug, Error)]
pub enum TrapError {
    #[error("program trapped at {pc:04X}, expected {expected:04X}")]
    UnexpectedAddress { pc: u16, expected: u16 },
    #[error("no trap after {instructions} instructions; PC={pc:04X}")]
    InstructionLimit { instructions: u64, pc: u16 },
}

fn load_image(image: &[u8], load_address: u16) -> Result<InMemoryBus, ImageError> {
    let available = ADDRESS_SPACE_LEN - usize::from(load_address);
    if image.len() > available {
        return Err(ImageError::TooLarge { len: image.len(), load_address, available });
    }

    let mut bus = InMemoryBus::new();
    bus.load(load_address, image);
    Ok(bus)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Trap {
    pc: u16,
    instructions: u64,
    cycles: u64,
}

/// Execute until an instruction leaves PC unchanged.
fn run_until_trap(
    cpu: &mut Mos6502,
    bus: &mut InMemoryBus,
    max_instructions: u64,
) -> Result<Trap, TrapError> {
    let mut instructions = 0;
    while instructions < max_instructions {
        let pc = cpu.pc();
        cpu.run_instruction(bus);
        instructions += 1;

        if cpu.pc() == pc {
            return Ok(Trap { pc, instructions, cycles: cpu.total_cycles() });
        }
    }

    Err(TrapError::InstructionLimit { instructions, pc: cpu.pc() })
}

pub fn run(args: &ProgramArgs) -> anyhow::Result<()> {
    let image = fs::read(&args.image)?;
    let mut bus = load_image(&image, args.load_address)?;
    if let Some(start) = args.start {
        bus.set_reset_vector(start);
    }

    log::info!(
        "Loaded {} bytes from '{}' at {:04X}",
        image.len(),
        args.image.display(),
        args.load_address
    );

    let mut cpu = Mos6502::new(&mut bus);
    let trap = run_until_trap(&mut cpu, &mut bus, args.max_instructions)?;

    log::info!(
        "Trapped at {:04X} after {} instructions ({} cycles)",
        trap.pc,
        trap.instructions,
        trap.cycles
    );

    if let Some(expected) = args.success_pc {
        if trap.pc != expected {
            return Err(TrapError::UnexpectedAddress { pc: trap.pc, expected }.into());
        }
        log::info!("Reached success address {expected:04X}");
    }

    Ok(())
}
