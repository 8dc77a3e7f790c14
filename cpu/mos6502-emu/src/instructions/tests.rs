mod flags;
mod load;
mod logic;

use crate::bus::{BusInterface, InMemoryBus};
use crate::{CpuRegisters, Mos6502};
use std::collections::HashMap;

const PROGRAM_START: u16 = 0x0400;

macro_rules! hash_map {
    ($($key:expr => $value:expr),* $(,)?) => {
        {
            let mut map = ::std::collections::HashMap::new();
            $(
                map.insert($key, $value);
            )*
            map
        }
    }
}

pub(crate) use hash_map;

#[derive(Default)]
struct ExpectedState {
    a: Option<u8>,
    x: Option<u8>,
    y: Option<u8>,
    p: Option<u8>,
    s: Option<u8>,
    pc: Option<u16>,
    memory: HashMap<u16, u8>,
    cycles: Option<u32>,
}

macro_rules! assert_state_eq {
    ($(($name:literal, $expected:expr, $actual:expr)),+$(,)?) => {
        {
            let mut errors: Vec<String> = Vec::new();

            $(
                if let Some(expected) = $expected {
                    let actual = $actual;
                    if expected != actual {
                        errors.push(format!("[{} mismatch: expected = {:02X}, actual = {:02X}]", $name, expected, actual));
                    }
                }
            )*

            errors
        }
    }
}

impl ExpectedState {
    fn assert_eq(&self, cpu_registers: &CpuRegisters, bus: &InMemoryBus, cycle_count: u32) {
        let mut errors = assert_state_eq!(
            ("A", self.a, cpu_registers.accumulator),
            ("X", self.x, cpu_registers.x),
            ("Y", self.y, cpu_registers.y),
            ("P", self.p, cpu_registers.status.to_byte()),
            ("S", self.s, cpu_registers.sp),
            ("PC", self.pc, cpu_registers.pc),
            ("Cycles", self.cycles, cycle_count),
        );

        for (&address, &value) in &self.memory {
            let actual_value = bus.peek(address);
            if value != actual_value {
                errors.push(format!("[Mismatch at memory address {address:04X}: expected = {value:02X}, actual = {actual_value:02X}]"));
            }
        }

        if !errors.is_empty() {
            panic!("Expected state mismatch: {}", errors.join(", "));
        }
    }
}

fn parse_program(program: &str) -> Vec<u8> {
    let program: String = program.chars().filter(|c| !c.is_whitespace()).collect();
    program
        .as_bytes()
        .chunks_exact(2)
        .map(|chunk| {
            let hex = String::from_utf8(Vec::from(chunk)).unwrap();
            u8::from_str_radix(&hex, 16).unwrap()
        })
        .collect()
}

/// Load `program` at the RESET target and burn the reset sequence, leaving the CPU about to fetch
/// the first instruction.
fn setup(program: &[u8]) -> (Mos6502, InMemoryBus) {
    let mut bus = InMemoryBus::new();
    bus.set_reset_vector(PROGRAM_START);
    bus.load(PROGRAM_START, program);

    let mut cpu = Mos6502::new(&mut bus);
    while !cpu.is_idle() {
        cpu.step(&mut bus);
    }

    (cpu, bus)
}

fn run_test(program: &str, expected_state: ExpectedState) {
    run_test_with_memory(program, &[], expected_state);
}

fn run_test_with_memory(program: &str, memory: &[(u16, &[u8])], expected_state: ExpectedState) {
    let program = parse_program(program);
    let (mut cpu, mut bus) = setup(&program);
    for &(address, bytes) in memory {
        bus.load(address, bytes);
    }

    let program_end = PROGRAM_START + program.len() as u16;
    let mut cycle_count = 0;
    while cpu.pc() < program_end || !cpu.is_idle() {
        cpu.step(&mut bus);

        cycle_count += 1;
    }

    expected_state.assert_eq(cpu.registers(), &bus, cycle_count);
}
