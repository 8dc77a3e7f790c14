//! Single-instruction conformance tests in the SingleStepTests JSON format.

use mos6502_emu::bus::BusInterface;
use mos6502_emu::{CpuRegisters, Mos6502, Operation, StatusFlags, opcode_entry};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::mem;
use std::path::Path;

struct Bus {
    ram: Vec<u8>,
    addresses_written: Vec<u16>,
}

impl Bus {
    fn new() -> Self {
        Self { ram: vec![0; 64 * 1024], addresses_written: Vec::new() }
    }

    fn clear(&mut self) {
        for address in mem::take(&mut self.addresses_written) {
            self.ram[usize::from(address)] = 0;
        }
    }
}

impl BusInterface for Bus {
    #[inline]
    fn read(&mut self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    #[inline]
    fn peek(&self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    #[inline]
    fn write(&mut self, address: u16, value: u8) {
        self.ram[usize::from(address)] = value;
        self.addresses_written.push(address);
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SystemState {
    pc: u16,
    s: u8,
    a: u8,
    x: u8,
    y: u8,
    p: u8,
    ram: Vec<(u16, u8)>,
}

#[derive(Debug, Clone, Deserialize)]
struct TestDescription {
    name: String,
    initial: SystemState,
    #[serde(rename = "final")]
    final_: SystemState,
    // [address, value, "read" | "write"] per bus cycle
    cycles: Vec<serde_json::Value>,
}

#[derive(Debug, Default)]
struct Summary {
    passed: u32,
    failed: u32,
    skipped: u32,
}

pub fn run_tests(dir_path: &Path, include_undocumented: bool) -> anyhow::Result<()> {
    let mut bus = Bus::new();
    let mut summary = Summary::default();

    for opcode in 0x00..=0xFF {
        let entry = opcode_entry(opcode);
        if !entry.is_documented() && !include_undocumented {
            continue;
        }

        let file_path = dir_path.join(format!("{opcode:02x}.json"));
        if !file_path.exists() {
            log::warn!("No test file for opcode {opcode:02X} at {}", file_path.display());
            continue;
        }

        let tests: Vec<TestDescription> =
            serde_json::from_reader(BufReader::new(File::open(&file_path)?))?;

        run_opcode_tests(&mut bus, opcode, tests, &mut summary);
    }

    log::info!(
        "Passed {}, failed {}, skipped {} (decimal-mode ADC/SBC)",
        summary.passed,
        summary.failed,
        summary.skipped
    );

    if summary.failed != 0 {
        anyhow::bail!("{} conformance tests failed", summary.failed);
    }

    Ok(())
}

fn run_opcode_tests(
    bus: &mut Bus,
    opcode: u8,
    tests: Vec<TestDescription>,
    summary: &mut Summary,
) {
    let entry = opcode_entry(opcode);

    let mut failures = 0;
    let test_count = tests.len();
    for test in tests {
        // Decimal mode is not emulated
        let decimal = test.initial.p & StatusFlags::DECIMAL != 0;
        if decimal && matches!(entry.operation, Operation::Adc | Operation::Sbc) {
            summary.skipped += 1;
            continue;
        }

        bus.clear();
        for &(address, value) in &test.initial.ram {
            bus.write(address, value);
        }

        let mut cpu = Mos6502::new(bus);
        cpu.set_registers(CpuRegisters {
            accumulator: test.initial.a,
            x: test.initial.x,
            y: test.initial.y,
            status: StatusFlags::from_byte(test.initial.p),
            pc: test.initial.pc,
            sp: test.initial.s,
        });

        let cycles = cpu.run_instruction(bus);

        if check_state(&cpu, bus, &test.final_, &test.cycles, cycles) {
            failures += 1;
            log::debug!("Above failures in '{}'", test.name);
        } else {
            summary.passed += 1;
        }
    }

    if failures != 0 {
        log::error!(
            "Failed {failures} out of {test_count} tests for opcode {opcode:02X} ({})",
            entry.mnemonic()
        );
    }

    summary.failed += failures;
}

fn check_state(
    cpu: &Mos6502,
    bus: &Bus,
    final_state: &SystemState,
    expected_cycles: &[serde_json::Value],
    actual_cycles: u32,
) -> bool {
    let mut errors = false;

    for &(address, expected_value) in &final_state.ram {
        let actual_value = bus.peek(address);
        if expected_value != actual_value {
            errors = true;
            log::debug!(
                "RAM[{address:04X}]: expected={expected_value:02X}, actual={actual_value:02X}"
            );
        }
    }

    // B and U have no storage on real hardware
    let status_mask = !(StatusFlags::BREAK | StatusFlags::UNUSED);

    let registers = cpu.registers();
    errors |= check_register("A", final_state.a, registers.accumulator);
    errors |= check_register("X", final_state.x, registers.x);
    errors |= check_register("Y", final_state.y, registers.y);
    errors |= check_register("S", final_state.s, registers.sp);
    errors |=
        check_register("P", final_state.p & status_mask, registers.status.to_byte() & status_mask);

    if final_state.pc != registers.pc {
        log::debug!("PC: expected={:04X} actual={:04X}", final_state.pc, registers.pc);
        errors = true;
    }

    if expected_cycles.len() != actual_cycles as usize {
        log::debug!(
            "Cycle count does not match: expected={}, actual={actual_cycles}",
            expected_cycles.len()
        );
        log::debug!("  Expected: {expected_cycles:?}");
        errors = true;
    }

    errors
}

fn check_register(name: &str, expected: u8, actual: u8) -> bool {
    if expected != actual {
        log::debug!("{name}: expected={expected:02X}, actual={actual:02X}");
        true
    } else {
        false
    }
}
