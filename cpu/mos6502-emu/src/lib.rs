//! An instruction-stepped, cycle-counted emulation of the NMOS 6502.
//!
//! Each instruction executes in full on the first [`Mos6502::step`] call after the previous
//! instruction's cycles have drained; subsequent `step` calls burn the remaining cycles. Decimal
//! mode is not emulated: the D flag can be set and cleared but ADC/SBC always operate in binary.

pub mod bus;
mod addressing;
mod instructions;
pub mod opcodes;

use crate::bus::BusInterface;
use bincode::{Decode, Encode};
use emu_common::num::{GetBit, U16Ext};

pub use opcodes::{AddressingMode, OpcodeEntry, Operation, opcode_entry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReadContext {
    HardwareInterruptHandler,
    Brk,
    PushStack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct StatusFlags {
    negative: bool,
    overflow: bool,
    unused: bool,
    break_flag: bool,
    decimal: bool,
    interrupt_disable: bool,
    zero: bool,
    carry: bool,
}

impl StatusFlags {
    pub const CARRY: u8 = 1 << 0;
    pub const ZERO: u8 = 1 << 1;
    pub const INTERRUPT_DISABLE: u8 = 1 << 2;
    pub const DECIMAL: u8 = 1 << 3;
    pub const BREAK: u8 = 1 << 4;
    pub const UNUSED: u8 = 1 << 5;
    pub const OVERFLOW: u8 = 1 << 6;
    pub const NEGATIVE: u8 = 1 << 7;

    /// Power-on / post-reset status: only the unused bit is set.
    #[must_use]
    pub fn new() -> Self {
        Self::from_byte(Self::UNUSED)
    }

    #[must_use]
    pub fn negative(self) -> bool {
        self.negative
    }

    #[must_use]
    pub fn overflow(self) -> bool {
        self.overflow
    }

    #[must_use]
    pub fn unused(self) -> bool {
        self.unused
    }

    #[must_use]
    pub fn break_flag(self) -> bool {
        self.break_flag
    }

    #[must_use]
    pub fn decimal(self) -> bool {
        self.decimal
    }

    #[must_use]
    pub fn interrupt_disable(self) -> bool {
        self.interrupt_disable
    }

    #[must_use]
    pub fn zero(self) -> bool {
        self.zero
    }

    #[must_use]
    pub fn carry(self) -> bool {
        self.carry
    }

    pub fn set_negative(&mut self, negative: bool) -> &mut Self {
        self.negative = negative;
        self
    }

    pub fn set_overflow(&mut self, overflow: bool) -> &mut Self {
        self.overflow = overflow;
        self
    }

    pub fn set_unused(&mut self, unused: bool) -> &mut Self {
        self.unused = unused;
        self
    }

    pub fn set_break(&mut self, break_flag: bool) -> &mut Self {
        self.break_flag = break_flag;
        self
    }

    pub fn set_decimal(&mut self, decimal: bool) -> &mut Self {
        self.decimal = decimal;
        self
    }

    pub fn set_interrupt_disable(&mut self, interrupt_disable: bool) -> &mut Self {
        self.interrupt_disable = interrupt_disable;
        self
    }

    pub fn set_zero(&mut self, zero: bool) -> &mut Self {
        self.zero = zero;
        self
    }

    pub fn set_carry(&mut self, carry: bool) -> &mut Self {
        self.carry = carry;
        self
    }

    /// Set N and Z from a result value.
    pub fn set_nz(&mut self, value: u8) -> &mut Self {
        self.set_negative(value.bit(7)).set_zero(value == 0)
    }

    /// The live register contents, bit for bit.
    #[must_use]
    pub fn to_byte(self) -> u8 {
        (u8::from(self.negative) << 7)
            | (u8::from(self.overflow) << 6)
            | (u8::from(self.unused) << 5)
            | (u8::from(self.break_flag) << 4)
            | (u8::from(self.decimal) << 3)
            | (u8::from(self.interrupt_disable) << 2)
            | (u8::from(self.zero) << 1)
            | u8::from(self.carry)
    }

    /// The byte pushed to the stack in the given context.
    ///
    /// B is set for BRK and PHP and cleared for hardware interrupts; U is always set. Hardware
    /// interrupts also push I as set.
    #[must_use]
    pub fn to_stack_byte(self, read_ctx: StatusReadContext) -> u8 {
        let byte = self.to_byte() | Self::UNUSED;
        match read_ctx {
            StatusReadContext::Brk | StatusReadContext::PushStack => byte | Self::BREAK,
            StatusReadContext::HardwareInterruptHandler => {
                (byte & !Self::BREAK) | Self::INTERRUPT_DISABLE
            }
        }
    }

    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        Self {
            negative: byte.bit(7),
            overflow: byte.bit(6),
            unused: byte.bit(5),
            break_flag: byte.bit(4),
            decimal: byte.bit(3),
            interrupt_disable: byte.bit(2),
            zero: byte.bit(1),
            carry: byte.bit(0),
        }
    }
}

impl Default for StatusFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl From<StatusFlags> for u8 {
    fn from(value: StatusFlags) -> Self {
        value.to_byte()
    }
}

impl From<u8> for StatusFlags {
    fn from(value: u8) -> Self {
        Self::from_byte(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct CpuRegisters {
    pub accumulator: u8,
    pub x: u8,
    pub y: u8,
    pub status: StatusFlags,
    pub pc: u16,
    pub sp: u8,
}

impl CpuRegisters {
    fn new(reset_vector: u16) -> Self {
        Self { accumulator: 0, x: 0, y: 0, status: StatusFlags::new(), pc: reset_vector, sp: 0xFD }
    }
}

/// Transient per-instruction state, overwritten by every fetch.
#[derive(Debug, Clone, Default, Encode, Decode)]
pub(crate) struct InstructionState {
    pub opcode: u8,
    pub fetched: u8,
    pub absolute_address: u16,
    pub relative_offset: i8,
    pub cycles_remaining: u8,
}

#[derive(Debug, Clone, Encode, Decode)]
pub struct Mos6502 {
    registers: CpuRegisters,
    state: InstructionState,
    total_cycles: u64,
}

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

const RESET_CYCLES: u8 = 8;
const IRQ_CYCLES: u8 = 7;
const NMI_CYCLES: u8 = 8;

fn read_vector<B: BusInterface>(bus: &mut B, vector: u16) -> u16 {
    let lsb = bus.read(vector);
    let msb = bus.read(vector.wrapping_add(1));
    u16::from_le_bytes([lsb, msb])
}

impl Mos6502 {
    /// Create a new 6502 and run the RESET sequence, which points PC at the address stored at
    /// $FFFC and leaves 8 cycles pending.
    pub fn new<B: BusInterface>(bus: &mut B) -> Self {
        let mut cpu = Self {
            registers: CpuRegisters::new(0x0000),
            state: InstructionState::default(),
            total_cycles: 0,
        };
        cpu.reset(bus);
        cpu
    }

    /// Reset the 6502, which does the following:
    /// * Load PC from the RESET vector, abandoning any in-progress instruction
    /// * Clear A, X, and Y and set the stack pointer to $FD
    /// * Clear every status flag except the unused bit
    ///
    /// Memory is never written.
    pub fn reset<B: BusInterface>(&mut self, bus: &mut B) {
        let reset_vector = read_vector(bus, RESET_VECTOR);
        log::debug!("RESET: jumping to {reset_vector:04X}");

        self.registers = CpuRegisters::new(reset_vector);
        self.state = InstructionState { cycles_remaining: RESET_CYCLES, ..InstructionState::default() };
    }

    /// Maskable interrupt request. Ignored while the I flag is set.
    pub fn irq<B: BusInterface>(&mut self, bus: &mut B) {
        if self.registers.status.interrupt_disable {
            log::debug!("IRQ ignored at PC={:04X}; interrupts disabled", self.registers.pc);
            return;
        }

        self.service_interrupt(bus, IRQ_VECTOR);
        self.state.cycles_remaining = IRQ_CYCLES;
    }

    /// Non-maskable interrupt; always serviced.
    pub fn nmi<B: BusInterface>(&mut self, bus: &mut B) {
        self.service_interrupt(bus, NMI_VECTOR);
        self.state.cycles_remaining = NMI_CYCLES;
    }

    fn service_interrupt<B: BusInterface>(&mut self, bus: &mut B, vector: u16) {
        log::debug!("Servicing interrupt at PC={:04X}, vector {vector:04X}", self.registers.pc);

        let pc = self.registers.pc;
        instructions::push_stack(self, bus, pc.msb());
        instructions::push_stack(self, bus, pc.lsb());

        self.registers.status.set_break(false).set_unused(true).set_interrupt_disable(true);
        let status = self.registers.status.to_stack_byte(StatusReadContext::HardwareInterruptHandler);
        instructions::push_stack(self, bus, status);

        self.registers.pc = read_vector(bus, vector);
    }

    /// Run the CPU for 1 cycle.
    ///
    /// If no cycles are pending, this fetches and fully executes the next instruction and then
    /// schedules the rest of its cycle cost.
    #[inline]
    pub fn step<B: BusInterface>(&mut self, bus: &mut B) {
        if self.state.cycles_remaining == 0 {
            instructions::execute_instruction(self, bus);
        }

        self.state.cycles_remaining -= 1;
        self.total_cycles += 1;
    }

    /// Burn any pending cycles, then execute exactly one instruction through to completion.
    ///
    /// Returns the cycle cost of the executed instruction; pending cycles that were drained first
    /// are not included.
    pub fn run_instruction<B: BusInterface>(&mut self, bus: &mut B) -> u32 {
        while !self.is_idle() {
            self.step(bus);
        }

        let mut cycles = 0;
        loop {
            self.step(bus);
            cycles += 1;

            if self.is_idle() {
                return cycles;
            }
        }
    }

    /// Whether the next `step` call will fetch a new instruction.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.cycles_remaining == 0
    }

    #[inline]
    #[must_use]
    pub fn cycles_remaining(&self) -> u8 {
        self.state.cycles_remaining
    }

    /// Number of `step` calls made since construction.
    #[inline]
    #[must_use]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    #[inline]
    #[must_use]
    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    /// The most recently fetched opcode.
    #[inline]
    #[must_use]
    pub fn opcode(&self) -> u8 {
        self.state.opcode
    }

    #[must_use]
    pub fn registers(&self) -> &CpuRegisters {
        &self.registers
    }

    pub fn set_registers(&mut self, registers: CpuRegisters) {
        self.registers = registers;
    }
}
