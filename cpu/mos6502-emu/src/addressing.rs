//! Addressing-mode resolution. Each resolver consumes the instruction's operand bytes, leaves the
//! effective address (or branch offset) in the instruction state, and reports whether indexing
//! crossed a page boundary.

use crate::Mos6502;
use crate::bus::BusInterface;
use crate::opcodes::AddressingMode;
use emu_common::num::U16Ext;

#[inline]
pub(crate) fn fetch_operand<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B) -> u8 {
    let operand = bus.read(cpu.registers.pc);
    cpu.registers.pc = cpu.registers.pc.wrapping_add(1);
    operand
}

#[inline]
fn fetch_operand_word<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B) -> u16 {
    let lsb = fetch_operand(cpu, bus);
    let msb = fetch_operand(cpu, bus);
    u16::from_le_bytes([lsb, msb])
}

/// Read a pointer stored in the zero page. The high byte wraps around to $00 rather than
/// continuing into page 1.
#[inline]
fn read_zero_page_pointer<B: BusInterface>(bus: &mut B, pointer: u8) -> u16 {
    let lsb = bus.read(pointer.into());
    let msb = bus.read(pointer.wrapping_add(1).into());
    u16::from_le_bytes([lsb, msb])
}

#[inline]
fn zero_page_indexed<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B, index: u8) -> bool {
    let address = fetch_operand(cpu, bus).wrapping_add(index);
    cpu.state.absolute_address = address.into();
    false
}

#[inline]
fn absolute_indexed<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B, index: u8) -> bool {
    let base = fetch_operand_word(cpu, bus);
    let address = base.wrapping_add(index.into());
    cpu.state.absolute_address = address;
    !address.same_page(base)
}

/// Resolve the operand for `mode`, returning true if the mode is eligible for the page-crossing
/// penalty on this execution.
pub(crate) fn resolve<B: BusInterface>(
    cpu: &mut Mos6502,
    bus: &mut B,
    mode: AddressingMode,
) -> bool {
    match mode {
        AddressingMode::Implied => {
            cpu.state.fetched = cpu.registers.accumulator;
            false
        }
        AddressingMode::Immediate => {
            cpu.state.absolute_address = cpu.registers.pc;
            cpu.registers.pc = cpu.registers.pc.wrapping_add(1);
            false
        }
        AddressingMode::ZeroPage => zero_page_indexed(cpu, bus, 0),
        AddressingMode::ZeroPageX => {
            let index = cpu.registers.x;
            zero_page_indexed(cpu, bus, index)
        }
        AddressingMode::ZeroPageY => {
            let index = cpu.registers.y;
            zero_page_indexed(cpu, bus, index)
        }
        AddressingMode::Relative => {
            cpu.state.relative_offset = fetch_operand(cpu, bus) as i8;
            false
        }
        AddressingMode::Absolute => {
            cpu.state.absolute_address = fetch_operand_word(cpu, bus);
            false
        }
        AddressingMode::AbsoluteX => {
            let index = cpu.registers.x;
            absolute_indexed(cpu, bus, index)
        }
        AddressingMode::AbsoluteY => {
            let index = cpu.registers.y;
            absolute_indexed(cpu, bus, index)
        }
        AddressingMode::Indirect => {
            let pointer = fetch_operand_word(cpu, bus);

            // Hardware bug: the pointer increment never carries into the high byte, so a pointer
            // at $xxFF reads its high byte from $xx00
            let lsb = bus.read(pointer);
            let msb = bus.read(pointer.page() | u16::from(pointer.lsb().wrapping_add(1)));
            cpu.state.absolute_address = u16::from_le_bytes([lsb, msb]);
            false
        }
        AddressingMode::IndirectX => {
            let pointer = fetch_operand(cpu, bus).wrapping_add(cpu.registers.x);
            cpu.state.absolute_address = read_zero_page_pointer(bus, pointer);
            false
        }
        AddressingMode::IndirectY => {
            let pointer = fetch_operand(cpu, bus);
            let base = read_zero_page_pointer(bus, pointer);
            let address = base.wrapping_add(cpu.registers.y.into());
            cpu.state.absolute_address = address;
            !address.same_page(base)
        }
    }
}
