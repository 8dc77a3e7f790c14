#[cfg(test)]
mod tests;

use crate::addressing;
use crate::bus::BusInterface;
use crate::opcodes::{AddressingMode, Operation, opcode_entry};
use crate::{IRQ_VECTOR, Mos6502, StatusFlags, StatusReadContext};
use emu_common::num::{GetBit, U16Ext};

const STACK_PAGE: u16 = 0x0100;

#[inline]
pub(crate) fn push_stack<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B, value: u8) {
    bus.write(STACK_PAGE | u16::from(cpu.registers.sp), value);
    cpu.registers.sp = cpu.registers.sp.wrapping_sub(1);
}

#[inline]
fn pull_stack<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B) -> u8 {
    cpu.registers.sp = cpu.registers.sp.wrapping_add(1);
    bus.read(STACK_PAGE | u16::from(cpu.registers.sp))
}

#[inline]
fn push_pc<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B, pc: u16) {
    push_stack(cpu, bus, pc.msb());
    push_stack(cpu, bus, pc.lsb());
}

#[inline]
fn pull_pc<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B) -> u16 {
    let lsb = pull_stack(cpu, bus);
    let msb = pull_stack(cpu, bus);
    u16::from_le_bytes([lsb, msb])
}

fn current_mode(cpu: &Mos6502) -> AddressingMode {
    opcode_entry(cpu.state.opcode).mode
}

/// Read the instruction's operand: the accumulator in implied mode, otherwise the byte at the
/// resolved address.
#[inline]
fn fetch<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B) -> u8 {
    if current_mode(cpu) != AddressingMode::Implied {
        cpu.state.fetched = bus.read(cpu.state.absolute_address);
    }
    cpu.state.fetched
}

/// Write a read-modify-write result back to wherever the operand came from.
#[inline]
fn write_back<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B, value: u8) {
    if current_mode(cpu) == AddressingMode::Implied {
        cpu.registers.accumulator = value;
    } else {
        bus.write(cpu.state.absolute_address, value);
    }
}

fn add(accumulator: u8, value: u8, flags: &mut StatusFlags) -> u8 {
    // Decimal flag is intentionally ignored
    let sum = u16::from(accumulator) + u16::from(value) + u16::from(flags.carry);
    let result = sum as u8;

    let overflow = (!(accumulator ^ value) & (accumulator ^ result)).bit(7);
    flags.set_nz(result).set_overflow(overflow).set_carry(sum.bit(8));

    result
}

fn subtract(accumulator: u8, value: u8, flags: &mut StatusFlags) -> u8 {
    // A - M - (1 - C) == A + !M + C
    add(accumulator, !value, flags)
}

fn compare(register: u8, value: u8, flags: &mut StatusFlags) {
    flags
        .set_negative(register.wrapping_sub(value).bit(7))
        .set_zero(register == value)
        .set_carry(register >= value);
}

fn bit_test(accumulator: u8, value: u8, flags: &mut StatusFlags) {
    flags.set_negative(value.bit(7)).set_overflow(value.bit(6)).set_zero(accumulator & value == 0);
}

fn shift_left(value: u8, flags: &mut StatusFlags) -> u8 {
    let shifted = value << 1;
    flags.set_carry(value.bit(7)).set_nz(shifted);
    shifted
}

fn logical_shift_right(value: u8, flags: &mut StatusFlags) -> u8 {
    let shifted = value >> 1;
    flags.set_carry(value.bit(0)).set_nz(shifted);
    shifted
}

fn rotate_left(value: u8, flags: &mut StatusFlags) -> u8 {
    let rotated = (value << 1) | u8::from(flags.carry);
    flags.set_carry(value.bit(7)).set_nz(rotated);
    rotated
}

fn rotate_right(value: u8, flags: &mut StatusFlags) -> u8 {
    let rotated = (value >> 1) | (u8::from(flags.carry) << 7);
    flags.set_carry(value.bit(0)).set_nz(rotated);
    rotated
}

fn branch(cpu: &mut Mos6502, condition: bool) {
    if !condition {
        return;
    }

    // Taken branches always cost 1 extra cycle, and 1 more if the target is on a different page
    // than the instruction following the branch
    cpu.state.cycles_remaining += 1;

    let pc = cpu.registers.pc;
    let target = pc.wrapping_add_signed(cpu.state.relative_offset.into());
    if !target.same_page(pc) {
        cpu.state.cycles_remaining += 1;
    }

    cpu.state.absolute_address = target;
    cpu.registers.pc = target;
}

// LDA, LDX, LDY
macro_rules! impl_load {
    ($cpu:expr, $bus:expr, $register:ident) => {{
        let value = fetch($cpu, $bus);
        $cpu.registers.$register = value;
        $cpu.registers.status.set_nz(value);
        true
    }};
}

// STA, STX, STY
macro_rules! impl_store {
    ($cpu:expr, $bus:expr, $register:ident) => {{
        $bus.write($cpu.state.absolute_address, $cpu.registers.$register);
        false
    }};
}

macro_rules! set_transfer_flags {
    (sp, $registers:expr, $value:expr) => {};
    ($to:ident, $registers:expr, $value:expr) => {
        $registers.status.set_nz($value);
    };
}

// TAX, TAY, TSX, TXA, TXS, TYA
macro_rules! impl_register_transfer {
    ($cpu:expr, $from:ident -> $to:ident) => {{
        let value = $cpu.registers.$from;
        $cpu.registers.$to = value;
        set_transfer_flags!($to, $cpu.registers, value);
        false
    }};
}

// AND, ORA, EOR
macro_rules! impl_logical {
    ($cpu:expr, $bus:expr, $op:tt) => {{
        let operand = fetch($cpu, $bus);
        let value = $cpu.registers.accumulator $op operand;
        $cpu.registers.accumulator = value;
        $cpu.registers.status.set_nz(value);
        true
    }};
}

// ASL, LSR, ROL, ROR
macro_rules! impl_modify {
    ($cpu:expr, $bus:expr, $op_fn:ident) => {{
        let value = fetch($cpu, $bus);
        let result = $op_fn(value, &mut $cpu.registers.status);
        write_back($cpu, $bus, result);
        false
    }};
}

// INX, INY, DEX, DEY
macro_rules! impl_step_register {
    ($cpu:expr, $register:ident, $op:ident) => {{
        let value = $cpu.registers.$register.$op(1);
        $cpu.registers.$register = value;
        $cpu.registers.status.set_nz(value);
        false
    }};
}

// INC, DEC
macro_rules! impl_step_memory {
    ($cpu:expr, $bus:expr, $op:ident) => {{
        let value = fetch($cpu, $bus).$op(1);
        $bus.write($cpu.state.absolute_address, value);
        $cpu.registers.status.set_nz(value);
        false
    }};
}

// CLC, CLD, CLI, CLV, SEC, SED, SEI
macro_rules! impl_set_status_flag {
    ($cpu:expr, $flag:ident = $value:expr) => {{
        $cpu.registers.status.$flag = $value;
        false
    }};
}

// BCC, BCS, BEQ, BMI, BNE, BPL, BVC, BVS
macro_rules! impl_branch {
    ($cpu:expr, $flag:ident == $flag_value:expr) => {{
        let condition = $cpu.registers.status.$flag == $flag_value;
        branch($cpu, condition);
        false
    }};
}

// CMP, CPX, CPY
macro_rules! impl_compare {
    ($cpu:expr, $bus:expr, $register:ident, page_penalty: $penalty:expr) => {{
        let value = fetch($cpu, $bus);
        compare($cpu.registers.$register, value, &mut $cpu.registers.status);
        $penalty
    }};
}

/// Run the handler for `operation`, returning true if the operation honors the page-crossing
/// penalty.
fn execute_operation<B: BusInterface>(
    cpu: &mut Mos6502,
    bus: &mut B,
    operation: Operation,
) -> bool {
    match operation {
        Operation::Lda => impl_load!(cpu, bus, accumulator),
        Operation::Ldx => impl_load!(cpu, bus, x),
        Operation::Ldy => impl_load!(cpu, bus, y),
        Operation::Sta => impl_store!(cpu, bus, accumulator),
        Operation::Stx => impl_store!(cpu, bus, x),
        Operation::Sty => impl_store!(cpu, bus, y),
        Operation::Tax => impl_register_transfer!(cpu, accumulator -> x),
        Operation::Tay => impl_register_transfer!(cpu, accumulator -> y),
        Operation::Tsx => impl_register_transfer!(cpu, sp -> x),
        Operation::Txa => impl_register_transfer!(cpu, x -> accumulator),
        Operation::Txs => impl_register_transfer!(cpu, x -> sp),
        Operation::Tya => impl_register_transfer!(cpu, y -> accumulator),
        Operation::Adc => {
            let value = fetch(cpu, bus);
            cpu.registers.accumulator =
                add(cpu.registers.accumulator, value, &mut cpu.registers.status);
            true
        }
        Operation::Sbc => {
            let value = fetch(cpu, bus);
            cpu.registers.accumulator =
                subtract(cpu.registers.accumulator, value, &mut cpu.registers.status);
            true
        }
        Operation::And => impl_logical!(cpu, bus, &),
        Operation::Ora => impl_logical!(cpu, bus, |),
        Operation::Eor => impl_logical!(cpu, bus, ^),
        Operation::Asl => impl_modify!(cpu, bus, shift_left),
        Operation::Lsr => impl_modify!(cpu, bus, logical_shift_right),
        Operation::Rol => impl_modify!(cpu, bus, rotate_left),
        Operation::Ror => impl_modify!(cpu, bus, rotate_right),
        Operation::Inc => impl_step_memory!(cpu, bus, wrapping_add),
        Operation::Dec => impl_step_memory!(cpu, bus, wrapping_sub),
        Operation::Inx => impl_step_register!(cpu, x, wrapping_add),
        Operation::Iny => impl_step_register!(cpu, y, wrapping_add),
        Operation::Dex => impl_step_register!(cpu, x, wrapping_sub),
        Operation::Dey => impl_step_register!(cpu, y, wrapping_sub),
        Operation::Cmp => impl_compare!(cpu, bus, accumulator, page_penalty: true),
        Operation::Cpx => impl_compare!(cpu, bus, x, page_penalty: false),
        Operation::Cpy => impl_compare!(cpu, bus, y, page_penalty: false),
        Operation::Bit => {
            let value = fetch(cpu, bus);
            bit_test(cpu.registers.accumulator, value, &mut cpu.registers.status);
            false
        }
        Operation::Bcc => impl_branch!(cpu, carry == false),
        Operation::Bcs => impl_branch!(cpu, carry == true),
        Operation::Beq => impl_branch!(cpu, zero == true),
        Operation::Bne => impl_branch!(cpu, zero == false),
        Operation::Bmi => impl_branch!(cpu, negative == true),
        Operation::Bpl => impl_branch!(cpu, negative == false),
        Operation::Bvc => impl_branch!(cpu, overflow == false),
        Operation::Bvs => impl_branch!(cpu, overflow == true),
        Operation::Jmp => {
            cpu.registers.pc = cpu.state.absolute_address;
            false
        }
        Operation::Jsr => {
            // The pushed return address is the last byte of the JSR instruction
            let return_address = cpu.registers.pc.wrapping_sub(1);
            push_pc(cpu, bus, return_address);
            cpu.registers.pc = cpu.state.absolute_address;
            false
        }
        Operation::Rts => {
            cpu.registers.pc = pull_pc(cpu, bus).wrapping_add(1);
            false
        }
        Operation::Pha => {
            let value = cpu.registers.accumulator;
            push_stack(cpu, bus, value);
            false
        }
        Operation::Php => {
            let status = cpu.registers.status.to_stack_byte(StatusReadContext::PushStack);
            push_stack(cpu, bus, status);
            cpu.registers.status.set_break(false).set_unused(true);
            false
        }
        Operation::Pla => {
            let value = pull_stack(cpu, bus);
            cpu.registers.accumulator = value;
            cpu.registers.status.set_nz(value);
            false
        }
        Operation::Plp => {
            let value = pull_stack(cpu, bus);
            cpu.registers.status = StatusFlags::from_byte(value);
            cpu.registers.status.set_unused(true);
            false
        }
        Operation::Brk => {
            // Immediate addressing has already stepped PC past the padding byte
            let pc = cpu.registers.pc;
            push_pc(cpu, bus, pc);

            let status = cpu.registers.status.to_stack_byte(StatusReadContext::Brk);
            push_stack(cpu, bus, status);
            cpu.registers.status.set_break(false).set_unused(true).set_interrupt_disable(true);

            let lsb = bus.read(IRQ_VECTOR);
            let msb = bus.read(IRQ_VECTOR + 1);
            cpu.registers.pc = u16::from_le_bytes([lsb, msb]);
            false
        }
        Operation::Rti => {
            let value = pull_stack(cpu, bus);
            cpu.registers.status = StatusFlags::from_byte(value);
            cpu.registers.status.set_break(false).set_unused(false);

            cpu.registers.pc = pull_pc(cpu, bus);
            false
        }
        Operation::Clc => impl_set_status_flag!(cpu, carry = false),
        Operation::Cld => impl_set_status_flag!(cpu, decimal = false),
        Operation::Cli => impl_set_status_flag!(cpu, interrupt_disable = false),
        Operation::Clv => impl_set_status_flag!(cpu, overflow = false),
        Operation::Sec => impl_set_status_flag!(cpu, carry = true),
        Operation::Sed => impl_set_status_flag!(cpu, decimal = true),
        Operation::Sei => impl_set_status_flag!(cpu, interrupt_disable = true),
        // Unofficial absolute,X NOPs would take the page-crossing penalty, but they are wired as
        // implied-mode here and so never cross a page
        Operation::Nop => matches!(cpu.state.opcode, 0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC),
        Operation::Illegal => false,
    }
}

/// Fetch, decode, and execute the instruction at PC, then load its full cycle cost.
pub(crate) fn execute_instruction<B: BusInterface>(cpu: &mut Mos6502, bus: &mut B) {
    // U is hardwired high; RTI and host register writes can leave it clear
    cpu.registers.status.set_unused(true);

    let pc = cpu.registers.pc;
    let opcode = addressing::fetch_operand(cpu, bus);
    let entry = opcode_entry(opcode);

    log::trace!(
        "{pc:04X}  {opcode:02X}  {} {:?}  A={:02X} X={:02X} Y={:02X} P={:02X} S={:02X}",
        entry.mnemonic(),
        entry.mode,
        cpu.registers.accumulator,
        cpu.registers.x,
        cpu.registers.y,
        cpu.registers.status.to_byte(),
        cpu.registers.sp
    );

    if !entry.is_documented() {
        log::debug!("Executing undocumented opcode {opcode:02X} at {pc:04X}");
    }

    cpu.state.opcode = opcode;
    cpu.state.cycles_remaining = entry.cycles;

    let page_crossed = addressing::resolve(cpu, bus, entry.mode);
    let honors_page_penalty = execute_operation(cpu, bus, entry.operation);

    cpu.state.cycles_remaining += u8::from(page_crossed && honors_page_penalty);
}
