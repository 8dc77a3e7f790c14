//! The opcode table: every byte value maps to exactly one operation, addressing mode, and base
//! cycle count.
//!
//! Undocumented opcode slots are mostly wired to [`Operation::Illegal`], which does nothing but
//! burn its table cycle count. A handful are wired to NOP, and 0xEB is wired to SBC, matching the
//! behavior that compatibility test programs expect from those slots.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No memory operand; operations that read an operand see the accumulator
    Implied,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Implied => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::Relative
            | Self::IndirectX
            | Self::IndirectY => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Placeholder for undocumented opcodes; no effect besides consuming cycles
    Illegal,
}

impl Operation {
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Illegal => "???",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub operation: Operation,
    pub mode: AddressingMode,
    /// Cycle cost before any page-crossing or branch penalties
    pub cycles: u8,
    documented: bool,
}

impl OpcodeEntry {
    #[must_use]
    pub const fn is_documented(&self) -> bool {
        self.documented
    }

    /// Mnemonic for display; undocumented slots always display as "???" regardless of what
    /// operation they are wired to.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        if self.documented { self.operation.mnemonic() } else { "???" }
    }
}

const fn doc(operation: Operation, mode: AddressingMode, cycles: u8) -> OpcodeEntry {
    OpcodeEntry { operation, mode, cycles, documented: true }
}

const fn undoc(operation: Operation, mode: AddressingMode, cycles: u8) -> OpcodeEntry {
    OpcodeEntry { operation, mode, cycles, documented: false }
}

#[allow(clippy::match_same_arms)]
const fn decode(opcode: u8) -> OpcodeEntry {
    use AddressingMode::*;
    use Operation::*;

    match opcode {
        0x00 => doc(Brk, Immediate, 7),
        0x01 => doc(Ora, IndirectX, 6),
        0x02 => undoc(Illegal, Implied, 2),
        0x03 => undoc(Illegal, Implied, 8),
        0x04 => undoc(Nop, Implied, 3),
        0x05 => doc(Ora, ZeroPage, 3),
        0x06 => doc(Asl, ZeroPage, 5),
        0x07 => undoc(Illegal, Implied, 5),
        0x08 => doc(Php, Implied, 3),
        0x09 => doc(Ora, Immediate, 2),
        0x0A => doc(Asl, Implied, 2),
        0x0B => undoc(Illegal, Implied, 2),
        0x0C => undoc(Nop, Implied, 4),
        0x0D => doc(Ora, Absolute, 4),
        0x0E => doc(Asl, Absolute, 6),
        0x0F => undoc(Illegal, Implied, 6),
        0x10 => doc(Bpl, Relative, 2),
        0x11 => doc(Ora, IndirectY, 5),
        0x12 => undoc(Illegal, Implied, 2),
        0x13 => undoc(Illegal, Implied, 8),
        0x14 => undoc(Nop, Implied, 4),
        0x15 => doc(Ora, ZeroPageX, 4),
        0x16 => doc(Asl, ZeroPageX, 6),
        0x17 => undoc(Illegal, Implied, 6),
        0x18 => doc(Clc, Implied, 2),
        0x19 => doc(Ora, AbsoluteY, 4),
        0x1A => undoc(Nop, Implied, 2),
        0x1B => undoc(Illegal, Implied, 7),
        0x1C => undoc(Nop, Implied, 4),
        0x1D => doc(Ora, AbsoluteX, 4),
        0x1E => doc(Asl, AbsoluteX, 7),
        0x1F => undoc(Illegal, Implied, 7),
        0x20 => doc(Jsr, Absolute, 6),
        0x21 => doc(And, IndirectX, 6),
        0x22 => undoc(Illegal, Implied, 2),
        0x23 => undoc(Illegal, Implied, 8),
        0x24 => doc(Bit, ZeroPage, 3),
        0x25 => doc(And, ZeroPage, 3),
        0x26 => doc(Rol, ZeroPage, 5),
        0x27 => undoc(Illegal, Implied, 5),
        0x28 => doc(Plp, Implied, 4),
        0x29 => doc(And, Immediate, 2),
        0x2A => doc(Rol, Implied, 2),
        0x2B => undoc(Illegal, Implied, 2),
        0x2C => doc(Bit, Absolute, 4),
        0x2D => doc(And, Absolute, 4),
        0x2E => doc(Rol, Absolute, 6),
        0x2F => undoc(Illegal, Implied, 6),
        0x30 => doc(Bmi, Relative, 2),
        0x31 => doc(And, IndirectY, 5),
        0x32 => undoc(Illegal, Implied, 2),
        0x33 => undoc(Illegal, Implied, 8),
        0x34 => undoc(Nop, Implied, 4),
        0x35 => doc(And, ZeroPageX, 4),
        0x36 => doc(Rol, ZeroPageX, 6),
        0x37 => undoc(Illegal, Implied, 6),
        0x38 => doc(Sec, Implied, 2),
        0x39 => doc(And, AbsoluteY, 4),
        0x3A => undoc(Nop, Implied, 2),
        0x3B => undoc(Illegal, Implied, 7),
        0x3C => undoc(Nop, Implied, 4),
        0x3D => doc(And, AbsoluteX, 4),
        0x3E => doc(Rol, AbsoluteX, 7),
        0x3F => undoc(Illegal, Implied, 7),
        0x40 => doc(Rti, Implied, 6),
        0x41 => doc(Eor, IndirectX, 6),
        0x42 => undoc(Illegal, Implied, 2),
        0x43 => undoc(Illegal, Implied, 8),
        0x44 => undoc(Nop, Implied, 3),
        0x45 => doc(Eor, ZeroPage, 3),
        0x46 => doc(Lsr, ZeroPage, 5),
        0x47 => undoc(Illegal, Implied, 5),
        0x48 => doc(Pha, Implied, 3),
        0x49 => doc(Eor, Immediate, 2),
        0x4A => doc(Lsr, Implied, 2),
        0x4B => undoc(Illegal, Implied, 2),
        0x4C => doc(Jmp, Absolute, 3),
        0x4D => doc(Eor, Absolute, 4),
        0x4E => doc(Lsr, Absolute, 6),
        0x4F => undoc(Illegal, Implied, 6),
        0x50 => doc(Bvc, Relative, 2),
        0x51 => doc(Eor, IndirectY, 5),
        0x52 => undoc(Illegal, Implied, 2),
        0x53 => undoc(Illegal, Implied, 8),
        0x54 => undoc(Nop, Implied, 4),
        0x55 => doc(Eor, ZeroPageX, 4),
        0x56 => doc(Lsr, ZeroPageX, 6),
        0x57 => undoc(Illegal, Implied, 6),
        0x58 => doc(Cli, Implied, 2),
        0x59 => doc(Eor, AbsoluteY, 4),
        0x5A => undoc(Nop, Implied, 2),
        0x5B => undoc(Illegal, Implied, 7),
        0x5C => undoc(Nop, Implied, 4),
        0x5D => doc(Eor, AbsoluteX, 4),
        0x5E => doc(Lsr, AbsoluteX, 7),
        0x5F => undoc(Illegal, Implied, 7),
        0x60 => doc(Rts, Implied, 6),
        0x61 => doc(Adc, IndirectX, 6),
        0x62 => undoc(Illegal, Implied, 2),
        0x63 => undoc(Illegal, Implied, 8),
        0x64 => undoc(Nop, Implied, 3),
        0x65 => doc(Adc, ZeroPage, 3),
        0x66 => doc(Ror, ZeroPage, 5),
        0x67 => undoc(Illegal, Implied, 5),
        0x68 => doc(Pla, Implied, 4),
        0x69 => doc(Adc, Immediate, 2),
        0x6A => doc(Ror, Implied, 2),
        0x6B => undoc(Illegal, Implied, 2),
        0x6C => doc(Jmp, Indirect, 5),
        0x6D => doc(Adc, Absolute, 4),
        0x6E => doc(Ror, Absolute, 6),
        0x6F => undoc(Illegal, Implied, 6),
        0x70 => doc(Bvs, Relative, 2),
        0x71 => doc(Adc, IndirectY, 5),
        0x72 => undoc(Illegal, Implied, 2),
        0x73 => undoc(Illegal, Implied, 8),
        0x74 => undoc(Nop, Implied, 4),
        0x75 => doc(Adc, ZeroPageX, 4),
        0x76 => doc(Ror, ZeroPageX, 6),
        0x77 => undoc(Illegal, Implied, 6),
        0x78 => doc(Sei, Implied, 2),
        0x79 => doc(Adc, AbsoluteY, 4),
        0x7A => undoc(Nop, Implied, 2),
        0x7B => undoc(Illegal, Implied, 7),
        0x7C => undoc(Nop, Implied, 4),
        0x7D => doc(Adc, AbsoluteX, 4),
        0x7E => doc(Ror, AbsoluteX, 7),
        0x7F => undoc(Illegal, Implied, 7),
        0x80 => undoc(Nop, Implied, 2),
        0x81 => doc(Sta, IndirectX, 6),
        0x82 => undoc(Nop, Implied, 2),
        0x83 => undoc(Illegal, Implied, 6),
        0x84 => doc(Sty, ZeroPage, 3),
        0x85 => doc(Sta, ZeroPage, 3),
        0x86 => doc(Stx, ZeroPage, 3),
        0x87 => undoc(Illegal, Implied, 3),
        0x88 => doc(Dey, Implied, 2),
        0x89 => undoc(Nop, Implied, 2),
        0x8A => doc(Txa, Implied, 2),
        0x8B => undoc(Illegal, Implied, 2),
        0x8C => doc(Sty, Absolute, 4),
        0x8D => doc(Sta, Absolute, 4),
        0x8E => doc(Stx, Absolute, 4),
        0x8F => undoc(Illegal, Implied, 4),
        0x90 => doc(Bcc, Relative, 2),
        0x91 => doc(Sta, IndirectY, 6),
        0x92 => undoc(Illegal, Implied, 2),
        0x93 => undoc(Illegal, Implied, 6),
        0x94 => doc(Sty, ZeroPageX, 4),
        0x95 => doc(Sta, ZeroPageX, 4),
        0x96 => doc(Stx, ZeroPageY, 4),
        0x97 => undoc(Illegal, Implied, 4),
        0x98 => doc(Tya, Implied, 2),
        0x99 => doc(Sta, AbsoluteY, 5),
        0x9A => doc(Txs, Implied, 2),
        0x9B => undoc(Illegal, Implied, 5),
        0x9C => undoc(Nop, Implied, 5),
        0x9D => doc(Sta, AbsoluteX, 5),
        0x9E => undoc(Illegal, Implied, 5),
        0x9F => undoc(Illegal, Implied, 5),
        0xA0 => doc(Ldy, Immediate, 2),
        0xA1 => doc(Lda, IndirectX, 6),
        0xA2 => doc(Ldx, Immediate, 2),
        0xA3 => undoc(Illegal, Implied, 6),
        0xA4 => doc(Ldy, ZeroPage, 3),
        0xA5 => doc(Lda, ZeroPage, 3),
        0xA6 => doc(Ldx, ZeroPage, 3),
        0xA7 => undoc(Illegal, Implied, 3),
        0xA8 => doc(Tay, Implied, 2),
        0xA9 => doc(Lda, Immediate, 2),
        0xAA => doc(Tax, Implied, 2),
        0xAB => undoc(Illegal, Implied, 2),
        0xAC => doc(Ldy, Absolute, 4),
        0xAD => doc(Lda, Absolute, 4),
        0xAE => doc(Ldx, Absolute, 4),
        0xAF => undoc(Illegal, Implied, 4),
        0xB0 => doc(Bcs, Relative, 2),
        0xB1 => doc(Lda, IndirectY, 5),
        0xB2 => undoc(Illegal, Implied, 2),
        0xB3 => undoc(Illegal, Implied, 5),
        0xB4 => doc(Ldy, ZeroPageX, 4),
        0xB5 => doc(Lda, ZeroPageX, 4),
        0xB6 => doc(Ldx, ZeroPageY, 4),
        0xB7 => undoc(Illegal, Implied, 4),
        0xB8 => doc(Clv, Implied, 2),
        0xB9 => doc(Lda, AbsoluteY, 4),
        0xBA => doc(Tsx, Implied, 2),
        0xBB => undoc(Illegal, Implied, 4),
        0xBC => doc(Ldy, AbsoluteX, 4),
        0xBD => doc(Lda, AbsoluteX, 4),
        0xBE => doc(Ldx, AbsoluteY, 4),
        0xBF => undoc(Illegal, Implied, 4),
        0xC0 => doc(Cpy, Immediate, 2),
        0xC1 => doc(Cmp, IndirectX, 6),
        0xC2 => undoc(Nop, Implied, 2),
        0xC3 => undoc(Illegal, Implied, 8),
        0xC4 => doc(Cpy, ZeroPage, 3),
        0xC5 => doc(Cmp, ZeroPage, 3),
        0xC6 => doc(Dec, ZeroPage, 5),
        0xC7 => undoc(Illegal, Implied, 5),
        0xC8 => doc(Iny, Implied, 2),
        0xC9 => doc(Cmp, Immediate, 2),
        0xCA => doc(Dex, Implied, 2),
        0xCB => undoc(Illegal, Implied, 2),
        0xCC => doc(Cpy, Absolute, 4),
        0xCD => doc(Cmp, Absolute, 4),
        0xCE => doc(Dec, Absolute, 6),
        0xCF => undoc(Illegal, Implied, 6),
        0xD0 => doc(Bne, Relative, 2),
        0xD1 => doc(Cmp, IndirectY, 5),
        0xD2 => undoc(Illegal, Implied, 2),
        0xD3 => undoc(Illegal, Implied, 8),
        0xD4 => undoc(Nop, Implied, 4),
        0xD5 => doc(Cmp, ZeroPageX, 4),
        0xD6 => doc(Dec, ZeroPageX, 6),
        0xD7 => undoc(Illegal, Implied, 6),
        0xD8 => doc(Cld, Implied, 2),
        0xD9 => doc(Cmp, AbsoluteY, 4),
        0xDA => undoc(Nop, Implied, 2),
        0xDB => undoc(Illegal, Implied, 7),
        0xDC => undoc(Nop, Implied, 4),
        0xDD => doc(Cmp, AbsoluteX, 4),
        0xDE => doc(Dec, AbsoluteX, 7),
        0xDF => undoc(Illegal, Implied, 7),
        0xE0 => doc(Cpx, Immediate, 2),
        0xE1 => doc(Sbc, IndirectX, 6),
        0xE2 => undoc(Nop, Implied, 2),
        0xE3 => undoc(Illegal, Implied, 8),
        0xE4 => doc(Cpx, ZeroPage, 3),
        0xE5 => doc(Sbc, ZeroPage, 3),
        0xE6 => doc(Inc, ZeroPage, 5),
        0xE7 => undoc(Illegal, Implied, 5),
        0xE8 => doc(Inx, Implied, 2),
        0xE9 => doc(Sbc, Immediate, 2),
        0xEA => doc(Nop, Implied, 2),
        0xEB => undoc(Sbc, Implied, 2),
        0xEC => doc(Cpx, Absolute, 4),
        0xED => doc(Sbc, Absolute, 4),
        0xEE => doc(Inc, Absolute, 6),
        0xEF => undoc(Illegal, Implied, 6),
        0xF0 => doc(Beq, Relative, 2),
        0xF1 => doc(Sbc, IndirectY, 5),
        0xF2 => undoc(Illegal, Implied, 2),
        0xF3 => undoc(Illegal, Implied, 8),
        0xF4 => undoc(Nop, Implied, 4),
        0xF5 => doc(Sbc, ZeroPageX, 4),
        0xF6 => doc(Inc, ZeroPageX, 6),
        0xF7 => undoc(Illegal, Implied, 6),
        0xF8 => doc(Sed, Implied, 2),
        0xF9 => doc(Sbc, AbsoluteY, 4),
        0xFA => undoc(Nop, Implied, 2),
        0xFB => undoc(Illegal, Implied, 7),
        0xFC => undoc(Nop, Implied, 4),
        0xFD => doc(Sbc, AbsoluteX, 4),
        0xFE => doc(Inc, AbsoluteX, 7),
        0xFF => undoc(Illegal, Implied, 7),
    }
}

const fn build_table() -> [OpcodeEntry; 256] {
    let mut table = [undoc(Operation::Illegal, AddressingMode::Implied, 0); 256];

    let mut i = 0;
    while i < table.len() {
        table[i] = decode(i as u8);
        i += 1;
    }

    table
}

pub static OPCODE_TABLE: [OpcodeEntry; 256] = build_table();

#[inline]
#[must_use]
pub fn opcode_entry(opcode: u8) -> &'static OpcodeEntry {
    &OPCODE_TABLE[usize::from(opcode)]
}
