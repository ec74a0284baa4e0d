//! Opcode decoding: a total function from every byte value to an
//! immutable instruction descriptor.
//!
//! The table is an exhaustively-matched `const fn` rather than a
//! runtime-populated array so the compiler proves no opcode value is
//! left unhandled. Undocumented opcodes decode like any other, flagged
//! `illegal`, with the hardware-accurate mode and cycle cost.

use super::addressing::AddressingMode;

/// Instruction mnemonics, documented and undocumented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
    // Undocumented.
    Lax, Sax, Dcp, Isb, Slo, Rla, Sre, Rra, Anc, Alr, Arr, Axs, Xaa,
    Ahx, Tas, Shx, Shy, Las, Jam,
}

impl Mnemonic {
    /// Canonical three-letter spelling used in trace lines.
    pub const fn text(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC",
            Bcs => "BCS", Beq => "BEQ", Bit => "BIT", Bmi => "BMI",
            Bne => "BNE", Bpl => "BPL", Brk => "BRK", Bvc => "BVC",
            Bvs => "BVS", Clc => "CLC", Cld => "CLD", Cli => "CLI",
            Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR",
            Inc => "INC", Inx => "INX", Iny => "INY", Jmp => "JMP",
            Jsr => "JSR", Lda => "LDA", Ldx => "LDX", Ldy => "LDY",
            Lsr => "LSR", Nop => "NOP", Ora => "ORA", Pha => "PHA",
            Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC",
            Sec => "SEC", Sed => "SED", Sei => "SEI", Sta => "STA",
            Stx => "STX", Sty => "STY", Tax => "TAX", Tay => "TAY",
            Tsx => "TSX", Txa => "TXA", Txs => "TXS", Tya => "TYA",
            Lax => "LAX", Sax => "SAX", Dcp => "DCP", Isb => "ISB",
            Slo => "SLO", Rla => "RLA", Sre => "SRE", Rra => "RRA",
            Anc => "ANC", Alr => "ALR", Arr => "ARR", Axs => "AXS",
            Xaa => "XAA", Ahx => "AHX", Tas => "TAS", Shx => "SHX",
            Shy => "SHY", Las => "LAS", Jam => "JAM",
        }
    }
}

/// Immutable per-opcode descriptor. `base_cycles` excludes the
/// conditional extras (page crossing, taken branches) that the address
/// resolver and execution add per the policy tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub base_cycles: u8,
    pub illegal: bool,
}

impl Descriptor {
    /// Total instruction length in bytes, opcode included.
    #[inline]
    pub const fn len(&self) -> u8 {
        1 + self.mode.operand_len()
    }
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, base_cycles: u8) -> Descriptor {
    Descriptor {
        mnemonic,
        mode,
        base_cycles,
        illegal: false,
    }
}

const fn undoc(mnemonic: Mnemonic, mode: AddressingMode, base_cycles: u8) -> Descriptor {
    Descriptor {
        mnemonic,
        mode,
        base_cycles,
        illegal: true,
    }
}

/// Decode one opcode byte. Total over all 256 values; pure.
pub const fn decode(opcode: u8) -> Descriptor {
    use AddressingMode::*;
    use Mnemonic::*;
    match opcode {
        // 0x00
        0x00 => op(Brk, Implied, 7),
        0x01 => op(Ora, IndirectX, 6),
        0x02 => undoc(Jam, Implied, 2),
        0x03 => undoc(Slo, IndirectX, 8),
        0x04 => undoc(Nop, ZeroPage, 3),
        0x05 => op(Ora, ZeroPage, 3),
        0x06 => op(Asl, ZeroPage, 5),
        0x07 => undoc(Slo, ZeroPage, 5),
        0x08 => op(Php, Implied, 3),
        0x09 => op(Ora, Immediate, 2),
        0x0A => op(Asl, Accumulator, 2),
        0x0B => undoc(Anc, Immediate, 2),
        0x0C => undoc(Nop, Absolute, 4),
        0x0D => op(Ora, Absolute, 4),
        0x0E => op(Asl, Absolute, 6),
        0x0F => undoc(Slo, Absolute, 6),
        // 0x10
        0x10 => op(Bpl, Relative, 2),
        0x11 => op(Ora, IndirectY, 5),
        0x12 => undoc(Jam, Implied, 2),
        0x13 => undoc(Slo, IndirectY, 8),
        0x14 => undoc(Nop, ZeroPageX, 4),
        0x15 => op(Ora, ZeroPageX, 4),
        0x16 => op(Asl, ZeroPageX, 6),
        0x17 => undoc(Slo, ZeroPageX, 6),
        0x18 => op(Clc, Implied, 2),
        0x19 => op(Ora, AbsoluteY, 4),
        0x1A => undoc(Nop, Implied, 2),
        0x1B => undoc(Slo, AbsoluteY, 7),
        0x1C => undoc(Nop, AbsoluteX, 4),
        0x1D => op(Ora, AbsoluteX, 4),
        0x1E => op(Asl, AbsoluteX, 7),
        0x1F => undoc(Slo, AbsoluteX, 7),
        // 0x20
        0x20 => op(Jsr, Absolute, 6),
        0x21 => op(And, IndirectX, 6),
        0x22 => undoc(Jam, Implied, 2),
        0x23 => undoc(Rla, IndirectX, 8),
        0x24 => op(Bit, ZeroPage, 3),
        0x25 => op(And, ZeroPage, 3),
        0x26 => op(Rol, ZeroPage, 5),
        0x27 => undoc(Rla, ZeroPage, 5),
        0x28 => op(Plp, Implied, 4),
        0x29 => op(And, Immediate, 2),
        0x2A => op(Rol, Accumulator, 2),
        0x2B => undoc(Anc, Immediate, 2),
        0x2C => op(Bit, Absolute, 4),
        0x2D => op(And, Absolute, 4),
        0x2E => op(Rol, Absolute, 6),
        0x2F => undoc(Rla, Absolute, 6),
        // 0x30
        0x30 => op(Bmi, Relative, 2),
        0x31 => op(And, IndirectY, 5),
        0x32 => undoc(Jam, Implied, 2),
        0x33 => undoc(Rla, IndirectY, 8),
        0x34 => undoc(Nop, ZeroPageX, 4),
        0x35 => op(And, ZeroPageX, 4),
        0x36 => op(Rol, ZeroPageX, 6),
        0x37 => undoc(Rla, ZeroPageX, 6),
        0x38 => op(Sec, Implied, 2),
        0x39 => op(And, AbsoluteY, 4),
        0x3A => undoc(Nop, Implied, 2),
        0x3B => undoc(Rla, AbsoluteY, 7),
        0x3C => undoc(Nop, AbsoluteX, 4),
        0x3D => op(And, AbsoluteX, 4),
        0x3E => op(Rol, AbsoluteX, 7),
        0x3F => undoc(Rla, AbsoluteX, 7),
        // 0x40
        0x40 => op(Rti, Implied, 6),
        0x41 => op(Eor, IndirectX, 6),
        0x42 => undoc(Jam, Implied, 2),
        0x43 => undoc(Sre, IndirectX, 8),
        0x44 => undoc(Nop, ZeroPage, 3),
        0x45 => op(Eor, ZeroPage, 3),
        0x46 => op(Lsr, ZeroPage, 5),
        0x47 => undoc(Sre, ZeroPage, 5),
        0x48 => op(Pha, Implied, 3),
        0x49 => op(Eor, Immediate, 2),
        0x4A => op(Lsr, Accumulator, 2),
        0x4B => undoc(Alr, Immediate, 2),
        0x4C => op(Jmp, Absolute, 3),
        0x4D => op(Eor, Absolute, 4),
        0x4E => op(Lsr, Absolute, 6),
        0x4F => undoc(Sre, Absolute, 6),
        // 0x50
        0x50 => op(Bvc, Relative, 2),
        0x51 => op(Eor, IndirectY, 5),
        0x52 => undoc(Jam, Implied, 2),
        0x53 => undoc(Sre, IndirectY, 8),
        0x54 => undoc(Nop, ZeroPageX, 4),
        0x55 => op(Eor, ZeroPageX, 4),
        0x56 => op(Lsr, ZeroPageX, 6),
        0x57 => undoc(Sre, ZeroPageX, 6),
        0x58 => op(Cli, Implied, 2),
        0x59 => op(Eor, AbsoluteY, 4),
        0x5A => undoc(Nop, Implied, 2),
        0x5B => undoc(Sre, AbsoluteY, 7),
        0x5C => undoc(Nop, AbsoluteX, 4),
        0x5D => op(Eor, AbsoluteX, 4),
        0x5E => op(Lsr, AbsoluteX, 7),
        0x5F => undoc(Sre, AbsoluteX, 7),
        // 0x60
        0x60 => op(Rts, Implied, 6),
        0x61 => op(Adc, IndirectX, 6),
        0x62 => undoc(Jam, Implied, 2),
        0x63 => undoc(Rra, IndirectX, 8),
        0x64 => undoc(Nop, ZeroPage, 3),
        0x65 => op(Adc, ZeroPage, 3),
        0x66 => op(Ror, ZeroPage, 5),
        0x67 => undoc(Rra, ZeroPage, 5),
        0x68 => op(Pla, Implied, 4),
        0x69 => op(Adc, Immediate, 2),
        0x6A => op(Ror, Accumulator, 2),
        0x6B => undoc(Arr, Immediate, 2),
        0x6C => op(Jmp, Indirect, 5),
        0x6D => op(Adc, Absolute, 4),
        0x6E => op(Ror, Absolute, 6),
        0x6F => undoc(Rra, Absolute, 6),
        // 0x70
        0x70 => op(Bvs, Relative, 2),
        0x71 => op(Adc, IndirectY, 5),
        0x72 => undoc(Jam, Implied, 2),
        0x73 => undoc(Rra, IndirectY, 8),
        0x74 => undoc(Nop, ZeroPageX, 4),
        0x75 => op(Adc, ZeroPageX, 4),
        0x76 => op(Ror, ZeroPageX, 6),
        0x77 => undoc(Rra, ZeroPageX, 6),
        0x78 => op(Sei, Implied, 2),
        0x79 => op(Adc, AbsoluteY, 4),
        0x7A => undoc(Nop, Implied, 2),
        0x7B => undoc(Rra, AbsoluteY, 7),
        0x7C => undoc(Nop, AbsoluteX, 4),
        0x7D => op(Adc, AbsoluteX, 4),
        0x7E => op(Ror, AbsoluteX, 7),
        0x7F => undoc(Rra, AbsoluteX, 7),
        // 0x80
        0x80 => undoc(Nop, Immediate, 2),
        0x81 => op(Sta, IndirectX, 6),
        0x82 => undoc(Nop, Immediate, 2),
        0x83 => undoc(Sax, IndirectX, 6),
        0x84 => op(Sty, ZeroPage, 3),
        0x85 => op(Sta, ZeroPage, 3),
        0x86 => op(Stx, ZeroPage, 3),
        0x87 => undoc(Sax, ZeroPage, 3),
        0x88 => op(Dey, Implied, 2),
        0x89 => undoc(Nop, Immediate, 2),
        0x8A => op(Txa, Implied, 2),
        0x8B => undoc(Xaa, Immediate, 2),
        0x8C => op(Sty, Absolute, 4),
        0x8D => op(Sta, Absolute, 4),
        0x8E => op(Stx, Absolute, 4),
        0x8F => undoc(Sax, Absolute, 4),
        // 0x90
        0x90 => op(Bcc, Relative, 2),
        0x91 => op(Sta, IndirectY, 6),
        0x92 => undoc(Jam, Implied, 2),
        0x93 => undoc(Ahx, IndirectY, 6),
        0x94 => op(Sty, ZeroPageX, 4),
        0x95 => op(Sta, ZeroPageX, 4),
        0x96 => op(Stx, ZeroPageY, 4),
        0x97 => undoc(Sax, ZeroPageY, 4),
        0x98 => op(Tya, Implied, 2),
        0x99 => op(Sta, AbsoluteY, 5),
        0x9A => op(Txs, Implied, 2),
        0x9B => undoc(Tas, AbsoluteY, 5),
        0x9C => undoc(Shy, AbsoluteX, 5),
        0x9D => op(Sta, AbsoluteX, 5),
        0x9E => undoc(Shx, AbsoluteY, 5),
        0x9F => undoc(Ahx, AbsoluteY, 5),
        // 0xA0
        0xA0 => op(Ldy, Immediate, 2),
        0xA1 => op(Lda, IndirectX, 6),
        0xA2 => op(Ldx, Immediate, 2),
        0xA3 => undoc(Lax, IndirectX, 6),
        0xA4 => op(Ldy, ZeroPage, 3),
        0xA5 => op(Lda, ZeroPage, 3),
        0xA6 => op(Ldx, ZeroPage, 3),
        0xA7 => undoc(Lax, ZeroPage, 3),
        0xA8 => op(Tay, Implied, 2),
        0xA9 => op(Lda, Immediate, 2),
        0xAA => op(Tax, Implied, 2),
        0xAB => undoc(Lax, Immediate, 2),
        0xAC => op(Ldy, Absolute, 4),
        0xAD => op(Lda, Absolute, 4),
        0xAE => op(Ldx, Absolute, 4),
        0xAF => undoc(Lax, Absolute, 4),
        // 0xB0
        0xB0 => op(Bcs, Relative, 2),
        0xB1 => op(Lda, IndirectY, 5),
        0xB2 => undoc(Jam, Implied, 2),
        0xB3 => undoc(Lax, IndirectY, 5),
        0xB4 => op(Ldy, ZeroPageX, 4),
        0xB5 => op(Lda, ZeroPageX, 4),
        0xB6 => op(Ldx, ZeroPageY, 4),
        0xB7 => undoc(Lax, ZeroPageY, 4),
        0xB8 => op(Clv, Implied, 2),
        0xB9 => op(Lda, AbsoluteY, 4),
        0xBA => op(Tsx, Implied, 2),
        0xBB => undoc(Las, AbsoluteY, 4),
        0xBC => op(Ldy, AbsoluteX, 4),
        0xBD => op(Lda, AbsoluteX, 4),
        0xBE => op(Ldx, AbsoluteY, 4),
        0xBF => undoc(Lax, AbsoluteY, 4),
        // 0xC0
        0xC0 => op(Cpy, Immediate, 2),
        0xC1 => op(Cmp, IndirectX, 6),
        0xC2 => undoc(Nop, Immediate, 2),
        0xC3 => undoc(Dcp, IndirectX, 8),
        0xC4 => op(Cpy, ZeroPage, 3),
        0xC5 => op(Cmp, ZeroPage, 3),
        0xC6 => op(Dec, ZeroPage, 5),
        0xC7 => undoc(Dcp, ZeroPage, 5),
        0xC8 => op(Iny, Implied, 2),
        0xC9 => op(Cmp, Immediate, 2),
        0xCA => op(Dex, Implied, 2),
        0xCB => undoc(Axs, Immediate, 2),
        0xCC => op(Cpy, Absolute, 4),
        0xCD => op(Cmp, Absolute, 4),
        0xCE => op(Dec, Absolute, 6),
        0xCF => undoc(Dcp, Absolute, 6),
        // 0xD0
        0xD0 => op(Bne, Relative, 2),
        0xD1 => op(Cmp, IndirectY, 5),
        0xD2 => undoc(Jam, Implied, 2),
        0xD3 => undoc(Dcp, IndirectY, 8),
        0xD4 => undoc(Nop, ZeroPageX, 4),
        0xD5 => op(Cmp, ZeroPageX, 4),
        0xD6 => op(Dec, ZeroPageX, 6),
        0xD7 => undoc(Dcp, ZeroPageX, 6),
        0xD8 => op(Cld, Implied, 2),
        0xD9 => op(Cmp, AbsoluteY, 4),
        0xDA => undoc(Nop, Implied, 2),
        0xDB => undoc(Dcp, AbsoluteY, 7),
        0xDC => undoc(Nop, AbsoluteX, 4),
        0xDD => op(Cmp, AbsoluteX, 4),
        0xDE => op(Dec, AbsoluteX, 7),
        0xDF => undoc(Dcp, AbsoluteX, 7),
        // 0xE0
        0xE0 => op(Cpx, Immediate, 2),
        0xE1 => op(Sbc, IndirectX, 6),
        0xE2 => undoc(Nop, Immediate, 2),
        0xE3 => undoc(Isb, IndirectX, 8),
        0xE4 => op(Cpx, ZeroPage, 3),
        0xE5 => op(Sbc, ZeroPage, 3),
        0xE6 => op(Inc, ZeroPage, 5),
        0xE7 => undoc(Isb, ZeroPage, 5),
        0xE8 => op(Inx, Implied, 2),
        0xE9 => op(Sbc, Immediate, 2),
        0xEA => op(Nop, Implied, 2),
        0xEB => undoc(Sbc, Immediate, 2),
        0xEC => op(Cpx, Absolute, 4),
        0xED => op(Sbc, Absolute, 4),
        0xEE => op(Inc, Absolute, 6),
        0xEF => undoc(Isb, Absolute, 6),
        // 0xF0
        0xF0 => op(Beq, Relative, 2),
        0xF1 => op(Sbc, IndirectY, 5),
        0xF2 => undoc(Jam, Implied, 2),
        0xF3 => undoc(Isb, IndirectY, 8),
        0xF4 => undoc(Nop, ZeroPageX, 4),
        0xF5 => op(Sbc, ZeroPageX, 4),
        0xF6 => op(Inc, ZeroPageX, 6),
        0xF7 => undoc(Isb, ZeroPageX, 6),
        0xF8 => op(Sed, Implied, 2),
        0xF9 => op(Sbc, AbsoluteY, 4),
        0xFA => undoc(Nop, Implied, 2),
        0xFB => undoc(Isb, AbsoluteY, 7),
        0xFC => undoc(Nop, AbsoluteX, 4),
        0xFD => op(Sbc, AbsoluteX, 4),
        0xFE => op(Inc, AbsoluteX, 7),
        0xFF => undoc(Isb, AbsoluteX, 7),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_total_and_pure() {
        for opcode in 0..=255u8 {
            let first = decode(opcode);
            let second = decode(opcode);
            assert_eq!(first, second, "opcode {opcode:02X} must decode identically");
            assert!(first.base_cycles >= 2 && first.base_cycles <= 8);
            assert!(first.len() >= 1 && first.len() <= 3);
        }
    }

    #[test]
    fn documented_opcode_count_matches_silicon() {
        let documented = (0..=255u8).filter(|&o| !decode(o).illegal).count();
        assert_eq!(documented, 151);
    }

    #[test]
    fn spot_check_documented_entries() {
        let lda_imm = decode(0xA9);
        assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
        assert_eq!(lda_imm.mode, AddressingMode::Immediate);
        assert_eq!(lda_imm.base_cycles, 2);
        assert_eq!(lda_imm.len(), 2);

        let jmp_ind = decode(0x6C);
        assert_eq!(jmp_ind.mnemonic, Mnemonic::Jmp);
        assert_eq!(jmp_ind.mode, AddressingMode::Indirect);
        assert_eq!(jmp_ind.base_cycles, 5);
        assert_eq!(jmp_ind.len(), 3);

        let brk = decode(0x00);
        assert_eq!(brk.mnemonic, Mnemonic::Brk);
        assert_eq!(brk.base_cycles, 7);
        assert_eq!(brk.len(), 1);

        let sta_absx = decode(0x9D);
        assert_eq!(sta_absx.base_cycles, 5);
    }

    #[test]
    fn spot_check_undocumented_entries() {
        let lax_zpy = decode(0xB7);
        assert!(lax_zpy.illegal);
        assert_eq!(lax_zpy.mnemonic, Mnemonic::Lax);
        assert_eq!(lax_zpy.mode, AddressingMode::ZeroPageY);

        let isb_absx = decode(0xFF);
        assert!(isb_absx.illegal);
        assert_eq!(isb_absx.mnemonic, Mnemonic::Isb);
        assert_eq!(isb_absx.base_cycles, 7);

        // The second SBC encoding behaves exactly like $E9 but is
        // flagged undocumented for the trace marker.
        let sbc_eb = decode(0xEB);
        assert!(sbc_eb.illegal);
        assert_eq!(sbc_eb.mnemonic, Mnemonic::Sbc);
    }

    #[test]
    fn all_twelve_jam_opcodes_are_flagged() {
        let jams = [
            0x02u8, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2,
        ];
        for opcode in jams {
            let d = decode(opcode);
            assert_eq!(d.mnemonic, Mnemonic::Jam, "opcode {opcode:02X}");
            assert!(d.illegal);
        }
        let jam_count = (0..=255u8)
            .filter(|&o| decode(o).mnemonic == Mnemonic::Jam)
            .count();
        assert_eq!(jam_count, 12);
    }
}
