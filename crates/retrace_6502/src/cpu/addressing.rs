//! Addressing-mode resolution: operand fetch, effective-address
//! computation and page-cross detection.
//!
//! Resolution performs the real operand/pointer reads through the bus;
//! those reads are part of the instruction's documented cost and their
//! side effects are the bus's business. The resolved record keeps the
//! raw operand bytes and any fetched value so the trace emitter never
//! has to touch the bus again.

use super::decode::{Descriptor, Mnemonic};
use super::{Bus, Cpu};

/// The thirteen NMOS 6502 addressing modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Outcome of resolving one instruction's operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolvedOperand {
    /// Effective address, when the mode produces one.
    pub addr: Option<u16>,
    /// Value fetched during resolution: the immediate byte, or the
    /// byte at the effective address (skipped for JMP/JSR targets).
    pub value: Option<u8>,
    /// Indirect-Y's dereferenced base pointer, kept for the trace
    /// annotation.
    pub intermediate: Option<u16>,
    /// High byte of base and effective address differ.
    pub page_crossed: bool,
    /// Raw operand bytes as fetched, for the trace byte column.
    pub raw: [u8; 2],
    pub raw_len: u8,
}

impl ResolvedOperand {
    /// Effective address; 0 for modes that carry none.
    #[inline]
    pub fn addr(&self) -> u16 {
        self.addr.unwrap_or(0)
    }

    /// Fetched value; 0 for modes that carry none.
    #[inline]
    pub fn value(&self) -> u8 {
        self.value.unwrap_or(0)
    }
}

/// Whether an indexed read of this mnemonic pays the one-cycle
/// page-cross penalty. Stores and read-modify-write forms have the
/// fixed higher base cost instead; branches account for their extras
/// at execution.
pub(crate) const fn page_cross_penalty(mnemonic: Mnemonic) -> bool {
    use Mnemonic::*;
    matches!(
        mnemonic,
        Adc | And | Cmp | Eor | Lda | Ldx | Ldy | Ora | Sbc | Nop | Lax | Las
    )
}

#[inline]
const fn crossed(base: u16, effective: u16) -> bool {
    (base & 0xFF00) != (effective & 0xFF00)
}

impl Cpu {
    /// Resolve the operand for a freshly decoded instruction. PC sits
    /// just past the opcode on entry and past the whole instruction on
    /// exit.
    pub(crate) fn resolve<B: Bus>(&mut self, bus: &mut B, d: &Descriptor) -> ResolvedOperand {
        let mut out = ResolvedOperand::default();
        match d.mode {
            AddressingMode::Implied | AddressingMode::Accumulator => {}
            AddressingMode::Immediate => {
                let value = self.fetch_operand8(bus, &mut out);
                out.value = Some(value);
            }
            AddressingMode::ZeroPage => {
                let addr = self.fetch_operand8(bus, &mut out) as u16;
                self.finish_read(bus, d, &mut out, addr);
            }
            AddressingMode::ZeroPageX => {
                let base = self.fetch_operand8(bus, &mut out);
                let addr = base.wrapping_add(self.regs.x) as u16;
                self.finish_read(bus, d, &mut out, addr);
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_operand8(bus, &mut out);
                let addr = base.wrapping_add(self.regs.y) as u16;
                self.finish_read(bus, d, &mut out, addr);
            }
            AddressingMode::Absolute => {
                let addr = self.fetch_operand16(bus, &mut out);
                self.finish_read(bus, d, &mut out, addr);
            }
            AddressingMode::AbsoluteX => {
                let base = self.fetch_operand16(bus, &mut out);
                let addr = base.wrapping_add(self.regs.x as u16);
                out.page_crossed = crossed(base, addr);
                self.finish_read(bus, d, &mut out, addr);
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_operand16(bus, &mut out);
                let addr = base.wrapping_add(self.regs.y as u16);
                out.page_crossed = crossed(base, addr);
                self.finish_read(bus, d, &mut out, addr);
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_operand16(bus, &mut out);
                // Hardware quirk: the pointer's high byte comes from
                // offset 0 of the same page when the low byte is $FF.
                let lo = bus.read8(ptr) as u16;
                let hi_addr = if ptr & 0x00FF == 0x00FF {
                    ptr & 0xFF00
                } else {
                    ptr.wrapping_add(1)
                };
                let hi = bus.read8(hi_addr) as u16;
                out.addr = Some((hi << 8) | lo);
            }
            AddressingMode::IndirectX => {
                let base = self.fetch_operand8(bus, &mut out);
                let ptr = base.wrapping_add(self.regs.x);
                // Pointer stays in the zero page, wrapping $FF -> $00.
                let lo = bus.read8(ptr as u16) as u16;
                let hi = bus.read8(ptr.wrapping_add(1) as u16) as u16;
                let addr = (hi << 8) | lo;
                self.finish_read(bus, d, &mut out, addr);
            }
            AddressingMode::IndirectY => {
                let ptr = self.fetch_operand8(bus, &mut out);
                let lo = bus.read8(ptr as u16) as u16;
                let hi = bus.read8(ptr.wrapping_add(1) as u16) as u16;
                let base = (hi << 8) | lo;
                let addr = base.wrapping_add(self.regs.y as u16);
                out.intermediate = Some(base);
                out.page_crossed = crossed(base, addr);
                self.finish_read(bus, d, &mut out, addr);
            }
            AddressingMode::Relative => {
                let offset = self.fetch_operand8(bus, &mut out) as i8;
                let target = self.regs.pc.wrapping_add(offset as u16);
                // Extra-extra cycle applies when the target page differs
                // from the page of the instruction's next address.
                out.page_crossed = crossed(self.regs.pc, target);
                out.addr = Some(target);
            }
        }
        out
    }

    fn fetch_operand8<B: Bus>(&mut self, bus: &mut B, out: &mut ResolvedOperand) -> u8 {
        let value = self.fetch8(bus);
        out.raw[out.raw_len as usize] = value;
        out.raw_len += 1;
        value
    }

    fn fetch_operand16<B: Bus>(&mut self, bus: &mut B, out: &mut ResolvedOperand) -> u16 {
        let lo = self.fetch_operand8(bus, out) as u16;
        let hi = self.fetch_operand8(bus, out) as u16;
        (hi << 8) | lo
    }

    /// Record the effective address and fetch the byte there unless the
    /// instruction only ever treats it as a jump target.
    fn finish_read<B: Bus>(
        &mut self,
        bus: &mut B,
        d: &Descriptor,
        out: &mut ResolvedOperand,
        addr: u16,
    ) {
        out.addr = Some(addr);
        if !matches!(d.mnemonic, Mnemonic::Jmp | Mnemonic::Jsr) {
            out.value = Some(bus.read8(addr));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::decode::decode;
    use super::super::tests::TestBus;
    use super::*;

    fn cpu_at(pc: u16) -> Cpu {
        let mut cpu = Cpu::new();
        cpu.regs.pc = pc;
        cpu
    }

    #[test]
    fn zero_page_indexed_wraps_in_page() {
        let mut bus = TestBus::default();
        bus.memory[0x0200] = 0xFF; // operand
        bus.memory[0x0004] = 0xAB; // $FF + $05 wraps to $04
        let mut cpu = cpu_at(0x0200);
        cpu.regs.x = 0x05;

        let d = decode(0xB5); // LDA zp,X
        let op = cpu.resolve(&mut bus, &d);
        assert_eq!(op.addr, Some(0x0004));
        assert_eq!(op.value, Some(0xAB));
        assert!(!op.page_crossed);
        assert_eq!(cpu.regs.pc, 0x0201);
    }

    #[test]
    fn absolute_indexed_detects_page_cross() {
        let mut bus = TestBus::default();
        bus.memory[0x0200] = 0xFF;
        bus.memory[0x0201] = 0x02; // base $02FF
        bus.memory[0x0300] = 0x77;
        let mut cpu = cpu_at(0x0200);
        cpu.regs.y = 0x01;

        let d = decode(0xB9); // LDA abs,Y
        let op = cpu.resolve(&mut bus, &d);
        assert_eq!(op.addr, Some(0x0300));
        assert_eq!(op.value, Some(0x77));
        assert!(op.page_crossed);
    }

    #[test]
    fn absolute_indexed_same_page_does_not_cross() {
        let mut bus = TestBus::default();
        bus.memory[0x0200] = 0x80;
        bus.memory[0x0201] = 0x02;
        let mut cpu = cpu_at(0x0200);
        cpu.regs.y = 0x10;

        let d = decode(0xB9);
        let op = cpu.resolve(&mut bus, &d);
        assert_eq!(op.addr, Some(0x0290));
        assert!(!op.page_crossed);
    }

    #[test]
    fn indirect_jmp_reproduces_page_boundary_quirk() {
        let mut bus = TestBus::default();
        bus.memory[0x0200] = 0xFF;
        bus.memory[0x0201] = 0x03; // pointer $03FF
        bus.memory[0x03FF] = 0x34; // target low
        bus.memory[0x0300] = 0x12; // target high comes from $0300, not $0400
        bus.memory[0x0400] = 0xEE;
        let mut cpu = cpu_at(0x0200);

        let d = decode(0x6C);
        let op = cpu.resolve(&mut bus, &d);
        assert_eq!(op.addr, Some(0x1234));
        assert_eq!(op.value, None);
    }

    #[test]
    fn indirect_x_pointer_wraps_in_zero_page() {
        let mut bus = TestBus::default();
        bus.memory[0x0200] = 0xFE; // base
        bus.memory[0x00FF] = 0x34; // ($FE + $01) = $FF -> low
        bus.memory[0x0000] = 0x12; // high wraps to $00
        bus.memory[0x1234] = 0x99;
        let mut cpu = cpu_at(0x0200);
        cpu.regs.x = 0x01;

        let d = decode(0xA1); // LDA (zp,X)
        let op = cpu.resolve(&mut bus, &d);
        assert_eq!(op.addr, Some(0x1234));
        assert_eq!(op.value, Some(0x99));
        assert!(!op.page_crossed);
    }

    #[test]
    fn indirect_y_records_base_and_cross() {
        let mut bus = TestBus::default();
        bus.memory[0x0200] = 0x40;
        bus.memory[0x0040] = 0xFF;
        bus.memory[0x0041] = 0x02; // base $02FF
        bus.memory[0x0301] = 0x55;
        let mut cpu = cpu_at(0x0200);
        cpu.regs.y = 0x02;

        let d = decode(0xB1); // LDA (zp),Y
        let op = cpu.resolve(&mut bus, &d);
        assert_eq!(op.intermediate, Some(0x02FF));
        assert_eq!(op.addr, Some(0x0301));
        assert_eq!(op.value, Some(0x55));
        assert!(op.page_crossed);
    }

    #[test]
    fn relative_target_and_page_cross() {
        let mut bus = TestBus::default();
        bus.memory[0x02FD] = 0x10; // forward 16 from $02FE
        let mut cpu = cpu_at(0x02FD);
        let d = decode(0xD0); // BNE
        let op = cpu.resolve(&mut bus, &d);
        assert_eq!(op.addr, Some(0x030E));
        assert!(op.page_crossed);

        bus.memory[0x0210] = 0xF0; // backward 16 from $0211
        let mut cpu = cpu_at(0x0210);
        let op = cpu.resolve(&mut bus, &d);
        assert_eq!(op.addr, Some(0x0201));
        assert!(!op.page_crossed);
    }

    #[test]
    fn store_forms_never_take_the_penalty() {
        assert!(!page_cross_penalty(Mnemonic::Sta));
        assert!(!page_cross_penalty(Mnemonic::Dcp));
        assert!(!page_cross_penalty(Mnemonic::Slo));
        assert!(page_cross_penalty(Mnemonic::Lda));
        assert!(page_cross_penalty(Mnemonic::Nop));
    }
}
