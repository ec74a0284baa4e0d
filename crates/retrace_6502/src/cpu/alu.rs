//! ALU and flag-computation helpers shared by the instruction
//! implementations.

use super::{Cpu, Status};

impl Cpu {
    /// N from bit 7, Z from equality with zero. Every data-producing
    /// instruction routes its result through here.
    #[inline]
    pub(super) fn set_zn(&mut self, value: u8) {
        self.regs.p.set(Status::ZERO, value == 0);
        self.regs.p.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Add with carry. Honours decimal mode only when the configuration
    /// enables it; the common target variant leaves D settable but
    /// ignored.
    pub(super) fn adc(&mut self, value: u8) {
        if self.config.bcd_enabled && self.regs.p.contains(Status::DECIMAL) {
            self.adc_decimal(value);
        } else {
            self.adc_binary(value);
        }
    }

    fn adc_binary(&mut self, value: u8) {
        let a = self.regs.a;
        let carry_in = self.regs.p.contains(Status::CARRY) as u16;
        let sum = a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.regs.p.set(Status::CARRY, sum > 0xFF);
        // Signed overflow: operands agree in sign, result disagrees.
        self.regs
            .p
            .set(Status::OVERFLOW, (a ^ result) & (value ^ result) & 0x80 != 0);
        self.regs.a = result;
        self.set_zn(result);
    }

    /// NMOS decimal add: Z reflects the binary sum, N and V the
    /// intermediate result after low-nibble correction.
    fn adc_decimal(&mut self, value: u8) {
        let a = self.regs.a;
        let carry_in = self.regs.p.contains(Status::CARRY) as u16;
        let binary = a as u16 + value as u16 + carry_in;
        self.regs.p.set(Status::ZERO, binary as u8 == 0);

        let mut lo = (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry_in;
        let mut hi = (a >> 4) as u16 + (value >> 4) as u16;
        if lo > 9 {
            lo += 6;
            hi += 1;
        }
        let intermediate = ((hi << 4) | (lo & 0x0F)) as u8;
        self.regs.p.set(Status::NEGATIVE, intermediate & 0x80 != 0);
        self.regs.p.set(
            Status::OVERFLOW,
            (a ^ intermediate) & (value ^ intermediate) & 0x80 != 0,
        );
        if hi > 9 {
            hi += 6;
        }
        self.regs.p.set(Status::CARRY, hi > 0x0F);
        self.regs.a = ((hi << 4) | (lo & 0x0F)) as u8;
    }

    /// Subtract with carry: identical to ADC on the bitwise-inverted
    /// operand in binary mode. Decimal mode adjusts the stored result
    /// while the flags stay binary.
    pub(super) fn sbc(&mut self, value: u8) {
        if self.config.bcd_enabled && self.regs.p.contains(Status::DECIMAL) {
            self.sbc_decimal(value);
        } else {
            self.adc_binary(!value);
        }
    }

    fn sbc_decimal(&mut self, value: u8) {
        let a = self.regs.a;
        let borrow = !self.regs.p.contains(Status::CARRY) as i16;
        let binary = a as i16 - value as i16 - borrow;

        let mut lo = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
        let mut hi = (a >> 4) as i16 - (value >> 4) as i16;
        if lo & 0x10 != 0 {
            lo -= 6;
            hi -= 1;
        }
        if hi & 0x10 != 0 {
            hi -= 6;
        }

        let result = binary as u8;
        self.regs.p.set(Status::CARRY, binary >= 0);
        self.regs
            .p
            .set(Status::OVERFLOW, (a ^ value) & (a ^ result) & 0x80 != 0);
        self.set_zn(result);
        self.regs.a = ((hi as u8) << 4) | (lo as u8 & 0x0F);
    }

    /// Compare: C when register >= operand (unsigned), N/Z from the
    /// subtraction. The register is untouched.
    pub(super) fn compare(&mut self, register: u8, value: u8) {
        self.regs.p.set(Status::CARRY, register >= value);
        self.set_zn(register.wrapping_sub(value));
    }

    /// Shift left; bit 7 exits into C.
    pub(super) fn asl(&mut self, value: u8) -> u8 {
        self.regs.p.set(Status::CARRY, value & 0x80 != 0);
        let result = value << 1;
        self.set_zn(result);
        result
    }

    /// Shift right; bit 0 exits into C.
    pub(super) fn lsr(&mut self, value: u8) -> u8 {
        self.regs.p.set(Status::CARRY, value & 0x01 != 0);
        let result = value >> 1;
        self.set_zn(result);
        result
    }

    /// Rotate left: previous C enters bit 0, bit 7 exits into C.
    pub(super) fn rol(&mut self, value: u8) -> u8 {
        let carry_in = self.regs.p.contains(Status::CARRY) as u8;
        self.regs.p.set(Status::CARRY, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.set_zn(result);
        result
    }

    /// Rotate right: previous C enters bit 7, bit 0 exits into C.
    pub(super) fn ror(&mut self, value: u8) -> u8 {
        let carry_in = (self.regs.p.contains(Status::CARRY) as u8) << 7;
        self.regs.p.set(Status::CARRY, value & 0x01 != 0);
        let result = (value >> 1) | carry_in;
        self.set_zn(result);
        result
    }
}
