use super::super::{Cpu, Status};

impl Cpu {
    #[inline]
    pub(super) fn and(&mut self, value: u8) {
        self.regs.a &= value;
        self.set_zn(self.regs.a);
    }

    #[inline]
    pub(super) fn ora(&mut self, value: u8) {
        self.regs.a |= value;
        self.set_zn(self.regs.a);
    }

    #[inline]
    pub(super) fn eor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.set_zn(self.regs.a);
    }

    /// BIT: Z from A & M, N and V copied straight from the operand's
    /// top two bits.
    pub(super) fn bit(&mut self, value: u8) {
        self.regs.p.set(Status::ZERO, self.regs.a & value == 0);
        self.regs.p.set(Status::NEGATIVE, value & 0x80 != 0);
        self.regs.p.set(Status::OVERFLOW, value & 0x40 != 0);
    }
}
