use super::super::addressing::ResolvedOperand;
use super::super::{Bus, Cpu};

impl Cpu {
    #[inline]
    pub(super) fn lda(&mut self, op: &ResolvedOperand) {
        self.regs.a = op.value();
        self.set_zn(self.regs.a);
    }

    #[inline]
    pub(super) fn ldx(&mut self, op: &ResolvedOperand) {
        self.regs.x = op.value();
        self.set_zn(self.regs.x);
    }

    #[inline]
    pub(super) fn ldy(&mut self, op: &ResolvedOperand) {
        self.regs.y = op.value();
        self.set_zn(self.regs.y);
    }

    #[inline]
    pub(super) fn sta<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        bus.write8(op.addr(), self.regs.a);
    }

    #[inline]
    pub(super) fn stx<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        bus.write8(op.addr(), self.regs.x);
    }

    #[inline]
    pub(super) fn sty<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        bus.write8(op.addr(), self.regs.y);
    }
}
