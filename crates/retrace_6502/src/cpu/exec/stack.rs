use super::super::{Bus, Cpu, Status};

impl Cpu {
    #[inline]
    pub(super) fn pha<B: Bus>(&mut self, bus: &mut B) {
        self.push8(bus, self.regs.a);
    }

    /// PHP pushes with both B and the always-1 bit set, like BRK.
    pub(super) fn php<B: Bus>(&mut self, bus: &mut B) {
        let pushed = self.regs.p | Status::BREAK | Status::UNUSED;
        self.push8(bus, pushed.bits());
    }

    pub(super) fn pla<B: Bus>(&mut self, bus: &mut B) {
        self.regs.a = self.pull8(bus);
        self.set_zn(self.regs.a);
    }

    /// PLP ignores the pulled B bit and forces the always-1 bit.
    pub(super) fn plp<B: Bus>(&mut self, bus: &mut B) {
        let pulled = Status::from_bits_truncate(self.pull8(bus));
        self.regs.p = (pulled - Status::BREAK) | Status::UNUSED;
    }
}
