use super::super::{Bus, Cpu, Status};
use crate::IRQ_VECTOR;

impl Cpu {
    /// Software interrupt: behaves like a hardware entry except the
    /// pushed copy of P carries the B bit. The byte after the opcode is
    /// padding; the pushed return address skips it.
    pub(super) fn brk<B: Bus>(&mut self, bus: &mut B) {
        let return_addr = self.regs.pc.wrapping_add(1);
        self.push16(bus, return_addr);
        let pushed = self.regs.p | Status::BREAK | Status::UNUSED;
        self.push8(bus, pushed.bits());
        self.regs.p.insert(Status::INTERRUPT_DISABLE);
        self.regs.pc = self.read16(bus, IRQ_VECTOR);
    }

    pub(super) fn rti<B: Bus>(&mut self, bus: &mut B) {
        let pulled = Status::from_bits_truncate(self.pull8(bus));
        self.regs.p = (pulled - Status::BREAK) | Status::UNUSED;
        self.regs.pc = self.pull16(bus);
    }

    /// Jam opcodes lock the core. The opcode byte itself still retires;
    /// afterwards the loop only burns cycles.
    pub(super) fn jam(&mut self) {
        log::debug!("jam opcode at ${:04X}; core locked", self.regs.pc.wrapping_sub(1));
        self.set_jammed();
    }
}
