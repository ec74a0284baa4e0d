use super::super::addressing::{AddressingMode, ResolvedOperand};
use super::super::decode::Descriptor;
use super::super::{Bus, Cpu};

impl Cpu {
    /// Shared plumbing for ASL/LSR/ROL/ROR: accumulator forms mutate A
    /// in place, memory forms go through the read-modify-write path.
    pub(super) fn shift<B: Bus>(
        &mut self,
        bus: &mut B,
        d: &Descriptor,
        op: &ResolvedOperand,
        f: fn(&mut Cpu, u8) -> u8,
    ) {
        if d.mode == AddressingMode::Accumulator {
            self.regs.a = f(self, self.regs.a);
        } else {
            self.rmw(bus, op, f);
        }
    }
}
