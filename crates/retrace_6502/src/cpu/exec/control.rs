use super::super::addressing::ResolvedOperand;
use super::super::{Bus, Cpu};

impl Cpu {
    #[inline]
    pub(super) fn jmp(&mut self, op: &ResolvedOperand) {
        self.regs.pc = op.addr();
    }

    /// JSR pushes the address of its own last byte; RTS compensates.
    pub(super) fn jsr<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let return_addr = self.regs.pc.wrapping_sub(1);
        self.push16(bus, return_addr);
        self.regs.pc = op.addr();
    }

    pub(super) fn rts<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pull16(bus).wrapping_add(1);
    }

    /// Taken branches cost one extra cycle, two when the target sits on
    /// a different page than the next instruction would have.
    pub(super) fn branch(&mut self, taken: bool, op: &ResolvedOperand) -> u8 {
        if !taken {
            return 0;
        }
        self.regs.pc = op.addr();
        1 + op.page_crossed as u8
    }
}
