//! Interrupt polling and entry sequences.

use super::{Bus, Cpu, Interrupt, Status};
use crate::{IRQ_VECTOR, NMI_VECTOR};

/// Every hardware entry sequence (and BRK) costs the same seven cycles.
pub(crate) const INTERRUPT_ENTRY_CYCLES: u64 = 7;

impl Cpu {
    /// Check the interrupt lines once per retired instruction. The NMI
    /// edge latch always wins over the level-triggered IRQ, which is
    /// only honoured while I is clear.
    pub(super) fn poll_interrupt(&mut self) -> Option<Interrupt> {
        if self.nmi_pending {
            self.nmi_pending = false;
            return Some(Interrupt::Nmi);
        }
        if self.irq_line && !self.regs.p.contains(Status::INTERRUPT_DISABLE) {
            return Some(Interrupt::Irq);
        }
        None
    }

    /// Hardware entry: push PC high then low, push P with B clear, set
    /// I, load PC from the source's vector.
    pub(super) fn service_interrupt<B: Bus>(&mut self, bus: &mut B, source: Interrupt) {
        let vector = match source {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        };
        self.push16(bus, self.regs.pc);
        let pushed = (self.regs.p | Status::UNUSED) - Status::BREAK;
        self.push8(bus, pushed.bits());
        self.regs.p.insert(Status::INTERRUPT_DISABLE);
        let from = self.regs.pc;
        self.regs.pc = self.read16(bus, vector);
        log::debug!(
            "{:?} entry: ${:04X} -> ${:04X} sp=${:02X}",
            source,
            from,
            self.regs.pc,
            self.regs.sp
        );
    }
}
