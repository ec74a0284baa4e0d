use super::super::addressing::ResolvedOperand;
use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn inc_mem<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        self.rmw(bus, op, |cpu, v| {
            let result = v.wrapping_add(1);
            cpu.set_zn(result);
            result
        });
    }

    pub(super) fn dec_mem<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        self.rmw(bus, op, |cpu, v| {
            let result = v.wrapping_sub(1);
            cpu.set_zn(result);
            result
        });
    }
}
