//! Undocumented opcodes. These are not error cases: the silicon wires
//! every one of them to reproducible behaviour, usually a combination
//! of two documented operations sharing the internal buses.

use super::super::addressing::ResolvedOperand;
use super::super::{Bus, Cpu, Status};

impl Cpu {
    /// Load A and X together.
    pub(super) fn lax(&mut self, op: &ResolvedOperand) {
        let value = op.value();
        self.regs.a = value;
        self.regs.x = value;
        self.set_zn(value);
    }

    /// Store A & X. No flags.
    pub(super) fn sax<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        bus.write8(op.addr(), self.regs.a & self.regs.x);
    }

    /// Decrement memory, then compare A against it.
    pub(super) fn dcp<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let result = self.rmw(bus, op, |_, v| v.wrapping_sub(1));
        self.compare(self.regs.a, result);
    }

    /// Increment memory, then subtract it from A.
    pub(super) fn isb<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let result = self.rmw(bus, op, |_, v| v.wrapping_add(1));
        self.sbc(result);
    }

    /// Shift memory left, then OR it into A.
    pub(super) fn slo<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let result = self.rmw(bus, op, Cpu::asl);
        self.ora(result);
    }

    /// Rotate memory left, then AND it into A.
    pub(super) fn rla<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let result = self.rmw(bus, op, Cpu::rol);
        self.and(result);
    }

    /// Shift memory right, then XOR it into A.
    pub(super) fn sre<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let result = self.rmw(bus, op, Cpu::lsr);
        self.eor(result);
    }

    /// Rotate memory right, then add it to A with carry.
    pub(super) fn rra<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let result = self.rmw(bus, op, Cpu::ror);
        self.adc(result);
    }

    /// AND immediate with C mirroring N.
    pub(super) fn anc(&mut self, value: u8) {
        self.and(value);
        self.regs
            .p
            .set(Status::CARRY, self.regs.p.contains(Status::NEGATIVE));
    }

    /// AND immediate, then shift A right.
    pub(super) fn alr(&mut self, value: u8) {
        self.and(value);
        self.regs.a = self.lsr(self.regs.a);
    }

    /// AND immediate, then rotate A right; C and V come from bits 6
    /// and 5 of the rotated result.
    pub(super) fn arr(&mut self, value: u8) {
        let masked = self.regs.a & value;
        let carry_in = (self.regs.p.contains(Status::CARRY) as u8) << 7;
        let result = (masked >> 1) | carry_in;
        self.regs.a = result;
        self.set_zn(result);
        self.regs.p.set(Status::CARRY, result & 0x40 != 0);
        self.regs
            .p
            .set(Status::OVERFLOW, ((result >> 6) ^ (result >> 5)) & 0x01 != 0);
    }

    /// X = (A & X) - imm, borrow-free; flags as a compare.
    pub(super) fn axs(&mut self, value: u8) {
        let base = self.regs.a & self.regs.x;
        self.regs.p.set(Status::CARRY, base >= value);
        self.regs.x = base.wrapping_sub(value);
        self.set_zn(self.regs.x);
    }

    /// Unstable: A = (A | magic) & X & imm. The magic constant $EE is
    /// the commonly observed one.
    pub(super) fn xaa(&mut self, value: u8) {
        self.regs.a = (self.regs.a | 0xEE) & self.regs.x & value;
        self.set_zn(self.regs.a);
    }

    /// Store A & X & (high byte of the address + 1).
    pub(super) fn ahx<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let addr = op.addr();
        let mask = ((addr >> 8) as u8).wrapping_add(1);
        bus.write8(addr, self.regs.a & self.regs.x & mask);
    }

    /// SP = A & X, then store SP & (high byte + 1).
    pub(super) fn tas<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        self.regs.sp = self.regs.a & self.regs.x;
        let addr = op.addr();
        let mask = ((addr >> 8) as u8).wrapping_add(1);
        bus.write8(addr, self.regs.sp & mask);
    }

    /// Store X & (high byte + 1).
    pub(super) fn shx<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let addr = op.addr();
        let mask = ((addr >> 8) as u8).wrapping_add(1);
        bus.write8(addr, self.regs.x & mask);
    }

    /// Store Y & (high byte + 1).
    pub(super) fn shy<B: Bus>(&mut self, bus: &mut B, op: &ResolvedOperand) {
        let addr = op.addr();
        let mask = ((addr >> 8) as u8).wrapping_add(1);
        bus.write8(addr, self.regs.y & mask);
    }

    /// A, X and SP all take memory & SP.
    pub(super) fn las(&mut self, op: &ResolvedOperand) {
        let result = op.value() & self.regs.sp;
        self.regs.a = result;
        self.regs.x = result;
        self.regs.sp = result;
        self.set_zn(result);
    }
}
