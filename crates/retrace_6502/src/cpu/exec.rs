//! Instruction execution: one exhaustive dispatch over the mnemonic,
//! with the per-family implementations in submodules.

use super::addressing::ResolvedOperand;
use super::decode::{Descriptor, Mnemonic};
use super::{Bus, Cpu};

mod arith;
mod control;
mod illegal;
mod incdec;
mod load;
mod shift;
mod stack;
mod system;

impl Cpu {
    /// Execute a resolved instruction. Returns the extra cycles this
    /// execution adds beyond the descriptor's base cost (only taken
    /// branches produce any; page-cross penalties come from the
    /// resolver's policy).
    pub(super) fn execute<B: Bus>(
        &mut self,
        bus: &mut B,
        d: &Descriptor,
        op: &ResolvedOperand,
    ) -> u8 {
        use Mnemonic::*;
        match d.mnemonic {
            // Loads, stores, transfers.
            Lda => { self.lda(op); 0 }
            Ldx => { self.ldx(op); 0 }
            Ldy => { self.ldy(op); 0 }
            Sta => { self.sta(bus, op); 0 }
            Stx => { self.stx(bus, op); 0 }
            Sty => { self.sty(bus, op); 0 }
            Tax => { self.regs.x = self.regs.a; self.set_zn(self.regs.x); 0 }
            Tay => { self.regs.y = self.regs.a; self.set_zn(self.regs.y); 0 }
            Txa => { self.regs.a = self.regs.x; self.set_zn(self.regs.a); 0 }
            Tya => { self.regs.a = self.regs.y; self.set_zn(self.regs.a); 0 }
            Tsx => { self.regs.x = self.regs.sp; self.set_zn(self.regs.x); 0 }
            Txs => { self.regs.sp = self.regs.x; 0 }

            // Arithmetic and logic.
            Adc => { self.adc(op.value()); 0 }
            Sbc => { self.sbc(op.value()); 0 }
            And => { self.and(op.value()); 0 }
            Ora => { self.ora(op.value()); 0 }
            Eor => { self.eor(op.value()); 0 }
            Bit => { self.bit(op.value()); 0 }
            Cmp => { self.compare(self.regs.a, op.value()); 0 }
            Cpx => { self.compare(self.regs.x, op.value()); 0 }
            Cpy => { self.compare(self.regs.y, op.value()); 0 }

            // Increments and decrements.
            Inc => { self.inc_mem(bus, op); 0 }
            Dec => { self.dec_mem(bus, op); 0 }
            Inx => { self.regs.x = self.regs.x.wrapping_add(1); self.set_zn(self.regs.x); 0 }
            Iny => { self.regs.y = self.regs.y.wrapping_add(1); self.set_zn(self.regs.y); 0 }
            Dex => { self.regs.x = self.regs.x.wrapping_sub(1); self.set_zn(self.regs.x); 0 }
            Dey => { self.regs.y = self.regs.y.wrapping_sub(1); self.set_zn(self.regs.y); 0 }

            // Shifts and rotates.
            Asl => { self.shift(bus, d, op, Cpu::asl); 0 }
            Lsr => { self.shift(bus, d, op, Cpu::lsr); 0 }
            Rol => { self.shift(bus, d, op, Cpu::rol); 0 }
            Ror => { self.shift(bus, d, op, Cpu::ror); 0 }

            // Control flow.
            Jmp => { self.jmp(op); 0 }
            Jsr => { self.jsr(bus, op); 0 }
            Rts => { self.rts(bus); 0 }
            Bcc => self.branch(!self.regs.p.contains(super::Status::CARRY), op),
            Bcs => self.branch(self.regs.p.contains(super::Status::CARRY), op),
            Bne => self.branch(!self.regs.p.contains(super::Status::ZERO), op),
            Beq => self.branch(self.regs.p.contains(super::Status::ZERO), op),
            Bpl => self.branch(!self.regs.p.contains(super::Status::NEGATIVE), op),
            Bmi => self.branch(self.regs.p.contains(super::Status::NEGATIVE), op),
            Bvc => self.branch(!self.regs.p.contains(super::Status::OVERFLOW), op),
            Bvs => self.branch(self.regs.p.contains(super::Status::OVERFLOW), op),

            // Flag operations.
            Clc => { self.regs.p.remove(super::Status::CARRY); 0 }
            Sec => { self.regs.p.insert(super::Status::CARRY); 0 }
            Cli => { self.regs.p.remove(super::Status::INTERRUPT_DISABLE); 0 }
            Sei => { self.regs.p.insert(super::Status::INTERRUPT_DISABLE); 0 }
            Clv => { self.regs.p.remove(super::Status::OVERFLOW); 0 }
            Cld => { self.regs.p.remove(super::Status::DECIMAL); 0 }
            Sed => { self.regs.p.insert(super::Status::DECIMAL); 0 }

            // Stack.
            Pha => { self.pha(bus); 0 }
            Php => { self.php(bus); 0 }
            Pla => { self.pla(bus); 0 }
            Plp => { self.plp(bus); 0 }

            // System.
            Brk => { self.brk(bus); 0 }
            Rti => { self.rti(bus); 0 }
            Nop => 0,
            Jam => { self.jam(); 0 }

            // Undocumented.
            Lax => { self.lax(op); 0 }
            Sax => { self.sax(bus, op); 0 }
            Dcp => { self.dcp(bus, op); 0 }
            Isb => { self.isb(bus, op); 0 }
            Slo => { self.slo(bus, op); 0 }
            Rla => { self.rla(bus, op); 0 }
            Sre => { self.sre(bus, op); 0 }
            Rra => { self.rra(bus, op); 0 }
            Anc => { self.anc(op.value()); 0 }
            Alr => { self.alr(op.value()); 0 }
            Arr => { self.arr(op.value()); 0 }
            Axs => { self.axs(op.value()); 0 }
            Xaa => { self.xaa(op.value()); 0 }
            Ahx => { self.ahx(bus, op); 0 }
            Tas => { self.tas(bus, op); 0 }
            Shx => { self.shx(bus, op); 0 }
            Shy => { self.shy(bus, op); 0 }
            Las => { self.las(op); 0 }
        }
    }

    /// Read-modify-write plumbing: the unmodified byte is written back
    /// first, as on real silicon, then the modified one.
    pub(in crate::cpu) fn rmw<B: Bus>(
        &mut self,
        bus: &mut B,
        op: &ResolvedOperand,
        f: fn(&mut Cpu, u8) -> u8,
    ) -> u8 {
        let addr = op.addr();
        let value = op.value();
        bus.write8(addr, value);
        let result = f(self, value);
        bus.write8(addr, result);
        result
    }
}
