//! The fetch/decode/resolve/execute/retire loop.

use super::addressing::{page_cross_penalty, ResolvedOperand};
use super::decode::{decode, Descriptor};
use super::interrupts::INTERRUPT_ENTRY_CYCLES;
use super::{Bus, Cpu, Interrupt, Registers};
use crate::clock::ClockState;

/// Raw instruction bytes as fetched: opcode plus 0-2 operand bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstructionBytes {
    raw: [u8; 3],
    len: u8,
}

impl InstructionBytes {
    pub(crate) fn new(opcode: u8, op: &ResolvedOperand) -> Self {
        let mut raw = [opcode, 0, 0];
        raw[1] = op.raw[0];
        raw[2] = op.raw[1];
        Self {
            raw,
            len: 1 + op.raw_len,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.raw[..self.len as usize]
    }
}

/// What a single [`Cpu::step`] call committed.
#[derive(Clone, Copy, Debug)]
pub enum RetiredKind {
    /// One fully executed instruction.
    Instruction {
        descriptor: Descriptor,
        operand: ResolvedOperand,
    },
    /// One hardware interrupt-entry sequence.
    Interrupt(Interrupt),
    /// A locked core burning a cycle after a jam opcode.
    Jammed,
}

/// Snapshot record handed to the trace emitter and then discarded.
///
/// Registers are the pre-execution state; the clock is read at
/// retirement, after the instruction's full cycle cost was applied.
#[derive(Clone, Copy, Debug)]
pub struct RetiredInstruction {
    /// PC before the instruction was fetched.
    pub pc: u16,
    pub bytes: InstructionBytes,
    /// Register file as it stood before execution.
    pub pre: Registers,
    /// Master clock and raster position at retirement.
    pub clock: ClockState,
    pub kind: RetiredKind,
}

impl Cpu {
    /// Retire exactly one instruction (or one interrupt-entry
    /// sequence). Never fails: every opcode value has defined
    /// behaviour, and all memory traffic is the bus's problem.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> RetiredInstruction {
        let pre = self.regs;
        let pc = self.regs.pc;

        if self.is_jammed() {
            self.advance_clock(1);
            return RetiredInstruction {
                pc,
                bytes: InstructionBytes::empty(),
                pre,
                clock: *self.clock(),
                kind: RetiredKind::Jammed,
            };
        }

        if let Some(source) = self.poll_interrupt() {
            self.service_interrupt(bus, source);
            self.advance_clock(INTERRUPT_ENTRY_CYCLES);
            return RetiredInstruction {
                pc,
                bytes: InstructionBytes::empty(),
                pre,
                clock: *self.clock(),
                kind: RetiredKind::Interrupt(source),
            };
        }

        let opcode = self.fetch8(bus);
        let descriptor = decode(opcode);
        let operand = self.resolve(bus, &descriptor);
        let extra = self.execute(bus, &descriptor, &operand);

        let mut cycles = u64::from(descriptor.base_cycles) + u64::from(extra);
        if operand.page_crossed && page_cross_penalty(descriptor.mnemonic) {
            cycles += 1;
        }
        self.advance_clock(cycles);

        RetiredInstruction {
            pc,
            bytes: InstructionBytes::new(opcode, &operand),
            pre,
            clock: *self.clock(),
            kind: RetiredKind::Instruction {
                descriptor,
                operand,
            },
        }
    }
}
