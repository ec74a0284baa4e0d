//! Cycle-accurate MOS 6502 interpreter core.
//!
//! The crate models the CPU as a single synchronous state machine: every
//! call to [`Cpu::step`] retires exactly one instruction (or one
//! interrupt-entry sequence) against a caller-supplied [`Bus`], advances
//! the master cycle counter, and returns a [`RetiredInstruction`]
//! snapshot. [`TraceEmitter`] formats those snapshots into the canonical
//! one-line-per-instruction conformance format used to diff a run
//! against a reference trace.
//!
//! All 256 opcode values decode to defined behaviour, including the
//! undocumented ones; there is no error path during execution.
//! Configuration mistakes are rejected when the [`Cpu`] is built.

pub mod clock;
pub mod cpu;
pub mod trace;

pub use clock::{ClockConfig, ClockState};
pub use cpu::addressing::{AddressingMode, ResolvedOperand};
pub use cpu::decode::{decode, Descriptor, Mnemonic};
pub use cpu::step::{InstructionBytes, RetiredInstruction, RetiredKind};
pub use cpu::{Bus, Cpu, CpuConfig, Interrupt, Registers, Status};
pub use trace::TraceEmitter;

/// Vector read on NMI entry.
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Vector read by [`Cpu::reset`].
pub const RESET_VECTOR: u16 = 0xFFFC;
/// Vector shared by IRQ entry and BRK.
pub const IRQ_VECTOR: u16 = 0xFFFE;
/// Base address of the fixed stack page. SP arithmetic wraps within it.
pub const STACK_BASE: u16 = 0x0100;

#[cfg(test)]
mod conformance_tests;
