//! The 6502 CPU core: register file, status flags, bus seam and the
//! top-level [`Cpu`] state machine.

use anyhow::Result;
use bitflags::bitflags;

use crate::clock::{ClockConfig, ClockState};
use crate::RESET_VECTOR;

pub mod addressing;
pub mod decode;
pub mod step;

mod alu;
mod exec;
mod interrupts;


bitflags! {
    /// The processor status byte P.
    ///
    /// Bit 5 (`UNUSED`) reads as 1 and is forced to 1 whenever P is
    /// pushed to the stack. `BREAK` only exists on the stack copy: set
    /// for BRK/PHP pushes, clear for hardware interrupt pushes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

/// Register file. P lives here too so one `Copy` snapshots the whole
/// architectural state for a retired-instruction record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        // Power-on state: SP and PC are whatever reset makes of them;
        // I and the always-on bit are set from the start.
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            p: Status::UNUSED.union(Status::INTERRUPT_DISABLE),
        }
    }
}

/// Abstraction over the memory-mapped bus.
///
/// Reads are `&mut self` because real targets have read side effects
/// (peripheral register latches, bank switching). The core assumes
/// exclusive, non-reentrant access for the duration of each call.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
}

/// Interrupt sources serviced between instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    /// Edge-triggered, non-maskable; always serviced once latched.
    Nmi,
    /// Level-triggered; serviced only while the I flag is clear.
    Irq,
}

/// Construction-time configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuConfig {
    /// Honour the D flag in ADC/SBC. The common NTSC-like variant wires
    /// decimal mode out while leaving the flag settable, so this
    /// defaults to off.
    pub bcd_enabled: bool,
    pub clock: ClockConfig,
}

/// The CPU state machine. One [`Cpu::step`] call retires one
/// instruction (or completes one interrupt-entry sequence).
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    clock: ClockState,
    config: CpuConfig,
    /// NMI edge latch set by [`Cpu::assert_nmi`].
    nmi_pending: bool,
    /// IRQ level as last reported by [`Cpu::set_irq_level`].
    irq_line: bool,
    /// Set once a jam opcode executes; the core then only burns cycles.
    jammed: bool,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Build a core with the default NTSC-like configuration.
    pub fn new() -> Self {
        let config = CpuConfig::default();
        Self {
            regs: Registers::default(),
            clock: ClockState::new(config.clock),
            config,
            nmi_pending: false,
            irq_line: false,
            jammed: false,
        }
    }

    /// Build a core with an explicit configuration. Invalid clock
    /// geometry is rejected here, never mid-execution.
    pub fn with_config(config: CpuConfig) -> Result<Self> {
        config.clock.validate()?;
        Ok(Self {
            regs: Registers::default(),
            clock: ClockState::new(config.clock),
            config,
            nmi_pending: false,
            irq_line: false,
            jammed: false,
        })
    }

    /// Read-only view of the master clock and raster position.
    #[inline]
    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    #[inline]
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// True once a jam opcode has locked the core.
    #[inline]
    pub fn is_jammed(&self) -> bool {
        self.jammed
    }

    /// Latch an NMI edge. It stays latched until serviced.
    pub fn assert_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Drive the level-triggered IRQ line.
    pub fn set_irq_level(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }

    /// Reset sequence: SP drops by three without writes, I is set and
    /// PC is loaded from the reset vector. Costs the fixed seven
    /// interrupt-entry cycles.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.regs.sp = self.regs.sp.wrapping_sub(3);
        self.regs.p.insert(Status::INTERRUPT_DISABLE);
        self.regs.pc = self.read16(bus, RESET_VECTOR);
        self.nmi_pending = false;
        self.jammed = false;
        self.clock.advance(interrupts::INTERRUPT_ENTRY_CYCLES);
        log::debug!(
            "reset: pc=${:04X} sp=${:02X} cyc={}",
            self.regs.pc,
            self.regs.sp,
            self.clock.cycles()
        );
    }

    #[inline]
    pub(crate) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(crate) fn read16<B: Bus>(&mut self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read8(addr) as u16;
        let hi = bus.read8(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Push to the fixed stack page; SP wraps modulo 256.
    #[inline]
    pub(crate) fn push8<B: Bus>(&mut self, bus: &mut B, value: u8) {
        bus.write8(crate::STACK_BASE + self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    #[inline]
    pub(crate) fn pull8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        bus.read8(crate::STACK_BASE + self.regs.sp as u16)
    }

    #[inline]
    pub(crate) fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.push8(bus, (value >> 8) as u8);
        self.push8(bus, value as u8);
    }

    #[inline]
    pub(crate) fn pull16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pull8(bus) as u16;
        let hi = self.pull8(bus) as u16;
        (hi << 8) | lo
    }

    pub(crate) fn advance_clock(&mut self, cycles: u64) {
        self.clock.advance(cycles);
    }

    pub(crate) fn set_jammed(&mut self) {
        self.jammed = true;
    }
}
