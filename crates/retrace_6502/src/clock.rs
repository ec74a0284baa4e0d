//! Master cycle counter and the derived peripheral raster position.
//!
//! The CPU and the raster peripheral share one clock at a fixed ratio.
//! Rather than modelling two live objects referencing each other, the
//! peripheral (dot, scanline) pair is derived purely from the master
//! cycle count, so the coupling exists without a cyclic object graph.

use anyhow::{bail, Result};

/// Fixed-ratio clock geometry.
///
/// The defaults describe the common NTSC-like target: three peripheral
/// ticks per CPU cycle, 341 dots per scanline, 262 scanlines per frame
/// (the last one reported as the pre-render line, scanline -1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    pub ticks_per_cycle: u32,
    pub dots_per_line: u16,
    pub lines_per_frame: u16,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            ticks_per_cycle: 3,
            dots_per_line: 341,
            lines_per_frame: 262,
        }
    }
}

impl ClockConfig {
    /// Reject degenerate geometry up front; the derivation divides by
    /// these values on every query.
    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_cycle == 0 {
            bail!("clock ratio must be at least one peripheral tick per CPU cycle");
        }
        if self.dots_per_line == 0 {
            bail!("dots per line must be non-zero");
        }
        if self.lines_per_frame == 0 {
            bail!("lines per frame must be non-zero");
        }
        Ok(())
    }
}

/// Monotonic master cycle counter plus its derived raster position.
///
/// The only mutator is [`ClockState::advance`], called once per retired
/// instruction by the execution loop. Everything else is read-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockState {
    cycles: u64,
    config: ClockConfig,
}

impl ClockState {
    pub fn new(config: ClockConfig) -> Self {
        Self { cycles: 0, config }
    }

    /// Master cycle count since power-on.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[inline]
    pub fn config(&self) -> ClockConfig {
        self.config
    }

    /// Advance the master clock by the effective cycle cost of one
    /// retired instruction or interrupt entry.
    #[inline]
    pub(crate) fn advance(&mut self, cycles: u64) {
        self.cycles = self.cycles.wrapping_add(cycles);
    }

    /// Current peripheral dot within the scanline.
    #[inline]
    pub fn dot(&self) -> u16 {
        self.position().0
    }

    /// Current peripheral scanline. The frame's final line is reported
    /// as -1 (the pre-render line).
    #[inline]
    pub fn scanline(&self) -> i16 {
        self.position().1
    }

    /// Pure derivation `master cycle -> (dot, scanline)`.
    pub fn position(&self) -> (u16, i16) {
        let dots_per_line = u64::from(self.config.dots_per_line);
        let lines_per_frame = u64::from(self.config.lines_per_frame);
        let frame_ticks = dots_per_line * lines_per_frame;

        let ticks = self
            .cycles
            .wrapping_mul(u64::from(self.config.ticks_per_cycle))
            % frame_ticks;
        let line = ticks / dots_per_line;
        let dot = (ticks % dots_per_line) as u16;

        // The last line of the frame is the pre-render line.
        let scanline = if line == lines_per_frame - 1 {
            -1
        } else {
            line as i16
        };
        (dot, scanline)
    }
}
