//! GPCLK0 Clock-Manager Driver
//!
//! Configures GPIO4 for its clock-output alternate function and drives the
//! CM_GP0CTL/CM_GP0DIV register pair. Every control and divisor write must
//! carry the clock manager's password in the top byte or the peripheral
//! silently ignores it.
//!
//! Register words are built from explicit shift/mask constants; the
//! datasheet's bit-field layout is never relied on structurally.

use crate::hal::{Register, RegisterBus};
use crate::types::DivisorWord;

/// CM_GP0CTL / CM_GP0DIV field constants (BCM2835 datasheet pp. 107-108)
mod reg {
    /// Clock-manager password, required in bits 31..=24 of every write
    pub const PASSWD: u32 = 0x5A << 24;

    /// ENAB — request the generator to start
    pub const ENAB: u32 = 1 << 4;

    /// FLIP — invert the output; written equal to ENAB so every enable
    /// restarts the generator with a clean phase
    pub const FLIP: u32 = 1 << 8;

    /// DIV — the 24-bit divisor field of CM_GP0DIV
    pub const DIV_MASK: u32 = 0x00FF_FFFF;

    /// FSEL4 field of GPFSEL0 (GPIO4 function select, bits 14..=12)
    pub const FSEL4_MASK: u32 = 0b111 << 12;

    /// ALT0 for GPIO4 routes GPCLK0 to the pin (datasheet p. 92)
    pub const FSEL4_ALT0: u32 = 0b100 << 12;
}

/// Clock-manager source selection (CM_GP0CTL SRC field, datasheet p. 107)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClockSource {
    /// 19.2 MHz crystal oscillator
    Oscillator,
    /// PLLA per-channel clock
    PllA,
    /// PLLC core clock (varies with overclocking)
    PllC,
    /// PLLD per-channel clock, fixed 500 MHz — the transmission reference
    #[default]
    PllD,
}

impl ClockSource {
    /// SRC field encoding
    #[must_use]
    pub const fn as_src(self) -> u32 {
        match self {
            Self::Oscillator => 1,
            Self::PllA => 4,
            Self::PllC => 5,
            Self::PllD => 6,
        }
    }
}

/// GPCLK0 driver over a register bus
#[derive(Debug)]
pub struct ClockGenerator<B: RegisterBus> {
    bus: B,
    source: ClockSource,
}

impl<B: RegisterBus> ClockGenerator<B> {
    /// Create a driver over `bus` using `source` as the reference clock
    #[must_use]
    pub const fn new(bus: B, source: ClockSource) -> Self {
        Self { bus, source }
    }

    /// Route GPCLK0 to GPIO4 (ALT0).
    ///
    /// Read-modify-write of GPFSEL0 touching only the FSEL4 field, so the
    /// function selection of unrelated pins in the same register is
    /// preserved.
    pub fn configure_output_pin(&mut self) {
        let fsel = self.bus.read(Register::PinFunctionSelect0);
        let fsel = (fsel & !reg::FSEL4_MASK) | reg::FSEL4_ALT0;
        self.bus.write(Register::PinFunctionSelect0, fsel);
    }

    /// Start the clock generator from the configured source.
    ///
    /// FLIP is written equal to ENAB, which guarantees a clean-phase
    /// restart each time the generator is enabled.
    pub fn enable(&mut self) {
        let word = reg::PASSWD | reg::FLIP | reg::ENAB | self.source.as_src();
        self.bus.write(Register::ClockControl, word);
    }

    /// Stop the clock generator.
    ///
    /// Safe to call any number of times and without a prior enable; the
    /// control word simply clears ENAB and FLIP.
    pub fn disable(&mut self) {
        let word = reg::PASSWD | self.source.as_src();
        self.bus.write(Register::ClockControl, word);
    }

    /// Write a raw 24-bit divisor word.
    ///
    /// This is the only register write inside the real-time loop: one mask,
    /// one OR, one volatile store. Range validation happens once at startup
    /// ([`crate::types::ModulationParams::new`]), never here.
    #[inline]
    pub fn set_divisor_bits(&mut self, word: u32) {
        self.bus
            .write(Register::ClockDivisor, reg::PASSWD | (word & reg::DIV_MASK));
    }

    /// Write a validated divisor word
    #[inline]
    pub fn set_divisor(&mut self, word: DivisorWord) {
        self.set_divisor_bits(word.to_bits());
    }
}
