//! Divisor Modulator
//!
//! Per sub-step: draw one dither value, decide whether this step rounds
//! the fractional deviation up, and write the resulting divisor word.
//!
//! The divisor register has integer resolution, so a target of
//! `intval + frac` is approximated by writing `intval` most of the time
//! and `intval + 1` a fraction `frac` of the time; the time-averaged
//! output frequency then traces the target, and the residual jitter is
//! filtered by the analog stages. The hot path is a compare, two adds and
//! one register write — range validation happened at startup.

use crate::drivers::clock::ClockGenerator;
use crate::dsp::deviation::Deviation;
use crate::dsp::dither::GaloisLfsr;
use crate::hal::RegisterBus;
use crate::types::DivisorWord;

/// Dithering divisor writer over a clock generator
#[derive(Debug)]
pub struct DivisorModulator<'a, B: RegisterBus> {
    clock: &'a mut ClockGenerator<B>,
    lfsr: GaloisLfsr,
    center: u32,
}

impl<'a, B: RegisterBus> DivisorModulator<'a, B> {
    /// Create a modulator around `center`, the unmodulated-carrier word
    #[must_use]
    pub fn new(clock: &'a mut ClockGenerator<B>, center: DivisorWord, lfsr: GaloisLfsr) -> Self {
        Self {
            clock,
            lfsr,
            center: center.to_bits(),
        }
    }

    /// Perform one sub-step: advance the dither generator once and write
    /// one divisor value.
    ///
    /// Wrapping adds are sound here: `ModulationParams` proved at startup
    /// that `center + offset + 1` stays inside the 24-bit field for the
    /// worst-case sample.
    #[inline]
    pub fn substep(&mut self, deviation: Deviation) {
        let draw = self.lfsr.next_value();
        let round_up = u32::from(deviation.dither_threshold > draw);
        let word = self
            .center
            .wrapping_add_signed(deviation.offset)
            .wrapping_add(round_up);
        self.clock.set_divisor_bits(word);
    }
}
