//! LFSR Dither Generator
//!
//! A 32-bit right-shift Galois linear-feedback shift register. Each
//! sub-step draws one value; comparing it against the scaled fractional
//! divisor decides whether that sub-step rounds up. The LFSR (rather than
//! a counter) spreads the dither energy pseudorandomly in time, so no
//! periodic artifact shows up as a side-tone.
//!
//! The state is never zero: from any nonzero state, either the shifted
//! value is nonzero (no feedback taken) or the feedback term sets bit 31.
//! The generator spans the whole transmission and is never reseeded;
//! reseeding mid-stream would reintroduce a detectable periodicity.

use std::num::NonZeroU32;

/// Galois LFSR over 32 bits
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaloisLfsr {
    // Invariant: never zero (see module docs).
    state: u32,
}

impl GaloisLfsr {
    /// Feedback tap constant
    pub const TAPS: u32 = 0xD000_0001;

    /// Create a generator from a nonzero seed
    #[must_use]
    pub const fn new(seed: NonZeroU32) -> Self {
        Self { state: seed.get() }
    }

    /// Advance one step and return the new state.
    ///
    /// Shift right by one; if the bit shifted out was 1, XOR with the tap
    /// constant.
    #[inline]
    pub fn next_value(&mut self) -> u32 {
        let out = self.state & 1;
        self.state = (self.state >> 1) ^ (out.wrapping_neg() & Self::TAPS);
        self.state
    }
}

impl Default for GaloisLfsr {
    fn default() -> Self {
        Self {
            state: crate::config::DITHER_SEED,
        }
    }
}
