//! Sample-to-Deviation Arithmetic
//!
//! Turns one 16-bit PCM sample into the pair the modulator consumes: a
//! signed whole-LSB divisor offset and a dither threshold for the
//! fractional remainder.
//!
//! `dval = sample / 65536 * bandwidth` is the instantaneous deviation in
//! divisor LSBs. Its floor becomes the offset; the remainder in `[0, 1)`
//! is scaled to the full 32-bit range of the dither generator so a plain
//! unsigned compare decides each round-up.

/// Deviation of one audio sample, in divisor-register units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deviation {
    /// Whole divisor LSBs to add to the center word (signed)
    pub offset: i32,
    /// Fractional remainder scaled by 2^32; a sub-step rounds up iff this
    /// exceeds the LFSR draw
    pub dither_threshold: u32,
}

impl Deviation {
    /// Compute the deviation for `sample` at deviation scale `bandwidth`
    #[must_use]
    pub fn from_sample(sample: i16, bandwidth: f32) -> Self {
        let dval = f32::from(sample) / 65536.0 * bandwidth;
        let floor = dval.floor();
        let frac = dval - floor;
        Self {
            // For frac <= 1 - 2^-24 the product stays below 2^32, so the
            // saturating cast never actually saturates.
            offset: floor as i32,
            dither_threshold: (frac * 65536.0 * 65536.0) as u32,
        }
    }
}
