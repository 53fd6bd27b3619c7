//! Shared types used across the transmitter
//!
//! Domain newtypes that enforce invariants at construction time, plus the
//! crate error taxonomy. Everything that can make the hardware radiate
//! outside its intended parameters is rejected here, before the real-time
//! loop starts.

use std::io;

use fixed::types::extra::U12;
use fixed::FixedU32;
use thiserror::Error;

use crate::config;

/// Carrier center frequency in MHz with validation
///
/// Bounded by what the 12-bit integer divisor field can express against
/// the 500 MHz PLLD reference.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct CarrierFrequency(f64);

impl CarrierFrequency {
    /// Minimum carrier frequency (500 MHz / 4096, the largest divisor)
    pub const MIN_MHZ: f64 = 0.123;

    /// Maximum carrier frequency (500 MHz / 2, the smallest usable divisor)
    pub const MAX_MHZ: f64 = 250.0;

    /// Create a new `CarrierFrequency` from MHz, `None` if out of range
    #[must_use]
    pub fn from_mhz(mhz: f64) -> Option<Self> {
        if mhz.is_finite() && (Self::MIN_MHZ..=Self::MAX_MHZ).contains(&mhz) {
            Some(Self(mhz))
        } else {
            None
        }
    }

    /// Get the frequency in MHz
    #[must_use]
    pub const fn as_mhz(self) -> f64 {
        self.0
    }
}

/// Deviation scale applied to normalized samples (acts as volume)
///
/// A full-scale sample deviates the divisor by `bandwidth / 2` register
/// LSBs. Larger values widen the occupied bandwidth; the upstream advice
/// is to only ever lower it.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Bandwidth(f32);

impl Bandwidth {
    /// Create a new `Bandwidth`, `None` unless finite and positive
    #[must_use]
    pub fn from_scale(scale: f32) -> Option<Self> {
        if scale.is_finite() && scale > 0.0 {
            Some(Self(scale))
        } else {
            None
        }
    }

    /// Get the raw scale factor
    #[must_use]
    pub const fn scale(self) -> f32 {
        self.0
    }
}

impl Default for Bandwidth {
    fn default() -> Self {
        Self(config::DEFAULT_BANDWIDTH)
    }
}

/// The 24-bit clock-divisor word: 12-bit integer part, 12-bit fractional
/// (dither) part
///
/// The clock manager divides the reference by this value; only the integer
/// part sets the pulse length, the fractional part is averaged in by the
/// peripheral's own dithering stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DivisorWord(FixedU32<U12>);

impl DivisorWord {
    /// Fractional bits in the register field
    pub const FRAC_BITS: u32 = 12;

    /// Largest representable raw word (24 bits)
    pub const MAX_BITS: u32 = 0x00FF_FFFF;

    /// Compute the unmodulated-carrier divisor for a carrier frequency
    ///
    /// `reference / carrier`, rounded to the nearest 1/4096th.
    #[must_use]
    pub fn from_carrier(carrier: CarrierFrequency) -> Option<Self> {
        let ratio = config::PLLD_FREQ_MHZ / carrier.as_mhz();
        let word = FixedU32::<U12>::checked_from_num(ratio)?;
        (word.to_bits() <= Self::MAX_BITS).then_some(Self(word))
    }

    /// Raw 24-bit register value
    #[must_use]
    pub const fn to_bits(self) -> u32 {
        self.0.to_bits()
    }

    /// Integer part of the divisor (the 12-bit pulse-length field)
    #[must_use]
    pub const fn integer_part(self) -> u32 {
        self.0.to_bits() >> Self::FRAC_BITS
    }
}

/// Modulation parameters, fixed for the whole transmission
///
/// Validated once so the per-sub-step path never has to range-check the
/// divisor it writes.
#[derive(Clone, Copy, Debug)]
pub struct ModulationParams {
    center: DivisorWord,
    bandwidth: Bandwidth,
    speed: u32,
}

impl ModulationParams {
    /// Build and validate the parameter set.
    ///
    /// The worst-case deviation is `±bandwidth / 2` divisor LSBs plus the
    /// dither round-up; if that swing can leave the 24-bit register field
    /// (or touch zero), the configuration is rejected rather than clamped.
    ///
    /// # Errors
    ///
    /// [`Error::DivisorRange`] when the carrier/bandwidth combination does
    /// not fit the register field.
    pub fn new(
        carrier: CarrierFrequency,
        bandwidth: Bandwidth,
        speed: u32,
    ) -> Result<Self, Error> {
        let scale = 1u32 << DivisorWord::FRAC_BITS;
        let raw = (config::PLLD_FREQ_MHZ / carrier.as_mhz() * f64::from(scale)).round() as i64;
        // Bandwidth is only bounded by f32 range, so the swing can exceed
        // any divisor; saturating arithmetic keeps an absurd configuration
        // on the error path instead of overflowing.
        let swing = (f64::from(bandwidth.scale()) / 2.0).ceil() as i64;
        let swing = swing.saturating_add(1);
        let low = raw.saturating_sub(swing);
        let high = raw.saturating_add(swing);
        if low <= 0 || high > i64::from(DivisorWord::MAX_BITS) {
            return Err(Error::DivisorRange { low, high });
        }
        let center =
            DivisorWord::from_carrier(carrier).ok_or(Error::DivisorRange { low, high })?;
        Ok(Self {
            center,
            bandwidth,
            speed,
        })
    }

    /// Unmodulated-carrier divisor word
    #[must_use]
    pub const fn center(self) -> DivisorWord {
        self.center
    }

    /// Deviation scale
    #[must_use]
    pub const fn bandwidth(self) -> Bandwidth {
        self.bandwidth
    }

    /// Divisor writes per audio sample
    #[must_use]
    pub const fn speed(self) -> u32 {
        self.speed
    }
}

/// Crate error taxonomy
///
/// Everything here is fatal by design: partial operation (an enabled clock
/// with an unwritten divisor) risks radiating outside the intended
/// parameters, so no error is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The `/dev/mem` peripheral mapping could not be established
    /// (insufficient privilege or missing device). No transmission is
    /// possible without it.
    #[error("cannot map the peripheral window through /dev/mem: {0}")]
    RegisterMap(#[source] io::Error),

    /// The audio source could not be opened. Raised before any hardware
    /// state is enabled.
    #[error("cannot open audio source `{path}`: {source}")]
    AudioOpen {
        /// Path the caller asked for
        path: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A computed divisor could leave the representable register range for
    /// the configured carrier/bandwidth. Surfaced at startup, never
    /// silently truncated or wrapped.
    #[error(
        "carrier/bandwidth put the divisor outside the 12.12 register field \
         (worst case {low:#x}..={high:#x})"
    )]
    DivisorRange {
        /// Lowest divisor word the configuration could produce
        low: i64,
        /// Highest divisor word the configuration could produce
        high: i64,
    },

    /// An operation was requested in a lifecycle state that cannot honor
    /// it, such as broadcasting before the clock is enabled.
    #[error("cannot {operation} while the transmitter is {state}")]
    InvalidState {
        /// Operation that was requested
        operation: &'static str,
        /// Lifecycle state the transmitter was in
        state: &'static str,
    },

    /// Reading the audio stream failed mid-transmission. Zero-length and
    /// short reads are not errors; this is a real I/O failure.
    #[error("audio read failed: {0}")]
    AudioRead(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisor_word_for_default_carrier() {
        let carrier = CarrierFrequency::from_mhz(config::DEFAULT_CARRIER_MHZ).unwrap();
        let word = DivisorWord::from_carrier(carrier).unwrap();
        // 500 / 77.7 = 6.435..., times 4096 = 26357.8
        assert_eq!(word.integer_part(), 6);
        assert!((26357..=26359).contains(&word.to_bits()));
    }

    #[test]
    fn carrier_frequency_bounds() {
        assert!(CarrierFrequency::from_mhz(77.7).is_some());
        assert!(CarrierFrequency::from_mhz(0.0).is_none());
        assert!(CarrierFrequency::from_mhz(-10.0).is_none());
        assert!(CarrierFrequency::from_mhz(251.0).is_none());
        assert!(CarrierFrequency::from_mhz(f64::NAN).is_none());
    }

    #[test]
    fn bandwidth_rejects_nonpositive() {
        assert!(Bandwidth::from_scale(8.0).is_some());
        assert!(Bandwidth::from_scale(0.0).is_none());
        assert!(Bandwidth::from_scale(-1.0).is_none());
        assert!(Bandwidth::from_scale(f32::INFINITY).is_none());
    }

    #[test]
    fn params_reject_excessive_swing() {
        // 250 MHz gives a center word of 8192; a swing wider than that
        // would push the divisor through zero.
        let carrier = CarrierFrequency::from_mhz(250.0).unwrap();
        let bandwidth = Bandwidth::from_scale(20_000.0).unwrap();
        let err = ModulationParams::new(carrier, bandwidth, 270).unwrap_err();
        assert!(matches!(err, Error::DivisorRange { .. }));
    }

    #[test]
    fn params_reject_extreme_bandwidth_without_overflow() {
        // The swing for a bandwidth near f32::MAX dwarfs i64; this must
        // come back as a configuration error, not an overflow panic.
        let carrier = CarrierFrequency::from_mhz(77.7).unwrap();
        let bandwidth = Bandwidth::from_scale(3.0e38).unwrap();
        let err = ModulationParams::new(carrier, bandwidth, 270).unwrap_err();
        assert!(matches!(err, Error::DivisorRange { .. }));
    }

    #[test]
    fn params_accept_default_configuration() {
        let carrier = CarrierFrequency::from_mhz(config::DEFAULT_CARRIER_MHZ).unwrap();
        let params = ModulationParams::new(carrier, Bandwidth::default(), 270).unwrap();
        assert_eq!(params.speed(), 270);
        assert_eq!(params.center().integer_part(), 6);
    }
}
