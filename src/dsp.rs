//! Digital Signal Processing
//!
//! The numeric half of the modulation engine, testable on the host with no
//! hardware:
//! - Galois LFSR dither generator
//! - sample-to-deviation arithmetic

pub mod deviation;
pub mod dither;
