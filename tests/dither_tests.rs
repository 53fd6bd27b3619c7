//! Dither Generator Tests
//!
//! Properties of the Galois LFSR that the modulation correctness depends
//! on: the zero state is unreachable, the sequence is deterministic, and
//! the draws cover the 32-bit range roughly uniformly.

use std::num::NonZeroU32;

use gpclk_fm::dsp::dither::GaloisLfsr;

// =============================================================================
// Zero-state unreachability
// =============================================================================

#[test]
fn never_reaches_zero_over_long_runs() {
    // A zero state would freeze every sub-step at `intval`, killing the
    // modulation.
    for seed in [1u32, 2, 0xD000_0001, 0xDEAD_BEEF, u32::MAX] {
        let mut lfsr = GaloisLfsr::new(NonZeroU32::new(seed).unwrap());
        for step in 0..1_000_000u32 {
            assert_ne!(
                lfsr.next_value(),
                0,
                "seed {seed:#x} reached zero at step {step}"
            );
        }
    }
}

// =============================================================================
// Sequence behavior
// =============================================================================

#[test]
fn sequence_is_deterministic() {
    let seed = NonZeroU32::new(0x1234_5678).unwrap();
    let mut a = GaloisLfsr::new(seed);
    let mut b = GaloisLfsr::new(seed);
    for _ in 0..100_000 {
        assert_eq!(a.next_value(), b.next_value());
    }
}

#[test]
fn does_not_return_to_seed_quickly() {
    // A short cycle would be an audible periodic artifact.
    let mut lfsr = GaloisLfsr::new(NonZeroU32::new(1).unwrap());
    let first = lfsr.next_value();
    for _ in 0..1_000_000 {
        assert_ne!(lfsr.next_value(), first, "cycle shorter than 10^6 steps");
    }
}

#[test]
fn draws_cover_the_full_range_roughly_uniformly() {
    let mut lfsr = GaloisLfsr::new(NonZeroU32::new(0xACE1_u32).unwrap());
    let mut sum: u64 = 0;
    let n = 200_000u64;
    for _ in 0..n {
        sum += u64::from(lfsr.next_value());
    }
    let mean = sum / n;
    let expected = u64::from(u32::MAX / 2);
    let tolerance = expected / 20; // 5%
    assert!(
        mean.abs_diff(expected) < tolerance,
        "mean {mean} too far from {expected}"
    );
}
