//! System configuration and hardware constants
//!
//! Compile-time constants for the BCM283x clock-manager peripheral and
//! the transmission defaults. All register offsets, reference-clock
//! frequencies and loop parameters are centralized here.

/// Physical base address of the peripheral window (BCM2836/BCM2837,
/// i.e. Raspberry Pi 2/3)
pub const PERIPHERAL_BASE: usize = 0x3F00_0000;

/// Length of the mapped peripheral window
pub const PERIPHERAL_WINDOW_LEN: usize = 0x0100_0000;

/// PLLD reference clock frequency in MHz (the clock manager's source
/// during transmission)
pub const PLLD_FREQ_MHZ: f64 = 500.0;

/// Assumed input sample rate (16-bit mono PCM at 22.05 kHz)
pub const AUDIO_SAMPLE_RATE: u32 = 22_050;

/// Fixed prefix skipped before treating the input as raw PCM
pub const WAV_PREFIX_BYTES: u64 = 22;

/// Bytes read from the audio source per block
pub const READ_BLOCK_BYTES: usize = 512;

/// Divisor writes performed per audio sample.
///
/// There is no explicit pacing: the loop relies on the fixed cost of a
/// register write plus the surrounding arithmetic to approximate the
/// interval implied by the sample rate. This value is a platform
/// calibration constant; lower values play faster.
pub const SUBSTEPS_PER_SAMPLE: u32 = 270;

/// Default carrier center frequency in MHz
pub const DEFAULT_CARRIER_MHZ: f64 = 77.7;

/// Default deviation scale (acts as volume)
pub const DEFAULT_BANDWIDTH: f32 = 8.0;

/// Default dither generator seed (any nonzero value works; the seed is
/// never reset during a transmission)
pub const DITHER_SEED: u32 = 1;
