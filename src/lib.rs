//! GPCLK FM Transmitter Library
//!
//! This library drives the BCM283x general-purpose clock generator
//! (GPCLK0, routed to GPIO4) as a low-power FM transmitter on Raspberry
//! Pi 2/3. A mono 16-bit PCM stream is encoded as frequency deviation of
//! the carrier by writing dithered divisor values to the clock manager.
//!
//! # Architecture
//!
//! The crate is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Transmitter lifecycle  │  Sample pump  │  CLI shell         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      DSP LAYER                               │
//! │  Deviation math  │  LFSR dither generator                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  Clock-manager driver  │  /dev/mem register bus              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Type-driven design**: Custom types enforce invariants at compile time
//! - **No unsafe in application code**: All unsafe isolated in the HAL layer
//! - **Explicit error handling**: All fallible operations return `Result`
//! - **Branch-free hot path**: Divisor range is validated once at startup so
//!   the per-sub-step register write carries no checks

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Hardware Abstraction Layer
///
/// Named peripheral registers and the `/dev/mem` register bus.
pub mod hal;

/// Peripheral Drivers
///
/// The GPCLK0 clock-manager driver.
pub mod drivers;

/// Digital Signal Processing
///
/// Deviation math and the dither generator; host-testable, no hardware.
pub mod dsp;

/// Radio Control Logic
///
/// Divisor modulator, sample pump and transmitter lifecycle.
pub mod radio;

/// Audio Input
///
/// File/stdin PCM source with the fixed WAV-prefix skip.
pub mod audio;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;
