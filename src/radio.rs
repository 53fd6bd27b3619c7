//! Radio Control Logic
//!
//! The hardware-facing half of the modulation engine and the transmitter
//! lifecycle state machine.

pub mod modulator;
pub mod pump;
pub mod transmitter;
