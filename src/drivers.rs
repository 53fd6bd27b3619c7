//! Peripheral Drivers
//!
//! High-level drivers over the register bus. These provide
//! domain-specific abstractions over the HAL layer.

pub mod clock;
