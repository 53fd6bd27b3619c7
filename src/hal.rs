//! Hardware Abstraction Layer
//!
//! Names the clock-manager and pin-function registers the transmitter
//! touches and defines the bus they are reached through. The only
//! implementation that talks to real hardware is [`DevMem`]; tests
//! substitute their own [`RegisterBus`].

#[allow(unsafe_code)]
pub mod devmem;

pub use devmem::DevMem;

/// Named 32-bit peripheral registers
///
/// Offsets are relative to the peripheral base
/// ([`crate::config::PERIPHERAL_BASE`]); see the BCM2835 ARM Peripherals
/// datasheet, pp. 90 and 107-108.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    /// GPFSEL0 — function select for GPIO 0..=9
    PinFunctionSelect0,
    /// CM_GP0CTL — general-purpose clock 0 control
    ClockControl,
    /// CM_GP0DIV — general-purpose clock 0 divisor
    ClockDivisor,
}

impl Register {
    /// Byte offset of the register within the peripheral window
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::PinFunctionSelect0 => 0x0020_0000,
            Self::ClockControl => 0x0010_1070,
            Self::ClockDivisor => 0x0010_1074,
        }
    }
}

/// Readable/writable access to the named registers
///
/// The mapping behind an implementation must remain valid for every access
/// performed through it; [`DevMem`] guarantees this by owning the mapping
/// for its whole lifetime.
pub trait RegisterBus {
    /// Read a register
    fn read(&self, reg: Register) -> u32;

    /// Write a register
    fn write(&mut self, reg: Register, value: u32);
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn read(&self, reg: Register) -> u32 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Register, value: u32) {
        (**self).write(reg, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_offsets_match_datasheet() {
        assert_eq!(Register::PinFunctionSelect0.offset(), 0x0020_0000);
        assert_eq!(Register::ClockControl.offset(), 0x0010_1070);
        assert_eq!(Register::ClockDivisor.offset(), 0x0010_1074);
    }
}
