//! Shared test support: a recording register bus.

#![allow(dead_code)]

use gpclk_fm::hal::{Register, RegisterBus};

/// Divisor field mask of CM_GP0DIV
pub const DIV_MASK: u32 = 0x00FF_FFFF;

/// In-memory register bus that records every write
#[derive(Debug, Default)]
pub struct MockBus {
    /// Current GPFSEL0 value, returned by reads and updated by writes
    pub fsel: u32,
    /// Every write in order
    pub writes: Vec<(Register, u32)>,
}

impl MockBus {
    /// Divisor writes with the password byte stripped
    pub fn divisor_writes(&self) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|(reg, _)| *reg == Register::ClockDivisor)
            .map(|(_, value)| value & DIV_MASK)
            .collect()
    }

    /// Raw clock-control writes
    pub fn control_writes(&self) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|(reg, _)| *reg == Register::ClockControl)
            .map(|(_, value)| *value)
            .collect()
    }
}

impl RegisterBus for MockBus {
    fn read(&self, reg: Register) -> u32 {
        match reg {
            Register::PinFunctionSelect0 => self.fsel,
            _ => 0,
        }
    }

    fn write(&mut self, reg: Register, value: u32) {
        if reg == Register::PinFunctionSelect0 {
            self.fsel = value;
        }
        self.writes.push((reg, value));
    }
}
