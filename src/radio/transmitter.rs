//! Transmitter Lifecycle
//!
//! Startup ordering: configure the output pin, enable the clock from PLLD,
//! prime the divisor with the unmodulated center word, then hand control
//! to the sample pump. Shutdown disables the clock exactly once no matter
//! how many termination triggers fire; leaving the generator enabled after
//! exit would keep radiating an unintended carrier.

use std::io::Read;
use std::sync::atomic::AtomicBool;

use tracing::warn;

use crate::drivers::clock::{ClockGenerator, ClockSource};
use crate::dsp::dither::GaloisLfsr;
use crate::hal::RegisterBus;
use crate::radio::modulator::DivisorModulator;
use crate::radio::pump::SamplePump;
use crate::types::{Error, ModulationParams};

/// Transmitter state machine
///
/// `Idle → Transmitting → Stopped`; `Stopped` is terminal, there is no
/// transition back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TxState {
    /// Registers mapped, clock not yet enabled
    #[default]
    Idle,
    /// Clock enabled and radiating
    Transmitting,
    /// Clock disabled; terminal
    Stopped,
}

impl TxState {
    /// Lowercase state name for diagnostics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Transmitting => "transmitting",
            Self::Stopped => "stopped",
        }
    }
}

/// Owns the clock generator and sequences its lifecycle
#[derive(Debug)]
pub struct Transmitter<B: RegisterBus> {
    clock: ClockGenerator<B>,
    params: ModulationParams,
    state: TxState,
}

impl<B: RegisterBus> Transmitter<B> {
    /// Create an idle transmitter over `bus`, clocked from PLLD
    #[must_use]
    pub const fn new(bus: B, params: ModulationParams) -> Self {
        Self {
            clock: ClockGenerator::new(bus, ClockSource::PllD),
            params,
            state: TxState::Idle,
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> TxState {
        self.state
    }

    /// Configure the pin, enable the clock and prime the divisor with the
    /// unmodulated center word.
    ///
    /// Only acts from `Idle`; the state machine has no re-entry, so any
    /// later call is ignored.
    pub fn start(&mut self) {
        if self.state != TxState::Idle {
            warn!(state = ?self.state, "start ignored outside Idle");
            return;
        }
        self.clock.configure_output_pin();
        self.clock.enable();
        self.clock.set_divisor(self.params.center());
        self.state = TxState::Transmitting;
    }

    /// Pump `source` through the modulator until end of stream or `stop`.
    ///
    /// Returns the number of samples consumed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the transmitter is `Transmitting`;
    /// [`Error::AudioRead`] when the stream fails mid-transmission.
    pub fn broadcast<R: Read>(&mut self, source: R, stop: &AtomicBool) -> Result<u64, Error> {
        if self.state != TxState::Transmitting {
            return Err(Error::InvalidState {
                operation: "broadcast",
                state: self.state.as_str(),
            });
        }
        let mut modulator =
            DivisorModulator::new(&mut self.clock, self.params.center(), GaloisLfsr::default());
        let mut pump = SamplePump::new(source, self.params.bandwidth(), self.params.speed());
        pump.run(&mut modulator, stop)?;
        Ok(pump.samples_consumed())
    }

    /// Disable the clock and enter the terminal state.
    ///
    /// Idempotent: the disable register write happens at most once per
    /// transmitter, however many termination triggers invoke this. Safe to
    /// call without a prior [`start`](Self::start).
    pub fn shutdown(&mut self) {
        if self.state == TxState::Stopped {
            return;
        }
        self.clock.disable();
        self.state = TxState::Stopped;
    }
}

impl<B: RegisterBus> Drop for Transmitter<B> {
    /// Every exit path disables the carrier, including abnormal ones.
    fn drop(&mut self) {
        self.shutdown();
    }
}
