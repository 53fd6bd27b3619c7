//! Sample Pump
//!
//! Reads fixed-size blocks of 16-bit little-endian mono PCM from the
//! audio source and fans each sample out into `speed` modulator sub-steps.
//!
//! There is no pacing anywhere in this loop: the block read is the only
//! operation that may wait, and once a block is in, all `speed`-fold
//! divisor writes execute back-to-back. Ordering is strictly sequential —
//! each write's instantaneous effect is the modulation.

use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config;
use crate::dsp::deviation::Deviation;
use crate::hal::RegisterBus;
use crate::radio::modulator::DivisorModulator;
use crate::types::{Bandwidth, Error};

/// Block-reading sample loop
#[derive(Debug)]
pub struct SamplePump<R: Read> {
    source: R,
    bandwidth: Bandwidth,
    speed: u32,
    samples_consumed: u64,
}

impl<R: Read> SamplePump<R> {
    /// Create a pump over `source`
    #[must_use]
    pub const fn new(source: R, bandwidth: Bandwidth, speed: u32) -> Self {
        Self {
            source,
            bandwidth,
            speed,
            samples_consumed: 0,
        }
    }

    /// Total samples consumed so far
    #[must_use]
    pub const fn samples_consumed(&self) -> u64 {
        self.samples_consumed
    }

    /// Drive `modulator` until the source is exhausted or `stop` is set.
    ///
    /// A zero-length read is the normal end of stream. Short reads are
    /// fine; a dangling odd byte is dropped rather than processed as half
    /// a sample. The stop flag is honored at sample boundaries, so
    /// shutdown never waits for the stream to reach a particular state.
    ///
    /// # Errors
    ///
    /// [`Error::AudioRead`] when the source fails mid-stream.
    pub fn run<B: RegisterBus>(
        &mut self,
        modulator: &mut DivisorModulator<'_, B>,
        stop: &AtomicBool,
    ) -> Result<(), Error> {
        let mut block = [0u8; config::READ_BLOCK_BYTES];
        let bandwidth = self.bandwidth.scale();
        loop {
            if stop.load(Ordering::Relaxed) {
                return Ok(());
            }
            let len = match self.source.read(&mut block) {
                Ok(len) => len,
                // A signal landing during a blocked read surfaces here;
                // loop back through the stop check before reading again.
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            if len == 0 {
                return Ok(());
            }
            for pair in block[..len].chunks_exact(2) {
                if stop.load(Ordering::Relaxed) {
                    return Ok(());
                }
                let sample = i16::from_le_bytes([pair[0], pair[1]]);
                let deviation = Deviation::from_sample(sample, bandwidth);
                for _ in 0..self.speed {
                    modulator.substep(deviation);
                }
                self.samples_consumed += 1;
            }
        }
    }
}
