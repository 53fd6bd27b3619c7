//! GPCLK FM Transmitter — CLI shell
//!
//! Thin entry point over the library: argument parsing, logging setup,
//! signal registration and lifecycle orchestration. The usage path never
//! touches hardware; every fatal error exits nonzero with a diagnostic
//! before the clock is left in a partial state.

use std::io;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::anyhow;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gpclk_fm::audio::AudioSource;
use gpclk_fm::config;
use gpclk_fm::hal::DevMem;
use gpclk_fm::radio::transmitter::Transmitter;
use gpclk_fm::types::{Bandwidth, CarrierFrequency, ModulationParams};

/// Set by the signal handler, checked by the pump at sample boundaries.
/// Register writes never happen in handler context.
static STOP: AtomicBool = AtomicBool::new(false);

extern "C" fn on_termination_signal(_signum: libc::c_int) {
    STOP.store(true, Ordering::SeqCst);
}

fn install_signal_handlers() {
    let handler = on_termination_signal as extern "C" fn(libc::c_int);
    // No SA_RESTART: a read blocked on stdin must come back with EINTR so
    // the pump reaches its stop check instead of sleeping forever.
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handler as libc::sighandler_t;
        libc::sigemptyset(&mut action.sa_mask);
        action.sa_flags = 0;
        libc::sigaction(libc::SIGINT, &action, std::ptr::null_mut());
        libc::sigaction(libc::SIGTERM, &action, std::ptr::null_mut());
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "gpclk-fm",
    version,
    about = "FM transmitter for Raspberry Pi 2/3 driving the GPCLK0 clock generator"
)]
struct Args {
    /// WAV file path, or `-` to read from stdin (16-bit 22.05 kHz mono PCM)
    audio: Option<String>,

    /// Carrier center frequency in MHz
    #[arg(default_value_t = config::DEFAULT_CARRIER_MHZ)]
    frequency: f64,

    /// Deviation scale, acts as volume; it should only ever be lowered
    #[arg(default_value_t = config::DEFAULT_BANDWIDTH)]
    bandwidth: f32,
}

fn print_usage() {
    eprintln!("usage: gpclk-fm <wavfile.wav | -> [frequency-mhz] [bandwidth]");
    eprintln!();
    eprintln!("wavfile must be 16-bit 22.05 kHz mono PCM; set it to '-' to read from stdin.");
    eprintln!(
        "frequency defaults to {} MHz; bandwidth defaults to {} and should only be lowered.",
        config::DEFAULT_CARRIER_MHZ,
        config::DEFAULT_BANDWIDTH
    );
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let Some(audio) = args.audio else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    match run(&audio, args.frequency, args.bandwidth) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gpclk-fm: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(audio: &str, frequency: f64, bandwidth: f32) -> anyhow::Result<()> {
    let carrier = CarrierFrequency::from_mhz(frequency).ok_or_else(|| {
        anyhow!(
            "carrier frequency {frequency} MHz is outside {}..={} MHz",
            CarrierFrequency::MIN_MHZ,
            CarrierFrequency::MAX_MHZ
        )
    })?;
    let bandwidth = Bandwidth::from_scale(bandwidth)
        .ok_or_else(|| anyhow!("bandwidth must be a positive finite number"))?;
    let params = ModulationParams::new(carrier, bandwidth, config::SUBSTEPS_PER_SAMPLE)?;

    // The audio source is opened before any hardware state exists, so an
    // unreadable input can never leave the clock enabled.
    let source = AudioSource::open(audio)?;

    install_signal_handlers();

    let bus = DevMem::map()?;
    let mut transmitter = Transmitter::new(bus, params);
    transmitter.start();
    info!(
        carrier_mhz = carrier.as_mhz(),
        bandwidth = bandwidth.scale(),
        speed = config::SUBSTEPS_PER_SAMPLE,
        audio,
        "broadcasting"
    );

    let samples = transmitter.broadcast(source, &STOP)?;
    transmitter.shutdown();
    info!(samples, "transmission finished");
    Ok(())
}
