//! CLI Contract Tests
//!
//! The usage path must exit 0 without touching hardware, and startup
//! failures must exit nonzero before any register access. None of these
//! invocations reach /dev/mem, so they run on any host.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn no_arguments_prints_usage_and_exits_zero() {
    Command::cargo_bin("gpclk-fm")
        .unwrap()
        .assert()
        .success()
        .stderr(predicate::str::contains("usage:"));
}

#[test]
fn missing_audio_file_is_a_fatal_startup_error() {
    Command::cargo_bin("gpclk-fm")
        .unwrap()
        .arg("/definitely/not/here.wav")
        .assert()
        .failure()
        .stderr(predicate::str::contains("audio source"));
}

#[test]
fn out_of_range_carrier_is_rejected() {
    Command::cargo_bin("gpclk-fm")
        .unwrap()
        .args(["-", "500.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("carrier frequency"));
}

#[test]
fn nonpositive_bandwidth_is_rejected() {
    Command::cargo_bin("gpclk-fm")
        .unwrap()
        .args(["-", "77.7", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bandwidth"));
}
