// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.2
// Author: Lukas Bower
// Date Modified: 2027-09-04

//! Shared helpers for the driver integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ttymux::{SimulatedHardware, TtyDriver};

/// Fresh driver over simulated hardware with `term` already in service.
pub fn driver_with_terminal(term: usize) -> (Arc<TtyDriver>, Arc<SimulatedHardware>) {
    let hw = Arc::new(SimulatedHardware::new());
    let driver = Arc::new(TtyDriver::new(hw.clone()));
    driver.init_terminal(term).expect("terminal init");
    (driver, hw)
}

/// Latch one byte and raise the receive interrupt for it.
pub fn type_byte(driver: &TtyDriver, hw: &SimulatedHardware, term: usize, byte: u8) {
    hw.latch_input(term, byte);
    driver.receive_interrupt(term);
}

/// Type a whole string, one interrupt per byte.
pub fn type_str(driver: &TtyDriver, hw: &SimulatedHardware, term: usize, s: &str) {
    for &b in s.as_bytes() {
        type_byte(driver, hw, term, b);
    }
}

/// Acknowledge transmissions until the channel goes idle.
pub fn drain(driver: &TtyDriver, hw: &SimulatedHardware, term: usize) {
    while hw.take_transmit_complete(term) {
        driver.transmit_interrupt(term);
    }
}

/// Background display: acknowledges every transmitted byte so blocked
/// writers keep making progress. Flip the returned flag to stop it.
pub fn start_display_pump(
    driver: Arc<TtyDriver>,
    hw: Arc<SimulatedHardware>,
    term: usize,
) -> (Arc<AtomicBool>, JoinHandle<()>) {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();
    let handle = thread::spawn(move || {
        while !flag.load(Ordering::Relaxed) {
            if hw.take_transmit_complete(term) {
                driver.transmit_interrupt(term);
            } else {
                thread::sleep(Duration::from_micros(20));
            }
        }
    });
    (stop, handle)
}

/// Poll `cond` until it holds or `timeout` elapses.
pub fn wait_until(cond: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    cond()
}
