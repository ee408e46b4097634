// CLASSIFICATION: COMMUNITY
// Filename: api.rs v0.3
// Author: Lukas Bower
// Date Modified: 2027-09-04

//! Process-global driver entry points.
//!
//! The driver is linked into a single process, so interrupt trampolines
//! and user threads alike reach it through the one installed instance.
//! Installing twice fails, every other operation fails until an install
//! has happened, and interrupts arriving before that are dropped.

use std::sync::Arc;

use log::warn;
use once_cell::sync::OnceCell;

use crate::driver::TtyDriver;
use crate::hw::TerminalHardware;
use crate::ttymux_types::{TermStats, TtyError, NUM_TERMINALS};

static DRIVER: OnceCell<TtyDriver> = OnceCell::new();

/// Install the process-wide driver over `hw`.
pub fn init_terminal_driver(hw: Arc<dyn TerminalHardware>) -> Result<(), TtyError> {
    DRIVER
        .set(TtyDriver::new(hw))
        .map_err(|_| TtyError::AlreadyInitialized)
}

fn installed() -> Result<&'static TtyDriver, TtyError> {
    DRIVER.get().ok_or(TtyError::DriverNotInitialized)
}

/// Bring `term` into service on the installed driver.
pub fn init_terminal(term: usize) -> Result<(), TtyError> {
    installed()?.init_terminal(term)
}

/// Blocking write of `buf` to `term`; returns the bytes accepted.
pub fn write_terminal(term: usize, buf: &[u8]) -> Result<usize, TtyError> {
    installed()?.write(term, buf)
}

/// Blocking line read from `term` into `buf`; returns the bytes copied.
pub fn read_terminal(term: usize, buf: &mut [u8]) -> Result<usize, TtyError> {
    installed()?.read(term, buf)
}

/// Atomic snapshot of the counters of all terminals.
pub fn terminal_driver_statistics() -> Result<[TermStats; NUM_TERMINALS], TtyError> {
    Ok(installed()?.statistics())
}

/// Receive-interrupt trampoline. An interrupt with no driver installed
/// is spurious and dropped.
pub fn receive_interrupt(term: usize) {
    match DRIVER.get() {
        Some(driver) => driver.receive_interrupt(term),
        None => warn!("receive interrupt for terminal {term} with no driver installed"),
    }
}

/// Transmit-interrupt trampoline; same spurious-interrupt policy.
pub fn transmit_interrupt(term: usize) {
    match DRIVER.get() {
        Some(driver) => driver.transmit_interrupt(term),
        None => warn!("transmit interrupt for terminal {term} with no driver installed"),
    }
}
