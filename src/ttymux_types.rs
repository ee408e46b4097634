// CLASSIFICATION: COMMUNITY
// Filename: ttymux_types.rs v0.4
// Author: Lukas Bower
// Date Modified: 2027-09-02

//! Shared types for ttymux modules.

use serde::Serialize;
use thiserror::Error;

use crate::hw::HardwareError;

/// Number of terminals managed by the driver.
pub const NUM_TERMINALS: usize = 4;

/// Capacity of the input, echo and output rings.
pub const BUFFER_SIZE: usize = 100;

/// Capacity of the staging rings holding the trailing bytes of a
/// multi-byte output sequence.
pub const SPECIAL_SIZE: usize = 2;

/// Per-terminal I/O counters, snapshotted atomically across all
/// terminals by [`crate::driver::TtyDriver::statistics`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermStats {
    /// Bytes received from the keyboard.
    pub tty_in: u64,
    /// Bytes handed to the display hardware.
    pub tty_out: u64,
    /// Bytes accepted from writers.
    pub user_in: u64,
    /// Bytes delivered to readers.
    pub user_out: u64,
}

/// Errors surfaced by the public driver operations.
#[derive(Debug, Error)]
pub enum TtyError {
    #[error("terminal driver already initialized")]
    AlreadyInitialized,
    #[error("terminal driver not initialized")]
    DriverNotInitialized,
    #[error("terminal {0} out of range")]
    BadTerminal(usize),
    #[error("terminal {0} not initialized")]
    TerminalNotInitialized(usize),
    #[error("terminal {0} already initialized")]
    TerminalAlreadyInitialized(usize),
    #[error(transparent)]
    Hardware(#[from] HardwareError),
}
