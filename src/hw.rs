// CLASSIFICATION: COMMUNITY
// Filename: hw.rs v0.5
// Author: Lukas Bower
// Date Modified: 2027-09-02

//! Hardware shim boundary.
//!
//! The driver reaches terminal hardware only through [`TerminalHardware`]
//! and only with the monitor held. [`SimulatedHardware`] is the
//! in-memory terminal bank used by tests, benches and the demo binary:
//! keystrokes are latched before the caller raises a receive interrupt,
//! transmitted bytes are recorded per terminal, and transmit completion
//! is handed out as a token so an ordinary thread can play the display.

use std::sync::Mutex;

use thiserror::Error;

use crate::ttymux_types::NUM_TERMINALS;

/// Fault reported by the hardware bring-up for one terminal.
#[derive(Debug, Error)]
#[error("hardware fault on terminal {term}: {reason}")]
pub struct HardwareError {
    pub term: usize,
    pub reason: String,
}

/// One keyboard/display pair per terminal index.
pub trait TerminalHardware: Send + Sync {
    /// One-time hardware bring-up for `term`.
    fn init_terminal(&self, term: usize) -> Result<(), HardwareError>;

    /// Begin transmission of one byte; completion is announced by the
    /// next transmit interrupt for `term`.
    fn write_data_register(&self, term: usize, byte: u8);

    /// Fetch the byte latched by the most recent receive interrupt.
    /// Called exactly once per receive interrupt.
    fn read_data_register(&self, term: usize) -> u8;
}

#[derive(Debug, Default)]
struct SimTerm {
    latched: u8,
    written: Vec<u8>,
    in_flight: bool,
    inited: bool,
    fail_init: bool,
}

/// In-memory terminal bank implementing [`TerminalHardware`].
pub struct SimulatedHardware {
    terms: Mutex<Vec<SimTerm>>,
}

impl SimulatedHardware {
    pub fn new() -> Self {
        Self {
            terms: Mutex::new((0..NUM_TERMINALS).map(|_| SimTerm::default()).collect()),
        }
    }

    /// Latch one typed byte. The caller follows up with a receive
    /// interrupt before latching the next byte.
    pub fn latch_input(&self, term: usize, byte: u8) {
        self.terms.lock().unwrap()[term].latched = byte;
    }

    /// Consume the pending transmit completion, if any. The caller is
    /// expected to raise a transmit interrupt for each `true` returned.
    pub fn take_transmit_complete(&self, term: usize) -> bool {
        let mut terms = self.terms.lock().unwrap();
        let pending = terms[term].in_flight;
        terms[term].in_flight = false;
        pending
    }

    /// Snapshot of everything transmitted to `term` so far.
    pub fn output(&self, term: usize) -> Vec<u8> {
        self.terms.lock().unwrap()[term].written.clone()
    }

    /// Number of bytes transmitted to `term` so far.
    pub fn output_len(&self, term: usize) -> usize {
        self.terms.lock().unwrap()[term].written.len()
    }

    /// Drain and return everything transmitted to `term` so far.
    pub fn take_output(&self, term: usize) -> Vec<u8> {
        std::mem::take(&mut self.terms.lock().unwrap()[term].written)
    }

    /// Make the next `init_terminal` call for `term` fail.
    pub fn fail_next_init(&self, term: usize) {
        self.terms.lock().unwrap()[term].fail_init = true;
    }
}

impl Default for SimulatedHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalHardware for SimulatedHardware {
    fn init_terminal(&self, term: usize) -> Result<(), HardwareError> {
        let mut terms = self.terms.lock().unwrap();
        if terms[term].fail_init {
            terms[term].fail_init = false;
            return Err(HardwareError { term, reason: "simulated bring-up failure".into() });
        }
        terms[term].inited = true;
        Ok(())
    }

    fn write_data_register(&self, term: usize, byte: u8) {
        let mut terms = self.terms.lock().unwrap();
        // The driver serializes on tx_busy; a second write before the
        // completion token is taken would be a driver bug.
        debug_assert!(!terms[term].in_flight);
        terms[term].written.push(byte);
        terms[term].in_flight = true;
    }

    fn read_data_register(&self, term: usize) -> u8 {
        self.terms.lock().unwrap()[term].latched
    }
}
