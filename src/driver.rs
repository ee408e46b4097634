// CLASSIFICATION: COMMUNITY
// Filename: driver.rs v0.6
// Author: Lukas Bower
// Date Modified: 2027-09-04

//! Driver monitor and public operations.
//!
//! One mutex guards every terminal's state; holding it is the monitor of
//! the classic formulation. User operations may suspend only by waiting
//! on a per-terminal condition variable, always inside a `while` loop
//! over the predicate (Mesa semantics: a signalled waiter re-acquires
//! the monitor and re-tests). Interrupt entries never wait, and spurious
//! interrupts for unknown or uninitialized terminals return without
//! touching state.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use log::warn;

use crate::arbiter::{self, TxOutcome};
use crate::discipline;
use crate::hw::TerminalHardware;
use crate::term::TermState;
use crate::ttymux_types::{TermStats, TtyError, NUM_TERMINALS};

/// The multi-terminal driver: one monitor over all per-terminal state.
pub struct TtyDriver {
    hw: Arc<dyn TerminalHardware>,
    monitor: Mutex<[TermState; NUM_TERMINALS]>,
    /// Signalled when a committed line appears in a terminal's input.
    input_ready: [Condvar; NUM_TERMINALS],
    /// Signalled when a terminal's output ring gains space or its
    /// transmit channel goes idle.
    out_space: [Condvar; NUM_TERMINALS],
}

impl TtyDriver {
    /// Create a driver over `hw` with every terminal out of service and
    /// all state zeroed.
    pub fn new(hw: Arc<dyn TerminalHardware>) -> Self {
        Self {
            hw,
            monitor: Mutex::new(std::array::from_fn(|_| TermState::new())),
            input_ready: std::array::from_fn(|_| Condvar::new()),
            out_space: std::array::from_fn(|_| Condvar::new()),
        }
    }

    /// Bring one terminal into service: zero its statistics, mark it
    /// initialized and run the hardware bring-up, propagating its
    /// failure.
    pub fn init_terminal(&self, term: usize) -> Result<(), TtyError> {
        if term >= NUM_TERMINALS {
            return Err(TtyError::BadTerminal(term));
        }
        let mut terms = self.monitor.lock().unwrap();
        if terms[term].inited {
            return Err(TtyError::TerminalAlreadyInitialized(term));
        }
        terms[term].stats = TermStats::default();
        terms[term].inited = true;
        self.hw.init_terminal(term)?;
        Ok(())
    }

    /// Write `buf` to `term`, blocking until every byte has been
    /// accepted into the output rings, not until it has drained to the
    /// hardware. Back-pressure comes from the full-ring wait alone, so
    /// writers on distinct terminals stay independent.
    pub fn write(&self, term: usize, buf: &[u8]) -> Result<usize, TtyError> {
        let mut terms = self.checked_lock(term)?;
        if buf.is_empty() {
            return Ok(0);
        }
        for &byte in buf {
            while terms[term].out.is_full() {
                terms = self.out_space[term].wait(terms).unwrap();
            }
            let _accepted = terms[term].out.push(byte);
            debug_assert!(_accepted);
            if !terms[term].tx_busy {
                self.pump(term, &mut terms);
            }
        }
        terms[term].stats.user_in += buf.len() as u64;
        Ok(buf.len())
    }

    /// Read from `term` into `buf`, blocking until a committed line is
    /// present. The last byte copied is `\n` unless `buf` filled first;
    /// a line longer than `buf` comes out across successive calls.
    pub fn read(&self, term: usize, buf: &mut [u8]) -> Result<usize, TtyError> {
        let mut terms = self.checked_lock(term)?;
        if buf.is_empty() {
            return Ok(0);
        }
        while !terms[term].has_line() {
            terms = self.input_ready[term].wait(terms).unwrap();
        }
        let mut copied = 0;
        while copied < buf.len() {
            let Some(byte) = terms[term].input.pop() else { break };
            buf[copied] = byte;
            copied += 1;
            if byte == b'\n' {
                terms[term].lines -= 1;
                break;
            }
        }
        terms[term].stats.user_out += copied as u64;
        Ok(copied)
    }

    /// Atomic snapshot of every terminal's counters.
    pub fn statistics(&self) -> [TermStats; NUM_TERMINALS] {
        let terms = self.monitor.lock().unwrap();
        std::array::from_fn(|i| terms[i].stats)
    }

    /// Keyboard receive interrupt: read the latched byte, run the line
    /// discipline over it, wake readers on a committed line and start
    /// echo transmission if the channel is idle. Never waits.
    pub fn receive_interrupt(&self, term: usize) {
        if term >= NUM_TERMINALS {
            warn!("receive interrupt for unknown terminal {term}");
            return;
        }
        let mut terms = self.monitor.lock().unwrap();
        if !terms[term].inited {
            warn!("receive interrupt for uninitialized terminal {term}");
            return;
        }
        let byte = self.hw.read_data_register(term);
        terms[term].stats.tty_in += 1;
        if discipline::receive_byte(&mut terms[term], byte) {
            self.input_ready[term].notify_all();
        }
        if !terms[term].tx_busy {
            self.pump(term, &mut terms);
        }
    }

    /// Display transmit interrupt: the in-flight byte has completed, so
    /// emit the next one or let the channel go idle. Never waits.
    pub fn transmit_interrupt(&self, term: usize) {
        if term >= NUM_TERMINALS {
            warn!("transmit interrupt for unknown terminal {term}");
            return;
        }
        let mut terms = self.monitor.lock().unwrap();
        if !terms[term].inited {
            warn!("transmit interrupt for uninitialized terminal {term}");
            return;
        }
        self.pump(term, &mut terms);
    }

    /// Run the arbiter once and turn its outcome into signals: space
    /// freed in the output ring or an idle channel wakes blocked
    /// writers.
    fn pump(&self, term: usize, terms: &mut [TermState; NUM_TERMINALS]) {
        match arbiter::transmit_next(self.hw.as_ref(), term, &mut terms[term]) {
            TxOutcome::Sent { freed_out: true } => {
                self.out_space[term].notify_all();
            }
            TxOutcome::Sent { freed_out: false } => {}
            TxOutcome::Idle => {
                debug_assert!(terms[term].outgoing_empty());
                self.out_space[term].notify_all();
            }
        }
    }

    fn checked_lock(
        &self,
        term: usize,
    ) -> Result<MutexGuard<'_, [TermState; NUM_TERMINALS]>, TtyError> {
        if term >= NUM_TERMINALS {
            return Err(TtyError::BadTerminal(term));
        }
        let terms = self.monitor.lock().unwrap();
        if !terms[term].inited {
            return Err(TtyError::TerminalNotInitialized(term));
        }
        Ok(terms)
    }
}
