// CLASSIFICATION: COMMUNITY
// Filename: term.rs v0.3
// Author: Lukas Bower
// Date Modified: 2027-08-27

//! Per-terminal state block. Owned by the driver and touched only with
//! the monitor held.

use crate::ring::Ring;
use crate::ttymux_types::{TermStats, BUFFER_SIZE, SPECIAL_SIZE};

#[derive(Debug)]
pub struct TermState {
    /// Bytes available to readers, segmented into lines by `\n`.
    pub(crate) input: Ring<BUFFER_SIZE>,
    /// Echo bytes queued for the display. Holds the `\n` commit and
    /// `\b` erase markers that the arbiter expands at emission time.
    pub(crate) echo: Ring<BUFFER_SIZE>,
    /// Staging slots for the trailing bytes of an echo sequence.
    pub(crate) echo_special: Ring<SPECIAL_SIZE>,
    /// Bytes supplied by writers awaiting transmission.
    pub(crate) out: Ring<BUFFER_SIZE>,
    /// Staging slot for the `\n` of an expanded user newline.
    pub(crate) out_special: Ring<SPECIAL_SIZE>,
    /// One byte has been handed to the hardware and its transmit
    /// interrupt has not fired yet.
    pub(crate) tx_busy: bool,
    /// Length of the current unterminated input line.
    pub(crate) line_len: usize,
    /// Committed (`\n`-terminated) lines currently stored in `input`.
    pub(crate) lines: usize,
    pub(crate) inited: bool,
    pub(crate) stats: TermStats,
}

impl TermState {
    pub(crate) fn new() -> Self {
        Self {
            input: Ring::new(),
            echo: Ring::new(),
            echo_special: Ring::new(),
            out: Ring::new(),
            out_special: Ring::new(),
            tx_busy: false,
            line_len: 0,
            lines: 0,
            inited: false,
            stats: TermStats::default(),
        }
    }

    /// A reader may proceed iff a committed line terminator is present
    /// somewhere in `input`.
    pub(crate) fn has_line(&self) -> bool {
        self.lines > 0
    }

    /// All four outgoing rings drained.
    pub(crate) fn outgoing_empty(&self) -> bool {
        self.echo_special.is_empty()
            && self.echo.is_empty()
            && self.out_special.is_empty()
            && self.out.is_empty()
    }
}
