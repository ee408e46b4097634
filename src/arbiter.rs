// CLASSIFICATION: COMMUNITY
// Filename: arbiter.rs v0.4
// Author: Lukas Bower
// Date Modified: 2027-09-02

//! Transmit arbiter.
//!
//! All outgoing bytes of a terminal, echo and user output alike, compete
//! for a hardware channel that holds one byte in flight. Streams drain
//! in strict priority order; multi-byte sequences expand at emission
//! time, with the trailing bytes staged in the capacity-2 special rings
//! so they drain ahead of everything queued behind them.

use log::debug;

use crate::discipline::BACKSPACE;
use crate::hw::TerminalHardware;
use crate::ring::Ring;
use crate::term::TermState;
use crate::ttymux_types::SPECIAL_SIZE;

/// What the arbiter did with the channel.
#[derive(Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// A byte was written to the data register. `freed_out` is set when
    /// it came from the user output ring, opening space for a blocked
    /// writer.
    Sent { freed_out: bool },
    /// All four outgoing rings are empty; the channel is now idle.
    Idle,
}

/// Emit the next byte for `term`, if any.
///
/// Priority: echo staging, echo, output staging, output. A popped `\n`
/// is emitted as `\r` with `\n` staged behind it; a popped erase marker
/// is emitted as `\b` with `' '` and `\b` staged. The staging ring was
/// drained before its primary was popped, so the followers always fit
/// and the sequence reaches the hardware contiguously.
pub fn transmit_next(hw: &dyn TerminalHardware, term: usize, st: &mut TermState) -> TxOutcome {
    let mut freed_out = false;
    let byte = if let Some(b) = st.echo_special.pop() {
        b
    } else if let Some(b) = st.echo.pop() {
        match b {
            b'\n' => {
                stage(&mut st.echo_special, b'\n');
                b'\r'
            }
            BACKSPACE => {
                stage(&mut st.echo_special, b' ');
                stage(&mut st.echo_special, BACKSPACE);
                BACKSPACE
            }
            other => other,
        }
    } else if let Some(b) = st.out_special.pop() {
        b
    } else if let Some(b) = st.out.pop() {
        freed_out = true;
        if b == b'\n' {
            stage(&mut st.out_special, b'\n');
            b'\r'
        } else {
            b
        }
    } else {
        st.tx_busy = false;
        return TxOutcome::Idle;
    };
    hw.write_data_register(term, byte);
    st.tx_busy = true;
    st.stats.tty_out += 1;
    TxOutcome::Sent { freed_out }
}

fn stage(ring: &mut Ring<SPECIAL_SIZE>, byte: u8) {
    if !ring.push(byte) {
        debug!("staging ring full, dropping byte {byte:#04x}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::SimulatedHardware;

    fn queued<const CAP: usize>(ring: &mut Ring<CAP>, bytes: &[u8]) {
        for &b in bytes {
            assert!(ring.push(b));
        }
    }

    #[test]
    fn idle_when_everything_is_empty() {
        let hw = SimulatedHardware::new();
        let mut st = TermState::new();
        st.tx_busy = true;
        assert_eq!(transmit_next(&hw, 0, &mut st), TxOutcome::Idle);
        assert!(!st.tx_busy);
        assert!(hw.output(0).is_empty());
    }

    #[test]
    fn echo_outranks_user_output() {
        let hw = SimulatedHardware::new();
        let mut st = TermState::new();
        queued(&mut st.out, b"z");
        queued(&mut st.echo, b"e");
        assert_eq!(transmit_next(&hw, 0, &mut st), TxOutcome::Sent { freed_out: false });
        assert_eq!(transmit_next(&hw, 0, &mut st), TxOutcome::Sent { freed_out: true });
        assert_eq!(hw.output(0), b"ez");
    }

    #[test]
    fn echo_outranks_staged_user_output() {
        let hw = SimulatedHardware::new();
        let mut st = TermState::new();
        assert!(st.out_special.push(b'\n'));
        queued(&mut st.echo, b"e");
        queued(&mut st.out, b"z");
        transmit_next(&hw, 0, &mut st);
        transmit_next(&hw, 0, &mut st);
        transmit_next(&hw, 0, &mut st);
        assert_eq!(hw.output(0), b"e\nz");
    }

    #[test]
    fn commit_marker_expands_to_crlf() {
        let hw = SimulatedHardware::new();
        let mut st = TermState::new();
        queued(&mut st.echo, b"\n");
        assert_eq!(transmit_next(&hw, 0, &mut st), TxOutcome::Sent { freed_out: false });
        assert_eq!(st.echo_special.count(), 1);
        assert_eq!(transmit_next(&hw, 0, &mut st), TxOutcome::Sent { freed_out: false });
        assert_eq!(hw.output(0), b"\r\n");
        assert!(st.echo_special.is_empty());
    }

    #[test]
    fn erase_marker_expands_to_rubout() {
        let hw = SimulatedHardware::new();
        let mut st = TermState::new();
        queued(&mut st.echo, &[BACKSPACE]);
        for _ in 0..3 {
            transmit_next(&hw, 0, &mut st);
        }
        assert_eq!(hw.output(0), &[BACKSPACE, b' ', BACKSPACE]);
        assert_eq!(transmit_next(&hw, 0, &mut st), TxOutcome::Idle);
    }

    #[test]
    fn user_newline_expands_and_frees_space() {
        let hw = SimulatedHardware::new();
        let mut st = TermState::new();
        queued(&mut st.out, b"\n");
        assert_eq!(transmit_next(&hw, 0, &mut st), TxOutcome::Sent { freed_out: true });
        assert_eq!(transmit_next(&hw, 0, &mut st), TxOutcome::Sent { freed_out: false });
        assert_eq!(hw.output(0), b"\r\n");
        assert_eq!(st.stats.tty_out, 2);
    }

    #[test]
    fn sequences_stay_contiguous_across_queued_echo() {
        // An erase expansion must finish before later echo bytes drain.
        let hw = SimulatedHardware::new();
        let mut st = TermState::new();
        queued(&mut st.echo, &[BACKSPACE, b'x']);
        for _ in 0..4 {
            transmit_next(&hw, 0, &mut st);
        }
        assert_eq!(hw.output(0), &[BACKSPACE, b' ', BACKSPACE, b'x']);
    }
}
