// CLASSIFICATION: COMMUNITY
// Filename: discipline.rs v0.4
// Author: Lukas Bower
// Date Modified: 2027-09-02

//! Line discipline applied to each received byte.
//!
//! Pure policy over a terminal state block: no waiting, no hardware
//! access. CR and LF both commit the current line as a canonical `\n`;
//! backspace and DEL erase within the current line; a bell answers an
//! erase at line start or a byte that no longer fits. Echo bytes are
//! staged as single markers (`\n` commit, `\b` erase) that the transmit
//! arbiter expands into their full sequences at emission time.

use log::debug;

use crate::term::TermState;

pub(crate) const BELL: u8 = 0x07;
pub(crate) const BACKSPACE: u8 = 0x08;
pub(crate) const DELETE: u8 = 0x7f;

/// Apply the discipline to one received byte. Returns `true` when a
/// complete line became available to readers.
pub fn receive_byte(st: &mut TermState, byte: u8) -> bool {
    match byte {
        b'\r' | b'\n' => {
            if !st.input.push(b'\n') {
                // A terminator that does not fit is rejected like any
                // other overflowed byte; the line stays uncommitted.
                enqueue_echo(st, BELL);
                return false;
            }
            st.line_len = 0;
            st.lines += 1;
            enqueue_echo(st, b'\n');
            true
        }
        BACKSPACE | DELETE => {
            if st.line_len > 0 {
                st.input.pop_newest();
                st.line_len -= 1;
                enqueue_echo(st, BACKSPACE);
            } else {
                // Nothing left to erase on this line.
                enqueue_echo(st, BELL);
            }
            false
        }
        _ => {
            if st.input.push(byte) {
                st.line_len += 1;
                enqueue_echo(st, byte);
            } else {
                enqueue_echo(st, BELL);
            }
            false
        }
    }
}

/// Queue one echo byte, dropping it when the display is hopelessly
/// behind the keyboard.
fn enqueue_echo(st: &mut TermState, byte: u8) {
    if !st.echo.push(byte) {
        debug!("echo ring full, dropping byte {byte:#04x}");
    }
}
