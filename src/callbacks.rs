// src/callbacks.rs
//! Callback capability traits.
//!
//! Each window holds one slot per callback kind; registering a callback
//! overwrites the previous one. There is no fan-out. Handlers are borrowed
//! for the lifetime of the bootstrap object, never owned by it.

use crate::driver::Frame;
use crate::error::Result;

/// ASCII escape, the one key the default keyboard handler acts on.
pub const KEY_ESCAPE: u8 = 27;

/// What the event loop should do after a keyboard callback returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Keep pumping events.
    Continue,
    /// Leave the main loop; the program is done.
    Exit,
}

/// Redraw handler. Receives a [`Frame`] so it can swap buffers.
pub trait DisplayHandler {
    fn display(&self, frame: &mut Frame<'_>) -> Result<()>;
}

/// Resize handler.
pub trait ReshapeHandler {
    fn reshape(&self, width: i32, height: i32);
}

/// Key-press handler, with the pointer position at press time.
pub trait KeyboardHandler {
    fn keyboard(&self, key: u8, x: i32, y: i32) -> LoopControl;
}

/// Default keyboard handler installed on every new window: ESC ends the
/// main loop, everything else is ignored. The embedding program exits once
/// the loop returns, which preserves the classic GLUT lifecycle without
/// this layer terminating the process itself.
#[derive(Debug, Default)]
pub struct EscapeExits;

impl KeyboardHandler for EscapeExits {
    fn keyboard(&self, key: u8, _x: i32, _y: i32) -> LoopControl {
        if key == KEY_ESCAPE {
            LoopControl::Exit
        } else {
            LoopControl::Continue
        }
    }
}

pub(crate) static DEFAULT_KEYBOARD: EscapeExits = EscapeExits;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keyboard_exits_on_escape_only() {
        assert_eq!(EscapeExits.keyboard(KEY_ESCAPE, 0, 0), LoopControl::Exit);
        for key in [0u8, b'a', b'q', 26, 28, 255] {
            assert_eq!(EscapeExits.keyboard(key, 10, 20), LoopControl::Continue);
        }
    }
}
