// src/lib.rs
//! Minimal GLUT-compatible windowing bootstrap for GL behavior tests.
//!
//! Test programs are short, linear sequences of GL calls; the only real
//! machinery they need is a window with a current context and an event loop
//! that forwards input to a few callbacks. This crate is that machinery:
//! it selects a platform backend (GLX, X11+EGL or Wayland), negotiates a
//! config through a [`ContextDriver`], owns the single live window, and runs
//! the backend's dispatch strategy.
//!
//! A test program drives it in the classic GLUT order:
//!
//! ```no_run
//! use glut_waffle::{drivers::HeadlessDriver, DisplayMode, Glut};
//!
//! # fn main() -> glut_waffle::Result<()> {
//! let args: Vec<String> = std::env::args().collect();
//! let mut glut = Glut::new(HeadlessDriver::new());
//! glut.init(&args)?;
//! glut.init_display_mode(DisplayMode::RGB | DisplayMode::DOUBLE);
//! glut.init_window_size(300, 300);
//! let _id = glut.create_window("example")?;
//! // register callbacks, then:
//! glut.main_loop()?;
//! # Ok(())
//! # }
//! ```
//!
//! Every failure is fatal in intent and reported as a [`GlutError`]; the
//! embedding program prints it and exits non-zero. Wayland input handling
//! is a known gap: windows and contexts work, but the main loop only waits
//! out a fixed stand-in period there.

pub mod callbacks;
pub mod config;
pub mod driver;
pub mod drivers;
pub mod error;
pub mod glut;
pub mod platform;
pub mod window;

pub use callbacks::{
    DisplayHandler, EscapeExits, KeyboardHandler, LoopControl, ReshapeHandler, KEY_ESCAPE,
};
pub use config::{
    build_config_attribs, Attrib, AttribList, ContextApi, DisplayMode, OPENGL_BIT,
    OPENGL_ES1_BIT, OPENGL_ES2_BIT,
};
pub use driver::{ContextDriver, Frame, NativeWindowInfo, PumpEvent};
pub use error::{GlutError, Result};
pub use glut::Glut;
pub use platform::{select_platform, Platform, PLATFORM_ENV_VAR};
pub use window::{NativeHandle, Window};
