// src/window.rs
//! The single live window.

use crate::callbacks::{DisplayHandler, KeyboardHandler, ReshapeHandler, DEFAULT_KEYBOARD};
use crate::driver::WindowHandle;

/// Native resources behind the live window, keyed by the platform that
/// created it. Only the active platform's case is ever populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeHandle {
    /// Xlib display pointer and window XID, straight from GLX.
    Glx { display: usize, window: u64 },
    /// Xlib display pointer and window XID, via EGL on X11.
    X11Egl { display: usize, window: u64 },
    /// Nothing. Wayland windows expose no handle here; input is
    /// unimplemented on that backend.
    None,
}

/// The one live window. [`Glut`](crate::Glut) holds zero or one of these,
/// never more; ids keep increasing across create/destroy cycles and are
/// never reused.
pub struct Window<'cb> {
    pub(crate) id: u32,
    pub(crate) backing: WindowHandle,
    pub(crate) native: NativeHandle,
    pub(crate) display_cb: Option<&'cb dyn DisplayHandler>,
    pub(crate) reshape_cb: Option<&'cb dyn ReshapeHandler>,
    pub(crate) keyboard_cb: &'cb dyn KeyboardHandler,
    // Set by post_redisplay; the event loop never reads it.
    pub(crate) redisplay: bool,
}

impl<'cb> Window<'cb> {
    pub(crate) fn new(id: u32, backing: WindowHandle, native: NativeHandle) -> Self {
        Window {
            id,
            backing,
            native,
            display_cb: None,
            reshape_cb: None,
            keyboard_cb: &DEFAULT_KEYBOARD,
            redisplay: false,
        }
    }

    /// The id handed back by `create_window`.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The native resources for the active platform.
    pub fn native_handle(&self) -> NativeHandle {
        self.native
    }
}
