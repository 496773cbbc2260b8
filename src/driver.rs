// src/driver.rs
//! `ContextDriver` trait — minimal interface to the context-creation library.
//!
//! The façade treats context creation as a capability: hand an attribute
//! list over, get opaque handles back, fail loudly. A driver wraps whatever
//! platform library actually does the work; the [`HeadlessDriver`] in
//! [`crate::drivers`] wraps nothing at all and exists for tests and
//! windowing-system-free embedding.
//!
//! Driver methods return `anyhow::Result` so implementations can attach
//! their own diagnostics. The façade folds failures into
//! [`GlutError::ResourceCreation`](crate::GlutError::ResourceCreation),
//! naming the failing call and keeping the driver's message.
//!
//! [`HeadlessDriver`]: crate::drivers::HeadlessDriver

use anyhow::Result;

use crate::config::AttribList;
use crate::error::GlutError;
use crate::platform::Platform;

/// Opaque display-connection handle issued by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayHandle(pub u64);

/// Opaque pixel-format/config handle issued by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigHandle(pub u64);

/// Opaque GL context handle issued by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextHandle(pub u64);

/// Opaque window handle issued by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(pub u64);

/// Raw native resources backing a driver window, for backends that expose
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeWindowInfo {
    /// Xlib display pointer and window XID, as exposed by the X11-based
    /// backends.
    X11 {
        /// The `Display*`, as an address.
        display: usize,
        /// The window XID.
        window: u64,
    },
    /// The backend exposes nothing usable.
    None,
}

/// Platform-agnostic events delivered by the native pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpEvent {
    /// The window (or part of it) needs repainting.
    Expose,
    /// The window was resized.
    Configure { width: i32, height: i32 },
    /// A key was pressed, with the pointer position at press time.
    Key { key: u8, x: i32, y: i32 },
}

/// Minimal context-creation interface the façade drives.
pub trait ContextDriver {
    /// Connect to the platform's display system. `display_name` comes from
    /// the `-display` startup flag when present.
    fn connect(&mut self, platform: Platform, display_name: Option<&str>)
        -> Result<DisplayHandle>;

    /// Resolve an attribute list to a concrete config.
    fn choose_config(&mut self, display: DisplayHandle, attribs: &AttribList)
        -> Result<ConfigHandle>;

    /// Create a GL context from a config.
    fn create_context(&mut self, config: ConfigHandle) -> Result<ContextHandle>;

    /// Create a window for a config at the requested size.
    fn create_window(&mut self, config: ConfigHandle, width: i32, height: i32)
        -> Result<WindowHandle>;

    /// Report the native resources backing a window.
    fn native_window(&mut self, window: WindowHandle) -> Result<NativeWindowInfo>;

    /// Bind a context to a display/window pair.
    fn make_current(
        &mut self,
        display: DisplayHandle,
        window: WindowHandle,
        context: ContextHandle,
    ) -> Result<()>;

    /// Ask the windowing system to map the window.
    fn show_window(&mut self, window: WindowHandle) -> Result<()>;

    /// Swap front and back buffers.
    fn swap_buffers(&mut self, window: WindowHandle) -> Result<()>;

    /// Destroy a window's backing resource.
    fn destroy_window(&mut self, window: WindowHandle) -> Result<()>;

    /// Block until the windowing system delivers the next event for the
    /// window. Only meaningful on backends with a real event pump.
    fn next_event(&mut self, window: WindowHandle) -> Result<PumpEvent>;
}

/// Swap capability handed to display callbacks while the main loop runs.
///
/// Display handlers finish a frame by calling [`swap_buffers`]; this borrows
/// the driver for exactly that long, so a handler never needs (and never
/// gets) the whole bootstrap object.
///
/// [`swap_buffers`]: Frame::swap_buffers
pub struct Frame<'a> {
    driver: &'a mut dyn ContextDriver,
    window: WindowHandle,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(driver: &'a mut dyn ContextDriver, window: WindowHandle) -> Self {
        Frame { driver, window }
    }

    /// Swap front and back buffers on the window being displayed.
    pub fn swap_buffers(&mut self) -> crate::error::Result<()> {
        self.driver
            .swap_buffers(self.window)
            .map_err(|e| GlutError::resource("swap_buffers", e))
    }
}
