// src/glut.rs
//! The bootstrap object and its GLUT-shaped operation surface.
//!
//! One [`Glut`] instance replaces the process-wide state a classic GLUT
//! carries: it owns the driver, the display connection, the context and the
//! single live window, and every operation is a method on it. All fallible
//! operations return [`Result`]; nothing in here terminates the process.

use std::time::Duration;

use log::{debug, info, trace, warn};

use crate::callbacks::{DisplayHandler, KeyboardHandler, LoopControl, ReshapeHandler};
use crate::config::{build_config_attribs, ContextApi, DisplayMode};
use crate::driver::{
    ContextDriver, ContextHandle, DisplayHandle, Frame, NativeWindowInfo, PumpEvent, WindowHandle,
};
use crate::error::{GlutError, Result};
use crate::platform::{select_platform, Platform, PLATFORM_ENV_VAR};
use crate::window::{NativeHandle, Window};

/// Requested window size when `init_window_size` is never called.
const DEFAULT_WINDOW_SIZE: i32 = 300;

/// How long the Wayland pseudo event loop lingers before returning.
const WAYLAND_STANDIN_WAIT: Duration = Duration::from_secs(20);

/// The windowing/context bootstrap for a GL test program.
///
/// `'cb` is the lifetime of the borrowed callback handlers; `D` is the
/// context-creation driver. A test program constructs one of these, runs
/// the usual GLUT call sequence (`init`, `init_display_mode`,
/// `create_window`, register callbacks, `main_loop`) and exits when the
/// loop returns.
pub struct Glut<'cb, D: ContextDriver> {
    driver: D,
    context_api: ContextApi,
    platform: Platform,
    display_mode: DisplayMode,
    window_width: i32,
    window_height: i32,
    display: Option<DisplayHandle>,
    context: Option<ContextHandle>,
    window: Option<Window<'cb>>,
    window_id_pool: u32,
    wayland_standin_wait: Duration,
}

impl<'cb, D: ContextDriver> Glut<'cb, D> {
    /// Wrap a driver. No platform work happens until [`init`](Self::init).
    pub fn new(driver: D) -> Self {
        Glut {
            driver,
            context_api: ContextApi::OpenGl,
            platform: Platform::Glx,
            display_mode: DisplayMode::RGB,
            window_width: DEFAULT_WINDOW_SIZE,
            window_height: DEFAULT_WINDOW_SIZE,
            display: None,
            context: None,
            window: None,
            window_id_pool: 0,
            wayland_standin_wait: WAYLAND_STANDIN_WAIT,
        }
    }

    /// Select the context API for windows created later. `mask` takes one
    /// of the `OPENGL*_BIT` values from [`crate::config`].
    ///
    /// [`init`](Self::init) resets the API to desktop GL, so call this
    /// afterwards, the way GLUT programs order their init calls anyway.
    pub fn init_api_mask(&mut self, mask: u32) -> Result<()> {
        self.context_api = ContextApi::from_mask(mask)?;
        Ok(())
    }

    /// Bootstrap: scan startup arguments, pin the platform and connect to
    /// the display system.
    ///
    /// `args` is the full argument vector, program name first. Recognized
    /// flags: `-display <name>` overrides the connection target; `-info` is
    /// accepted and ignored. The platform comes from the `PIGLIT_PLATFORM`
    /// environment variable, defaulting to GLX.
    pub fn init(&mut self, args: &[String]) -> Result<()> {
        let env = std::env::var(PLATFORM_ENV_VAR).ok();
        self.init_with_platform(args, env.as_deref())
    }

    pub(crate) fn init_with_platform(
        &mut self,
        args: &[String],
        env_override: Option<&str>,
    ) -> Result<()> {
        let mut display_name: Option<&str> = None;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-display" => display_name = iter.next().map(String::as_str),
                "-info" => info!("ignoring -info"),
                _ => {}
            }
        }

        self.context_api = ContextApi::OpenGl;
        self.platform = select_platform(env_override)?;
        debug!("platform: {:?}", self.platform);

        let display = self
            .driver
            .connect(self.platform, display_name)
            .map_err(|e| GlutError::resource("connect", e))?;
        self.display = Some(display);
        Ok(())
    }

    /// Set the display-mode bitmask used to negotiate the next window's
    /// config.
    pub fn init_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// Accepted for GLUT API compatibility; windows are never positioned.
    pub fn init_window_position(&mut self, _x: i32, _y: i32) {}

    /// Set the requested dimensions for the next window.
    pub fn init_window_size(&mut self, width: i32, height: i32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Create the window and make its context current. Returns the new
    /// window id; ids increase strictly and are never reused.
    ///
    /// `title` is accepted for API compatibility; the underlying library
    /// has no use for it.
    ///
    /// Fails with [`GlutError::InvariantViolation`] if a window already
    /// exists or no display connection has been made, and with
    /// [`GlutError::ResourceCreation`] when the driver refuses any step of
    /// config negotiation, context creation or window creation.
    pub fn create_window(&mut self, title: &str) -> Result<u32> {
        if self.window.is_some() {
            return Err(GlutError::InvariantViolation(
                "cannot create window; one already exists".into(),
            ));
        }
        let display = self.display.ok_or_else(|| {
            GlutError::InvariantViolation("no display connection; init was never run".into())
        })?;

        let attribs = build_config_attribs(self.context_api, self.display_mode);
        let config = self
            .driver
            .choose_config(display, &attribs)
            .map_err(|e| GlutError::resource("choose_config", e))?;
        let context = self
            .driver
            .create_context(config)
            .map_err(|e| GlutError::resource("create_context", e))?;
        let backing = self
            .driver
            .create_window(config, self.window_width, self.window_height)
            .map_err(|e| GlutError::resource("create_window", e))?;

        let native = match self.platform {
            Platform::Glx | Platform::X11Egl => {
                let info = self
                    .driver
                    .native_window(backing)
                    .map_err(|e| GlutError::resource("native_window", e))?;
                let NativeWindowInfo::X11 { display, window } = info else {
                    return Err(GlutError::ResourceCreation {
                        call: "native_window",
                        detail: "driver exposed no X11 resources".into(),
                    });
                };
                match self.platform {
                    Platform::Glx => NativeHandle::Glx { display, window },
                    _ => NativeHandle::X11Egl { display, window },
                }
            }
            Platform::Wayland => {
                warn!("input is not yet implemented for Wayland");
                NativeHandle::None
            }
        };

        self.driver
            .make_current(display, backing, context)
            .map_err(|e| GlutError::resource("make_current", e))?;
        self.context = Some(context);

        self.window_id_pool += 1;
        let window = Window::new(self.window_id_pool, backing, native);
        let id = window.id();
        self.window = Some(window);
        info!("created window {id} ({title:?})");
        Ok(id)
    }

    /// Destroy the window. `id` must match the live window.
    pub fn destroy_window(&mut self, id: u32) -> Result<()> {
        let backing = self.current_window(id)?.backing;
        self.driver
            .destroy_window(backing)
            .map_err(|e| GlutError::resource("destroy_window", e))?;
        self.window = None;
        Ok(())
    }

    /// Ask the windowing system to map the window. `id` must match the
    /// live window.
    pub fn show_window(&mut self, id: u32) -> Result<()> {
        let backing = self.current_window(id)?.backing;
        self.driver
            .show_window(backing)
            .map_err(|e| GlutError::resource("show_window", e))
    }

    /// Install the redraw handler on the live window, replacing any prior
    /// one.
    pub fn display_func(&mut self, cb: &'cb dyn DisplayHandler) -> Result<()> {
        self.live_window_mut()?.display_cb = Some(cb);
        Ok(())
    }

    /// Install the resize handler on the live window, replacing any prior
    /// one.
    pub fn reshape_func(&mut self, cb: &'cb dyn ReshapeHandler) -> Result<()> {
        self.live_window_mut()?.reshape_cb = Some(cb);
        Ok(())
    }

    /// Install the keyboard handler on the live window, replacing the
    /// default ESC handler or any prior registration.
    pub fn keyboard_func(&mut self, cb: &'cb dyn KeyboardHandler) -> Result<()> {
        self.live_window_mut()?.keyboard_cb = cb;
        Ok(())
    }

    /// Mark the window as wanting a redraw. Nothing consumes the flag; it
    /// exists for API compatibility and is observable through
    /// [`redisplay_pending`](Self::redisplay_pending).
    pub fn post_redisplay(&mut self) -> Result<()> {
        self.live_window_mut()?.redisplay = true;
        Ok(())
    }

    /// Whether [`post_redisplay`](Self::post_redisplay) has been called on
    /// the live window.
    pub fn redisplay_pending(&self) -> bool {
        self.window.as_ref().is_some_and(|w| w.redisplay)
    }

    /// Swap front and back buffers on the live window.
    pub fn swap_buffers(&mut self) -> Result<()> {
        let backing = self.live_window_mut()?.backing;
        self.driver
            .swap_buffers(backing)
            .map_err(|e| GlutError::resource("swap_buffers", e))
    }

    /// Show the window, fire the initial reshape/display pair, then run the
    /// platform's dispatch strategy.
    ///
    /// On GLX and X11+EGL this blocks on the native event pump and
    /// dispatches expose/configure/key events to the registered handlers
    /// until a keyboard handler returns [`LoopControl::Exit`]; the default
    /// handler does so on ESC. On Wayland there is no event dispatch: the
    /// display callback fires once more and the loop waits out a fixed
    /// stand-in period.
    pub fn main_loop(&mut self) -> Result<()> {
        let backing = match self.window.as_ref() {
            Some(window) => window.backing,
            None => {
                return Err(GlutError::InvariantViolation(
                    "no window is created".into(),
                ))
            }
        };

        self.driver
            .show_window(backing)
            .map_err(|e| GlutError::resource("show_window", e))?;

        if let Some(reshape) = self.window.as_ref().and_then(|w| w.reshape_cb) {
            reshape.reshape(self.window_width, self.window_height);
        }
        self.fire_display()?;

        match self.platform {
            Platform::Glx | Platform::X11Egl => self.pump_loop(backing),
            Platform::Wayland => {
                // The first swap happened in the display callback above,
                // before the surface has seen an expose-equivalent event,
                // and that frame never appears. Fire display once more as a
                // workaround until this backend grows real event handling.
                self.fire_display()?;
                std::thread::sleep(self.wayland_standin_wait);
                Ok(())
            }
        }
    }

    /// The active platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The live window's GL context handle, for embeddings that issue GL
    /// calls through their own binding.
    pub fn context(&self) -> Option<ContextHandle> {
        self.context
    }

    /// The live window, if one exists.
    pub fn window(&self) -> Option<&Window<'cb>> {
        self.window.as_ref()
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the underlying driver, for embeddings that need to
    /// feed it (the headless driver's event queue, for instance).
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    #[cfg(test)]
    pub(crate) fn set_wayland_standin_wait(&mut self, wait: Duration) {
        self.wayland_standin_wait = wait;
    }

    fn pump_loop(&mut self, backing: WindowHandle) -> Result<()> {
        loop {
            let event = self
                .driver
                .next_event(backing)
                .map_err(|e| GlutError::resource("next_event", e))?;
            trace!("event: {event:?}");
            match event {
                PumpEvent::Expose => self.fire_display()?,
                PumpEvent::Configure { width, height } => {
                    if let Some(reshape) = self.window.as_ref().and_then(|w| w.reshape_cb) {
                        reshape.reshape(width, height);
                    }
                }
                PumpEvent::Key { key, x, y } => {
                    if let Some(keyboard) = self.window.as_ref().map(|w| w.keyboard_cb) {
                        if keyboard.keyboard(key, x, y) == LoopControl::Exit {
                            debug!("keyboard handler requested exit");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    fn fire_display(&mut self) -> Result<()> {
        let (display_cb, backing) = match self.window.as_ref() {
            Some(window) => (window.display_cb, window.backing),
            None => return Ok(()),
        };
        let Some(display_cb) = display_cb else {
            return Ok(());
        };
        let mut frame = Frame::new(&mut self.driver, backing);
        display_cb.display(&mut frame)
    }

    fn current_window(&self, id: u32) -> Result<&Window<'cb>> {
        match &self.window {
            Some(window) if window.id == id => Ok(window),
            _ => Err(GlutError::InvariantViolation(format!("bad window id {id}"))),
        }
    }

    fn live_window_mut(&mut self) -> Result<&mut Window<'cb>> {
        self.window
            .as_mut()
            .ok_or_else(|| GlutError::InvariantViolation("no window is created".into()))
    }
}
