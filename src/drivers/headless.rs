// src/drivers/headless.rs
//! Headless context-creation driver.
//!
//! Stands in for a real platform library: every operation succeeds against
//! in-memory state, calls are recorded, and the event pump serves a queue of
//! pushed events. This is what tests drive, and what an embedding can use
//! where no windowing system exists.

use std::collections::VecDeque;

use anyhow::{anyhow, bail, Result};
use log::{info, trace};

use crate::config::AttribList;
use crate::driver::{
    ConfigHandle, ContextDriver, ContextHandle, DisplayHandle, NativeWindowInfo, PumpEvent,
    WindowHandle,
};
use crate::platform::Platform;

/// In-memory driver with scripted events and recorded calls.
#[derive(Debug, Default)]
pub struct HeadlessDriver {
    next_handle: u64,
    connected: Option<Platform>,
    display_name: Option<String>,
    chosen_attribs: Vec<AttribList>,
    live_windows: Vec<WindowHandle>,
    shown: Vec<WindowHandle>,
    current: Option<(DisplayHandle, WindowHandle, ContextHandle)>,
    swap_count: u32,
    events: VecDeque<PumpEvent>,
    fail_call: Option<&'static str>,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the pump to deliver. Events come back in push
    /// order; an exhausted queue makes `next_event` fail, so scripts should
    /// end with something that exits the loop.
    pub fn push_event(&mut self, event: PumpEvent) {
        self.events.push_back(event);
    }

    /// Make the named driver call fail with a canned diagnostic.
    pub fn fail_on(&mut self, call: &'static str) {
        self.fail_call = Some(call);
    }

    /// The platform passed to `connect`, if it ran.
    pub fn connected_platform(&self) -> Option<Platform> {
        self.connected
    }

    /// The display name passed to `connect`, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Attribute lists passed to `choose_config`, oldest first.
    pub fn chosen_attribs(&self) -> &[AttribList] {
        &self.chosen_attribs
    }

    /// Windows shown so far, in order.
    pub fn shown(&self) -> &[WindowHandle] {
        &self.shown
    }

    /// The display/window/context triple from the last `make_current`.
    pub fn current(&self) -> Option<(DisplayHandle, WindowHandle, ContextHandle)> {
        self.current
    }

    /// How many times buffers were swapped.
    pub fn swap_count(&self) -> u32 {
        self.swap_count
    }

    fn issue(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    fn check_fail(&self, call: &'static str) -> Result<()> {
        if self.fail_call == Some(call) {
            bail!("headless driver: injected {call} failure");
        }
        Ok(())
    }

    fn check_live(&self, window: WindowHandle) -> Result<()> {
        if !self.live_windows.contains(&window) {
            bail!("headless driver: no such window {window:?}");
        }
        Ok(())
    }
}

impl ContextDriver for HeadlessDriver {
    fn connect(
        &mut self,
        platform: Platform,
        display_name: Option<&str>,
    ) -> Result<DisplayHandle> {
        self.check_fail("connect")?;
        info!("headless: connect to {platform:?} (display {display_name:?})");
        self.connected = Some(platform);
        self.display_name = display_name.map(str::to_owned);
        Ok(DisplayHandle(self.issue()))
    }

    fn choose_config(
        &mut self,
        _display: DisplayHandle,
        attribs: &AttribList,
    ) -> Result<ConfigHandle> {
        self.check_fail("choose_config")?;
        trace!("headless: choose_config {attribs:?}");
        self.chosen_attribs.push(attribs.clone());
        Ok(ConfigHandle(self.issue()))
    }

    fn create_context(&mut self, _config: ConfigHandle) -> Result<ContextHandle> {
        self.check_fail("create_context")?;
        Ok(ContextHandle(self.issue()))
    }

    fn create_window(
        &mut self,
        _config: ConfigHandle,
        width: i32,
        height: i32,
    ) -> Result<WindowHandle> {
        self.check_fail("create_window")?;
        info!("headless: create {width}x{height} window");
        let window = WindowHandle(self.issue());
        self.live_windows.push(window);
        Ok(window)
    }

    fn native_window(&mut self, window: WindowHandle) -> Result<NativeWindowInfo> {
        self.check_fail("native_window")?;
        self.check_live(window)?;
        match self.connected {
            Some(Platform::Glx) | Some(Platform::X11Egl) => Ok(NativeWindowInfo::X11 {
                // Fake but stable addresses derived from the handle.
                display: 0x1000 + window.0 as usize,
                window: window.0,
            }),
            _ => Ok(NativeWindowInfo::None),
        }
    }

    fn make_current(
        &mut self,
        display: DisplayHandle,
        window: WindowHandle,
        context: ContextHandle,
    ) -> Result<()> {
        self.check_fail("make_current")?;
        self.check_live(window)?;
        self.current = Some((display, window, context));
        Ok(())
    }

    fn show_window(&mut self, window: WindowHandle) -> Result<()> {
        self.check_fail("show_window")?;
        self.check_live(window)?;
        self.shown.push(window);
        Ok(())
    }

    fn swap_buffers(&mut self, window: WindowHandle) -> Result<()> {
        self.check_fail("swap_buffers")?;
        self.check_live(window)?;
        self.swap_count += 1;
        trace!("headless: swap_buffers ({})", self.swap_count);
        Ok(())
    }

    fn destroy_window(&mut self, window: WindowHandle) -> Result<()> {
        self.check_fail("destroy_window")?;
        self.check_live(window)?;
        self.live_windows.retain(|w| *w != window);
        Ok(())
    }

    fn next_event(&mut self, _window: WindowHandle) -> Result<PumpEvent> {
        self.check_fail("next_event")?;
        self.events
            .pop_front()
            .ok_or_else(|| anyhow!("headless driver: event queue exhausted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_come_back_in_push_order_then_the_queue_runs_dry() {
        let mut driver = HeadlessDriver::new();
        let display = driver.connect(Platform::Glx, None).unwrap();
        let config = driver
            .choose_config(display, &AttribList::default())
            .unwrap();
        let window = driver.create_window(config, 100, 100).unwrap();

        driver.push_event(PumpEvent::Expose);
        driver.push_event(PumpEvent::Key { key: 27, x: 0, y: 0 });

        assert_eq!(driver.next_event(window).unwrap(), PumpEvent::Expose);
        assert_eq!(
            driver.next_event(window).unwrap(),
            PumpEvent::Key { key: 27, x: 0, y: 0 }
        );
        assert!(driver.next_event(window).is_err());
    }

    #[test]
    fn injected_failures_surface_on_the_named_call_only() {
        let mut driver = HeadlessDriver::new();
        driver.fail_on("choose_config");

        let display = driver.connect(Platform::Glx, None).unwrap();
        let err = driver
            .choose_config(display, &AttribList::default())
            .unwrap_err();
        assert!(err.to_string().contains("choose_config"));
    }

    #[test]
    fn window_operations_require_a_live_window() {
        let mut driver = HeadlessDriver::new();
        assert!(driver.show_window(WindowHandle(42)).is_err());
        assert!(driver.swap_buffers(WindowHandle(42)).is_err());
        assert!(driver.destroy_window(WindowHandle(42)).is_err());
    }
}
