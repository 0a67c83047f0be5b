//! In-memory platform backend
//!
//! Models the pieces of native window state the chrome controller touches
//! (style bits, the close entry of the system menu, the frame rectangle and
//! the resize hook) so controller behaviour can be exercised without a
//! desktop session. Tests drive resize gestures through the same guard the
//! Win32 subclass procedure would call.

use crate::platform::{MenuHandle, MonitorBounds, NativeHandle, Platform, WindowStyle, SC_CLOSE};
use crate::utils::error::{ChromeError, Result};
use crate::window::resize::{AspectRatioGuard, FrameSize, ProposedFrame, ResizeEdge};
use std::cell::RefCell;
use std::rc::Rc;

/// Observable state of the fake window
#[derive(Debug, Clone)]
pub struct FakeState {
    /// Whether the window still exists
    pub alive: bool,

    /// Monitor reported by `nearest_monitor`
    pub monitor: Option<MonitorBounds>,

    /// Current outer frame
    pub frame: ProposedFrame,

    /// Style bitmask
    pub style: WindowStyle,

    /// Whether the system menu still holds the close entry
    pub close_in_menu: bool,

    /// Number of frame redraws requested
    pub redraws: usize,

    /// Guard of the installed resize hook, if any
    pub guard: Option<AspectRatioGuard>,

    /// Number of resize hooks installed so far
    pub hook_installs: usize,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            alive: true,
            monitor: Some(MonitorBounds::new(0, 0, 1920, 1080)),
            frame: ProposedFrame::new(100, 100, 800, 600),
            style: WindowStyle::MINIMIZE_BOX
                .with(WindowStyle::MAXIMIZE_BOX)
                .with(WindowStyle::SYSTEM_MENU),
            close_in_menu: true,
            redraws: 0,
            guard: None,
            hook_installs: 0,
        }
    }
}

/// Platform backed by shared in-memory state
#[derive(Debug, Clone, Default)]
pub struct FakePlatform {
    state: Rc<RefCell<FakeState>>,
}

/// Resize hook registration of the fake platform
#[derive(Debug)]
pub struct FakeHook {
    state: Rc<RefCell<FakeState>>,
}

impl Drop for FakeHook {
    fn drop(&mut self) {
        self.state.borrow_mut().guard = None;
    }
}

impl FakePlatform {
    /// A live 800x600 window on a 1920x1080 monitor
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FakeState {
        self.state.borrow().clone()
    }

    pub fn set_monitor(&self, monitor: Option<MonitorBounds>) {
        self.state.borrow_mut().monitor = monitor;
    }

    pub fn set_frame(&self, frame: ProposedFrame) {
        self.state.borrow_mut().frame = frame;
    }

    pub fn frame(&self) -> ProposedFrame {
        self.state.borrow().frame
    }

    /// Mark the window as destroyed
    pub fn destroy(&self) {
        self.state.borrow_mut().alive = false;
    }

    /// Whether a resize hook is currently subscribed
    pub fn hook_installed(&self) -> bool {
        self.state.borrow().guard.is_some()
    }

    /// Deliver a resize-tracking notification for `edge`
    pub fn deliver_sizing(&self, edge: ResizeEdge) {
        if let Some(guard) = self.state.borrow_mut().guard.as_mut() {
            guard.track_edge(edge);
        }
    }

    /// Deliver a proposed frame, let the hook correct it and commit the result
    pub fn deliver_frame(&self, proposed: ProposedFrame) -> ProposedFrame {
        let mut state = self.state.borrow_mut();
        let mut frame = proposed;
        let committed = state.frame.size();

        if let Some(guard) = state.guard.as_ref() {
            guard.correct(&mut frame, committed);
        }

        state.frame = frame;
        frame
    }

    /// Deliver the end of a resize gesture
    pub fn deliver_exit_size_move(&self) {
        if let Some(guard) = self.state.borrow_mut().guard.as_mut() {
            guard.end_gesture();
        }
    }
}

impl Platform for FakePlatform {
    type Hook = FakeHook;

    fn handle(&self) -> NativeHandle {
        NativeHandle(0x1000)
    }

    fn is_alive(&self) -> bool {
        self.state.borrow().alive
    }

    fn nearest_monitor(&self) -> Option<MonitorBounds> {
        self.state.borrow().monitor
    }

    fn frame_size(&self) -> Option<FrameSize> {
        Some(self.state.borrow().frame.size())
    }

    fn style(&self) -> WindowStyle {
        self.state.borrow().style
    }

    fn set_style(&self, style: WindowStyle) {
        self.state.borrow_mut().style = style;
    }

    fn system_menu(&self, reset: bool) -> Option<MenuHandle> {
        let mut state = self.state.borrow_mut();
        if reset {
            state.close_in_menu = true;
            None
        } else {
            Some(MenuHandle(0x2000))
        }
    }

    fn remove_menu_entry(&self, _menu: MenuHandle, command: u32) {
        if command == SC_CLOSE {
            self.state.borrow_mut().close_in_menu = false;
        }
    }

    fn redraw_frame(&self) {
        self.state.borrow_mut().redraws += 1;
    }

    fn install_resize_hook(&self, guard: AspectRatioGuard) -> Result<FakeHook> {
        let mut state = self.state.borrow_mut();
        if !state.alive {
            return Err(ChromeError::WindowDestroyed);
        }
        if state.guard.is_some() {
            return Err(ChromeError::Platform("resize hook already installed".to_string()));
        }

        state.guard = Some(guard);
        state.hook_installs += 1;

        Ok(FakeHook {
            state: Rc::clone(&self.state),
        })
    }
}
