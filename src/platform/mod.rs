//! Native platform boundary
//!
//! Everything the chrome controller needs from the operating system goes
//! through the [`Platform`] trait: monitor lookup, style bits, the system
//! menu, frame redraws and the resize hook. Implementations hold no chrome
//! state of their own; the controller owns it all.

#[cfg(any(test, feature = "fake-platform"))]
pub mod fake;
#[cfg(windows)]
pub mod win32;

use crate::utils::error::Result;
use crate::window::resize::{AspectRatioGuard, FrameSize};

#[cfg(windows)]
pub use win32::Win32Platform;

/// System menu command id of the close entry (`SC_CLOSE`)
pub const SC_CLOSE: u32 = 0xF060;

/// Opaque native window identifier (an `HWND` value on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub isize);

/// Opaque system menu identifier (an `HMENU` value on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuHandle(pub isize);

/// Bounding rectangle of a monitor in virtual-desktop coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl MonitorBounds {
    /// Create monitor bounds from its edges
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Horizontal span in pixels
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Vertical span in pixels
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Window style bitmask (`GWL_STYLE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowStyle(pub u32);

impl WindowStyle {
    /// `WS_MAXIMIZEBOX`
    pub const MAXIMIZE_BOX: WindowStyle = WindowStyle(0x0001_0000);
    /// `WS_MINIMIZEBOX`
    pub const MINIMIZE_BOX: WindowStyle = WindowStyle(0x0002_0000);
    /// `WS_SYSMENU`
    pub const SYSTEM_MENU: WindowStyle = WindowStyle(0x0008_0000);

    pub fn contains(self, bits: WindowStyle) -> bool {
        self.0 & bits.0 == bits.0
    }

    pub fn with(self, bits: WindowStyle) -> WindowStyle {
        WindowStyle(self.0 | bits.0)
    }

    pub fn without(self, bits: WindowStyle) -> WindowStyle {
        WindowStyle(self.0 & !bits.0)
    }
}

/// Narrow, stateless operations on one native window.
///
/// All calls happen on the thread that runs the window's message loop.
pub trait Platform {
    /// RAII registration of the resize hook. Dropping it unsubscribes.
    type Hook;

    /// The realized native handle of the window
    fn handle(&self) -> NativeHandle;

    /// Whether the native window still exists
    fn is_alive(&self) -> bool;

    /// Bounds of the monitor nearest the window, if the platform can tell
    fn nearest_monitor(&self) -> Option<MonitorBounds>;

    /// Current outer size of the window frame
    fn frame_size(&self) -> Option<FrameSize>;

    /// Read the style bitmask
    fn style(&self) -> WindowStyle;

    /// Replace the style bitmask
    fn set_style(&self, style: WindowStyle);

    /// Acquire the system menu. `reset` reverts it to the default entry set.
    fn system_menu(&self, reset: bool) -> Option<MenuHandle>;

    /// Remove a command entry from a system menu
    fn remove_menu_entry(&self, menu: MenuHandle, command: u32);

    /// Force a redraw of the non-client frame
    fn redraw_frame(&self);

    /// Subscribe `guard` to the window's resize notifications
    fn install_resize_hook(&self, guard: AspectRatioGuard) -> Result<Self::Hook>;
}

/// Look up the bounds of the monitor nearest the window.
///
/// An unavailable monitor is not an error: callers skip whatever
/// computation needed it and keep their prior state.
pub fn monitor_bounds<P: Platform + ?Sized>(platform: &P) -> Option<MonitorBounds> {
    let bounds = platform.nearest_monitor();
    if bounds.is_none() {
        log::warn!(
            "No monitor associated with window {:?}; keeping previous geometry",
            platform.handle()
        );
    }
    bounds
}
