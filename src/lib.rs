//! flexframe: native window chrome for desktop windows
//!
//! Locks a window to an aspect ratio during interactive resizes, sizes it
//! relative to its monitor and declares which frame buttons it shows.
//! The native side is abstracted behind [`platform::Platform`]; the host
//! framework receives geometry through [`window::WindowShell`].

pub mod platform;
pub mod utils;
pub mod window;

pub use utils::error::{ChromeError, Result};
pub use window::{
    AspectRatio, Capability, CapabilitySet, Geometry, RelativeSize, SizeSlot, WindowChrome,
    WindowShell,
};
