//! Winit host shell for flexframe
//!
//! Applies the controller's size slots to a winit window. The controller
//! works in outer frame sizes while winit sizes the client area, so every
//! size is shifted by the current decoration span before it is handed over.

use crate::window::{Dimensions, SizeSlot, WindowShell};
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window as WinitWindow;

/// Width and height taken up by the frame around the client area
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Decoration {
    pub width: f64,
    pub height: f64,
}

impl Decoration {
    /// Decoration span between an outer and an inner size
    pub fn between(outer: PhysicalSize<u32>, inner: PhysicalSize<u32>) -> Self {
        Self {
            width: outer.width.saturating_sub(inner.width) as f64,
            height: outer.height.saturating_sub(inner.height) as f64,
        }
    }
}

/// Convert outer dimensions into a client-area size.
///
/// A missing component comes from `fallback`; `None` when neither
/// component is known.
pub fn inner_size(
    outer: &Dimensions,
    decoration: Decoration,
    fallback: PhysicalSize<u32>,
) -> Option<PhysicalSize<u32>> {
    if outer.width.is_none() && outer.height.is_none() {
        return None;
    }

    let client = |value: f64, span: f64| (value - span).trunc().max(1.0) as u32;
    Some(PhysicalSize::new(
        outer.width.map_or(fallback.width, |w| client(w, decoration.width)),
        outer.height.map_or(fallback.height, |h| client(h, decoration.height)),
    ))
}

/// [`WindowShell`] backed by a winit window
#[derive(Debug, Clone)]
pub struct WinitShell {
    window: Arc<WinitWindow>,
}

impl WinitShell {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { window }
    }

    /// The underlying winit window
    pub fn window(&self) -> &Arc<WinitWindow> {
        &self.window
    }

    fn decoration(&self) -> Decoration {
        Decoration::between(self.window.outer_size(), self.window.inner_size())
    }
}

impl WindowShell for WinitShell {
    fn apply_size(&mut self, slot: SizeSlot, size: &Dimensions) {
        let decoration = self.decoration();

        match slot {
            SizeSlot::Minimum => {
                if let Some(min) = inner_size(size, decoration, PhysicalSize::new(1, 1)) {
                    self.window.set_min_inner_size(Some(min));
                }
            }
            SizeSlot::Maximum => {
                let monitor = self.window.current_monitor().map(|monitor| monitor.size());
                if let Some(max) = monitor.and_then(|fallback| inner_size(size, decoration, fallback)) {
                    self.window.set_max_inner_size(Some(max));
                }
            }
            SizeSlot::Nominal => {
                let current = self.window.inner_size();
                if let Some(inner) = inner_size(size, decoration, current) {
                    if self.window.request_inner_size(inner).is_some() {
                        log::trace!("Window resized immediately to {:?}", inner);
                    }
                }
            }
        }
    }
}
