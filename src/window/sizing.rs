//! Relative window sizing
//!
//! Nominal, minimum and maximum window sizes can be given as a fraction of
//! the nearest monitor's span. This module validates those fractions and
//! turns them into absolute pixel dimensions.

use crate::platform::MonitorBounds;
use crate::utils::error::{ChromeError, Result};
use crate::window::resize::AspectRatio;

/// A fraction of the monitor span in the open interval (0, 1), or unset
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelativeSize(Option<f64>);

impl RelativeSize {
    /// No relative size: the absolute size is left alone
    pub const UNSET: RelativeSize = RelativeSize(None);

    /// Create a relative size, rejecting anything outside (0, 1)
    pub fn new(fraction: f64) -> Result<Self> {
        if fraction > 0.0 && fraction < 1.0 {
            Ok(RelativeSize(Some(fraction)))
        } else {
            Err(ChromeError::InvalidRelativeSize(fraction))
        }
    }

    /// `None` maps to [`RelativeSize::UNSET`]
    pub fn from_option(fraction: Option<f64>) -> Result<Self> {
        fraction.map_or(Ok(Self::UNSET), Self::new)
    }

    pub fn fraction(&self) -> Option<f64> {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_none()
    }
}

/// Width and height of one size slot (nominal, minimum or maximum).
///
/// `None` means the controller has not assigned that dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Derive the height from the width under `ratio`, if the width is known
    pub fn fit_height(&mut self, ratio: &AspectRatio) {
        if let Some(width) = self.width {
            self.height = Some(width * ratio.height / ratio.width);
        }
    }

    /// Derive the width from the height under `ratio`, if the height is known
    pub fn fit_width(&mut self, ratio: &AspectRatio) {
        if let Some(height) = self.height {
            self.width = Some(height * ratio.width / ratio.height);
        }
    }
}

/// One of the three size slots of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeSlot {
    Nominal,
    Minimum,
    Maximum,
}

impl SizeSlot {
    pub const ALL: [SizeSlot; 3] = [SizeSlot::Nominal, SizeSlot::Minimum, SizeSlot::Maximum];
}

/// Absolute sizes assigned to the window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub size: Dimensions,
    pub min_size: Dimensions,
    pub max_size: Dimensions,
}

impl Geometry {
    pub fn slot(&self, slot: SizeSlot) -> &Dimensions {
        match slot {
            SizeSlot::Nominal => &self.size,
            SizeSlot::Minimum => &self.min_size,
            SizeSlot::Maximum => &self.max_size,
        }
    }

    pub fn slot_mut(&mut self, slot: SizeSlot) -> &mut Dimensions {
        match slot {
            SizeSlot::Nominal => &mut self.size,
            SizeSlot::Minimum => &mut self.min_size,
            SizeSlot::Maximum => &mut self.max_size,
        }
    }

    /// Bring all three slots in line with `ratio`.
    ///
    /// A known nominal width drives every height; otherwise a known nominal
    /// height drives every width.
    pub fn fit_to_ratio(&mut self, ratio: &AspectRatio) {
        if self.size.width.is_some() {
            self.min_size.fit_height(ratio);
            self.size.fit_height(ratio);
            self.max_size.fit_height(ratio);
        } else if self.size.height.is_some() {
            self.min_size.fit_width(ratio);
            self.size.fit_width(ratio);
            self.max_size.fit_width(ratio);
        }
    }
}

/// `fraction * span`, truncated to whole pixels
pub fn resolve(fraction: f64, span: i32) -> i32 {
    (fraction * span as f64) as i32
}

/// Resolve a relative size against a monitor.
///
/// Returns `None` for an unset size, meaning the previous absolute value
/// stays in place.
pub fn resolve_dimensions(relative: RelativeSize, monitor: &MonitorBounds) -> Option<Dimensions> {
    let fraction = relative.fraction()?;
    Some(Dimensions::new(
        resolve(fraction, monitor.width()) as f64,
        resolve(fraction, monitor.height()) as f64,
    ))
}
