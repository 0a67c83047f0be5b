//! Aspect-ratio locked resizing
//!
//! While a ratio is locked, the platform reports which edge or corner the
//! user grabbed and then proposes a candidate frame for every step of the
//! drag. [`AspectRatioGuard`] rewrites each candidate in place so that the
//! committed frame keeps the locked width:height ratio.

use crate::utils::error::{ChromeError, Result};
use std::fmt;
use std::str::FromStr;

/// A width:height ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    /// Create a ratio, rejecting negative or non-finite components
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ChromeError::InvalidAspectRatio { width, height });
        }
        Ok(Self { width, height })
    }

    /// A ratio with a zero component cannot constrain anything
    pub fn is_constraining(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Width matching `height` under this ratio, truncated to whole pixels
    pub fn width_for(&self, height: i32) -> i32 {
        (height as f64 * self.width / self.height) as i32
    }

    /// Height matching `width` under this ratio, truncated to whole pixels
    pub fn height_for(&self, width: i32) -> i32 {
        (width as f64 * self.height / self.width) as i32
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = ChromeError;

    /// Parse `"16:9"` style ratios
    fn from_str(s: &str) -> Result<Self> {
        let (width, height) = s
            .split_once(':')
            .ok_or_else(|| ChromeError::InvalidInput(format!("Aspect ratio '{}' is not W:H", s)))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| ChromeError::InvalidInput(format!("Aspect ratio '{}' is not W:H", s)))
        };

        AspectRatio::new(parse(width)?, parse(height)?)
    }
}

/// Edge or corner of the window being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeEdge {
    #[default]
    None,
    Left,
    Right,
    Top,
    TopLeft,
    TopRight,
    Bottom,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    /// Convert a native `WMSZ_*` code. Unknown codes map to `None`.
    pub fn from_native(code: u32) -> Self {
        match code {
            1 => ResizeEdge::Left,
            2 => ResizeEdge::Right,
            3 => ResizeEdge::Top,
            4 => ResizeEdge::TopLeft,
            5 => ResizeEdge::TopRight,
            6 => ResizeEdge::Bottom,
            7 => ResizeEdge::BottomLeft,
            8 => ResizeEdge::BottomRight,
            _ => ResizeEdge::None,
        }
    }
}

/// Candidate outer frame proposed by the platform during a live resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedFrame {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ProposedFrame {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The corner opposite the origin
    pub fn bottom_right(&self) -> (i32, i32) {
        (self.x + self.width, self.y + self.height)
    }

    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }
}

/// Outer size of a committed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: i32,
    pub height: i32,
}

impl FrameSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Resize-time corrector for one locked ratio.
///
/// A fresh guard is created each time a ratio is assigned, so the ratio is
/// fixed for the guard's lifetime.
#[derive(Debug, Clone)]
pub struct AspectRatioGuard {
    /// Locked ratio
    ratio: AspectRatio,

    /// Edge reported by the most recent tracking notification
    edge: ResizeEdge,
}

impl AspectRatioGuard {
    /// Create a guard for `ratio` with no edge recorded yet
    pub fn new(ratio: AspectRatio) -> Self {
        Self {
            ratio,
            edge: ResizeEdge::None,
        }
    }

    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    /// Edge currently recorded
    pub fn edge(&self) -> ResizeEdge {
        self.edge
    }

    /// Record the edge the user is dragging
    pub fn track_edge(&mut self, edge: ResizeEdge) {
        self.edge = edge;
    }

    /// Forget the edge once the resize gesture ends
    pub fn end_gesture(&mut self) {
        self.edge = ResizeEdge::None;
    }

    /// Rewrite `frame` in place so its size follows the locked ratio.
    ///
    /// `committed` is the size currently applied to the window. Returns
    /// whether the frame was modified.
    pub fn correct(&self, frame: &mut ProposedFrame, committed: FrameSize) -> bool {
        if !self.ratio.is_constraining() {
            return false;
        }

        // Pure moves keep their size and must not be touched.
        if frame.size() == committed {
            return false;
        }

        let before = *frame;

        match self.edge {
            ResizeEdge::Top | ResizeEdge::Bottom | ResizeEdge::TopRight => {
                frame.width = self.ratio.width_for(frame.height);
            }
            ResizeEdge::Left
            | ResizeEdge::Right
            | ResizeEdge::BottomRight
            | ResizeEdge::BottomLeft => {
                frame.height = self.ratio.height_for(frame.width);
            }
            ResizeEdge::TopLeft => {
                // Width first, so the height derivation sees the corrected width.
                let width = self.ratio.width_for(frame.height);
                frame.x -= width - frame.width;
                frame.width = width;

                let height = self.ratio.height_for(frame.width);
                frame.y -= height - frame.height;
                frame.height = height;
            }
            ResizeEdge::None => return false,
        }

        if *frame != before {
            log::trace!(
                "Corrected {:?} drag from {}x{} to {}x{} at ({}, {})",
                self.edge,
                before.width,
                before.height,
                frame.width,
                frame.height,
                frame.x,
                frame.y
            );
            true
        } else {
            false
        }
    }
}
