//! Window chrome controller for flexframe
//!
//! This module ties the pieces together: [`WindowChrome`] owns one native
//! window through a [`Platform`], keeps the absolute geometry it assigns to
//! the host shell, locks the aspect ratio during live resizes and applies
//! the declarative frame button set.

use crate::platform::{self, NativeHandle, Platform};
use crate::utils::config::ChromeConfig;
use crate::utils::error::{ChromeError, Result};
use log::debug;

pub mod buttons;
pub mod events;
pub mod resize;
pub mod sizing;
pub mod winit_window;

pub use buttons::{Capability, CapabilitySet};
pub use events::{Observable, SubscriptionId};
pub use resize::{AspectRatio, AspectRatioGuard, FrameSize, ProposedFrame, ResizeEdge};
pub use sizing::{Dimensions, Geometry, RelativeSize, SizeSlot};
pub use winit_window::WinitShell;

/// Host framework side of the window geometry.
///
/// The controller hands over only the slots a change touched, so a new
/// minimum or maximum never re-requests the nominal size. Sizes are outer
/// frame sizes in physical pixels.
#[cfg_attr(test, mockall::automock)]
pub trait WindowShell {
    /// Apply the dimensions of one size slot
    fn apply_size(&mut self, slot: SizeSlot, size: &Dimensions);
}

/// Native chrome controller for one window
pub struct WindowChrome<P: Platform, S: WindowShell> {
    /// Resize hook, present exactly while a ratio is locked
    hook: Option<P::Hook>,

    /// Native window
    platform: P,

    /// Host framework geometry sink
    shell: S,

    /// Absolute sizes assigned so far
    geometry: Geometry,

    /// Frame size read back after the last push
    observed_frame: Option<FrameSize>,

    /// Locked aspect ratio, `None` when unconstrained
    aspect_ratio: Observable<Option<AspectRatio>>,

    /// Nominal size relative to the monitor
    relative_size: Observable<RelativeSize>,

    /// Minimum size relative to the monitor
    relative_min_size: Observable<RelativeSize>,

    /// Maximum size relative to the monitor
    relative_max_size: Observable<RelativeSize>,

    /// Enabled frame buttons
    enabled_buttons: Observable<CapabilitySet>,
}

impl<P: Platform, S: WindowShell> WindowChrome<P, S> {
    /// Attach a controller to a realized window.
    ///
    /// Applies the configured frame buttons, resolves the relative sizes
    /// against the nearest monitor and locks the aspect ratio if one is set.
    pub fn attach(platform: P, shell: S, config: &ChromeConfig) -> Result<Self> {
        if !platform.is_alive() {
            return Err(ChromeError::WindowDestroyed);
        }

        let aspect_ratio = config.parsed_aspect_ratio()?;
        let mut chrome = Self {
            hook: None,
            geometry: Geometry {
                size: Dimensions {
                    width: config.width,
                    height: config.height,
                },
                ..Geometry::default()
            },
            observed_frame: None,
            aspect_ratio: Observable::new(aspect_ratio).with_validator(validate_aspect_ratio),
            relative_size: Observable::new(RelativeSize::from_option(config.relative_size)?),
            relative_min_size: Observable::new(RelativeSize::from_option(config.relative_min_size)?),
            relative_max_size: Observable::new(RelativeSize::from_option(config.relative_max_size)?),
            enabled_buttons: Observable::new(config.enabled_buttons.clone()),
            platform,
            shell,
        };

        debug!("Attaching window chrome to {:?}", chrome.platform.handle());

        buttons::apply(&chrome.platform, chrome.enabled_buttons.get());

        for slot in SizeSlot::ALL {
            chrome.resolve_relative(slot);
        }

        if aspect_ratio.is_some() {
            chrome.apply_aspect_ratio()?;
        } else {
            chrome.push(&SizeSlot::ALL);
        }

        Ok(chrome)
    }

    /// Lock the window to `ratio`, or unlock it with `None`
    pub fn set_aspect_ratio(&mut self, ratio: Option<AspectRatio>) -> Result<()> {
        self.ensure_alive()?;
        if self.aspect_ratio.set(ratio)?.is_some() {
            self.adopt_user_resize();
            self.apply_aspect_ratio()?;
        }
        Ok(())
    }

    /// Set the nominal size as a fraction of the monitor, `None` to unset
    pub fn set_relative_size(&mut self, fraction: Option<f64>) -> Result<()> {
        self.set_relative(SizeSlot::Nominal, fraction)
    }

    /// Set the minimum size as a fraction of the monitor, `None` to unset
    pub fn set_relative_min_size(&mut self, fraction: Option<f64>) -> Result<()> {
        self.set_relative(SizeSlot::Minimum, fraction)
    }

    /// Set the maximum size as a fraction of the monitor, `None` to unset
    pub fn set_relative_max_size(&mut self, fraction: Option<f64>) -> Result<()> {
        self.set_relative(SizeSlot::Maximum, fraction)
    }

    /// Replace the enabled frame buttons
    pub fn set_enabled_buttons(&mut self, set: CapabilitySet) -> Result<()> {
        self.ensure_alive()?;
        if self.enabled_buttons.set(set)?.is_some() {
            buttons::apply(&self.platform, self.enabled_buttons.get());
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        *self.aspect_ratio.get()
    }

    pub fn relative_size(&self) -> RelativeSize {
        *self.relative_size.get()
    }

    pub fn relative_min_size(&self) -> RelativeSize {
        *self.relative_min_size.get()
    }

    pub fn relative_max_size(&self) -> RelativeSize {
        *self.relative_max_size.get()
    }

    pub fn enabled_buttons(&self) -> &CapabilitySet {
        self.enabled_buttons.get()
    }

    /// Absolute sizes assigned to the shell
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Whether resize notifications are being corrected
    pub fn is_locked(&self) -> bool {
        self.hook.is_some()
    }

    pub fn handle(&self) -> NativeHandle {
        self.platform.handle()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Listen for aspect ratio changes
    pub fn on_aspect_ratio_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&Option<AspectRatio>, &Option<AspectRatio>) + 'static,
    {
        self.aspect_ratio.subscribe(handler)
    }

    /// Listen for nominal relative size changes
    pub fn on_relative_size_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&RelativeSize, &RelativeSize) + 'static,
    {
        self.relative_size.subscribe(handler)
    }

    /// Listen for minimum relative size changes
    pub fn on_relative_min_size_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&RelativeSize, &RelativeSize) + 'static,
    {
        self.relative_min_size.subscribe(handler)
    }

    /// Listen for maximum relative size changes
    pub fn on_relative_max_size_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&RelativeSize, &RelativeSize) + 'static,
    {
        self.relative_max_size.subscribe(handler)
    }

    /// Listen for frame button changes
    pub fn on_enabled_buttons_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&CapabilitySet, &CapabilitySet) + 'static,
    {
        self.enabled_buttons.subscribe(handler)
    }

    fn ensure_alive(&mut self) -> Result<()> {
        if self.platform.is_alive() {
            Ok(())
        } else {
            self.hook = None;
            Err(ChromeError::WindowDestroyed)
        }
    }

    fn set_relative(&mut self, slot: SizeSlot, fraction: Option<f64>) -> Result<()> {
        self.ensure_alive()?;
        let relative = RelativeSize::from_option(fraction)?;

        let changed = match slot {
            SizeSlot::Nominal => self.relative_size.set(relative)?,
            SizeSlot::Minimum => self.relative_min_size.set(relative)?,
            SizeSlot::Maximum => self.relative_max_size.set(relative)?,
        };

        if changed.is_some() {
            self.adopt_user_resize();
            if self.resolve_relative(slot) {
                self.push(&[slot]);
            }
        }
        Ok(())
    }

    /// Ratio the hook is enforcing, if locked
    fn locked_ratio(&self) -> Option<AspectRatio> {
        self.hook.as_ref().and(*self.aspect_ratio.get())
    }

    /// Resolve one relative size into its slot. Returns whether the slot changed.
    fn resolve_relative(&mut self, slot: SizeSlot) -> bool {
        let relative = match slot {
            SizeSlot::Nominal => *self.relative_size.get(),
            SizeSlot::Minimum => *self.relative_min_size.get(),
            SizeSlot::Maximum => *self.relative_max_size.get(),
        };
        if relative.is_unset() {
            return false;
        }

        let Some(monitor) = platform::monitor_bounds(&self.platform) else {
            return false;
        };
        let Some(mut dimensions) = sizing::resolve_dimensions(relative, &monitor) else {
            return false;
        };

        if let Some(ratio) = self.locked_ratio() {
            dimensions.fit_height(&ratio);
        }

        *self.geometry.slot_mut(slot) = dimensions;
        true
    }

    /// Enter or leave the locked state for the current ratio
    fn apply_aspect_ratio(&mut self) -> Result<()> {
        // The previous subscription must be gone before a new one is made.
        if self.hook.take().is_some() {
            debug!("Removed resize hook from {:?}", self.platform.handle());
        }

        match *self.aspect_ratio.get() {
            Some(ratio) if ratio.is_constraining() => {
                self.hook = Some(self.platform.install_resize_hook(AspectRatioGuard::new(ratio))?);
                debug!("Locked {:?} to aspect ratio {}", self.platform.handle(), ratio);

                let size = &mut self.geometry.size;
                if size.width.is_none() && size.height.is_none() {
                    size.width = self.platform.frame_size().map(|frame| frame.width as f64);
                }
                self.geometry.fit_to_ratio(&ratio);
                self.push(&SizeSlot::ALL);
            }
            _ => {
                let resolved: Vec<SizeSlot> = SizeSlot::ALL
                    .into_iter()
                    .filter(|slot| self.resolve_relative(*slot))
                    .collect();
                self.push(&resolved);
            }
        }

        Ok(())
    }

    /// Take over a frame size the user left the window at.
    ///
    /// Any difference between the current frame and the one read back after
    /// the last push comes from outside the controller, usually a drag.
    fn adopt_user_resize(&mut self) {
        let Some(frame) = self.platform.frame_size() else {
            return;
        };
        if self.observed_frame.is_some_and(|seen| seen != frame) {
            debug!(
                "Adopting {}x{} from {:?}",
                frame.width,
                frame.height,
                self.platform.handle()
            );
            self.geometry.size = Dimensions::new(frame.width as f64, frame.height as f64);
            self.observed_frame = Some(frame);
        }
    }

    fn push(&mut self, slots: &[SizeSlot]) {
        for &slot in slots {
            let size = self.geometry.slot(slot);
            debug!("Applying {:?} size {:?}", slot, size);
            self.shell.apply_size(slot, size);
        }
        self.observed_frame = self.platform.frame_size();
    }
}

fn validate_aspect_ratio(ratio: &Option<AspectRatio>) -> Result<()> {
    match ratio {
        Some(ratio) => AspectRatio::new(ratio.width, ratio.height).map(|_| ()),
        None => Ok(()),
    }
}
