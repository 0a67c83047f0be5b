//! Frame button capabilities
//!
//! Translates a declarative [`CapabilitySet`] into style-bit and system
//! menu mutations on the native frame. Minimize and maximize are style
//! bits; close lives in the system menu; hiding everything clears the
//! system menu style bit so the title-bar icon and menu disappear too.

use crate::platform::{Platform, WindowStyle, SC_CLOSE};
use crate::utils::error::ChromeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A frame button the user can act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Minimize,
    Maximize,
    Close,
}

/// Which frame buttons are enabled
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilitySet {
    /// Hide the system menu and every button with it
    None,

    /// Show the system menu with every button enabled
    #[default]
    All,

    /// Show the system menu; buttons outside the set are disabled
    Subset(BTreeSet<Capability>),
}

impl CapabilitySet {
    /// Build a subset from any collection of capabilities
    pub fn subset<I: IntoIterator<Item = Capability>>(capabilities: I) -> Self {
        CapabilitySet::Subset(capabilities.into_iter().collect())
    }

    /// Whether `capability` ends up enabled under this set
    pub fn enables(&self, capability: Capability) -> bool {
        match self {
            CapabilitySet::None => false,
            CapabilitySet::All => true,
            CapabilitySet::Subset(set) => set.contains(&capability),
        }
    }
}

impl std::str::FromStr for CapabilitySet {
    type Err = ChromeError;

    /// Parse `none`, `all` or a comma separated list such as `min,close`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CapabilitySet::None),
            "all" => Ok(CapabilitySet::All),
            list => list
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| match part {
                    "min" | "minimize" => Ok(Capability::Minimize),
                    "max" | "maximize" => Ok(Capability::Maximize),
                    "close" => Ok(Capability::Close),
                    other => Err(ChromeError::InvalidInput(format!(
                        "Unknown frame button '{}'",
                        other
                    ))),
                })
                .collect::<Result<BTreeSet<_>, _>>()
                .map(CapabilitySet::Subset),
        }
    }
}

/// Apply `set` to the native frame, replacing whatever was there.
///
/// Idempotent. Every individual mutation is followed by a frame redraw.
pub fn apply<P: Platform + ?Sized>(platform: &P, set: &CapabilitySet) {
    log::debug!("Applying frame buttons {:?} to {:?}", set, platform.handle());

    if let CapabilitySet::None = set {
        hide_system_menu(platform);
        return;
    }

    set_style_bit(platform, WindowStyle::MINIMIZE_BOX, set.enables(Capability::Minimize));
    set_style_bit(platform, WindowStyle::MAXIMIZE_BOX, set.enables(Capability::Maximize));

    if set.enables(Capability::Close) {
        enable_close(platform);
    } else {
        disable_close(platform);
    }

    show_system_menu(platform);
}

fn set_style_bit<P: Platform + ?Sized>(platform: &P, bit: WindowStyle, enabled: bool) {
    let style = platform.style();
    let style = if enabled { style.with(bit) } else { style.without(bit) };
    platform.set_style(style);
    platform.redraw_frame();
}

fn enable_close<P: Platform + ?Sized>(platform: &P) {
    // Reverting restores the default entries, close included.
    let _ = platform.system_menu(true);
    platform.redraw_frame();
}

fn disable_close<P: Platform + ?Sized>(platform: &P) {
    if let Some(menu) = platform.system_menu(false) {
        platform.remove_menu_entry(menu, SC_CLOSE);
    }
    platform.redraw_frame();
}

fn hide_system_menu<P: Platform + ?Sized>(platform: &P) {
    set_style_bit(platform, WindowStyle::SYSTEM_MENU, false);
}

fn show_system_menu<P: Platform + ?Sized>(platform: &P) {
    set_style_bit(platform, WindowStyle::SYSTEM_MENU, true);
}
