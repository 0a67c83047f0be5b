//! Integration tests for frame button capabilities
//!
//! These tests verify:
//! - Hiding everything suppresses the system menu only
//! - Subsets toggle individual buttons
//! - Re-applying a set leaves the native state unchanged

use anyhow::Result;
use flexframe::platform::WindowStyle;
use flexframe::utils::config::{ChromeConfig, Config};
use flexframe::window::{buttons, Capability, CapabilitySet};
use flexframe_integration_tests::TestFixture;
use std::collections::BTreeSet;

#[test]
fn test_none_hides_system_menu() -> Result<()> {
    let fixture = TestFixture::new();
    let mut chrome = fixture.attach(&ChromeConfig::default())?;
    let redraws = fixture.platform.snapshot().redraws;

    chrome.set_enabled_buttons(CapabilitySet::None)?;

    let state = fixture.platform.snapshot();
    assert!(!state.style.contains(WindowStyle::SYSTEM_MENU));
    // Individual buttons are untouched
    assert!(state.style.contains(WindowStyle::MINIMIZE_BOX));
    assert!(state.style.contains(WindowStyle::MAXIMIZE_BOX));
    assert!(state.close_in_menu);
    assert_eq!(state.redraws, redraws + 1);

    Ok(())
}

#[test]
fn test_none_differs_from_empty_subset() -> Result<()> {
    let hidden = TestFixture::new();
    hidden.attach(&ChromeConfig {
        enabled_buttons: CapabilitySet::None,
        ..ChromeConfig::default()
    })?;

    let disabled = TestFixture::new();
    disabled.attach(&ChromeConfig {
        enabled_buttons: CapabilitySet::Subset(BTreeSet::new()),
        ..ChromeConfig::default()
    })?;

    let hidden = hidden.platform.snapshot();
    let disabled = disabled.platform.snapshot();

    assert!(!hidden.style.contains(WindowStyle::SYSTEM_MENU));
    assert!(disabled.style.contains(WindowStyle::SYSTEM_MENU));
    assert!(!disabled.style.contains(WindowStyle::MINIMIZE_BOX));
    assert!(!disabled.style.contains(WindowStyle::MAXIMIZE_BOX));
    assert!(!disabled.close_in_menu);
    assert_ne!(hidden.style, disabled.style);

    Ok(())
}

#[test]
fn test_minimize_only() -> Result<()> {
    let fixture = TestFixture::new();
    let mut chrome = fixture.attach(&ChromeConfig::default())?;

    chrome.set_enabled_buttons(CapabilitySet::subset([Capability::Minimize]))?;

    let state = fixture.platform.snapshot();
    assert!(state.style.contains(WindowStyle::MINIMIZE_BOX));
    assert!(!state.style.contains(WindowStyle::MAXIMIZE_BOX));
    assert!(!state.close_in_menu);
    assert!(state.style.contains(WindowStyle::SYSTEM_MENU));

    Ok(())
}

#[test]
fn test_apply_is_idempotent() {
    let sets = [
        CapabilitySet::None,
        CapabilitySet::All,
        CapabilitySet::subset([Capability::Maximize, Capability::Close]),
        CapabilitySet::Subset(BTreeSet::new()),
    ];

    for set in sets {
        let fixture = TestFixture::new();
        buttons::apply(&fixture.platform, &set);
        let first = fixture.platform.snapshot();
        buttons::apply(&fixture.platform, &set);
        let second = fixture.platform.snapshot();

        assert_eq!(first.style, second.style, "style differs for {:?}", set);
        assert_eq!(first.close_in_menu, second.close_in_menu, "menu differs for {:?}", set);
    }
}

#[test]
fn test_all_restores_everything() -> Result<()> {
    let fixture = TestFixture::new();
    let mut chrome = fixture.attach(&ChromeConfig {
        enabled_buttons: CapabilitySet::Subset(BTreeSet::new()),
        ..ChromeConfig::default()
    })?;

    chrome.set_enabled_buttons(CapabilitySet::None)?;
    chrome.set_enabled_buttons(CapabilitySet::All)?;

    let state = fixture.platform.snapshot();
    assert!(state.style.contains(WindowStyle::MINIMIZE_BOX));
    assert!(state.style.contains(WindowStyle::MAXIMIZE_BOX));
    assert!(state.style.contains(WindowStyle::SYSTEM_MENU));
    assert!(state.close_in_menu);

    Ok(())
}

#[test]
fn test_buttons_from_config_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[chrome]\nenabled_buttons = { subset = [\"close\"] }\naspect_ratio = \"16:9\"\n",
    )?;

    let config = Config::load_from(&path)?;
    let fixture = TestFixture::new();
    let chrome = fixture.attach(&config.chrome)?;

    let state = fixture.platform.snapshot();
    assert!(chrome.is_locked());
    assert!(state.close_in_menu);
    assert!(!state.style.contains(WindowStyle::MINIMIZE_BOX));
    assert!(!state.style.contains(WindowStyle::MAXIMIZE_BOX));

    Ok(())
}
