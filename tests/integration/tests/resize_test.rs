//! Integration tests for aspect ratio locking
//!
//! These tests verify:
//! - Edge drags are corrected to the locked ratio
//! - Corner drags keep the opposite corner anchored
//! - Locking and unlocking manage the resize hook
//! - Assigning a ratio resizes the window immediately

use anyhow::Result;
use flexframe::utils::config::ChromeConfig;
use flexframe::window::{AspectRatio, Dimensions, ProposedFrame, ResizeEdge, SizeSlot};
use flexframe_integration_tests::{drag, TestFixture};
use proptest::prelude::*;

fn locked(ratio: &str, frame: ProposedFrame) -> Result<(TestFixture, flexframe_integration_tests::TestChrome)> {
    let fixture = TestFixture::new();
    fixture.platform.set_frame(frame);
    let config = ChromeConfig {
        aspect_ratio: Some(ratio.to_string()),
        ..ChromeConfig::default()
    };
    let chrome = fixture.attach(&config)?;
    Ok((fixture, chrome))
}

#[test]
fn test_bottom_drag_follows_ratio() -> Result<()> {
    let (fixture, chrome) = locked("4:3", ProposedFrame::new(0, 0, 400, 300))?;
    assert!(chrome.is_locked());

    let start = fixture.platform.frame();
    let committed = drag::perform(&fixture.platform, ResizeEdge::Bottom, &[ProposedFrame::new(0, 0, 400, 600)]);

    assert_eq!(committed, vec![ProposedFrame::new(0, 0, 800, 600)]);
    assert_eq!(start.width, 400);

    Ok(())
}

#[test]
fn test_stepped_bottom_drag() -> Result<()> {
    let (fixture, _chrome) = locked("4:3", ProposedFrame::new(0, 0, 400, 300))?;

    let start = fixture.platform.frame();
    let proposals = drag::bottom_edge(start, 600, 4);
    let committed = drag::perform(&fixture.platform, ResizeEdge::Bottom, &proposals);

    let widths: Vec<i32> = committed.iter().map(|frame| frame.width).collect();
    assert_eq!(widths, vec![500, 600, 700, 800]);
    assert_eq!(fixture.platform.frame(), ProposedFrame::new(0, 0, 800, 600));

    Ok(())
}

#[test]
fn test_top_left_drag_anchors_bottom_right() -> Result<()> {
    let (fixture, _chrome) = locked("16:9", ProposedFrame::new(100, 100, 1600, 900))?;

    let start = fixture.platform.frame();
    let proposal = drag::top_left_corner(start, 200, 0);
    assert_eq!(proposal, ProposedFrame::new(300, 100, 1400, 900));

    let committed = drag::perform(&fixture.platform, ResizeEdge::TopLeft, &[proposal]);

    assert_eq!(committed[0], ProposedFrame::new(100, 100, 1600, 900));
    assert_eq!(committed[0].bottom_right(), proposal.bottom_right());

    Ok(())
}

#[test]
fn test_moves_are_not_corrected() -> Result<()> {
    let (fixture, _chrome) = locked("16:9", ProposedFrame::new(0, 0, 1600, 900))?;

    let committed = drag::perform(&fixture.platform, ResizeEdge::Right, &[ProposedFrame::new(250, 75, 1600, 900)]);

    assert_eq!(committed, vec![ProposedFrame::new(250, 75, 1600, 900)]);
    Ok(())
}

#[test]
fn test_gesture_end_forgets_edge() -> Result<()> {
    let (fixture, _chrome) = locked("4:3", ProposedFrame::new(0, 0, 400, 300))?;
    drag::perform(&fixture.platform, ResizeEdge::Bottom, &[ProposedFrame::new(0, 0, 400, 600)]);

    // A programmatic resize outside any gesture passes through
    let committed = fixture.platform.deliver_frame(ProposedFrame::new(0, 0, 1000, 100));
    assert_eq!(committed, ProposedFrame::new(0, 0, 1000, 100));

    Ok(())
}

#[test]
fn test_unlocked_window_has_no_hook() -> Result<()> {
    let fixture = TestFixture::new();
    let config = ChromeConfig {
        width: Some(1600.0),
        ..ChromeConfig::default()
    };
    let mut chrome = fixture.attach(&config)?;

    assert!(!fixture.platform.hook_installed());
    let committed = drag::perform(&fixture.platform, ResizeEdge::Bottom, &[ProposedFrame::new(100, 100, 800, 1000)]);
    assert_eq!(committed, vec![ProposedFrame::new(100, 100, 800, 1000)]);

    // Assigning a ratio recomputes the height without any drag
    chrome.set_aspect_ratio(Some(AspectRatio::new(16.0, 9.0)?))?;
    assert!(fixture.platform.hook_installed());
    assert_eq!(chrome.geometry().size, Dimensions::new(1600.0, 900.0));
    assert_eq!(fixture.shell.last(SizeSlot::Nominal), Some(Dimensions::new(1600.0, 900.0)));

    Ok(())
}

#[test]
fn test_unlock_stops_correction() -> Result<()> {
    let (fixture, mut chrome) = locked("4:3", ProposedFrame::new(0, 0, 400, 300))?;

    chrome.set_aspect_ratio(None)?;
    assert!(!fixture.platform.hook_installed());

    let committed = drag::perform(&fixture.platform, ResizeEdge::Bottom, &[ProposedFrame::new(0, 0, 400, 600)]);
    assert_eq!(committed, vec![ProposedFrame::new(0, 0, 400, 600)]);

    Ok(())
}

#[test]
fn test_relative_size_then_lock() -> Result<()> {
    let fixture = TestFixture::with_monitor(2560, 1440);
    let config = ChromeConfig {
        relative_size: Some(0.5),
        relative_min_size: Some(0.25),
        ..ChromeConfig::default()
    };
    let mut chrome = fixture.attach(&config)?;
    assert_eq!(chrome.geometry().size, Dimensions::new(1280.0, 720.0));

    chrome.set_aspect_ratio(Some(AspectRatio::new(4.0, 3.0)?))?;

    let geometry = chrome.geometry();
    assert_eq!(geometry.size, Dimensions::new(1280.0, 960.0));
    assert_eq!(geometry.min_size, Dimensions::new(640.0, 480.0));

    Ok(())
}

#[test]
fn test_drag_then_min_size_then_relock() -> Result<()> {
    let fixture = TestFixture::new();
    fixture.platform.set_frame(ProposedFrame::new(0, 0, 1600, 900));
    let config = ChromeConfig {
        width: Some(1600.0),
        aspect_ratio: Some("16:9".to_string()),
        ..ChromeConfig::default()
    };
    let mut chrome = fixture.attach(&config)?;
    let nominal_pushes = fixture.shell.count(SizeSlot::Nominal);

    let committed = drag::perform(&fixture.platform, ResizeEdge::Right, &[ProposedFrame::new(0, 0, 800, 900)]);
    assert_eq!(committed, vec![ProposedFrame::new(0, 0, 800, 450)]);

    // A new minimum keeps the dragged size in place
    chrome.set_relative_min_size(Some(0.1))?;
    assert_eq!(fixture.shell.count(SizeSlot::Nominal), nominal_pushes);
    assert_eq!(fixture.shell.last(SizeSlot::Minimum), Some(Dimensions::new(192.0, 108.0)));
    assert_eq!(chrome.geometry().size, Dimensions::new(800.0, 450.0));

    // Re-locking derives the height from the dragged width
    chrome.set_aspect_ratio(Some(AspectRatio::new(4.0, 3.0)?))?;
    assert_eq!(fixture.shell.last(SizeSlot::Nominal), Some(Dimensions::new(800.0, 600.0)));

    Ok(())
}

proptest! {
    #[test]
    fn test_bottom_drag_width_property(w in 1i32..32, h in 1i32..32, height in 1i32..4000) {
        let (fixture, _chrome) = locked(&format!("{}:{}", w, h), ProposedFrame::new(0, 0, 10, 5000)).unwrap();

        let committed = drag::perform(&fixture.platform, ResizeEdge::Bottom, &[ProposedFrame::new(0, 0, 10, height)]);

        prop_assert_eq!(committed[0].height, height);
        prop_assert_eq!(committed[0].width, height * w / h);
    }
}
