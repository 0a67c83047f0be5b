//! Integration test utilities for flexframe
//!
//! This module provides common utilities for integration testing including:
//! - A recording host shell
//! - Test fixtures around the in-memory platform
//! - Resize gesture generators

use anyhow::Result;
use flexframe::platform::fake::FakePlatform;
use flexframe::platform::MonitorBounds;
use flexframe::utils::config::ChromeConfig;
use flexframe::window::{Dimensions, SizeSlot, WindowChrome, WindowShell};
use std::cell::RefCell;
use std::rc::Rc;

/// Shell that records every size slot it is handed
#[derive(Debug, Clone, Default)]
pub struct RecordingShell {
    applied: Rc<RefCell<Vec<(SizeSlot, Dimensions)>>>,
}

impl RecordingShell {
    /// Most recently applied dimensions of `slot`
    pub fn last(&self, slot: SizeSlot) -> Option<Dimensions> {
        self.applied
            .borrow()
            .iter()
            .rev()
            .find(|(applied, _)| *applied == slot)
            .map(|(_, size)| *size)
    }

    /// Number of pushes of `slot` so far
    pub fn count(&self, slot: SizeSlot) -> usize {
        self.applied
            .borrow()
            .iter()
            .filter(|(applied, _)| *applied == slot)
            .count()
    }
}

impl WindowShell for RecordingShell {
    fn apply_size(&mut self, slot: SizeSlot, size: &Dimensions) {
        self.applied.borrow_mut().push((slot, *size));
    }
}

/// Controller type used throughout the integration tests
pub type TestChrome = WindowChrome<FakePlatform, RecordingShell>;

/// Test fixture for integration tests
pub struct TestFixture {
    pub platform: FakePlatform,
    pub shell: RecordingShell,
}

impl TestFixture {
    /// Fixture on the default 1920x1080 monitor
    pub fn new() -> Self {
        Self {
            platform: FakePlatform::new(),
            shell: RecordingShell::default(),
        }
    }

    /// Fixture on a monitor of the given size
    pub fn with_monitor(width: i32, height: i32) -> Self {
        let fixture = Self::new();
        fixture
            .platform
            .set_monitor(Some(MonitorBounds::new(0, 0, width, height)));
        fixture
    }

    /// Attach a controller to the fixture window
    pub fn attach(&self, config: &ChromeConfig) -> Result<TestChrome> {
        let chrome = WindowChrome::attach(self.platform.clone(), self.shell.clone(), config)?;
        Ok(chrome)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Resize gesture generators
pub mod drag {
    use flexframe::platform::fake::FakePlatform;
    use flexframe::window::{ProposedFrame, ResizeEdge};

    /// Proposals for dragging the bottom edge from `start` to `to_height`
    /// in `steps` evenly spaced moves
    pub fn bottom_edge(start: ProposedFrame, to_height: i32, steps: i32) -> Vec<ProposedFrame> {
        let steps = steps.max(1);
        (1..=steps)
            .map(|step| {
                let height = start.height + (to_height - start.height) * step / steps;
                ProposedFrame::new(start.x, start.y, start.width, height)
            })
            .collect()
    }

    /// Proposal for pulling the top-left corner by `(dx, dy)` with the
    /// bottom-right corner held in place
    pub fn top_left_corner(start: ProposedFrame, dx: i32, dy: i32) -> ProposedFrame {
        ProposedFrame::new(start.x + dx, start.y + dy, start.width - dx, start.height - dy)
    }

    /// Run one complete gesture and return every committed frame
    pub fn perform(
        platform: &FakePlatform,
        edge: ResizeEdge,
        proposals: &[ProposedFrame],
    ) -> Vec<ProposedFrame> {
        platform.deliver_sizing(edge);
        let committed = proposals
            .iter()
            .map(|proposal| platform.deliver_frame(*proposal))
            .collect();
        platform.deliver_exit_size_move();
        committed
    }
}
