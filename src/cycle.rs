//! Host integration for one render pass.
//!
//! [`RenderPass`] holds the monitor mutably for the length of a pass: renders are
//! recorded through it, and the threshold check runs once when the pass is finished or
//! dropped. Because the borrow is exclusive, a second pass cannot start until the first
//! has been checked.

use crate::clock::Clock;
use crate::monitor::RenderRateMonitor;
use crate::warning::{WarningEvent, WarningSink};

/// Scope covering the renders of a single pass.
#[must_use = "a render pass checks the threshold when finished or dropped"]
pub struct RenderPass<'a, C: Clock, S: WarningSink> {
    monitor: &'a mut RenderRateMonitor<C, S>,
    renders: usize,
    checked: bool,
}

impl<'a, C: Clock, S: WarningSink> RenderPass<'a, C, S> {
    pub(crate) fn new(monitor: &'a mut RenderRateMonitor<C, S>) -> Self {
        Self {
            monitor,
            renders: 0,
            checked: false,
        }
    }

    /// Observe one render during this pass
    pub fn record(&mut self) {
        self.monitor.record_render();
        self.renders += 1;
    }

    /// Renders recorded through this pass so far
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// End the pass and run the threshold check
    pub fn finish(mut self) -> Option<WarningEvent> {
        self.checked = true;
        self.monitor.check_and_warn()
    }
}

impl<C: Clock, S: WarningSink> Drop for RenderPass<'_, C, S> {
    fn drop(&mut self) {
        // A pass abandoned by a panicking render is not a finished pass.
        if !self.checked && !std::thread::panicking() {
            self.checked = true;
            self.monitor.check_and_warn();
        }
    }
}
