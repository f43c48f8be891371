//! Monitor configuration.
//!
//! A monitor is configured once, at construction, with the name it reports under and
//! the number of renders it tolerates inside the window.

use crate::error::{CycleGuardError, Result};

/// Renders tolerated inside the window when no threshold is given.
pub const DEFAULT_THRESHOLD: usize = 10;

/// Subject name used by [`MonitorConfig::default`].
pub const DEFAULT_SUBJECT_NAME: &str = "anonymous";

/// Construction parameters for a [`RenderRateMonitor`](crate::RenderRateMonitor).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonitorConfig {
    /// Label for diagnostic output only; not validated and need not be unique
    pub subject_name: String,

    /// Maximum renders inside the window before a warning fires
    pub threshold_per_window: usize,
}

impl MonitorConfig {
    /// Create a config for `subject_name` with the default threshold
    pub fn new(subject_name: impl Into<String>) -> Self {
        Self {
            subject_name: subject_name.into(),
            threshold_per_window: DEFAULT_THRESHOLD,
        }
    }

    /// Set the renders-per-window ceiling
    pub fn with_threshold(mut self, threshold_per_window: usize) -> Self {
        self.threshold_per_window = threshold_per_window;
        self
    }

    /// Reject thresholds that would warn on every single render
    pub fn validate(&self) -> Result<()> {
        if self.threshold_per_window == 0 {
            return Err(CycleGuardError::invalid_configuration(format!(
                "threshold_per_window for \"{}\" must be at least 1",
                self.subject_name
            )));
        }
        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SUBJECT_NAME)
    }
}
