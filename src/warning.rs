//! Threshold breach records and where they go.
//!
//! A breach produces a [`WarningEvent`]. The monitor hands every event to a
//! [`WarningSink`] without formatting, buffering or de-duplicating it; the sink decides
//! what "emit" means.

use crate::clock::Millis;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Tag attached to every diagnostic, used as the `log` target.
pub const LOG_TAG: &str = "CycleGuard";

/// A single threshold breach observed by a monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarningEvent {
    /// Subject the monitor was created for
    pub subject_name: String,

    /// Renders retained in the window at check time
    pub count: usize,

    /// Copy of the retained timestamps, oldest first
    pub timestamps: Vec<Millis>,
}

impl WarningEvent {
    /// Human-readable headline, e.g. `High render frequency in "Sidebar"`
    pub fn message(&self) -> String {
        format!("High render frequency in \"{}\"", self.subject_name)
    }

    /// Severity the event should be reported at
    pub fn level(&self) -> log::Level {
        log::Level::Warn
    }
}

impl fmt::Display for WarningEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {{ count: {}, timestamps: {:?} }}",
            LOG_TAG,
            self.message(),
            self.count,
            self.timestamps
        )
    }
}

/// Destination for warnings produced by a monitor.
pub trait WarningSink {
    fn emit(&self, event: &WarningEvent);
}

/// Forwards warnings to the `log` facade under the `CycleGuard` target.
///
/// Nothing is printed unless the host has installed a logger (e.g. `env_logger`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn emit(&self, event: &WarningEvent) {
        log::log!(
            target: LOG_TAG,
            event.level(),
            "{} {{ count: {}, timestamps: {:?} }}",
            event.message(),
            event.count,
            event.timestamps
        );
    }
}

/// Keeps every warning in memory.
///
/// Clones share the same buffer, so a host can give one clone to a monitor and read the
/// collected events through another.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    events: Arc<Mutex<Vec<WarningEvent>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events emitted so far
    pub fn events(&self) -> Vec<WarningEvent> {
        self.events.lock().clone()
    }

    /// Number of events emitted so far
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Remove and return all collected events
    pub fn drain(&self) -> Vec<WarningEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl WarningSink for CollectingSink {
    fn emit(&self, event: &WarningEvent) {
        self.events.lock().push(event.clone());
    }
}

impl<S: WarningSink + ?Sized> WarningSink for &S {
    fn emit(&self, event: &WarningEvent) {
        (**self).emit(event)
    }
}

impl<S: WarningSink + ?Sized> WarningSink for Box<S> {
    fn emit(&self, event: &WarningEvent) {
        (**self).emit(event)
    }
}
