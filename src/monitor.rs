//! Render rate monitoring over a trailing one-second window.
//!
//! A [`RenderRateMonitor`] is owned by exactly one subject (typically one UI component
//! instance). The host drives it in two phases per render pass:
//!
//! 1. [`record_render`](RenderRateMonitor::record_render) for every render in the pass
//! 2. [`check_and_warn`](RenderRateMonitor::check_and_warn) exactly once afterwards
//!
//! Both phases prune expired timestamps, so a check always reflects current activity
//! even if no render happened since the previous pass.

use crate::clock::{Clock, Millis, SystemClock};
use crate::config::MonitorConfig;
use crate::cycle::RenderPass;
use crate::error::Result;
use crate::warning::{LogSink, WarningEvent, WarningSink};
use std::collections::VecDeque;

/// Length of the trailing window in milliseconds.
pub const WINDOW_DURATION_MS: Millis = 1000;

/// Upper bound on the buffer preallocated at construction.
const INITIAL_CAPACITY_LIMIT: usize = 64;

/// Counts renders of one subject inside a rolling window and warns past a threshold.
#[derive(Debug)]
pub struct RenderRateMonitor<C = SystemClock, S = LogSink> {
    subject_name: String,
    threshold_per_window: usize,
    /// Retained render times, oldest at the front
    event_timestamps: VecDeque<Millis>,
    clock: C,
    sink: S,
}

impl RenderRateMonitor {
    /// Create a monitor on the wall clock that logs breaches.
    ///
    /// Fails with `InvalidConfiguration` when `threshold_per_window` is zero.
    pub fn new(subject_name: impl Into<String>, threshold_per_window: usize) -> Result<Self> {
        Self::from_config(MonitorConfig::new(subject_name).with_threshold(threshold_per_window))
    }

    /// Create a monitor with the default threshold of 10 renders per window
    pub fn with_default_threshold(subject_name: impl Into<String>) -> Self {
        let config = MonitorConfig::new(subject_name);
        Self::from_parts(config, SystemClock, LogSink)
    }

    /// Create a monitor from a validated [`MonitorConfig`]
    pub fn from_config(config: MonitorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, SystemClock, LogSink))
    }
}

impl<C: Clock, S: WarningSink> RenderRateMonitor<C, S> {
    fn from_parts(config: MonitorConfig, clock: C, sink: S) -> Self {
        Self {
            subject_name: config.subject_name,
            threshold_per_window: config.threshold_per_window,
            event_timestamps: VecDeque::with_capacity(
                config
                    .threshold_per_window
                    .saturating_add(1)
                    .min(INITIAL_CAPACITY_LIMIT),
            ),
            clock,
            sink,
        }
    }

    /// Replace the time source, keeping any retained timestamps
    pub fn with_clock<C2: Clock>(self, clock: C2) -> RenderRateMonitor<C2, S> {
        RenderRateMonitor {
            subject_name: self.subject_name,
            threshold_per_window: self.threshold_per_window,
            event_timestamps: self.event_timestamps,
            clock,
            sink: self.sink,
        }
    }

    /// Replace the destination for warnings
    pub fn with_sink<S2: WarningSink>(self, sink: S2) -> RenderRateMonitor<C, S2> {
        RenderRateMonitor {
            subject_name: self.subject_name,
            threshold_per_window: self.threshold_per_window,
            event_timestamps: self.event_timestamps,
            clock: self.clock,
            sink,
        }
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    pub fn threshold(&self) -> usize {
        self.threshold_per_window
    }

    /// Renders currently retained, as of the last record or check
    pub fn retained_count(&self) -> usize {
        self.event_timestamps.len()
    }

    /// Retained render times, oldest first
    pub fn timestamps(&self) -> impl Iterator<Item = Millis> + '_ {
        self.event_timestamps.iter().copied()
    }

    /// Whether the retained count exceeds the threshold, without pruning or emitting
    pub fn is_over_threshold(&self) -> bool {
        self.event_timestamps.len() > self.threshold_per_window
    }

    /// Record one render at the current time and drop renders that left the window.
    pub fn record_render(&mut self) {
        let now = self.clock.now_ms();
        // Renders stamped after `now` come from before a backwards clock step.
        let mut discarded = 0;
        while self.event_timestamps.back().is_some_and(|&newest| newest > now) {
            self.event_timestamps.pop_back();
            discarded += 1;
        }
        if discarded > 0 {
            log::debug!(
                target: crate::warning::LOG_TAG,
                "\"{}\": clock stepped back to {}, discarded {} render(s) from the future",
                self.subject_name,
                now,
                discarded
            );
        }

        self.event_timestamps.push_back(now);
        self.prune(now);
    }

    /// Prune against the current time and report a breach if the window holds more
    /// renders than the threshold allows.
    ///
    /// The returned event has already been handed to the sink.
    pub fn check_and_warn(&mut self) -> Option<WarningEvent> {
        let now = self.clock.now_ms();
        self.prune(now);

        if !self.is_over_threshold() {
            return None;
        }

        let event = WarningEvent {
            subject_name: self.subject_name.clone(),
            count: self.event_timestamps.len(),
            timestamps: self.event_timestamps.iter().copied().collect(),
        };
        self.sink.emit(&event);
        Some(event)
    }

    /// Start a render pass that checks exactly once when finished or dropped
    pub fn begin_pass(&mut self) -> RenderPass<'_, C, S> {
        RenderPass::new(self)
    }

    /// Drop the expired prefix: entries aged `WINDOW_DURATION_MS` or more.
    fn prune(&mut self, now: Millis) {
        let before = self.event_timestamps.len();
        while let Some(&oldest) = self.event_timestamps.front() {
            if now.saturating_sub(oldest) < WINDOW_DURATION_MS {
                break;
            }
            self.event_timestamps.pop_front();
        }

        let dropped = before - self.event_timestamps.len();
        if dropped > 0 {
            log::trace!(
                target: crate::warning::LOG_TAG,
                "\"{}\": pruned {} expired render(s), {} retained",
                self.subject_name,
                dropped,
                self.event_timestamps.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::CycleGuardError;
    use crate::warning::CollectingSink;

    fn manual_monitor(
        threshold: usize,
    ) -> (
        RenderRateMonitor<ManualClock, CollectingSink>,
        ManualClock,
        CollectingSink,
    ) {
        let clock = ManualClock::new(1_000_000);
        let sink = CollectingSink::new();
        let monitor = RenderRateMonitor::new("Widget", threshold)
            .unwrap()
            .with_clock(clock.clone())
            .with_sink(sink.clone());
        (monitor, clock, sink)
    }

    #[test]
    fn test_new_rejects_zero_threshold() {
        let err = RenderRateMonitor::new("Widget", 0).unwrap_err();
        assert!(matches!(err, CycleGuardError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_default_threshold_is_ten() {
        let monitor = RenderRateMonitor::with_default_threshold("Widget");
        assert_eq!(monitor.threshold(), 10);
        assert_eq!(monitor.subject_name(), "Widget");
        assert_eq!(monitor.retained_count(), 0);
    }

    #[test]
    fn test_record_render_appends_current_time() {
        let (mut monitor, clock, _) = manual_monitor(10);

        monitor.record_render();
        clock.advance(16);
        monitor.record_render();

        assert_eq!(
            monitor.timestamps().collect::<Vec<_>>(),
            vec![1_000_000, 1_000_016]
        );
    }

    #[test]
    fn test_entry_exactly_one_window_old_is_pruned() {
        let (mut monitor, clock, _) = manual_monitor(10);

        monitor.record_render();
        clock.advance(999);
        monitor.record_render();
        assert_eq!(monitor.retained_count(), 2);

        clock.advance(1);
        monitor.record_render();
        assert_eq!(
            monitor.timestamps().collect::<Vec<_>>(),
            vec![1_000_999, 1_001_000]
        );
    }

    #[test]
    fn test_check_prunes_without_new_renders() {
        let (mut monitor, clock, sink) = manual_monitor(1);

        monitor.record_render();
        monitor.record_render();
        clock.advance(1_000);

        assert_eq!(monitor.check_and_warn(), None);
        assert_eq!(monitor.retained_count(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_breach_emits_to_sink_and_returns_event() {
        let (mut monitor, clock, sink) = manual_monitor(2);

        for _ in 0..3 {
            monitor.record_render();
            clock.advance(5);
        }

        let event = monitor.check_and_warn().expect("breach expected");
        assert_eq!(event.subject_name, "Widget");
        assert_eq!(event.count, 3);
        assert_eq!(event.timestamps, vec![1_000_000, 1_000_005, 1_000_010]);
        assert_eq!(sink.events(), vec![event]);
    }

    #[test]
    fn test_repeated_breaches_are_not_deduplicated() {
        let (mut monitor, _, sink) = manual_monitor(1);

        monitor.record_render();
        monitor.record_render();
        assert!(monitor.check_and_warn().is_some());
        assert!(monitor.check_and_warn().is_some());

        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_backwards_clock_discards_future_renders() {
        let (mut monitor, clock, _) = manual_monitor(10);

        monitor.record_render();
        clock.set(999_500);
        monitor.record_render();

        assert_eq!(monitor.timestamps().collect::<Vec<_>>(), vec![999_500]);
    }

    #[test]
    fn test_renders_after_clock_step_still_expire() {
        let (mut monitor, clock, sink) = manual_monitor(30);

        clock.set(10_000);
        monitor.record_render();
        clock.set(5_000);

        // 20 renders per second for four seconds.
        for _ in 0..80 {
            monitor.record_render();
            clock.advance(50);
        }

        assert_eq!(monitor.check_and_warn(), None);
        assert_eq!(monitor.retained_count(), 19);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_huge_threshold_does_not_preallocate() {
        let monitor = RenderRateMonitor::new("Big", usize::MAX).unwrap();
        assert_eq!(monitor.threshold(), usize::MAX);

        let mut monitor = monitor
            .with_clock(ManualClock::new(0))
            .with_sink(CollectingSink::new());
        monitor.record_render();
        assert_eq!(monitor.check_and_warn(), None);
    }

    #[test]
    fn test_is_over_threshold_does_not_prune() {
        let (mut monitor, clock, sink) = manual_monitor(1);

        monitor.record_render();
        monitor.record_render();
        clock.advance(5_000);

        assert!(monitor.is_over_threshold());
        assert!(sink.is_empty());
        assert_eq!(monitor.check_and_warn(), None);
        assert!(!monitor.is_over_threshold());
    }
}
