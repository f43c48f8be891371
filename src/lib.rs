//! # cycle-guard - Render Frequency Guard
//!
//! Detects excessive re-rendering of a UI component (or anything that renders in
//! discrete passes) by counting renders inside a rolling one-second window and emitting
//! a warning when a configured threshold is exceeded.
//!
//! ## Usage
//!
//! ```
//! use cycle_guard::RenderRateMonitor;
//!
//! let mut monitor = RenderRateMonitor::new("Sidebar", 10)?;
//!
//! // During each render of the component:
//! monitor.record_render();
//!
//! // Once per pass, after all renders are recorded:
//! if let Some(warning) = monitor.check_and_warn() {
//!     eprintln!("{warning}");
//! }
//! # Ok::<(), cycle_guard::CycleGuardError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`monitor`] - The window buffer and the record/check operations
//! - [`cycle`] - Scoped render pass enforcing one check per pass
//! - [`warning`] - Breach records and sinks (the `log` facade by default)
//! - [`clock`] - Wall clock and manually driven clock
//! - [`config`] - Construction parameters and validation
//! - [`error`] - Error types

pub mod clock;
pub mod config;
pub mod cycle;
pub mod error;
pub mod monitor;
pub mod warning;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use config::{MonitorConfig, DEFAULT_THRESHOLD};
pub use cycle::RenderPass;
pub use error::{CycleGuardError, Result};
pub use monitor::{RenderRateMonitor, WINDOW_DURATION_MS};
pub use warning::{CollectingSink, LogSink, WarningEvent, WarningSink, LOG_TAG};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
