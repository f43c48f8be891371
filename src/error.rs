//! Error types for cycle-guard.
//!
//! Monitoring itself never fails; the only error surfaces at construction, when a
//! monitor is configured with a threshold it cannot honor.

use thiserror::Error;

/// The main error type for cycle-guard operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleGuardError {
    /// The monitor was configured with values it cannot work with (e.g. a zero threshold)
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Standard Result type for cycle-guard operations.
pub type Result<T> = std::result::Result<T, CycleGuardError>;

impl CycleGuardError {
    /// Create an InvalidConfiguration error with a descriptive message
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}
