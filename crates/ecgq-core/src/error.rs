//! Error handling for the ECG quality framework
//!
//! One error type shared by every crate in the workspace. Failures are local
//! to the call that produced them and never leave a classifier half-updated.

use core::fmt;

/// Result type alias for ECG quality operations
pub type QualityResult<T> = Result<T, QualityError>;

/// Error type for all ECG quality operations
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum QualityError {
    /// Configuration rejected at construction or validation time
    InvalidConfig {
        /// Description of the configuration error
        reason: String,
    },

    /// A window with no samples was passed to the classifier
    EmptyWindow,

    /// A recording produced no classifiable windows
    EmptyRecording,

    /// A statistic was queried before enough observations were added
    InsufficientSamples {
        /// Observations the statistic needs
        required: u64,
        /// Observations accumulated so far
        available: u64,
    },

    /// Recording data or metadata is malformed
    InvalidRecording {
        /// Description of the recording issue
        reason: String,
    },

    /// Serialization/deserialization error
    Serialization {
        /// Serialization error description
        reason: String,
    },

    /// The quality session no longer accepts windows
    SessionClosed,
}

impl fmt::Display for QualityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            QualityError::EmptyWindow => write!(f, "Cannot classify an empty window"),
            QualityError::EmptyRecording => {
                write!(f, "Recording contains no windows to classify")
            }
            QualityError::InsufficientSamples { required, available } => {
                write!(f, "Insufficient samples: need at least {}, have {}",
                       required, available)
            }
            QualityError::InvalidRecording { reason } => {
                write!(f, "Invalid recording: {}", reason)
            }
            QualityError::Serialization { reason } => {
                write!(f, "Serialization error: {}", reason)
            }
            QualityError::SessionClosed => write!(f, "Quality session is closed"),
        }
    }
}

impl std::error::Error for QualityError {}

/// Convenience macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)+) => {
        $crate::error::QualityError::InvalidConfig {
            reason: format!($($arg)+),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = QualityError::InsufficientSamples {
            required: 2,
            available: 1,
        };
        let display = format!("{}", error);
        assert!(display.contains("Insufficient samples"));
        assert!(display.contains('2'));
        assert!(display.contains('1'));
    }

    #[test]
    fn test_config_error_macro() {
        let error = config_error!("buffer length must be at least {}", 1);
        assert_eq!(
            error,
            QualityError::InvalidConfig {
                reason: "buffer length must be at least 1".to_string()
            }
        );
    }
}
