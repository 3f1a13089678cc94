//! Error types for timeline loading and resolution

use serde::{Deserialize, Serialize};

/// Errors raised while building or configuring a timeline.
///
/// Resolution itself never fails: missing values are omitted from snapshots and
/// mismatched shapes hold their previous value. Only construction input and
/// option merges can be rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TimelineError {
    /// A time key that is neither a non-negative number nor an `NN%` string
    #[error("Malformed keyframe input at key '{key}': {reason}")]
    MalformedKeyframeInput { key: String, reason: String },

    /// An option value outside its accepted domain
    #[error("Invalid option {name}: {reason}")]
    InvalidOption { name: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl TimelineError {
    /// Shorthand for [`TimelineError::MalformedKeyframeInput`].
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedKeyframeInput {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`TimelineError::InvalidOption`].
    pub fn invalid_option(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if the caller can retry with corrected options on the same input
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidOption { .. })
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MalformedKeyframeInput { .. } => "input",
            Self::InvalidOption { .. } => "validation",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let input = TimelineError::malformed("abc", "not a time");
        assert_eq!(input.category(), "input");
        assert!(!input.is_recoverable());

        let option = TimelineError::invalid_option("playSpeed", "must be positive");
        assert_eq!(option.category(), "validation");
        assert!(option.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = TimelineError::malformed("abc", "not a time");
        assert_eq!(
            err.to_string(),
            "Malformed keyframe input at key 'abc': not a time"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: TimelineError = parse.unwrap_err().into();
        assert_eq!(err.category(), "serialization");
    }
}
