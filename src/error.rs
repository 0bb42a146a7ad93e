//! Error types for focusflow.

use thiserror::Error;

/// Errors that can occur in focusflow.
#[derive(Debug, Error)]
pub enum FocusFlowError {
    /// Configuration could not be read, written, or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configuration value failed validation.
    #[error("Invalid setting '{field}': {reason}")]
    InvalidSetting {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input or stored data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Sound cue could not be played.
    #[error("Sound error: {0}")]
    Sound(String),

    /// Terminal or filesystem I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FocusFlowError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for FocusFlowError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for FocusFlowError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_setting_message() {
        let err = FocusFlowError::InvalidSetting {
            field: "focus_minutes",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'focus_minutes': must be at least 1"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: FocusFlowError = json_err.into();
        assert!(matches!(err, FocusFlowError::Parse(_)));
    }
}
