//! Unified error handling for the OTN chassis tools
//!
//! One error type shared by the store, configuration and CLI layers. Alarm
//! records carry their own per-record error type in `otn-alarm`; anything that
//! is fatal for a whole command ends up here.

use thiserror::Error;

/// Exit status used when configuration is missing or invalid
pub const CONFIG_ERROR_EXIT_CODE: i32 = 255;

// ============================================================================
// OtnError - Main error type
// ============================================================================

/// Main error type for the OTN chassis tools
#[derive(Debug, Error)]
pub enum OtnError {
    // ======================================
    // Configuration Errors
    // ======================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // ======================================
    // Database Errors
    // ======================================
    #[error("Connection failed: {endpoint}: {reason}")]
    ConnectionFailed { endpoint: String, reason: String },

    // ======================================
    // Chassis Addressing Errors
    // ======================================
    #[error("Invalid slot {slot}: {reason}")]
    InvalidSlot { slot: u32, reason: String },

    // ======================================
    // File & I/O Errors
    // ======================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {file}: {error}")]
    ParseError { file: String, error: String },

    // ======================================
    // Catch-all for other errors
    // ======================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using OtnError
pub type OtnResult<T> = Result<T, OtnError>;

impl OtnError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_)
            | Self::MissingConfig(_)
            | Self::ParseError { .. } => CONFIG_ERROR_EXIT_CODE,
            _ => 1,
        }
    }

    /// Stable error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::MissingConfig(_) => "MISSING_CONFIG",
            Self::ConnectionFailed { .. } => "CONNECTION_FAILED",
            Self::InvalidSlot { .. } => "INVALID_SLOT",
            Self::Io(_) => "IO_ERROR",
            Self::ParseError { .. } => "PARSE_ERROR",
            Self::Other(_) => "UNKNOWN_ERROR",
        }
    }

    /// Create an invalid slot error
    pub fn invalid_slot(slot: u32, reason: impl Into<String>) -> Self {
        Self::InvalidSlot {
            slot,
            reason: reason.into(),
        }
    }

    /// Create a parse error for a file
    pub fn parse(file: impl Into<String>, error: impl ToString) -> Self {
        Self::ParseError {
            file: file.into(),
            error: error.to_string(),
        }
    }
}

// Conversion traits for common error types
impl From<figment::Error> for OtnError {
    fn from(err: figment::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for OtnError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            file: "<json>".to_string(),
            error: err.to_string(),
        }
    }
}

// Helper macros for creating errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::OtnError::Configuration($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::OtnError::Configuration(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            OtnError::Configuration("bad".into()).exit_code(),
            CONFIG_ERROR_EXIT_CODE
        );
        assert_eq!(OtnError::parse("a.json", "eof").exit_code(), 255);
        assert_eq!(OtnError::invalid_slot(9, "out of range").exit_code(), 1);
    }

    #[test]
    fn test_invalid_slot_message() {
        let err = OtnError::invalid_slot(12, "chassis has 8 slots");
        assert_eq!(err.to_string(), "Invalid slot 12: chassis has 8 slots");
        assert_eq!(err.error_code(), "INVALID_SLOT");
    }

    #[test]
    fn test_connection_failed_code() {
        let err = OtnError::ConnectionFailed {
            endpoint: "redis://117.103.88.3:6379 STATE_DB(6)".into(),
            reason: "refused".into(),
        };
        assert_eq!(err.error_code(), "CONNECTION_FAILED");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_config_error_macro() {
        let err = config_error!("missing {}", "platform");
        assert_eq!(err.to_string(), "Configuration error: missing platform");
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: OtnError = json_err.into();
        assert!(matches!(err, OtnError::ParseError { .. }));
    }
}
