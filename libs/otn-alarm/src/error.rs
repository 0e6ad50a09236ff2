//! Error types for alarm processing

use thiserror::Error;

/// Failure while turning store records into a report
///
/// The first four variants describe a single record; whether they abort the
/// report or only drop the record is decided by [`crate::AlarmAggregator`]
/// and [`crate::AlarmService`].
#[derive(Debug, Error)]
pub enum AlarmError {
    #[error("invalid alarm time {field}={value:?} in {key}")]
    MalformedTimestamp {
        key: String,
        field: &'static str,
        value: String,
    },

    #[error("invalid alarm id {id}")]
    MalformedCompositeKey { key: String, id: String },

    #[error("alarm {key} has no {field} field")]
    MissingField { key: String, field: &'static str },

    #[error("invalid alarm type {type_id}")]
    UnclassifiedAlarmType { key: String, type_id: String },

    #[error("alarm store error: {0:#}")]
    Store(#[from] anyhow::Error),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl AlarmError {
    /// Store key of the offending record, for per-record errors
    pub fn record_key(&self) -> Option<&str> {
        match self {
            Self::MalformedTimestamp { key, .. }
            | Self::MalformedCompositeKey { key, .. }
            | Self::MissingField { key, .. }
            | Self::UnclassifiedAlarmType { key, .. } => Some(key),
            Self::Store(_) | Self::Output(_) => None,
        }
    }

    /// Whether a skipped record is announced inside the printed report
    ///
    /// Malformed composite ids only reach the log.
    pub fn is_operator_visible(&self) -> bool {
        matches!(
            self,
            Self::MalformedTimestamp { .. }
                | Self::MissingField { .. }
                | Self::UnclassifiedAlarmType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclassified_message() {
        let err = AlarmError::UnclassifiedAlarmType {
            key: "ALM1".to_string(),
            type_id: "FAN_FAIL".to_string(),
        };
        assert_eq!(err.to_string(), "invalid alarm type FAN_FAIL");
        assert_eq!(err.record_key(), Some("ALM1"));
        assert!(err.is_operator_visible());
    }

    #[test]
    fn test_composite_key_is_log_only() {
        let err = AlarmError::MalformedCompositeKey {
            key: "ALM".to_string(),
            id: "ALM".to_string(),
        };
        assert_eq!(err.to_string(), "invalid alarm id ALM");
        assert!(!err.is_operator_visible());
    }

    #[test]
    fn test_timestamp_message_quotes_value() {
        let err = AlarmError::MalformedTimestamp {
            key: "ALM1".to_string(),
            field: "time-created",
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid alarm time time-created=\"yesterday\" in ALM1"
        );
    }

    #[test]
    fn test_store_error_has_no_record() {
        let err = AlarmError::from(anyhow::anyhow!("connection reset"));
        assert_eq!(err.record_key(), None);
        assert_eq!(err.to_string(), "alarm store error: connection reset");
    }
}
