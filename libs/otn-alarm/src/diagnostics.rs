//! Reporting of records left out of a report
//!
//! The operator-visible warnings are printed inside the report itself (see
//! [`crate::render::AlarmReport::notices`]). A [`Diagnostics`] sink receives
//! every dropped record and every aborted listing for the log.

use crate::error::AlarmError;
use parking_lot::Mutex;
use tracing::{error, warn};

/// Sink for skipped records and aborted listings
pub trait Diagnostics: Send + Sync {
    /// A record of `table` was left out of the report
    fn record_skipped(&self, table: &str, error: &AlarmError);

    /// The listing of `table` was abandoned
    fn report_aborted(&self, table: &str, error: &AlarmError);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record_skipped(&self, table: &str, error: &AlarmError) {
        match error {
            AlarmError::MalformedCompositeKey { .. } => {
                error!("Error: {} (table {})", error, table);
            }
            _ => {
                warn!(
                    "Skipped {} record {}: {}",
                    table,
                    error.record_key().unwrap_or("-"),
                    error
                );
            }
        }
    }

    fn report_aborted(&self, table: &str, error: &AlarmError) {
        error!("{} listing aborted: {}", table, error);
    }
}

/// Keeps diagnostics in memory, for tests
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: Mutex<Vec<String>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected entries, formatted as `skipped TABLE: message` or
    /// `aborted TABLE: message`
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn record_skipped(&self, table: &str, error: &AlarmError) {
        self.entries.lock().push(format!("skipped {table}: {error}"));
    }

    fn report_aborted(&self, table: &str, error: &AlarmError) {
        self.entries.lock().push(format!("aborted {table}: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn bad_id() -> AlarmError {
        AlarmError::MalformedCompositeKey {
            key: "7".to_string(),
            id: "ALM".to_string(),
        }
    }

    #[test]
    fn test_collecting_diagnostics() {
        let diagnostics = CollectingDiagnostics::new();
        diagnostics.record_skipped("HISALARM", &bad_id());
        diagnostics.report_aborted(
            "HISALARM",
            &AlarmError::UnclassifiedAlarmType {
                key: "8".to_string(),
                type_id: "FAN_FAIL".to_string(),
            },
        );

        assert_eq!(
            diagnostics.entries(),
            [
                "skipped HISALARM: invalid alarm id ALM",
                "aborted HISALARM: invalid alarm type FAN_FAIL",
            ]
        );
    }

    #[traced_test]
    #[test]
    fn test_tracing_diagnostics() {
        TracingDiagnostics.record_skipped("HISALARM", &bad_id());
        TracingDiagnostics.record_skipped(
            "CURALARM",
            &AlarmError::MissingField {
                key: "ALM9".to_string(),
                field: "severity",
            },
        );

        assert!(logs_contain("Error: invalid alarm id ALM"));
        assert!(logs_contain("Skipped CURALARM record ALM9"));
    }
}
