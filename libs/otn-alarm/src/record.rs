//! Alarm record model
//!
//! Store hashes are untyped string maps. They are parsed once into the tagged
//! [`AlarmRecord`] variants and nothing downstream touches the raw map again.

use crate::profile::Classification;
use std::collections::HashMap;

/// Table of active alarms (chassis or slot STATE_DB)
pub const CURRENT_ALARM_TABLE: &str = "CURALARM";
/// Table of cleared alarms (HISTORY_DB)
pub const HISTORY_ALARM_TABLE: &str = "HISALARM";
/// Table of recorded events (HISTORY_DB), stored in the current-alarm shape
pub const HISTORY_EVENT_TABLE: &str = "HISEVENT";

/// Shape of the records a report reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    CurrentAlarm,
    CurrentEvent,
    HistoryAlarm,
}

impl ReportKind {
    /// Table the records of this kind are read from
    pub fn table(self) -> &'static str {
        match self {
            Self::CurrentAlarm => CURRENT_ALARM_TABLE,
            Self::CurrentEvent => HISTORY_EVENT_TABLE,
            Self::HistoryAlarm => HISTORY_ALARM_TABLE,
        }
    }

    /// History records carry a clear time and a composite id
    pub fn is_history(self) -> bool {
        matches!(self, Self::HistoryAlarm)
    }
}

/// One record exactly as the store returned it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAlarmRecord {
    /// Store key the record was read from (without table prefix)
    pub key: String,
    pub fields: HashMap<String, String>,
}

impl RawAlarmRecord {
    pub fn new(key: impl Into<String>, fields: HashMap<String, String>) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    /// Build from literal pairs, mostly for tests
    pub fn from_pairs<'a>(key: &str, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            key,
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// A stored time: raw nanoseconds plus its display form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmTime {
    pub nanos: i64,
    pub display: String,
}

/// Active alarm or event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAlarmRecord {
    pub key: String,
    pub id: String,
    pub time_created: AlarmTime,
    pub resource: String,
    pub severity: String,
    pub type_id: String,
    pub text: String,
}

/// Cleared alarm; `type_id` comes from the `id` suffix after `#`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryAlarmRecord {
    pub key: String,
    pub id: String,
    pub time_created: AlarmTime,
    pub time_cleared: AlarmTime,
    pub resource: String,
    pub severity: String,
    pub type_id: String,
    pub text: String,
}

/// A validated alarm record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmRecord {
    Current(CurrentAlarmRecord),
    History(HistoryAlarmRecord),
}

impl AlarmRecord {
    pub fn key(&self) -> &str {
        match self {
            Self::Current(r) => &r.key,
            Self::History(r) => &r.key,
        }
    }

    pub fn type_id(&self) -> &str {
        match self {
            Self::Current(r) => &r.type_id,
            Self::History(r) => &r.type_id,
        }
    }

    pub fn time_created(&self) -> &AlarmTime {
        match self {
            Self::Current(r) => &r.time_created,
            Self::History(r) => &r.time_created,
        }
    }

    pub fn time_cleared(&self) -> Option<&AlarmTime> {
        match self {
            Self::Current(_) => None,
            Self::History(r) => Some(&r.time_cleared),
        }
    }

    pub fn resource(&self) -> &str {
        match self {
            Self::Current(r) => &r.resource,
            Self::History(r) => &r.resource,
        }
    }

    pub fn severity(&self) -> &str {
        match self {
            Self::Current(r) => &r.severity,
            Self::History(r) => &r.severity,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Current(r) => &r.text,
            Self::History(r) => &r.text,
        }
    }
}

/// A record joined with its profile classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedAlarm {
    pub record: AlarmRecord,
    pub classification: Classification,
}

impl EnrichedAlarm {
    pub fn created_nanos(&self) -> i64 {
        self.record.time_created().nanos
    }
}
