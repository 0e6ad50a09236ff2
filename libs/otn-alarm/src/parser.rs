//! Raw store record to typed alarm record conversion

use crate::error::AlarmError;
use crate::record::{
    AlarmRecord, AlarmTime, CurrentAlarmRecord, HistoryAlarmRecord, RawAlarmRecord, ReportKind,
};
use crate::time::{format_alarm_time, TimestampZone};

const FIELD_ID: &str = "id";
const FIELD_TIME_CREATED: &str = "time-created";
const FIELD_TIME_CLEARED: &str = "time-cleared";
const FIELD_RESOURCE: &str = "resource";
const FIELD_SEVERITY: &str = "severity";
const FIELD_TYPE_ID: &str = "type-id";
const FIELD_TEXT: &str = "text";

/// Separator between the instance part and the type id of a history alarm id
const COMPOSITE_ID_SEPARATOR: char = '#';

/// Parses raw alarm hashes into [`AlarmRecord`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct AlarmRecordParser {
    zone: TimestampZone,
}

impl AlarmRecordParser {
    pub fn new(zone: TimestampZone) -> Self {
        Self { zone }
    }

    /// Parse a record of the given report kind
    pub fn parse(&self, kind: ReportKind, raw: &RawAlarmRecord) -> Result<AlarmRecord, AlarmError> {
        if kind.is_history() {
            self.parse_history(raw).map(AlarmRecord::History)
        } else {
            self.parse_current(raw).map(AlarmRecord::Current)
        }
    }

    /// Parse an active alarm or event
    ///
    /// A record without an `id` field is identified by its store key.
    pub fn parse_current(&self, raw: &RawAlarmRecord) -> Result<CurrentAlarmRecord, AlarmError> {
        let time_created = self.time_field(raw, FIELD_TIME_CREATED)?;

        Ok(CurrentAlarmRecord {
            key: raw.key.clone(),
            id: raw.get(FIELD_ID).unwrap_or(&raw.key).to_string(),
            time_created,
            resource: required(raw, FIELD_RESOURCE)?,
            severity: required(raw, FIELD_SEVERITY)?,
            type_id: required(raw, FIELD_TYPE_ID)?,
            text: required(raw, FIELD_TEXT)?,
        })
    }

    /// Parse a cleared alarm
    ///
    /// The type id is the part of `id` after `#`; ids that do not split into
    /// exactly two parts are rejected before the times are looked at.
    pub fn parse_history(&self, raw: &RawAlarmRecord) -> Result<HistoryAlarmRecord, AlarmError> {
        let id = required(raw, FIELD_ID)?;
        let type_id = split_composite_id(&id)
            .map(str::to_string)
            .ok_or_else(|| AlarmError::MalformedCompositeKey {
                key: raw.key.clone(),
                id: id.clone(),
            })?;

        let time_created = self.time_field(raw, FIELD_TIME_CREATED)?;
        let time_cleared = self.time_field(raw, FIELD_TIME_CLEARED)?;

        Ok(HistoryAlarmRecord {
            key: raw.key.clone(),
            id,
            time_created,
            time_cleared,
            resource: required(raw, FIELD_RESOURCE)?,
            severity: required(raw, FIELD_SEVERITY)?,
            type_id,
            text: required(raw, FIELD_TEXT)?,
        })
    }

    fn time_field(&self, raw: &RawAlarmRecord, field: &'static str) -> Result<AlarmTime, AlarmError> {
        let value = raw.get(field).ok_or_else(|| AlarmError::MissingField {
            key: raw.key.clone(),
            field,
        })?;

        let malformed = || AlarmError::MalformedTimestamp {
            key: raw.key.clone(),
            field,
            value: value.to_string(),
        };

        let nanos = value.trim().parse::<i64>().map_err(|_| malformed())?;
        let display = format_alarm_time(nanos, self.zone).ok_or_else(malformed)?;
        Ok(AlarmTime { nanos, display })
    }
}

/// Type id of a composite `instance#type` id
pub fn split_composite_id(id: &str) -> Option<&str> {
    let mut parts = id.split(COMPOSITE_ID_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(type_id), None) => Some(type_id),
        _ => None,
    }
}

fn required(raw: &RawAlarmRecord, field: &'static str) -> Result<String, AlarmError> {
    raw.get(field)
        .map(str::to_string)
        .ok_or_else(|| AlarmError::MissingField {
            key: raw.key.clone(),
            field,
        })
}
