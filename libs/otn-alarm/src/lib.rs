//! Alarm aggregation and rendering for OTN chassis entities
//!
//! Reads current and historical alarm records of the chassis or of one slot,
//! classifies them against the platform alarm profile and prints them as
//! plain-text tables.
//!
//! # Pipeline
//!
//! 1. [`AlarmRecordParser`] turns raw store hashes into typed records
//! 2. [`AlarmAggregator`] joins them with the [`AlarmProfile`] and sorts them
//! 3. [`render`] formats the report
//!
//! [`AlarmService`] drives the three steps against an [`otn_rtdb::Rtdb`].

pub mod aggregator;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod profile;
pub mod record;
pub mod render;
pub mod service;
pub mod table;
pub mod time;

pub use aggregator::{AlarmAggregator, Enrichment};
pub use diagnostics::{CollectingDiagnostics, Diagnostics, TracingDiagnostics};
pub use error::AlarmError;
pub use parser::AlarmRecordParser;
pub use profile::{AlarmProfile, Classification, PROFILE_FILE_NAME};
pub use record::{
    AlarmRecord, AlarmTime, CurrentAlarmRecord, EnrichedAlarm, HistoryAlarmRecord, RawAlarmRecord,
    ReportKind, CURRENT_ALARM_TABLE, HISTORY_ALARM_TABLE, HISTORY_EVENT_TABLE,
};
pub use render::AlarmReport;
pub use service::AlarmService;
pub use time::TimestampZone;
