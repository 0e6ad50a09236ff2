//! Alarm report entry points
//!
//! Each listing reads all keys of one table, parses and classifies the
//! records, and prints one report. Store keys are processed in lexicographic
//! order so that alarms with equal creation times always print the same way.

use crate::aggregator::{sort_descending_by_creation, AlarmAggregator};
use crate::diagnostics::Diagnostics;
use crate::error::AlarmError;
use crate::parser::AlarmRecordParser;
use crate::profile::AlarmProfile;
use crate::record::{
    RawAlarmRecord, ReportKind, CURRENT_ALARM_TABLE, HISTORY_ALARM_TABLE, HISTORY_EVENT_TABLE,
};
use crate::render::{render_current, render_history, AlarmReport};
use otn_rtdb::{DbIndex, Entity, Rtdb, RtdbProvider};
use std::io::Write;
use tracing::debug;

/// Builds and prints alarm reports
pub struct AlarmService<'a> {
    profile: &'a AlarmProfile,
    parser: AlarmRecordParser,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> AlarmService<'a> {
    pub fn new(
        profile: &'a AlarmProfile,
        parser: AlarmRecordParser,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            profile,
            parser,
            diagnostics,
        }
    }

    /// Read, classify and order the records of one table
    ///
    /// Records that cannot be shown are reported to the diagnostics sink and,
    /// when the operator should see them, added to the report notices.
    pub async fn build_report(
        &self,
        store: &dyn Rtdb,
        table: &str,
        kind: ReportKind,
        label: &str,
    ) -> Result<AlarmReport, AlarmError> {
        let mut keys = store.table_keys(table).await?;
        keys.sort();
        keys.dedup();
        debug!("{} records in {}", keys.len(), table);

        let mut report = AlarmReport::new(label, keys.len());
        if keys.is_empty() {
            return Ok(report);
        }

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            let fields = store.table_fields(table, &key).await?;
            let raw = RawAlarmRecord::new(key, fields);
            records.push(self.parser.parse(kind, &raw));
        }

        let enrichment = match AlarmAggregator::new(self.profile).enrich_and_filter(records) {
            Ok(enrichment) => enrichment,
            Err(e) => {
                self.diagnostics.report_aborted(table, &e);
                return Err(e);
            }
        };

        for skipped in &enrichment.skipped {
            self.diagnostics.record_skipped(table, skipped);
            if skipped.is_operator_visible() {
                report.notices.push(format!("Warning: {skipped}"));
            }
        }

        report.alarms = enrichment.alarms;
        sort_descending_by_creation(&mut report.alarms);
        Ok(report)
    }

    /// Print the current-shaped records of `table` under `label`
    pub async fn show_entity_alarm_current<W: Write + ?Sized>(
        &self,
        out: &mut W,
        label: &str,
        store: &dyn Rtdb,
        table: &str,
    ) -> Result<(), AlarmError> {
        let report = self
            .build_report(store, table, ReportKind::CurrentAlarm, label)
            .await?;
        render_current(out, &report)?;
        Ok(())
    }

    /// Print the cleared alarms, then the recorded events, of one entity
    ///
    /// An unclassified history alarm aborts the whole listing.
    pub async fn show_entity_alarm_history<W: Write + ?Sized>(
        &self,
        out: &mut W,
        entity_label: &str,
        store: &dyn Rtdb,
    ) -> Result<(), AlarmError> {
        let report = self
            .build_report(
                store,
                HISTORY_ALARM_TABLE,
                ReportKind::HistoryAlarm,
                &format!("{entity_label} History Alarm"),
            )
            .await?;
        render_history(out, &report)?;

        let report = self
            .build_report(
                store,
                HISTORY_EVENT_TABLE,
                ReportKind::CurrentEvent,
                &format!("{entity_label} History Event"),
            )
            .await?;
        render_current(out, &report)?;
        Ok(())
    }

    /// Print the active alarms of the chassis or of one slot
    pub async fn show_alarm_current<W: Write + ?Sized>(
        &self,
        out: &mut W,
        provider: &dyn RtdbProvider,
        entity: Entity,
    ) -> Result<(), AlarmError> {
        let store = provider.open(entity, DbIndex::State).await?;
        self.show_entity_alarm_current(
            out,
            &format!("{} Current Alarm", entity.label()),
            store.as_ref(),
            CURRENT_ALARM_TABLE,
        )
        .await
    }

    /// Print the alarm and event history of the chassis or of one slot
    pub async fn show_alarm_history<W: Write + ?Sized>(
        &self,
        out: &mut W,
        provider: &dyn RtdbProvider,
        entity: Entity,
    ) -> Result<(), AlarmError> {
        let store = provider.open(entity, DbIndex::History).await?;
        self.show_entity_alarm_history(out, &entity.label(), store.as_ref())
            .await
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::profile::Classification;
    use crate::time::TimestampZone;
    use async_trait::async_trait;
    use otn_rtdb::MemoryRtdb;
    use std::collections::HashMap;

    /// Store that lists every key twice, as a Redis SCAN may
    struct RepeatingStore(MemoryRtdb);

    #[async_trait]
    impl Rtdb for RepeatingStore {
        async fn table_keys(&self, table: &str) -> anyhow::Result<Vec<String>> {
            let keys = self.0.table_keys(table).await?;
            Ok(keys.iter().chain(keys.iter()).cloned().collect())
        }

        async fn table_fields(
            &self,
            table: &str,
            key: &str,
        ) -> anyhow::Result<HashMap<String, String>> {
            self.0.table_fields(table, key).await
        }

        async fn table_field(
            &self,
            table: &str,
            key: &str,
            field: &str,
        ) -> anyhow::Result<Option<String>> {
            self.0.table_field(table, key, field).await
        }
    }

    fn seed(store: &MemoryRtdb, key: &str, type_id: &str, created: &str) {
        store.insert_record(
            CURRENT_ALARM_TABLE,
            key,
            [
                ("id", key),
                ("time-created", created),
                ("resource", "PORT-1-1-L1"),
                ("severity", "CRITICAL"),
                ("type-id", type_id),
                ("text", "loss of signal"),
            ],
        );
    }

    #[tokio::test]
    async fn test_build_report_orders_and_filters() {
        let store = MemoryRtdb::new();
        seed(&store, "A", "LOS", "1000000000");
        seed(&store, "B", "LOS", "3000000000");
        seed(&store, "C", "UNKNOWN", "2000000000");
        seed(&store, "D", "LOS", "soon");

        let profile = AlarmProfile::from_entries([("LOS", Classification::new("SA", "Communications"))]);
        let diagnostics = CollectingDiagnostics::new();
        let service = AlarmService::new(
            &profile,
            AlarmRecordParser::new(TimestampZone::Utc),
            &diagnostics,
        );

        let report = service
            .build_report(&store, CURRENT_ALARM_TABLE, ReportKind::CurrentAlarm, "System Current Alarm")
            .await
            .unwrap();

        assert_eq!(report.total, 4);
        let keys: Vec<_> = report.alarms.iter().map(|a| a.record.key()).collect();
        assert_eq!(keys, ["B", "A"]);
        assert_eq!(
            report.notices,
            [
                "Warning: invalid alarm type UNKNOWN",
                "Warning: invalid alarm time time-created=\"soon\" in D",
            ]
        );
        assert_eq!(diagnostics.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_store_keys_counted_once() {
        let inner = MemoryRtdb::new();
        seed(&inner, "A", "LOS", "1000000000");
        let store = RepeatingStore(inner);

        let profile = AlarmProfile::from_entries([("LOS", Classification::new("SA", "Communications"))]);
        let diagnostics = CollectingDiagnostics::new();
        let service = AlarmService::new(
            &profile,
            AlarmRecordParser::new(TimestampZone::Utc),
            &diagnostics,
        );

        let mut out = Vec::new();
        service
            .show_entity_alarm_current(&mut out, "System Current Alarm", &store, CURRENT_ALARM_TABLE)
            .await
            .unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.starts_with("System Current Alarm Total num: 1\n"));
        assert_eq!(output.matches("loss of signal").count(), 1);
    }
}
