//! Profile join, filtering and ordering of parsed alarms

use crate::error::AlarmError;
use crate::profile::AlarmProfile;
use crate::record::{AlarmRecord, EnrichedAlarm};

/// Classified alarms plus the records left out of the report
#[derive(Debug, Default)]
pub struct Enrichment {
    pub alarms: Vec<EnrichedAlarm>,
    /// Records dropped from the report, in input order
    pub skipped: Vec<AlarmError>,
}

/// Joins parsed records with the alarm profile
#[derive(Debug, Clone, Copy)]
pub struct AlarmAggregator<'a> {
    profile: &'a AlarmProfile,
}

impl<'a> AlarmAggregator<'a> {
    pub fn new(profile: &'a AlarmProfile) -> Self {
        Self { profile }
    }

    /// Attach the profile classification to every record
    ///
    /// Parse failures and current records with an unknown type id are moved
    /// to [`Enrichment::skipped`]. A history record with an unknown type id
    /// fails the whole batch.
    pub fn enrich_and_filter(
        &self,
        records: Vec<Result<AlarmRecord, AlarmError>>,
    ) -> Result<Enrichment, AlarmError> {
        let mut enrichment = Enrichment::default();

        for record in records {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    enrichment.skipped.push(e);
                    continue;
                }
            };

            match self.profile.get(record.type_id()) {
                Some(classification) => enrichment.alarms.push(EnrichedAlarm {
                    classification: classification.clone(),
                    record,
                }),
                None => {
                    let err = AlarmError::UnclassifiedAlarmType {
                        key: record.key().to_string(),
                        type_id: record.type_id().to_string(),
                    };
                    match record {
                        AlarmRecord::History(_) => return Err(err),
                        AlarmRecord::Current(_) => enrichment.skipped.push(err),
                    }
                }
            }
        }

        Ok(enrichment)
    }
}

/// Order alarms most recent first, keeping the input order of equal times
pub fn sort_descending_by_creation(alarms: &mut [EnrichedAlarm]) {
    alarms.sort_by(|a, b| b.created_nanos().cmp(&a.created_nanos()));
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::profile::Classification;
    use crate::record::{AlarmTime, CurrentAlarmRecord, HistoryAlarmRecord};

    fn time(nanos: i64) -> AlarmTime {
        AlarmTime {
            nanos,
            display: nanos.to_string(),
        }
    }

    fn current(key: &str, type_id: &str, created: i64) -> AlarmRecord {
        AlarmRecord::Current(CurrentAlarmRecord {
            key: key.to_string(),
            id: key.to_string(),
            time_created: time(created),
            resource: "PORT-1-1-C1".to_string(),
            severity: "MAJOR".to_string(),
            type_id: type_id.to_string(),
            text: String::new(),
        })
    }

    fn history(key: &str, type_id: &str) -> AlarmRecord {
        AlarmRecord::History(HistoryAlarmRecord {
            key: key.to_string(),
            id: format!("ALM#{type_id}"),
            time_created: time(1),
            time_cleared: time(2),
            resource: "PORT-1-1-C1".to_string(),
            severity: "MAJOR".to_string(),
            type_id: type_id.to_string(),
            text: String::new(),
        })
    }

    fn profile() -> AlarmProfile {
        AlarmProfile::from_entries([("TEMP_HIGH", Classification::new("NSA", "Communications"))])
    }

    #[test]
    fn test_current_miss_is_skipped() {
        let profile = profile();
        let enrichment = AlarmAggregator::new(&profile)
            .enrich_and_filter(vec![
                Ok(current("a", "FAN_FAIL", 1)),
                Ok(current("b", "TEMP_HIGH", 2)),
            ])
            .unwrap();

        assert_eq!(enrichment.alarms.len(), 1);
        assert_eq!(enrichment.alarms[0].classification.kind, "Communications");
        assert_eq!(enrichment.skipped.len(), 1);
        assert_eq!(enrichment.skipped[0].to_string(), "invalid alarm type FAN_FAIL");
    }

    #[test]
    fn test_history_miss_is_fatal() {
        let profile = profile();
        let err = AlarmAggregator::new(&profile)
            .enrich_and_filter(vec![
                Ok(history("1", "TEMP_HIGH")),
                Ok(history("2", "FAN_FAIL")),
            ])
            .unwrap_err();
        assert!(matches!(err, AlarmError::UnclassifiedAlarmType { .. }));
    }

    #[test]
    fn test_parse_failures_kept_in_order() {
        let profile = profile();
        let enrichment = AlarmAggregator::new(&profile)
            .enrich_and_filter(vec![
                Err(AlarmError::MissingField {
                    key: "x".to_string(),
                    field: "text",
                }),
                Ok(current("y", "LOS", 1)),
            ])
            .unwrap();

        let keys: Vec<_> = enrichment
            .skipped
            .iter()
            .filter_map(|e| e.record_key())
            .collect();
        assert_eq!(keys, ["x", "y"]);
        assert!(enrichment.alarms.is_empty());
    }

    #[test]
    fn test_sort_is_stable_descending() {
        let profile = profile();
        let mut alarms = AlarmAggregator::new(&profile)
            .enrich_and_filter(vec![
                Ok(current("a", "TEMP_HIGH", 1)),
                Ok(current("b", "TEMP_HIGH", 5)),
                Ok(current("c", "TEMP_HIGH", 1)),
                Ok(current("d", "TEMP_HIGH", 3)),
            ])
            .unwrap()
            .alarms;

        sort_descending_by_creation(&mut alarms);
        let keys: Vec<_> = alarms.iter().map(|a| a.record.key()).collect();
        assert_eq!(keys, ["b", "d", "a", "c"]);
    }
}
