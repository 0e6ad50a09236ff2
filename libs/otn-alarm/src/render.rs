//! Report rendering
//!
//! A report is a `"{label} Total num: {n}"` line, the warnings for dropped
//! records, the alarm table and one blank line. An empty table is left out
//! when the store held no records at all.

use crate::record::{AlarmRecord, EnrichedAlarm};
use crate::table::SimpleTable;
use std::io::{self, Write};

const CURRENT_HEADERS: [&str; 8] = [
    "id",
    "time-created",
    "resource",
    "severity",
    "type-id",
    "text",
    "sa",
    "type",
];

const HISTORY_HEADERS: [&str; 9] = [
    "id",
    "time-created",
    "time-cleared",
    "resource",
    "severity",
    "type-id",
    "text",
    "sa",
    "type",
];

/// Everything printed for one table of one entity
#[derive(Debug, Clone, Default)]
pub struct AlarmReport {
    pub label: String,
    /// Number of records in the store, including dropped ones
    pub total: usize,
    /// Operator warnings, printed between the header and the table
    pub notices: Vec<String>,
    /// Alarms in display order
    pub alarms: Vec<EnrichedAlarm>,
}

impl AlarmReport {
    pub fn new(label: impl Into<String>, total: usize) -> Self {
        Self {
            label: label.into(),
            total,
            ..Default::default()
        }
    }

    pub fn header_line(&self) -> String {
        format!("{} Total num: {}", self.label, self.total)
    }
}

/// Render a current alarm or event report
pub fn render_current<W: Write + ?Sized>(out: &mut W, report: &AlarmReport) -> io::Result<()> {
    render(out, report, &CURRENT_HEADERS)
}

/// Render a history alarm report
pub fn render_history<W: Write + ?Sized>(out: &mut W, report: &AlarmReport) -> io::Result<()> {
    render(out, report, &HISTORY_HEADERS)
}

fn render<W: Write + ?Sized>(out: &mut W, report: &AlarmReport, headers: &[&str]) -> io::Result<()> {
    writeln!(out, "{}", report.header_line())?;
    for notice in &report.notices {
        writeln!(out, "{notice}")?;
    }

    if report.total > 0 {
        let mut table = SimpleTable::new(headers.iter().copied());
        for (index, alarm) in report.alarms.iter().enumerate() {
            table.push_row(alarm_row(index + 1, alarm));
        }
        out.write_all(table.render().as_bytes())?;
    }

    writeln!(out)
}

fn alarm_row(index: usize, alarm: &EnrichedAlarm) -> Vec<String> {
    let record = &alarm.record;
    let mut row = vec![index.to_string(), record.time_created().display.clone()];
    if let AlarmRecord::History(history) = record {
        row.push(history.time_cleared.display.clone());
    }
    row.extend([
        record.resource().to_string(),
        record.severity().to_string(),
        record.type_id().to_string(),
        record.text().to_string(),
        alarm.classification.sa.clone(),
        alarm.classification.kind.clone(),
    ]);
    row
}
