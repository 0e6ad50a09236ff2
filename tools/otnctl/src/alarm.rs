//! `alarm current|history` for the chassis or one slot

use crate::context::CliContext;
use anyhow::Result;
use clap::Subcommand;
use otn_alarm::{AlarmRecordParser, AlarmService, TracingDiagnostics};
use otn_rtdb::Entity;
use std::io::Write;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmCommands {
    /// Show active alarms
    Current,
    /// Show cleared alarms and recorded events
    History,
}

pub async fn handle_command<W: Write + ?Sized>(
    cmd: AlarmCommands,
    entity: Entity,
    ctx: &CliContext,
    out: &mut W,
) -> Result<()> {
    let profile = ctx.alarm_profile().await?;
    let diagnostics = TracingDiagnostics;
    let service = AlarmService::new(
        &profile,
        AlarmRecordParser::new(ctx.timestamp_zone()),
        &diagnostics,
    );

    match cmd {
        AlarmCommands::Current => service.show_alarm_current(out, ctx.provider(), entity).await?,
        AlarmCommands::History => service.show_alarm_history(out, ctx.provider(), entity).await?,
    }
    Ok(())
}
