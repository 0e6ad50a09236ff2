//! `show chassis ...`

use crate::alarm::{self, AlarmCommands};
use crate::context::CliContext;
use crate::inventory::{write_key_values, ChassisInfo};
use anyhow::Result;
use clap::Subcommand;
use otn_rtdb::{DbIndex, Entity};
use std::io::Write;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ChassisCommands {
    /// Chassis alarms
    Alarm {
        #[command(subcommand)]
        command: AlarmCommands,
    },
    /// Platform, part number, serial number and software version
    Info,
}

pub async fn handle_command<W: Write + ?Sized>(
    cmd: ChassisCommands,
    ctx: &CliContext,
    out: &mut W,
) -> Result<()> {
    match cmd {
        ChassisCommands::Alarm { command } => {
            alarm::handle_command(command, Entity::Chassis, ctx, out).await
        },
        ChassisCommands::Info => show_info(ctx, out).await,
    }
}

async fn show_info<W: Write + ?Sized>(ctx: &CliContext, out: &mut W) -> Result<()> {
    let platform = ctx.platform().await?;
    let state_db = ctx.provider().open(Entity::Chassis, DbIndex::State).await?;
    let info = ChassisInfo::read(state_db.as_ref(), platform, &ctx.config().upgrade_config).await?;
    write_key_values(out, &info.fields())?;
    Ok(())
}
