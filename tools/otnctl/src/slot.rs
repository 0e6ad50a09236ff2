//! `show slot <N> ...`

use crate::alarm::{self, AlarmCommands};
use crate::context::CliContext;
use crate::inventory::{write_key_values, SlotInfo};
use anyhow::Result;
use clap::Subcommand;
use otn_rtdb::{DbIndex, Entity};
use std::io::Write;
use tracing::debug;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SlotCommands {
    /// Slot alarms
    Alarm {
        #[command(subcommand)]
        command: AlarmCommands,
    },
    /// Card presence, type, status and software version
    Info,
}

pub async fn handle_command<W: Write + ?Sized>(
    slot: u32,
    cmd: SlotCommands,
    ctx: &CliContext,
    out: &mut W,
) -> Result<()> {
    let entity = ctx.chassis_capability().await?.validate_slot(slot)?;

    match cmd {
        SlotCommands::Alarm { command } => alarm::handle_command(command, entity, ctx, out).await,
        SlotCommands::Info => show_info(entity, slot, ctx, out).await,
    }
}

async fn show_info<W: Write + ?Sized>(
    entity: Entity,
    slot: u32,
    ctx: &CliContext,
    out: &mut W,
) -> Result<()> {
    let state_db = ctx.provider().open(entity, DbIndex::State).await?;
    let info = SlotInfo::read(state_db.as_ref(), slot).await?;
    let mut fields = info.fields();

    if info.present {
        let capability = ctx.linecard_capability(&info.linecard_type).await?;
        if capability.board_mode_list.is_empty() {
            debug!("No board modes declared for {}", info.linecard_type);
        } else {
            fields.push(("Supported Board Modes", capability.board_mode_list.join(", ")));
        }
    }

    write_key_values(out, &fields)?;
    Ok(())
}
