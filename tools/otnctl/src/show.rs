//! `show` command tree

use crate::alarm::{self, AlarmCommands};
use crate::chassis::{self, ChassisCommands};
use crate::context::CliContext;
use crate::slot::{self, SlotCommands};
use anyhow::Result;
use clap::Subcommand;
use otn_rtdb::Entity;
use std::io::Write;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShowCommands {
    /// System-wide alarms
    Alarm {
        #[command(subcommand)]
        command: AlarmCommands,
    },
    /// Chassis information and alarms
    Chassis {
        #[command(subcommand)]
        command: ChassisCommands,
    },
    /// Line card slot information and alarms
    Slot {
        /// Slot number
        slot: u32,
        #[command(subcommand)]
        command: SlotCommands,
    },
}

pub async fn handle_command<W: Write + ?Sized>(
    cmd: ShowCommands,
    ctx: &CliContext,
    out: &mut W,
) -> Result<()> {
    match cmd {
        ShowCommands::Alarm { command } => {
            alarm::handle_command(command, Entity::Chassis, ctx, out).await
        },
        ShowCommands::Chassis { command } => chassis::handle_command(command, ctx, out).await,
        ShowCommands::Slot { slot, command } => slot::handle_command(slot, command, ctx, out).await,
    }
}
