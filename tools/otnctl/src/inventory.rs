//! Chassis and line card inventory
//!
//! Values are read from the STATE_DB of the owning entity and printed as
//! `name: value` lines with the names padded to a fixed width.

use anyhow::{Context as _, Result};
use errors::{OtnError, OtnResult};
use otn_rtdb::helpers::{table_field_or_na, NA_VALUE};
use otn_rtdb::Rtdb;
use serde::Deserialize;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Width the field names are padded to
pub const FIELD_WIDTH: usize = 45;

const LINECARD_TABLE: &str = "LINECARD";
const CHASSIS_TABLE: &str = "CHASSIS";
const CHASSIS_KEY: &str = "CHASSIS-1";

/// Board mode shown when the card reports none
pub const BOARD_MODE_NONE: &str = "NONE";

/// Print `name: value` lines followed by a blank line
pub fn write_key_values<W: Write + ?Sized>(out: &mut W, fields: &[(&str, String)]) -> io::Result<()> {
    for (name, value) in fields {
        writeln!(out, "{name:<FIELD_WIDTH$}: {value}")?;
    }
    writeln!(out)
}

/// State of one line card slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub slot: u32,
    pub present: bool,
    pub linecard_type: String,
    pub slot_status: String,
    pub board_mode: String,
    pub software_version: String,
}

impl SlotInfo {
    pub fn linecard_key(slot: u32) -> String {
        format!("LINECARD-1-{slot}")
    }

    /// Read the slot record from the slot's STATE_DB
    pub async fn read(state_db: &dyn Rtdb, slot: u32) -> Result<Self> {
        let key = Self::linecard_key(slot);
        let present = state_db
            .table_field(LINECARD_TABLE, &key, "empty")
            .await?
            .is_some_and(|empty| empty == "false");
        let board_mode = state_db
            .table_field(LINECARD_TABLE, &key, "board-mode")
            .await?
            .filter(|mode| !mode.is_empty())
            .unwrap_or_else(|| BOARD_MODE_NONE.to_string());

        Ok(Self {
            slot,
            present,
            linecard_type: table_field_or_na(state_db, LINECARD_TABLE, &key, "linecard-type").await?,
            slot_status: table_field_or_na(state_db, LINECARD_TABLE, &key, "slot-status").await?,
            board_mode,
            software_version: table_field_or_na(state_db, LINECARD_TABLE, &key, "software-version")
                .await?,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.slot_status.eq_ignore_ascii_case("READY")
    }

    /// The inserted card differs from the provisioned type, or is powered off
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.slot_status.as_str(), "Mismatch" | "PowerOff")
    }

    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Slot", self.slot.to_string()),
            ("Present", yes_no(self.present)),
            ("Linecard Type", self.linecard_type.clone()),
            ("Slot Status", self.slot_status.clone()),
            ("Ready", yes_no(self.is_ready())),
            ("Type Mismatch", yes_no(self.is_type_mismatch())),
            ("Board Mode", self.board_mode.clone()),
            ("Software Version", self.software_version.clone()),
        ]
    }
}

/// Identity of the chassis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChassisInfo {
    pub platform: String,
    pub part_number: String,
    pub serial_number: String,
    pub software_version: String,
}

impl ChassisInfo {
    /// Read the chassis record from the chassis STATE_DB
    pub async fn read(
        state_db: &dyn Rtdb,
        platform: Option<String>,
        upgrade_config: &Path,
    ) -> Result<Self> {
        let software_version = read_software_version(upgrade_config)
            .with_context(|| format!("Failed to read {}", upgrade_config.display()))?;

        Ok(Self {
            platform: platform.unwrap_or_else(|| NA_VALUE.to_string()),
            part_number: table_field_or_na(state_db, CHASSIS_TABLE, CHASSIS_KEY, "part-no").await?,
            serial_number: table_field_or_na(state_db, CHASSIS_TABLE, CHASSIS_KEY, "serial-no")
                .await?,
            software_version: if software_version.is_empty() {
                NA_VALUE.to_string()
            } else {
                software_version
            },
        })
    }

    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Platform", self.platform.clone()),
            ("Part Number", self.part_number.clone()),
            ("Serial Number", self.serial_number.clone()),
            ("Software Version", self.software_version.clone()),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
struct UpgradeConfig {
    #[serde(default)]
    chassis: UpgradeChassis,
}

#[derive(Debug, Default, Deserialize)]
struct UpgradeChassis {
    #[serde(default)]
    ver: String,
}

/// Installed chassis software version; empty when the installer left no state
pub fn read_software_version(path: &Path) -> OtnResult<String> {
    if !path.exists() {
        debug!("No installer state at {}", path.display());
        return Ok(String::new());
    }
    let content = std::fs::read_to_string(path)?;
    let config: UpgradeConfig = serde_json::from_str(&content)
        .map_err(|e| OtnError::parse(path.display().to_string(), e))?;
    Ok(config.chassis.ver)
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}
