//! Platform capability descriptors
//!
//! Each platform ships a `chassis_cli_capability.json` describing its slot
//! layout, plus one `cli_capability.json` per line card type. Only the fields
//! the CLI reads are modelled; everything else in the files is ignored.

use errors::{OtnError, OtnResult};
use otn_rtdb::Entity;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const CHASSIS_CAPABILITY_FILE: &str = "chassis_cli_capability.json";
pub const LINECARD_CAPABILITY_FILE: &str = "cli_capability.json";
pub const LINECARD_DIR: &str = "linecards";

/// Read a JSON descriptor, treating a missing file as the default value
fn load_or_default<T>(path: &Path) -> OtnResult<T>
where
    T: DeserializeOwned + Default,
{
    if !path.is_file() {
        debug!("No capability file at {}", path.display());
        return Ok(T::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| OtnError::parse(path.display().to_string(), e))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlotDescriptor {
    pub id: u32,
}

/// Slot layout of the chassis
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChassisCapability {
    pub max_slot_id: Option<u32>,
    /// Line card slots
    pub slot: Vec<SlotDescriptor>,
    pub psu_id_list: Vec<u32>,
    pub fan_id_list: Vec<u32>,
    /// Line card types the chassis accepts
    pub linecard_type: Vec<String>,
}

impl ChassisCapability {
    pub fn load(platform_dir: &Path) -> OtnResult<Self> {
        load_or_default(&platform_dir.join(CHASSIS_CAPABILITY_FILE))
    }

    /// Slot ids of line card slots
    pub fn linecard_slots(&self) -> Vec<u32> {
        self.slot.iter().map(|s| s.id).collect()
    }

    pub fn is_linecard(&self, slot: u32) -> bool {
        self.slot.iter().any(|s| s.id == slot)
    }

    pub fn is_psu(&self, slot: u32) -> bool {
        self.psu_id_list.contains(&slot)
    }

    pub fn is_fan(&self, slot: u32) -> bool {
        self.fan_id_list.contains(&slot)
    }

    /// Check a slot number given on the command line
    ///
    /// `max_slot_id` bounds the range when declared, otherwise the slot must
    /// be one of the declared line card slots.
    pub fn validate_slot(&self, slot: u32) -> OtnResult<Entity> {
        match self.max_slot_id {
            Some(max) if (1..=max).contains(&slot) => Ok(Entity::Slot(slot)),
            Some(max) => Err(OtnError::invalid_slot(
                slot,
                format!("expected a slot between 1 and {max}"),
            )),
            None if self.is_linecard(slot) => Ok(Entity::Slot(slot)),
            None if self.slot.is_empty() => Err(OtnError::invalid_slot(
                slot,
                "the platform declares no slots",
            )),
            None => Err(OtnError::invalid_slot(
                slot,
                format!("expected one of {:?}", self.linecard_slots()),
            )),
        }
    }
}

/// Descriptor of one line card type
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinecardCapability {
    /// Board modes the card can run in
    pub board_mode_list: Vec<String>,
}

impl LinecardCapability {
    /// Load the descriptor of `card_type`; the directory name is upper case
    pub fn load(platform_dir: &Path, card_type: &str) -> OtnResult<Self> {
        load_or_default(
            &platform_dir
                .join(LINECARD_DIR)
                .join(card_type.to_uppercase())
                .join(LINECARD_CAPABILITY_FILE),
        )
    }
}
