//! Chassis entities used to scope database queries

use std::fmt;

/// The whole chassis, or one 1-based line-card slot
///
/// Bounds checking against the chassis capability happens where the slot is
/// parsed from user input; an `Entity` only selects which databases to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Chassis,
    Slot(u32),
}

impl Entity {
    /// Label used in report headers ("System" or "Slot N")
    pub fn label(&self) -> String {
        match self {
            Self::Chassis => "System".to_string(),
            Self::Slot(slot) => format!("Slot {}", slot),
        }
    }

    /// Slot number, if this entity is a slot
    pub fn slot(&self) -> Option<u32> {
        match self {
            Self::Chassis => None,
            Self::Slot(slot) => Some(*slot),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chassis => write!(f, "chassis"),
            Self::Slot(slot) => write!(f, "slot {}", slot),
        }
    }
}
