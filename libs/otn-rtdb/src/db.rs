//! Numbered databases exposed by the chassis and by every line card

use serde::{Deserialize, Serialize};
use std::fmt;

/// Redis database index of a chassis or slot database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DbIndex {
    /// APPL_DB
    App,
    /// ASIC_DB
    Asic,
    /// COUNTERS_DB
    Counter,
    /// CONFIG_DB
    Config,
    /// FLEX_COUNTER_DB
    FlexCounter,
    /// STATE_DB
    State,
    /// Alarm and event history
    History,
}

impl DbIndex {
    /// Redis database number
    pub const fn index(self) -> u8 {
        match self {
            Self::App => 0,
            Self::Asic => 1,
            Self::Counter => 2,
            Self::Config => 4,
            Self::FlexCounter => 5,
            Self::State => 6,
            Self::History => 10,
        }
    }

    /// Separator between table name and record key
    pub const fn separator(self) -> &'static str {
        match self {
            Self::App => ":",
            _ => "|",
        }
    }
}

impl fmt::Display for DbIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::App => "APPL_DB",
            Self::Asic => "ASIC_DB",
            Self::Counter => "COUNTERS_DB",
            Self::Config => "CONFIG_DB",
            Self::FlexCounter => "FLEX_COUNTER_DB",
            Self::State => "STATE_DB",
            Self::History => "HISTORY_DB",
        };
        write!(f, "{}({})", name, self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_numbers() {
        assert_eq!(DbIndex::App.index(), 0);
        assert_eq!(DbIndex::Config.index(), 4);
        assert_eq!(DbIndex::State.index(), 6);
        assert_eq!(DbIndex::History.index(), 10);
    }

    #[test]
    fn test_separators() {
        assert_eq!(DbIndex::App.separator(), ":");
        assert_eq!(DbIndex::State.separator(), "|");
        assert_eq!(DbIndex::History.separator(), "|");
    }

    #[test]
    fn test_display() {
        assert_eq!(DbIndex::History.to_string(), "HISTORY_DB(10)");
        assert_eq!(DbIndex::State.to_string(), "STATE_DB(6)");
    }
}
