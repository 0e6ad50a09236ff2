//! Platform alarm profile
//!
//! `alarm_profile.json` maps every alarm type id the platform can raise to its
//! service-affecting flag and category:
//!
//! ```json
//! { "TEMP_HIGH": { "SA": "NSA", "Type": "Communications" } }
//! ```

use errors::{OtnError, OtnResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// File name of the profile inside the platform directory
pub const PROFILE_FILE_NAME: &str = "alarm_profile.json";

/// Classification of one alarm type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Service-affecting flag (`SA` / `NSA`)
    #[serde(rename = "SA")]
    pub sa: String,
    /// Alarm category
    #[serde(rename = "Type")]
    pub kind: String,
}

impl Classification {
    pub fn new(sa: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            sa: sa.into(),
            kind: kind.into(),
        }
    }
}

/// Read-only alarm type table, loaded once per invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmProfile {
    entries: HashMap<String, Classification>,
}

impl AlarmProfile {
    /// Load the profile, treating a missing file as an empty profile
    pub fn load(path: impl AsRef<Path>) -> OtnResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            debug!("No alarm profile at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let entries: HashMap<String, Classification> = serde_json::from_str(&content)
            .map_err(|e| OtnError::parse(path.display().to_string(), e))?;
        debug!("Loaded {} alarm types from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Classification)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, type_id: &str) -> Option<&Classification> {
        self.entries.get(type_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_profile() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"TEMP_HIGH": {{"SA": "NSA", "Type": "Communications"}},
                "LOS": {{"SA": "SA", "Type": "Equipment", "Severity": "CRITICAL"}}}}"#
        )
        .unwrap();

        let profile = AlarmProfile::load(file.path()).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(
            profile.get("TEMP_HIGH"),
            Some(&Classification::new("NSA", "Communications"))
        );
        assert_eq!(profile.get("LOS").unwrap().sa, "SA");
        assert!(profile.get("FAN_FAIL").is_none());
    }

    #[test]
    fn test_missing_profile_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let profile = AlarmProfile::load(dir.path().join(PROFILE_FILE_NAME)).unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn test_invalid_profile() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = AlarmProfile::load(file.path()).unwrap_err();
        assert!(matches!(err, OtnError::ParseError { .. }));
        assert_eq!(err.exit_code(), errors::CONFIG_ERROR_EXIT_CODE);
    }
}
