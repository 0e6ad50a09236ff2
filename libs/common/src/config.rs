//! Layered configuration for the chassis tools

use errors::{config_error, OtnError, OtnResult};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// System-wide configuration file, merged when present
pub const SYSTEM_CONFIG_PATH: &str = "/etc/otnctl/otnctl.yaml";

/// Prefix of environment overrides (`OTN_REDIS__CHASSIS_URL`, ...)
pub const ENV_PREFIX: &str = "OTN_";

/// Database server locations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RedisSettings {
    /// Control unit server
    pub chassis_url: String,
    /// Line card server, `{slot}` is replaced with the slot number
    pub slot_url_template: String,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            chassis_url: "redis://127.0.0.1:6379".to_string(),
            slot_url_template: "redis://117.103.88.{slot}:6379".to_string(),
            connection_timeout: 5,
        }
    }
}

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtnConfig {
    pub redis: RedisSettings,
    /// Root of the per-platform device descriptors
    pub device_dir: PathBuf,
    /// Installer state file holding the chassis software version
    pub upgrade_config: PathBuf,
    /// Platform name; read from the chassis CONFIG_DB when unset
    pub platform: Option<String>,
    /// Print alarm times in UTC instead of local time
    pub utc_timestamps: bool,
}

impl Default for OtnConfig {
    fn default() -> Self {
        Self {
            redis: RedisSettings::default(),
            device_dir: PathBuf::from("/usr/share/sonic/device"),
            upgrade_config: PathBuf::from("/host/aonos_installer/upgradecfg"),
            platform: None,
            utc_timestamps: false,
        }
    }
}

impl OtnConfig {
    /// Directory holding the descriptors of one platform
    pub fn platform_dir(&self, platform: &str) -> PathBuf {
        self.device_dir.join(platform)
    }
}

/// Build the figment for a given system file and optional override file
///
/// Priority (highest to lowest):
/// 1. Environment variables (`OTN_` prefix, `__` for nesting)
/// 2. Override file (e.g. from `--config`)
/// 3. System file
/// 4. Default values
pub fn figment(system_file: &Path, override_file: Option<&Path>) -> OtnResult<Figment> {
    let mut figment =
        Figment::from(Serialized::defaults(OtnConfig::default())).merge(Yaml::file(system_file));

    if let Some(path) = override_file {
        if !path.exists() {
            return Err(OtnError::MissingConfig(path.display().to_string()));
        }
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| config_error!("Config file must have an extension"))?;

        figment = match extension {
            "toml" => figment.merge(Toml::file(path)),
            "yaml" | "yml" => figment.merge(Yaml::file(path)),
            "json" => figment.merge(Json::file(path)),
            _ => {
                return Err(config_error!(
                    "Unsupported config file format: {}",
                    extension
                ))
            },
        };
    }

    Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
}

/// Load configuration from the system file, an optional override and the environment
pub fn load_config(override_file: Option<&Path>) -> OtnResult<OtnConfig> {
    let config: OtnConfig = figment(Path::new(SYSTEM_CONFIG_PATH), override_file)?
        .extract()
        .map_err(|e| config_error!("Failed to load configuration: {}", e))?;
    Ok(config)
}
