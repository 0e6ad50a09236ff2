//! Per-invocation context: configuration, database access and platform files

use crate::capability::{ChassisCapability, LinecardCapability};
use anyhow::{Context as _, Result};
use common::OtnConfig;
use otn_alarm::{AlarmProfile, TimestampZone, PROFILE_FILE_NAME};
use otn_rtdb::{DbIndex, Entity, RedisEndpoints, RedisProvider, Rtdb, RtdbProvider};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const DEVICE_METADATA_TABLE: &str = "DEVICE_METADATA";
const DEVICE_METADATA_KEY: &str = "localhost";
const PLATFORM_FIELD: &str = "platform";

pub struct CliContext {
    config: OtnConfig,
    provider: Arc<dyn RtdbProvider>,
}

impl CliContext {
    pub fn new(config: OtnConfig, provider: Arc<dyn RtdbProvider>) -> Self {
        Self { config, provider }
    }

    /// Context backed by the Redis servers named in the configuration
    pub fn from_config(config: OtnConfig) -> Self {
        let provider = RedisProvider::new(RedisEndpoints {
            chassis_url: config.redis.chassis_url.clone(),
            slot_url_template: config.redis.slot_url_template.clone(),
            connection_timeout: config.redis.connection_timeout,
        });
        Self::new(config, Arc::new(provider))
    }

    pub fn config(&self) -> &OtnConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn RtdbProvider {
        self.provider.as_ref()
    }

    pub fn timestamp_zone(&self) -> TimestampZone {
        if self.config.utc_timestamps {
            TimestampZone::Utc
        } else {
            TimestampZone::Local
        }
    }

    /// Platform name from the configuration, else from the chassis CONFIG_DB
    pub async fn platform(&self) -> Result<Option<String>> {
        if let Some(platform) = &self.config.platform {
            return Ok(Some(platform.clone()));
        }

        let config_db: Arc<dyn Rtdb> = self
            .provider
            .open(Entity::Chassis, DbIndex::Config)
            .await?;
        let platform = config_db
            .table_field(DEVICE_METADATA_TABLE, DEVICE_METADATA_KEY, PLATFORM_FIELD)
            .await
            .context("Failed to read the platform name")?;
        if platform.is_none() {
            debug!("No platform in {}|{}", DEVICE_METADATA_TABLE, DEVICE_METADATA_KEY);
        }
        Ok(platform)
    }

    /// Descriptor directory of the platform, if the platform is known
    pub async fn platform_dir(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .platform()
            .await?
            .map(|platform| self.config.platform_dir(&platform)))
    }

    pub async fn alarm_profile(&self) -> Result<AlarmProfile> {
        match self.platform_dir().await? {
            Some(dir) => Ok(AlarmProfile::load(dir.join(PROFILE_FILE_NAME))?),
            None => Ok(AlarmProfile::default()),
        }
    }

    pub async fn chassis_capability(&self) -> Result<ChassisCapability> {
        match self.platform_dir().await? {
            Some(dir) => Ok(ChassisCapability::load(&dir)?),
            None => Ok(ChassisCapability::default()),
        }
    }

    pub async fn linecard_capability(&self, card_type: &str) -> Result<LinecardCapability> {
        match self.platform_dir().await? {
            Some(dir) => Ok(LinecardCapability::load(&dir, card_type)?),
            None => Ok(LinecardCapability::default()),
        }
    }
}
