//! Opening the database of an entity
//!
//! Chassis databases live on the control unit's Redis server, each line card
//! runs its own server reachable on the internal network. The provider hides
//! that layout from the alarm and inventory code.

use crate::db::DbIndex;
use crate::entity::Entity;
use crate::memory_impl::MemoryRtdb;
use crate::traits::Rtdb;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

#[cfg(feature = "redis-backend")]
use {crate::redis_impl::RedisRtdb, tracing::debug};

/// Source of per-entity database handles
#[async_trait]
pub trait RtdbProvider: Send + Sync {
    /// Open (or reuse) the given database of an entity
    async fn open(&self, entity: Entity, db: DbIndex) -> Result<Arc<dyn Rtdb>>;
}

/// Server locations of the chassis and slot databases
#[cfg(feature = "redis-backend")]
#[derive(Debug, Clone)]
pub struct RedisEndpoints {
    /// Control unit server, e.g. "redis://127.0.0.1:6379"
    pub chassis_url: String,
    /// Line card server with a `{slot}` placeholder
    pub slot_url_template: String,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

#[cfg(feature = "redis-backend")]
impl RedisEndpoints {
    /// Server URL of an entity (without database number)
    pub fn server_url(&self, entity: Entity) -> String {
        match entity {
            Entity::Chassis => self.chassis_url.clone(),
            Entity::Slot(slot) => self
                .slot_url_template
                .replace("{slot}", &slot.to_string()),
        }
    }
}

/// Redis-backed provider, caching one connection pool per database
#[cfg(feature = "redis-backend")]
pub struct RedisProvider {
    endpoints: RedisEndpoints,
    connections: DashMap<(Entity, DbIndex), Arc<RedisRtdb>>,
}

#[cfg(feature = "redis-backend")]
impl RedisProvider {
    pub fn new(endpoints: RedisEndpoints) -> Self {
        Self {
            endpoints,
            connections: DashMap::new(),
        }
    }
}

#[cfg(feature = "redis-backend")]
#[async_trait]
impl RtdbProvider for RedisProvider {
    async fn open(&self, entity: Entity, db: DbIndex) -> Result<Arc<dyn Rtdb>> {
        if let Some(existing) = self.connections.get(&(entity, db)) {
            let rtdb: Arc<dyn Rtdb> = existing.value().clone();
            return Ok(rtdb);
        }

        let url = self.endpoints.server_url(entity);
        debug!("Opening {} of {} at {}", db, entity, url);
        let rtdb = Arc::new(
            RedisRtdb::connect(&url, db, self.endpoints.connection_timeout)
                .await
                .map_err(|e| {
                    anyhow::Error::new(errors::OtnError::ConnectionFailed {
                        endpoint: format!("{} {}", url, db),
                        reason: format!("{:#}", e),
                    })
                })?,
        );
        self.connections.insert((entity, db), rtdb.clone());
        Ok(rtdb)
    }
}

/// In-memory provider; databases are created empty on first use
#[derive(Default)]
pub struct MemoryProvider {
    databases: DashMap<(Entity, DbIndex), Arc<MemoryRtdb>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concrete handle to an entity database, for seeding test data
    pub fn database(&self, entity: Entity, db: DbIndex) -> Arc<MemoryRtdb> {
        self.databases
            .entry((entity, db))
            .or_insert_with(|| Arc::new(MemoryRtdb::with_separator(db.separator())))
            .value()
            .clone()
    }
}

#[async_trait]
impl RtdbProvider for MemoryProvider {
    async fn open(&self, entity: Entity, db: DbIndex) -> Result<Arc<dyn Rtdb>> {
        let rtdb: Arc<dyn Rtdb> = self.database(entity, db);
        Ok(rtdb)
    }
}
