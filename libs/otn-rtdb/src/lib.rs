//! Chassis Realtime Database Access
//!
//! Provides a unified read interface over the chassis key-value databases,
//! supporting multiple backends (Redis, in-memory).
//!
//! # Key Components
//!
//! - **Rtdb trait**: table-oriented read interface (`TABLE|key` hashes)
//! - **DbIndex**: the numbered databases a chassis or slot exposes
//! - **Entity**: the chassis itself or one line-card slot
//! - **RtdbProvider**: opens the right database for an entity

pub mod traits;

#[cfg(feature = "redis-backend")]
pub mod redis_client;

#[cfg(feature = "redis-backend")]
pub mod redis_impl;

pub mod memory_impl;

pub mod db;

pub mod entity;

pub mod provider;

// Re-exports
pub use traits::Rtdb;

pub use db::DbIndex;
pub use entity::Entity;

#[cfg(feature = "redis-backend")]
pub use redis_client::{RedisClient, RedisConfig};

#[cfg(feature = "redis-backend")]
pub use redis_impl::RedisRtdb;

pub use memory_impl::{MemoryRtdb, MemoryStats};

#[cfg(feature = "redis-backend")]
pub use provider::{RedisEndpoints, RedisProvider};
pub use provider::{MemoryProvider, RtdbProvider};

/// Helper functions for common operations
pub mod helpers {
    use super::{MemoryRtdb, Rtdb};
    use std::sync::Arc;

    // ==================== Test Support ====================

    /// Create an in-memory RTDB for unit testing
    ///
    /// This creates a MemoryRtdb that doesn't require any external services.
    ///
    /// # Example
    /// ```
    /// use otn_rtdb::helpers::create_test_rtdb;
    ///
    /// let rtdb = create_test_rtdb();
    /// // Use rtdb in tests...
    /// ```
    pub fn create_test_rtdb() -> Arc<dyn Rtdb> {
        Arc::new(MemoryRtdb::new())
    }

    /// Create a concrete MemoryRtdb for unit testing
    ///
    /// Use this when the test needs to seed records before handing the
    /// store to the code under test.
    pub fn create_test_memory_rtdb() -> Arc<MemoryRtdb> {
        Arc::new(MemoryRtdb::new())
    }

    // ==================== Production Helpers ====================

    /// Read a single field, mapping absence to the `N/A` placeholder
    pub async fn table_field_or_na<R>(
        rtdb: &R,
        table: &str,
        key: &str,
        field: &str,
    ) -> anyhow::Result<String>
    where
        R: Rtdb + ?Sized,
    {
        Ok(rtdb
            .table_field(table, key, field)
            .await?
            .unwrap_or_else(|| NA_VALUE.to_string()))
    }

    /// Placeholder printed for values absent from the store
    pub const NA_VALUE: &str = "N/A";
}
