//! Trait definitions for RTDB abstraction

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Table-oriented read interface over one chassis database
///
/// Records are hashes stored under `{TABLE}{separator}{key}`. The separator
/// is fixed per database (see [`crate::DbIndex::separator`]); callers only
/// ever deal with bare table names and bare record keys.
///
/// Implementations:
/// - `RedisRtdb`: Production Redis backend
/// - `MemoryRtdb`: In-memory backend for testing
#[async_trait]
pub trait Rtdb: Send + Sync + 'static {
    /// List the record keys of a table, without the table prefix
    ///
    /// No ordering is guaranteed.
    async fn table_keys(&self, table: &str) -> Result<Vec<String>>;

    /// Fetch every field of one record
    ///
    /// A record that does not exist yields an empty map.
    async fn table_fields(&self, table: &str, key: &str) -> Result<HashMap<String, String>>;

    /// Fetch a single field of one record
    async fn table_field(&self, table: &str, key: &str, field: &str) -> Result<Option<String>>;
}

/// Compose the full store key of a table record
pub fn table_key(table: &str, separator: &str, key: &str) -> String {
    format!("{}{}{}", table, separator, key)
}
