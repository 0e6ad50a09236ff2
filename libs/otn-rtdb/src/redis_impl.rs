//! Redis implementation of the RTDB trait

use crate::db::DbIndex;
use crate::redis_client::{RedisClient, RedisConfig};
use crate::traits::*;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Redis-backed RTDB bound to one numbered database
pub struct RedisRtdb {
    client: Arc<RedisClient>,
    separator: &'static str,
}

impl RedisRtdb {
    /// Connect to `{base_url}/{db}` and verify the server answers
    pub async fn connect(base_url: &str, db: DbIndex, connection_timeout: u64) -> Result<Self> {
        let config = RedisConfig {
            url: database_url(base_url, db),
            connection_timeout,
            ..Default::default()
        };
        let client = RedisClient::with_config(config).await?;
        Ok(Self::from_client(Arc::new(client), db))
    }

    /// Create from existing RedisClient
    pub fn from_client(client: Arc<RedisClient>, db: DbIndex) -> Self {
        Self {
            client,
            separator: db.separator(),
        }
    }
}

/// Append the database selector to a server URL
///
/// TCP URLs take the number as a path segment, unix socket URLs take a `db`
/// query parameter.
pub fn database_url(base_url: &str, db: DbIndex) -> String {
    if base_url.starts_with("unix:") || base_url.starts_with("redis+unix:") {
        let sep = if base_url.contains('?') { '&' } else { '?' };
        format!("{}{}db={}", base_url, sep, db.index())
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), db.index())
    }
}

#[async_trait]
impl Rtdb for RedisRtdb {
    async fn table_keys(&self, table: &str) -> Result<Vec<String>> {
        let prefix = format!("{}{}", table, self.separator);
        let pattern = format!("{}*", prefix);
        trace!("SCAN MATCH {} on {}", pattern, self.client.url());

        let keys = self.client.scan_match(&pattern).await?;
        Ok(keys
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }

    async fn table_fields(&self, table: &str, key: &str) -> Result<HashMap<String, String>> {
        self.client
            .hgetall(&table_key(table, self.separator, key))
            .await
    }

    async fn table_field(&self, table: &str, key: &str, field: &str) -> Result<Option<String>> {
        self.client
            .hget(&table_key(table, self.separator, key), field)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_database_url_tcp() {
        assert_eq!(
            database_url("redis://127.0.0.1:6379", DbIndex::State),
            "redis://127.0.0.1:6379/6"
        );
        assert_eq!(
            database_url("redis://117.103.88.2:6379/", DbIndex::History),
            "redis://117.103.88.2:6379/10"
        );
    }

    #[test]
    fn test_database_url_unix_socket() {
        assert_eq!(
            database_url("unix:///var/run/redis/redis.sock", DbIndex::Config),
            "unix:///var/run/redis/redis.sock?db=4"
        );
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_redis_table_keys() {
        let rtdb = RedisRtdb::connect("redis://127.0.0.1:6379", DbIndex::State, 5)
            .await
            .unwrap();
        let keys = rtdb.table_keys("CURALARM").await.unwrap();
        assert!(keys.iter().all(|k| !k.starts_with("CURALARM|")));
    }
}
