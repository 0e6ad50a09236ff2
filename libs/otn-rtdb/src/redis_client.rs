//! Redis client module with connection pooling
//!
//! Provides a minimal async Redis client with only the read methods the
//! chassis tools use.

use anyhow::{Context, Result};
use bb8::{Pool, PooledConnection};
use bb8_redis::RedisConnectionManager;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// Redis connection pool configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL including the database number (e.g., "redis://127.0.0.1:6379/6")
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            // One-shot CLI invocations issue their commands in sequence
            max_connections: 2,
            connection_timeout: 5,
        }
    }
}

impl RedisConfig {
    /// Create config from URL with default pool settings
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Redis asynchronous client with connection pooling
pub struct RedisClient {
    pool: Arc<Pool<RedisConnectionManager>>,
    url: String,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("url", &self.url)
            .field("pool_state", &self.pool.state())
            .finish()
    }
}

impl RedisClient {
    /// Create a new client with default configuration
    pub async fn new(url: &str) -> Result<Self> {
        Self::with_config(RedisConfig::from_url(url)).await
    }

    /// Create a new client with custom configuration
    pub async fn with_config(config: RedisConfig) -> Result<Self> {
        let manager = RedisConnectionManager::new(config.url.as_str())
            .with_context(|| format!("Failed to create Redis connection manager for {}", config.url))?;

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(Duration::from_secs(config.connection_timeout))
            .build(manager)
            .await
            .context("Failed to build Redis connection pool")?;

        let client = Self {
            pool: Arc::new(pool),
            url: config.url,
        };

        // Test the connection
        client.ping().await?;

        Ok(client)
    }

    /// URL this client is connected to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get a connection from the pool
    pub async fn get_connection(&self) -> Result<PooledConnection<'_, RedisConnectionManager>> {
        self.pool
            .get()
            .await
            .with_context(|| format!("Failed to get connection from pool for {}", self.url))
    }

    /// PING operation - test connection
    pub async fn ping(&self) -> Result<String> {
        let mut conn = self.get_connection().await?;
        redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .with_context(|| format!("Failed to PING Redis server at {}", self.url))
    }

    /// Hash operation - get field
    pub async fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        redis::cmd("HGET")
            .arg(key)
            .arg(field)
            .query_async(&mut *conn)
            .await
            .with_context(|| format!("Failed to HGET field {} from key: {}", field, key))
    }

    /// Hash operation - get all fields
    pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut conn = self.get_connection().await?;
        redis::cmd("HGETALL")
            .arg(key)
            .query_async(&mut *conn)
            .await
            .with_context(|| format!("Failed to HGETALL from key: {}", key))
    }

    /// Use SCAN for production-safe key iteration
    ///
    /// SCAN may report a key more than once; each key is returned once.
    pub async fn scan_match(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let mut keys = HashSet::new();
        let mut cursor = 0u64;

        loop {
            let (new_cursor, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut *conn)
                .await
                .with_context(|| format!("Failed to SCAN with pattern: {}", pattern))?;

            keys.extend(batch);
            cursor = new_cursor;

            if cursor == 0 {
                break;
            }
        }

        Ok(keys.into_iter().collect())
    }

    /// Get pool state for monitoring
    pub fn pool_state(&self) -> bb8::State {
        self.pool.state()
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_config_from_url() {
        let config = RedisConfig::from_url("redis://117.103.88.3:6379/10");
        assert_eq!(config.url, "redis://117.103.88.3:6379/10");
        assert_eq!(config.connection_timeout, 5);
    }

    #[tokio::test]
    #[ignore] // Requires Redis server
    async fn test_ping() {
        let client = RedisClient::new("redis://127.0.0.1:6379/6").await.unwrap();
        assert_eq!(client.ping().await.unwrap(), "PONG");
        assert!(client.pool_state().connections <= 2);
    }
}
