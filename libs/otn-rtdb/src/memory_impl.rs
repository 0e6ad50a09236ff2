//! In-memory RTDB implementation
//!
//! Uses DashMap for concurrent access. Intended for tests and for running the
//! CLI against a captured snapshot.

use crate::traits::*;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory RTDB holding hashes keyed by their full `TABLE|key` name
pub struct MemoryRtdb {
    hash_store: Arc<DashMap<String, DashMap<String, String>>>,
    separator: &'static str,
}

impl MemoryRtdb {
    /// Create new in-memory RTDB using the `|` table separator
    pub fn new() -> Self {
        Self::with_separator("|")
    }

    /// Create new in-memory RTDB with an explicit table separator
    pub fn with_separator(separator: &'static str) -> Self {
        Self {
            hash_store: Arc::new(DashMap::new()),
            separator,
        }
    }

    /// Insert or replace one field of a record
    pub fn set_field(&self, table: &str, key: &str, field: &str, value: impl Into<String>) {
        self.hash_store
            .entry(table_key(table, self.separator, key))
            .or_default()
            .insert(field.to_string(), value.into());
    }

    /// Insert or replace a whole record
    pub fn insert_record<I, F, V>(&self, table: &str, key: &str, fields: I)
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<String>,
    {
        let record: DashMap<String, String> = fields
            .into_iter()
            .map(|(f, v)| (f.into(), v.into()))
            .collect();
        self.hash_store
            .insert(table_key(table, self.separator, key), record);
    }

    /// Get statistics about stored data
    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            record_count: self.hash_store.len(),
            field_count: self.hash_store.iter().map(|r| r.value().len()).sum(),
        }
    }
}

impl Default for MemoryRtdb {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about memory RTDB usage
#[derive(Debug, Clone)]
pub struct MemoryStats {
    pub record_count: usize,
    pub field_count: usize,
}

#[async_trait]
impl Rtdb for MemoryRtdb {
    async fn table_keys(&self, table: &str) -> Result<Vec<String>> {
        let prefix = format!("{}{}", table, self.separator);
        Ok(self
            .hash_store
            .iter()
            .filter_map(|entry| entry.key().strip_prefix(&prefix).map(str::to_string))
            .collect())
    }

    async fn table_fields(&self, table: &str, key: &str) -> Result<HashMap<String, String>> {
        Ok(self
            .hash_store
            .get(&table_key(table, self.separator, key))
            .map(|record| {
                record
                    .iter()
                    .map(|f| (f.key().clone(), f.value().clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn table_field(&self, table: &str, key: &str, field: &str) -> Result<Option<String>> {
        Ok(self
            .hash_store
            .get(&table_key(table, self.separator, key))
            .and_then(|record| record.get(field).map(|v| v.value().clone())))
    }
}
