//! Storage port - key-value persistence abstraction

use async_trait::async_trait;

use crate::domain::result::Result;

/// Key-value storage abstraction
///
/// The store holds whole-value snapshots under fixed string keys; every
/// write replaces the full value. Implementations (adapters) provide the
/// actual persistence: JSON files for runtime use, an in-memory map for
/// tests.
///
/// No locking or transactions are offered. Callers that read, check, and
/// write back a value can interleave with other callers; the last write
/// wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if present
    async fn remove(&self, key: &str) -> Result<()>;
}
