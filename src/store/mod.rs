//! Key-value store adapter — the capability boundary over the backend.
//!
//! The backend is a flat key-value store: every document of one type lives
//! under a single logical collection name, keyed by its storage id, as an
//! opaque serialized value. The adapter exposes exactly four operations —
//! `get`, `put`, `remove`, `values` — and nothing else. No two adapter calls
//! are atomic together; per-key atomicity of a single call is all a caller
//! may assume.

mod in_memory;

use std::fmt;

use async_trait::async_trait;

/// Error type for store adapter operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend-level failure (connectivity, lock poisoning).
    Backend(String),
    /// Serialization/deserialization of a stored document failed.
    Serde(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "store backend error: {}", msg),
            StoreError::Serde(msg) => write!(f, "store serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Collection-oriented operations over a flat key-value backend.
///
/// Values are opaque serialized documents; interpreting them is the
/// caller's concern. `values` is a full scan, linear in collection size,
/// with no ordering guarantee and no isolation from concurrent mutation.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `id`, or `None`. Absence is not an error.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Upsert the value under `id`. Returns whether the write succeeded.
    async fn put(&self, collection: &str, id: &str, value: Vec<u8>) -> Result<bool, StoreError>;

    /// Remove the value under `id`. Returns whether a value existed.
    async fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// All values currently in the collection, in no particular order.
    async fn values(&self, collection: &str) -> Result<Vec<Vec<u8>>, StoreError>;
}

pub use in_memory::InMemoryKeyValueStore;
