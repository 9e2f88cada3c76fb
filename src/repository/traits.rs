//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for flat key/value persistence.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::DomainResult;

/// Flat string key/value storage
///
/// All operations are async to support various backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` if the key was never written
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Insert or overwrite a value
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Delete a key; deleting a missing key is not an error
    async fn unset(&self, key: &str) -> DomainResult<()>;
}
