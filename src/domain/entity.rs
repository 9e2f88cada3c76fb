//! Domain Layer - Core Entity Trait and Errors
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

use super::goal_group::GroupId;
use super::goal_item::ItemId;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    /// Item key already tracked, either top-level or inside a group
    DuplicateItem(ItemId),
    /// Another group already carries this exact name
    DuplicateGroupName(String),
    /// Group name is empty after trimming
    InvalidName,
    /// Storage has not been attached yet; retry once the session is up
    NotYetAvailable,
    /// A stored field could not be parsed
    MalformedPersistedData { field: String, reason: String },
    GroupNotFound(GroupId),
    /// Shift requested past either end of a sequence
    OutOfRange { index: usize, len: usize },
    /// Backend failure (SQLite, I/O)
    Storage(String),
}

impl DomainError {
    /// Validation failures that are reported to the user as a non-blocking notice.
    pub fn is_user_warning(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateItem(_)
                | DomainError::DuplicateGroupName(_)
                | DomainError::InvalidName
        )
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::DuplicateItem(id) => write!(f, "Item {} is already being tracked", id),
            DomainError::DuplicateGroupName(name) => write!(f, "A group named '{}' already exists", name),
            DomainError::InvalidName => write!(f, "Group name must not be empty"),
            DomainError::NotYetAvailable => write!(f, "Storage not yet available"),
            DomainError::MalformedPersistedData { field, reason } => {
                write!(f, "Malformed stored data in '{}': {}", field, reason)
            }
            DomainError::GroupNotFound(id) => write!(f, "Group {} not found", id),
            DomainError::OutOfRange { index, len } => {
                write!(f, "Index {} out of range for sequence of length {}", index, len)
            }
            DomainError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
