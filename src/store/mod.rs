//! Goal Store Module
//!
//! This module provides the in-memory goal list split into specialized sub-modules:
//! - goal_store: the aggregate, read access and rebuild from storage
//! - item_ops: top-level item operations
//! - group_ops: group lifecycle and membership
//! - positioning: sort and shift
//! - index: item key → owning sequence

mod goal_store;
mod group_ops;
mod index;
mod item_ops;
mod positioning;

pub use goal_store::{GoalStore, GroupParts};
pub use index::Owner;

// Re-export all operation traits so they can be used by importing GoalStore
pub use group_ops::GroupOperations;
pub use item_ops::ItemOperations;
pub use positioning::PositioningOperations;
