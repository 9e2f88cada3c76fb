//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod goal_item;
mod goal_group;
mod container;
mod progress;

pub use entity::{Entity, DomainError, DomainResult};
pub use goal_item::{GoalItem, ItemId};
pub use goal_group::{GoalGroup, GroupId, normalize_group_name, MAX_GROUP_NAME_LENGTH};
pub use container::ContainerItem;
pub use progress::{progress_percent, GroupProgress, ItemProgress, ProgressReport};
