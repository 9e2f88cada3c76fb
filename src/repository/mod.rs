//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod kv_state;
mod memory_store;
mod sqlite_store;
mod goal_repo;
mod settings;


pub use traits::KeyValueStore;
pub use kv_state::KvState;
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
pub use goal_repo::{config_key, GoalRepository, GroupRecord, PersistedGoals, CONFIG_GROUP};
pub use settings::Settings;
