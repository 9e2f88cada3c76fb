//! Tracker Layer
//!
//! The single-writer service the presentation layer talks to.

mod events;
mod scheduler;
mod service;
mod worker;


pub use events::{EventBus, ProgressEvent};
pub use scheduler::{spawn_price_refresh, DEFAULT_REFRESH_INTERVAL};
pub use service::{Tracker, TrackerSnapshot};
pub use worker::{spawn_worker, Command, TrackerHandle};
