//! Progress events
//!
//! The presentation layer subscribes here instead of being called directly.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message", rename_all = "kebab-case")]
pub enum ProgressEvent {
    /// Stored goals were read back and applied
    Loaded,
    /// Goals, prices or wealth changed; re-render
    Refresh,
    /// A request was rejected; show as a non-blocking notice
    Warning(String),
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ProgressEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: ProgressEvent) {
        // No listeners is fine: nothing is rendering yet
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
