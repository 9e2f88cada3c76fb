//! Storage readiness
//!
//! The backend is attached once the surrounding session is far enough along
//! to hand out its storage. Until then every access reports
//! `NotYetAvailable` instead of reading or writing half-initialised data.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};
use super::traits::KeyValueStore;

/// Storage state wrapper, shared by the repositories
#[derive(Clone, Default)]
pub struct KvState {
    backend: Arc<Mutex<Option<Arc<dyn KeyValueStore>>>>,
}

impl KvState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with a backend already attached
    pub fn ready(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend: Arc::new(Mutex::new(Some(backend))),
        }
    }

    pub async fn attach(&self, backend: Arc<dyn KeyValueStore>) {
        *self.backend.lock().await = Some(backend);
    }

    pub async fn is_ready(&self) -> bool {
        self.backend.lock().await.is_some()
    }

    /// Get the backend, or `NotYetAvailable` if none is attached yet
    pub async fn get_backend(&self) -> DomainResult<Arc<dyn KeyValueStore>> {
        let guard = self.backend.lock().await;
        guard.clone().ok_or(DomainError::NotYetAvailable)
    }
}
