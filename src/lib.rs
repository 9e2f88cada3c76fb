//! Purchase Progress Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - valuation: Wealth calculation with change-detection caching
//! - store: The ordered, groupable goal list
//! - repository: Key/value persistence abstractions and implementations
//! - catalog: Item names, images and search
//! - tracker: Single-writer service, events and scheduling

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

pub mod catalog;
pub mod domain;
pub mod repository;
pub mod store;
pub mod tracker;
pub mod valuation;

use catalog::ItemCatalog;
use repository::{KvState, SqliteStore};
use tracker::{
    spawn_price_refresh, spawn_worker, EventBus, ProgressEvent, Tracker, TrackerHandle, DEFAULT_REFRESH_INTERVAL,
};
use valuation::PriceCache;

/// Startup options
#[derive(Debug, Clone)]
pub struct TrackerOptions {
    /// SQLite file holding goals and settings
    pub db_path: PathBuf,
    /// Rolling log directory; `None` leaves logging to the host
    pub log_dir: Option<PathBuf>,
    pub app_name: String,
    pub refresh_interval: Duration,
}

impl TrackerOptions {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            log_dir: None,
            app_name: "PurchaseProgress".to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// Running tracker: the handle the presentation layer uses, plus the
/// background tasks behind it
pub struct App {
    pub handle: TrackerHandle,
    pub state: KvState,
    worker: JoinHandle<()>,
    refresh: JoinHandle<()>,
}

impl App {
    pub fn shutdown(self) {
        self.refresh.abort();
        self.worker.abort();
    }
}

/// Start the tracker. Must be called from within a Tokio runtime.
///
/// Returns immediately; storage opens in the background and the stored
/// goals are loaded once it is ready. Listen for `ProgressEvent::Loaded`.
pub fn start(options: TrackerOptions, prices: Arc<dyn PriceCache>, catalog: Arc<dyn ItemCatalog>) -> App {
    if let Some(log_dir) = &options.log_dir {
        if let Err(e) = rolling_logger::init_logger(log_dir, &options.app_name) {
            eprintln!("Failed to init rolling logger: {}", e);
        }
    }

    let state = KvState::new();
    let tracker = Tracker::new(state.clone(), prices, catalog, EventBus::new());
    let (handle, worker) = spawn_worker(tracker);
    let refresh = spawn_price_refresh(handle.clone(), options.refresh_interval);

    let init_state = state.clone();
    let init_handle = handle.clone();
    let db_path = options.db_path.clone();
    tokio::spawn(async move {
        log::info!("Opening storage at {}", db_path.display());
        match tokio::task::spawn_blocking(move || SqliteStore::open(&db_path)).await {
            Ok(Ok(store)) => {
                init_state.attach(Arc::new(store)).await;
                let _ = rolling_logger::info("Storage ready");
                init_handle.load();
            }
            Ok(Err(e)) => storage_failed(&init_handle, format!("Storage init failed: {}", e)),
            Err(e) => storage_failed(&init_handle, format!("Storage init task failed: {}", e)),
        }
    });

    App {
        handle,
        state,
        worker,
        refresh,
    }
}

/// Goals stay in memory only; tell the presentation layer they will not be saved
fn storage_failed(handle: &TrackerHandle, message: String) {
    if rolling_logger::error(&message).is_err() {
        log::error!("{}", message);
    }
    handle
        .events()
        .emit(ProgressEvent::Warning(format!("{}. Goals will not be saved this session.", message)));
}
