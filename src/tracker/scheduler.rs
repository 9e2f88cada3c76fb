//! Periodic price refresh.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::worker::TrackerHandle;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Queue a price refresh every `period` until the worker stops.
/// The first refresh happens one period from now; loading already re-prices.
pub fn spawn_price_refresh(handle: TrackerHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if !handle.refresh_prices() {
                break;
            }
        }
    })
}
