use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::modules::carts::service::CartService;

/// Remove expired carts every `interval` until the task is aborted.
/// A failed sweep is logged and retried on the next tick.
pub fn spawn_cart_sweeper(
    service: Arc<dyn CartService>,
    interval: Duration,
    max_age: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match service.clean_expired_carts(max_age).await {
                Ok(0) => tracing::debug!("no expired carts"),
                Ok(removed) => tracing::info!(removed, "cart sweep finished"),
                Err(err) => tracing::error!(error = %err, "cart sweep failed"),
            }
        }
    })
}
