//! Periodic background fetch.

use std::time::Duration;

use liftoff_client::Fetcher;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn a task that refreshes the cache every `period`.
///
/// The first refresh runs immediately, which doubles as the startup fetch.
/// Failures are logged and the loop carries on; abort the returned handle
/// to stop it.
pub fn spawn(fetcher: Fetcher, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            tracing::info!(period_secs = period.as_secs(), "scheduled news fetch");

            match fetcher.refresh_default().await {
                Ok(count) => tracing::debug!(articles = count, "scheduled fetch complete"),
                Err(e) => tracing::warn!(error = %e, "scheduled fetch failed; keeping cached articles"),
            }
        }
    })
}
