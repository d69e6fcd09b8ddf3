use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::cache::{LiveMatchCache, RefreshOutcome};

/// Owns the background task that keeps the live-match cache warm.
///
/// The first refresh happens one full period after `spawn`. Failures only
/// log. The task runs until `shutdown` is called or the handle is dropped.
pub struct RefresherHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefresherHandle {
    pub fn spawn(cache: LiveMatchCache, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!("Live match refresher started (interval={:?})", period);
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match cache.refresh().await {
                            RefreshOutcome::Replaced(n) => {
                                debug!("Background refresh stored {} live matches", n)
                            }
                            RefreshOutcome::Empty | RefreshOutcome::Failed => {}
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            info!("Live match refresher stopped");
        });

        RefresherHandle { shutdown_tx, task }
    }

    /// Stop the loop and wait for it to exit. A refresh already in flight is
    /// allowed to finish first.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            warn!("Live match refresher ended abnormally: {}", e);
        }
    }
}
