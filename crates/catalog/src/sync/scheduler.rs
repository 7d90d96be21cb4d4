use crate::abstract_trait::sync::DynSyncService;
use crate::domain::sync::SyncTrigger;
use shared::errors::SyncError;
use std::time::Duration;
use tokio::{
    sync::broadcast,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{error, info};

/// Runs one pass at startup, then triggers a pass every `interval` until shutdown.
pub struct SyncScheduler {
    sync: DynSyncService,
    interval: Duration,
}

impl SyncScheduler {
    pub fn new(sync: DynSyncService, interval: Duration) -> Self {
        Self { sync, interval }
    }

    pub fn spawn(self, shutdown_rx: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown_rx))
    }

    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) {
        info!("⏰ Running startup sync");

        tokio::select! {
            result = self.sync.trigger() => log_trigger(result),
            _ = shutdown_rx.recv() => {
                info!("🛑 Sync scheduler stopped during startup pass");
                return;
            }
        }

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("⏰ Sync scheduled every {:?}", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let sync = self.sync.clone();
                    tokio::spawn(async move {
                        log_trigger(sync.trigger().await);
                    });
                }
                _ = shutdown_rx.recv() => {
                    info!("🛑 Sync scheduler shutting down");
                    break;
                }
            }
        }
    }
}

fn log_trigger(result: Result<SyncTrigger, SyncError>) {
    match result {
        Ok(SyncTrigger::Completed(summary)) => {
            info!("✅ Scheduled sync applied {} records", summary.applied)
        }
        Ok(SyncTrigger::Skipped) => info!("⏭️ Scheduled sync skipped, previous pass still running"),
        Err(e) => error!("❌ Scheduled sync failed: {e}"),
    }
}
