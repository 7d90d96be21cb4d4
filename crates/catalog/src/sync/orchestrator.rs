use crate::{
    abstract_trait::{
        source::DynSourceClient,
        sync::{DynReconciler, SyncServiceTrait},
    },
    domain::{
        source::SourceQuery,
        sync::{SyncState, SyncStatus, SyncSummary, SyncTrigger},
    },
    sync::metrics::{PassOutcome, SyncMetrics},
};
use async_trait::async_trait;
use chrono::Utc;
use shared::errors::SyncError;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info, warn};

const EMPTY_PAGE_LIMIT: u8 = 2;

/// Clears the in-progress flag however the pass ends.
struct PassGuard<'a>(&'a AtomicBool);

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives full passes over the source. At most one pass runs at a time;
/// triggers that arrive while one is running are dropped.
///
/// Termination follows the total reported by the most recent page. If the
/// source's total drifts mid-pass the pass may stop early or fetch extra
/// pages; two consecutive empty pages always end it.
pub struct SyncOrchestrator {
    source: DynSourceClient,
    reconciler: DynReconciler,
    page_size: i64,
    in_progress: AtomicBool,
    status: Mutex<SyncStatus>,
    metrics: SyncMetrics,
}

impl SyncOrchestrator {
    pub fn new(
        source: DynSourceClient,
        reconciler: DynReconciler,
        page_size: i64,
        metrics: SyncMetrics,
    ) -> Self {
        Self {
            source,
            reconciler,
            page_size: page_size.max(1),
            in_progress: AtomicBool::new(false),
            status: Mutex::new(SyncStatus::default()),
            metrics,
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    async fn set_state(&self, state: SyncState) {
        self.status.lock().await.state = state;
    }

    async fn run_pass(&self) -> Result<SyncSummary, SyncError> {
        let mut summary = SyncSummary::default();
        let mut skip = 0i64;
        let mut collected = 0i64;
        let mut empty_pages = 0u8;

        loop {
            self.set_state(SyncState::Fetching).await;

            let page = self
                .source
                .fetch_page(&SourceQuery::products(skip, self.page_size))
                .await?;

            summary.pages_fetched += 1;
            summary.reported_total = page.total;
            self.metrics.pages_fetched.inc();
            self.metrics.reported_total.set(page.total);

            if page.items.is_empty() {
                empty_pages += 1;
            } else {
                empty_pages = 0;
            }

            self.set_state(SyncState::Reconciling).await;

            for record in &page.items {
                let outcome = self.reconciler.reconcile(record).await?;
                summary.record(outcome);
                self.metrics.record_item(outcome);
            }

            collected += page.items.len() as i64;
            skip += self.page_size;

            info!(
                "📄 Page {} reconciled | collected: {collected}, total: {}",
                summary.pages_fetched, page.total
            );

            if empty_pages >= EMPTY_PAGE_LIMIT {
                warn!(
                    "⚠️ Stopping after {EMPTY_PAGE_LIMIT} consecutive empty pages (collected {collected} of {})",
                    page.total
                );
                summary.stopped_on_empty_pages = true;
                break;
            }

            if collected >= page.total {
                break;
            }
        }

        Ok(summary)
    }
}

#[async_trait]
impl SyncServiceTrait for SyncOrchestrator {
    async fn trigger(&self) -> Result<SyncTrigger, SyncError> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("⏭️ Sync already in progress, skipping trigger");
            self.metrics.record_pass(PassOutcome::Skipped);
            return Ok(SyncTrigger::Skipped);
        }

        let _guard = PassGuard(&self.in_progress);
        let started = Instant::now();

        info!("🔄 Starting product sync pass");
        {
            let mut status = self.status.lock().await;
            status.last_started_at = Some(Utc::now());
        }

        let result = self.run_pass().await;
        self.metrics
            .pass_duration
            .observe(started.elapsed().as_secs_f64());

        let mut status = self.status.lock().await;
        status.last_finished_at = Some(Utc::now());

        match result {
            Ok(summary) => {
                info!(
                    "✅ Sync pass finished | pages: {}, processed: {}, applied: {}, skipped deleted: {}, rejected: {}",
                    summary.pages_fetched,
                    summary.processed,
                    summary.applied,
                    summary.skipped_deleted,
                    summary.rejected
                );
                status.state = SyncState::Idle;
                status.last_summary = Some(summary.clone());
                status.last_error = None;
                self.metrics.record_pass(PassOutcome::Completed);
                Ok(SyncTrigger::Completed(summary))
            }
            Err(e) => {
                error!("❌ Sync pass aborted: {e}");
                status.state = SyncState::Failed;
                status.last_error = Some(e.to_string());
                self.metrics.record_pass(PassOutcome::Failed);
                Err(e)
            }
        }
    }

    async fn status(&self) -> SyncStatus {
        let mut status = self.status.lock().await.clone();
        status.running = self.is_running();
        status
    }
}
