mod common;

use async_trait::async_trait;
use catalog::{
    abstract_trait::{
        product::repository::{
            DynProductCommandRepository, ProductCommandRepositoryTrait,
            ProductQueryRepositoryTrait,
        },
        source::DynSourceClient,
        sync::{DynReconciler, SyncServiceTrait},
    },
    domain::{
        filter::{DeletedFilter, ProductFilter},
        requests::product::UpsertProductRequest,
        sync::{SyncState, SyncStatus, SyncSummary, SyncTrigger, UpsertOutcome},
    },
    repository::memory::MemoryProductStore,
    sync::{Reconciler, SyncMetrics, SyncOrchestrator, SyncScheduler},
};
use common::{GatedSource, ScriptedSource, page, record};
use pretty_assertions::assert_eq;
use shared::errors::{RepositoryError, SourceError, SyncError};
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::{
    sync::{broadcast, mpsc},
    time::Instant,
};

fn orchestrator(
    source: DynSourceClient,
    store: Arc<MemoryProductStore>,
    page_size: i64,
) -> Arc<SyncOrchestrator> {
    let reconciler = Arc::new(Reconciler::new(store)) as DynReconciler;
    Arc::new(SyncOrchestrator::new(
        source,
        reconciler,
        page_size,
        SyncMetrics::new(),
    ))
}

fn completed(trigger: SyncTrigger) -> SyncSummary {
    match trigger {
        SyncTrigger::Completed(summary) => summary,
        SyncTrigger::Skipped => panic!("expected a completed pass"),
    }
}

fn everything() -> ProductFilter {
    ProductFilter::default().with_deleted(DeletedFilter::IncludeDeleted)
}

#[tokio::test]
async fn two_page_sync_fetches_by_production_page_size() {
    let source = ScriptedSource::new(vec![
        Ok(page(vec![record("p1", "A", Some(1)), record("p2", "B", Some(2))], 4)),
        Ok(page(vec![record("p3", "C", Some(3)), record("p4", "D", Some(4))], 4)),
    ]);
    let store = Arc::new(MemoryProductStore::new());
    let sync = orchestrator(source.clone(), store.clone(), 1000);

    let summary = completed(sync.trigger().await.unwrap());

    assert_eq!(source.skips().await, vec![(0, 1000), (1000, 1000)]);
    assert_eq!(
        summary,
        SyncSummary {
            pages_fetched: 2,
            processed: 4,
            applied: 4,
            skipped_deleted: 0,
            rejected: 0,
            reported_total: 4,
            stopped_on_empty_pages: false,
        }
    );
    assert_eq!(store.count_products(&everything()).await.unwrap(), 4);

    let queries = source.queries.lock().await;
    assert!(queries.iter().all(|q| q.content_type == "product"));
}

#[tokio::test]
async fn repeated_passes_are_idempotent() {
    let pass = || Ok(page(vec![record("p1", "A", Some(1)), record("p2", "B", None)], 2));
    let source = ScriptedSource::new(vec![pass(), pass()]);
    let store = Arc::new(MemoryProductStore::new());
    let sync = orchestrator(source, store.clone(), 1000);

    completed(sync.trigger().await.unwrap());
    let after_first = store.find_products(&everything(), None).await.unwrap();

    let second = completed(sync.trigger().await.unwrap());
    let after_second = store.find_products(&everything(), None).await.unwrap();

    assert_eq!(second.applied, 2);
    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn soft_deleted_records_stay_deleted_across_passes() {
    let source = ScriptedSource::new(vec![
        Ok(page(vec![record("p1", "A", Some(1)), record("p2", "B", Some(2))], 2)),
        Ok(page(
            vec![record("p1", "A2", Some(1)), record("p2", "B2", Some(2))],
            2,
        )),
    ]);
    let store = Arc::new(MemoryProductStore::new());
    let sync = orchestrator(source, store.clone(), 1000);

    completed(sync.trigger().await.unwrap());
    assert!(store.soft_delete_product("p2").await.unwrap());

    let summary = completed(sync.trigger().await.unwrap());
    assert_eq!(summary.applied, 1);
    assert_eq!(summary.skipped_deleted, 1);

    let p2 = store.find_by_external_id("p2").await.unwrap().unwrap();
    assert!(p2.deleted);
    assert_eq!(p2.name.as_deref(), Some("B"));

    let p1 = store.find_by_external_id("p1").await.unwrap().unwrap();
    assert_eq!(p1.name.as_deref(), Some("A2"));

    let visible = store
        .find_products(&ProductFilter::default(), None)
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
}

#[tokio::test]
async fn empty_source_needs_one_fetch() {
    let source = ScriptedSource::new(vec![]);
    let store = Arc::new(MemoryProductStore::new());
    let sync = orchestrator(source.clone(), store, 1000);

    let summary = completed(sync.trigger().await.unwrap());

    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(summary.processed, 0);
    assert!(!summary.stopped_on_empty_pages);
    assert_eq!(source.skips().await, vec![(0, 1000)]);
}

#[tokio::test]
async fn two_consecutive_empty_pages_end_the_pass() {
    let source = ScriptedSource::with_fallback(vec![], page(vec![], 10));
    let store = Arc::new(MemoryProductStore::new());
    let sync = orchestrator(source.clone(), store, 1000);

    let summary = completed(sync.trigger().await.unwrap());

    assert_eq!(summary.pages_fetched, 2);
    assert!(summary.stopped_on_empty_pages);
    assert_eq!(summary.reported_total, 10);
    assert_eq!(source.skips().await, vec![(0, 1000), (1000, 1000)]);
}

#[tokio::test]
async fn termination_follows_the_latest_total() {
    let source = ScriptedSource::new(vec![
        Ok(page(vec![record("a", "a", None), record("b", "b", None)], 3)),
        Ok(page(vec![record("c", "c", None)], 5)),
        Ok(page(vec![record("d", "d", None), record("e", "e", None)], 5)),
    ]);
    let store = Arc::new(MemoryProductStore::new());
    let sync = orchestrator(source.clone(), store.clone(), 2);

    let summary = completed(sync.trigger().await.unwrap());

    assert_eq!(source.skips().await, vec![(0, 2), (2, 2), (4, 2)]);
    assert_eq!(summary.processed, 5);
    assert_eq!(summary.reported_total, 5);
    assert_eq!(store.count_products(&everything()).await.unwrap(), 5);
}

#[tokio::test]
async fn blank_ids_are_counted_as_rejected() {
    let source = ScriptedSource::new(vec![Ok(page(
        vec![record("", "nameless", None), record("p1", "A", None)],
        2,
    ))]);
    let store = Arc::new(MemoryProductStore::new());
    let sync = orchestrator(source, store.clone(), 1000);

    let summary = completed(sync.trigger().await.unwrap());

    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.applied, 1);
    assert_eq!(store.count_products(&everything()).await.unwrap(), 1);
}

#[tokio::test]
async fn source_failure_aborts_but_keeps_applied_writes() {
    let source = ScriptedSource::new(vec![
        Ok(page(vec![record("p1", "A", None), record("p2", "B", None)], 4)),
        Err(SourceError::Unavailable("503 Service Unavailable".into())),
    ]);
    let store = Arc::new(MemoryProductStore::new());
    let sync = orchestrator(source, store.clone(), 2);

    let err = sync.trigger().await.unwrap_err();
    assert!(matches!(err, SyncError::Source(SourceError::Unavailable(_))));
    assert_eq!(store.count_products(&everything()).await.unwrap(), 2);

    let status = sync.status().await;
    assert_eq!(status.state, SyncState::Failed);
    assert!(!status.running);
    assert!(status.last_error.is_some());

    // the next trigger is not blocked by the failed pass
    let summary = completed(sync.trigger().await.unwrap());
    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(sync.status().await.state, SyncState::Idle);
}

/// Delegates to the memory store but fails the `fail_on`-th upsert (1-based).
struct FailingStore {
    inner: Arc<MemoryProductStore>,
    fail_on: usize,
    upserts: AtomicUsize,
}

#[async_trait]
impl ProductCommandRepositoryTrait for FailingStore {
    async fn upsert_product(
        &self,
        req: &UpsertProductRequest,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let call = self.upserts.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        self.inner.upsert_product(req).await
    }

    async fn soft_delete_product(&self, external_id: &str) -> Result<bool, RepositoryError> {
        self.inner.soft_delete_product(external_id).await
    }
}

#[tokio::test]
async fn store_failure_aborts_but_keeps_applied_writes() {
    let source = ScriptedSource::new(vec![
        Ok(page(vec![record("p1", "A", None), record("p2", "B", None)], 4)),
        Ok(page(vec![record("p3", "C", None), record("p4", "D", None)], 4)),
    ]);
    let store = Arc::new(MemoryProductStore::new());
    let failing = Arc::new(FailingStore {
        inner: store.clone(),
        fail_on: 3,
        upserts: AtomicUsize::new(0),
    }) as DynProductCommandRepository;
    let sync = Arc::new(SyncOrchestrator::new(
        source.clone(),
        Arc::new(Reconciler::new(failing)) as DynReconciler,
        2,
        SyncMetrics::new(),
    ));

    let err = sync.trigger().await.unwrap_err();
    assert!(matches!(err, SyncError::Store(RepositoryError::Sqlx(_))));

    assert_eq!(store.count_products(&everything()).await.unwrap(), 2);
    assert!(store.find_by_external_id("p2").await.unwrap().is_some());
    assert!(store.find_by_external_id("p3").await.unwrap().is_none());

    assert!(!sync.is_running());
    let status = sync.status().await;
    assert_eq!(status.state, SyncState::Failed);
    assert!(!status.running);
    assert!(status.last_error.is_some());
}

#[tokio::test]
async fn trigger_while_running_is_skipped() {
    let source = GatedSource::new();
    let store = Arc::new(MemoryProductStore::new());
    let sync = orchestrator(source.clone(), store, 1000);

    let running = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.trigger().await })
    };

    source.entered.notified().await;

    assert_eq!(sync.trigger().await.unwrap(), SyncTrigger::Skipped);
    assert!(sync.status().await.running);

    source.release.notify_one();
    let first = running.await.unwrap().unwrap();
    assert!(matches!(first, SyncTrigger::Completed(_)));

    assert_eq!(*source.calls.lock().await, 1);
    assert!(!sync.is_running());
    assert!(sync.status().await.last_summary.is_some());
}

struct CountingSync {
    tx: mpsc::UnboundedSender<Instant>,
}

#[async_trait]
impl SyncServiceTrait for CountingSync {
    async fn trigger(&self) -> Result<SyncTrigger, SyncError> {
        let _ = self.tx.send(Instant::now());
        Ok(SyncTrigger::Completed(SyncSummary::default()))
    }

    async fn status(&self) -> SyncStatus {
        SyncStatus::default()
    }
}

#[tokio::test(start_paused = true)]
async fn scheduler_runs_startup_pass_then_on_interval() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let interval = Duration::from_secs(3600);
    let start = Instant::now();

    let handle =
        SyncScheduler::new(Arc::new(CountingSync { tx }), interval).spawn(shutdown_tx.subscribe());

    let startup = rx.recv().await.unwrap();
    assert!(startup.duration_since(start) < Duration::from_secs(1));

    let first_tick = rx.recv().await.unwrap();
    assert!(first_tick.duration_since(start) >= interval);

    let second_tick = rx.recv().await.unwrap();
    assert!(second_tick.duration_since(first_tick) >= interval);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}
