use crate::{
    abstract_trait::{
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::{DynProductCommandService, DynProductQueryService},
        },
        report::DynReportService,
        source::DynSourceClient,
        sync::{DynReconciler, DynSyncService},
    },
    repository::{
        command::ProductCommandRepository, memory::MemoryProductStore,
        query::ProductQueryRepository,
    },
    service::{command::ProductCommandService, query::ProductQueryService, report::ReportService},
    sync::{Reconciler, SyncMetrics, SyncOrchestrator},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub report: DynReportService,
    pub sync: DynSyncService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("report", &"ReportService")
            .field("sync", &"SyncOrchestrator")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub command_repo: DynProductCommandRepository,
    pub query_repo: DynProductQueryRepository,
    pub source: DynSourceClient,
    pub sync_page_size: i64,
}

impl DependenciesInjectDeps {
    pub fn postgres(pool: ConnectionPool, source: DynSourceClient, sync_page_size: i64) -> Self {
        Self {
            command_repo: Arc::new(ProductCommandRepository::new(pool.clone())),
            query_repo: Arc::new(ProductQueryRepository::new(pool)),
            source,
            sync_page_size,
        }
    }

    pub fn memory(store: Arc<MemoryProductStore>, source: DynSourceClient, sync_page_size: i64) -> Self {
        Self {
            command_repo: store.clone(),
            query_repo: store,
            source,
            sync_page_size,
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            command_repo,
            query_repo,
            source,
            sync_page_size,
        } = deps;

        let product_query =
            Arc::new(ProductQueryService::new(query_repo.clone(), registry)) as DynProductQueryService;
        let product_command = Arc::new(ProductCommandService::new(command_repo.clone(), registry))
            as DynProductCommandService;
        let report = Arc::new(ReportService::new(query_repo, registry)) as DynReportService;

        let sync_metrics = SyncMetrics::new();
        sync_metrics.register(registry);

        let reconciler = Arc::new(Reconciler::new(command_repo)) as DynReconciler;
        let sync = Arc::new(SyncOrchestrator::new(
            source,
            reconciler,
            sync_page_size,
            sync_metrics,
        )) as DynSyncService;

        Self {
            product_query,
            product_command,
            report,
            sync,
        }
    }
}
