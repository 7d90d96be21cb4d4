pub mod metrics;
pub mod orchestrator;
pub mod reconciler;
pub mod scheduler;

pub use self::metrics::SyncMetrics;
pub use self::orchestrator::SyncOrchestrator;
pub use self::reconciler::Reconciler;
pub use self::scheduler::SyncScheduler;
