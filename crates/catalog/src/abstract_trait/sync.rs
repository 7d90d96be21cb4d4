use crate::domain::{
    source::ExternalRecord,
    sync::{ReconcileOutcome, SyncStatus, SyncTrigger},
};
use async_trait::async_trait;
use shared::errors::{RepositoryError, SyncError};
use std::sync::Arc;

pub type DynReconciler = Arc<dyn ReconcilerTrait + Send + Sync>;
pub type DynSyncService = Arc<dyn SyncServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReconcilerTrait {
    async fn reconcile(&self, record: &ExternalRecord)
    -> Result<ReconcileOutcome, RepositoryError>;
}

#[async_trait]
pub trait SyncServiceTrait {
    /// Runs one full pass, or returns [`SyncTrigger::Skipped`] if one is already running.
    async fn trigger(&self) -> Result<SyncTrigger, SyncError>;
    async fn status(&self) -> SyncStatus;
}
