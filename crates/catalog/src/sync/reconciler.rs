use crate::{
    abstract_trait::{product::repository::DynProductCommandRepository, sync::ReconcilerTrait},
    domain::{
        requests::product::UpsertProductRequest,
        source::ExternalRecord,
        sync::{ReconcileOutcome, UpsertOutcome},
    },
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use tracing::{debug, warn};

/// Writes one source entry into the store unless a soft-deleted row owns its id.
#[derive(Clone)]
pub struct Reconciler {
    command: DynProductCommandRepository,
}

impl Reconciler {
    pub fn new(command: DynProductCommandRepository) -> Self {
        Self { command }
    }
}

#[async_trait]
impl ReconcilerTrait for Reconciler {
    async fn reconcile(
        &self,
        record: &ExternalRecord,
    ) -> Result<ReconcileOutcome, RepositoryError> {
        if record.external_id().is_empty() {
            warn!(
                "⚠️ Rejecting source entry without an id (name: {:?})",
                record.fields.name
            );
            return Ok(ReconcileOutcome::Rejected);
        }

        let req = UpsertProductRequest::from(record);
        let outcome = self.command.upsert_product(&req).await?;

        match outcome {
            UpsertOutcome::SkippedDeleted => {
                warn!("🚫 Skipping soft-deleted product {}", req.external_id)
            }
            _ => debug!("✅ Reconciled product {} ({outcome:?})", req.external_id),
        }

        Ok(outcome.into())
    }
}
