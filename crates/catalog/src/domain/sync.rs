use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Result of the store's conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    SkippedDeleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created,
    Updated,
    SkippedDeleted,
    Rejected,
}

impl ReconcileOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}

impl From<UpsertOutcome> for ReconcileOutcome {
    fn from(value: UpsertOutcome) -> Self {
        match value {
            UpsertOutcome::Created => Self::Created,
            UpsertOutcome::Updated => Self::Updated,
            UpsertOutcome::SkippedDeleted => Self::SkippedDeleted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    #[default]
    Idle,
    Fetching,
    Reconciling,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub pages_fetched: u64,
    pub processed: u64,
    pub applied: u64,
    pub skipped_deleted: u64,
    pub rejected: u64,
    pub reported_total: i64,
    pub stopped_on_empty_pages: bool,
}

impl SyncSummary {
    pub fn record(&mut self, outcome: ReconcileOutcome) {
        self.processed += 1;
        match outcome {
            ReconcileOutcome::Created | ReconcileOutcome::Updated => self.applied += 1,
            ReconcileOutcome::SkippedDeleted => self.skipped_deleted += 1,
            ReconcileOutcome::Rejected => self.rejected += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncTrigger {
    Completed(SyncSummary),
    Skipped,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub state: SyncState,
    pub running: bool,
    pub last_started_at: Option<DateTime<Utc>>,
    pub last_finished_at: Option<DateTime<Utc>>,
    pub last_summary: Option<SyncSummary>,
    pub last_error: Option<String>,
}
