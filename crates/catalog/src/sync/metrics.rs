use crate::domain::sync::ReconcileOutcome;
use prometheus_client::metrics::{
    counter::Counter, family::Family, gauge::Gauge, histogram::Histogram,
};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum PassOutcome {
    Completed,
    Failed,
    Skipped,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct PassLabels {
    pub outcome: PassOutcome,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum ItemOutcome {
    Created,
    Updated,
    SkippedDeleted,
    Rejected,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ItemLabels {
    pub outcome: ItemOutcome,
}

impl From<ReconcileOutcome> for ItemOutcome {
    fn from(value: ReconcileOutcome) -> Self {
        match value {
            ReconcileOutcome::Created => Self::Created,
            ReconcileOutcome::Updated => Self::Updated,
            ReconcileOutcome::SkippedDeleted => Self::SkippedDeleted,
            ReconcileOutcome::Rejected => Self::Rejected,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SyncMetrics {
    pub passes: Family<PassLabels, Counter>,
    pub items: Family<ItemLabels, Counter>,
    pub pages_fetched: Counter,
    pub reported_total: Gauge,
    pub pass_duration: Histogram,
}

impl Default for SyncMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncMetrics {
    pub fn new() -> Self {
        Self {
            passes: Family::default(),
            items: Family::default(),
            pages_fetched: Counter::default(),
            reported_total: Gauge::default(),
            pass_duration: Histogram::new(vec![0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 300.0, 900.0]),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "sync_passes",
            "Sync passes by outcome",
            self.passes.clone(),
        );
        registry.register(
            "sync_items",
            "Reconciled source entries by outcome",
            self.items.clone(),
        );
        registry.register(
            "sync_pages_fetched",
            "Pages fetched from the content source",
            self.pages_fetched.clone(),
        );
        registry.register(
            "sync_reported_total",
            "Entry total last reported by the content source",
            self.reported_total.clone(),
        );
        registry.register(
            "sync_pass_duration_seconds",
            "Duration of completed and failed sync passes",
            self.pass_duration.clone(),
        );
    }

    pub fn record_pass(&self, outcome: PassOutcome) {
        self.passes.get_or_create(&PassLabels { outcome }).inc();
    }

    pub fn record_item(&self, outcome: ReconcileOutcome) {
        self.items
            .get_or_create(&ItemLabels {
                outcome: outcome.into(),
            })
            .inc();
    }
}
