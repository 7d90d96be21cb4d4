use crate::{abstract_trait::sync::DynSyncService, domain::sync::SyncStatus, state::AppState};
use axum::{Json, extract::Extension, response::IntoResponse, routing::get};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/sync/status",
    tag = "Sync",
    responses(
        (status = 200, description = "Current sync state and last pass summary", body = SyncStatus)
    )
)]
pub async fn get_sync_status(Extension(service): Extension<DynSyncService>) -> impl IntoResponse {
    Json(service.status().await)
}

pub fn sync_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/sync/status", get(get_sync_status))
        .layer(Extension(app_state.di_container.sync.clone()))
}
