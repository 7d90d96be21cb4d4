use crate::{
    abstract_trait::report::DynReportService,
    domain::{
        requests::report::{ExistingProductsRequest, StockSummaryRequest},
        response::report::{DeletedProductsReport, ExistingProductsReport, StockSummary},
    },
    middleware::validate::ValidatedQuery,
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/report/deleted-products",
    tag = "Report",
    responses(
        (status = 200, description = "Share of soft-deleted products", body = DeletedProductsReport),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_deleted_report(
    Extension(service): Extension<DynReportService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.deleted_percentage().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/report/existing-products",
    tag = "Report",
    params(ExistingProductsRequest),
    responses(
        (status = 200, description = "Share of non-deleted products within the filter", body = ExistingProductsReport),
        (status = 400, description = "Unparsable date", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_existing_report(
    Extension(service): Extension<DynReportService>,
    ValidatedQuery(params): ValidatedQuery<ExistingProductsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.existing_percentage(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/report/stock-summary",
    tag = "Report",
    params(StockSummaryRequest),
    responses(
        (status = 200, description = "Stock totals and low-stock products", body = StockSummary),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_stock_summary(
    Extension(service): Extension<DynReportService>,
    ValidatedQuery(params): ValidatedQuery<StockSummaryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.stock_summary(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn report_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/report/deleted-products", get(get_deleted_report))
        .route("/report/existing-products", get(get_existing_report))
        .route("/report/stock-summary", get(get_stock_summary))
        .layer(Extension(app_state.di_container.report.clone()))
}
