use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, State},
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::{error, instrument};

use super::repo::PaymentMethod;
use crate::{
    pagination::{build_links, PageQuery},
    response::{ApiError, ApiSuccess},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct PaymentPage {
    pub items: Vec<PaymentMethod>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

pub fn payment_routes() -> Router<AppState> {
    Router::new().route("/payments", get(list_payments))
}

#[instrument(skip(state, uri, query))]
pub async fn list_payments(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<ApiSuccess<PaymentPage>, ApiError> {
    const FAILED: &str = "Get data failed";
    let Query(q) = query.map_err(|e| ApiError::bad_request(FAILED, e.body_text()))?;

    let total = state.payments.count().await.map_err(|e| {
        error!(error = %e, "count payment methods failed");
        ApiError::internal(FAILED, e)
    })?;
    let links = build_links(uri.path(), q.page, q.limit, total)
        .map_err(|e| ApiError::bad_request(FAILED, e))?;
    let offset = q.offset().map_err(|e| ApiError::bad_request(FAILED, e))?;

    let items = state
        .payments
        .list(q.limit, offset)
        .await
        .map_err(|e| {
            error!(error = %e, "list payment methods failed");
            ApiError::internal(FAILED, e)
        })?;

    Ok(ApiSuccess::ok(
        "Get data success",
        PaymentPage {
            items,
            total,
            page: q.page,
            limit: q.limit,
            next: links.next,
            previous: links.previous,
        },
    ))
}
