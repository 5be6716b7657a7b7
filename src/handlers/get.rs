use crate::envelope::{FailureEnvelope, Success};
use crate::error::ApiError;
use crate::handlers::item_id;
use crate::models::Record;
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::PathRejection, extract::Path, extract::State};

/// GET /item/{id} handler - Retrieve a single record
///
/// A missing record is not an error: the envelope carries `data: null`.
#[utoipa::path(
    get,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "The record, or null when absent", body = serde_json::Value),
        (status = 400, description = "Store error", body = FailureEnvelope)
    ),
    tag = "items"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Success<Option<Record>>, ApiError> {
    let id = item_id(path)?;
    tracing::info!("Get single item: {}", id);

    let record = state.store.get(&id).await?;
    if record.is_none() {
        tracing::info!("Item not found with id: {}", id);
    }

    Ok(Success(record))
}
