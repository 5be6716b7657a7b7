use crate::envelope::{FailureEnvelope, Success};
use crate::error::ApiError;
use crate::models::Record;
use crate::routes;
use crate::state::AppState;
use axum::extract::State;

/// GET /items handler - List every record
///
/// Reads the whole table in one unpaged scan; order is whatever the store
/// returns.
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "Array of all records", body = serde_json::Value),
        (status = 400, description = "Store error", body = FailureEnvelope)
    ),
    tag = "items"
)]
pub async fn list_handler(State(state): State<AppState>) -> Result<Success<Vec<Record>>, ApiError> {
    let records = state.store.scan_all().await?;

    tracing::info!("Listed {} items", records.len());

    Ok(Success(records))
}
