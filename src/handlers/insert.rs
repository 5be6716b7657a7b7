use crate::envelope::{FailureEnvelope, Success};
use crate::error::ApiError;
use crate::handlers::{get_handler, validated_payload};
use crate::models::{attributes_from_json, Record};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::Path, extract::State, Json};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// POST /items handler - Create a record under a fresh random id
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body(
        content = serde_json::Value,
        description = "Object whose keys are a subset of quantity, name, description"
    ),
    responses(
        (status = 200, description = "The created record, including its new id", body = serde_json::Value),
        (status = 400, description = "Unsupported keys, invalid JSON or store error", body = FailureEnvelope)
    ),
    tag = "items"
)]
pub async fn insert_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Success<Option<Record>>, ApiError> {
    tracing::info!("Insert new item");

    let payload = validated_payload(body)?;
    let record = Record::new(Uuid::new_v4().to_string(), attributes_from_json(payload)?);
    tracing::debug!("Storing {:?}", record);

    state.store.put(&record).await?;

    get_handler(State(state), Ok(Path(record.id))).await
}
