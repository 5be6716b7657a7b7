pub mod ping;
pub mod get;
pub mod delete;
pub mod put;
pub mod list;
pub mod insert;

pub use ping::ping_handler;
pub use get::get_handler;
pub use delete::delete_handler;
pub use put::put_handler;
pub use list::list_handler;
pub use insert::insert_handler;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use serde_json::{Map, Value as JsonValue};

use crate::validation::{payload_object, validate_supported_keys, ValidationError};

/// Unwrap the `{id}` path segment, e.g. rejecting ids that are not UTF-8
fn item_id(path: Result<Path<String>, PathRejection>) -> Result<String, ValidationError> {
    let Path(id) = path.map_err(|rejection| ValidationError::MalformedPath(rejection.body_text()))?;
    Ok(id)
}

/// Turn a mutating request's body into a validated field map
fn validated_payload(
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Map<String, JsonValue>, ValidationError> {
    let Json(body) = body.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    let payload = payload_object(body)?;
    validate_supported_keys(&payload)?;
    Ok(payload)
}
