use crate::envelope::{FailureEnvelope, Success};
use crate::error::ApiError;
use crate::handlers::item_id;
use crate::models::DeleteResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::PathRejection, extract::Path, extract::State};

/// DELETE /item/{id} handler - Remove a record
///
/// Deleting an id that was never stored still succeeds.
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record removed; data is {\"status\": \"ok\"}", body = serde_json::Value),
        (status = 400, description = "Store error", body = FailureEnvelope)
    ),
    tag = "items"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Success<DeleteResponse>, ApiError> {
    let id = item_id(path)?;
    tracing::info!("Deleting item: {}", id);

    state.store.delete(&id).await?;

    Ok(Success(DeleteResponse {
        status: "ok".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{send, setup_test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_existing_item() {
        let app = setup_test_app();

        let (_, created) = send(&app, "POST", "/items", Some(json!({"name": "doomed"}))).await;
        let uri = format!("/item/{}", created["data"]["id"].as_str().unwrap());

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success", "data": {"status": "ok"}}));

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!(null));
    }

    #[tokio::test]
    async fn test_delete_missing_item_succeeds() {
        let app = setup_test_app();

        let (status, body) = send(&app, "DELETE", "/item/never-stored", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success", "data": {"status": "ok"}}));
    }

    #[tokio::test]
    async fn test_delete_non_utf8_id_is_failure_envelope() {
        let app = setup_test_app();

        let (status, body) = send(&app, "DELETE", "/item/%FF%FE", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "failure");
        assert!(body["message"].as_str().unwrap().starts_with("Invalid item id"));
    }
}
