use crate::envelope::{FailureEnvelope, Success};
use crate::error::ApiError;
use crate::handlers::{get_handler, item_id, validated_payload};
use crate::models::{attributes_from_json, Record};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::{JsonRejection, PathRejection}, extract::Path, extract::State, Json};
use serde_json::Value as JsonValue;

/// PUT /item/{id} handler - Replace a record
///
/// The stored record is overwritten entirely: fields missing from the body
/// are gone afterwards. The response is whatever a subsequent GET reports.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "Record id")
    ),
    request_body(
        content = serde_json::Value,
        description = "Object whose keys are a subset of quantity, name, description"
    ),
    responses(
        (status = 200, description = "The stored record", body = serde_json::Value),
        (status = 400, description = "Unsupported keys, invalid JSON or store error", body = FailureEnvelope)
    ),
    tag = "items"
)]
pub async fn put_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Success<Option<Record>>, ApiError> {
    let id = item_id(path)?;
    tracing::info!("Updating single item: {}", id);

    let payload = validated_payload(body)?;
    let record = Record::new(id, attributes_from_json(payload)?);
    tracing::debug!("Storing {:?}", record);

    state.store.put(&record).await?;

    get_handler(State(state), Ok(Path(record.id))).await
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{send, setup_test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_creates_record_under_path_id() {
        let app = setup_test_app();

        let (status, body) = send(&app, "PUT", "/item/sku-1", Some(json!({"name": "washer"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["id"], "sku-1");
        assert_eq!(body["data"]["name"], "washer");
        assert!(body["data"]["lastModified"].is_string());
    }

    #[tokio::test]
    async fn test_put_twice_keeps_id_and_last_write_wins() {
        let app = setup_test_app();

        let (_, first) = send(&app, "PUT", "/item/sku-2", Some(json!({"name": "nut"}))).await;
        let (_, second) = send(&app, "PUT", "/item/sku-2", Some(json!({"name": "nut"}))).await;
        assert_eq!(first["data"]["id"], "sku-2");
        assert_eq!(second["data"]["id"], "sku-2");

        send(&app, "PUT", "/item/sku-2", Some(json!({"name": "lock nut"}))).await;

        let (status, fetched) = send(&app, "GET", "/item/sku-2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"]["name"], "lock nut");
    }

    #[tokio::test]
    async fn test_put_is_full_overwrite() {
        let app = setup_test_app();

        let (status, created) = send(
            &app,
            "POST",
            "/items",
            Some(json!({"name": "bolt", "quantity": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["name"], "bolt");
        assert_eq!(created["data"]["quantity"], "5");

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/item/{}", id),
            Some(json!({"quantity": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["id"], id.as_str());
        assert_eq!(updated["data"]["quantity"], "10");
        assert!(updated["data"].get("name").is_none());

        let (status, listed) = send(&app, "GET", "/items", None).await;
        assert_eq!(status, StatusCode::OK);
        let items = listed["data"].as_array().unwrap();
        let item = items.iter().find(|item| item["id"] == id.as_str()).unwrap();
        assert_eq!(item["quantity"], "10");
    }

    #[tokio::test]
    async fn test_put_unsupported_key() {
        let app = setup_test_app();

        let (status, body) = send(
            &app,
            "PUT",
            "/item/sku-3",
            Some(json!({"name": "bolt", "lastModified": "now"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "failure");
        assert!(body["message"].as_str().unwrap().contains("lastModified"));

        // Nothing was written
        let (_, fetched) = send(&app, "GET", "/item/sku-3", None).await;
        assert_eq!(fetched["data"], json!(null));
    }

    #[tokio::test]
    async fn test_put_non_object_body() {
        let app = setup_test_app();

        let (status, body) = send(&app, "PUT", "/item/sku-4", Some(json!(["name"]))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "failure");
        assert!(body["message"].as_str().unwrap().contains("JSON object"));
    }

    #[tokio::test]
    async fn test_put_non_utf8_id_writes_nothing() {
        let app = setup_test_app();

        let (status, body) = send(&app, "PUT", "/item/%FF", Some(json!({"name": "bolt"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "failure");
        assert!(body["message"].as_str().unwrap().starts_with("Invalid item id"));

        let (_, listed) = send(&app, "GET", "/items", None).await;
        assert_eq!(listed["data"], json!([]));
    }
}
