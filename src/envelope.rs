use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body of every successful response
#[derive(Serialize)]
pub struct SuccessEnvelope<T> {
    pub status: &'static str,
    pub data: T,
}

/// Body of every failed response
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct FailureEnvelope {
    /// Always `"failure"`
    pub status: String,
    pub message: String,
}

/// A handler result that renders as a success envelope
pub struct Success<T>(pub T);

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        respond(
            StatusCode::OK,
            SuccessEnvelope {
                status: "success",
                data: self.0,
            },
        )
    }
}

/// Build the failure envelope; every failure is reported as 400
pub fn failure(message: String) -> Response {
    respond(
        StatusCode::BAD_REQUEST,
        FailureEnvelope {
            status: "failure".to_string(),
            message,
        },
    )
}

fn respond<B: Serialize>(status: StatusCode, body: B) -> Response {
    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as JsonValue};

    async fn body_json(response: Response) -> JsonValue {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let response = Success(json!({"ping": "pong"})).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            body_json(response).await,
            json!({"status": "success", "data": {"ping": "pong"}})
        );
    }

    #[tokio::test]
    async fn test_success_envelope_with_null_data() {
        let response = Success(None::<JsonValue>).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "success", "data": null}));
    }

    #[tokio::test]
    async fn test_failure_envelope() {
        let response = failure("something broke".to_string());

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let body = body_json(response).await;
        assert_eq!(body, json!({"status": "failure", "message": "something broke"}));
        assert!(body.get("data").is_none());
    }
}
