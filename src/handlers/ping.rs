use crate::envelope::Success;
use crate::models::PingResponse;
use crate::routes;

/// GET /ping handler - Liveness probe that never touches the store
#[utoipa::path(
    get,
    path = routes::PING,
    responses(
        (status = 200, description = "Service is up; data is {\"ping\": \"pong\"}", body = serde_json::Value)
    ),
    tag = "health"
)]
pub async fn ping_handler() -> Success<PingResponse> {
    Success(PingResponse {
        ping: "pong".to_string(),
    })
}
