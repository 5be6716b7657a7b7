use utoipa::OpenApi;

use crate::envelope::FailureEnvelope;
use crate::handlers;
use crate::models::{DeleteResponse, PingResponse};

/// OpenAPI documentation
///
/// Every response is wrapped in `{"status": "success", "data": ...}` or
/// `{"status": "failure", "message": ...}`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "sku-warehouse API",
        version = "1.0.0",
        description = "CRUD endpoints for inventory records held in a managed key-value table"
    ),
    paths(
        handlers::ping::ping_handler,
        handlers::get::get_handler,
        handlers::delete::delete_handler,
        handlers::put::put_handler,
        handlers::list::list_handler,
        handlers::insert::insert_handler
    ),
    components(
        schemas(
            PingResponse,
            DeleteResponse,
            FailureEnvelope
        )
    ),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "items", description = "Inventory record operations")
    )
)]
pub struct ApiDoc;
