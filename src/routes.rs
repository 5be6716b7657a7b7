use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

// Route path constants - single source of truth for all API paths

pub const PING: &str = "/ping";
pub const ITEM: &str = "/item/{id}";
pub const ITEMS: &str = "/items";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// The full HTTP surface of the service
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(PING, get(handlers::ping_handler))
        .route(
            ITEM,
            get(handlers::get_handler)
                .put(handlers::put_handler)
                .delete(handlers::delete_handler),
        )
        .route(
            ITEMS,
            get(handlers::list_handler).post(handlers::insert_handler),
        )
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
