pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extract;
pub mod extractors;
pub mod fetch;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod store;

use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hackathon Parser API",
        version = "1.0.0",
        description = "Fetches pages and stores their title and meta description"
    ),
    tags(
        (name = "Parsing", description = "Direct and queued page parsing"),
        (name = "Pages", description = "Stored page metadata"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = common::cors::cors_layer(&state.config.server.cors);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::api_routes())
        .split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
}
