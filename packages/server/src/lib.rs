pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hackathon API",
        version = "1.0.0",
        description = "Participants, teams, challenges, submissions and evaluations of a hackathon"
    ),
    tags(
        (name = "Participants", description = "Participant CRUD and team membership"),
        (name = "Teams", description = "Team CRUD and member management"),
        (name = "Challenges", description = "Challenge CRUD operations"),
        (name = "Submissions", description = "Team submissions for challenges"),
        (name = "Evaluations", description = "Judge scores for submissions"),
        (name = "Parsing", description = "Page parsing through the parser service"),
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
