use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::page::*;
use crate::handlers::parse::*;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(parse_now))
        .routes(routes!(parse_queued))
        .routes(routes!(list_pages))
        .routes(routes!(get_page))
}
