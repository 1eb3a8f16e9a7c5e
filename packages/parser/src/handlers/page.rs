use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::page::PageResponse;
use crate::state::AppState;
use crate::store;

#[utoipa::path(
    get,
    path = "/pages",
    tag = "Pages",
    operation_id = "listPages",
    summary = "List parsed pages",
    responses(
        (status = 200, description = "All stored pages, oldest first", body = Vec<PageResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_pages(State(state): State<AppState>) -> Result<Json<Vec<PageResponse>>, AppError> {
    let pages = store::list_pages(&state.db).await?;
    Ok(Json(pages.into_iter().map(PageResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/pages/{id}",
    tag = "Pages",
    operation_id = "getPage",
    summary = "Get a parsed page by ID",
    params(("id" = i32, Path, description = "Page ID")),
    responses(
        (status = 200, description = "Page details", body = PageResponse),
        (status = 404, description = "Page not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PageResponse>, AppError> {
    let page = store::find_page(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".into()))?;
    Ok(Json(page.into()))
}
