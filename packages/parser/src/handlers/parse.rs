use axum::Json;
use axum::extract::State;
use common::ParseJob;
use tracing::{debug, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::AppQuery;
use crate::models::page::{MessageResponse, ParseQuery};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/parse",
    tag = "Parsing",
    operation_id = "parsePage",
    summary = "Parse a page synchronously",
    description = "Fetches the URL, extracts its title and meta description, and stores the result as a new page before responding. The HTTP status of the fetched document is not checked.",
    params(ParseQuery),
    responses(
        (status = 200, description = "Page parsed and stored", body = MessageResponse),
        (status = 422, description = "Missing url parameter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Document could not be fetched (FETCH_FAILED)", body = ErrorBody),
        (status = 500, description = "Storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(url = %query.url))]
pub async fn parse_now(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ParseQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    state.pipeline.run(&query.url).await?;
    Ok(Json(MessageResponse::new("Parsing completed")))
}

#[utoipa::path(
    post,
    path = "/parse_celery",
    tag = "Parsing",
    operation_id = "enqueueParse",
    summary = "Queue a page for background parsing",
    description = "Publishes a parse job onto the worker queue and returns immediately. The outcome of the job is not reported back.",
    params(ParseQuery),
    responses(
        (status = 200, description = "Job accepted", body = MessageResponse),
        (status = 422, description = "Missing url parameter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "No task queue configured (QUEUE_UNAVAILABLE)", body = ErrorBody),
        (status = 500, description = "Publishing failed (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(url = %query.url))]
pub async fn parse_queued(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ParseQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let Some(ref mq) = state.mq else {
        debug!("MQ unavailable, rejecting queued parse");
        return Err(AppError::QueueUnavailable);
    };

    mq::publish_parse_job(mq, &state.config.mq.queue_name, ParseJob::new(query.url)).await?;

    Ok(Json(MessageResponse::new("Task started")))
}
