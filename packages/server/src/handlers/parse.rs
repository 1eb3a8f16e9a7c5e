use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::{info, instrument, warn};

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::parse::{MessageResponse, ParseQuery};
use crate::state::AppState;

/// A parser service endpoint and the messages reported for it.
struct ParserEndpoint {
    path: &'static str,
    success: &'static str,
    error_prefix: &'static str,
    failure_prefix: &'static str,
}

const PARSE_NOW: ParserEndpoint = ParserEndpoint {
    path: "/parse",
    success: "Parser completed",
    error_prefix: "Parser error",
    failure_prefix: "Parser request failed",
};

const PARSE_QUEUED: ParserEndpoint = ParserEndpoint {
    path: "/parse_celery",
    success: "Task started",
    error_prefix: "Task error",
    failure_prefix: "Task request failed",
};

#[utoipa::path(
    post,
    path = "/parse",
    tag = "Parsing",
    operation_id = "triggerParse",
    summary = "Parse a page through the parser service",
    description = "Forwards the URL to the parser service and waits for the page to be stored.",
    params(ParseQuery),
    responses(
        (status = 200, description = "Parser finished", body = MessageResponse),
        (status = 422, description = "Missing or malformed url (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Parser service unreachable (UPSTREAM_UNREACHABLE)", body = ErrorBody),
        (status = "default", description = "Parser service error, status relayed (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(url = %query.url))]
pub async fn trigger_parse(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ParseQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    forward(&state, &PARSE_NOW, &query.url).await.map(Json)
}

#[utoipa::path(
    post,
    path = "/parse_celery",
    tag = "Parsing",
    operation_id = "triggerQueuedParse",
    summary = "Queue a page on the parser service",
    description = "Forwards the URL to the parser service's queued endpoint. The parse itself happens later in a worker.",
    params(ParseQuery),
    responses(
        (status = 200, description = "Task accepted", body = MessageResponse),
        (status = 422, description = "Missing or malformed url (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Parser service unreachable (UPSTREAM_UNREACHABLE)", body = ErrorBody),
        (status = "default", description = "Parser service error, status relayed (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(url = %query.url))]
pub async fn trigger_queued_parse(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ParseQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    forward(&state, &PARSE_QUEUED, &query.url).await.map(Json)
}

async fn forward(
    state: &AppState,
    endpoint: &ParserEndpoint,
    url: &str,
) -> Result<MessageResponse, AppError> {
    let target = format!("{}{}", state.config.parser_base_url(), endpoint.path);
    let request_failed =
        |e: reqwest::Error| AppError::UpstreamUnreachable(format!("{}: {e}", endpoint.failure_prefix));

    let response = state
        .http
        .post(&target)
        .query(&[("url", url)])
        .send()
        .await
        .map_err(request_failed)?;

    let status = response.status();
    if status.is_success() {
        info!(endpoint = %target, "Parser service accepted request");
        return Ok(MessageResponse::new(endpoint.success));
    }

    let body = response.text().await.map_err(request_failed)?;
    warn!(endpoint = %target, status = %status, "Parser service returned an error");
    Err(AppError::Upstream {
        status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
        message: format!("{}: {body}", endpoint.error_prefix),
    })
}
