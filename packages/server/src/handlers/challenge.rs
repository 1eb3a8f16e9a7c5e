use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{challenge, submission};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::challenge::*;
use crate::models::shared::DeletedResponse;
use crate::models::submission::SubmissionSummary;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/challenges",
    tag = "Challenges",
    operation_id = "createChallenge",
    summary = "Create a challenge",
    description = "Creates a challenge. Optional `description` and `criteria` default to null.",
    request_body = CreateChallengeRequest,
    responses(
        (status = 201, description = "Challenge created", body = ChallengeResponse),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_challenge(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateChallengeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_challenge(&payload)?;

    let model = challenge::ActiveModel {
        title: Set(payload.title),
        description: Set(payload.description),
        criteria: Set(payload.criteria),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(challenge_id = model.id, "Challenge created");
    Ok((StatusCode::CREATED, Json(ChallengeResponse::new(model, vec![]))))
}

#[utoipa::path(
    get,
    path = "/challenges",
    tag = "Challenges",
    operation_id = "listChallenges",
    summary = "List challenges",
    responses(
        (status = 200, description = "All challenges ordered by ID", body = Vec<ChallengeResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_challenges(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChallengeResponse>>, AppError> {
    let models = challenge::Entity::find()
        .order_by_asc(challenge::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(challenge_responses(&state.db, models).await?))
}

#[utoipa::path(
    get,
    path = "/challenges/{id}",
    tag = "Challenges",
    operation_id = "getChallenge",
    summary = "Get a challenge by ID",
    params(("id" = i32, Path, description = "Challenge ID")),
    responses(
        (status = 200, description = "Challenge details", body = ChallengeResponse),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_challenge(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ChallengeResponse>, AppError> {
    let model = find_challenge(&state.db, id).await?;
    Ok(Json(challenge_response(&state.db, model).await?))
}

#[utoipa::path(
    patch,
    path = "/challenges/{id}",
    tag = "Challenges",
    operation_id = "updateChallenge",
    summary = "Update a challenge",
    description = "Applies only the fields present in the body. `description: null` or `criteria: null` clears the field.",
    params(("id" = i32, Path, description = "Challenge ID")),
    request_body = UpdateChallengeRequest,
    responses(
        (status = 200, description = "Challenge updated", body = ChallengeResponse),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_challenge(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateChallengeRequest>,
) -> Result<Json<ChallengeResponse>, AppError> {
    validate_update_challenge(&payload)?;

    let existing = find_challenge(&state.db, id).await?;
    if payload == UpdateChallengeRequest::default() {
        return Ok(Json(challenge_response(&state.db, existing).await?));
    }

    let mut active: challenge::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(criteria) = payload.criteria {
        active.criteria = Set(criteria);
    }
    let model = active.update(&state.db).await?;

    Ok(Json(challenge_response(&state.db, model).await?))
}

#[utoipa::path(
    delete,
    path = "/challenges/{id}",
    tag = "Challenges",
    operation_id = "deleteChallenge",
    summary = "Delete a challenge",
    description = "Fails with 409 while submissions still belong to the challenge.",
    params(("id" = i32, Path, description = "Challenge ID")),
    responses(
        (status = 200, description = "Challenge deleted", body = DeletedResponse),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Still referenced (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_challenge(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    let result = challenge::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Challenge not found".into()));
    }

    info!(challenge_id = id, "Challenge deleted");
    Ok(Json(DeletedResponse::ok()))
}

async fn find_challenge<C: ConnectionTrait>(db: &C, id: i32) -> Result<challenge::Model, AppError> {
    challenge::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge not found".into()))
}

async fn challenge_response<C: ConnectionTrait>(
    db: &C,
    model: challenge::Model,
) -> Result<ChallengeResponse, AppError> {
    challenge_responses(db, vec![model])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Challenge response was not built".into()))
}

async fn challenge_responses<C: ConnectionTrait>(
    db: &C,
    models: Vec<challenge::Model>,
) -> Result<Vec<ChallengeResponse>, AppError> {
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let submissions = submission::Entity::find()
        .filter(submission::Column::ChallengeId.is_in(ids))
        .order_by_asc(submission::Column::Id)
        .all(db)
        .await?;

    let mut by_challenge: HashMap<i32, Vec<SubmissionSummary>> = HashMap::new();
    for s in submissions {
        by_challenge.entry(s.challenge_id).or_default().push(s.into());
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let submissions = by_challenge.remove(&m.id).unwrap_or_default();
            ChallengeResponse::new(m, submissions)
        })
        .collect())
}
