use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{challenge, evaluation, submission, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::evaluation::EvaluationSummary;
use crate::models::shared::DeletedResponse;
use crate::models::submission::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/submissions",
    tag = "Submissions",
    operation_id = "createSubmission",
    summary = "Create a submission",
    description = "Records a team's entry for a challenge. `submitted_at` is set by the server.",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission created", body = SubmissionResponse),
        (status = 409, description = "Team or challenge does not exist (CONFLICT)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(team_id = payload.team_id, challenge_id = payload.challenge_id))]
pub async fn create_submission(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_submission(&payload)?;

    let model = submission::ActiveModel {
        team_id: Set(payload.team_id),
        challenge_id: Set(payload.challenge_id),
        file_url: Set(payload.file_url),
        submitted_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(submission_id = model.id, "Submission created");
    let response = submission_response(&state.db, model).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/submissions",
    tag = "Submissions",
    operation_id = "listSubmissions",
    summary = "List submissions",
    responses(
        (status = 200, description = "All submissions ordered by ID", body = Vec<SubmissionResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_submissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionResponse>>, AppError> {
    let models = submission::Entity::find()
        .order_by_asc(submission::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(submission_responses(&state.db, models).await?))
}

#[utoipa::path(
    get,
    path = "/submissions/{id}",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get a submission by ID",
    params(("id" = i32, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Submission details", body = SubmissionResponse),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let model = find_submission(&state.db, id).await?;
    Ok(Json(submission_response(&state.db, model).await?))
}

#[utoipa::path(
    patch,
    path = "/submissions/{id}",
    tag = "Submissions",
    operation_id = "updateSubmission",
    summary = "Update a submission",
    description = "Applies only the fields present in the body. `submitted_at` never changes.",
    params(("id" = i32, Path, description = "Submission ID")),
    request_body = UpdateSubmissionRequest,
    responses(
        (status = 200, description = "Submission updated", body = SubmissionResponse),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Team or challenge does not exist (CONFLICT)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSubmissionRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    validate_update_submission(&payload)?;

    let existing = find_submission(&state.db, id).await?;
    if payload == UpdateSubmissionRequest::default() {
        return Ok(Json(submission_response(&state.db, existing).await?));
    }

    let mut active: submission::ActiveModel = existing.into();
    if let Some(team_id) = payload.team_id {
        active.team_id = Set(team_id);
    }
    if let Some(challenge_id) = payload.challenge_id {
        active.challenge_id = Set(challenge_id);
    }
    if let Some(file_url) = payload.file_url {
        active.file_url = Set(file_url);
    }
    let model = active.update(&state.db).await?;

    Ok(Json(submission_response(&state.db, model).await?))
}

#[utoipa::path(
    delete,
    path = "/submissions/{id}",
    tag = "Submissions",
    operation_id = "deleteSubmission",
    summary = "Delete a submission",
    description = "Fails with 409 while evaluations still reference the submission.",
    params(("id" = i32, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Submission deleted", body = DeletedResponse),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Still referenced (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    let result = submission::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Submission not found".into()));
    }

    info!(submission_id = id, "Submission deleted");
    Ok(Json(DeletedResponse::ok()))
}

async fn find_submission<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<submission::Model, AppError> {
    submission::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))
}

async fn submission_response<C: ConnectionTrait>(
    db: &C,
    model: submission::Model,
) -> Result<SubmissionResponse, AppError> {
    submission_responses(db, vec![model])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Submission response was not built".into()))
}

/// Attach team, challenge and evaluations to each submission.
async fn submission_responses<C: ConnectionTrait>(
    db: &C,
    models: Vec<submission::Model>,
) -> Result<Vec<SubmissionResponse>, AppError> {
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

    let teams: HashMap<i32, team::Model> = team::Entity::find()
        .filter(team::Column::Id.is_in(models.iter().map(|m| m.team_id).collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();
    let challenges: HashMap<i32, challenge::Model> = challenge::Entity::find()
        .filter(
            challenge::Column::Id.is_in(models.iter().map(|m| m.challenge_id).collect::<Vec<_>>()),
        )
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let evaluations = evaluation::Entity::find()
        .filter(evaluation::Column::SubmissionId.is_in(ids))
        .order_by_asc(evaluation::Column::Id)
        .all(db)
        .await?;

    let mut evaluations_by_submission: HashMap<i32, Vec<EvaluationSummary>> = HashMap::new();
    for e in evaluations {
        evaluations_by_submission
            .entry(e.submission_id)
            .or_default()
            .push(e.into());
    }

    models
        .into_iter()
        .map(|m| {
            let team = teams.get(&m.team_id).cloned().ok_or_else(|| {
                AppError::Internal(format!("Team {} of submission {} missing", m.team_id, m.id))
            })?;
            let challenge = challenges.get(&m.challenge_id).cloned().ok_or_else(|| {
                AppError::Internal(format!(
                    "Challenge {} of submission {} missing",
                    m.challenge_id, m.id
                ))
            })?;
            let evaluations = evaluations_by_submission.remove(&m.id).unwrap_or_default();
            Ok(SubmissionResponse::new(
                m,
                team.into(),
                challenge.into(),
                evaluations,
            ))
        })
        .collect()
}
