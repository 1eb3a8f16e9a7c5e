use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{evaluation, participant, submission};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::evaluation::*;
use crate::models::shared::DeletedResponse;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/evaluations",
    tag = "Evaluations",
    operation_id = "createEvaluation",
    summary = "Create an evaluation",
    description = "Scores a submission on behalf of a judge. `evaluated_at` is set by the server.",
    request_body = CreateEvaluationRequest,
    responses(
        (status = 201, description = "Evaluation created", body = EvaluationResponse),
        (status = 409, description = "Submission or judge does not exist (CONFLICT)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(submission_id = payload.submission_id, judge_id = payload.judge_id))]
pub async fn create_evaluation(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEvaluationRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_evaluation(&payload)?;

    let model = evaluation::ActiveModel {
        submission_id: Set(payload.submission_id),
        judge_id: Set(payload.judge_id),
        score: Set(payload.score),
        comments: Set(payload.comments),
        evaluated_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(evaluation_id = model.id, score = model.score, "Evaluation created");
    let response = evaluation_response(&state.db, model).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/evaluations",
    tag = "Evaluations",
    operation_id = "listEvaluations",
    summary = "List evaluations",
    responses(
        (status = 200, description = "All evaluations ordered by ID", body = Vec<EvaluationResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_evaluations(
    State(state): State<AppState>,
) -> Result<Json<Vec<EvaluationResponse>>, AppError> {
    let models = evaluation::Entity::find()
        .order_by_asc(evaluation::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(evaluation_responses(&state.db, models).await?))
}

#[utoipa::path(
    get,
    path = "/evaluations/{id}",
    tag = "Evaluations",
    operation_id = "getEvaluation",
    summary = "Get an evaluation by ID",
    params(("id" = i32, Path, description = "Evaluation ID")),
    responses(
        (status = 200, description = "Evaluation details", body = EvaluationResponse),
        (status = 404, description = "Evaluation not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_evaluation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let model = find_evaluation(&state.db, id).await?;
    Ok(Json(evaluation_response(&state.db, model).await?))
}

#[utoipa::path(
    patch,
    path = "/evaluations/{id}",
    tag = "Evaluations",
    operation_id = "updateEvaluation",
    summary = "Update an evaluation",
    description = "Applies only the fields present in the body. `comments: null` clears the comments.",
    params(("id" = i32, Path, description = "Evaluation ID")),
    request_body = UpdateEvaluationRequest,
    responses(
        (status = 200, description = "Evaluation updated", body = EvaluationResponse),
        (status = 404, description = "Evaluation not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Submission or judge does not exist (CONFLICT)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_evaluation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateEvaluationRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    validate_update_evaluation(&payload)?;

    let existing = find_evaluation(&state.db, id).await?;
    if payload == UpdateEvaluationRequest::default() {
        return Ok(Json(evaluation_response(&state.db, existing).await?));
    }

    let mut active: evaluation::ActiveModel = existing.into();
    if let Some(submission_id) = payload.submission_id {
        active.submission_id = Set(submission_id);
    }
    if let Some(judge_id) = payload.judge_id {
        active.judge_id = Set(judge_id);
    }
    if let Some(score) = payload.score {
        active.score = Set(score);
    }
    if let Some(comments) = payload.comments {
        active.comments = Set(comments);
    }
    let model = active.update(&state.db).await?;

    Ok(Json(evaluation_response(&state.db, model).await?))
}

#[utoipa::path(
    delete,
    path = "/evaluations/{id}",
    tag = "Evaluations",
    operation_id = "deleteEvaluation",
    summary = "Delete an evaluation",
    params(("id" = i32, Path, description = "Evaluation ID")),
    responses(
        (status = 200, description = "Evaluation deleted", body = DeletedResponse),
        (status = 404, description = "Evaluation not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_evaluation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    let result = evaluation::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Evaluation not found".into()));
    }

    info!(evaluation_id = id, "Evaluation deleted");
    Ok(Json(DeletedResponse::ok()))
}

async fn find_evaluation<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<evaluation::Model, AppError> {
    evaluation::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Evaluation not found".into()))
}

async fn evaluation_response<C: ConnectionTrait>(
    db: &C,
    model: evaluation::Model,
) -> Result<EvaluationResponse, AppError> {
    evaluation_responses(db, vec![model])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Evaluation response was not built".into()))
}

/// Attach the evaluated submission and the judge to each evaluation.
async fn evaluation_responses<C: ConnectionTrait>(
    db: &C,
    models: Vec<evaluation::Model>,
) -> Result<Vec<EvaluationResponse>, AppError> {
    let submissions: HashMap<i32, submission::Model> = submission::Entity::find()
        .filter(
            submission::Column::Id
                .is_in(models.iter().map(|m| m.submission_id).collect::<Vec<_>>()),
        )
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    let judges: HashMap<i32, participant::Model> = participant::Entity::find()
        .filter(participant::Column::Id.is_in(models.iter().map(|m| m.judge_id).collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    models
        .into_iter()
        .map(|m| {
            let submission = submissions.get(&m.submission_id).cloned().ok_or_else(|| {
                AppError::Internal(format!(
                    "Submission {} of evaluation {} missing",
                    m.submission_id, m.id
                ))
            })?;
            let judge = judges.get(&m.judge_id).cloned().ok_or_else(|| {
                AppError::Internal(format!("Judge {} of evaluation {} missing", m.judge_id, m.id))
            })?;
            Ok(EvaluationResponse::new(m, submission.into(), judge.into()))
        })
        .collect()
}
