use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{evaluation, participant, participant_team, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::evaluation::EvaluationSummary;
use crate::models::participant::*;
use crate::models::shared::DeletedResponse;
use crate::state::AppState;
use crate::utils::membership::{LinkOwner, clear_links, replace_links};

#[utoipa::path(
    post,
    path = "/participants",
    tag = "Participants",
    operation_id = "createParticipant",
    summary = "Create a participant",
    description = "Creates a participant and links it to the given teams. Unknown team IDs are ignored.",
    request_body = CreateParticipantRequest,
    responses(
        (status = 201, description = "Participant created", body = ParticipantResponse),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_participant(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_participant(&payload)?;

    let txn = state.db.begin().await?;
    let model = participant::ActiveModel {
        name: Set(payload.name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(team_ids) = payload.team_ids {
        replace_links(&txn, LinkOwner::Participant(model.id), &team_ids).await?;
    }
    txn.commit().await?;

    info!(participant_id = model.id, "Participant created");
    let response = participant_response(&state.db, model).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/participants",
    tag = "Participants",
    operation_id = "listParticipants",
    summary = "List participants",
    responses(
        (status = 200, description = "All participants ordered by ID", body = Vec<ParticipantResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipantResponse>>, AppError> {
    let models = participant::Entity::find()
        .order_by_asc(participant::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(participant_responses(&state.db, models).await?))
}

#[utoipa::path(
    get,
    path = "/participants/{id}",
    tag = "Participants",
    operation_id = "getParticipant",
    summary = "Get a participant by ID",
    params(("id" = i32, Path, description = "Participant ID")),
    responses(
        (status = 200, description = "Participant details", body = ParticipantResponse),
        (status = 404, description = "Participant not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_participant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ParticipantResponse>, AppError> {
    let model = find_participant(&state.db, id).await?;
    Ok(Json(participant_response(&state.db, model).await?))
}

#[utoipa::path(
    patch,
    path = "/participants/{id}",
    tag = "Participants",
    operation_id = "updateParticipant",
    summary = "Update a participant",
    description = "Applies only the fields present in the body. `phone: null` clears the phone number. A present `team_ids` list replaces the team set; memberships kept by the replacement keep their `joined_at`.",
    params(("id" = i32, Path, description = "Participant ID")),
    request_body = UpdateParticipantRequest,
    responses(
        (status = 200, description = "Participant updated", body = ParticipantResponse),
        (status = 404, description = "Participant not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_participant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateParticipantRequest>,
) -> Result<Json<ParticipantResponse>, AppError> {
    validate_update_participant(&payload)?;

    if payload == UpdateParticipantRequest::default() {
        let existing = find_participant(&state.db, id).await?;
        return Ok(Json(participant_response(&state.db, existing).await?));
    }

    let txn = state.db.begin().await?;
    let existing = find_participant(&txn, id).await?;
    let mut active: participant::ActiveModel = existing.clone().into();

    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }

    let model = if active.is_changed() {
        active.update(&txn).await?
    } else {
        existing
    };

    if let Some(team_ids) = payload.team_ids {
        replace_links(&txn, LinkOwner::Participant(id), &team_ids).await?;
    }
    txn.commit().await?;

    Ok(Json(participant_response(&state.db, model).await?))
}

#[utoipa::path(
    delete,
    path = "/participants/{id}",
    tag = "Participants",
    operation_id = "deleteParticipant",
    summary = "Delete a participant",
    description = "Deletes the participant and its team memberships. Fails with 409 while evaluations still reference it as judge.",
    params(("id" = i32, Path, description = "Participant ID")),
    responses(
        (status = 200, description = "Participant deleted", body = DeletedResponse),
        (status = 404, description = "Participant not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Still referenced (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_participant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    let txn = state.db.begin().await?;
    find_participant(&txn, id).await?;

    clear_links(&txn, LinkOwner::Participant(id)).await?;
    participant::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(participant_id = id, "Participant deleted");
    Ok(Json(DeletedResponse::ok()))
}

async fn find_participant<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<participant::Model, AppError> {
    participant::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Participant not found".into()))
}

async fn participant_response<C: ConnectionTrait>(
    db: &C,
    model: participant::Model,
) -> Result<ParticipantResponse, AppError> {
    participant_responses(db, vec![model])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Participant response was not built".into()))
}

/// Attach team memberships and judged evaluations to each participant.
async fn participant_responses<C: ConnectionTrait>(
    db: &C,
    models: Vec<participant::Model>,
) -> Result<Vec<ParticipantResponse>, AppError> {
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

    let links = participant_team::Entity::find()
        .filter(participant_team::Column::ParticipantId.is_in(ids.clone()))
        .order_by_asc(participant_team::Column::TeamId)
        .all(db)
        .await?;
    let team_names: HashMap<i32, String> = team::Entity::find()
        .filter(team::Column::Id.is_in(links.iter().map(|l| l.team_id).collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();
    let evaluations = evaluation::Entity::find()
        .filter(evaluation::Column::JudgeId.is_in(ids))
        .order_by_asc(evaluation::Column::Id)
        .all(db)
        .await?;

    let mut teams_by_participant: HashMap<i32, Vec<TeamMembership>> = HashMap::new();
    for link in links {
        if let Some(name) = team_names.get(&link.team_id) {
            teams_by_participant
                .entry(link.participant_id)
                .or_default()
                .push(TeamMembership {
                    team_id: link.team_id,
                    team_name: name.clone(),
                    joined_at: link.joined_at,
                });
        }
    }
    let mut evaluations_by_judge: HashMap<i32, Vec<EvaluationSummary>> = HashMap::new();
    for e in evaluations {
        evaluations_by_judge
            .entry(e.judge_id)
            .or_default()
            .push(e.into());
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let teams = teams_by_participant.remove(&m.id).unwrap_or_default();
            let evaluations = evaluations_by_judge.remove(&m.id).unwrap_or_default();
            ParticipantResponse::new(m, teams, evaluations)
        })
        .collect())
}
