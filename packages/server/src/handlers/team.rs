use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{participant, participant_team, submission, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::shared::DeletedResponse;
use crate::models::submission::SubmissionSummary;
use crate::models::team::*;
use crate::state::AppState;
use crate::utils::membership::{LinkOwner, clear_links, replace_links};

#[utoipa::path(
    post,
    path = "/teams",
    tag = "Teams",
    operation_id = "createTeam",
    summary = "Create a team",
    description = "Creates a team with the given members. Unknown participant IDs are ignored.",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_team(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_team(&payload)?;

    let txn = state.db.begin().await?;
    let model = team::ActiveModel {
        name: Set(payload.name),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(participant_ids) = payload.participant_ids {
        replace_links(&txn, LinkOwner::Team(model.id), &participant_ids).await?;
    }
    txn.commit().await?;

    info!(team_id = model.id, "Team created");
    let response = team_response(&state.db, model).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/teams",
    tag = "Teams",
    operation_id = "listTeams",
    summary = "List teams",
    responses(
        (status = 200, description = "All teams ordered by ID", body = Vec<TeamResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<TeamResponse>>, AppError> {
    let models = team::Entity::find()
        .order_by_asc(team::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(team_responses(&state.db, models).await?))
}

#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "Teams",
    operation_id = "getTeam",
    summary = "Get a team by ID",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = TeamResponse),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TeamResponse>, AppError> {
    let model = find_team(&state.db, id).await?;
    Ok(Json(team_response(&state.db, model).await?))
}

#[utoipa::path(
    patch,
    path = "/teams/{id}",
    tag = "Teams",
    operation_id = "updateTeam",
    summary = "Update a team",
    description = "Applies only the fields present in the body. A present `participant_ids` list replaces the member set; `[]` removes every member.",
    params(("id" = i32, Path, description = "Team ID")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    validate_update_team(&payload)?;

    if payload == UpdateTeamRequest::default() {
        let existing = find_team(&state.db, id).await?;
        return Ok(Json(team_response(&state.db, existing).await?));
    }

    let txn = state.db.begin().await?;
    let existing = find_team(&txn, id).await?;

    let model = match payload.name {
        Some(name) => {
            let mut active: team::ActiveModel = existing.into();
            active.name = Set(name);
            active.update(&txn).await?
        }
        None => existing,
    };

    if let Some(participant_ids) = payload.participant_ids {
        replace_links(&txn, LinkOwner::Team(id), &participant_ids).await?;
    }
    txn.commit().await?;

    Ok(Json(team_response(&state.db, model).await?))
}

#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "Teams",
    operation_id = "deleteTeam",
    summary = "Delete a team",
    description = "Deletes the team and its memberships. Fails with 409 while submissions still belong to it.",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team deleted", body = DeletedResponse),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Still referenced (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    let txn = state.db.begin().await?;
    find_team(&txn, id).await?;

    clear_links(&txn, LinkOwner::Team(id)).await?;
    team::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(team_id = id, "Team deleted");
    Ok(Json(DeletedResponse::ok()))
}

async fn find_team<C: ConnectionTrait>(db: &C, id: i32) -> Result<team::Model, AppError> {
    team::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))
}

async fn team_response<C: ConnectionTrait>(
    db: &C,
    model: team::Model,
) -> Result<TeamResponse, AppError> {
    team_responses(db, vec![model])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Team response was not built".into()))
}

/// Attach members and submissions to each team.
async fn team_responses<C: ConnectionTrait>(
    db: &C,
    models: Vec<team::Model>,
) -> Result<Vec<TeamResponse>, AppError> {
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

    let links = participant_team::Entity::find()
        .filter(participant_team::Column::TeamId.is_in(ids.clone()))
        .order_by_asc(participant_team::Column::ParticipantId)
        .all(db)
        .await?;
    let participants: HashMap<i32, participant::Model> = participant::Entity::find()
        .filter(
            participant::Column::Id
                .is_in(links.iter().map(|l| l.participant_id).collect::<Vec<_>>()),
        )
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let submissions = submission::Entity::find()
        .filter(submission::Column::TeamId.is_in(ids))
        .order_by_asc(submission::Column::Id)
        .all(db)
        .await?;

    let mut members_by_team: HashMap<i32, Vec<TeamMember>> = HashMap::new();
    for link in links {
        if let Some(p) = participants.get(&link.participant_id) {
            members_by_team
                .entry(link.team_id)
                .or_default()
                .push(TeamMember::new(p.clone(), link.joined_at));
        }
    }
    let mut submissions_by_team: HashMap<i32, Vec<SubmissionSummary>> = HashMap::new();
    for s in submissions {
        submissions_by_team
            .entry(s.team_id)
            .or_default()
            .push(s.into());
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let members = members_by_team.remove(&m.id).unwrap_or_default();
            let submissions = submissions_by_team.remove(&m.id).unwrap_or_default();
            TeamResponse::new(m, members, submissions)
        })
        .collect())
}
