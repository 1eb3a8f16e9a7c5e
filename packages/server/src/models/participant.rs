use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::evaluation::EvaluationSummary;
use super::shared::{double_option, validate_optional_required, validate_required};
use crate::entity::participant;
use crate::error::AppError;

/// Request body for creating a participant.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateParticipantRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub phone: Option<String>,
    /// Teams to join. Unknown team IDs are ignored.
    #[schema(example = json!([1, 2]))]
    pub team_ids: Option<Vec<i32>>,
}

/// Request body for partially updating a participant.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateParticipantRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Send `null` to clear the phone number.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    /// Replaces the participant's team set when present.
    pub team_ids: Option<Vec<i32>>,
}

/// Participant fields without relations.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ParticipantSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A team the participant belongs to.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamMembership {
    pub team_id: i32,
    pub team_name: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ParticipantResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub teams: Vec<TeamMembership>,
    /// Evaluations this participant gave as a judge.
    pub evaluations: Vec<EvaluationSummary>,
}

impl From<participant::Model> for ParticipantSummary {
    fn from(m: participant::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
        }
    }
}

impl ParticipantResponse {
    pub fn new(
        m: participant::Model,
        teams: Vec<TeamMembership>,
        evaluations: Vec<EvaluationSummary>,
    ) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            teams,
            evaluations,
        }
    }
}

pub fn validate_create_participant(req: &CreateParticipantRequest) -> Result<(), AppError> {
    validate_required(&req.name, "name")?;
    validate_required(&req.email, "email")
}

pub fn validate_update_participant(req: &UpdateParticipantRequest) -> Result<(), AppError> {
    validate_optional_required(req.name.as_deref(), "name")?;
    validate_optional_required(req.email.as_deref(), "email")
}
