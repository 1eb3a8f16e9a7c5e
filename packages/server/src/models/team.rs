use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_optional_required, validate_required};
use super::submission::SubmissionSummary;
use crate::entity::{participant, team};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTeamRequest {
    #[schema(example = "Rustaceans")]
    pub name: String,
    /// Initial members. Unknown participant IDs are ignored.
    pub participant_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    /// Replaces the member set when present; `[]` removes every member.
    pub participant_ids: Option<Vec<i32>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamSummary {
    pub id: i32,
    pub name: String,
}

/// A participant in the team, with the time they joined.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamMember {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub members: Vec<TeamMember>,
    pub submissions: Vec<SubmissionSummary>,
}

impl From<team::Model> for TeamSummary {
    fn from(m: team::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl TeamMember {
    pub fn new(m: participant::Model, joined_at: DateTime<Utc>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            joined_at,
        }
    }
}

impl TeamResponse {
    pub fn new(m: team::Model, members: Vec<TeamMember>, submissions: Vec<SubmissionSummary>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            members,
            submissions,
        }
    }
}

pub fn validate_create_team(req: &CreateTeamRequest) -> Result<(), AppError> {
    validate_required(&req.name, "name")
}

pub fn validate_update_team(req: &UpdateTeamRequest) -> Result<(), AppError> {
    validate_optional_required(req.name.as_deref(), "name")
}
