use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::challenge::ChallengeSummary;
use super::evaluation::EvaluationSummary;
use super::shared::{validate_optional_required, validate_required};
use super::team::TeamSummary;
use crate::entity::submission;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSubmissionRequest {
    #[schema(example = 1)]
    pub team_id: i32,
    #[schema(example = 1)]
    pub challenge_id: i32,
    #[schema(example = "https://example.com/project.zip")]
    pub file_url: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateSubmissionRequest {
    pub team_id: Option<i32>,
    pub challenge_id: Option<i32>,
    pub file_url: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionSummary {
    pub id: i32,
    pub team_id: i32,
    pub challenge_id: i32,
    pub file_url: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub team_id: i32,
    pub challenge_id: i32,
    pub file_url: String,
    pub submitted_at: DateTime<Utc>,
    pub team: TeamSummary,
    pub challenge: ChallengeSummary,
    pub evaluations: Vec<EvaluationSummary>,
}

impl From<submission::Model> for SubmissionSummary {
    fn from(m: submission::Model) -> Self {
        Self {
            id: m.id,
            team_id: m.team_id,
            challenge_id: m.challenge_id,
            file_url: m.file_url,
            submitted_at: m.submitted_at,
        }
    }
}

impl SubmissionResponse {
    pub fn new(
        m: submission::Model,
        team: TeamSummary,
        challenge: ChallengeSummary,
        evaluations: Vec<EvaluationSummary>,
    ) -> Self {
        Self {
            id: m.id,
            team_id: m.team_id,
            challenge_id: m.challenge_id,
            file_url: m.file_url,
            submitted_at: m.submitted_at,
            team,
            challenge,
            evaluations,
        }
    }
}

pub fn validate_create_submission(req: &CreateSubmissionRequest) -> Result<(), AppError> {
    validate_required(&req.file_url, "file_url")
}

pub fn validate_update_submission(req: &UpdateSubmissionRequest) -> Result<(), AppError> {
    validate_optional_required(req.file_url.as_deref(), "file_url")
}
