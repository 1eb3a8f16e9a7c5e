use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_optional_required, validate_required};
use super::submission::SubmissionSummary;
use crate::entity::challenge;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateChallengeRequest {
    #[schema(example = "Build a search engine")]
    pub title: String,
    pub description: Option<String>,
    pub criteria: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateChallengeRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub criteria: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChallengeSummary {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub criteria: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChallengeResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub criteria: Option<String>,
    pub submissions: Vec<SubmissionSummary>,
}

impl From<challenge::Model> for ChallengeSummary {
    fn from(m: challenge::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            criteria: m.criteria,
        }
    }
}

impl ChallengeResponse {
    pub fn new(m: challenge::Model, submissions: Vec<SubmissionSummary>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            criteria: m.criteria,
            submissions,
        }
    }
}

pub fn validate_create_challenge(req: &CreateChallengeRequest) -> Result<(), AppError> {
    validate_required(&req.title, "title")
}

pub fn validate_update_challenge(req: &UpdateChallengeRequest) -> Result<(), AppError> {
    validate_optional_required(req.title.as_deref(), "title")
}
