use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::participant::ParticipantSummary;
use super::shared::double_option;
use super::submission::SubmissionSummary;
use crate::entity::evaluation;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateEvaluationRequest {
    #[schema(example = 1)]
    pub submission_id: i32,
    /// Participant acting as judge.
    #[schema(example = 1)]
    pub judge_id: i32,
    #[schema(example = 8.5)]
    pub score: f64,
    pub comments: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateEvaluationRequest {
    pub submission_id: Option<i32>,
    pub judge_id: Option<i32>,
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub comments: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EvaluationSummary {
    pub id: i32,
    pub submission_id: i32,
    pub judge_id: i32,
    pub score: f64,
    pub comments: Option<String>,
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EvaluationResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub submission_id: i32,
    pub judge_id: i32,
    pub score: f64,
    pub comments: Option<String>,
    pub evaluated_at: DateTime<Utc>,
    pub submission: SubmissionSummary,
    pub judge: ParticipantSummary,
}

impl From<evaluation::Model> for EvaluationSummary {
    fn from(m: evaluation::Model) -> Self {
        Self {
            id: m.id,
            submission_id: m.submission_id,
            judge_id: m.judge_id,
            score: m.score,
            comments: m.comments,
            evaluated_at: m.evaluated_at,
        }
    }
}

impl EvaluationResponse {
    pub fn new(
        m: evaluation::Model,
        submission: SubmissionSummary,
        judge: ParticipantSummary,
    ) -> Self {
        Self {
            id: m.id,
            submission_id: m.submission_id,
            judge_id: m.judge_id,
            score: m.score,
            comments: m.comments,
            evaluated_at: m.evaluated_at,
            submission,
            judge,
        }
    }
}

fn validate_score(score: f64) -> Result<(), AppError> {
    if !score.is_finite() {
        return Err(AppError::Validation("score must be a finite number".into()));
    }
    Ok(())
}

pub fn validate_create_evaluation(req: &CreateEvaluationRequest) -> Result<(), AppError> {
    validate_score(req.score)
}

pub fn validate_update_evaluation(req: &UpdateEvaluationRequest) -> Result<(), AppError> {
    match req.score {
        Some(score) => validate_score(score),
        None => Ok(()),
    }
}
