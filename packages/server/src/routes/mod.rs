use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::challenge::*;
use crate::handlers::evaluation::*;
use crate::handlers::parse::*;
use crate::handlers::participant::*;
use crate::handlers::submission::*;
use crate::handlers::team::*;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(participant_routes())
        .merge(team_routes())
        .merge(challenge_routes())
        .merge(submission_routes())
        .merge(evaluation_routes())
        .merge(parse_routes())
}

fn participant_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_participants, create_participant))
        .routes(routes!(get_participant, update_participant, delete_participant))
}

fn team_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_teams, create_team))
        .routes(routes!(get_team, update_team, delete_team))
}

fn challenge_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_challenges, create_challenge))
        .routes(routes!(get_challenge, update_challenge, delete_challenge))
}

fn submission_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_submissions, create_submission))
        .routes(routes!(get_submission, update_submission, delete_submission))
}

fn evaluation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_evaluations, create_evaluation))
        .routes(routes!(get_evaluation, update_evaluation, delete_evaluation))
}

fn parse_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(trigger_parse))
        .routes(routes!(trigger_queued_parse))
}
