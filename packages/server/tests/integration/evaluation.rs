use crate::common::{TestApp, routes};
use serde_json::json;

struct Fixture {
    judge: i32,
    submission: i32,
}

async fn fixture(app: &TestApp) -> Fixture {
    let judge = app.create_participant("Judge").await;
    let team = app.create_team("Alpha").await;
    let challenge = app.create_challenge("Search").await;
    let submission = app.create_submission(team, challenge).await;
    Fixture { judge, submission }
}

#[tokio::test]
async fn create_evaluation_nests_submission_and_judge() {
    let app = TestApp::spawn().await;
    let f = fixture(&app).await;

    let res = app
        .post(
            routes::EVALUATIONS,
            &json!({
                "submission_id": f.submission,
                "judge_id": f.judge,
                "score": 8.25,
                "comments": "Solid demo",
            }),
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["score"], 8.25);
    assert_eq!(res.body["comments"], "Solid demo");
    assert!(res.body["evaluated_at"].is_string());
    assert_eq!(res.body["submission"]["id"], f.submission);
    assert_eq!(res.body["judge"]["name"], "Judge");
}

#[tokio::test]
async fn submission_lists_its_evaluations() {
    let app = TestApp::spawn().await;
    let f = fixture(&app).await;
    let id = app.create_evaluation(f.submission, f.judge, 6.0).await;

    let res = app.get(&routes::submission(f.submission)).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["evaluations"][0]["id"], id);
    assert_eq!(res.body["evaluations"][0]["judge_id"], f.judge);
}

#[tokio::test]
async fn update_score_and_clear_comments() {
    let app = TestApp::spawn().await;
    let f = fixture(&app).await;
    let res = app
        .post(
            routes::EVALUATIONS,
            &json!({ "submission_id": f.submission, "judge_id": f.judge, "score": 5.0, "comments": "meh" }),
        )
        .await;
    let id = res.id();

    let res = app
        .patch(&routes::evaluation(id), &json!({ "score": 9.5, "comments": null }))
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["score"], 9.5);
    assert!(res.body["comments"].is_null());
    assert_eq!(res.body["judge_id"], f.judge);
}

#[tokio::test]
async fn unknown_judge_is_a_conflict() {
    let app = TestApp::spawn().await;
    let f = fixture(&app).await;

    let res = app
        .post(
            routes::EVALUATIONS,
            &json!({ "submission_id": f.submission, "judge_id": 9999, "score": 1.0 }),
        )
        .await;

    assert_eq!(res.status, 409, "{}", res.text);
}

#[tokio::test]
async fn string_score_is_rejected() {
    let app = TestApp::spawn().await;
    let f = fixture(&app).await;

    let res = app
        .post(
            routes::EVALUATIONS,
            &json!({ "submission_id": f.submission, "judge_id": f.judge, "score": "high" }),
        )
        .await;

    assert_eq!(res.status, 422);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn delete_evaluation_then_not_found() {
    let app = TestApp::spawn().await;
    let f = fixture(&app).await;
    let id = app.create_evaluation(f.submission, f.judge, 4.0).await;

    let res = app.delete(&routes::evaluation(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!({ "ok": true }));

    let res = app.get(&routes::evaluation(id)).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["message"], "Evaluation not found");
}
