use crate::common::{TestApp, routes};
use serde_json::json;

#[tokio::test]
async fn create_team_with_members() {
    let app = TestApp::spawn().await;
    let ada = app.create_participant("Ada").await;
    let grace = app.create_participant("Grace").await;

    let res = app
        .post(
            routes::TEAMS,
            &json!({ "name": "Rustaceans", "participant_ids": [grace, ada] }),
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["name"], "Rustaceans");
    let members = res.body["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["id"], ada);
    assert_eq!(members[0]["email"], "ada@example.com");
    assert!(members[0]["joined_at"].is_string());
    assert_eq!(res.body["submissions"], json!([]));
}

#[tokio::test]
async fn team_lists_its_submissions() {
    let app = TestApp::spawn().await;
    let team = app.create_team("Alpha").await;
    let challenge = app.create_challenge("Search").await;
    let submission = app.create_submission(team, challenge).await;

    let res = app.get(&routes::team(team)).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["submissions"][0]["id"], submission);
    assert_eq!(res.body["submissions"][0]["challenge_id"], challenge);
}

#[tokio::test]
async fn rename_keeps_members() {
    let app = TestApp::spawn().await;
    let ada = app.create_participant("Ada").await;
    let res = app
        .post(routes::TEAMS, &json!({ "name": "Alpha", "participant_ids": [ada] }))
        .await;
    let id = res.id();

    let res = app.patch(&routes::team(id), &json!({ "name": "Omega" })).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["name"], "Omega");
    assert_eq!(res.body["members"][0]["id"], ada);
}

#[tokio::test]
async fn participant_ids_replace_members() {
    let app = TestApp::spawn().await;
    let ada = app.create_participant("Ada").await;
    let grace = app.create_participant("Grace").await;
    let res = app
        .post(routes::TEAMS, &json!({ "name": "Alpha", "participant_ids": [ada, grace] }))
        .await;
    let id = res.id();
    let grace_joined = res.body["members"][1]["joined_at"].clone();

    let res = app
        .patch(&routes::team(id), &json!({ "participant_ids": [grace, 777] }))
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    let members = res.body["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["id"], grace);
    assert_eq!(members[0]["joined_at"], grace_joined);

    let res = app.get(&routes::participant(ada)).await;
    assert_eq!(res.body["teams"], json!([]));
}

#[tokio::test]
async fn empty_patch_returns_team_unchanged() {
    let app = TestApp::spawn().await;
    let id = app.create_team("Alpha").await;

    let res = app.patch(&routes::team(id), &json!({})).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["name"], "Alpha");
}

#[tokio::test]
async fn delete_missing_team_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.delete(&routes::team(4242)).await;

    assert_eq!(res.status, 404);
    assert!(res.text.contains("Team not found"), "{}", res.text);
}

#[tokio::test]
async fn delete_team_removes_memberships() {
    let app = TestApp::spawn().await;
    let ada = app.create_participant("Ada").await;
    let res = app
        .post(routes::TEAMS, &json!({ "name": "Alpha", "participant_ids": [ada] }))
        .await;
    let id = res.id();

    let res = app.delete(&routes::team(id)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["ok"], true);

    let res = app.get(&routes::participant(ada)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["teams"], json!([]));
}

#[tokio::test]
async fn team_with_submissions_cannot_be_deleted() {
    let app = TestApp::spawn().await;
    let team = app.create_team("Alpha").await;
    let challenge = app.create_challenge("Search").await;
    app.create_submission(team, challenge).await;

    let res = app.delete(&routes::team(team)).await;

    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.body["code"], "CONFLICT");
}
