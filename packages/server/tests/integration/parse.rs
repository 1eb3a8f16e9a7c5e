use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::post;

use crate::common::{TestApp, routes, serve};

type Received = Arc<Mutex<Vec<String>>>;

/// A parser service that accepts direct parses and rejects queued ones.
async fn spawn_parser() -> (String, Received) {
    let received: Received = Arc::default();

    let app = Router::new()
        .route(
            "/parse",
            post(
                |State(received): State<Received>,
                 Query(query): Query<HashMap<String, String>>| async move {
                    received
                        .lock()
                        .unwrap()
                        .push(query.get("url").cloned().unwrap_or_default());
                    axum::Json(serde_json::json!({ "message": "Parsing completed" }))
                },
            ),
        )
        .route(
            "/parse_celery",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "Task queue is not available") }),
        )
        .with_state(received.clone());

    let addr = serve(app).await;
    (format!("http://{addr}"), received)
}

#[tokio::test]
async fn direct_parse_is_forwarded_with_encoded_url() {
    let (parser_url, received) = spawn_parser().await;
    let app = TestApp::spawn_with_parser(&parser_url).await;
    let target = "https://example.com/page?a=1&b=two words";

    let res = app.post_query(routes::PARSE, &[("url", target)]).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["message"], "Parser completed");
    assert_eq!(*received.lock().unwrap(), vec![target.to_string()]);
}

#[tokio::test]
async fn downstream_error_status_and_body_are_relayed() {
    let (parser_url, _) = spawn_parser().await;
    let app = TestApp::spawn_with_parser(&parser_url).await;

    let res = app
        .post_query(routes::PARSE_QUEUED, &[("url", "https://example.com")])
        .await;

    assert_eq!(res.status, 503, "{}", res.text);
    assert_eq!(res.body["code"], "UPSTREAM_ERROR");
    assert_eq!(res.body["message"], "Task error: Task queue is not available");
}

#[tokio::test]
async fn unreachable_parser_is_an_internal_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);
    let app = TestApp::spawn_with_parser(&format!("http://{closed}")).await;

    let res = app
        .post_query(routes::PARSE, &[("url", "https://example.com")])
        .await;

    assert_eq!(res.status, 500, "{}", res.text);
    assert_eq!(res.body["code"], "UPSTREAM_UNREACHABLE");
    assert!(
        res.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Parser request failed: "),
        "{}",
        res.text
    );
}

#[tokio::test]
async fn missing_url_is_rejected_before_forwarding() {
    let (parser_url, received) = spawn_parser().await;
    let app = TestApp::spawn_with_parser(&parser_url).await;

    let res = app.post_query(routes::PARSE, &[]).await;

    assert_eq!(res.status, 422, "{}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(received.lock().unwrap().is_empty());
}
