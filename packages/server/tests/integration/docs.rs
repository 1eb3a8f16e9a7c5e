use crate::common::TestApp;

#[tokio::test]
async fn create_operations_document_created_status() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;
    assert_eq!(res.status, 200, "{}", res.text);

    for path in [
        "/participants",
        "/teams",
        "/challenges",
        "/submissions",
        "/evaluations",
    ] {
        let responses = &res.body["paths"][path]["post"]["responses"];
        assert!(responses.get("201").is_some(), "{path}: {responses}");
        assert!(responses.get("200").is_none(), "{path}: {responses}");
        assert!(responses.get("422").is_some(), "{path}: {responses}");
    }
}

#[tokio::test]
async fn parse_operations_document_validation_error() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    for path in ["/parse", "/parse_celery"] {
        let responses = &res.body["paths"][path]["post"]["responses"];
        assert!(responses.get("422").is_some(), "{path}: {responses}");
    }
}
