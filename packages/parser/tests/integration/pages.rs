use crate::common::TestApp;

#[tokio::test]
async fn list_returns_parsed_pages_in_order() {
    let app = TestApp::spawn().await;

    app.post_parse("/parse", &app.site_url("/full")).await;
    app.post_parse("/parse", &app.site_url("/bare")).await;

    let res = app.get("/pages").await;
    assert_eq!(res.status, 200, "{}", res.text);

    let pages = res.body.as_array().expect("list should be an array");
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["name"], "Test Page");
    assert_eq!(pages[1]["name"], "No name");
    assert!(pages[0]["parsed_at"].is_string());
}

#[tokio::test]
async fn get_page_by_id() {
    let app = TestApp::spawn().await;
    app.post_parse("/parse", &app.site_url("/full")).await;

    let list = app.get("/pages").await;
    let id = list.body[0]["id"].as_i64().unwrap();

    let res = app.get(&format!("/pages/{id}")).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["description"], "A nice description");
}

#[tokio::test]
async fn get_missing_page_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get("/pages/999").await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["message"], "Page not found");
}
