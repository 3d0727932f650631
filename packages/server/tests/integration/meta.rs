use crate::common::{TestApp, routes};

#[tokio::test]
async fn root_describes_the_service() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::ROOT).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["endpoints"]["items"], routes::ITEMS);
    assert_eq!(res.body["endpoints"]["reviews"], routes::REVIEWS);
    assert!(res.body["version"].is_string());
}

#[tokio::test]
async fn unknown_routes_return_not_found_body() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/consoles").await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn openapi_document_lists_the_routes() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;
    assert_eq!(res.status, 200);
    assert!(res.body["paths"]["/api/items"].is_object(), "{}", res.text);
    assert!(res.body["paths"]["/api/reviews/item/{item_id}"].is_object());
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .get(format!("http://{}{}", app.addr, routes::ITEMS))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .expect("Failed to send GET request");

    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
}
