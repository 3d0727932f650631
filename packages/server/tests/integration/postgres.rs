//! The HTTP surface served from PostgreSQL instead of memory.

use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn duplicate_title_is_a_conflict_ignoring_case() {
    let app = TestApp::spawn_postgres().await;
    app.create_item("Nova").await;

    let res = app
        .post(
            routes::ITEMS,
            &json!({ "title": "nova", "genre": "RPG", "platform": "PC" }),
        )
        .await;
    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.body["code"], "CONFLICT");

    let res = app.get(routes::ITEMS).await;
    assert_eq!(res.body["count"], 1);
}

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn rename_onto_another_title_hits_the_unique_index() {
    let app = TestApp::spawn_postgres().await;
    app.create_item("Nova").await;
    let other = app.create_item("Other").await;

    let res = app
        .put(&routes::item(&other), &json!({ "title": "NOVA" }))
        .await;
    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.body["code"], "CONFLICT");

    let res = app.get(&routes::item(&other)).await;
    assert_eq!(res.body["title"], "Other");
}

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn filters_and_search_run_in_sql() {
    let app = TestApp::spawn_postgres().await;
    for body in [
        json!({ "title": "Hollow Knight", "genre": "Platformer", "platform": "PC",
                "developer": "Team Cherry", "completed": true }),
        json!({ "title": "Celeste", "genre": "Platformer", "platform": "Nintendo Switch",
                "developer": "Maddy Makes Games" }),
        json!({ "title": "100% Orange Juice", "genre": "Strategy", "platform": "PC" }),
    ] {
        let res = app.post(routes::ITEMS, &body).await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    let res = app
        .get(&format!("{}?genre=Platformer&completed=false", routes::ITEMS))
        .await;
    assert_eq!(res.body["count"], 1);
    assert_eq!(res.body["data"][0]["title"], "Celeste");

    let res = app.get(&format!("{}?search=CHERRY", routes::ITEMS)).await;
    assert_eq!(res.body["count"], 1);
    assert_eq!(res.body["data"][0]["title"], "Hollow Knight");

    let res = app.get(&format!("{}?search=100%25", routes::ITEMS)).await;
    assert_eq!(res.body["count"], 1);
    assert_eq!(res.body["data"][0]["title"], "100% Orange Juice");

    let res = app.get(routes::ITEMS).await;
    assert_eq!(res.body["data"][0]["title"], "100% Orange Juice");
    assert_eq!(res.body["data"][2]["title"], "Hollow Knight");
}

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn update_and_delete_of_missing_records_are_not_found() {
    let app = TestApp::spawn_postgres().await;
    let missing = "65a1f0c2b3d4e5f60718293a";

    let res = app
        .put(&routes::item(missing), &json!({ "title": "Ghost" }))
        .await;
    assert_eq!(res.status, 404, "{}", res.text);

    let res = app.delete(&routes::review(missing)).await;
    assert_eq!(res.status, 404, "{}", res.text);

    let res = app.get(routes::ITEMS).await;
    assert_eq!(res.body["count"], 0);
}

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn deleting_the_item_leaves_orphans_with_null_item() {
    let app = TestApp::spawn_postgres().await;
    let item_id = app.create_item("Nova").await;
    let first = app.create_review(&item_id, 3).await;
    let second = app.create_review(&item_id, 5).await;

    let res = app.delete(&routes::item(&item_id)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["title"], "Nova");

    let res = app.get(&routes::review(&first)).await;
    assert_eq!(res.status, 200);
    assert!(res.body["item"].is_null());
    assert_eq!(res.body["itemId"], item_id.as_str());

    let res = app.get(&routes::item_reviews(&item_id)).await;
    assert_eq!(res.body["count"], 2);
    assert_eq!(res.body["data"][0]["id"], second.as_str());
    assert!(res.body["data"][1]["item"].is_null());

    let res = app.put(&routes::review(&first), &json!({ "score": 4 })).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["score"], 4);
    assert!(res.body["item"].is_null());
}
