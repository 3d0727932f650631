use serde_json::json;

use crate::common::{TestApp, routes};

const MISSING_ID: &str = "65a1f0c2b3d4e5f60718293a";

mod item_creation {
    use super::*;

    #[tokio::test]
    async fn minimal_item_gets_defaults() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::ITEMS,
                &json!({ "title": "  Nova  ", "genre": "RPG", "platform": "PC" }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Nova");
        assert_eq!(res.body["genre"], "RPG");
        assert_eq!(res.body["platform"], "PC");
        assert_eq!(res.body["completed"], false);
        assert_eq!(
            res.body["coverImageUrl"],
            "https://via.placeholder.com/300x400?text=No+Cover"
        );
        assert!(res.body["createdAt"].is_string());
        let id = res.id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict_ignoring_case() {
        let app = TestApp::spawn().await;
        app.create_item("Nova").await;

        let res = app
            .post(
                routes::ITEMS,
                &json!({ "title": "nova", "genre": "Action", "platform": "PC" }),
            )
            .await;

        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.body["code"], "CONFLICT");
        assert_eq!(app.get(routes::ITEMS).await.body["count"], 1);
    }

    #[tokio::test]
    async fn all_rule_violations_are_reported_together() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::ITEMS,
                &json!({ "genre": "Fighting", "platform": "PC", "releaseYear": 1969 }),
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["errors"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::ITEMS, "{ not json").await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app
            .post(routes::ITEMS, &json!({ "title": 42, "genre": "RPG", "platform": "PC" }))
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
    }
}

mod item_listing {
    use super::*;

    async fn seed(app: &TestApp) {
        for body in [
            json!({ "title": "Hollow Knight", "genre": "Platformer", "platform": "PC",
                    "developer": "Team Cherry", "completed": true }),
            json!({ "title": "Celeste", "genre": "Platformer", "platform": "Nintendo Switch",
                    "developer": "Maddy Makes Games" }),
            json!({ "title": "Halo Infinite", "genre": "Shooter", "platform": "Xbox Series X/S",
                    "developer": "343 Industries", "completed": true }),
        ] {
            let res = app.post(routes::ITEMS, &body).await;
            assert_eq!(res.status, 201, "{}", res.text);
        }
    }

    fn titles(body: &serde_json::Value) -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn lists_newest_first_with_count() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(routes::ITEMS).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["count"], 3);
        assert_eq!(
            titles(&res.body),
            ["Halo Infinite", "Celeste", "Hollow Knight"]
        );
    }

    #[tokio::test]
    async fn filters_combine() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app
            .get(&format!("{}?genre=Platformer&completed=true", routes::ITEMS))
            .await;
        assert_eq!(titles(&res.body), ["Hollow Knight"]);

        let res = app.get(&format!("{}?completed=false", routes::ITEMS)).await;
        assert_eq!(titles(&res.body), ["Celeste"]);

        let res = app.get(&format!("{}?completed=yes", routes::ITEMS)).await;
        assert_eq!(titles(&res.body), ["Celeste"]);

        let res = app.get(&format!("{}?genre=&platform=", routes::ITEMS)).await;
        assert_eq!(res.body["count"], 3);
    }

    #[tokio::test]
    async fn search_matches_title_or_developer() {
        let app = TestApp::spawn().await;
        seed(&app).await;

        let res = app.get(&format!("{}?search=CHERRY", routes::ITEMS)).await;
        assert_eq!(titles(&res.body), ["Hollow Knight"]);

        let res = app.get(&format!("{}?search=e", routes::ITEMS)).await;
        assert_eq!(res.body["count"], 3);

        let res = app.get(&format!("{}?search=%20%20", routes::ITEMS)).await;
        assert_eq!(res.body["count"], 3);

        let res = app.get(&format!("{}?search=.*", routes::ITEMS)).await;
        assert_eq!(res.body["count"], 0);
    }
}

mod item_lookup {
    use super::*;

    #[tokio::test]
    async fn get_by_id() {
        let app = TestApp::spawn().await;
        let id = app.create_item("Nova").await;

        let res = app.get(&routes::item(&id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Nova");

        let res = app.get(&routes::item(MISSING_ID)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let res = app.get(&routes::item("xyz")).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "INVALID_ARGUMENT");
    }
}

mod item_update {
    use super::*;

    #[tokio::test]
    async fn merges_and_revalidates() {
        let app = TestApp::spawn().await;
        let id = app.create_item("Nova").await;

        let res = app
            .put(
                &routes::item(&id),
                &json!({ "completed": true, "developer": "Studio" }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["completed"], true);
        assert_eq!(res.body["developer"], "Studio");
        assert_eq!(res.body["title"], "Nova");

        let res = app.put(&routes::item(&id), &json!({ "developer": null })).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["developer"].is_null());

        let res = app.put(&routes::item(&id), &json!({ "genre": "Fighting" })).await;
        assert_eq!(res.status, 400);
        assert_eq!(app.get(&routes::item(&id)).await.body["genre"], "RPG");
    }

    #[tokio::test]
    async fn missing_or_malformed_ids() {
        let app = TestApp::spawn().await;

        let res = app.put(&routes::item(MISSING_ID), &json!({})).await;
        assert_eq!(res.status, 404);

        let res = app.put(&routes::item("12345"), &json!({})).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "INVALID_ARGUMENT");
    }
}

mod item_deletion {
    use super::*;

    #[tokio::test]
    async fn returns_snapshot_and_is_not_repeatable() {
        let app = TestApp::spawn().await;
        let id = app.create_item("Nova").await;

        let res = app.delete(&routes::item(&id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id.as_str());
        assert_eq!(res.body["title"], "Nova");

        assert_eq!(app.get(&routes::item(&id)).await.status, 404);
        assert_eq!(app.delete(&routes::item(&id)).await.status, 404);
    }
}
