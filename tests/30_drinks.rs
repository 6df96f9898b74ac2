mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{token, water_recipe, TestApp, ALL_PERMISSIONS};

#[tokio::test]
async fn create_returns_long_drink() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/drinks",
            Some(&token(&["post:drinks"])),
            json!({"title": "Water", "recipe": water_recipe()}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["drinks"].as_array().unwrap().len(), 1);
    assert_eq!(body["drinks"][0]["title"], "Water");
    assert_eq!(body["drinks"][0]["recipe"][0]["name"], "water");
    assert!(body["drinks"][0]["id"].is_i64());
}

#[tokio::test]
async fn create_without_recipe_is_400_with_or_without_token() {
    let app = TestApp::new();
    let body = json!({"title": "Water"});

    let (status, response) = app.post("/drinks", None, body.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "bad request");

    let (status, _) = app
        .post("/drinks", Some(&token(ALL_PERMISSIONS)), body)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.get("/drinks", None).await.1["drinks"], json!([]));
}

#[tokio::test]
async fn create_without_title_or_with_bad_json_is_400() {
    let app = TestApp::new();
    let token = token(ALL_PERMISSIONS);

    let (status, _) = app
        .post("/drinks", Some(&token), json!({"recipe": water_recipe()}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/drinks", Some(&token), json!({"title": "Water", "recipe": "water"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_valid_body_still_needs_credentials() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/drinks", None, json!({"title": "Water", "recipe": water_recipe()}))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "authorization_header_missing");
}

#[tokio::test]
async fn single_ingredient_object_is_stored_as_list() {
    let app = TestApp::new();
    let drink = app
        .create_drink(
            "espresso",
            json!({"name": "espresso", "color": "brown", "parts": 1}),
        )
        .await;

    assert_eq!(
        drink["recipe"],
        json!([{"name": "espresso", "color": "brown", "parts": 1}])
    );
}

#[tokio::test]
async fn duplicate_title_is_422() {
    let app = TestApp::new();
    app.create_drink("water", water_recipe()).await;

    let (status, body) = app
        .post(
            "/drinks",
            Some(&token(ALL_PERMISSIONS)),
            json!({"title": "water", "recipe": water_recipe()}),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({"success": false, "error": 422, "message": "unprocessable"})
    );
}

#[tokio::test]
async fn overlong_title_is_422() {
    let app = TestApp::new();
    let (status, _) = app
        .post(
            "/drinks",
            Some(&token(ALL_PERMISSIONS)),
            json!({"title": "x".repeat(81), "recipe": water_recipe()}),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn long_recipe_is_accepted() {
    let app = TestApp::new();
    let recipe: Vec<_> = (1..=10)
        .map(|i| json!({"name": format!("ingredient {}", i), "color": "caramel brown", "parts": i}))
        .collect();
    let recipe = json!(recipe);
    assert!(recipe.to_string().len() > 180);

    let (status, body) = app
        .post(
            "/drinks",
            Some(&token(ALL_PERMISSIONS)),
            json!({"title": "kitchen sink", "recipe": recipe}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["recipe"], recipe);
}

#[tokio::test]
async fn recipe_order_survives_storage() {
    let app = TestApp::new();
    let recipe = json!([
        {"name": "espresso", "color": "brown", "parts": 1},
        {"name": "milk", "color": "white", "parts": 2},
        {"name": "foam", "color": "cream", "parts": 1},
        {"name": "cocoa", "color": "dark brown", "parts": 0.5}
    ]);
    app.create_drink("mocha", recipe.clone()).await;

    let (status, body) = app
        .get("/drinks-detail", Some(&token(&["get:drinks-detail"])))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["recipe"], recipe);
}

#[tokio::test]
async fn patch_updates_title_and_keeps_recipe() {
    let app = TestApp::new();
    let created = app.create_drink("water", water_recipe()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .patch(
            &format!("/drinks/{}", id),
            Some(&token(&["patch:drinks"])),
            json!({"title": "still water"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["drinks"],
        json!([{"id": id, "title": "still water", "recipe": water_recipe()}])
    );
}

#[tokio::test]
async fn patch_is_idempotent() {
    let app = TestApp::new();
    let id = app.create_drink("water", water_recipe()).await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/drinks/{}", id);
    let token = token(&["patch:drinks"]);
    let patch = json!({
        "title": "lemon water",
        "recipe": [
            {"name": "water", "color": "blue", "parts": 3},
            {"name": "lemon", "color": "yellow", "parts": 1}
        ]
    });

    let (first_status, first) = app.patch(&uri, Some(&token), patch.clone()).await;
    let (second_status, second) = app.patch(&uri, Some(&token), patch).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn patch_to_taken_title_is_422() {
    let app = TestApp::new();
    app.create_drink("water", water_recipe()).await;
    let id = app.create_drink("tea", water_recipe()).await["id"]
        .as_i64()
        .unwrap();

    let (status, _) = app
        .patch(
            &format!("/drinks/{}", id),
            Some(&token(&["patch:drinks"])),
            json!({"title": "water"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn patch_unknown_or_non_numeric_id_is_404() {
    let app = TestApp::new();
    let token = token(&["patch:drinks"]);

    for uri in ["/drinks/999", "/drinks/latte"] {
        let (status, body) = app.patch(uri, Some(&token), json!({"title": "x"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["message"], "resource not found");
    }
}

#[tokio::test]
async fn patch_checks_credentials_before_lookup() {
    let app = TestApp::new();
    let (status, _) = app.patch("/drinks/999", None, json!({"title": "x"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_removes_drink() {
    let app = TestApp::new();
    let id = app.create_drink("water", water_recipe()).await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/drinks/{}", id);
    let token = token(&["delete:drinks"]);

    let (status, body) = app.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "delete": id}));

    assert_eq!(app.get("/drinks", None).await.1["drinks"], json!([]));

    let (status, _) = app.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_non_numeric_id_is_404() {
    let app = TestApp::new();
    let (status, _) = app
        .delete("/drinks/latte", Some(&token(&["delete:drinks"])))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let app = TestApp::new();
    let first = app.create_drink("water", water_recipe()).await["id"]
        .as_i64()
        .unwrap();
    app.delete(&format!("/drinks/{}", first), Some(&token(&["delete:drinks"])))
        .await;

    let second = app.create_drink("water", water_recipe()).await["id"]
        .as_i64()
        .unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn drinks_collection_rejects_delete() {
    let app = TestApp::new();
    let (status, _) = app
        .request(Method::DELETE, "/drinks", None, None)
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
