mod common;

use axum::http::{Method, StatusCode};
use common::{error_message, user, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_create_then_get_user() {
    let app = TestApp::new();

    let (status, created) = app.post("/users", user("Ann", 30, "5551234567")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert!(created.get("team_id").is_none());

    let (status, fetched) = app.get("/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["name"], "Ann");
    assert_eq!(fetched["age"], 30);
    assert_eq!(fetched["phone"], "5551234567");
}

#[tokio::test]
async fn test_create_user_age_out_of_range() {
    let app = TestApp::new();

    let (status, body) = app.post("/users", user("Ann", 200, "5551234567")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("age"));

    let (_, users) = app.get("/users").await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_create_user_age_bounds_inclusive() {
    let app = TestApp::new();

    app.create_user(user("Newborn", 0, "5551234567")).await;
    app.create_user(user("Elder", 150, "5551234567")).await;

    let (status, _) = app.post("/users", user("Ann", -1, "5551234567")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_phone_rules() {
    let app = TestApp::new();

    let (status, body) = app.post("/users", user("Ann", 30, "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("phone"));

    let (status, body) = app.post("/users", user("Ann", 30, "555123")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("at least 10"));

    let (status, body) = app.post("/users", user("Ann", 30, "555-123-4567")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("invalid character"));
}

#[tokio::test]
async fn test_first_failing_rule_is_reported() {
    let app = TestApp::new();

    let (status, body) = app.post("/users", user("", 200, "x")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "User name cannot be empty");
}

#[tokio::test]
async fn test_missing_fields_fail_validation() {
    let app = TestApp::new();

    let (status, body) = app.post("/users", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "User name cannot be empty");
}

#[tokio::test]
async fn test_undecodable_bodies_are_bad_requests() {
    let app = TestApp::new();

    let (status, body) = app.raw(Method::POST, "/users", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());

    let (status, body) = app
        .post("/users", json!({ "name": "Ann", "age": "thirty", "phone": "5551234567" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());
}

#[tokio::test]
async fn test_get_user_bad_ids() {
    let app = TestApp::new();

    for id in ["abc", "0", "-3", "99999999999999999999999"] {
        let (status, body) = app.get(&format!("/users/{}", id)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "id {}", id);
        assert!(!error_message(&body).is_empty());
    }
}

#[tokio::test]
async fn test_get_missing_user() {
    let app = TestApp::new();

    let (status, body) = app.get("/users/42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "User 42 not found");
}

#[tokio::test]
async fn test_list_users_in_id_order() {
    let app = TestApp::new();

    for name in ["Ann", "Bob", "Cy"] {
        app.create_user(user(name, 30, "5551234567")).await;
    }

    let (status, users) = app.get("/users").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ann", "Bob", "Cy"]);
}

#[tokio::test]
async fn test_update_user() {
    let app = TestApp::new();
    let id = app.create_user(user("Ann", 30, "5551234567")).await;

    let (status, updated) = app
        .put(&format!("/users/{}", id), user("Anne", 31, "5550001111"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Anne");

    let (_, fetched) = app.get(&format!("/users/{}", id)).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_missing_user_does_not_create() {
    let app = TestApp::new();

    let (status, _) = app.put("/users/5", user("Ann", 30, "5551234567")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, users) = app.get("/users").await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_invalid_update_leaves_user_unchanged() {
    let app = TestApp::new();
    let id = app.create_user(user("Ann", 30, "5551234567")).await;
    let (_, before) = app.get(&format!("/users/{}", id)).await;

    let (status, _) = app
        .put(&format!("/users/{}", id), user("Ann", 30, "call-me"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, after) = app.get(&format!("/users/{}", id)).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_delete_user_twice() {
    let app = TestApp::new();
    let id = app.create_user(user("Ann", 30, "5551234567")).await;

    let (status, body) = app.delete(&format!("/users/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": true, "id": id }));

    let (status, _) = app.delete(&format!("/users/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&format!("/users/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_are_not_reused() {
    let app = TestApp::new();

    let first = app.create_user(user("Ann", 30, "5551234567")).await;
    app.delete(&format!("/users/{}", first)).await;
    let second = app.create_user(user("Bob", 30, "5551234567")).await;

    assert!(second > first);
}

#[tokio::test]
async fn test_unknown_team_reference_is_rejected() {
    let app = TestApp::new();

    let mut body = user("Ann", 30, "5551234567");
    body["team_id"] = json!(9);

    let (status, response) = app.post("/users", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response), "Team 9 does not exist");
}

#[tokio::test]
async fn test_user_with_team() {
    let app = TestApp::new();
    let team_id = app.create_team("Core").await;

    let mut body = user("Ann", 30, "5551234567");
    body["team_id"] = json!(team_id);

    let (status, created) = app.post("/users", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["team_id"], team_id);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let app = TestApp::new();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let router = app.router();
            tokio::spawn(async move {
                let request = axum::http::Request::builder()
                    .method(Method::POST)
                    .uri("/users")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(
                        user(&format!("User {}", i), 30, "5551234567").to_string(),
                    ))
                    .unwrap();

                common::send(router, request).await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["id"].as_i64().unwrap());
    }

    ids.sort_unstable();
    assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_undecodable_path_id_is_json_error() {
    let app = TestApp::new();

    let (status, body) = app.get("/users/%FF").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());
}

#[tokio::test]
async fn test_unsupported_method_is_json_error() {
    let app = TestApp::new();
    app.create_user(user("Ann", 30, "5551234567")).await;

    let (status, body) = app
        .request(Method::PATCH, "/users/1", Some(user("Ann", 31, "5551234567")))
        .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_message(&body), "Method PATCH not allowed for /users/1");
}
