//! End-to-end tests for registration and the token endpoints.

mod common;

use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_login_refresh_roundtrip() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/v1/auth/register", app.base))
        .json(&json!({
            "username": "poster",
            "email": "poster@example.com",
            "password": "SecurePass123!",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let registered: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(registered["username"], "poster");
    assert_eq!(registered["token_type"], "Bearer");
    assert!(registered["access_token"].as_str().is_some());
    assert!(registered["refresh_token"].as_str().is_some());

    // The same credentials work against the token endpoint.
    let resp = client
        .post(format!("{}/api/v1/auth/token", app.base))
        .json(&json!({ "username": "poster", "password": "SecurePass123!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let pair: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(pair["expires_in"], 3600);

    // The refresh token buys a fresh pair.
    let resp = client
        .post(format!("{}/api/v1/auth/token/refresh", app.base))
        .json(&json!({ "refresh_token": pair["refresh_token"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let refreshed: serde_json::Value = resp.json().await.unwrap();

    // And the refreshed access token is good for an authenticated write.
    let resp = client
        .post(format!("{}/api/v1/posts", app.base))
        .bearer_auth(refreshed["access_token"].as_str().unwrap())
        .json(&json!({ "text": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let resp = reqwest::Client::new()
        .post(format!("{}/api/v1/auth/register", app.base))
        .json(&json!({
            "username": "x",
            "email": "not-an-email",
            "password": "short",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], 400);
    let fields = body["fields"].as_object().unwrap();
    assert!(fields.contains_key("username"));
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("password"));
}

#[tokio::test]
async fn test_register_duplicate_username_is_a_field_error() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    common::register_user(&app.base, "taken").await;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/v1/auth/register", app.base))
        .json(&json!({
            "username": "taken",
            "email": "someone-else@example.com",
            "password": "SecurePass123!",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["fields"]["username"][0], "username is already taken");
}

#[tokio::test]
async fn test_login_failures_do_not_reveal_which_part_was_wrong() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    common::register_user(&app.base, "poster").await;

    let wrong_password = client
        .post(format!("{}/api/v1/auth/token", app.base))
        .json(&json!({ "username": "poster", "password": "WrongPass123!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();

    let unknown_user = client
        .post(format!("{}/api/v1/auth/token", app.base))
        .json(&json!({ "username": "ghost", "password": "SecurePass123!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();

    assert_eq!(wrong_password["error"], unknown_user["error"]);
}

#[tokio::test]
async fn test_refresh_rejects_an_access_token() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let access_token = common::register_user(&app.base, "poster").await;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/v1/auth/token/refresh", app.base))
        .json(&json!({ "refresh_token": access_token }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_bearer_token_is_unauthorized() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let resp = reqwest::Client::new()
        .post(format!("{}/api/v1/posts", app.base))
        .bearer_auth("not-a-jwt")
        .json(&json!({ "text": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_cannot_authorize_writes() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/v1/auth/register", app.base))
        .json(&json!({
            "username": "poster",
            "email": "poster@example.com",
            "password": "SecurePass123!",
        }))
        .send()
        .await
        .unwrap();
    let registered: serde_json::Value = resp.json().await.unwrap();

    let resp = client
        .post(format!("{}/api/v1/posts", app.base))
        .bearer_auth(registered["refresh_token"].as_str().unwrap())
        .json(&json!({ "text": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
