//! Integration tests for comments nested under posts.

mod common;

use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_comments_under_a_missing_post_are_not_found() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    let token = common::register_user(&app.base, "poster").await;
    let missing = uuid::Uuid::new_v4();

    let resp = client
        .get(format!("{}/api/v1/posts/{}/comments", app.base, missing))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Creating under a missing parent is 404 even with a valid body.
    let resp = client
        .post(format!("{}/api/v1/posts/{}/comments", app.base, missing))
        .bearer_auth(&token)
        .json(&json!({ "text": "into the void" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_parent_comes_from_the_url() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let token = common::register_user(&app.base, "poster").await;
    let first = common::create_post(&app.base, &token, "first").await;
    let second = common::create_post(&app.base, &token, "second").await;

    // A post_id smuggled into the body is ignored in favour of the URL.
    let resp = reqwest::Client::new()
        .post(format!(
            "{}/api/v1/posts/{}/comments",
            app.base,
            first["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .json(&json!({
            "text": "where do I land?",
            "post_id": second["id"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let comment: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(comment["post_id"], first["id"]);
    assert_eq!(comment["author"], "poster");
}

#[tokio::test]
async fn test_comment_mutation_is_for_the_comment_author_only() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    let poster = common::register_user(&app.base, "poster").await;
    let commenter = common::register_user(&app.base, "commenter").await;

    let post = common::create_post(&app.base, &poster, "discuss").await;
    let post_id = post["id"].as_str().unwrap();
    let comment = common::create_comment(&app.base, &commenter, post_id, "hot take").await;
    let url = format!(
        "{}/api/v1/posts/{}/comments/{}",
        app.base,
        post_id,
        comment["id"].as_str().unwrap()
    );

    // Owning the post does not grant rights over other people's comments.
    let resp = client
        .patch(&url)
        .bearer_auth(&poster)
        .json(&json!({ "text": "moderated" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .patch(&url)
        .bearer_auth(&commenter)
        .json(&json!({ "text": "measured take" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(updated["text"], "measured take");

    let resp = client.delete(&url).bearer_auth(&poster).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client.delete(&url).bearer_auth(&commenter).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(&url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_without_fields_returns_the_comment_unchanged() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let token = common::register_user(&app.base, "poster").await;
    let post = common::create_post(&app.base, &token, "discuss").await;
    let post_id = post["id"].as_str().unwrap();
    let comment = common::create_comment(&app.base, &token, post_id, "hello").await;

    let resp = reqwest::Client::new()
        .patch(format!(
            "{}/api/v1/posts/{}/comments/{}",
            app.base,
            post_id,
            comment["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["text"], "hello");
}

#[tokio::test]
async fn test_comments_are_not_reachable_through_another_post() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    let token = common::register_user(&app.base, "poster").await;
    let home = common::create_post(&app.base, &token, "home").await;
    let other = common::create_post(&app.base, &token, "other").await;
    let comment =
        common::create_comment(&app.base, &token, home["id"].as_str().unwrap(), "hi").await;

    let cross_url = format!(
        "{}/api/v1/posts/{}/comments/{}",
        app.base,
        other["id"].as_str().unwrap(),
        comment["id"].as_str().unwrap()
    );

    let resp = client.get(&cross_url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Scoping wins over ownership: the author gets a 404 too, not a 403.
    let resp = client
        .put(&cross_url)
        .bearer_auth(&token)
        .json(&json!({ "text": "relocated" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_are_listed_oldest_first_with_pagination() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let token = common::register_user(&app.base, "poster").await;
    let post = common::create_post(&app.base, &token, "thread").await;
    let post_id = post["id"].as_str().unwrap();

    for text in ["one", "two", "three"] {
        common::create_comment(&app.base, &token, post_id, text).await;
    }

    let resp = reqwest::Client::new()
        .get(format!("{}/api/v1/posts/{}/comments", app.base, post_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let page: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(page["count"], 3);
    let texts: Vec<&str> = page["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);

    let resp = reqwest::Client::new()
        .get(format!(
            "{}/api/v1/posts/{}/comments?limit=2",
            app.base, post_id
        ))
        .send()
        .await
        .unwrap();
    let page: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(page["results"].as_array().unwrap().len(), 2);
    assert_eq!(
        page["next"],
        format!("/api/v1/posts/{post_id}/comments?limit=2&offset=2")
    );
}

#[tokio::test]
async fn test_anonymous_users_can_read_but_not_write_comments() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    let token = common::register_user(&app.base, "poster").await;
    let post = common::create_post(&app.base, &token, "open thread").await;
    let post_id = post["id"].as_str().unwrap();
    common::create_comment(&app.base, &token, post_id, "first!").await;

    let resp = client
        .get(format!("{}/api/v1/posts/{}/comments", app.base, post_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{}/api/v1/posts/{}/comments", app.base, post_id))
        .json(&json!({ "text": "anonymous coward" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
