mod common;

use common::TestApp;
use common::PASSWORD;
use reqwest::StatusCode;
use serde_json::json;

async fn reason(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["reason"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("nicola").await;

    let response = app
        .post("/login")
        .json(&json!({ "username": "nicola", "pwd": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["username"], "nicola");
    assert_eq!(body["user"]["email"], "nicola@example.com");
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("nicola").await;

    let wrong_password = app
        .post("/login")
        .json(&json!({ "username": "nicola", "pwd": "wrong_password" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user = app
        .post("/login")
        .json(&json!({ "username": "nobody", "pwd": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user.status(), StatusCode::BAD_REQUEST);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(
        wrong_password,
        json!({ "message": "Incorrect username or password.", "user": null })
    );
}

#[tokio::test]
async fn test_unreadable_login_form_is_a_failed_login() {
    let app = TestApp::spawn().await;

    let not_json = app
        .post("/login")
        .header("content-type", "application/json")
        .body("username=nicola&pwd=secret")
        .send()
        .await
        .expect("Failed to execute request");
    let no_content_type = app
        .post("/login")
        .body(r#"{"username":"nicola","pwd":"secret"}"#)
        .send()
        .await
        .expect("Failed to execute request");
    let wrong_shape = app
        .post("/login")
        .json(&json!(["nicola", "secret"]))
        .send()
        .await
        .expect("Failed to execute request");

    for response in [not_json, no_content_type, wrong_shape] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(
            body,
            json!({ "message": "Incorrect username or password.", "user": null })
        );
    }
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/movies")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(reason(response).await, "missing_token");
}

#[tokio::test]
async fn test_non_bearer_scheme_is_missing_token() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("nicola").await;

    let response = app
        .get("/movies")
        .header("Authorization", format!("Token {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(reason(response).await, "missing_token");
}

#[tokio::test]
async fn test_garbage_token_is_invalid() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/movies", "not.a.jwt")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(reason(response).await, "invalid_token");
}

#[tokio::test]
async fn test_tampered_token_is_invalid() {
    let app = TestApp::spawn().await;
    let mut token = app.register_and_login("nicola").await;

    let last = token.pop().unwrap();
    token.push(if last == 'A' { 'B' } else { 'A' });

    let response = app
        .get_authenticated("/movies", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(reason(response).await, "invalid_token");
}

#[tokio::test]
async fn test_token_expires_after_seven_days() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("nicola").await;

    app.clock.advance(chrono::Duration::days(7));
    let response = app
        .get_authenticated("/movies", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    app.clock.advance(chrono::Duration::seconds(1));
    let response = app
        .get_authenticated("/movies", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(reason(response).await, "expired");
}

#[tokio::test]
async fn test_token_of_deleted_account_is_unknown_subject() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("nicola").await;

    let response = app
        .delete_authenticated("/users/nicola", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated("/movies", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(reason(response).await, "unknown_subject");
}

#[tokio::test]
async fn test_token_survives_username_change() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("nicola").await;

    let response = app
        .put_authenticated("/users/nicola", &token)
        .json(&json!({
            "username": "nicolas",
            "pwd": PASSWORD,
            "email": "nicola@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated("/users/nicolas", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Welcome to the homepage.");

    let response = app
        .get("/documentation.html")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Movie API"));
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let app = TestApp::spawn().await;

    let allowed = app
        .get("/")
        .header("Origin", "http://localhost:1234")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:1234")
    );

    let denied = app
        .get("/")
        .header("Origin", "http://evil.example.com")
        .send()
        .await
        .expect("Failed to execute request");
    assert!(denied.headers().get("access-control-allow-origin").is_none());
}
