use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::helpers::spawn_app;

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn register_returns_the_user_without_the_hash() {
    let app = spawn_app().await;
    let email = format!("{}@example.com", Uuid::new_v4());

    let res = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": email, "password": "longenough", "full_name": "Ada" })),
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["email"], email);
    assert_eq!(res.body["full_name"], "Ada");
    assert!(res.body.get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn duplicate_email_is_a_conflict() {
    let app = spawn_app().await;
    let (email, _) = app.signed_in_user().await;

    let res = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": email.to_uppercase(), "password": "longenough" })),
        )
        .await;

    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn failed_logins_are_indistinguishable() {
    let app = spawn_app().await;
    let (email, _) = app.signed_in_user().await;

    let first = app.login(&email, "wrong password").await;
    let second = app.login(&email, "wrong password").await;
    let unknown = app.login("nobody@example.com", "wrong password").await;

    assert_eq!(first.status, StatusCode::UNAUTHORIZED);
    assert_eq!(first.body, second.body);
    assert_eq!(first.body, unknown.body);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn form_login_and_me() {
    let app = spawn_app().await;
    let (email, _) = app.signed_in_user().await;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(axum::body::Body::from(format!(
            "username={}&password=correct+horse",
            email.replace('@', "%40")
        )))
        .unwrap();
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let me = app.get("/api/auth/me", token).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], email);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn token_for_a_vanished_user_is_unauthorized() {
    let app = spawn_app().await;
    let token = app.keys.issue(Uuid::new_v4(), None).unwrap();

    let list = app.get("/api/companies", &token).await;
    let create = app
        .post("/api/companies", &token, json!({ "name": "Ghost Inc." }))
        .await;
    let me = app.get("/api/auth/me", &token).await;

    assert_eq!(list.status, StatusCode::UNAUTHORIZED);
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(list.body, create.body);
    assert_eq!(list.body, me.body);
}
