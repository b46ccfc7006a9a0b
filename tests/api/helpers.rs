use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jobhunt::{app::build_app, auth::JwtKeys, config::AppConfig, db, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    /// Same keys the router verifies with.
    pub keys: JwtKeys,
}

pub async fn spawn_app() -> TestApp {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let config = AppConfig::for_tests(&url);
    let pool = db::connect(&config).await.expect("Failed to connect to Postgres.");
    db::migrate(&pool).await.expect("Failed to migrate the database.");

    let state = AppState::from_parts(pool, Arc::new(config));
    TestApp {
        keys: state.keys.clone(),
        router: build_app(state),
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();

        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Registers a fresh user and returns `(email, access_token)`.
    pub async fn signed_in_user(&self) -> (String, String) {
        let email = format!("{}@example.com", Uuid::new_v4());
        let res = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "email": email, "password": "correct horse" })),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);

        let res = self.login(&email, "correct horse").await;
        assert_eq!(res.status, StatusCode::OK, "{}", res.body);
        let token = res.body["access_token"].as_str().unwrap().to_string();
        (email, token)
    }

    pub async fn create_company(&self, token: &str, name: &str) -> String {
        let res = self
            .post("/api/companies", token, json!({ "name": name }))
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_contact(&self, token: &str, company_id: &str, name: &str) -> String {
        let res = self
            .post(
                "/api/contacts",
                token,
                json!({ "name": name, "company_id": company_id }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_interview(&self, token: &str, application_id: &str) -> String {
        let res = self
            .post(
                "/api/interviews",
                token,
                json!({ "application_id": application_id, "scheduled_at": "2030-01-15T10:00:00Z" }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_application(
        &self,
        token: &str,
        company_id: &str,
        job_title: &str,
        status: &str,
    ) -> String {
        let res = self
            .post(
                "/api/applications",
                token,
                json!({ "company_id": company_id, "job_title": job_title, "status": status }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body["id"].as_str().unwrap().to_string()
    }
}
