use axum::http::StatusCode;
use serde_json::json;
use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};

use crate::helpers::spawn_app;

fn in_days(days: i64) -> String {
    (OffsetDateTime::now_utc() + Duration::days(days))
        .format(&Rfc3339)
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn only_interviews_within_a_week_are_upcoming() {
    let app = spawn_app().await;
    let (_, token) = app.signed_in_user().await;
    let company_id = app.create_company(&token, "Hooli").await;
    let application_id = app
        .create_application(&token, &company_id, "Engineer", "interview")
        .await;

    for days in [3, 10] {
        let res = app
            .post(
                "/api/interviews",
                &token,
                json!({ "application_id": application_id, "scheduled_at": in_days(days) }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    }

    let res = app.get("/api/dashboard/stats", &token).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["upcoming_interviews"], 1);
    assert_eq!(res.body["recent_interviews"].as_array().unwrap().len(), 2);

    let upcoming = app
        .get("/api/interviews?upcoming_only=true", &token)
        .await;
    assert_eq!(upcoming.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn status_counts_add_up_to_the_total() {
    let app = spawn_app().await;
    let (_, token) = app.signed_in_user().await;
    let company_id = app.create_company(&token, "Vandelay").await;
    for (title, status) in [("A", "applied"), ("B", "applied"), ("C", "rejected")] {
        app.create_application(&token, &company_id, title, status)
            .await;
    }

    let res = app.get("/api/dashboard/stats", &token).await;
    let body = res.body;
    assert_eq!(body["total_applications"], 3);
    assert_eq!(body["total_companies"], 1);
    assert_eq!(body["total_contacts"], 0);
    let by_status = body["applications_by_status"].as_object().unwrap();
    assert_eq!(by_status.len(), 8);
    assert_eq!(by_status["applied"], 2);
    assert_eq!(by_status["offer"], 0);
    let sum: i64 = by_status.values().map(|v| v.as_i64().unwrap()).sum();
    assert_eq!(sum, 3);
}
