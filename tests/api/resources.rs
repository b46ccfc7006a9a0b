use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::helpers::spawn_app;

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn other_users_records_look_missing() {
    let app = spawn_app().await;
    let (_, alice) = app.signed_in_user().await;
    let (_, bob) = app.signed_in_user().await;

    let company_id = app.create_company(&alice, "Acme").await;
    let uri = format!("/api/companies/{company_id}");

    assert_eq!(app.get(&uri, &bob).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.patch(&uri, &bob, json!({ "name": "Mine" })).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.delete(&uri, &bob).await.status, StatusCode::NOT_FOUND);
    assert!(app
        .get("/api/companies", &bob)
        .await
        .body
        .as_array()
        .unwrap()
        .is_empty());

    let res = app
        .post(
            "/api/contacts",
            &bob,
            json!({ "name": "Eve", "company_id": company_id }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["detail"][0]["field"], "company_id");

    let res = app.get(&uri, &alice).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Acme");
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn patch_changes_only_supplied_fields() {
    let app = spawn_app().await;
    let (_, token) = app.signed_in_user().await;

    let res = app
        .post(
            "/api/companies",
            &token,
            json!({ "name": "Initech", "industry": "Software", "notes": "old" }),
        )
        .await;
    let id = res.body["id"].as_str().unwrap().to_string();
    assert!(res.body["updated_at"].is_null());
    let uri = format!("/api/companies/{id}");

    let res = app.patch(&uri, &token, json!({ "notes": "new" })).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Initech");
    assert_eq!(res.body["industry"], "Software");
    assert_eq!(res.body["notes"], "new");
    assert!(res.body["updated_at"].is_string());

    let res = app.patch(&uri, &token, json!({ "industry": null })).await;
    assert!(res.body["industry"].is_null());
    assert_eq!(res.body["notes"], "new");

    let res = app.patch(&uri, &token, json!({ "name": null })).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn applications_filter_by_status() {
    let app = spawn_app().await;
    let (_, token) = app.signed_in_user().await;
    let company_id = app.create_company(&token, "Globex").await;

    app.create_application(&token, &company_id, "Engineer", "applied")
        .await;
    app.create_application(&token, &company_id, "Manager", "offer")
        .await;
    app.create_application(&token, &company_id, "Analyst", "applied")
        .await;

    let res = app.get("/api/applications?status=applied", &token).await;
    assert_eq!(res.status, StatusCode::OK);
    let titles: Vec<_> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["job_title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["Analyst", "Engineer"]);

    let res = app
        .get("/api/applications?skip=1&limit=1", &token)
        .await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    assert_eq!(res.body[0]["job_title"], "Manager");
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn deleting_a_company_keeps_its_applications() {
    let app = spawn_app().await;
    let (_, token) = app.signed_in_user().await;
    let company_id = app.create_company(&token, "Umbrella").await;
    let application_id = app
        .create_application(&token, &company_id, "Researcher", "saved")
        .await;

    let res = app
        .delete(&format!("/api/companies/{company_id}"), &token)
        .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app
        .get(&format!("/api/applications/{application_id}"), &token)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["company_id"], company_id);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn unknown_ids_are_not_found() {
    let app = spawn_app().await;
    let (_, token) = app.signed_in_user().await;

    let res = app
        .get(&format!("/api/interviews/{}", Uuid::new_v4()), &token)
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["detail"], "Interview not found");
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn saved_filter_returns_the_saved_application() {
    let app = spawn_app().await;
    let (_, token) = app.signed_in_user().await;
    let acme = app.create_company(&token, "Acme").await;
    let id = app
        .create_application(&token, &acme, "Engineer", "saved")
        .await;

    let res = app.get("/api/applications?status=saved", &token).await;
    let list = res.body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["company_id"], acme);
    assert_eq!(list[0]["status"], "saved");
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn every_resource_is_private_to_its_owner() {
    let app = spawn_app().await;
    let (_, alice) = app.signed_in_user().await;
    let (_, bob) = app.signed_in_user().await;

    let company_id = app.create_company(&alice, "Acme").await;
    let contact_id = app.create_contact(&alice, &company_id, "Wile").await;
    let application_id = app
        .create_application(&alice, &company_id, "Engineer", "applied")
        .await;
    let interview_id = app.create_interview(&alice, &application_id).await;

    let records = [
        (format!("/api/contacts/{contact_id}"), json!({ "name": "Taken" })),
        (
            format!("/api/applications/{application_id}"),
            json!({ "job_title": "Taken" }),
        ),
        (
            format!("/api/interviews/{interview_id}"),
            json!({ "notes": "Taken" }),
        ),
    ];

    for (uri, body) in &records {
        assert_eq!(app.get(uri, &bob).await.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(
            app.put(uri, &bob, body.clone()).await.status,
            StatusCode::NOT_FOUND,
            "{uri}"
        );
        assert_eq!(
            app.patch(uri, &bob, body.clone()).await.status,
            StatusCode::NOT_FOUND,
            "{uri}"
        );
        assert_eq!(app.delete(uri, &bob).await.status, StatusCode::NOT_FOUND, "{uri}");
    }

    for list in ["/api/contacts", "/api/applications", "/api/interviews"] {
        let res = app.get(list, &bob).await;
        assert!(res.body.as_array().unwrap().is_empty(), "{list}");
    }

    for (uri, _) in &records {
        assert_eq!(app.get(uri, &alice).await.status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn references_to_other_users_records_are_unprocessable() {
    let app = spawn_app().await;
    let (_, alice) = app.signed_in_user().await;
    let (_, bob) = app.signed_in_user().await;

    let alice_company = app.create_company(&alice, "Acme").await;
    let alice_application = app
        .create_application(&alice, &alice_company, "Engineer", "applied")
        .await;

    let res = app
        .post(
            "/api/interviews",
            &bob,
            json!({ "application_id": alice_application, "scheduled_at": "2030-01-15T10:00:00Z" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["detail"][0]["field"], "application_id");

    let res = app
        .post(
            "/api/applications",
            &bob,
            json!({ "company_id": alice_company, "job_title": "Spy" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["detail"][0]["field"], "company_id");

    let bob_company = app.create_company(&bob, "Bobco").await;
    let bob_application = app
        .create_application(&bob, &bob_company, "Builder", "saved")
        .await;
    let bob_interview = app.create_interview(&bob, &bob_application).await;
    let res = app
        .patch(
            &format!("/api/interviews/{bob_interview}"),
            &bob,
            json!({ "application_id": alice_application }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn put_is_a_partial_update_too() {
    let app = spawn_app().await;
    let (_, token) = app.signed_in_user().await;
    let company_id = app.create_company(&token, "Initrode").await;
    let application_id = app
        .create_application(&token, &company_id, "Engineer", "saved")
        .await;
    let uri = format!("/api/applications/{application_id}");

    let res = app
        .put(&uri, &token, json!({ "status": "applied", "notes": "sent" }))
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["status"], "applied");
    assert_eq!(res.body["notes"], "sent");
    assert_eq!(res.body["job_title"], "Engineer");
    assert_eq!(res.body["salary_currency"], "USD");

    let res = app.get(&uri, &token).await;
    assert_eq!(res.body["status"], "applied");
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn bad_input_is_unprocessable() {
    let app = spawn_app().await;
    let (_, token) = app.signed_in_user().await;
    let company_id = app.create_company(&token, "Soylent").await;

    let res = app
        .post(
            "/api/applications",
            &token,
            json!({ "company_id": company_id, "job_title": "Engineer", "status": "ghosted" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["detail"][0]["field"], "status");

    let res = app.get("/api/applications?status=ghosted", &token).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);

    let res = app.get("/api/companies/not-a-uuid", &token).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);

    let res = app
        .send(Method::GET, "/api/applications?status=", Some(&token), None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
}
