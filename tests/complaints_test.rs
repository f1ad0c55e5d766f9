// Complaint lifecycle: numbering, defaults, updates, deletion.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{
    complaint_payload, delete_req, file_complaint, get_json, post_json, put_json, setup_app,
    setup_test_db,
};
use sea_orm::{EntityTrait, PaginatorTrait};

use pengaduan::entities::{complaint, complaint_evidence};

#[tokio::test]
async fn test_create_assigns_complaint_number() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let (status, body) = post_json(&app, "/api/complaints", &complaint_payload("Numbered")).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = body["id"].as_i64().unwrap();
    let expected = format!("{}-{:04}", Utc::now().format("%Y%m%d"), id);
    assert_eq!(body["complaint_number"].as_str().unwrap(), expected);
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let (_, body) = post_json(&app, "/api/complaints", &complaint_payload("Defaults")).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["priority"], "medium");
}

#[tokio::test]
async fn test_staff_entry_may_set_priority() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let mut payload = complaint_payload("Urgent");
    payload["priority"] = serde_json::json!("high");
    let (_, body) = post_json(&app, "/api/complaints", &payload).await;
    assert_eq!(body["priority"], "high");
}

#[tokio::test]
async fn test_complaint_number_survives_updates() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let model = file_complaint(&db, "Original").await;
    let number = model.complaint_number.clone().unwrap();

    let (status, body) = put_json(
        &app,
        &format!("/api/complaints/{}", model.id),
        &serde_json::json!({"incident_title": "Edited", "status": "in_progress"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["incident_title"], "Edited");
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["complaint_number"].as_str().unwrap(), number);
}

#[tokio::test]
async fn test_update_unknown_complaint_is_404() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let (status, _) = put_json(
        &app,
        "/api/complaints/9999",
        &serde_json::json!({"incident_title": "Ghost"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_one_includes_evidences() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let model = file_complaint(&db, "With evidence").await;
    common::attach_evidence(&db, model.id, "Scan", "scan.pdf").await;

    let (status, body) = get_json(&app, &format!("/api/complaints/{}", model.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["incident_title"], "With evidence");
    assert_eq!(body["evidences"].as_array().unwrap().len(), 1);
    assert_eq!(body["evidences"][0]["title"], "Scan");
}

#[tokio::test]
async fn test_get_unknown_complaint_is_404() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let (status, body) = get_json(&app, "/api/complaints/424242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_delete_removes_complaint_and_evidence() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let model = file_complaint(&db, "Doomed").await;
    common::attach_evidence(&db, model.id, "Scan", "scan.pdf").await;

    let status = delete_req(&app, &format!("/api/complaints/{}", model.id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(complaint::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(
        complaint_evidence::Entity::find().count(&db).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_delete_unknown_complaint_is_404() {
    let db = setup_test_db().await;
    let app = setup_app(&db);
    assert_eq!(
        delete_req(&app, "/api/complaints/777").await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_missing_required_fields_are_all_reported() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let mut payload = complaint_payload("Sparse");
    payload["reporter_name"] = serde_json::json!("");
    payload["reported_person"] = serde_json::json!("  ");
    let (status, body) = post_json(&app, "/api/complaints", &payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("reporter_name"));
    assert!(errors.contains_key("reported_person"));
}

#[tokio::test]
async fn test_sim_and_passport_identities_are_accepted() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let mut payload = complaint_payload("SIM reporter");
    payload["reporter_identity_type"] = serde_json::json!("sim");
    payload["reporter_identity_number"] = serde_json::json!("912345678901");
    let (status, _) = post_json(&app, "/api/complaints", &payload).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut payload = complaint_payload("Passport reporter");
    payload["reporter_identity_type"] = serde_json::json!("passport");
    payload["reporter_identity_number"] = serde_json::json!("C7654321");
    let (status, _) = post_json(&app, "/api/complaints", &payload).await;
    assert_eq!(status, StatusCode::CREATED);
}
