// Column filter and free-text search coverage through the HTTP pipeline.

mod common;

use axum::http::StatusCode;
use common::{
    complaint_payload, encode, file_complaint, get_json, post_json, set_status, setup_app,
    setup_test_db,
};
use pengaduan::entities::complaint::ComplaintStatus;

fn titles(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .expect("expected a JSON array body")
        .iter()
        .map(|item| item["incident_title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_status_equality_filter() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let first = file_complaint(&db, "Static on 98.1 FM").await;
    file_complaint(&db, "Ad break overlaps news").await;
    set_status(&db, first.id, ComplaintStatus::Resolved).await;

    let uri = format!(
        "/api/complaints?column_filters={}",
        encode(r#"{"status":"resolved"}"#)
    );
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Static on 98.1 FM"]);
}

#[tokio::test]
async fn test_unknown_filter_key_leaves_result_unchanged() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    file_complaint(&db, "First").await;
    file_complaint(&db, "Second").await;

    let (_, unfiltered) = get_json(&app, "/api/complaints").await;
    let uri = format!(
        "/api/complaints?column_filters={}",
        encode(r#"{"no_such_column":"x"}"#)
    );
    let (status, filtered) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        filtered.as_array().unwrap().len(),
        unfiltered.as_array().unwrap().len()
    );
}

#[tokio::test]
async fn test_range_filter_is_inclusive() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let a = file_complaint(&db, "A").await;
    let b = file_complaint(&db, "B").await;
    let c = file_complaint(&db, "C").await;
    assert!(a.id < b.id && b.id < c.id);

    let uri = format!(
        "/api/complaints?column_filters={}&sort_by=id&sort_dir=asc",
        encode(&format!(r#"{{"id":{{"from":{},"to":{}}}}}"#, a.id, b.id))
    );
    let (_, body) = get_json(&app, &uri).await;
    assert_eq!(titles(&body), vec!["A", "B"]);
}

#[tokio::test]
async fn test_one_sided_ranges() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let a = file_complaint(&db, "A").await;
    let b = file_complaint(&db, "B").await;
    file_complaint(&db, "C").await;

    // only "from": everything at or above b
    let uri = format!(
        "/api/complaints?column_filters={}&sort_by=id&sort_dir=asc",
        encode(&format!(r#"{{"id":{{"from":{}}}}}"#, b.id))
    );
    let (_, body) = get_json(&app, &uri).await;
    assert_eq!(titles(&body), vec!["B", "C"]);

    // only "to": everything at or below a
    let uri = format!(
        "/api/complaints?column_filters={}",
        encode(&format!(r#"{{"id":{{"to":{}}}}}"#, a.id))
    );
    let (_, body) = get_json(&app, &uri).await;
    assert_eq!(titles(&body), vec!["A"]);
}

#[tokio::test]
async fn test_membership_filter() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let first = file_complaint(&db, "First").await;
    let second = file_complaint(&db, "Second").await;
    file_complaint(&db, "Third").await;
    set_status(&db, first.id, ComplaintStatus::Resolved).await;
    set_status(&db, second.id, ComplaintStatus::Rejected).await;

    let uri = format!(
        "/api/complaints?column_filters={}&sort_by=id&sort_dir=asc",
        encode(r#"{"status":["resolved","rejected"]}"#)
    );
    let (_, body) = get_json(&app, &uri).await;
    assert_eq!(titles(&body), vec!["First", "Second"]);
}

#[tokio::test]
async fn test_filters_combine_with_and() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let first = file_complaint(&db, "First").await;
    let second = file_complaint(&db, "Second").await;
    set_status(&db, first.id, ComplaintStatus::Resolved).await;
    set_status(&db, second.id, ComplaintStatus::Resolved).await;

    let uri = format!(
        "/api/complaints?column_filters={}",
        encode(&format!(
            r#"{{"status":"resolved","id":{{"to":{}}}}}"#,
            first.id
        ))
    );
    let (_, body) = get_json(&app, &uri).await;
    assert_eq!(titles(&body), vec!["First"]);
}

#[tokio::test]
async fn test_free_text_search_spans_columns() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    file_complaint(&db, "Night transmitter hum").await;
    file_complaint(&db, "Unrelated case").await;

    // matches incident_title, case-insensitively
    let (_, body) = get_json(&app, "/api/complaints?search=TRANSMITTER").await;
    assert_eq!(titles(&body), vec!["Night transmitter hum"]);

    // matches reporter_name on every seeded row
    let (_, body) = get_json(&app, "/api/complaints?search=budi").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_with_no_match_returns_empty() {
    let db = setup_test_db().await;
    let app = setup_app(&db);
    file_complaint(&db, "Anything").await;

    let (status, body) = get_json(&app, "/api/complaints?search=zzzzzz").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_filter_json_is_ignored() {
    let db = setup_test_db().await;
    let app = setup_app(&db);
    file_complaint(&db, "Kept").await;

    let (status, body) = get_json(&app, "/api/complaints?column_filters=notjson").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_validation_error_is_field_keyed() {
    let db = setup_test_db().await;
    let app = setup_app(&db);

    let mut payload = complaint_payload("Bad identity");
    payload["reporter_identity_number"] = serde_json::json!("123");
    let (status, body) = post_json(&app, "/api/complaints", &payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["reporter_identity_number"].is_array());
}
