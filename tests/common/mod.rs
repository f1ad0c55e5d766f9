use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use tower::ServiceExt;

use pengaduan::entities::complaint::{self, ComplaintStatus, ComplaintUpdate};
use pengaduan::entities::complaint_evidence;
use pengaduan::migrations::Migrator;
use pengaduan::services;

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

pub fn setup_app(db: &DatabaseConnection) -> Router {
    pengaduan::routes::router(db)
}

/// Percent-encode the characters that JSON-encoded query parameters need.
#[allow(dead_code)]
pub fn encode(raw: &str) -> String {
    let mut out = String::new();
    for c in raw.chars() {
        match c {
            '{' => out.push_str("%7B"),
            '}' => out.push_str("%7D"),
            '"' => out.push_str("%22"),
            ':' => out.push_str("%3A"),
            ',' => out.push_str("%2C"),
            '[' => out.push_str("%5B"),
            ']' => out.push_str("%5D"),
            '!' => out.push_str("%21"),
            '+' => out.push_str("%2B"),
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}

#[allow(dead_code)]
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, read_body(response).await)
}

#[allow(dead_code)]
pub async fn get_with_headers(
    app: &Router,
    uri: &str,
) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    (status, headers, read_body(response).await)
}

#[allow(dead_code)]
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, body).await
}

#[allow(dead_code)]
pub async fn put_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "PUT", uri, body).await
}

#[allow(dead_code)]
pub async fn delete_req(app: &Router, uri: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, read_body(response).await)
}

async fn read_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    }
}

/// A valid public-submission payload.
#[allow(dead_code)]
pub fn complaint_payload(title: &str) -> serde_json::Value {
    json!({
        "reporter_name": "Budi Santoso",
        "reporter_contact": "+62 811 2345 678",
        "reporter_identity_type": "ktp",
        "reporter_identity_number": "3174012345678901",
        "incident_title": title,
        "incident_description": "Loud interference during the evening broadcast",
        "incident_time": "2025-07-10T19:30:00Z",
        "reported_person": "Unknown operator"
    })
}

#[allow(dead_code)]
pub fn user_payload(nip: &str, role: &str) -> serde_json::Value {
    json!({
        "nip": nip,
        "name": "Sari Wulandari",
        "phone_number": "+62 812 9876 543",
        "email": "sari@radio.example",
        "home_address": "Jl. Merdeka 1, Jakarta",
        "role": role,
        "password": "a-strong-password",
        "password_confirmation": "a-strong-password"
    })
}

#[allow(dead_code)]
pub async fn file_complaint(db: &DatabaseConnection, title: &str) -> complaint::Model {
    let payload: complaint::ComplaintCreate =
        serde_json::from_value(complaint_payload(title)).unwrap();
    services::complaints::create(db, payload)
        .await
        .expect("Failed to file complaint")
}

#[allow(dead_code)]
pub async fn set_status(db: &DatabaseConnection, id: i32, status: ComplaintStatus) {
    services::complaints::update(
        db,
        id,
        ComplaintUpdate {
            status: Some(status),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to update status");
}

#[allow(dead_code)]
pub async fn attach_evidence(
    db: &DatabaseConnection,
    complaint_id: i32,
    title: &str,
    file_path: &str,
) -> complaint_evidence::Model {
    let payload = complaint_evidence::EvidenceCreate {
        title: title.to_string(),
        file_path: file_path.to_string(),
        file_type: None,
    };
    services::complaints::attach_evidence(db, complaint_id, payload)
        .await
        .expect("Failed to attach evidence")
}
