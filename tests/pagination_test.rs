// Pagination windows, the all-rows sentinel, and Content-Range.

mod common;

use axum::http::StatusCode;
use common::{file_complaint, get_json, get_with_headers, setup_app, setup_test_db};

#[tokio::test]
async fn test_page_windows() {
    let db = setup_test_db().await;
    let app = setup_app(&db);
    for i in 0..5 {
        file_complaint(&db, &format!("Case {i}")).await;
    }

    let (_, body) = get_json(&app, "/api/complaints?page=1&per_page=2&sort_by=id&sort_dir=asc").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["incident_title"], "Case 0");

    let (_, body) = get_json(&app, "/api/complaints?page=3&per_page=2&sort_by=id&sort_dir=asc").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["incident_title"], "Case 4");
}

#[tokio::test]
async fn test_per_page_minus_one_returns_all_rows() {
    let db = setup_test_db().await;
    let app = setup_app(&db);
    for i in 0..20 {
        file_complaint(&db, &format!("Case {i}")).await;
    }

    // default window is smaller than the data set
    let (_, body) = get_json(&app, "/api/complaints").await;
    assert!(body.as_array().unwrap().len() < 20);

    let (status, body) = get_json(&app, "/api/complaints?per_page=-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_content_range_header() {
    let db = setup_test_db().await;
    let app = setup_app(&db);
    for i in 0..5 {
        file_complaint(&db, &format!("Case {i}")).await;
    }

    let (_, headers, _) = get_with_headers(&app, "/api/complaints?page=1&per_page=2").await;
    let value = headers.get("Content-Range").unwrap().to_str().unwrap();
    assert_eq!(value, "complaints 0-1/5");

    let (_, headers, _) = get_with_headers(&app, "/api/complaints?per_page=-1").await;
    let value = headers.get("Content-Range").unwrap().to_str().unwrap();
    assert_eq!(value, "complaints 0-4/5");
}

#[tokio::test]
async fn test_total_reflects_filters() {
    let db = setup_test_db().await;
    let app = setup_app(&db);
    for i in 0..4 {
        file_complaint(&db, &format!("Case {i}")).await;
    }
    file_complaint(&db, "Special").await;

    let (_, headers, body) =
        get_with_headers(&app, "/api/complaints?search=Special&page=1&per_page=2").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let value = headers.get("Content-Range").unwrap().to_str().unwrap();
    assert_eq!(value, "complaints 0-1/1");
}
