use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use hyper::HeaderMap;
use sea_orm::{DatabaseConnection, ModelTrait};

use crate::core::traits::CrudResource;
use crate::entities::{complaint, complaint_evidence};
use crate::errors::ApiError;
use crate::models::ListParams;
use crate::selection::{SelectableResource, SelectedFields};
use crate::services;

use super::list_response;

#[utoipa::path(
    get,
    path = "/",
    params(ListParams),
    responses(
        (status = 200, description = "Filtered, sorted page of complaints"),
        (status = 500, description = "Internal Server Error")
    ),
    operation_id = "get_all_complaints",
    summary = "List complaints",
    description = "Lists complaints through the shared filtering, sorting and field-selection pipeline."
)]
pub async fn get_all_complaints(
    Query(params): Query<ListParams>,
    Query(raw_query): Query<HashMap<String, String>>,
    State(db): State<DatabaseConnection>,
) -> Result<(HeaderMap, Json<serde_json::Value>), ApiError> {
    list_response::<complaint::Model>(&db, &params, &raw_query).await
}

#[utoipa::path(
    get,
    path = "/{id}",
    responses(
        (status = 200, description = "The requested complaint with its evidence"),
        (status = 404, description = "Complaint not found")
    ),
    operation_id = "get_one_complaint",
    summary = "Get one complaint"
)]
pub async fn get_one_complaint(
    Path(id): Path<i32>,
    Query(raw_query): Query<HashMap<String, String>>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let model = complaint::Model::get_one(&db, id).await?;
    let evidences = model
        .find_related(complaint_evidence::Entity)
        .all(&db)
        .await?;

    let selection = SelectedFields::from_query(&raw_query);
    let mut body = model.render(&selection);
    if let serde_json::Value::Object(object) = &mut body {
        let rendered: Vec<serde_json::Value> = evidences
            .into_iter()
            .map(|evidence| evidence.render(&selection))
            .collect();
        object.insert("evidences".to_string(), serde_json::Value::Array(rendered));
    }
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = complaint::ComplaintCreate,
    responses(
        (status = 201, description = "Complaint filed", body = complaint::Model),
        (status = 422, description = "Validation failed")
    ),
    operation_id = "create_complaint",
    summary = "File a complaint",
    description = "Public submission endpoint; assigns the complaint number on first persistence."
)]
pub async fn create_complaint(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<complaint::ComplaintCreate>,
) -> Result<(StatusCode, Json<complaint::Model>), ApiError> {
    let model = services::complaints::create(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    request_body = complaint::ComplaintUpdate,
    responses(
        (status = 200, description = "Complaint updated", body = complaint::Model),
        (status = 404, description = "Complaint not found")
    ),
    operation_id = "update_complaint",
    summary = "Update a complaint"
)]
pub async fn update_complaint(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
    Json(payload): Json<complaint::ComplaintUpdate>,
) -> Result<Json<complaint::Model>, ApiError> {
    let model = services::complaints::update(&db, id, payload).await?;
    Ok(Json(model))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    responses(
        (status = 204, description = "Complaint deleted"),
        (status = 404, description = "Complaint not found")
    ),
    operation_id = "delete_complaint",
    summary = "Delete a complaint"
)]
pub async fn delete_complaint(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
) -> Result<StatusCode, ApiError> {
    services::complaints::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
