use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, QuerySelect};

use crate::core::traits::CrudResource;
use crate::entities::{complaint, complaint_evidence};
use crate::errors::ApiError;
use crate::filtering::parse_pagination;
use crate::models::ListParams;
use crate::selection::{SelectableResource, SelectedFields};
use crate::services;

#[utoipa::path(
    get,
    path = "/{id}/evidences",
    params(ListParams),
    responses(
        (status = 200, description = "Evidence attached to the complaint"),
        (status = 404, description = "Complaint not found")
    ),
    operation_id = "get_complaint_evidences",
    summary = "List a complaint's evidence",
    description = "Runs the shared list pipeline scoped to one complaint."
)]
pub async fn get_complaint_evidences(
    Path(id): Path<i32>,
    Query(params): Query<ListParams>,
    Query(raw_query): Query<HashMap<String, String>>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let model = complaint::Model::get_one(&db, id).await?;
    let query = complaint_evidence::Model::list_query(&params)
        .filter(complaint_evidence::Column::ComplaintId.eq(model.id));
    let evidences = match parse_pagination(&params) {
        Some((offset, limit)) => query.offset(offset).limit(limit).all(&db).await?,
        None => query.all(&db).await?,
    };

    let selection = SelectedFields::from_query(&raw_query);
    let rendered: Vec<serde_json::Value> = evidences
        .into_iter()
        .map(|evidence| evidence.render(&selection))
        .collect();
    Ok(Json(serde_json::Value::Array(rendered)))
}

#[utoipa::path(
    post,
    path = "/{id}/evidences",
    request_body = complaint_evidence::EvidenceCreate,
    responses(
        (status = 201, description = "Evidence attached", body = complaint_evidence::Model),
        (status = 404, description = "Complaint not found"),
        (status = 422, description = "Validation failed")
    ),
    operation_id = "attach_evidence",
    summary = "Attach evidence to a complaint"
)]
pub async fn attach_evidence(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
    Json(payload): Json<complaint_evidence::EvidenceCreate>,
) -> Result<(StatusCode, Json<complaint_evidence::Model>), ApiError> {
    let model = services::complaints::attach_evidence(&db, id, payload).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    request_body = complaint_evidence::EvidenceUpdate,
    responses(
        (status = 200, description = "Evidence updated", body = complaint_evidence::Model),
        (status = 404, description = "Evidence not found")
    ),
    operation_id = "update_evidence",
    summary = "Update an evidence record"
)]
pub async fn update_evidence(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
    Json(payload): Json<complaint_evidence::EvidenceUpdate>,
) -> Result<Json<complaint_evidence::Model>, ApiError> {
    let model = services::complaints::update_evidence(&db, id, payload).await?;
    Ok(Json(model))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    responses(
        (status = 204, description = "Evidence deleted"),
        (status = 404, description = "Evidence not found")
    ),
    operation_id = "delete_evidence",
    summary = "Delete an evidence record"
)]
pub async fn delete_evidence(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
) -> Result<StatusCode, ApiError> {
    complaint_evidence::Model::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
