use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use hyper::HeaderMap;
use sea_orm::DatabaseConnection;

use crate::core::traits::CrudResource;
use crate::entities::user;
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
        (status = 200, description = "Filtered, sorted page of staff accounts"),
        (status = 500, description = "Internal Server Error")
    ),
    operation_id = "get_all_users",
    summary = "List staff accounts"
)]
pub async fn get_all_users(
    Query(params): Query<ListParams>,
    Query(raw_query): Query<HashMap<String, String>>,
    State(db): State<DatabaseConnection>,
) -> Result<(HeaderMap, Json<serde_json::Value>), ApiError> {
    list_response::<user::Model>(&db, &params, &raw_query).await
}

#[utoipa::path(
    get,
    path = "/{nip}",
    responses(
        (status = 200, description = "The requested staff account"),
        (status = 404, description = "User not found")
    ),
    operation_id = "get_one_user",
    summary = "Get one staff account"
)]
pub async fn get_one_user(
    Path(nip): Path<String>,
    Query(raw_query): Query<HashMap<String, String>>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let model = user::Model::get_one(&db, nip).await?;
    let selection = SelectedFields::from_query(&raw_query);
    Ok(Json(model.render(&selection)))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = user::UserCreate,
    responses(
        (status = 201, description = "Staff account created", body = user::Model),
        (status = 422, description = "Validation failed or second super admin")
    ),
    operation_id = "create_user",
    summary = "Create a staff account"
)]
pub async fn create_user(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<user::UserCreate>,
) -> Result<(StatusCode, Json<user::Model>), ApiError> {
    let model = services::users::create(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

#[utoipa::path(
    put,
    path = "/{nip}",
    request_body = user::UserUpdate,
    responses(
        (status = 200, description = "Staff account updated", body = user::Model),
        (status = 404, description = "User not found"),
        (status = 422, description = "Validation failed or invariant violated")
    ),
    operation_id = "update_user",
    summary = "Update a staff account"
)]
pub async fn update_user(
    Path(nip): Path<String>,
    State(db): State<DatabaseConnection>,
    Json(payload): Json<user::UserUpdate>,
) -> Result<Json<user::Model>, ApiError> {
    let model = services::users::update(&db, &nip, payload).await?;
    Ok(Json(model))
}

#[utoipa::path(
    delete,
    path = "/{nip}",
    responses(
        (status = 204, description = "Staff account deleted"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Super admin accounts cannot be deleted")
    ),
    operation_id = "delete_user",
    summary = "Delete a staff account"
)]
pub async fn delete_user(
    Path(nip): Path<String>,
    State(db): State<DatabaseConnection>,
) -> Result<StatusCode, ApiError> {
    services::users::delete(&db, &nip).await?;
    Ok(StatusCode::NO_CONTENT)
}
