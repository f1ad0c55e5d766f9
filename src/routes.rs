use axum::{Json, Router, routing::get};
use sea_orm::DatabaseConnection;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers::complaints::*;
use crate::handlers::evidences::*;
use crate::handlers::users::*;

/// Build the application router. The collected OpenAPI document is served
/// at `/api/openapi.json`.
#[must_use]
pub fn router(db: &DatabaseConnection) -> Router {
    let complaint_routes = OpenApiRouter::new()
        .routes(routes!(get_all_complaints, create_complaint))
        .routes(routes!(
            get_one_complaint,
            update_complaint,
            delete_complaint
        ))
        .routes(routes!(get_complaint_evidences, attach_evidence));

    let evidence_routes = OpenApiRouter::new().routes(routes!(update_evidence, delete_evidence));

    let user_routes = OpenApiRouter::new()
        .routes(routes!(get_all_users, create_user))
        .routes(routes!(get_one_user, update_user, delete_user));

    let (router, api) = OpenApiRouter::new()
        .nest("/api/complaints", complaint_routes)
        .nest("/api/evidences", evidence_routes)
        .nest("/api/users", user_routes)
        .with_state(db.clone())
        .split_for_parts();

    router.route("/api/openapi.json", get(move || async move { Json(api) }))
}
