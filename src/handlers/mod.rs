pub mod complaints;
pub mod evidences;
pub mod users;

use std::collections::HashMap;

use axum::Json;
use hyper::HeaderMap;
use sea_orm::DatabaseConnection;

use crate::core::traits::CrudResource;
use crate::errors::ApiError;
use crate::filtering::{content_range_headers, parse_pagination};
use crate::models::ListParams;
use crate::selection::{SelectableResource, SelectedFields};

/// Run the shared list pipeline for a resource and serialize the page with
/// field selection applied. Returns the `Content-Range` header alongside
/// the JSON body.
pub(crate) async fn list_response<R>(
    db: &DatabaseConnection,
    params: &ListParams,
    raw_query: &HashMap<String, String>,
) -> Result<(HeaderMap, Json<serde_json::Value>), ApiError>
where
    R: CrudResource,
    <R::Entity as sea_orm::EntityTrait>::Model: SelectableResource + Send + Sync,
    <<R::Entity as sea_orm::EntityTrait>::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType:
        Send + Clone,
{
    let (models, total) = R::find_page(db, params).await?;
    let selection = SelectedFields::from_query(raw_query);
    let items: Vec<serde_json::Value> = models
        .into_iter()
        .map(|model| model.render(&selection))
        .collect();
    let headers = content_range_headers(
        parse_pagination(params),
        total,
        R::RESOURCE_NAME_PLURAL,
    );
    Ok((headers, Json(serde_json::Value::Array(items))))
}
