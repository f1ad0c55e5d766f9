use serde::Deserialize;
use serde_with::NoneAsEmptyString;
use utoipa::{IntoParams, ToSchema};

/// Query-string keys recognized by the list pipeline.
///
/// Any key not in [`keys::RESERVED`] is treated as a per-resource field
/// selection (`complaint=incident_title,status`).
pub mod keys {
    pub const SEARCH: &str = "search";
    pub const COLUMN_FILTERS: &str = "column_filters";
    pub const RELATIONS_ARRAY_FILTERS: &str = "relations_array_filters";
    pub const SORT_BY: &str = "sort_by";
    pub const SORT_DIR: &str = "sort_dir";
    pub const SORT_BY_RELATION_COUNT: &str = "sort_by_relation_count";
    pub const SORT_DIR_RELATION_COUNT: &str = "sort_dir_relation_count";
    pub const SORT_BY_RELATION_FIELD: &str = "sort_by_relation_field";
    pub const SORT_DIR_RELATION_FIELD: &str = "sort_dir_relation_field";
    pub const PAGE: &str = "page";
    pub const PER_PAGE: &str = "per_page";

    /// Keys that are never interpreted as resource field selections.
    pub const RESERVED: &[&str] = &[
        SEARCH,
        COLUMN_FILTERS,
        RELATIONS_ARRAY_FILTERS,
        SORT_BY,
        SORT_DIR,
        SORT_BY_RELATION_COUNT,
        SORT_DIR_RELATION_COUNT,
        SORT_BY_RELATION_FIELD,
        SORT_DIR_RELATION_FIELD,
        PAGE,
        PER_PAGE,
    ];
}

/// Query parameters for filtering, sorting and paginating list endpoints.
///
/// # Filtering
/// - **Free text search:** `search=siaran` matches a substring across the
///   resource's searchable columns.
/// - **Column filters:** `column_filters` is a JSON-encoded object. Values
///   may be scalars (equality), `{"from": .., "to": ..}` ranges (inclusive,
///   either bound optional), or arrays (set membership):
///   ```json
///   {"status": "pending", "created_at": {"from": "2025-01-01T00:00:00Z"}, "priority": ["low", "high"]}
///   ```
/// - **Relation filters:** `relations_array_filters` is a JSON-encoded
///   object of relation filter name to a list (or comma-joined string) of
///   values; a leading `!` excludes instead of includes:
///   ```json
///   {"evidence_types": ["application/pdf", "!image/png"]}
///   ```
///
/// # Sorting
/// `sort_by`/`sort_dir` order by a column (direction defaults to `desc`).
/// `sort_by_relation_count` orders by the number of related rows.
/// `sort_by_relation_field` is a JSON-encoded array of
/// `{"relation": .., "field": .., "direction": ..}` entries; dot-nested
/// relation paths are ordered through a min/max aggregate. All three modes
/// are independent and chain in that order.
///
/// # Pagination
/// `page` is 1-based; `per_page=-1` disables pagination and returns every
/// row.
#[serde_with::serde_as]
#[derive(Debug, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Free-text search term matched as a case-insensitive substring.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub search: Option<String>,
    /// JSON-encoded column filter object.
    #[param(example = json!({"status": "pending", "priority": ["low", "medium"]}))]
    pub column_filters: Option<String>,
    /// JSON-encoded relation filter object; `!` prefix excludes.
    #[param(example = json!({"evidence_types": "application/pdf,!image/png"}))]
    pub relations_array_filters: Option<String>,
    /// Sort column.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(example = "incident_time")]
    pub sort_by: Option<String>,
    /// Sort direction (`asc` or `desc`, default `desc`).
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(example = "desc")]
    pub sort_dir: Option<String>,
    /// Relation whose row count to sort by.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(example = "evidences")]
    pub sort_by_relation_count: Option<String>,
    /// Direction for the relation-count sort; falls back to `sort_dir`.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sort_dir_relation_count: Option<String>,
    /// JSON-encoded array of `{relation, field, direction}` sorts.
    #[param(example = json!([{"relation": "evidences", "field": "title", "direction": "asc"}]))]
    pub sort_by_relation_field: Option<String>,
    /// Default direction for relation-field sorts.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sort_dir_relation_field: Option<String>,
    /// Page number (1-based).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Page size; `-1` returns all rows unpaginated.
    #[param(example = 15)]
    pub per_page: Option<i64>,
}
