//! Query-parameter to SQL translation.
//!
//! Each list endpoint feeds its query parameters through the same pipeline:
//! free-text search, relation-array filters, column filters, then sorting,
//! all over a Sea-ORM `Select`. Parsers turn the raw JSON-encoded parameters
//! into typed filter values once; appliers consume those against a
//! per-resource allow-list. Unknown columns, relations and malformed values
//! are skipped without error so a stale client link never turns into a 500.

pub mod columns;
pub mod pagination;
pub mod relations;
pub mod search;
pub mod sort;

pub use columns::{ColumnFilter, apply_column_filters, parse_column_filters};
pub use pagination::{PageWindow, content_range_headers, parse_pagination};
pub use relations::{RelationFilter, RelationFilterBinding, apply_relation_filters, parse_relation_filters};
pub use search::search_condition;
pub use sort::{SortContext, SortParams, apply_sorting, parse_sorting};
