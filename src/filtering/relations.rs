use sea_orm::{
    Condition,
    sea_query::{Alias, Expr, Query, SelectStatement, SimpleExpr},
};

use crate::relations::{RelationDescriptor, RelationKind, RelationRegistry};

/// Maps a logical relation-filter key from the query string to the relation
/// and related-table column it filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationFilterBinding {
    /// Key as it appears in `relations_array_filters`.
    pub key: &'static str,
    /// Relation name on the base entity.
    pub relation: &'static str,
    /// Column on the related table the values match against.
    pub column: &'static str,
}

/// Include/exclude value sets for one relation filter, split on the leading
/// `!` marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl RelationFilter {
    fn push(&mut self, raw: &str) {
        if let Some(excluded) = raw.strip_prefix('!') {
            if !excluded.trim().is_empty() {
                self.exclude.push(excluded.trim().to_string());
            }
        } else if !raw.trim().is_empty() {
            self.include.push(raw.trim().to_string());
        }
    }

    fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

/// Parse the JSON-encoded `relations_array_filters` parameter.
///
/// Values may be arrays of strings or comma-joined strings; anything else
/// for a relation is skipped without error.
#[must_use]
pub fn parse_relation_filters(raw: Option<&str>) -> Vec<(String, RelationFilter)> {
    let Some(raw) = raw else { return Vec::new() };
    let parsed: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring malformed relations_array_filters parameter");
            return Vec::new();
        }
    };

    let mut filters = Vec::new();
    for (key, value) in parsed {
        let mut filter = RelationFilter::default();
        match value {
            serde_json::Value::String(csv) => {
                for part in csv.split(',') {
                    filter.push(part);
                }
            }
            serde_json::Value::Array(values) => {
                for entry in values {
                    // non-string entries are skipped
                    if let serde_json::Value::String(s) = entry {
                        filter.push(&s);
                    }
                }
            }
            _ => continue,
        }
        if !filter.is_empty() {
            filters.push((key, filter));
        }
    }
    filters
}

/// Apply relation include/exclude filters to a condition.
///
/// Each filter key resolves through `bindings` to a (relation, column)
/// pair; unconfigured keys default to the key itself as the relation name
/// and `name` as the column. Relations missing from the registry are
/// skipped silently.
#[must_use]
pub fn apply_relation_filters(
    mut condition: Condition,
    filters: &[(String, RelationFilter)],
    bindings: &[RelationFilterBinding],
    base_table: &str,
    registry: &RelationRegistry,
) -> Condition {
    for (key, filter) in filters {
        let (relation, column) = bindings
            .iter()
            .find(|binding| binding.key == key)
            .map_or((key.as_str(), "name"), |binding| {
                (binding.relation, binding.column)
            });
        let Some(descriptor) = registry.resolve(base_table, relation) else {
            continue;
        };
        if !filter.include.is_empty() {
            condition = condition.add(membership(
                base_table,
                descriptor,
                column,
                &filter.include,
                false,
            ));
        }
        if !filter.exclude.is_empty() {
            condition = condition.add(membership(
                base_table,
                descriptor,
                column,
                &filter.exclude,
                true,
            ));
        }
    }
    condition
}

/// Build `base.key [NOT] IN (SELECT .. FROM related WHERE related.column IN (values))`.
fn membership(
    base_table: &str,
    descriptor: &RelationDescriptor,
    column: &str,
    values: &[String],
    negate: bool,
) -> SimpleExpr {
    let values = values.to_vec();
    let (outer_key, subquery): (&str, SelectStatement) = match descriptor.kind {
        RelationKind::HasMany {
            local_key,
            foreign_key,
        } => (
            local_key,
            Query::select()
                .column(Alias::new(foreign_key))
                .from(Alias::new(descriptor.table))
                .and_where(Expr::col(Alias::new(column)).is_in(values))
                .to_owned(),
        ),
        RelationKind::BelongsTo {
            foreign_key,
            owner_key,
        } => (
            foreign_key,
            Query::select()
                .column(Alias::new(owner_key))
                .from(Alias::new(descriptor.table))
                .and_where(Expr::col(Alias::new(column)).is_in(values))
                .to_owned(),
        ),
        RelationKind::ManyToMany {
            pivot_table,
            local_key,
            pivot_local_key,
            pivot_related_key,
            related_key,
        } => (
            local_key,
            Query::select()
                .column((Alias::new(pivot_table), Alias::new(pivot_local_key)))
                .from(Alias::new(pivot_table))
                .inner_join(
                    Alias::new(descriptor.table),
                    Expr::col((Alias::new(pivot_table), Alias::new(pivot_related_key)))
                        .equals((Alias::new(descriptor.table), Alias::new(related_key))),
                )
                .and_where(
                    Expr::col((Alias::new(descriptor.table), Alias::new(column))).is_in(values),
                )
                .to_owned(),
        ),
    };

    let outer = Expr::col((Alias::new(base_table), Alias::new(outer_key)));
    if negate {
        outer.not_in_subquery(subquery)
    } else {
        outer.in_subquery(subquery)
    }
}
