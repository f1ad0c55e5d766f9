use sea_orm::{
    ColumnTrait, EntityTrait, Order, QueryOrder, QuerySelect, Select,
    sea_query::{
        Alias, Asterisk, Expr, Func, Query,
        SelectStatement, SimpleExpr, SubQueryStatement,
    },
};
use serde::Deserialize;

use crate::models::ListParams;
use crate::relations::{RelationDescriptor, RelationKind, RelationRegistry};

/// One relation-field sort entry from `sort_by_relation_field`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationFieldSort {
    pub relation: String,
    pub field: String,
    #[serde(default)]
    pub direction: Option<String>,
}

/// Parsed sorting request. The three modes are independent and chain as
/// successive ORDER BY clauses in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SortParams {
    pub column: Option<(String, Order)>,
    pub relation_count: Option<(String, Order)>,
    pub relation_fields: Vec<(RelationFieldSort, Order)>,
}

/// Everything the appliers need to know about the base resource.
pub struct SortContext<'a, C> {
    pub table: &'a str,
    pub sortable: &'a [(&'a str, C)],
    pub default_column: C,
    pub registry: &'a RelationRegistry,
}

/// `asc` (any case) is ascending; everything else, including absence, is
/// descending.
fn parse_direction(dir: Option<&str>) -> Order {
    match dir {
        Some(d) if d.eq_ignore_ascii_case("asc") => Order::Asc,
        _ => Order::Desc,
    }
}

/// Find a sortable column by name or fall back to the default.
fn find_column<C>(name: &str, columns: &[(&str, C)], default: C) -> C
where
    C: ColumnTrait + Copy,
{
    columns
        .iter()
        .find(|&&(col_name, _)| col_name == name)
        .map_or(default, |&(_, col)| col)
}

/// Parse the sorting parameters out of a list request.
#[must_use]
pub fn parse_sorting(params: &ListParams) -> SortParams {
    let column = params
        .sort_by
        .as_ref()
        .map(|field| (field.clone(), parse_direction(params.sort_dir.as_deref())));

    // the count direction falls back to the column direction before "desc"
    let relation_count = params.sort_by_relation_count.as_ref().map(|relation| {
        let dir = params
            .sort_dir_relation_count
            .as_deref()
            .or(params.sort_dir.as_deref());
        (relation.clone(), parse_direction(dir))
    });

    let default_field_dir = params.sort_dir_relation_field.as_deref();
    let relation_fields = params
        .sort_by_relation_field
        .as_deref()
        .map(|raw| parse_relation_field_sorts(raw, default_field_dir))
        .unwrap_or_default();

    SortParams {
        column,
        relation_count,
        relation_fields,
    }
}

fn parse_relation_field_sorts(
    raw: &str,
    default_dir: Option<&str>,
) -> Vec<(RelationFieldSort, Order)> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring malformed sort_by_relation_field parameter");
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| {
            let sort: RelationFieldSort = serde_json::from_value(entry).ok()?;
            if sort.relation.is_empty() || sort.field.is_empty() {
                return None;
            }
            let order = parse_direction(sort.direction.as_deref().or(default_dir));
            Some((sort, order))
        })
        .collect()
}

/// Apply the parsed sorts to a query. Falls back to `default_column DESC`
/// when nothing else produced an ORDER BY, so list output stays stable.
#[must_use]
pub fn apply_sorting<E, C>(
    mut query: Select<E>,
    sorts: &SortParams,
    ctx: &SortContext<'_, C>,
) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait + Copy,
{
    let mut ordered = false;

    if let Some((field, direction)) = &sorts.column {
        let column = find_column(field, ctx.sortable, ctx.default_column);
        query = query.order_by(column, direction.clone());
        ordered = true;
    }

    if let Some((relation, direction)) = &sorts.relation_count
        && let Some(descriptor) = ctx.registry.resolve(ctx.table, relation)
    {
        let count = relation_count_expr(ctx.table, descriptor);
        QuerySelect::query(&mut query).order_by_expr(count, direction.clone());
        ordered = true;
    }

    let mut joined: Vec<&str> = Vec::new();
    for (sort, direction) in &sorts.relation_fields {
        let applied = if sort.relation.contains('.') {
            nested_aggregate_sort(&mut query, sort, direction.clone(), ctx)
        } else {
            direct_join_sort(&mut query, sort, direction.clone(), ctx, &mut joined)
        };
        ordered = ordered || applied;
    }

    if !ordered {
        query = query.order_by(ctx.default_column, Order::Desc);
    }
    query
}

/// Correlated `COUNT(*)` over the related table.
fn relation_count_expr(base_table: &str, descriptor: &RelationDescriptor) -> SimpleExpr {
    let mut sub = Query::select();
    sub.expr(Func::count(Expr::col(Asterisk)));
    match descriptor.kind {
        RelationKind::HasMany {
            local_key,
            foreign_key,
        } => {
            sub.from(Alias::new(descriptor.table)).and_where(
                Expr::col((Alias::new(descriptor.table), Alias::new(foreign_key)))
                    .equals((Alias::new(base_table), Alias::new(local_key))),
            );
        }
        RelationKind::BelongsTo {
            foreign_key,
            owner_key,
        } => {
            sub.from(Alias::new(descriptor.table)).and_where(
                Expr::col((Alias::new(descriptor.table), Alias::new(owner_key)))
                    .equals((Alias::new(base_table), Alias::new(foreign_key))),
            );
        }
        RelationKind::ManyToMany {
            pivot_table,
            local_key,
            pivot_local_key,
            ..
        } => {
            sub.from(Alias::new(pivot_table)).and_where(
                Expr::col((Alias::new(pivot_table), Alias::new(pivot_local_key)))
                    .equals((Alias::new(base_table), Alias::new(local_key))),
            );
        }
    }
    SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(sub)))
}

/// Order by a column on a directly related table via LEFT JOIN.
///
/// Only the base table's columns stay in the select list, and DISTINCT
/// suppresses the duplicate rows a to-many join would otherwise introduce.
fn direct_join_sort<E, C>(
    query: &mut Select<E>,
    sort: &RelationFieldSort,
    direction: Order,
    ctx: &SortContext<'_, C>,
    joined: &mut Vec<&str>,
) -> bool
where
    E: EntityTrait,
    C: ColumnTrait + Copy,
{
    let Some(descriptor) = ctx.registry.resolve(ctx.table, &sort.relation) else {
        return false;
    };

    let stmt = QuerySelect::query(query);
    if !joined.contains(&descriptor.table) {
        match descriptor.kind {
            RelationKind::BelongsTo {
                foreign_key,
                owner_key,
            } => {
                stmt.left_join(
                    Alias::new(descriptor.table),
                    Expr::col((Alias::new(ctx.table), Alias::new(foreign_key)))
                        .equals((Alias::new(descriptor.table), Alias::new(owner_key))),
                );
            }
            RelationKind::HasMany {
                local_key,
                foreign_key,
            } => {
                stmt.left_join(
                    Alias::new(descriptor.table),
                    Expr::col((Alias::new(ctx.table), Alias::new(local_key)))
                        .equals((Alias::new(descriptor.table), Alias::new(foreign_key))),
                );
            }
            RelationKind::ManyToMany {
                pivot_table,
                local_key,
                pivot_local_key,
                pivot_related_key,
                related_key,
            } => {
                stmt.left_join(
                    Alias::new(pivot_table),
                    Expr::col((Alias::new(ctx.table), Alias::new(local_key)))
                        .equals((Alias::new(pivot_table), Alias::new(pivot_local_key))),
                );
                stmt.left_join(
                    Alias::new(descriptor.table),
                    Expr::col((Alias::new(pivot_table), Alias::new(pivot_related_key)))
                        .equals((Alias::new(descriptor.table), Alias::new(related_key))),
                );
            }
        }
        stmt.distinct();
        joined.push(descriptor.table);
    }
    stmt.order_by(
        (Alias::new(descriptor.table), Alias::new(sort.field.as_str())),
        direction,
    );
    true
}

/// Order by a field reached through a dot-nested relation path, using a
/// correlated MIN/MAX aggregate (MIN for ascending, MAX for descending)
/// exposed under a `{path}_{field}_{min|max}` alias.
fn nested_aggregate_sort<E, C>(
    query: &mut Select<E>,
    sort: &RelationFieldSort,
    direction: Order,
    ctx: &SortContext<'_, C>,
) -> bool
where
    E: EntityTrait,
    C: ColumnTrait + Copy,
{
    let Some(chain) = ctx.registry.resolve_path(ctx.table, &sort.relation) else {
        return false;
    };
    let Some(last) = chain.last() else {
        return false;
    };

    let ascending = direction == Order::Asc;
    let target = Expr::col((Alias::new(last.table), Alias::new(sort.field.as_str())));
    let aggregate: SimpleExpr = if ascending {
        Func::min(target).into()
    } else {
        Func::max(target).into()
    };

    let mut sub = Query::select();
    sub.expr(aggregate).from(Alias::new(last.table));

    // walk the chain backwards, joining each parent table onto its child
    for i in (1..chain.len()).rev() {
        let parent = chain[i - 1].table;
        join_parent(&mut sub, parent, chain[i]);
    }
    // the first hop correlates the subquery with the outer base table
    correlate_base(&mut sub, ctx.table, chain[0]);

    let alias = format!(
        "{}_{}_{}",
        sort.relation.replace('.', "_"),
        sort.field,
        if ascending { "min" } else { "max" }
    );
    let stmt = QuerySelect::query(query);
    stmt.expr_as(
        SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(sub))),
        Alias::new(alias.as_str()),
    );
    stmt.order_by(Alias::new(alias.as_str()), direction);
    true
}

/// Join `parent` onto the already-present table of `descriptor` inside the
/// aggregate subquery.
fn join_parent(sub: &mut SelectStatement, parent: &str, descriptor: &RelationDescriptor) {
    match descriptor.kind {
        RelationKind::HasMany {
            local_key,
            foreign_key,
        } => {
            sub.inner_join(
                Alias::new(parent),
                Expr::col((Alias::new(parent), Alias::new(local_key)))
                    .equals((Alias::new(descriptor.table), Alias::new(foreign_key))),
            );
        }
        RelationKind::BelongsTo {
            foreign_key,
            owner_key,
        } => {
            sub.inner_join(
                Alias::new(parent),
                Expr::col((Alias::new(parent), Alias::new(foreign_key)))
                    .equals((Alias::new(descriptor.table), Alias::new(owner_key))),
            );
        }
        RelationKind::ManyToMany {
            pivot_table,
            local_key,
            pivot_local_key,
            pivot_related_key,
            related_key,
        } => {
            sub.inner_join(
                Alias::new(pivot_table),
                Expr::col((Alias::new(pivot_table), Alias::new(pivot_related_key)))
                    .equals((Alias::new(descriptor.table), Alias::new(related_key))),
            );
            sub.inner_join(
                Alias::new(parent),
                Expr::col((Alias::new(parent), Alias::new(local_key)))
                    .equals((Alias::new(pivot_table), Alias::new(pivot_local_key))),
            );
        }
    }
}

/// Tie the innermost joined table back to the outer query's base table.
fn correlate_base(sub: &mut SelectStatement, base_table: &str, descriptor: &RelationDescriptor) {
    match descriptor.kind {
        RelationKind::HasMany {
            local_key,
            foreign_key,
        } => {
            sub.and_where(
                Expr::col((Alias::new(descriptor.table), Alias::new(foreign_key)))
                    .equals((Alias::new(base_table), Alias::new(local_key))),
            );
        }
        RelationKind::BelongsTo {
            foreign_key,
            owner_key,
        } => {
            sub.and_where(
                Expr::col((Alias::new(descriptor.table), Alias::new(owner_key)))
                    .equals((Alias::new(base_table), Alias::new(foreign_key))),
            );
        }
        RelationKind::ManyToMany {
            pivot_table,
            local_key,
            pivot_local_key,
            pivot_related_key,
            related_key,
        } => {
            sub.inner_join(
                Alias::new(pivot_table),
                Expr::col((Alias::new(pivot_table), Alias::new(pivot_related_key)))
                    .equals((Alias::new(descriptor.table), Alias::new(related_key))),
            );
            sub.and_where(
                Expr::col((Alias::new(pivot_table), Alias::new(pivot_local_key)))
                    .equals((Alias::new(base_table), Alias::new(local_key))),
            );
        }
    }
}
