use sea_orm::{ColumnTrait, Condition};

/// A single parsed column filter.
///
/// The JSON shape of the `column_filters` parameter decides the variant:
/// scalars become equality, `{"from", "to"}` objects become inclusive
/// ranges, arrays become set membership.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    Eq(serde_json::Value),
    Range {
        from: Option<serde_json::Value>,
        to: Option<serde_json::Value>,
    },
    In(Vec<serde_json::Value>),
}

/// Parse the JSON-encoded `column_filters` parameter into typed filters.
///
/// Invalid JSON yields no filters; individual values that fit no variant
/// (null, objects without `from`/`to`) are dropped.
#[must_use]
pub fn parse_column_filters(raw: Option<&str>) -> Vec<(String, ColumnFilter)> {
    let Some(raw) = raw else { return Vec::new() };
    let parsed: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring malformed column_filters parameter");
            return Vec::new();
        }
    };

    let mut filters = Vec::new();
    for (key, value) in parsed {
        match value {
            serde_json::Value::Object(map) => {
                let from = map.get("from").filter(|value| is_scalar(value)).cloned();
                let to = map.get("to").filter(|value| is_scalar(value)).cloned();
                if from.is_some() || to.is_some() {
                    filters.push((key, ColumnFilter::Range { from, to }));
                }
            }
            serde_json::Value::Array(values) => {
                let values: Vec<serde_json::Value> =
                    values.into_iter().filter(is_scalar).collect();
                if !values.is_empty() {
                    filters.push((key, ColumnFilter::In(values)));
                }
            }
            value if is_scalar(&value) => filters.push((key, ColumnFilter::Eq(value))),
            _ => {}
        }
    }
    filters
}

/// Apply parsed column filters against an allow-list of columns.
///
/// Keys that are not in the allow-list are ignored. Range bounds are
/// inclusive; a one-sided range degrades to `>=` or `<=`.
#[must_use]
pub fn apply_column_filters<C>(
    mut condition: Condition,
    filters: &[(String, ColumnFilter)],
    allowed: &[(&str, C)],
) -> Condition
where
    C: ColumnTrait + Copy,
{
    for (key, filter) in filters {
        let Some((_, column)) = allowed.iter().find(|(name, _)| name == key) else {
            continue;
        };
        match filter {
            ColumnFilter::Eq(value) => {
                if let Some(value) = json_to_value(value) {
                    condition = condition.add(column.eq(value));
                }
            }
            ColumnFilter::Range { from, to } => {
                let from = from.as_ref().and_then(json_to_value);
                let to = to.as_ref().and_then(json_to_value);
                match (from, to) {
                    (Some(from), Some(to)) => {
                        condition = condition.add(column.between(from, to));
                    }
                    (Some(from), None) => {
                        condition = condition.add(column.gte(from));
                    }
                    (None, Some(to)) => {
                        condition = condition.add(column.lte(to));
                    }
                    (None, None) => {}
                }
            }
            ColumnFilter::In(values) => {
                let values: Vec<sea_orm::Value> =
                    values.iter().filter_map(json_to_value).collect();
                if !values.is_empty() {
                    condition = condition.add(column.is_in(values));
                }
            }
        }
    }
    condition
}

fn is_scalar(value: &serde_json::Value) -> bool {
    matches!(
        value,
        serde_json::Value::String(_) | serde_json::Value::Number(_) | serde_json::Value::Bool(_)
    )
}

/// Convert a scalar JSON value into a bindable query value.
fn json_to_value(value: &serde_json::Value) -> Option<sea_orm::Value> {
    match value {
        serde_json::Value::String(s) => Some(s.clone().into()),
        serde_json::Value::Bool(b) => Some((*b).into()),
        serde_json::Value::Number(n) => {
            if let Some(int) = n.as_i64() {
                Some(int.into())
            } else {
                n.as_f64().map(Into::into)
            }
        }
        _ => None,
    }
}
