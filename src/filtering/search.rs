use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, ExprTrait, Func},
};

/// Escape LIKE wildcards so a search term matches literally.
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Build the free-text search condition: a disjunction of case-insensitive
/// substring matches across every searchable column.
///
/// Returns `None` (a no-op) for blank terms or an empty allow-list.
#[must_use]
pub fn search_condition<C>(term: &str, columns: &[(&str, C)]) -> Option<Condition>
where
    C: ColumnTrait + Copy,
{
    let trimmed = term.trim();
    if trimmed.is_empty() || columns.is_empty() {
        return None;
    }

    let pattern = format!("%{}%", escape_like_wildcards(trimmed).to_uppercase());
    let mut any = Condition::any();
    for (_, column) in columns {
        any = any.add(Func::upper(Expr::col(*column)).like(pattern.clone()));
    }
    Some(any)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("a_b"), "a\\_b");
        assert_eq!(escape_like_wildcards(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_blank_term_is_noop() {
        let columns: &[(&str, crate::entities::complaint::Column)] = &[(
            "incident_title",
            crate::entities::complaint::Column::IncidentTitle,
        )];
        assert!(search_condition("", columns).is_none());
        assert!(search_condition("   ", columns).is_none());
    }

    #[test]
    fn test_empty_allow_list_is_noop() {
        let columns: &[(&str, crate::entities::complaint::Column)] = &[];
        assert!(search_condition("anything", columns).is_none());
    }

    #[test]
    fn test_term_produces_disjunction() {
        let columns = &[
            (
                "incident_title",
                crate::entities::complaint::Column::IncidentTitle,
            ),
            (
                "reporter_name",
                crate::entities::complaint::Column::ReporterName,
            ),
        ];
        let condition = search_condition("siaran", columns).unwrap();
        let rendered = format!("{condition:?}");
        assert!(rendered.contains("SIARAN"));
    }
}
