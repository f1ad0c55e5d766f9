use axum::http::header::HeaderMap;

use crate::models::ListParams;

/// `per_page=-1` disables pagination and returns every row.
pub const ALL_ROWS: i64 = -1;

const DEFAULT_PER_PAGE: u64 = 15;

/// A resolved pagination window. `None` means "all rows".
pub type PageWindow = Option<(u64, u64)>;

/// Resolve `page`/`per_page` into an offset/limit window.
#[must_use]
pub fn parse_pagination(params: &ListParams) -> PageWindow {
    let per_page = match params.per_page {
        Some(ALL_ROWS) => return None,
        Some(per) if per > 0 => u64::try_from(per).unwrap_or(DEFAULT_PER_PAGE),
        _ => DEFAULT_PER_PAGE,
    };
    let page = params.page.unwrap_or(1).max(1);
    Some(((page - 1) * per_page, per_page))
}

/// Strip control characters so a resource name can't inject headers.
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Build the `Content-Range` header for a list response.
///
/// An unpaginated window (`per_page=-1`) reports the full row range.
#[must_use]
pub fn content_range_headers(
    window: PageWindow,
    total_count: u64,
    resource_name: &str,
) -> HeaderMap {
    let (offset, limit) = window.unwrap_or((0, total_count.max(1)));
    let last = (offset + limit).saturating_sub(1).min(total_count);
    let safe_name = sanitize_resource_name(resource_name);
    let content_range = format!("{safe_name} {offset}-{last}/{total_count}");

    let mut headers = HeaderMap::new();
    if let Ok(value) = content_range.parse() {
        headers.insert("Content-Range", value);
    } else if let Ok(value) = format!("items {offset}-{last}/{total_count}").parse() {
        headers.insert("Content-Range", value);
    }
    headers
}
