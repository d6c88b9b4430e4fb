use serde::Deserialize;
use utoipa::IntoParams;

use crate::shared::types::pagination::parse_leading_integer;
use crate::shared::types::{
    NumberInput, PaginationOptions, SortDirection, SortSpec, DEFAULT_LIMIT, DEFAULT_PAGE,
    DEFAULT_SORT_FIELD,
};

/// Untyped pagination parameters as they appear in a query string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RawPaginationQuery {
    /// Page number (1-based). Default: 1
    pub page: Option<String>,
    /// Page size, clamped to 1–100. Default: 10
    pub limit: Option<String>,
    /// Field to sort on. Default: createdAt
    pub sort_by: Option<String>,
    /// `asc` for ascending; anything else sorts descending
    pub sort_order: Option<String>,
}

/// Turn raw query parameters into pagination options.
///
/// Never fails. Unparseable `page`/`limit` fall back to 1 and 10; range
/// checks are left to the paginator.
pub fn extract_params(raw: &RawPaginationQuery) -> PaginationOptions {
    let page = raw
        .page
        .as_deref()
        .and_then(parse_leading_integer)
        .unwrap_or(DEFAULT_PAGE as i64);
    let limit = raw
        .limit
        .as_deref()
        .and_then(parse_leading_integer)
        .unwrap_or(DEFAULT_LIMIT as i64);

    let field = raw.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
    let direction = if raw.sort_order.as_deref() == Some("asc") {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };

    PaginationOptions {
        page: Some(NumberInput::Int(page)),
        limit: Some(NumberInput::Int(limit)),
        sort: Some(SortSpec::by(field, direction)),
        populate: None,
        select: None,
    }
}
