//! Pagination data model
//!
//! `PaginationOptions` is what callers hand to the paginator: every field is
//! optional and may be malformed. `PageWindow` is the normalized form, and
//! `PageResult` is what comes back.

use serde::Serialize;

/// First page number.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the caller gives none.
pub const DEFAULT_LIMIT: u64 = 10;
/// Smallest accepted page size.
pub const MIN_LIMIT: u64 = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: u64 = 100;
/// Field sorted on when no sort is given.
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

// ── Raw numeric input ───────────────────────────────────────────

/// A loosely typed number as it arrives from a query string or JSON body.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberInput {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberInput {
    /// Integer value of the input, truncating toward zero.
    ///
    /// Text is read like a leading-integer parse: surrounding whitespace is
    /// skipped, an optional sign and at least one digit are required, and
    /// anything after the digits is ignored (`"12abc"` is 12, `"2.9"` is 2).
    /// Returns `None` for NaN, infinities and text without digits.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            NumberInput::Int(n) => Some(*n),
            NumberInput::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            NumberInput::Float(_) => None,
            NumberInput::Text(s) => parse_leading_integer(s),
        }
    }
}

pub(crate) fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = &digits[..end];
    let value = match magnitude.parse::<i64>() {
        Ok(v) => v,
        // Too many digits: saturate rather than reject.
        Err(_) => i64::MAX,
    };
    Some(if negative { -value } else { value })
}

impl From<i64> for NumberInput {
    fn from(n: i64) -> Self {
        NumberInput::Int(n)
    }
}

impl From<i32> for NumberInput {
    fn from(n: i32) -> Self {
        NumberInput::Int(n as i64)
    }
}

impl From<u32> for NumberInput {
    fn from(n: u32) -> Self {
        NumberInput::Int(n as i64)
    }
}

impl From<f64> for NumberInput {
    fn from(f: f64) -> Self {
        NumberInput::Float(f)
    }
}

impl From<&str> for NumberInput {
    fn from(s: &str) -> Self {
        NumberInput::Text(s.to_string())
    }
}

impl From<String> for NumberInput {
    fn from(s: String) -> Self {
        NumberInput::Text(s)
    }
}

// ── Sorting ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordered list of sort keys; earlier keys take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec(Vec<(String, SortDirection)>);

impl SortSpec {
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self(vec![(field.into(), direction)])
    }

    pub fn then(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.0.push((field.into(), direction));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SortDirection)> {
        self.0.iter().map(|(f, d)| (f.as_str(), *d))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::by(DEFAULT_SORT_FIELD, SortDirection::Descending)
    }
}

// ── Projection / expansion (opaque to the paginator) ────────────

/// Field selection, e.g. `"name floor"` or `"-notes -equipment"`.
///
/// Interpreted by collections only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection(String);

/// One entry of a projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedField {
    pub name: String,
    pub include: bool,
}

impl Projection {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split on whitespace and commas; a leading `-` excludes the field.
    pub fn fields(&self) -> Vec<ProjectedField> {
        self.0
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .filter_map(|token| match token.strip_prefix('-') {
                Some("") => None,
                Some(name) => Some(ProjectedField {
                    name: name.to_string(),
                    include: false,
                }),
                None => Some(ProjectedField {
                    name: token.strip_prefix('+').unwrap_or(token).to_string(),
                    include: true,
                }),
            })
            .collect()
    }
}

impl From<&str> for Projection {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Expansion of a single reference path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateSpec {
    pub path: String,
    pub select: Option<Projection>,
}

/// Reference expansion: one path, several paths, or structured specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Populate {
    Path(String),
    Paths(Vec<String>),
    Specs(Vec<PopulateSpec>),
}

impl Populate {
    pub fn specs(&self) -> Vec<PopulateSpec> {
        let plain = |p: &String| PopulateSpec {
            path: p.clone(),
            select: None,
        };
        match self {
            Populate::Path(p) => vec![plain(p)],
            Populate::Paths(paths) => paths.iter().map(plain).collect(),
            Populate::Specs(specs) => specs.clone(),
        }
    }

    /// The expansion requested for `path`, if any.
    pub fn get(&self, path: &str) -> Option<PopulateSpec> {
        self.specs().into_iter().find(|s| s.path == path)
    }
}

impl From<&str> for Populate {
    fn from(s: &str) -> Self {
        Populate::Path(s.to_string())
    }
}

// ── Options ─────────────────────────────────────────────────────

/// Caller-supplied, possibly partial pagination options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationOptions {
    pub page: Option<NumberInput>,
    pub limit: Option<NumberInput>,
    pub sort: Option<SortSpec>,
    pub populate: Option<Populate>,
    pub select: Option<Projection>,
}

impl PaginationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: impl Into<NumberInput>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_limit(mut self, limit: impl Into<NumberInput>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_populate(mut self, populate: impl Into<Populate>) -> Self {
        self.populate = Some(populate.into());
        self
    }

    pub fn with_select(mut self, select: impl Into<Projection>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Normalized page number and size.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            page: normalize_page(self.page.as_ref()),
            limit: normalize_limit(self.limit.as_ref()),
        }
    }
}

/// Page number: anything unparseable or below 1 becomes 1.
pub fn normalize_page(raw: Option<&NumberInput>) -> u64 {
    match raw.and_then(NumberInput::to_integer) {
        Some(n) if n >= 1 => n as u64,
        _ => DEFAULT_PAGE,
    }
}

/// Page size: absent means the default; present values are clamped into
/// `[MIN_LIMIT, MAX_LIMIT]`, and unparseable ones count as below minimum.
pub fn normalize_limit(raw: Option<&NumberInput>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };
    match raw.to_integer() {
        Some(n) if n > MAX_LIMIT as i64 => MAX_LIMIT,
        Some(n) if n >= MIN_LIMIT as i64 => n as u64,
        _ => MIN_LIMIT,
    }
}

/// Normalized page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
}

impl PageWindow {
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

// ── Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl PageMeta {
    pub fn new(window: PageWindow, total: u64) -> Self {
        let total_pages = total.div_ceil(window.limit);
        let has_next_page = window.page < total_pages;
        let has_prev_page = window.page > 1;
        Self {
            page: window.page,
            limit: window.limit,
            total,
            total_pages,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| window.page + 1),
            prev_page: has_prev_page.then(|| window.page - 1),
        }
    }
}

/// One page of records plus its position in the full result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> PageResult<T> {
    pub fn new(data: Vec<T>, pagination: PageMeta) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            success: self.success,
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
