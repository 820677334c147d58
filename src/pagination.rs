//! Pagination, filtering, and sorting shared by list endpoints.
//!
//! Raw list parameters arrive as optional strings and numbers. They are
//! resolved into a typed [`ListQuery`] before reaching a repository, and the
//! repository answers with a [`Page`] carrying the total match count.

use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Page size used when the caller does not request one.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Returns the canonical query-string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parses a direction, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource field that list queries may sort by.
pub trait SortField: Copy + Send + Sync + 'static {
    /// Field used when the caller does not choose one.
    const DEFAULT: Self;

    /// Returns the query-string name of the field.
    fn as_str(self) -> &'static str;

    /// Parses a query-string field name.
    fn parse(value: &str) -> Option<Self>;
}

/// Sort instruction made of a field and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    field: F,
    order: SortOrder,
}

impl<F: SortField> Sort<F> {
    /// Creates a sort instruction.
    #[must_use]
    pub const fn new(field: F, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Returns the sort field.
    #[must_use]
    pub const fn field(&self) -> F {
        self.field
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }
}

impl<F: SortField> Default for Sort<F> {
    fn default() -> Self {
        Self::new(F::DEFAULT, SortOrder::Asc)
    }
}

/// One-based page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    current_page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates page coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when `current_page` is zero or `per_page`
    /// falls outside `1..=MAX_PER_PAGE`.
    pub fn new(current_page: u32, per_page: u32) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if current_page == 0 {
            errors.add("current_page", "The current page must be at least 1.");
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            errors.add(
                "per_page",
                format!("The per page must be between 1 and {MAX_PER_PAGE}."),
            );
        }
        errors.into_result()?;
        Ok(Self {
            current_page,
            per_page,
        })
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the number of records preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            current_page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// A single page of results plus the number of records matching the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    /// Creates a page from already-sliced items.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Returns the records on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns its records.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the number of records matching the query across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the number of records on this page.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the page coordinates that produced this page.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Returns the number of pages, never less than one.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total
            .div_ceil(u64::from(self.request.per_page))
            .max(1)
    }

    /// Maps every record on the page, keeping the totals.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}

/// Slices an in-memory, already-sorted result set into a page.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(request.per_page()).unwrap_or(usize::MAX);
    let page_items = items.into_iter().skip(skip).take(take).collect();
    Page::new(page_items, total, request)
}

/// Returns whether any haystack contains the filter, ignoring case.
#[must_use]
pub fn matches_filter(filter: &str, haystacks: &[&str]) -> bool {
    let needle = filter.to_lowercase();
    haystacks
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Orders text case-insensitively, falling back to byte order so values
/// differing only in case still sort deterministically.
///
/// [`folded_order_sql`] expresses the same order in `PostgreSQL`. Case
/// folding of non-ASCII text follows the database locale there.
#[must_use]
pub fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Builds `ORDER BY` terms for a text column matching [`compare_text`].
///
/// `COLLATE "C"` pins both terms to byte order regardless of the database
/// collation.
#[must_use]
pub fn folded_order_sql(column: &str, order: SortOrder) -> String {
    let direction = match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!(r#"lower({column}) COLLATE "C" {direction}, {column} COLLATE "C" {direction}"#)
}

/// Builds a SQL `LIKE` pattern matching the filter anywhere in a column.
///
/// `%`, `_`, and `\` are escaped with the default `PostgreSQL` escape
/// character.
#[must_use]
pub fn contains_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for ch in filter.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Resolved list query: optional free-text filter, sort, and page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    filter: Option<String>,
    sort: Sort<F>,
    page: PageRequest,
}

impl<F: SortField> ListQuery<F> {
    /// Creates a list query. Blank filters are dropped.
    #[must_use]
    pub fn new(filter: Option<String>, sort: Sort<F>, page: PageRequest) -> Self {
        Self {
            filter: filter
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
            sort,
            page,
        }
    }

    /// Returns the free-text filter, if any.
    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Returns the sort instruction.
    #[must_use]
    pub const fn sort(&self) -> Sort<F> {
        self.sort
    }

    /// Returns the page coordinates.
    #[must_use]
    pub const fn page(&self) -> PageRequest {
        self.page
    }
}

impl<F: SortField> Default for ListQuery<F> {
    fn default() -> Self {
        Self::new(None, Sort::default(), PageRequest::default())
    }
}

/// Resolves raw page coordinates, treating blank values as unset.
///
/// # Errors
///
/// Returns [`ValidationErrors`] naming each coordinate that is not a
/// non-negative integer or is out of range.
pub fn resolve_page(
    current_page: Option<&str>,
    per_page: Option<&str>,
) -> Result<PageRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let current = page_number(&mut errors, "current_page", current_page, 1);
    let size = page_number(&mut errors, "per_page", per_page, DEFAULT_PER_PAGE);
    match (current, size) {
        (Some(current_number), Some(size_number)) => PageRequest::new(current_number, size_number),
        _ => Err(errors),
    }
}

fn page_number(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    default: u32,
) -> Option<u32> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(text) => text.parse().map_or_else(
            |_| {
                errors.add(
                    field,
                    format!("The {} must be an integer.", field.replace('_', " ")),
                );
                None
            },
            Some,
        ),
    }
}

/// Unvalidated list parameters as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    /// Free-text filter.
    pub filter: Option<String>,
    /// Field to sort by.
    pub sort_by: Option<String>,
    /// Sort direction (`asc` or `desc`).
    pub sort_order: Option<String>,
    /// Page size. Blank values count as unset.
    pub per_page: Option<String>,
    /// One-based page number. Blank values count as unset.
    #[serde(alias = "page")]
    pub current_page: Option<String>,
}

impl ListParams {
    /// Resolves the parameters into a typed query.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming every parameter that is out of
    /// range or not recognised for the resource.
    pub fn resolve<F: SortField>(self) -> Result<ListQuery<F>, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let field = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => Some(F::DEFAULT),
            Some(raw) => F::parse(raw),
        };
        if field.is_none() {
            errors.add("sort_by", "The selected sort by is invalid.");
        }

        let order = match self.sort_order.as_deref().map(str::trim) {
            None | Some("") => Some(SortOrder::Asc),
            Some(raw) => SortOrder::parse(raw),
        };
        if order.is_none() {
            errors.add("sort_order", "The selected sort order is invalid.");
        }

        let page = match resolve_page(self.current_page.as_deref(), self.per_page.as_deref()) {
            Ok(page) => Some(page),
            Err(page_errors) => {
                errors.merge(page_errors);
                None
            }
        };

        match (field, order, page) {
            (Some(sort_field), Some(sort_order), Some(page_request)) if errors.is_empty() => Ok(
                ListQuery::new(self.filter, Sort::new(sort_field, sort_order), page_request),
            ),
            _ => Err(errors),
        }
    }
}
