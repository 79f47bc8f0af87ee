//! Query-state adapter: the single translation layer between a URL's
//! query string and the structured list-view state.
//!
//! The query string is the source of truth for search, filters, sort
//! order, and pagination.  [`QueryState::parse`] is the read path (pure,
//! deterministic, memoizable); [`PageChange`] is the write path, building
//! a fresh canonical query string for a navigation.  Keeping both
//! directions in one module is what guarantees they round-trip.

use std::collections::BTreeMap;

use url::form_urlencoded;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Query parameter names with dedicated [`QueryState`] fields.  Every
/// other parameter is treated as a filter.
pub const RESERVED_PARAMS: &[&str] = &["page", "search", "sort", "order", "limit"];

/// Default page size, used both as the parse fallback and as the write
/// baseline (a `limit` equal to this is omitted from generated URLs).
pub const DEFAULT_LIMIT: u32 = 10;

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

/// Sort direction accepted on the write path.
///
/// The read path deliberately keeps `order` as a plain string (an
/// unrecognized value on an inbound URL is passed through untouched, the
/// backend decides what to do with it); only outbound URLs are typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Interpret a raw `order` parameter value.  Anything other than the
    /// two known directions yields `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Read path
// ---------------------------------------------------------------------------

/// Structured list-view state derived from a URL query string.
///
/// A `QueryState` is a pure function of the query string it was parsed
/// from: equal query strings always produce equal states, and the state
/// is never mutated in place -- every navigation re-derives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// 1-based page number; invalid or missing values fall back to 1.
    pub page: u32,
    /// Page size; invalid or missing values fall back to [`DEFAULT_LIMIT`].
    pub limit: u32,
    /// Free-text search, percent-decoded; missing means empty.
    pub search: String,
    /// Sort field name; missing means empty.
    pub sort: String,
    /// Sort direction as a raw string; missing means empty.
    pub order: String,
    /// Every non-reserved query parameter, percent-decoded.  A `BTreeMap`
    /// keeps iteration order deterministic so serializations of the same
    /// state are byte-identical.
    pub filters: BTreeMap<String, String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            sort: String::new(),
            order: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl QueryState {
    /// Derive the state from a raw query string (with or without the
    /// leading `?`).
    ///
    /// Reserved parameters take their first occurrence; repeated filter
    /// keys take the last.  Values are percent-decoded (`+` decodes to a
    /// space, matching `application/x-www-form-urlencoded`).
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut page: Option<u32> = None;
        let mut limit: Option<u32> = None;
        let mut search: Option<String> = None;
        let mut sort: Option<String> = None;
        let mut order: Option<String> = None;
        let mut filters = BTreeMap::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => {
                    if page.is_none() {
                        page = value.parse().ok().filter(|p| *p >= 1);
                    }
                }
                "limit" => {
                    if limit.is_none() {
                        limit = value.parse().ok().filter(|l| *l >= 1);
                    }
                }
                "search" => {
                    if search.is_none() {
                        search = Some(value.into_owned());
                    }
                }
                "sort" => {
                    if sort.is_none() {
                        sort = Some(value.into_owned());
                    }
                }
                "order" => {
                    if order.is_none() {
                        order = Some(value.into_owned());
                    }
                }
                _ => {
                    filters.insert(key.into_owned(), value.into_owned());
                }
            }
        }

        Self {
            page: page.unwrap_or(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
            search: search.unwrap_or_default(),
            sort: sort.unwrap_or_default(),
            order: order.unwrap_or_default(),
            filters,
        }
    }

    /// Serialize the fields relevant to a list request.
    ///
    /// The returned string doubles as the list cache key and as the
    /// query of `GET /tasks` -- two states serialize equal if and only if
    /// they request the same page of results.  Empty filter values are
    /// skipped here (they round-trip through URLs but carry no meaning
    /// for the backend); `limit` and `page` are always explicit.
    pub fn list_query_string(&self) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());

        if !self.search.is_empty() {
            params.append_pair("search", &self.search);
        }
        for (key, value) in &self.filters {
            if !value.is_empty() {
                params.append_pair(key, value);
            }
        }
        if !self.sort.is_empty() {
            params.append_pair("sort", &self.sort);
        }
        if !self.order.is_empty() {
            params.append_pair("order", &self.order);
        }
        params.append_pair("limit", &self.limit.to_string());
        params.append_pair("page", &self.page.to_string());

        params.finish()
    }
}

// ---------------------------------------------------------------------------
// Write path
// ---------------------------------------------------------------------------

/// A full query-state transition targeting `path`.
///
/// This is not a merge-patch: any field the caller does not supply is
/// dropped from the resulting URL entirely.  Callers preserving existing
/// state pass it through explicitly (or start from
/// [`PageChange::from_state`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageChange {
    pub path: String,
    pub page: u32,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    pub limit: Option<u32>,
    pub filters: BTreeMap<String, String>,
}

impl PageChange {
    /// Start a transition to `path` at the given page, with no other
    /// parameters.
    pub fn new(path: impl Into<String>, page: u32) -> Self {
        Self {
            path: path.into(),
            page,
            search: None,
            sort: None,
            order: None,
            limit: None,
            filters: BTreeMap::new(),
        }
    }

    /// Build a transition that carries every field of an existing state,
    /// changing only the page.  The usual way to page through results
    /// without losing search/filter/sort context.
    pub fn from_state(path: impl Into<String>, page: u32, state: &QueryState) -> Self {
        Self {
            path: path.into(),
            page,
            search: (!state.search.is_empty()).then(|| state.search.clone()),
            sort: (!state.sort.is_empty()).then(|| state.sort.clone()),
            order: SortOrder::from_param(&state.order),
            limit: Some(state.limit),
            filters: state.filters.clone(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set a filter parameter.  Accepts any scalar (`&str`, number,
    /// bool); the value is coerced to its string form.  An empty string
    /// is a real value and is written to the URL verbatim.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.insert(key.into(), value.to_string());
        self
    }

    /// Serialize the transition into a canonical query string.
    ///
    /// `page` is omitted when <= 1 so page-1 URLs stay canonical;
    /// `search`/`sort`/`order` appear only when present and non-empty;
    /// `limit` appears only when it differs from [`DEFAULT_LIMIT`].
    /// Filters are written verbatim, empty values included.
    pub fn query_string(&self) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());

        if self.page > 1 {
            params.append_pair("page", &self.page.to_string());
        }
        if let Some(search) = &self.search {
            if !search.is_empty() {
                params.append_pair("search", search);
            }
        }
        if let Some(sort) = &self.sort {
            if !sort.is_empty() {
                params.append_pair("sort", sort);
            }
        }
        if let Some(order) = self.order {
            params.append_pair("order", order.as_str());
        }
        if let Some(limit) = self.limit {
            if limit != DEFAULT_LIMIT {
                params.append_pair("limit", &limit.to_string());
            }
        }
        for (key, value) in &self.filters {
            params.append_pair(key, value);
        }

        params.finish()
    }

    /// The full navigation target: `path?query`, or bare `path` when the
    /// query string is empty.
    pub fn href(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, query)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
