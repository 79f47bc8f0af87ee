//! Location adapter: the one place that reads and writes the "current
//! URL" of a list view.
//!
//! Hosts (a UI shell, a demo binary, a test) own a [`UrlState`] and
//! drive every query-state transition through [`UrlState::navigate`].
//! The state field is re-derived from the location on each navigation,
//! so the two can never drift apart -- the URL stays the single source
//! of truth.

use crate::query_state::{PageChange, QueryState};

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A path plus query string, the client-side slice of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path component, e.g. `/tasks`.
    pub path: String,
    /// Query string without the leading `?`; empty when absent.
    pub query: String,
}

impl Location {
    /// Split an href into path and query at the first `?`.
    pub fn from_href(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query: query.to_string(),
            },
            None => Self {
                path: href.to_string(),
                query: String::new(),
            },
        }
    }

    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

// ---------------------------------------------------------------------------
// UrlState
// ---------------------------------------------------------------------------

/// Current location and the [`QueryState`] derived from it.
///
/// The derived state is read-only from the outside; the only way to
/// change it is to navigate, which replaces the location and re-derives.
#[derive(Debug, Clone)]
pub struct UrlState {
    location: Location,
    state: QueryState,
}

impl UrlState {
    pub fn new(location: Location) -> Self {
        let state = QueryState::parse(&location.query);
        Self { location, state }
    }

    pub fn from_href(href: &str) -> Self {
        Self::new(Location::from_href(href))
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn href(&self) -> String {
        self.location.href()
    }

    /// Apply a transition: replace the location with the change's target
    /// and re-derive the query state from the new query string.
    pub fn navigate(&mut self, change: &PageChange) {
        self.location = Location::from_href(&change.href());
        self.state = QueryState::parse(&self.location.query);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
