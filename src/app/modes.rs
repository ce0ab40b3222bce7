//! Search variant and phase types for the location search.
//!
//! A location search moves through two phases per invocation:
//!
//! ```text
//! Idle ──trigger──▶ Acquiring ──position──▶ Idle (navigate)
//!                       └─────error───────▶ Idle (alert)
//! ```
//!
//! Invocations are independent of each other: a second click while the first
//! is still acquiring starts its own invocation.
//!
//! # Example
//!
//! ```rust
//! use place_actions::app::modes::{SearchKind, SearchRequest};
//!
//! let request = SearchRequest::next_page(SearchKind::parse("text"), "CmRa");
//! assert_eq!(request.kind, SearchKind::Text);
//! assert_eq!(request.cursor.as_deref(), Some("CmRa"));
//! ```

use std::fmt;

/// Which destination query a location search composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    /// `/places/nearby`, filtered by radius and place type.
    #[default]
    Nearby,

    /// `/places/search`, filtered by radius and a free-text query.
    Text,
}

impl SearchKind {
    /// Parses a `data-searchkind` value. Anything but `text` means nearby.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("text") {
            Self::Text
        } else {
            Self::Nearby
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nearby => "nearby",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase of the location search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No position request outstanding.
    #[default]
    Idle,

    /// At least one position request has been issued and not yet answered.
    Acquiring,
}

/// One location search invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub kind: SearchKind,

    /// Pagination cursor appended as `page_cursor`, `None` for the first page.
    pub cursor: Option<String>,
}

impl SearchRequest {
    /// First page of a search.
    #[must_use]
    pub const fn first_page(kind: SearchKind) -> Self {
        Self { kind, cursor: None }
    }

    /// Page identified by `cursor`. An empty cursor means the first page.
    #[must_use]
    pub fn next_page(kind: SearchKind, cursor: &str) -> Self {
        Self {
            kind,
            cursor: Some(cursor.to_string()).filter(|cursor| !cursor.is_empty()),
        }
    }
}
