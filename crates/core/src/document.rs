//! Deferred tree construction.
//!
//! A [`LazyDocument`] starts out holding the raw source. It moves to the
//! parsed state exactly once, the first time a caller actually needs the
//! tree, and never goes back.

use scraper::Html;

use crate::ranges::{remove_after_including, remove_before_including};
use crate::serialize::{find_body, serialize_children};

/// Source text or its parsed tree.
#[derive(Debug)]
pub enum LazyDocument {
    Unparsed(String),
    Parsed(Html),
}

impl LazyDocument {
    pub fn new(source: impl Into<String>) -> Self {
        LazyDocument::Unparsed(source.into())
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, LazyDocument::Parsed(_))
    }

    /// The tree, if it has been built.
    pub fn html(&self) -> Option<&Html> {
        match self {
            LazyDocument::Parsed(html) => Some(html),
            LazyDocument::Unparsed(_) => None,
        }
    }

    /// Builds the tree on first use and hands it out mutably.
    pub fn parsed_mut(&mut self) -> &mut Html {
        if let LazyDocument::Unparsed(source) = self {
            tracing::debug!(bytes = source.len(), "parsing document");
            *self = LazyDocument::Parsed(Html::parse_document(source));
        }

        match self {
            LazyDocument::Parsed(html) => html,
            LazyDocument::Unparsed(_) => unreachable!("document was parsed above"),
        }
    }

    /// Renders the body content.
    ///
    /// An unparsed document is returned as-is with any `wrap_html` shell
    /// peeled off, so untouched input round-trips byte for byte.
    pub fn body_text(&self) -> String {
        match self {
            LazyDocument::Unparsed(source) => {
                remove_after_including(remove_before_including(source, "<body>"), "</body>").to_string()
            }
            LazyDocument::Parsed(html) => find_body(html).map(serialize_children).unwrap_or_default(),
        }
    }
}
