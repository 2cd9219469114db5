//! The selector grammar understood by the filter.
//!
//! Only four shapes are supported:
//!
//! | Syntax      | Matches                                            |
//! |-------------|----------------------------------------------------|
//! | `tag`       | elements named `tag` (ASCII case-insensitive)      |
//! | `.class`    | elements whose class list contains `class` exactly |
//! | `#id`       | elements whose `id` equals `id`                    |
//! | `tag.class` | both of the above at once                          |
//!
//! Anything else is rejected with [`PareError::InvalidSelector`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use scraper::node::Element;

use crate::{PareError, Result};

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Tags removed by [`HtmlFormatter::set_remove_media`](crate::HtmlFormatter::set_remove_media).
pub const MEDIA_TAGS: &[&str] = &["img", "audio", "video"];

/// A parsed remove rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
    Id(String),
    TagClass { tag: String, class: String },
}

impl Selector {
    /// Parses a selector string.
    ///
    /// # Errors
    ///
    /// Returns [`PareError::InvalidSelector`] carrying the original string if
    /// it is not one of the supported shapes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pare_core::Selector;
    ///
    /// assert_eq!(Selector::parse("#bar").unwrap(), Selector::Id("bar".to_string()));
    /// assert!(Selector::parse("foo[bar]").is_err());
    /// ```
    pub fn parse(selector: &str) -> Result<Self> {
        let invalid = || PareError::InvalidSelector(selector.to_string());

        let parsed = if let Some(class) = selector.strip_prefix('.') {
            Selector::Class(class.to_string())
        } else if let Some(id) = selector.strip_prefix('#') {
            Selector::Id(id.to_string())
        } else if let Some((tag, class)) = selector.split_once('.') {
            Selector::TagClass { tag: tag.to_string(), class: class.to_string() }
        } else {
            Selector::Tag(selector.to_string())
        };

        if parsed.names().all(|name| NAME_RE.is_match(name)) { Ok(parsed) } else { Err(invalid()) }
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        let (first, second) = match self {
            Selector::Tag(name) | Selector::Class(name) | Selector::Id(name) => (name.as_str(), None),
            Selector::TagClass { tag, class } => (tag.as_str(), Some(class.as_str())),
        };
        std::iter::once(first).chain(second)
    }

    /// Checks whether `element` satisfies this rule.
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Tag(tag) => tag_matches(element, tag),
            Selector::Class(class) => has_class(element, class),
            Selector::Id(id) => element.attr("id") == Some(id.as_str()),
            Selector::TagClass { tag, class } => tag_matches(element, tag) && has_class(element, class),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => write!(f, "{}", tag),
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::Id(id) => write!(f, "#{}", id),
            Selector::TagClass { tag, class } => write!(f, "{}.{}", tag, class),
        }
    }
}

fn tag_matches(element: &Element, tag: &str) -> bool {
    element.name().eq_ignore_ascii_case(tag)
}

/// Whole-token comparison, so `.foo` never hits `foo-bar` or `nofoo`.
fn has_class(element: &Element, class: &str) -> bool {
    element
        .attr("class")
        .is_some_and(|value| value.split_ascii_whitespace().any(|token| token == class))
}
