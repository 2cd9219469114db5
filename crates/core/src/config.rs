//! Serializable rule sets.
//!
//! A [`FilterConfig`] bundles everything a formatter can be told, so rules
//! can live in a JSON file next to the content they trim.
//!
//! ```rust
//! use pare_core::{FilterConfig, HtmlFormatter, wrap_html};
//!
//! let config = FilterConfig::from_json(r#"{ "remove": ["table", ".navbox"], "flatten": ["a"] }"#).unwrap();
//! let mut formatter = HtmlFormatter::with_config(wrap_html(r#"<a href="/x">link</a><table></table>"#), &config);
//! formatter.filter_content().unwrap();
//! assert_eq!(formatter.get_text(None), "link");
//! ```

use serde::{Deserialize, Serialize};

use crate::{HtmlFormatter, Result};

/// Rules to register on an [`HtmlFormatter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Remove selectors, in registration order
    pub remove: Vec<String>,
    /// Exact tag names to unwrap
    pub flatten: Vec<String>,
    /// Unwrap every element in the body
    pub flatten_all: bool,
    /// Remove img, audio and video elements
    pub remove_media: bool,
    /// Remove comment nodes
    pub remove_comments: bool,
}

impl FilterConfig {
    /// Parses a rule set from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PareError::ConfigError`](crate::PareError::ConfigError) on
    /// malformed JSON or mistyped fields. Selectors are not validated here.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Merges `other` into this config, appending lists and OR-ing switches.
    pub fn merge(&mut self, other: FilterConfig) {
        self.remove.extend(other.remove);
        self.flatten.extend(other.flatten);
        self.flatten_all |= other.flatten_all;
        self.remove_media |= other.remove_media;
        self.remove_comments |= other.remove_comments;
    }

    /// Registers every rule on `formatter`.
    pub fn apply_to(&self, formatter: &mut HtmlFormatter) {
        formatter.remove(self.remove.as_slice());
        formatter.flatten(self.flatten.iter().cloned());
        if self.flatten_all {
            formatter.flatten_all_tags();
        }
        if self.remove_media {
            formatter.set_remove_media(true);
        }
        if self.remove_comments {
            formatter.set_remove_comments(true);
        }
    }
}

impl HtmlFormatter {
    /// Creates a formatter with every rule from `config` registered.
    pub fn with_config(html: impl Into<String>, config: &FilterConfig) -> Self {
        let mut formatter = HtmlFormatter::new(html);
        config.apply_to(&mut formatter);
        formatter
    }
}
