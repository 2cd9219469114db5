//! Error types for pare operations.
//!
//! Almost every operation in this crate is total. The one recoverable
//! failure is a remove selector outside the supported grammar, which is
//! only reported once [`HtmlFormatter::filter_content`](crate::HtmlFormatter::filter_content)
//! runs.
//!
//! # Example
//!
//! ```rust
//! use pare_core::{HtmlFormatter, PareError};
//!
//! let mut formatter = HtmlFormatter::new("<p>hi</p>");
//! formatter.remove("foo[bar]");
//!
//! match formatter.filter_content() {
//!     Err(PareError::InvalidSelector(sel)) => assert_eq!(sel, "foo[bar]"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Main error type for pare operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PareError {
    /// A registered remove selector is not one of `tag`, `.class`, `#id`
    /// or `tag.class`.
    ///
    /// Registration never fails; this is raised by the filter pass. The
    /// formatter that produced it should be discarded.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// A rule set could not be deserialized.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for PareError {
    fn from(err: serde_json::Error) -> Self {
        PareError::ConfigError(err.to_string())
    }
}

/// Result type alias for PareError.
pub type Result<T> = std::result::Result<T, PareError>;
