pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod ranges;
pub mod selector;
pub mod serialize;

pub use config::FilterConfig;
#[doc(hidden)]
pub use document::LazyDocument;
pub use error::{PareError, Result};
#[doc(hidden)]
pub use filter::{FilterOutcome, FilterPass, Flatten};
pub use formatter::{HtmlFormatter, IntoSelectors, RemovedElement};
pub use ranges::{remove_after_including, remove_before_including, remove_between_including};
pub use selector::{MEDIA_TAGS, Selector};
pub use serialize::{serialize_children, serialize_node, wrap_html};
