//! The formatter: a rule registry bound to one document.
//!
//! # Example
//!
//! ```rust
//! use pare_core::{HtmlFormatter, wrap_html};
//!
//! let mut formatter = HtmlFormatter::new(wrap_html(
//!     r#"<p>Text<sup class="reference">[1]</sup></p><table><tr><td>nav</td></tr></table>"#,
//! ));
//! formatter.remove(["table", ".reference"]);
//!
//! let removed = formatter.filter_content().unwrap();
//! assert_eq!(formatter.get_text(None), "<p>Text</p>");
//! assert_eq!(removed.len(), 2);
//! assert_eq!(formatter.get_text(Some(removed[0])), r#"<sup class="reference">[1]</sup>"#);
//! ```

use ego_tree::NodeId;

use crate::document::LazyDocument;
use crate::filter::{self, FilterPass, Flatten};
use crate::selector::{MEDIA_TAGS, Selector};
use crate::serialize::serialize_node;
use crate::{PareError, Result};

/// Opaque handle to a subtree detached by [`HtmlFormatter::filter_content`].
///
/// The subtree stays alive inside the formatter that produced it; render it
/// with [`HtmlFormatter::get_text`]. A handle is only meaningful to that
/// formatter: it is an arena index, and passing it to another formatter
/// renders whatever node sits at that index there, or nothing if the index
/// is out of range. Handles carry no owner tag because formatters share no
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemovedElement(NodeId);

/// Removes, flattens and re-serializes parts of one HTML document.
///
/// Rules accumulate through [`remove`](Self::remove),
/// [`flatten`](Self::flatten) and the switches. Nothing is parsed until
/// [`filter_content`](Self::filter_content) runs with at least one rule
/// registered.
#[derive(Debug)]
pub struct HtmlFormatter {
    document: LazyDocument,
    items_to_remove: Vec<String>,
    flatten: Flatten,
    remove_media: bool,
    remove_comments: bool,
    removed: Vec<RemovedElement>,
}

impl HtmlFormatter {
    /// Creates a formatter over `html`, which may be a whole document or the
    /// output of [`wrap_html`](crate::wrap_html).
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            document: LazyDocument::new(html),
            items_to_remove: Vec::new(),
            flatten: Flatten::Nothing,
            remove_media: false,
            remove_comments: false,
            removed: Vec::new(),
        }
    }

    /// Registers one or more remove selectors.
    ///
    /// Selectors are not validated here; an unsupported one surfaces as
    /// [`PareError::InvalidSelector`] from [`filter_content`](Self::filter_content).
    ///
    /// ```rust
    /// use pare_core::HtmlFormatter;
    ///
    /// let mut formatter = HtmlFormatter::new("");
    /// formatter.remove("table");
    /// formatter.remove([".foo", "#bar", "div.baz"]);
    /// ```
    pub fn remove<I>(&mut self, selectors: I)
    where
        I: IntoSelectors,
    {
        self.items_to_remove.extend(selectors.into_selectors());
    }

    /// Unwraps every element with one of these exact tag names.
    pub fn flatten<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flatten.extend(tags);
    }

    /// Unwraps every element in the body, leaving only text.
    pub fn flatten_all_tags(&mut self) {
        self.flatten = Flatten::All;
    }

    /// Removes `img`, `audio` and `video` elements.
    pub fn set_remove_media(&mut self, flag: bool) {
        self.remove_media = flag;
    }

    pub fn set_remove_comments(&mut self, flag: bool) {
        self.remove_comments = flag;
    }

    /// Whether the document tree has been built.
    pub fn is_parsed(&self) -> bool {
        self.document.is_parsed()
    }

    fn has_rules(&self) -> bool {
        !self.items_to_remove.is_empty() || self.remove_media || self.remove_comments || self.flatten.is_active()
    }

    fn parse_items_to_remove(&self) -> Result<Vec<Selector>> {
        let mut selectors = self
            .items_to_remove
            .iter()
            .map(|item| Selector::parse(item))
            .collect::<Result<Vec<_>>>()?;

        if self.remove_media {
            selectors.extend(MEDIA_TAGS.iter().map(|tag| Selector::Tag(tag.to_string())));
        }

        Ok(selectors)
    }

    /// Applies every registered rule to the document.
    ///
    /// Returns the elements removed by this call, in document order.
    /// Flattened elements are not included. With no rules registered this
    /// returns immediately without parsing.
    ///
    /// # Errors
    ///
    /// Returns [`PareError::InvalidSelector`] for the first registered
    /// selector outside the supported grammar. The tree is not touched in
    /// that case, but the formatter should be discarded.
    pub fn filter_content(&mut self) -> Result<Vec<RemovedElement>> {
        if !self.has_rules() {
            tracing::debug!("no rules registered, skipping parse");
            return Ok(Vec::new());
        }

        let selectors = self.parse_items_to_remove().inspect_err(|err| {
            if let PareError::InvalidSelector(sel) = err {
                tracing::debug!(selector = %sel, "rejecting selector");
            }
        })?;

        let pass = FilterPass { remove: &selectors, remove_comments: self.remove_comments, flatten: &self.flatten };
        let outcome = filter::run(self.document.parsed_mut(), &pass);

        let removed: Vec<RemovedElement> = outcome.removed.into_iter().map(RemovedElement).collect();
        self.removed.extend(removed.iter().copied());
        Ok(removed)
    }

    /// Every element removed so far, across all filter calls.
    pub fn removed_elements(&self) -> &[RemovedElement] {
        &self.removed
    }

    /// Renders a removed element, or the document body when `element` is
    /// `None`.
    ///
    /// Before the first parse the source is returned with any
    /// [`wrap_html`](crate::wrap_html) shell peeled off and otherwise
    /// unchanged. A handle whose index is out of range for this formatter
    /// renders as an empty string.
    pub fn get_text(&self, element: Option<RemovedElement>) -> String {
        match element {
            None => self.document.body_text(),
            Some(RemovedElement(id)) => self
                .document
                .html()
                .and_then(|html| html.tree.get(id))
                .map(serialize_node)
                .unwrap_or_default(),
        }
    }

    /// Renders the live element whose `id` attribute equals `id`.
    ///
    /// Returns `None` if the document is unparsed or no attached element
    /// carries that id.
    pub fn get_text_by_id(&self, id: &str) -> Option<String> {
        let html = self.document.html()?;
        html.tree
            .root()
            .descendants()
            .find(|node| node.value().as_element().is_some_and(|el| el.attr("id") == Some(id)))
            .map(serialize_node)
    }
}

/// Anything [`HtmlFormatter::remove`] accepts: one selector or a list.
pub trait IntoSelectors {
    fn into_selectors(self) -> Vec<String>;
}

impl IntoSelectors for &str {
    fn into_selectors(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoSelectors for String {
    fn into_selectors(self) -> Vec<String> {
        vec![self]
    }
}

impl<S: Into<String>, const N: usize> IntoSelectors for [S; N] {
    fn into_selectors(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>> IntoSelectors for Vec<S> {
    fn into_selectors(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String> + Clone> IntoSelectors for &[S] {
    fn into_selectors(self) -> Vec<String> {
        self.iter().cloned().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap_html;

    #[test]
    fn test_empty_registry_never_parses() {
        let mut formatter = HtmlFormatter::new("foo");
        assert!(formatter.filter_content().unwrap().is_empty());
        assert!(!formatter.is_parsed());
        assert_eq!(formatter.get_text(None), "foo");
    }

    #[test]
    fn test_empty_flatten_list_is_not_a_rule() {
        let mut formatter = HtmlFormatter::new("foo");
        formatter.flatten(Vec::<String>::new());
        formatter.filter_content().unwrap();
        assert!(!formatter.is_parsed());
    }

    #[test]
    fn test_invalid_selector_is_deferred() {
        let mut formatter = HtmlFormatter::new("");
        formatter.remove("foo[bar]");
        assert!(!formatter.is_parsed());
        assert_eq!(
            formatter.filter_content(),
            Err(PareError::InvalidSelector("foo[bar]".to_string()))
        );
    }

    #[test]
    fn test_invalid_selector_reported_even_after_valid_ones() {
        let mut formatter = HtmlFormatter::new("<p>x</p>");
        formatter.remove(["p", "div > p"]);
        assert!(matches!(formatter.filter_content(), Err(PareError::InvalidSelector(s)) if s == "div > p"));
    }

    #[test]
    fn test_remove_media() {
        let mut formatter = HtmlFormatter::new(wrap_html(
            r#"<img src="/foo/bar.jpg" alt="Blah"/><audio src="a.ogg"></audio><p>keep</p>"#,
        ));
        formatter.set_remove_media(true);
        let removed = formatter.filter_content().unwrap();
        assert_eq!(formatter.get_text(None), "<p>keep</p>");
        assert_eq!(formatter.get_text(Some(removed[0])), r#"<img src="/foo/bar.jpg" alt="Blah">"#);
        assert_eq!(formatter.get_text(Some(removed[1])), r#"<audio src="a.ogg"></audio>"#);
    }

    #[test]
    fn test_remove_media_can_be_switched_off() {
        let mut formatter = HtmlFormatter::new(wrap_html("<img src=x>"));
        formatter.set_remove_media(true);
        formatter.set_remove_media(false);
        assert!(formatter.filter_content().unwrap().is_empty());
        assert!(!formatter.is_parsed());
    }

    #[test]
    fn test_successive_passes_return_only_new_removals() {
        let mut formatter = HtmlFormatter::new(wrap_html("<h2>a</h2><p>b</p><table><tr><td>c</td></tr></table>"));
        formatter.remove("h2");
        assert_eq!(formatter.filter_content().unwrap().len(), 1);
        formatter.remove(["table"]);
        let second = formatter.filter_content().unwrap();
        assert_eq!(second.len(), 1);
        assert!(formatter.get_text(Some(second[0])).starts_with("<table>"));
        assert_eq!(formatter.removed_elements().len(), 2);
        assert_eq!(formatter.get_text(None), "<p>b</p>");
    }

    #[test]
    fn test_get_text_by_id() {
        let mut formatter = HtmlFormatter::new(wrap_html(r#"<p id="keep">x</p><p id="gone">y</p>"#));
        assert_eq!(formatter.get_text_by_id("keep"), None);
        formatter.remove("#gone");
        formatter.filter_content().unwrap();
        assert_eq!(formatter.get_text_by_id("keep").as_deref(), Some(r#"<p id="keep">x</p>"#));
        assert_eq!(formatter.get_text_by_id("gone"), None);
    }

    #[test]
    fn test_foreign_handle_renders_empty() {
        let mut big = HtmlFormatter::new(wrap_html("<div><div><div><b>x</b></div></div></div>"));
        big.remove("b");
        let handle = big.filter_content().unwrap()[0];

        let small = HtmlFormatter::new("x");
        assert_eq!(small.get_text(Some(handle)), "");
    }

    #[test]
    fn test_handle_is_an_index_into_its_own_formatter() {
        let mut first = HtmlFormatter::new(wrap_html("<p>one</p><b>first</b>"));
        first.remove("b");
        let handle = first.filter_content().unwrap()[0];

        let mut second = HtmlFormatter::new(wrap_html("<p>two</p><i>second</i>"));
        second.set_remove_comments(true);
        second.filter_content().unwrap();

        assert_eq!(first.get_text(Some(handle)), "<b>first</b>");
        assert_eq!(second.get_text(Some(handle)), "<i>second</i>");
    }
}
