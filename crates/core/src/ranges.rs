//! String-range surgery that works on raw markup without building a tree.
//!
//! These helpers are used to peel the document shell off serialized output
//! and are handy for trimming source text before it is handed to a
//! [`HtmlFormatter`](crate::HtmlFormatter).

/// Remove everything up to and including the last occurrence of `needle`.
///
/// Returns `haystack` unchanged when `needle` does not occur.
///
/// ```rust
/// use pare_core::remove_before_including;
///
/// assert_eq!(remove_before_including("example text text content", "text"), " content");
/// assert_eq!(remove_before_including("example", "no match"), "example");
/// ```
pub fn remove_before_including<'a>(haystack: &'a str, needle: &str) -> &'a str {
    if needle.is_empty() {
        return haystack;
    }
    match haystack.rfind(needle) {
        Some(pos) => &haystack[pos + needle.len()..],
        None => haystack,
    }
}

/// Remove everything from the first occurrence of `needle` onwards.
///
/// Returns `haystack` unchanged when `needle` does not occur.
///
/// ```rust
/// use pare_core::remove_after_including;
///
/// assert_eq!(remove_after_including("example text text content", "text"), "example ");
/// ```
pub fn remove_after_including<'a>(haystack: &'a str, needle: &str) -> &'a str {
    if needle.is_empty() {
        return haystack;
    }
    match haystack.find(needle) {
        Some(pos) => &haystack[..pos],
        None => haystack,
    }
}

/// Remove every `open`..`close` span, delimiters included.
///
/// Spans do not nest: a span runs from the first remaining `open` to the
/// first `close` after it, so an inner `open` is swallowed by the outer span
/// and a stray `close` with no `open` before it survives.
///
/// ```rust
/// use pare_core::remove_between_including;
///
/// assert_eq!(remove_between_including("example [ascii [text] content", "[", "]"), "example  content");
/// assert_eq!(remove_between_including("example [ascii] text] content", "[", "]"), "example  text] content");
/// ```
pub fn remove_between_including(haystack: &str, open: &str, close: &str) -> String {
    if open.is_empty() || close.is_empty() {
        return haystack.to_string();
    }

    let mut result = haystack.to_string();
    while let Some(start) = result.find(open) {
        let after_open = start + open.len();
        let Some(offset) = result[after_open..].find(close) else {
            break;
        };
        let end = after_open + offset + close.len();
        result.replace_range(start..end, "");
    }

    result
}
