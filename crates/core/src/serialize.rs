//! HTML output with canonical escaping.
//!
//! The parser decodes every character reference (`&amp;`, `&#38;`, `&#x26;`
//! and friends) into the literal character, so the tree only ever holds raw
//! text. Serialization escapes that text exactly once. Non-ASCII characters
//! are written through untouched rather than as numeric references.

use ego_tree::NodeRef;
use scraper::{Html, Node};

const DOCUMENT_SHELL_HEAD: &str = "<!DOCTYPE HTML><html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\"></head><body>";
const DOCUMENT_SHELL_TAIL: &str = "</body></html>";

/// Wraps a fragment in a minimal document that declares UTF-8.
///
/// ```rust
/// use pare_core::wrap_html;
///
/// let doc = wrap_html("<p>Тест</p>");
/// assert!(doc.contains("charset=utf-8"));
/// assert!(doc.contains("<body><p>Тест</p></body>"));
/// ```
pub fn wrap_html(fragment: &str) -> String {
    let mut out = String::with_capacity(DOCUMENT_SHELL_HEAD.len() + fragment.len() + DOCUMENT_SHELL_TAIL.len());
    out.push_str(DOCUMENT_SHELL_HEAD);
    out.push_str(fragment);
    out.push_str(DOCUMENT_SHELL_TAIL);
    out
}

/// Finds the `<body>` element still attached to the document.
pub fn find_body(html: &Html) -> Option<NodeRef<'_, Node>> {
    html.tree
        .root()
        .descendants()
        .find(|node| node.value().as_element().is_some_and(|el| el.name() == "body"))
}

/// Serializes a node: outer HTML for elements, escaped text for text nodes.
pub fn serialize_node(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serializes the children of a node, without the node itself.
pub fn serialize_children(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    for child in node.children() {
        write_node(child, &mut out);
    }
    out
}

fn write_node(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => {
            if parent_is_raw_text(node) {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        Node::Element(el) => {
            let name = el.name();
            out.push('<');
            out.push_str(name);
            for (key, value) in el.attrs.iter() {
                out.push(' ');
                if let Some(prefix) = &key.prefix {
                    out.push_str(prefix);
                    out.push(':');
                }
                out.push_str(&key.local);
                out.push_str("=\"");
                escape_attr(value, out);
                out.push('"');
            }
            out.push('>');

            if is_void_element(name) {
                return;
            }

            for child in node.children() {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Doctype(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype.name());
            out.push('>');
        }
        Node::ProcessingInstruction(pi) => {
            out.push_str("<?");
            out.push_str(&pi.target);
            out.push(' ');
            out.push_str(&pi.data);
            out.push('>');
        }
        Node::Document | Node::Fragment => {
            for child in node.children() {
                write_node(child, out);
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

fn parent_is_raw_text(node: NodeRef<'_, Node>) -> bool {
    node.parent()
        .and_then(|parent| parent.value().as_element().map(|el| is_raw_text_element(el.name())))
        .unwrap_or(false)
}

fn is_raw_text_element(tag: &str) -> bool {
    matches!(
        tag,
        "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext" | "noscript"
    )
}

/// Check if tag is void element
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
