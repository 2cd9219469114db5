//! The single-pass tree walk that removes, unwraps and strips comments.
//!
//! The walk is driven by an explicit stack of arena ids, so the tree can be
//! rewired underneath it: a removed element is detached and never visited,
//! and a flattened element's children are spliced into its place and then
//! visited as if they had always been there.

use ego_tree::NodeId;
use scraper::{Html, Node};

use crate::selector::Selector;

/// Elements that hold the document together and are never unwrapped.
const STRUCTURAL_TAGS: &[&str] = &["html", "head", "body"];

/// Which tags get replaced by their children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Flatten {
    #[default]
    Nothing,
    Tags(Vec<String>),
    All,
}

impl Flatten {
    pub fn is_active(&self) -> bool {
        match self {
            Flatten::Nothing => false,
            Flatten::Tags(tags) => !tags.is_empty(),
            Flatten::All => true,
        }
    }

    /// Whole-name comparison: flattening `s` leaves `span` and `sup` alone.
    fn applies_to(&self, tag: &str) -> bool {
        if STRUCTURAL_TAGS.contains(&tag) {
            return false;
        }
        match self {
            Flatten::Nothing => false,
            Flatten::Tags(tags) => tags.iter().any(|t| t == tag),
            Flatten::All => true,
        }
    }

    /// Adds targets, lowercased to match the parser's tag names.
    pub(crate) fn extend<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter().map(|tag| tag.into().to_ascii_lowercase());
        match self {
            Flatten::All => {}
            Flatten::Tags(existing) => existing.extend(tags),
            Flatten::Nothing => *self = Flatten::Tags(tags.collect()),
        }
    }
}

/// Registered rules after selector validation.
#[derive(Debug)]
pub struct FilterPass<'a> {
    pub remove: &'a [Selector],
    pub remove_comments: bool,
    pub flatten: &'a Flatten,
}

impl FilterPass<'_> {
    /// Total flattening reduces content to text, comments included.
    fn drops_comments(&self) -> bool {
        self.remove_comments || *self.flatten == Flatten::All
    }
}

/// What a pass did to the tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Roots of detached subtrees, in document order.
    pub removed: Vec<NodeId>,
    pub flattened: usize,
    pub comments_removed: usize,
}

enum Step {
    Skip,
    DropComment,
    Remove,
    Flatten,
    Descend { in_body: bool },
}

/// Walks `html` once in document order, applying `pass`.
pub fn run(html: &mut Html, pass: &FilterPass<'_>) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    let mut stack: Vec<(NodeId, bool)> = Vec::new();
    push_children(html, html.tree.root().id(), false, &mut stack);

    while let Some((id, in_body)) = stack.pop() {
        let step = match html.tree.get(id).map(|node| node.value()) {
            Some(Node::Comment(_)) if pass.drops_comments() => Step::DropComment,
            Some(Node::Element(el)) => {
                if pass.remove.iter().any(|sel| sel.matches(el)) {
                    Step::Remove
                } else if in_body && pass.flatten.applies_to(el.name()) {
                    Step::Flatten
                } else {
                    Step::Descend { in_body: in_body || el.name() == "body" }
                }
            }
            _ => Step::Skip,
        };

        match step {
            Step::Skip => {}
            Step::DropComment => {
                detach(html, id);
                outcome.comments_removed += 1;
            }
            Step::Remove => {
                tracing::trace!(?id, "removing element");
                detach(html, id);
                outcome.removed.push(id);
            }
            Step::Flatten => {
                let children = child_ids(html, id);
                if let Some(mut target) = html.tree.get_mut(id) {
                    for &child in &children {
                        target.insert_id_before(child);
                    }
                    target.detach();
                }
                outcome.flattened += 1;
                stack.extend(children.into_iter().rev().map(|child| (child, true)));
            }
            Step::Descend { in_body } => push_children(html, id, in_body, &mut stack),
        }
    }

    tracing::debug!(
        removed = outcome.removed.len(),
        flattened = outcome.flattened,
        comments = outcome.comments_removed,
        "filter pass complete"
    );
    outcome
}

fn child_ids(html: &Html, id: NodeId) -> Vec<NodeId> {
    html.tree
        .get(id)
        .map(|node| node.children().map(|child| child.id()).collect())
        .unwrap_or_default()
}

/// Pushes children reversed so they pop in document order.
fn push_children(html: &Html, id: NodeId, in_body: bool, stack: &mut Vec<(NodeId, bool)>) {
    stack.extend(child_ids(html, id).into_iter().rev().map(|child| (child, in_body)));
}

fn detach(html: &mut Html, id: NodeId) {
    if let Some(mut node) = html.tree.get_mut(id) {
        node.detach();
    }
}
