//! Depth-first element search.
//!
//! [§ 4.2.6 querySelector](https://dom.spec.whatwg.org/#dom-parentnode-queryselector)
//! "Returns the first element that is a descendant of node that matches selectors."
//!
//! [§ 4.2.6 querySelectorAll](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
//! "Returns all element descendants of node that match selectors."
//!
//! Both walk the subtree in tree order (pre-order, depth-first, children
//! left to right) and never consider the starting node itself.

use ladle_dom::{DomTree, NodeId};

use crate::query::Query;

/// Whether the node at `id` is an element that satisfies `query`.
#[must_use]
pub fn matches(tree: &DomTree, id: NodeId, query: &Query) -> bool {
    tree.as_element(id)
        .is_some_and(|element| query.matches(element))
}

/// The first descendant of `from`, in tree order, that matches `query`.
///
/// Stops at the first hit.
#[must_use]
pub fn find_first(tree: &DomTree, from: NodeId, query: &Query) -> Option<NodeId> {
    tree.descendants(from).find(|&id| matches(tree, id, query))
}

/// Every descendant of `from` that matches `query`, in tree order.
///
/// An empty result is not an error at this level.
#[must_use]
pub fn find_all(tree: &DomTree, from: NodeId, query: &Query) -> Vec<NodeId> {
    tree.descendants(from)
        .filter(|&id| matches(tree, id, query))
        .collect()
}
