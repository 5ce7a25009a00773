//! Tests for tree construction links and read-only traversal.

use ladle_dom::{Attribute, DomTree, ElementData, NodeId, NodeKind, NodeType};
use quickcheck_macros::quickcheck;

/// Helper to create an element node and return its `NodeId`.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag, Vec::new())))
}

// ========== append_child ==========

#[test]
fn test_append_child_links_siblings() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.last_child(parent), Some(c));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.next_sibling(c), None);
    assert_eq!(tree.parent(b), Some(parent));
    assert_eq!(tree.parent(NodeId::ROOT), None);
}

#[test]
fn test_unattached_node_has_no_links() {
    let mut tree = DomTree::new();
    let lone = alloc_element(&mut tree, "span");

    assert_eq!(tree.parent(lone), None);
    assert_eq!(tree.first_child(lone), None);
    assert_eq!(tree.next_sibling(lone), None);
    assert!(tree.children(lone).is_empty());
}

#[test]
fn test_lookup_of_unknown_id_is_none() {
    let tree = DomTree::new();
    let bogus = NodeId(42);

    assert!(tree.get(bogus).is_none());
    assert_eq!(tree.parent(bogus), None);
    assert_eq!(tree.kind(bogus), None);
    assert_eq!(tree.label(bogus), "");
}

#[test]
fn test_index_by_node_id() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);

    assert!(matches!(tree[NodeId::ROOT].node_type, NodeType::Document));
    assert_eq!(tree[div].parent, Some(NodeId::ROOT));
}

#[test]
#[should_panic]
fn test_index_out_of_tree_panics() {
    let tree = DomTree::new();
    let _ = &tree[NodeId(7)];
}

// ========== labels and kinds ==========

#[test]
fn test_labels_per_node_type() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::Doctype(ladle_dom::DoctypeData {
        name: "html".to_string(),
        ..Default::default()
    }));
    let html = alloc_element(&mut tree, "html");
    let text = tree.alloc(NodeType::Text("hello".to_string()));
    let comment = tree.alloc(NodeType::Comment(" note ".to_string()));
    tree.append_child(NodeId::ROOT, doctype);
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, text);
    tree.append_child(html, comment);

    assert_eq!(tree.label(NodeId::ROOT), "");
    assert_eq!(tree.label(doctype), "html");
    assert_eq!(tree.label(html), "html");
    assert_eq!(tree.label(text), "hello");
    assert_eq!(tree.label(comment), " note ");
    assert_eq!(tree.as_text(text), Some("hello"));
    assert!(tree.as_element(text).is_none());
}

#[test]
fn test_kind_display() {
    assert_eq!(NodeKind::Element.to_string(), "element");
    assert_eq!(NodeKind::Doctype.to_string(), "doctype");
    assert_eq!(NodeKind::Text.to_string(), "text");
}

#[test]
fn test_document_element_skips_doctype() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::Doctype(ladle_dom::DoctypeData::default()));
    let comment = tree.alloc(NodeType::Comment(String::new()));
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, doctype);
    tree.append_child(NodeId::ROOT, comment);
    tree.append_child(NodeId::ROOT, html);

    assert_eq!(tree.document_element(), Some(html));
}

// ========== attributes ==========

#[test]
fn test_get_attribute_returns_first_occurrence() {
    let data = ElementData::new(
        "p",
        vec![
            Attribute::new("k", "1"),
            Attribute::new("id", "intro"),
            Attribute::new("k", "2"),
        ],
    );

    assert_eq!(data.get_attribute("k"), Some("1"));
    assert_eq!(data.get_attribute("id"), Some("intro"));
    assert_eq!(data.get_attribute("missing"), None);
}

#[test]
fn test_has_attribute_value_checks_every_duplicate() {
    let data = ElementData::new(
        "p",
        vec![Attribute::new("class", "a"), Attribute::new("class", "b")],
    );

    assert!(data.has_attribute_value("class", "a"));
    assert!(data.has_attribute_value("class", "b"));
    assert!(!data.has_attribute_value("class", "c"));
}

// ========== iterators ==========

#[test]
fn test_descendants_are_pre_order() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let head = alloc_element(&mut tree, "head");
    let title = alloc_element(&mut tree, "title");
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);
    tree.append_child(head, title);
    tree.append_child(html, body);
    tree.append_child(body, p);

    let order: Vec<NodeId> = tree.descendants(html).collect();
    assert_eq!(order, vec![head, title, body, p]);
}

#[test]
fn test_ancestors_walk_to_document() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);

    let chain: Vec<NodeId> = tree.ancestors(body).collect();
    assert_eq!(chain, vec![html, NodeId::ROOT]);
}

#[test]
fn test_sibling_iterators_walk_outward() {
    let mut tree = DomTree::new();
    let ul = alloc_element(&mut tree, "ul");
    tree.append_child(NodeId::ROOT, ul);
    let items: Vec<NodeId> = (0..4)
        .map(|_| {
            let li = alloc_element(&mut tree, "li");
            tree.append_child(ul, li);
            li
        })
        .collect();

    let after: Vec<NodeId> = tree.following_siblings(items[1]).collect();
    assert_eq!(after, vec![items[2], items[3]]);

    let before: Vec<NodeId> = tree.preceding_siblings(items[2]).collect();
    assert_eq!(before, vec![items[1], items[0]]);

    assert_eq!(tree.following_siblings(items[3]).next(), None);
}

/// Build a tree where node `i + 1` is appended under one of the nodes
/// created before it, as chosen by `parents[i]`.
fn random_tree(parents: &[u8]) -> DomTree {
    let mut tree = DomTree::new();
    for (i, choice) in parents.iter().enumerate() {
        let child = alloc_element(&mut tree, "x");
        let parent = NodeId(usize::from(*choice) % (i + 1));
        tree.append_child(parent, child);
    }
    tree
}

#[quickcheck]
fn prop_descendants_of_root_visit_every_node_once(parents: Vec<u8>) -> bool {
    let tree = random_tree(&parents);
    let mut seen: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    seen.sort();
    seen.dedup();
    seen.len() == tree.len() - 1
}

#[quickcheck]
fn prop_descendants_follow_their_ancestors(parents: Vec<u8>) -> bool {
    let tree = random_tree(&parents);
    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    order.iter().enumerate().all(|(pos, &id)| {
        tree.ancestors(id)
            .filter(|&a| a != NodeId::ROOT)
            .all(|a| order.iter().position(|&o| o == a).is_some_and(|p| p < pos))
    })
}
