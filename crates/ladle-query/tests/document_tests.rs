//! Integration tests for building documents and locating the root element.

use ladle_dom::{DoctypeData, DomTree, ElementData, NodeId, NodeKind, NodeType};
use ladle_query::{Document, DocumentOptions, ErrorPolicy, QueryError};

/// A tree whose document node has exactly `children`.
fn tree_with(children: Vec<NodeType>) -> DomTree {
    let mut tree = DomTree::new();
    for child in children {
        let id = tree.alloc(child);
        tree.append_child(NodeId::ROOT, id);
    }
    tree
}

fn element(tag: &str) -> NodeType {
    NodeType::Element(ElementData::new(tag, Vec::new()))
}

// ========== root element ==========

#[test]
fn test_parsed_root_is_html() {
    let doc = Document::parse("<!DOCTYPE html><!-- c --><p>x</p>").unwrap();
    let root = doc.root();
    assert_eq!(root.label(), "html");
    assert!(root.is_element());
    assert_eq!(Some(root.id()), doc.tree().document_element());
}

#[test]
fn test_empty_markup_still_has_a_root() {
    let doc = Document::parse("").unwrap();
    assert_eq!(doc.root().label(), "html");
    assert_eq!(doc.root().find("body").unwrap().label(), "body");
}

#[test]
fn test_root_skips_doctype_and_comments() {
    let tree = tree_with(vec![
        NodeType::Doctype(DoctypeData {
            name: "html".to_string(),
            ..DoctypeData::default()
        }),
        NodeType::Comment("one".to_string()),
        NodeType::Comment("two".to_string()),
        element("svg"),
    ]);
    let doc = Document::from_tree(tree, DocumentOptions::default()).unwrap();
    assert_eq!(doc.root().label(), "svg");
    assert_eq!(doc.root().id(), NodeId(4));
}

#[test]
fn test_text_before_root_is_a_parse_error() {
    let tree = tree_with(vec![
        NodeType::Comment("c".to_string()),
        NodeType::Text("stray".to_string()),
        element("html"),
    ]);
    let error = Document::from_tree(tree, DocumentOptions::default()).unwrap_err();
    assert!(matches!(error, QueryError::Parse(_)));
    assert_eq!(error.operation(), "parse");
}

#[test]
fn test_tree_without_elements_is_a_parse_error() {
    let empty = Document::from_tree(DomTree::new(), DocumentOptions::default());
    assert!(matches!(empty, Err(QueryError::Parse(_))));

    let doctype_only = tree_with(vec![NodeType::Doctype(DoctypeData::default())]);
    let result = Document::from_tree(doctype_only, DocumentOptions::default());
    assert!(matches!(result, Err(QueryError::Parse(_))));
}

#[test]
fn test_handle_for_unknown_node_is_none() {
    let doc = Document::parse("<p>x</p>").unwrap();
    assert!(doc.handle(NodeId(10_000)).is_none());

    let document = doc.handle(NodeId::ROOT).unwrap();
    assert_eq!(document.kind(), NodeKind::Document);
    assert_eq!(document.label(), "");
}

// ========== options ==========

#[test]
fn test_options_are_kept() {
    let options = DocumentOptions::default().with_policy(ErrorPolicy::Log);
    let doc = Document::parse_with("<p>x</p>", options).unwrap();
    assert_eq!(doc.options(), options);
    assert_eq!(doc.policy(), ErrorPolicy::Log);
    assert_eq!(doc.root().find("p").unwrap().policy(), ErrorPolicy::Log);
}

#[test]
fn test_lenient_parse_records_issues() {
    let doc = Document::parse("<div></span>x</div>").unwrap();
    assert!(doc.issues().iter().any(|issue| issue.is_error));
    assert_eq!(doc.root().find("div").unwrap().text().unwrap(), "x");
}

#[test]
fn test_strict_parse_rejects_parse_errors() {
    let options = DocumentOptions::default().strict();
    let error = Document::parse_with("<div></span>x</div>", options).unwrap_err();
    assert!(matches!(error, QueryError::Parse(_)));

    let error = Document::parse_with(r#"<p class="a" class="b">"#, options).unwrap_err();
    assert!(error.to_string().contains("duplicate-attribute"));
}

#[test]
fn test_strict_parse_accepts_clean_markup() {
    let html = "<!DOCTYPE html><html><head><title>t</title></head><body><p>x</p></body></html>";
    let doc = Document::parse_with(html, DocumentOptions::default().strict()).unwrap();
    assert!(doc.issues().is_empty());
    assert_eq!(doc.root().find("title").unwrap().text().unwrap(), "t");
}

#[test]
fn test_from_tree_has_no_issues() {
    let doc = Document::from_tree(tree_with(vec![element("html")]), DocumentOptions::default())
        .unwrap();
    assert!(doc.issues().is_empty());
}

// ========== fetch ==========

#[test]
fn test_fetch_of_invalid_url_is_a_fetch_error() {
    let error = Document::fetch("not a url", DocumentOptions::default()).unwrap_err();
    assert!(matches!(error, QueryError::Fetch(_)));
    assert_eq!(error.operation(), "fetch");
}

#[test]
fn test_parsing_starts_a_fresh_warning_set() {
    ladle_common::warning::warn_once("Document test", "left over from an earlier document");
    let _doc = Document::parse("<p>x</p>").unwrap();
    assert!(!ladle_common::warning::was_warned(
        "Document test",
        "left over from an earlier document"
    ));
}
