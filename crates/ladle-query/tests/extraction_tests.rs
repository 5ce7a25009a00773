//! Integration tests for attribute and text extraction.

use ladle_dom::{DomTree, ElementData, NodeId, NodeKind, NodeType};
use ladle_query::{AttributesMap, Document, DocumentOptions, QueryError};

fn parse(html: &str) -> Document {
    Document::parse(html).unwrap()
}

/// A document with a single `<div>` whose children are exactly `children`.
fn div_with(children: Vec<NodeType>) -> Document {
    let mut tree = DomTree::new();
    let div = tree.alloc(NodeType::Element(ElementData::new("div", Vec::new())));
    tree.append_child(NodeId::ROOT, div);
    for child in children {
        let id = tree.alloc(child);
        tree.append_child(div, id);
    }
    Document::from_tree(tree, DocumentOptions::default()).unwrap()
}

// ========== attrs ==========

#[test]
fn test_attrs_in_document_order() {
    let doc = parse(r#"<a href="/" id="home" class="nav">Home</a>"#);
    let attrs = doc.root().find("a").unwrap().attrs().unwrap();
    let keys: Vec<&str> = attrs.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["href", "id", "class"]);
    assert_eq!(attrs["class"], "nav");
}

#[test]
fn test_attrs_first_occurrence_wins() {
    let doc = parse(r#"<p k="1" k="2">x</p>"#);
    let attrs = doc.root().find("p").unwrap().attrs().unwrap();

    let mut expected = AttributesMap::new();
    let _ = expected.insert("k".to_string(), "1".to_string());
    assert_eq!(attrs, expected);
}

#[test]
fn test_attrs_of_bare_element_is_empty() {
    let doc = parse("<p>x</p>");
    let attrs = doc.root().find("p").unwrap().attrs().unwrap();
    assert!(attrs.is_empty());
}

#[test]
fn test_attrs_of_text_is_wrong_node_type() {
    let doc = parse("<p>x</p>");
    let text = doc.root().find("p").unwrap().first_child().unwrap();
    let error = text.attrs().unwrap_err();
    assert!(matches!(
        error,
        QueryError::WrongNodeType {
            operation: "attrs",
            expected: NodeKind::Element,
            found: NodeKind::Text,
        }
    ));
    assert_eq!(
        error.to_string(),
        "attrs needs an element node, found a text node"
    );
}

#[test]
fn test_single_attribute_lookup() {
    let doc = parse(r#"<img src="a.png" src="b.png" alt="">"#);
    let img = doc.root().find("img").unwrap();
    assert_eq!(img.attr("src").unwrap(), "a.png");
    assert_eq!(img.attr("alt").unwrap(), "");

    let error = img.attr("title").unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "attribute `title` not found");

    let document = doc.root().parent().unwrap();
    assert!(matches!(
        document.attr("src").unwrap_err(),
        QueryError::WrongNodeType {
            found: NodeKind::Document,
            ..
        }
    ));
}

// ========== text ==========

#[test]
fn test_text_skips_whitespace_only_text() {
    let doc = div_with(vec![
        NodeType::Text("   ".to_string()),
        NodeType::Text("hello".to_string()),
    ]);
    assert_eq!(doc.root().text().unwrap(), "hello");
}

#[test]
fn test_text_fails_when_only_comments_and_whitespace() {
    let doc = div_with(vec![
        NodeType::Comment("note".to_string()),
        NodeType::Text("  \n ".to_string()),
    ]);
    let error = doc.root().text().unwrap_err();
    assert!(matches!(error, QueryError::NotFound { operation: "text", .. }));
    assert_eq!(error.to_string(), "text node not found");
}

#[test]
fn test_text_if_any_agrees_with_text() {
    let blank = div_with(vec![NodeType::Text("  \n ".to_string())]);
    assert_eq!(blank.root().text_if_any(), None);

    let filled = div_with(vec![
        NodeType::Text(" ".to_string()),
        NodeType::Text("hello".to_string()),
    ]);
    assert_eq!(filled.root().text_if_any(), Some("hello"));
    assert_eq!(filled.root().text().unwrap(), "hello");
}

#[test]
fn test_text_of_childless_element_fails() {
    let doc = div_with(Vec::new());
    assert!(doc.root().text().unwrap_err().is_not_found());
}

#[test]
fn test_text_is_verbatim() {
    let doc = parse("<p> hi there </p>");
    assert_eq!(doc.root().find("p").unwrap().text().unwrap(), " hi there ");
}

#[test]
fn test_text_returns_only_the_first_run() {
    let doc = parse("<p>one<b>bold</b>two</p>");
    assert_eq!(doc.root().find("p").unwrap().text().unwrap(), "one");
}

#[test]
fn test_text_does_not_descend() {
    let doc = parse("<div>\n  <span>inner</span>\n</div>");
    let div = doc.root().find("div").unwrap();
    assert!(div.text().unwrap_err().is_not_found());
    assert_eq!(div.find("span").unwrap().text().unwrap(), "inner");
}

#[test]
fn test_text_skips_leading_comment() {
    let doc = parse("<p><!-- c -->\n  real</p>");
    assert_eq!(doc.root().find("p").unwrap().text().unwrap(), "\n  real");
}

#[test]
fn test_non_breaking_space_is_text() {
    let doc = parse("<p>&nbsp;</p>");
    assert_eq!(doc.root().find("p").unwrap().text().unwrap(), "\u{00A0}");
}
