//! Integration tests for parent, child and sibling navigation.

use ladle_dom::{DomTree, ElementData, NodeId, NodeKind, NodeType};
use ladle_query::{Document, DocumentOptions, QueryError};

const LIST: &str = "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>";

fn parse(html: &str) -> Document {
    Document::parse(html).unwrap()
}

/// A document `<div>` whose children are built from `children` after a
/// leading `<span>`. Returns the document and the span's id.
fn span_followed_by(children: &[NodeType]) -> (Document, NodeId) {
    let mut tree = DomTree::new();
    let div = tree.alloc(NodeType::Element(ElementData::new("div", Vec::new())));
    tree.append_child(NodeId::ROOT, div);
    let span = tree.alloc(NodeType::Element(ElementData::new("span", Vec::new())));
    tree.append_child(div, span);
    for child in children {
        let id = tree.alloc(child.clone());
        tree.append_child(div, id);
    }
    (
        Document::from_tree(tree, DocumentOptions::default()).unwrap(),
        span,
    )
}

// ========== structural links ==========

#[test]
fn test_first_and_last_child_include_text() {
    let doc = parse(LIST);
    let ul = doc.root().find("ul").unwrap();

    let first = ul.first_child().unwrap();
    assert_eq!(first.kind(), NodeKind::Text);
    assert_eq!(first.label(), "\n  ");

    let last = ul.last_child().unwrap();
    assert_eq!(last.kind(), NodeKind::Text);
    assert_eq!(last.label(), "\n");
}

#[test]
fn test_siblings_include_text() {
    let doc = parse(LIST);
    let first_li = doc.root().find("li").unwrap();

    let after = first_li.next_sibling().unwrap();
    assert_eq!(after.kind(), NodeKind::Text);
    assert_eq!(after.next_sibling().unwrap().text().unwrap(), "b");

    let before = first_li.prev_sibling().unwrap();
    assert_eq!(before.kind(), NodeKind::Text);
    assert!(before.prev_sibling().unwrap_err().is_not_found());
}

#[test]
fn test_parent_chain_reaches_the_document() {
    let doc = parse(LIST);
    let li = doc.root().find("li").unwrap();
    let ul = li.parent().unwrap();
    assert_eq!(ul.label(), "ul");

    let html = doc.root();
    let document = html.parent().unwrap();
    assert_eq!(document.kind(), NodeKind::Document);
    assert_eq!(document.id(), NodeId::ROOT);

    let error = document.parent().unwrap_err();
    assert!(matches!(error, QueryError::NotFound { operation: "parent", .. }));
}

#[test]
fn test_childless_element_has_no_first_or_last_child() {
    let doc = parse("<br>");
    let br = doc.root().find("br").unwrap();
    assert!(br.first_child().unwrap_err().is_not_found());
    assert!(br.last_child().unwrap_err().is_not_found());
}

#[test]
fn test_next_sibling_error_message() {
    let doc = parse("<p>only</p>");
    let p = doc.root().find("p").unwrap();
    let error = p.next_sibling().unwrap_err();
    assert_eq!(error.operation(), "next_sibling");
    assert_eq!(error.to_string(), "next sibling not found");
}

#[test]
fn test_children_lists_every_node() {
    let doc = parse(LIST);
    let ul = doc.root().find("ul").unwrap();
    let kinds: Vec<NodeKind> = ul.children().iter().map(|child| child.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Text,
            NodeKind::Element,
            NodeKind::Text,
            NodeKind::Element,
            NodeKind::Text,
        ]
    );
}

// ========== element siblings ==========

#[test]
fn test_element_siblings_skip_text() {
    let doc = parse(LIST);
    let items = doc.root().find_all("li").unwrap();

    assert_eq!(items[0].next_element_sibling().unwrap(), items[1]);
    assert_eq!(items[1].prev_element_sibling().unwrap(), items[0]);
    assert!(items[1].next_element_sibling().unwrap_err().is_not_found());
    assert!(items[0].prev_element_sibling().unwrap_err().is_not_found());
}

#[test]
fn test_next_element_sibling_skips_text_and_comments() {
    let (doc, span) = span_followed_by(&[
        NodeType::Text("text".to_string()),
        NodeType::Comment("comment".to_string()),
        NodeType::Element(ElementData::new("em", Vec::new())),
    ]);
    let span = doc.handle(span).unwrap();
    let next = span.next_element_sibling().unwrap();
    assert_eq!(next.label(), "em");
    assert_eq!(next.prev_element_sibling().unwrap(), span);
}

#[test]
fn test_next_element_sibling_fails_without_trailing_element() {
    let (doc, span) = span_followed_by(&[
        NodeType::Text("one".to_string()),
        NodeType::Text("two".to_string()),
    ]);
    let span = doc.handle(span).unwrap();
    let error = span.next_element_sibling().unwrap_err();
    assert!(matches!(
        error,
        QueryError::NotFound {
            operation: "next_element_sibling",
            ..
        }
    ));
}

#[test]
fn test_element_sibling_from_a_text_node() {
    let doc = parse("<p><b>x</b> and <i>y</i></p>");
    let b = doc.root().find("b").unwrap();
    let between = b.next_sibling().unwrap();
    assert_eq!(between.label(), " and ");
    assert_eq!(between.next_element_sibling().unwrap().label(), "i");
    assert_eq!(between.prev_element_sibling().unwrap(), b);
}

#[test]
fn test_chained_navigation() {
    let doc = parse(r#"<div><p>Hi</p><p class="x">Bye</p></div>"#);
    let text = doc
        .root()
        .find("div")
        .and_then(|div| div.first_child())
        .and_then(|p| p.next_element_sibling())
        .and_then(|p| p.text())
        .unwrap();
    assert_eq!(text, "Bye");
}
