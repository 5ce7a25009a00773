//! Integration tests for the HTML parser.

use ladle_dom::{DomTree, NodeId, NodeKind, NodeType};
use ladle_html::{HTMLParser, HTMLTokenizer, parse_html};

/// Helper to parse HTML and return the DOM tree
fn parse(html: &str) -> DomTree {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    let parser = HTMLParser::new(tokenizer.into_tokens());
    parser.run()
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    tree.descendants(from)
        .find(|&id| tree.as_element(id).is_some_and(|data| data.tag_name == tag))
}

/// Helper to list every element with the given tag name, in tree order
fn find_elements(tree: &DomTree, tag: &str) -> Vec<NodeId> {
    tree.descendants(NodeId::ROOT)
        .filter(|&id| tree.as_element(id).is_some_and(|data| data.tag_name == tag))
        .collect()
}

/// Helper to get text content of a node (concatenated)
fn text_content(tree: &DomTree, id: NodeId) -> String {
    tree.descendants(id)
        .filter_map(|child| tree.as_text(child))
        .collect()
}

/// Labels of the direct children of a node.
fn child_labels(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&child| tree.label(child).to_string())
        .collect()
}

#[test]
fn test_document_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");

    assert!(matches!(
        tree.get(NodeId::ROOT).map(|node| &node.node_type),
        Some(NodeType::Document)
    ));

    let html_id = find_element(&tree, NodeId::ROOT, "html").unwrap();
    assert_eq!(tree.document_element(), Some(html_id));
    assert_eq!(child_labels(&tree, html_id), vec!["head", "body"]);
}

#[test]
fn test_doctype_node() {
    let tree = parse("<!DOCTYPE html><html></html>");
    let first = tree.first_child(NodeId::ROOT).unwrap();
    assert_eq!(tree.kind(first), Some(NodeKind::Doctype));
    assert_eq!(tree.label(first), "html");
    assert_eq!(tree.next_sibling(first), tree.document_element());
}

#[test]
fn test_implied_html_head_and_body() {
    let tree = parse("<p>Hello</p>");
    let html_id = tree.document_element().unwrap();
    assert_eq!(tree.label(html_id), "html");
    assert_eq!(child_labels(&tree, html_id), vec!["head", "body"]);

    let body_id = find_element(&tree, html_id, "body").unwrap();
    assert_eq!(child_labels(&tree, body_id), vec!["p"]);
}

#[test]
fn test_text_node() {
    let tree = parse("<html><body>Hello World</body></html>");
    let body_id = find_element(&tree, NodeId::ROOT, "body").unwrap();
    assert_eq!(text_content(&tree, body_id), "Hello World");

    // Adjacent characters are merged into a single text node
    assert_eq!(tree.children(body_id).len(), 1);
}

#[test]
fn test_comment_before_html() {
    let tree = parse("<!-- top --><html><body></body></html>");
    let first = tree.first_child(NodeId::ROOT).unwrap();
    assert_eq!(tree.kind(first), Some(NodeKind::Comment));
    assert_eq!(tree.label(first), " top ");
}

#[test]
fn test_comment_in_body() {
    let tree = parse("<div><!-- note -->x</div>");
    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    let kinds: Vec<_> = tree
        .children(div_id)
        .iter()
        .filter_map(|&id| tree.kind(id))
        .collect();
    assert_eq!(kinds, vec![NodeKind::Comment, NodeKind::Text]);
}

#[test]
fn test_whitespace_between_elements_is_kept() {
    let tree = parse("<div>\n  <p>x</p>\n</div>");
    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(child_labels(&tree, div_id), vec!["\n  ", "p", "\n"]);
}

#[test]
fn test_head_elements() {
    let tree = parse("<title>T</title><meta charset=utf-8><p>x");
    let head_id = find_element(&tree, NodeId::ROOT, "head").unwrap();
    assert_eq!(child_labels(&tree, head_id), vec!["title", "meta"]);

    let title_id = find_element(&tree, head_id, "title").unwrap();
    assert_eq!(text_content(&tree, title_id), "T");

    let body_id = find_element(&tree, NodeId::ROOT, "body").unwrap();
    assert_eq!(child_labels(&tree, body_id), vec!["p"]);
}

#[test]
fn test_script_contents_stay_text() {
    let tree = parse("<body><script>a<b</script><p>x</p></body>");
    let script_id = find_element(&tree, NodeId::ROOT, "script").unwrap();
    assert_eq!(text_content(&tree, script_id), "a<b");
    assert!(find_element(&tree, NodeId::ROOT, "b").is_none());
    assert!(find_element(&tree, NodeId::ROOT, "p").is_some());
}

#[test]
fn test_p_closes_previous_p() {
    let tree = parse("<p>a<p>b");
    let paragraphs = find_elements(&tree, "p");
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(tree.parent(paragraphs[0]), tree.parent(paragraphs[1]));
    assert_eq!(tree.next_sibling(paragraphs[0]), Some(paragraphs[1]));
}

#[test]
fn test_block_element_closes_p() {
    let tree = parse("<p>a<div>b</div>");
    let p_id = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(tree.next_sibling(p_id), Some(div_id));
}

#[test]
fn test_list_items_auto_close() {
    let tree = parse("<ul><li>one<li>two</ul><p>after</p>");
    let ul_id = find_element(&tree, NodeId::ROOT, "ul").unwrap();
    assert_eq!(child_labels(&tree, ul_id), vec!["li", "li"]);

    let p_id = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(tree.prev_sibling(p_id), Some(ul_id));
}

#[test]
fn test_definition_list_items_auto_close() {
    let tree = parse("<dl><dt>a<dd>b<dt>c</dl>");
    let dl_id = find_element(&tree, NodeId::ROOT, "dl").unwrap();
    assert_eq!(child_labels(&tree, dl_id), vec!["dt", "dd", "dt"]);
}

#[test]
fn test_options_auto_close() {
    let tree = parse("<select><option>a<option>b</select>");
    let select_id = find_element(&tree, NodeId::ROOT, "select").unwrap();
    assert_eq!(child_labels(&tree, select_id), vec!["option", "option"]);
}

#[test]
fn test_nested_heading_is_closed() {
    let tree = parse("<h1>a<h2>b</h2>");
    let h1 = find_element(&tree, NodeId::ROOT, "h1").unwrap();
    let h2 = find_element(&tree, NodeId::ROOT, "h2").unwrap();
    assert_eq!(tree.next_sibling(h1), Some(h2));
}

#[test]
fn test_nested_anchor_is_closed() {
    let tree = parse("<a href=1>one<a href=2>two");
    let anchors = find_elements(&tree, "a");
    assert_eq!(anchors.len(), 2);
    assert_eq!(tree.next_sibling(anchors[0]), Some(anchors[1]));
}

#[test]
fn test_void_elements_have_no_children() {
    let tree = parse("<div><img src=a.png>text<br>more</div>");
    let img_id = find_element(&tree, NodeId::ROOT, "img").unwrap();
    let br_id = find_element(&tree, NodeId::ROOT, "br").unwrap();
    assert!(tree.children(img_id).is_empty());
    assert!(tree.children(br_id).is_empty());

    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(child_labels(&tree, div_id), vec!["img", "text", "br", "more"]);
}

#[test]
fn test_self_closing_non_void_element_stays_open() {
    let (tree, issues) = parse_html("<div/>inside");
    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(text_content(&tree, div_id), "inside");
    assert!(issues.iter().any(|issue| !issue.is_error));
}

#[test]
fn test_self_closing_flag_is_reported_for_every_non_void_element() {
    for html in ["<h1/>x", "<ul><li/>x</ul>", "<a/>x", "<span/>x", "<pre/>x"] {
        let (_, issues) = parse_html(html);
        assert!(
            issues
                .iter()
                .any(|issue| !issue.is_error && issue.message.contains("self-closing")),
            "no self-closing warning for {html}"
        );
    }
}

#[test]
fn test_self_closing_void_element_is_not_reported() {
    let (_, issues) = parse_html("<p>a<br/>b<img src=x.png /></p>");
    assert!(!issues.iter().any(|issue| issue.message.contains("self-closing")));
}

#[test]
fn test_unmatched_end_tag_is_ignored() {
    let (tree, issues) = parse_html("<div></span>x</div>");
    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(text_content(&tree, div_id), "x");
    assert!(issues.iter().any(|issue| issue.is_error));
}

#[test]
fn test_stray_p_end_tag_creates_empty_paragraph() {
    let tree = parse("<div></p></div>");
    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(child_labels(&tree, div_id), vec!["p"]);
}

#[test]
fn test_end_tag_closes_inline_children() {
    let tree = parse("<div><span><b>x</div><p>y</p>");
    let div_id = find_element(&tree, NodeId::ROOT, "div").unwrap();
    let p_id = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(tree.next_sibling(div_id), Some(p_id));
}

#[test]
fn test_pre_drops_leading_newline() {
    let tree = parse("<pre>\nline</pre>");
    let pre_id = find_element(&tree, NodeId::ROOT, "pre").unwrap();
    assert_eq!(text_content(&tree, pre_id), "line");
}

#[test]
fn test_textarea_drops_leading_newline() {
    let tree = parse("<textarea>\nx</textarea>");
    let textarea_id = find_element(&tree, NodeId::ROOT, "textarea").unwrap();
    assert_eq!(text_content(&tree, textarea_id), "x");
}

#[test]
fn test_textarea_keeps_later_newlines() {
    let tree = parse("<textarea>a\nb</textarea>");
    let textarea_id = find_element(&tree, NodeId::ROOT, "textarea").unwrap();
    assert_eq!(text_content(&tree, textarea_id), "a\nb");
}

#[test]
fn test_table_elements_nest() {
    let tree = parse("<table><tr><td>x</td></tr></table>");
    let table_id = find_element(&tree, NodeId::ROOT, "table").unwrap();
    let tr_id = find_element(&tree, table_id, "tr").unwrap();
    let td_id = find_element(&tree, tr_id, "td").unwrap();
    assert_eq!(text_content(&tree, td_id), "x");
}

#[test]
fn test_content_after_body_goes_into_body() {
    let tree = parse("<body></body><p>late</p>");
    let body_id = find_element(&tree, NodeId::ROOT, "body").unwrap();
    assert_eq!(child_labels(&tree, body_id), vec!["p"]);
}

#[test]
fn test_repeated_html_tag_merges_attributes() {
    let tree = parse("<html lang=en><body><html class=x lang=fr>");
    let html = tree.document_element().unwrap();
    let data = tree.as_element(html).unwrap();
    assert_eq!(data.get_attribute("lang"), Some("en"));
    assert_eq!(data.get_attribute("class"), Some("x"));
}

#[test]
fn test_duplicate_attributes_survive_tree_building() {
    let (tree, issues) = parse_html(r#"<p class="a" class="b">x</p>"#);
    let p_id = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let data = tree.as_element(p_id).unwrap();
    assert_eq!(data.attrs.len(), 2);
    assert_eq!(data.get_attribute("class"), Some("a"));
    assert!(
        issues
            .iter()
            .any(|issue| issue.message.starts_with("duplicate-attribute"))
    );
}

#[test]
fn test_strict_mode_stops_at_first_error() {
    let mut tokenizer = HTMLTokenizer::new("<div></span><p>x</p></div>".to_string());
    tokenizer.run();
    let (tree, issues) = HTMLParser::new(tokenizer.into_tokens())
        .with_strict_mode()
        .run_with_issues();

    assert_eq!(issues.len(), 1);
    assert!(find_element(&tree, NodeId::ROOT, "div").is_some());
    assert!(find_element(&tree, NodeId::ROOT, "p").is_none());
}

#[test]
fn test_clean_document_has_no_issues() {
    let (_, issues) = parse_html(
        "<!DOCTYPE html><html><head><title>t</title></head><body><p class=\"x\">y</p></body></html>",
    );
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}
