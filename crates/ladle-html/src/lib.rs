//! HTML tokenizer and tree builder for ladle.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, and tag states
//!   - DOCTYPE, comment, and character reference handling
//!   - Attribute parsing (duplicates are kept in source order)
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Insertion modes: Initial, BeforeHtml, BeforeHead, InHead, AfterHead, InBody, Text, AfterBody, AfterAfterBody
//!   - Implicit `html`/`head`/`body` elements and a stack of open elements
//!
//! # Not Implemented
//!
//! - Script data escape states (script content is treated as raw text)
//! - Table insertion modes, foster parenting
//! - The adoption agency algorithm (mis-nested formatting tags close the
//!   nearest matching element instead)

/// Parse issues shared by the tokenizer and the tree builder.
pub mod issue;
/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use issue::ParseIssue;
pub use parser::{HTMLParser, InsertionMode, print_tree};
pub use tokenizer::{HTMLTokenizer, Token};

use ladle_dom::DomTree;

/// Tokenize and tree-build `html` in one step.
///
/// Returns the tree together with every issue the tokenizer and the tree
/// builder reported, tokenizer issues first.
#[must_use]
pub fn parse_html(html: &str) -> (DomTree, Vec<ParseIssue>) {
    parse_html_with(html, false)
}

/// Like [`parse_html`], but with `strict` the tree builder stops at its
/// first parse error and the tree is left partially built.
#[must_use]
pub fn parse_html_with(html: &str, strict: bool) -> (DomTree, Vec<ParseIssue>) {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    let (tokens, mut issues) = tokenizer.into_parts();

    let mut parser = HTMLParser::new(tokens);
    if strict {
        parser = parser.with_strict_mode();
    }
    let (tree, parser_issues) = parser.run_with_issues();
    issues.extend(parser_issues);
    (tree, issues)
}
