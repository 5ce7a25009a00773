use strum_macros::Display;

use ladle_common::warning::warn_once;
use ladle_dom::{Attribute, DoctypeData, DomTree, ElementData, NodeId, NodeType};

use crate::issue::ParseIssue;
use crate::tokenizer::Token;

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
///
/// Table, select, template and frameset modes are not implemented; their
/// elements are handled by the generic "in body" rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
}

/// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
///
/// "A start tag whose tag name is one of: "address", "article", "aside", ..."
/// These close an open `p` before being inserted.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "menu",
    "nav",
    "ol",
    "search",
    "section",
    "summary",
    "ul",
];

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "hr", "img", "input", "keygen",
    "link", "meta", "param", "source", "track", "wbr",
];

const HEADING_ELEMENTS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
///
/// "The stack of open elements is said to have a particular element in scope
/// when it has that element in the specific scope consisting of the following
/// element types: applet, caption, html, table, td, th, marquee, object, template"
const DEFAULT_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
];

/// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// The "special" category, trimmed to the elements this parser can produce.
const SPECIAL_ELEMENTS: &[&str] = &[
    "address", "applet", "area", "article", "aside", "base", "basefont", "bgsound",
    "blockquote", "body", "br", "button", "caption", "center", "col", "colgroup", "dd",
    "details", "dir", "div", "dl", "dt", "embed", "fieldset", "figcaption", "figure", "footer",
    "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup",
    "hr", "html", "iframe", "img", "input", "keygen", "li", "link", "listing", "main", "marquee",
    "menu", "meta", "nav", "noembed", "noframes", "noscript", "object", "ol", "p", "param",
    "plaintext", "pre", "script", "search", "section", "select", "source", "style", "summary",
    "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "title", "tr",
    "track", "ul", "wbr", "xmp",
];

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML parser builds a document tree from a stream of tokens.
pub struct HTMLParser {
    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    insertion_mode: InsertionMode,

    /// [§ 13.2.4.2 The original insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena.
    stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    head_element_pointer: Option<NodeId>,

    /// Tree with parent/sibling links.
    /// `NodeId::ROOT` (index 0) is the Document node.
    tree: DomTree,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in token stream.
    token_index: usize,

    /// Whether we've stopped parsing.
    stopped: bool,

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    /// "If the next token is a U+000A LINE FEED (LF) character token, then
    /// ignore that token and move on to the next one."
    ignore_next_line_feed: bool,

    /// Parse issues (errors and warnings) encountered during parsing.
    issues: Vec<ParseIssue>,

    /// If true, stop building the tree at the first parse error.
    strict_mode: bool,
}

impl HTMLParser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        // DomTree::new() creates the Document node at NodeId::ROOT
        Self {
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            stack_of_open_elements: Vec::new(),
            head_element_pointer: None,
            tree: DomTree::new(),
            tokens,
            token_index: 0,
            stopped: false,
            ignore_next_line_feed: false,
            issues: Vec::new(),
            strict_mode: false,
        }
    }

    /// Enable strict mode - tree construction stops at the first parse error.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Get all parse issues (errors and warnings) encountered during parsing.
    #[must_use]
    pub fn get_issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Run the parser and return the tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the parser and return both the `DomTree` and any parse issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        while !self.stopped && self.token_index < self.tokens.len() {
            let token = self.tokens[self.token_index].clone();
            self.process_token(&token);
            self.token_index += 1;
        }
        (self.tree, self.issues)
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Record a parse error. In strict mode this also stops parsing.
    fn parse_error(&mut self, message: &str) {
        warn_once("HTML Parser", message);
        self.issues
            .push(ParseIssue::error(message, self.token_index));
        if self.strict_mode {
            self.stopped = true;
        }
    }

    /// Record a parse warning (for unhandled but recoverable situations).
    fn parse_warning(&mut self, message: &str) {
        warn_once("HTML Parser", message);
        self.issues
            .push(ParseIssue::warning(message, self.token_index));
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    fn process_token(&mut self, token: &Token) {
        if self.stopped {
            return;
        }
        if std::mem::take(&mut self.ignore_next_line_feed)
            && matches!(token, Token::Character { data: '\n' })
        {
            return;
        }

        match self.insertion_mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
        }
    }

    /// "Reprocess the token" - process the same token again in a new insertion mode.
    fn reprocess_token(&mut self, token: &Token) {
        self.process_token(token);
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    // =========================================================================
    // Creating and inserting nodes
    // =========================================================================

    /// "The current node is the bottommost node in this stack of open elements."
    fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node." Without foster parenting
    /// this is always the current node.
    fn insertion_location(&self) -> NodeId {
        self.current_node().unwrap_or(NodeId::ROOT)
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// "Create an element for a token"
    fn create_element(&mut self, tag_name: &str, attributes: &[Attribute]) -> NodeId {
        self.tree.alloc(NodeType::Element(ElementData::new(
            tag_name,
            attributes.to_vec(),
        )))
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// Creates the element, appends it at the insertion location and pushes it
    /// onto the stack of open elements.
    fn insert_element(&mut self, tag_name: &str, attributes: &[Attribute]) -> NodeId {
        let element_id = self.create_element(tag_name, attributes);
        let parent_id = self.insertion_location();
        self.tree.append_child(parent_id, element_id);
        self.stack_of_open_elements.push(element_id);
        element_id
    }

    /// Insert an HTML element for a start tag token. Other tokens are ignored.
    fn insert_html_element(&mut self, token: &Token) -> Option<NodeId> {
        match token {
            Token::StartTag {
                name, attributes, ..
            } => Some(self.insert_element(name, attributes)),
            _ => None,
        }
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data. Otherwise, create
    /// a new Text node..."
    fn insert_character(&mut self, c: char) {
        let parent_id = self.insertion_location();
        if parent_id == NodeId::ROOT {
            // "The DOM will not let Document nodes have Text node children,
            // so they are dropped on the floor."
            return;
        }

        if let Some(last_id) = self.tree.last_child(parent_id)
            && let Some(node) = self.tree.get_mut(last_id)
            && let NodeType::Text(ref mut data) = node.node_type
        {
            data.push(c);
            return;
        }

        let text_id = self.tree.alloc(NodeType::Text(String::from(c)));
        self.tree.append_child(parent_id, text_id);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    fn insert_comment(&mut self, data: &str) {
        let parent_id = self.insertion_location();
        self.insert_comment_into(parent_id, data);
    }

    /// Insert a comment as the last child of `parent_id`. Used for comments
    /// outside the html element.
    fn insert_comment_into(&mut self, parent_id: NodeId, data: &str) {
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.tree.append_child(parent_id, comment_id);
    }

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Get the tag name of a node (local name of the element).
    fn get_tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(|data| data.tag_name.as_str())
    }

    fn current_node_is(&self, tag_name: &str) -> bool {
        self.current_node()
            .and_then(|id| self.get_tag_name(id))
            .is_some_and(|name| name == tag_name)
    }

    // =========================================================================
    // Stack of open elements
    // =========================================================================

    /// Pop elements from the stack of open elements until one of the given
    /// tag names has been popped (inclusive).
    fn pop_until_one_of(&mut self, tag_names: &[&str]) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self
                .get_tag_name(id)
                .is_some_and(|name| tag_names.contains(&name))
            {
                break;
            }
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
    ///
    /// STEP 1: "Initialize node to be the current node."
    /// STEP 2: "If node is the target node, terminate in a match state."
    /// STEP 3: "Otherwise, if node is one of the element types in list,
    ///          terminate in a failure state."
    /// STEP 4: "Otherwise, set node to the previous entry in the stack of
    ///          open elements and return to step 2."
    fn has_element_in_specific_scope(&self, tag_names: &[&str], scope_markers: &[&str]) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            if let Some(node_tag) = self.get_tag_name(node_id) {
                if tag_names.contains(&node_tag) {
                    return true;
                }
                if scope_markers.contains(&node_tag) {
                    return false;
                }
            }
        }
        false
    }

    /// "has an element in scope" (default scope).
    fn has_element_in_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], DEFAULT_SCOPE)
    }

    /// "has an element in button scope": default scope plus `button`.
    fn has_element_in_button_scope(&self, tag_name: &str) -> bool {
        let mut markers = DEFAULT_SCOPE.to_vec();
        markers.push("button");
        self.has_element_in_specific_scope(&[tag_name], &markers)
    }

    /// "has an element in list item scope": default scope plus `ol` and `ul`.
    fn has_element_in_list_item_scope(&self, tag_name: &str) -> bool {
        let mut markers = DEFAULT_SCOPE.to_vec();
        markers.extend(["ol", "ul"]);
        self.has_element_in_specific_scope(&[tag_name], &markers)
    }

    /// [§ 13.2.6.2 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "...while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an rp
    /// element, an rt element, or an rtc element, the user agent must pop the
    /// current node off the stack of open elements."
    ///
    /// "If a step requires the user agent to generate implied end tags but lists
    /// an element to exclude from the process, then the user agent must perform
    /// the above steps as if that element was not in the above list."
    fn generate_implied_end_tags_excluding(&mut self, exclude: &[&str]) {
        const IMPLIED_END_TAG_ELEMENTS: &[&str] = &[
            "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
        ];

        while let Some(current) = self.current_node() {
            let implied = self
                .get_tag_name(current)
                .is_some_and(|tag| IMPLIED_END_TAG_ELEMENTS.contains(&tag) && !exclude.contains(&tag));
            if !implied {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// Close an element of one of `tag_names` that is known to be in scope:
    /// generate implied end tags (excluding the target), report a parse error
    /// if the current node is not the target, then pop until it is gone.
    fn close_element(&mut self, tag_names: &[&str]) {
        self.generate_implied_end_tags_excluding(tag_names);

        let current_matches = self
            .current_node()
            .and_then(|id| self.get_tag_name(id))
            .is_some_and(|name| tag_names.contains(&name));
        if !current_matches {
            self.parse_error("end tag with other elements still open");
        }
        self.pop_until_one_of(tag_names);
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    fn close_p_element_if_in_button_scope(&mut self) {
        if self.has_element_in_button_scope("p") {
            self.close_element(&["p"]);
        }
    }

    // =========================================================================
    // Insertion modes
    // =========================================================================

    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            Token::Character { data } if Self::is_whitespace(*data) => {}

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_into(NodeId::ROOT, data),

            // "A DOCTYPE token"
            // "Append a DocumentType node to the Document node, with its name set
            // to the name given in the DOCTYPE token, or the empty string if the
            // name was missing; its public ID set to the public identifier...
            // and its system ID set to the system identifier..."
            // "Then, switch the insertion mode to "before html"."
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
            } => {
                if name.as_deref() != Some("html") {
                    self.parse_error("unexpected DOCTYPE name");
                }
                let doctype_id = self.tree.alloc(NodeType::Doctype(DoctypeData {
                    name: name.clone().unwrap_or_default(),
                    public_id: public_identifier.clone(),
                    system_id: system_identifier.clone(),
                }));
                self.tree.append_child(NodeId::ROOT, doctype_id);
                self.insertion_mode = InsertionMode::BeforeHtml;
            }

            // "Anything else"
            // "In any case, switch the insertion mode to "before html", then
            // reprocess the token."
            _ => {
                self.insertion_mode = InsertionMode::BeforeHtml;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token" - "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE"),

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_into(NodeId::ROOT, data),

            // "A character token that is ... whitespace" - "Ignore the token."
            Token::Character { data } if Self::is_whitespace(*data) => {}

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the Document as the
            // intended parent. Append it to the Document object. Put this element in the stack
            // of open elements. Switch the insertion mode to "before head"."
            Token::StartTag {
                name, attributes, ..
            } if name == "html" => {
                let _ = self.insert_element(name, attributes);
                self.insertion_mode = InsertionMode::BeforeHead;
            }

            // "Any other end tag" - "Parse error. Ignore the token."
            Token::EndTag { name } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.parse_error("unexpected end tag before html");
            }

            // "Anything else"
            // "Create an html element whose node document is the Document object.
            // Append it to the Document object. Put this element in the stack of
            // open elements. Switch the insertion mode to "before head", then
            // reprocess the token."
            _ => {
                let _ = self.insert_element("html", &[]);
                self.insertion_mode = InsertionMode::BeforeHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {}

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE"),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token. Set the head element pointer
            // to the newly created head element. Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                self.head_element_pointer = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InHead;
            }

            // "Any other end tag" - "Parse error. Ignore the token."
            Token::EndTag { name } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.parse_error("unexpected end tag before head");
            }

            // "Anything else"
            // "Insert an HTML element for a "head" start tag token with no attributes.
            // Set the head element pointer to the newly created head element.
            // Switch the insertion mode to "in head". Reprocess the current token."
            _ => {
                self.head_element_pointer = Some(self.insert_element("head", &[]));
                self.insertion_mode = InsertionMode::InHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is ... whitespace" - "Insert the character."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE"),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound", "link""
            // "A start tag whose tag name is "meta""
            // "Insert an HTML element for the token. Immediately pop the current node off the
            // stack of open elements."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base" | "basefont" | "bgsound" | "link" | "meta"
                ) =>
            {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
            }

            // "A start tag whose tag name is "title"" - generic RCDATA element parsing
            // "A start tag whose tag name is one of: "noframes", "style"" - generic raw text
            // "A start tag whose tag name is "script""
            //
            // 1. "Insert an HTML element for the token."
            // 2. "Let the original insertion mode be the current insertion mode."
            // 3. "Switch the insertion mode to "text"."
            //
            // The tokenizer has already switched itself to RCDATA / RAWTEXT.
            Token::StartTag { name, .. }
                if matches!(name.as_str(), "title" | "style" | "script" | "noframes") =>
            {
                let _ = self.insert_html_element(token);
                self.original_insertion_mode = Some(self.insertion_mode);
                self.insertion_mode = InsertionMode::Text;
            }

            // "An end tag whose tag name is "head""
            // "Pop the current node (which will be the head element) off the stack of open elements."
            // "Switch the insertion mode to "after head"."
            Token::EndTag { name } if name == "head" => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::AfterHead;
            }

            // "A start tag whose tag name is "head"" / "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" => {
                self.parse_error("unexpected head start tag");
            }
            Token::EndTag { name } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.parse_error("unexpected end tag in head");
            }

            // "Anything else"
            // "Pop the current node (which will be the head element) off the stack of open elements."
            // "Switch the insertion mode to "after head"."
            // "Reprocess the token."
            _ => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::AfterHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    ///
    /// NOTE: Head-only elements seen here (a late `<meta>` or `<title>`) are
    /// not moved back into the head; they fall through to the body.
    fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE"),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "body""
            // "Insert an HTML element for the token. Set the frameset-ok flag to
            // "not ok". Switch the insertion mode to "in body"."
            Token::StartTag { name, .. } if name == "body" => {
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InBody;
            }

            Token::StartTag { name, .. } if name == "head" => {
                self.parse_error("unexpected head start tag");
            }
            Token::EndTag { name } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.parse_error("unexpected end tag after head");
            }

            // "Anything else"
            // "Insert an HTML element for a "body" start tag token with no attributes.
            // Switch the insertion mode to "in body". Reprocess the current token."
            _ => {
                let _ = self.insert_element("body", &[]);
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL" - "Parse error. Ignore the token."
            Token::Character { data: '\0' } => self.parse_error("unexpected null character"),

            // "Any other character token" - "Insert the character."
            Token::Character { data } => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE"),

            Token::StartTag {
                name, attributes, ..
            } => self.handle_in_body_start_tag(token, name, attributes),

            Token::EndTag { name } => self.handle_in_body_end_tag(token, name),

            // "An end-of-file token" - "Stop parsing."
            Token::EndOfFile => self.stopped = true,
        }
    }

    /// Start tag rules of the "in body" insertion mode.
    fn handle_in_body_start_tag(&mut self, token: &Token, name: &str, attributes: &[Attribute]) {
        // "non-void-html-element-start-tag-with-trailing-solidus": the
        // self-closing flag is ignored and the element stays open.
        if matches!(token, Token::StartTag { self_closing: true, .. })
            && !VOID_ELEMENTS.contains(&name)
        {
            self.parse_warning("self-closing flag on non-void element ignored");
        }

        match name {
            // "A start tag whose tag name is "html""
            // "Parse error. ...for each attribute on the token, check to see if the
            // attribute is already present on the top element of the stack of open
            // elements. If it is not, add the attribute and its corresponding value
            // to that element."
            "html" => {
                self.parse_error("unexpected html start tag");
                let html_id = self.stack_of_open_elements.first().copied();
                if let Some(html_id) = html_id
                    && let Some(node) = self.tree.get_mut(html_id)
                    && let NodeType::Element(ref mut data) = node.node_type
                {
                    for attr in attributes {
                        if data.get_attribute(&attr.name).is_none() {
                            data.attrs.push(attr.clone());
                        }
                    }
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound",
            // "link", "meta", "noframes", "script", "style", "template", "title""
            // "Process the token using the rules for the "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
            | "style" | "title" => self.handle_in_head_mode(token),

            // "A start tag whose tag name is "body"" - "Parse error."
            "body" => self.parse_error("unexpected body start tag"),

            // "If the stack of open elements has a p element in button scope,
            // then close a p element. Insert an HTML element for the token."
            _ if BLOCK_ELEMENTS.contains(&name) || name == "p" || name == "table" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            // "If the current node is an HTML element whose tag name is one of "h1",
            // "h2", "h3", "h4", "h5", or "h6", then this is a parse error; pop the
            // current node off the stack of open elements."
            _ if HEADING_ELEMENTS.contains(&name) => {
                self.close_p_element_if_in_button_scope();
                let current_is_heading = self
                    .current_node()
                    .and_then(|id| self.get_tag_name(id))
                    .is_some_and(|tag| HEADING_ELEMENTS.contains(&tag));
                if current_is_heading {
                    self.parse_error("nested heading");
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            // "...If the next token is a U+000A LINE FEED (LF) character token,
            // then ignore that token and move on to the next one."
            "pre" | "listing" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(token);
                self.ignore_next_line_feed = true;
            }

            // "A start tag whose tag name is "textarea""
            // "Insert an HTML element for the token. If the next token is a
            // U+000A LINE FEED (LF) character token, then ignore that token and
            // move on to the next one."
            "textarea" => {
                let _ = self.insert_html_element(token);
                self.ignore_next_line_feed = true;
            }

            // "A start tag whose tag name is "li""
            // "...If node is an li element, then run these substeps: Generate
            // implied end tags, except for li elements... Pop elements from the
            // stack of open elements until an li element has been popped..."
            "li" => {
                if self.has_element_in_list_item_scope("li") {
                    self.close_element(&["li"]);
                }
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                if self.has_element_in_specific_scope(&["dd", "dt"], DEFAULT_SCOPE) {
                    self.close_element(&["dd", "dt"]);
                }
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "a""
            // "If the list of active formatting elements contains an a element...
            // then this is a parse error; run the adoption agency algorithm..."
            //
            // NOTE: Without the adoption agency algorithm, the open `a` is
            // simply closed.
            "a" => {
                if self.has_element_in_scope("a") {
                    self.parse_error("nested a element");
                    self.pop_until_one_of(&["a"]);
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            // "If the current node is an option element, then pop the current
            // node off the stack of open elements."
            "option" | "optgroup" => {
                if self.current_node_is("option") {
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
            }

            // "A start tag whose tag name is one of: "area", "br", "embed", "img",
            // "keygen", "wbr"" / "input" / "param", "source", "track"
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements. Acknowledge the token's
            // self-closing flag, if it is set."
            _ if VOID_ELEMENTS.contains(&name) => {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
            }

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any. Insert an HTML
            // element for the token."
            _ => {
                let _ = self.insert_html_element(token);
            }
        }
    }

    /// End tag rules of the "in body" insertion mode.
    fn handle_in_body_end_tag(&mut self, token: &Token, name: &str) {
        match name {
            // "An end tag whose tag name is "body""
            // "If the stack of open elements does not have a body element in scope,
            // this is a parse error; ignore the token."
            // "Switch the insertion mode to "after body"."
            "body" => {
                if self.has_element_in_scope("body") {
                    self.insertion_mode = InsertionMode::AfterBody;
                } else {
                    self.parse_error("body end tag without body in scope");
                }
            }

            // "An end tag whose tag name is "html""
            // "...Switch the insertion mode to "after body". Reprocess the token."
            "html" => {
                if self.has_element_in_scope("body") {
                    self.insertion_mode = InsertionMode::AfterBody;
                    self.reprocess_token(token);
                } else {
                    self.parse_error("html end tag without body in scope");
                }
            }

            // "An end tag whose tag name is "p""
            // "If the stack of open elements does not have a p element in button
            // scope, then this is a parse error; insert an HTML element for a "p"
            // start tag token with no attributes. Close a p element."
            "p" => {
                if !self.has_element_in_button_scope("p") {
                    self.parse_error("p end tag without open p");
                    let _ = self.insert_element("p", &[]);
                }
                self.close_element(&["p"]);
            }

            // "An end tag whose tag name is "li""
            "li" => {
                if self.has_element_in_list_item_scope("li") {
                    self.close_element(&["li"]);
                } else {
                    self.parse_error("li end tag without open li");
                }
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            // "...pop elements from the stack of open elements until an h1, h2, h3,
            // h4, h5, or h6 element has been popped from the stack."
            _ if HEADING_ELEMENTS.contains(&name) => {
                if self.has_element_in_specific_scope(HEADING_ELEMENTS, DEFAULT_SCOPE) {
                    self.generate_implied_end_tags_excluding(&[]);
                    if !self.current_node_is(name) {
                        self.parse_error("mismatched heading end tag");
                    }
                    self.pop_until_one_of(HEADING_ELEMENTS);
                } else {
                    self.parse_error("heading end tag without open heading");
                }
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as described
            // in the next entry; i.e. act as if this was a "br" start tag token with
            // no attributes, rather than the end tag token that it actually is."
            "br" => {
                self.parse_error("br end tag");
                let _ = self.insert_element("br", &[]);
                let _ = self.stack_of_open_elements.pop();
            }

            // "An end tag whose tag name is one of: "address", "article", ... "ul""
            // "If the stack of open elements does not have an element in scope that is
            // an HTML element with the same tag name as that of the token, then this
            // is a parse error; ignore the token."
            _ if BLOCK_ELEMENTS.contains(&name)
                || matches!(name, "pre" | "listing" | "dd" | "dt" | "table") =>
            {
                if self.has_element_in_scope(name) {
                    self.close_element(&[name]);
                } else {
                    self.parse_error("end tag without matching open element");
                }
            }

            _ => self.any_other_end_tag(name),
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "Any other end tag"
    /// STEP 1: "Initialize node to be the current node (the bottommost node of the stack)."
    /// STEP 2: "Loop: If node is an HTML element with the same tag name as the token, then:
    ///          Generate implied end tags, except for HTML elements with the same tag name
    ///          as the token. ... Pop all the nodes from the current node up to node,
    ///          including node, then stop these steps."
    /// STEP 3: "Otherwise, if node is in the special category, then this is a parse error;
    ///          ignore the token, and return."
    /// STEP 4: "Set node to the previous entry in the stack of open elements."
    fn any_other_end_tag(&mut self, tag_name: &str) {
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node_id = self.stack_of_open_elements[index];
            let Some(node_tag) = self.get_tag_name(node_id) else {
                continue;
            };

            if node_tag == tag_name {
                self.generate_implied_end_tags_excluding(&[tag_name]);
                if self.current_node() != Some(node_id) {
                    self.parse_error("end tag with other elements still open");
                }
                self.stack_of_open_elements.truncate(index);
                return;
            }

            if SPECIAL_ELEMENTS.contains(&node_tag) {
                self.parse_error("end tag without matching open element");
                return;
            }
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    fn handle_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token" - "Insert the character."
            Token::Character { data } => self.insert_character(*data),

            // "An end-of-file token"
            // "Parse error. Pop the current node off the stack of open elements.
            // Switch the insertion mode to the original insertion mode and
            // reprocess the token."
            Token::EndOfFile => {
                self.parse_error("eof in text");
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InBody);
                self.reprocess_token(token);
            }

            // "Any other end tag"
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode."
            Token::EndTag { .. } => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InBody);
            }

            // The tokenizer only produces characters and the closing tag inside
            // raw text, so nothing else can arrive here.
            _ => self.parse_warning("unexpected token in text mode"),
        }
    }

    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.handle_in_body_mode(token);
            }

            // "A comment token"
            // "Insert a comment as the last child of the first element in the stack of open
            // elements (the html element)."
            Token::Comment { data } => {
                let html_id = self
                    .stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT);
                self.insert_comment_into(html_id, data);
            }

            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE"),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html""
            // "...switch the insertion mode to "after after body"."
            Token::EndTag { name } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterBody;
            }

            // "An end-of-file token" - "Stop parsing."
            Token::EndOfFile => self.stopped = true,

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess the token."
            _ => {
                self.parse_error("content after body");
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_into(NodeId::ROOT, data),

            // "A DOCTYPE token", whitespace, "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Doctype { .. } => self.handle_in_body_mode(token),
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.handle_in_body_mode(token);
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::EndOfFile => self.stopped = true,

            _ => {
                self.parse_error("content after html");
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }
}

/// Print a document tree for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Document => println!("{prefix}Document"),
            NodeType::Doctype(data) => println!("{prefix}<!DOCTYPE {}>", data.name),
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|attr| {
                            if attr.value.is_empty() {
                                attr.name.clone()
                            } else {
                                format!("{}=\"{}\"", attr.name, attr.value)
                            }
                        })
                        .collect();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
            NodeType::Comment(data) => println!("{prefix}<!-- {data} -->"),
        }
        for &child_id in tree.children(id) {
            print_tree(tree, child_id, indent + 1);
        }
    }
}
