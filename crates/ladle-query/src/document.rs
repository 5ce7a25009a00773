use ladle_common::fetch_text;
use ladle_common::warning::clear_warnings;
use ladle_dom::{DomTree, NodeId, NodeKind};
use ladle_html::{ParseIssue, parse_html_with};

use crate::error::QueryError;
use crate::handle::Handle;
use crate::policy::{DocumentOptions, ErrorPolicy};

/// A parsed document, ready to be queried.
///
/// Building a document finds its root element once. Every [`Handle`]
/// borrows the document and carries its [`ErrorPolicy`].
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    root: NodeId,
    options: DocumentOptions,
    issues: Vec<ParseIssue>,
}

impl Document {
    /// Parse `html` with the default options.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Parse`] if the markup has no element to start from.
    pub fn parse(html: &str) -> Result<Self, QueryError> {
        Self::parse_with(html, DocumentOptions::default())
    }

    /// Parse `html`.
    ///
    /// Parser warnings are deduplicated per document: the set of warnings
    /// already logged is cleared first.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Parse`] if the markup has no element to start
    /// from, or, when `options.strict` is set, if the parser reported an error.
    pub fn parse_with(html: &str, options: DocumentOptions) -> Result<Self, QueryError> {
        clear_warnings();
        let (tree, issues) = parse_html_with(html, options.strict);
        for issue in &issues {
            log::debug!("{issue}");
        }

        if options.strict
            && let Some(issue) = issues.iter().find(|issue| issue.is_error)
        {
            return options
                .policy
                .report(Err(QueryError::Parse(issue.to_string())));
        }

        let mut document = Self::from_tree(tree, options)?;
        document.issues = issues;
        Ok(document)
    }

    /// Wrap an already built tree.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Parse`] if no root element can be found.
    pub fn from_tree(tree: DomTree, options: DocumentOptions) -> Result<Self, QueryError> {
        let root = options.policy.report(find_root_element(&tree))?;
        Ok(Self {
            tree,
            root,
            options,
            issues: Vec::new(),
        })
    }

    /// Download `url` and parse the body.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Fetch`] if the download fails, otherwise the
    /// same errors as [`Document::parse_with`].
    pub fn fetch(url: &str, options: DocumentOptions) -> Result<Self, QueryError> {
        let body = options
            .policy
            .report(fetch_text(url).map_err(QueryError::from))?;
        Self::parse_with(&body, options)
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> Handle<'_> {
        Handle::new(self, self.root)
    }

    /// A handle on any node of the tree, or `None` if `id` is not in it.
    #[must_use]
    pub fn handle(&self, id: NodeId) -> Option<Handle<'_>> {
        self.tree.get(id).map(|_| Handle::new(self, id))
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The options this document was built with.
    #[must_use]
    pub const fn options(&self) -> DocumentOptions {
        self.options
    }

    /// The failure policy shared by every handle on this document.
    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.options.policy
    }

    /// Issues the parser reported while building the tree. Empty for
    /// documents made with [`Document::from_tree`].
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }
}

/// Walk from the document node to the first element: step into the
/// document, step over doctypes and comments.
///
/// Anything else in the way (a stray top-level text node) is an error, as
/// is running out of nodes.
fn find_root_element(tree: &DomTree) -> Result<NodeId, QueryError> {
    let mut current = Some(NodeId::ROOT);
    while let Some(id) = current {
        current = match tree.kind(id) {
            Some(NodeKind::Element) => return Ok(id),
            Some(NodeKind::Document) => tree.first_child(id),
            Some(NodeKind::Doctype | NodeKind::Comment) => tree.next_sibling(id),
            Some(kind @ NodeKind::Text) => {
                return Err(QueryError::Parse(format!(
                    "unexpected {kind} node before the root element"
                )));
            }
            None => break,
        };
    }
    Err(QueryError::Parse("no root element".to_string()))
}
