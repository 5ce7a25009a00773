use core::fmt;

use indexmap::IndexMap;
use ladle_dom::{DomTree, Node, NodeId, NodeKind};

use crate::document::Document;
use crate::error::QueryError;
use crate::policy::ErrorPolicy;
use crate::query::Query;
use crate::search;

/// Attribute names mapped to their values, in document order.
///
/// When an element repeats an attribute, the first occurrence wins.
pub type AttributesMap = IndexMap<String, String>;

/// A reference to one node of a [`Document`].
///
/// Handles are cheap to copy. Every operation returns a fresh handle (or
/// value) on success and a [`QueryError`] on failure, so calls chain with `?`:
///
/// ```
/// use ladle_query::Document;
///
/// let doc = Document::parse(r#"<div><p>Hi</p><p class="x">Bye</p></div>"#)?;
/// let bye = doc.root().find(("p", "class", "x"))?;
/// assert_eq!(bye.text()?, "Bye");
/// assert_eq!(bye.prev_element_sibling()?.text()?, "Hi");
/// # Ok::<(), ladle_query::QueryError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Handle<'a> {
    document: &'a Document,
    id: NodeId,
    node: &'a Node,
    label: &'a str,
}

impl<'a> Handle<'a> {
    /// `id` must be a node of `document`'s tree.
    pub(crate) fn new(document: &'a Document, id: NodeId) -> Self {
        let tree = document.tree();
        let node = &tree[id];
        Self {
            document,
            id,
            node,
            label: tree.label(id),
        }
    }

    /// The node this handle points at.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The document this handle belongs to.
    #[must_use]
    pub const fn document(&self) -> &'a Document {
        self.document
    }

    /// The underlying tree node.
    #[must_use]
    pub const fn node(&self) -> &'a Node {
        self.node
    }

    /// What kind of node this is.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.node.node_type.kind()
    }

    /// Whether this is an element.
    #[must_use]
    pub const fn is_element(&self) -> bool {
        matches!(self.kind(), NodeKind::Element)
    }

    /// Tag name for an element, data for text and comments, name for a doctype.
    #[must_use]
    pub const fn label(&self) -> &'a str {
        self.label
    }

    /// The failure policy inherited from the document.
    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.document.policy()
    }

    fn tree(&self) -> &'a DomTree {
        self.document.tree()
    }

    fn report<T>(&self, result: Result<T, QueryError>) -> Result<T, QueryError> {
        self.policy().report(result)
    }

    /// Turn an optional link into a handle or a `NotFound` error.
    fn follow(
        &self,
        link: Option<NodeId>,
        operation: &'static str,
        what: &str,
    ) -> Result<Self, QueryError> {
        let result = link
            .map(|id| Self::new(self.document, id))
            .ok_or_else(|| QueryError::not_found(operation, what));
        self.report(result)
    }

    fn wrong_type(&self, operation: &'static str) -> QueryError {
        QueryError::WrongNodeType {
            operation,
            expected: NodeKind::Element,
            found: self.kind(),
        }
    }

    // ========== Navigation ==========

    /// The parent node. The root element's parent is the document node.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] on the document node.
    pub fn parent(&self) -> Result<Self, QueryError> {
        self.follow(self.node.parent, "parent", "parent")
    }

    /// The first child node of any kind.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] if there are no children.
    pub fn first_child(&self) -> Result<Self, QueryError> {
        self.follow(self.node.children.first().copied(), "first_child", "first child")
    }

    /// The last child node of any kind.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] if there are no children.
    pub fn last_child(&self) -> Result<Self, QueryError> {
        self.follow(self.node.children.last().copied(), "last_child", "last child")
    }

    /// The next sibling node of any kind.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] on a last child.
    pub fn next_sibling(&self) -> Result<Self, QueryError> {
        self.follow(self.node.next_sibling, "next_sibling", "next sibling")
    }

    /// The previous sibling node of any kind.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] on a first child.
    pub fn prev_sibling(&self) -> Result<Self, QueryError> {
        self.follow(self.node.prev_sibling, "prev_sibling", "previous sibling")
    }

    /// [§ 4.2.7 nextElementSibling](https://dom.spec.whatwg.org/#dom-nondocumenttypechildnode-nextelementsibling)
    ///
    /// "Returns the first following sibling that is an element, and null otherwise."
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] if no later sibling is an element.
    pub fn next_element_sibling(&self) -> Result<Self, QueryError> {
        let tree = self.tree();
        let sibling = tree
            .following_siblings(self.id)
            .find(|&id| tree.kind(id) == Some(NodeKind::Element));
        self.follow(sibling, "next_element_sibling", "next element sibling")
    }

    /// [§ 4.2.7 previousElementSibling](https://dom.spec.whatwg.org/#dom-nondocumenttypechildnode-previouselementsibling)
    ///
    /// "Returns the first preceding sibling that is an element, and null otherwise."
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] if no earlier sibling is an element.
    pub fn prev_element_sibling(&self) -> Result<Self, QueryError> {
        let tree = self.tree();
        let sibling = tree
            .preceding_siblings(self.id)
            .find(|&id| tree.kind(id) == Some(NodeKind::Element));
        self.follow(sibling, "prev_element_sibling", "previous element sibling")
    }

    /// All direct children, in order.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.node
            .children
            .iter()
            .map(|&id| Self::new(self.document, id))
            .collect()
    }

    // ========== Search ==========

    /// The first matching element below this node, in depth-first pre-order.
    /// This node itself is never a candidate.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] if nothing matches.
    pub fn find(&self, query: impl Into<Query>) -> Result<Self, QueryError> {
        let query = query.into();
        let result = search::find_first(self.tree(), self.id, &query)
            .map(|id| Self::new(self.document, id))
            .ok_or_else(|| QueryError::not_found("find", query.to_string()));
        self.report(result)
    }

    /// Every matching element below this node, in depth-first pre-order.
    /// This node itself is never a candidate.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] if nothing matches; the result is never an
    /// empty list.
    pub fn find_all(&self, query: impl Into<Query>) -> Result<Vec<Self>, QueryError> {
        let query = query.into();
        let matches: Vec<Self> = search::find_all(self.tree(), self.id, &query)
            .into_iter()
            .map(|id| Self::new(self.document, id))
            .collect();
        let result = if matches.is_empty() {
            Err(QueryError::not_found("find_all", query.to_string()))
        } else {
            Ok(matches)
        };
        self.report(result)
    }

    // ========== Extraction ==========

    /// The element's attributes. Repeated names keep their first value.
    /// An element without attributes gives an empty map.
    ///
    /// # Errors
    ///
    /// [`QueryError::WrongNodeType`] if this is not an element.
    pub fn attrs(&self) -> Result<AttributesMap, QueryError> {
        let result = match self.tree().as_element(self.id) {
            Some(element) => {
                let mut map = AttributesMap::with_capacity(element.attrs.len());
                for attr in &element.attrs {
                    let _ = map
                        .entry(attr.name.clone())
                        .or_insert_with(|| attr.value.clone());
                }
                Ok(map)
            }
            None => Err(self.wrong_type("attrs")),
        };
        self.report(result)
    }

    /// The value of one attribute, first occurrence wins.
    ///
    /// # Errors
    ///
    /// [`QueryError::WrongNodeType`] if this is not an element,
    /// [`QueryError::NotFound`] if the attribute is absent.
    pub fn attr(&self, name: &str) -> Result<&'a str, QueryError> {
        let result = match self.tree().as_element(self.id) {
            Some(element) => element
                .get_attribute(name)
                .ok_or_else(|| QueryError::not_found("attr", format!("attribute `{name}`"))),
            None => Err(self.wrong_type("attr")),
        };
        self.report(result)
    }

    /// The first direct text child that is not pure whitespace, verbatim.
    ///
    /// Only direct children are looked at. Whitespace-only text (spaces,
    /// tabs, line feeds, form feeds, carriage returns) and non-text children
    /// are skipped. Nothing is trimmed or joined.
    ///
    /// # Errors
    ///
    /// [`QueryError::NotFound`] if there is no such child.
    pub fn text(&self) -> Result<&'a str, QueryError> {
        let result = self
            .text_if_any()
            .ok_or_else(|| QueryError::not_found("text", "text node"));
        self.report(result)
    }

    /// Same lookup as [`Handle::text`], for callers to whom a missing text
    /// child is not a failure. Never reported to the log.
    #[must_use]
    pub fn text_if_any(&self) -> Option<&'a str> {
        let tree = self.tree();
        self.node
            .children
            .iter()
            .filter_map(|&id| tree.as_text(id))
            .find(|data| !is_blank(data))
    }
}

/// One or more whitespace characters and nothing else.
fn is_blank(data: &str) -> bool {
    !data.is_empty() && data.chars().all(|c| c.is_ascii_whitespace())
}

impl fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("label", &self.label)
            .finish()
    }
}

impl PartialEq for Handle<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for Handle<'_> {}
