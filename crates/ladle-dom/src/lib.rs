//! The node model ladle queries run against.
//!
//! A [`DomTree`] owns every node of one parsed document in a single arena.
//! Nodes refer to each other by [`NodeId`], so a parent link is a plain index
//! and there is no reference cycle to break. Trees are built once (by the
//! HTML parser or by hand in tests) and are read-only from then on.
//!
//! The vocabulary follows the [DOM Living Standard](https://dom.spec.whatwg.org/),
//! trimmed down to what tag and attribute queries need.

use core::ops::Index;

use strum_macros::Display;

/// Index of a node in its [`DomTree`].
///
/// Ids are only meaningful for the tree that handed them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node. Every tree starts with it.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// One slot in the arena: what the node is, plus its four structural links.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub node_type: NodeType,
    /// `None` for the document node and for nodes not yet attached.
    pub parent: Option<NodeId>,
    /// Direct children in document order.
    pub children: Vec<NodeId>,
    /// The node right after this one under the same parent.
    pub next_sibling: Option<NodeId>,
    /// The node right before this one under the same parent.
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// A node's type together with the data that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The document itself, always [`NodeId::ROOT`].
    Document,
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    Doctype(DoctypeData),
    /// A tag name and its attributes.
    Element(ElementData),
    /// Character data, stored as parsed (entities already decoded).
    Text(String),
    /// The body of a `<!-- ... -->` comment.
    Comment(String),
}

impl NodeType {
    /// Drop the payload.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Doctype(_) => NodeKind::Doctype,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
        }
    }
}

/// A [`NodeType`] without its payload. Displays in lowercase, which is the
/// form error messages use ("an element node").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    /// See [`NodeType::Document`].
    Document,
    /// See [`NodeType::Doctype`].
    Doctype,
    /// See [`NodeType::Element`].
    Element,
    /// See [`NodeType::Text`].
    Text,
    /// See [`NodeType::Comment`].
    Comment,
}

/// Name and identifiers of a `<!DOCTYPE>`.
///
/// Only `name` shows up in queries (as the node's label); the identifiers are
/// kept for tree dumps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctypeData {
    /// Usually `html`.
    pub name: String,
    /// The `PUBLIC` identifier, if one was given.
    pub public_id: Option<String>,
    /// The `SYSTEM` identifier, if one was given.
    pub system_id: Option<String>,
}

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased by the tokenizer.
    pub name: String,
    /// Entities already decoded.
    pub value: String,
}

impl Attribute {
    /// A `name="value"` pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The tag name and attribute list of an element.
///
/// NOTE: `attrs` is kept exactly as written in the markup, in order and with
/// repeated names left in. Callers pick their own rule for repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase local name, e.g. `div`.
    pub tag_name: String,
    /// Attributes in source order.
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    /// An element called `tag_name` carrying `attrs`.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
        }
    }

    /// Value of the first attribute called `name`, if any.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Whether any attribute has exactly this name and value.
    ///
    /// Every attribute is checked, including repeats of the same name.
    #[must_use]
    pub fn has_attribute_value(&self, name: &str, value: &str) -> bool {
        self.attrs
            .iter()
            .any(|attr| attr.name == name && attr.value == value)
    }
}

/// [§ 4.2 Node tree](https://dom.spec.whatwg.org/#node-trees)
///
/// Arena of [`Node`]s. Slot 0 is the document node; every other node is
/// pushed by [`DomTree::alloc`] and wired in by [`DomTree::append_child`].
///
/// Lookups with an id from another tree return `None` (or an empty slice)
/// rather than panicking, except through [`Index`].
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// A tree holding only the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
        }
    }

    /// Always [`NodeId::ROOT`].
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The node at `id`, or `None` if the id is out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable access for tree builders.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes, the document node included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for a tree made by [`DomTree::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Push a detached node and hand back its id.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        self.nodes.push(Node::detached(node_type));
        NodeId(self.nodes.len() - 1)
    }

    /// [§ 4.2.3 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Attach `child` after the current last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either id was not allocated by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let previous = self.last_child(parent);
        if let Some(previous) = previous {
            self.nodes[previous.0].next_sibling = Some(child);
        }

        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.prev_sibling = previous;
        self.nodes[parent.0].children.push(child);
    }

    /// The type and payload of a node.
    #[must_use]
    pub fn node_type(&self, id: NodeId) -> Option<&NodeType> {
        self.get(id).map(|node| &node.node_type)
    }

    /// The payload-free kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node_type(id).map(NodeType::kind)
    }

    fn link(&self, id: NodeId, pick: impl FnOnce(&Node) -> Option<NodeId>) -> Option<NodeId> {
        self.get(id).and_then(pick)
    }

    /// `None` for the document node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |node| node.parent)
    }

    /// Direct children in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| &node.children)
    }

    /// Leftmost child.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Rightmost child.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// The node right after `id` under the same parent.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |node| node.next_sibling)
    }

    /// The node right before `id` under the same parent.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |node| node.prev_sibling)
    }

    /// Siblings after `id`, nearest first.
    #[must_use]
    pub fn following_siblings(&self, id: NodeId) -> SiblingIterator<'_> {
        SiblingIterator {
            tree: self,
            current: self.next_sibling(id),
            direction: Direction::Forward,
        }
    }

    /// Siblings before `id`, nearest first.
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> SiblingIterator<'_> {
        SiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
            direction: Direction::Backward,
        }
    }

    /// Parent, grandparent, and so on up to the document node.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Everything below `id` in tree order, which is a depth-first pre-order
    /// walk. `id` itself is not included.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut pending = self.children(id).to_vec();
        pending.reverse();
        DescendantIterator {
            tree: self,
            pending,
        }
    }

    /// Element payload, if `id` is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match self.node_type(id)? {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Character data, if `id` is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match self.node_type(id)? {
            NodeType::Text(data) => Some(data),
            _ => None,
        }
    }

    /// The one string that names a node: the tag name of an element, the data of
    /// a text or comment node, the name of a doctype, and the empty string
    /// for the document.
    #[must_use]
    pub fn label(&self, id: NodeId) -> &str {
        match self.node_type(id) {
            Some(NodeType::Element(data)) => &data.tag_name,
            Some(NodeType::Text(data) | NodeType::Comment(data)) => data,
            Some(NodeType::Doctype(data)) => &data.name,
            Some(NodeType::Document) | None => "",
        }
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// The first element directly under the document node, if any.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.as_element(id).is_some())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Panics if `id` does not belong to this tree; use [`DomTree::get`] when
/// that is possible.
impl Index<NodeId> for DomTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// See [`DomTree::ancestors`].
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current.take()?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// See [`DomTree::following_siblings`] and [`DomTree::preceding_siblings`].
pub struct SiblingIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
    direction: Direction,
}

impl Iterator for SiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current.take()?;
        self.current = match self.direction {
            Direction::Forward => self.tree.next_sibling(id),
            Direction::Backward => self.tree.prev_sibling(id),
        };
        Some(id)
    }
}

/// See [`DomTree::descendants`].
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    /// Reversed, so the next node to visit is at the end.
    pending: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.pending.pop()?;
        self.pending
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
