//! Tagged HTML tree
//!
//! The tree owns its children outright: every [`Element`] holds an ordered
//! list of child [`Node`]s and there are no parent back-references. Nodes are
//! addressed by a [`NodePath`], the chain of child indices from the document.

/// Chain of child indices leading from the document to a node
pub type NodePath = Vec<usize>;

/// A single HTML attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name (lowercase as produced by the parser)
    pub name: String,
    /// Attribute value, empty for boolean attributes
    pub value: String,
}

impl Attribute {
    /// Create an attribute
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element with its attributes (in source order) and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Value of an attribute, if present
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Whether the attribute is present
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing the value in place if it already exists
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.attributes.iter_mut().find(|a| a.name == name) {
            existing.value = value.to_string();
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(pos).value)
    }

    /// Concatenated text of all descendant text nodes
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
            Node::Comment(_) => {},
        }
    }
}

/// A node of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element and its subtree
    Element(Element),
    /// Character data
    Text(String),
    /// An HTML comment (`<!-- ... -->`)
    Comment(String),
}

impl Node {
    /// Create a text node
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// The element, if this node is one
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// The element, mutably, if this node is one
    pub const fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// An ordered list of top-level nodes
///
/// A parsed page has a single `<html>` root; a selected subtree is wrapped
/// into a document with that element as its only root. Annotations are
/// appended as further roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level nodes
    pub children: Vec<Node>,
}

impl Document {
    /// Wrap a single element as the document root
    #[must_use]
    pub fn from_element(root: Element) -> Self {
        Self {
            children: vec![Node::Element(root)],
        }
    }

    /// Node at `path`, if the path is valid
    #[must_use]
    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get(*first)?;
        for &idx in rest {
            node = node.as_element()?.children.get(idx)?;
        }
        Some(node)
    }

    /// Mutable node at `path`, if the path is valid
    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for &idx in rest {
            node = node.as_element_mut()?.children.get_mut(idx)?;
        }
        Some(node)
    }

    /// Detach and return the node at `path`
    pub fn remove(&mut self, path: &[usize]) -> Option<Node> {
        let (last, parent) = path.split_last()?;
        let siblings = if parent.is_empty() {
            &mut self.children
        } else {
            &mut self.node_mut(parent)?.as_element_mut()?.children
        };
        (*last < siblings.len()).then(|| siblings.remove(*last))
    }

    /// Remove every node in `paths`
    ///
    /// Paths must not nest (no path may be a prefix of another). They are
    /// applied in reverse document order so earlier indices stay valid.
    pub fn remove_all(&mut self, mut paths: Vec<NodePath>) -> usize {
        paths.sort_unstable();
        paths.dedup();
        paths.iter().rev().filter(|path| self.remove(path).is_some()).count()
    }
}
