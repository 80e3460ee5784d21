//! # Document Tree
//!
//! A minimal mutable document tree the scaling engine reads and patches.
//! Pages arrive as rendered markup; the engine only needs a small slice of
//! that surface: tags, attributes, CSS classes, text content and
//! child/sibling structure. Nodes live in a flat arena and are addressed
//! by copyable [`NodeId`]s, so units can hold references into the tree
//! without borrowing it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a node within its [`Document`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

/// Node variants: elements carry structure, text nodes carry content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Element,
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    kind: NodeKind,
    tag: String,
    attrs: HashMap<String, String>,
    classes: Vec<String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element,
            tag: tag.to_lowercase(),
            attrs: HashMap::new(),
            classes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    fn text(content: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            tag: String::new(),
            attrs: HashMap::new(),
            classes: Vec::new(),
            text: content.to_string(),
            children: Vec::new(),
            parent: None,
        }
    }
}

/// Arena-owned document tree with a fixed `body` root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document holding only the root element
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::element("body")],
        }
    }

    /// The root element; always present
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element node
    pub fn new_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::element(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Create a detached text node
    pub fn new_text(&mut self, content: &str) -> NodeId {
        self.nodes.push(Node::text(content));
        NodeId(self.nodes.len() - 1)
    }

    /// Append an existing node as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Create an element and append it to `parent`
    pub fn push_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.new_element(tag);
        self.append(parent, id);
        id
    }

    /// Create a text node and append it to `parent`
    pub fn push_text(&mut self, parent: NodeId, content: &str) -> NodeId {
        let id = self.new_text(content);
        self.append(parent, id);
        id
    }

    /// Insert `node` into `target`'s parent immediately after `target`
    pub fn insert_after(&mut self, target: NodeId, node: NodeId) {
        let parent = match self.nodes[target.0].parent {
            Some(p) => p,
            None => return,
        };
        self.detach(node);
        self.nodes[node.0].parent = Some(parent);
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == target)
            .map(|p| p + 1)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[parent.0].children.insert(pos, node);
    }

    /// Detach a node from its parent; the node and its subtree stay in the
    /// arena and can be re-appended elsewhere
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// Lowercased tag name; empty for text nodes
    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    /// Whether this node is a list container (`ul` or `ol`)
    pub fn is_list(&self, id: NodeId) -> bool {
        matches!(self.tag(id), "ul" | "ol")
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The sibling immediately following `id`, if any
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.nodes[id.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.nodes[id.0].attrs.contains_key(name)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            self.nodes[id.0].classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.nodes[id.0].classes.retain(|c| c != class);
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|c| c == class)
    }

    /// Aggregate text of the node and its whole subtree, in document order
    pub fn text_content(&self, id: NodeId) -> String {
        let node = &self.nodes[id.0];
        match node.kind {
            NodeKind::Text => node.text.clone(),
            NodeKind::Element => {
                let mut out = String::new();
                for &child in &node.children {
                    out.push_str(&self.text_content(child));
                }
                out
            }
        }
    }

    /// Replace a node's textual content. Text nodes have their content
    /// swapped in place; elements have their children replaced by a single
    /// fresh text node, mirroring a `textContent` assignment.
    pub fn set_text_content(&mut self, id: NodeId, content: &str) {
        match self.nodes[id.0].kind {
            NodeKind::Text => self.nodes[id.0].text = content.to_string(),
            NodeKind::Element => {
                let old_children = std::mem::take(&mut self.nodes[id.0].children);
                for child in old_children {
                    self.nodes[child.0].parent = None;
                }
                let text = self.new_text(content);
                self.nodes[text.0].parent = Some(id);
                self.nodes[id.0].children.push(text);
            }
        }
    }

    /// All nodes below `id` in preorder, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            for &child in self.children(next).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Whether any descendant of `id` is a list container
    pub fn contains_list(&self, id: NodeId) -> bool {
        self.descendants(id).iter().any(|&d| self.is_list(d))
    }

    /// First attached node carrying the given class, in document order
    pub fn find_by_class(&self, class: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&d| self.has_class(d, class))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
