//! Document tree management
//!
//! All elements live in a `SlotMap` arena and are referenced by `NodeId`.
//! Removed nodes leave stale handles behind; every accessor treats a stale
//! handle as "no such element" rather than panicking.

use slotmap::{new_key_type, Key, KeyData, SlotMap};
use tracing::trace;

use crate::element::{Node, Rect};
use crate::selector::Selector;

new_key_type! {
    /// Handle to an element in a [`Document`]
    pub struct NodeId;
}

impl NodeId {
    /// Stable integer form, used as the event target key
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    pub fn from_raw(raw: u64) -> Self {
        NodeId::from(KeyData::from_ffi(raw))
    }
}

/// A headless element tree rooted at `<html>` with a `<body>` child
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    body: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("html"));
        let mut body_node = Node::new("body");
        body_node.parent = Some(root);
        let body = nodes.insert(body_node);
        if let Some(html) = nodes.get_mut(root) {
            html.children.push(body);
        }
        Self { nodes, root, body }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of live elements, including `<html>` and `<body>`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether the handle refers to a live element
    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether the element is attached under the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::new(tag))
    }

    /// Append `child` as the last child of `parent`, detaching it first
    ///
    /// Refuses (returns false) when either handle is stale or when the move
    /// would make an element its own ancestor.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.exists(parent) || !self.exists(child) || self.contains(child, parent) {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Remove an element and its subtree, returning every removed handle
    ///
    /// `<html>` and `<body>` cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        if id == self.root || id == self.body || !self.exists(id) {
            return Vec::new();
        }
        self.detach(id);
        let mut removed = vec![id];
        removed.extend(self.descendants(id));
        for node in &removed {
            self.nodes.remove(*node);
        }
        trace!(count = removed.len(), "removed subtree");
        removed
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn sibling(&self, id: NodeId, offset: isize) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|c| *c == id)? as isize + offset;
        if index < 0 {
            return None;
        }
        siblings.get(index as usize).copied()
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling(id, 1)
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling(id, -1)
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// The element itself followed by its ancestors
    pub fn ancestors_inclusive(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.exists(id).then_some(id),
        }
    }

    /// Descendants of `id` in document (pre-)order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Whether `node` is `ancestor` or lies inside it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors_inclusive(node).any(|a| a == ancestor)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    // =========================================================================
    // Class list
    // =========================================================================

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes.get(id).is_some_and(|n| n.has_class(class))
    }

    /// Returns true if the class was added
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.nodes.get_mut(id).is_some_and(|n| n.add_class(class))
    }

    /// Returns true if the class was removed
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.nodes.get_mut(id).is_some_and(|n| n.remove_class(class))
    }

    /// Flip a class, returning whether it is now present
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        let present = !self.has_class(id, class);
        self.set_class(id, class, present);
        present
    }

    /// Force a class on or off (`classList.toggle(class, force)`)
    pub fn set_class(&mut self, id: NodeId, class: &str, present: bool) {
        if present {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    // =========================================================================
    // Attributes, style, content
    // =========================================================================

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if name == "class" {
            node.set_class_list(value);
        } else {
            node.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if name == "class" {
            node.set_class_list("");
        } else {
            node.attrs.shift_remove(name);
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.style(property))
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn remove_style(&mut self, id: NodeId, property: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.style.shift_remove(property);
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.text())
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.text = Some(text.into());
        }
    }

    pub fn bounding_rect(&self, id: NodeId) -> Rect {
        self.nodes.get(id).map(|n| n.rect).unwrap_or_default()
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.rect = rect;
        }
    }

    // =========================================================================
    // Selector queries
    // =========================================================================

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.exists(id) && selector.matches(self, id)
    }

    /// First descendant of `scope` matching the selector
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| selector.matches(self, *n))
    }

    /// All descendants of `scope` matching the selector, in document order
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| selector.matches(self, *n))
            .collect()
    }

    /// Document-wide query, including the root element
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        if selector.matches(self, self.root) {
            out.push(self.root);
        }
        out.extend(self.query_selector_all(self.root, selector));
        out
    }

    /// Parse and run a document-wide query
    pub fn select_str(&self, selector: &str) -> crate::Result<Vec<NodeId>> {
        Ok(self.select(&Selector::parse(selector)?))
    }

    /// Nearest inclusive ancestor matching the selector
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        self.ancestors_inclusive(id)
            .find(|n| selector.matches(self, *n))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over an element's ancestor chain
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}
