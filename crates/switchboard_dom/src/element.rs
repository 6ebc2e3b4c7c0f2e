//! Element data stored in the document arena

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::tree::NodeId;

/// Page-space bounding box of an element, as `getBoundingClientRect` reports it
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Horizontal center line
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

impl From<[f32; 4]> for Rect {
    fn from(v: [f32; 4]) -> Self {
        Rect::new(v[0], v[1], v[2], v[3])
    }
}

/// A single element in the document tree
///
/// The `class` attribute is mirrored from the class list on every change so
/// attribute selectors and class selectors always agree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) classes: SmallVec<[String; 4]>,
    pub(crate) attrs: IndexMap<String, String>,
    pub(crate) style: IndexMap<String, String>,
    pub(crate) text: Option<String>,
    pub(crate) rect: Rect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: SmallVec::new(),
            attrs: IndexMap::new(),
            style: IndexMap::new(),
            text: None,
            rect: Rect::ZERO,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Lowercase tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if the class list changed
    pub(crate) fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        self.sync_class_attr();
        true
    }

    /// Returns true if the class list changed
    pub(crate) fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        if self.classes.len() == before {
            return false;
        }
        self.sync_class_attr();
        true
    }

    pub(crate) fn set_class_list(&mut self, value: &str) {
        self.classes.clear();
        for class in value.split_whitespace() {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
        self.sync_class_attr();
    }

    fn sync_class_attr(&mut self) {
        if self.classes.is_empty() {
            self.attrs.shift_remove("class");
        } else {
            self.attrs
                .insert("class".to_string(), self.classes.join(" "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_mirrors_attribute() {
        let mut node = Node::new("DIV");
        assert_eq!(node.tag(), "div");

        assert!(node.add_class("modal"));
        assert!(!node.add_class("modal"));
        assert!(node.add_class("show"));
        assert_eq!(node.attr("class"), Some("modal show"));

        assert!(node.remove_class("modal"));
        assert!(!node.remove_class("modal"));
        assert_eq!(node.attr("class"), Some("show"));

        node.remove_class("show");
        assert_eq!(node.attr("class"), None);
    }

    #[test]
    fn test_set_class_list_dedups() {
        let mut node = Node::new("span");
        node.set_class_list("  nav-link active  nav-link ");
        assert_eq!(node.classes(), &["nav-link".to_string(), "active".to_string()]);
        assert_eq!(node.attr("class"), Some("nav-link active"));
    }

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.center_x(), 60.0);
        assert!(rect.contains_point(10.0, 20.0));
        assert!(!rect.contains_point(110.0, 20.0));
    }
}
