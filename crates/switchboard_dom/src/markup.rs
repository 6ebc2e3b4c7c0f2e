//! JSON markup for building documents
//!
//! Widget pages are authored as a tree of element specs and loaded under
//! `<body>`. Layout is not computed; an element's bounding box is whatever
//! its `rect` says (`[x, y, width, height]`), which is all the tooltip
//! positioning needs.
//!
//! ```json
//! [
//!   { "tag": "button", "class": "dropdown-toggle", "text": "Menu" },
//!   { "class": "dropdown-menu", "children": [{ "tag": "a", "text": "One" }] }
//! ]
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::element::Rect;
use crate::error::Result;
use crate::tree::{Document, NodeId};

fn default_tag() -> String {
    "div".to_string()
}

/// Declarative description of one element and its subtree
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NodeSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Space-separated class list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub style: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self::new(default_tag())
    }
}

impl NodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            class: None,
            attrs: IndexMap::new(),
            style: IndexMap::new(),
            text: None,
            rect: None,
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.rect = Some([x, y, width, height]);
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

impl Document {
    /// Build a document whose body holds the given elements
    pub fn from_specs(specs: &[NodeSpec]) -> Self {
        let mut doc = Document::new();
        let body = doc.body();
        for spec in specs {
            doc.append_spec(body, spec);
        }
        doc
    }

    /// Decode a JSON array of element specs into a new document
    pub fn from_json(input: &str) -> Result<Self> {
        let specs: Vec<NodeSpec> = serde_json::from_str(input)?;
        Ok(Self::from_specs(&specs))
    }

    /// Build `spec` and append it under `parent`, returning the new element
    pub fn append_spec(&mut self, parent: NodeId, spec: &NodeSpec) -> NodeId {
        let node = self.create_element(&spec.tag);
        if let Some(id) = &spec.id {
            self.set_attr(node, "id", id);
        }
        if let Some(class) = &spec.class {
            self.set_attr(node, "class", class);
        }
        for (name, value) in &spec.attrs {
            self.set_attr(node, name, value);
        }
        for (property, value) in &spec.style {
            self.set_style(node, property, value);
        }
        if let Some(text) = &spec.text {
            self.set_text(node, text.clone());
        }
        if let Some(rect) = spec.rect {
            self.set_rect(node, Rect::from(rect));
        }
        self.append_child(parent, node);
        for child in &spec.children {
            self.append_spec(node, child);
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_json() {
        let doc = Document::from_json(
            r##"[
                {"tag": "button", "id": "open", "class": "btn btn-primary",
                 "attrs": {"data-toggle": "modal", "data-target": "#m1"},
                 "rect": [10, 20, 80, 30]},
                {"id": "m1", "class": "modal", "style": {"display": "none"},
                 "children": [{"tag": "p", "text": "Hello"}]}
            ]"##,
        )
        .unwrap();

        let open = doc.get_element_by_id("open").unwrap();
        assert_eq!(doc.get(open).map(|n| n.tag()), Some("button"));
        assert!(doc.has_class(open, "btn-primary"));
        assert_eq!(doc.attr(open, "data-target"), Some("#m1"));
        assert_eq!(doc.bounding_rect(open), Rect::new(10.0, 20.0, 80.0, 30.0));

        let modal = doc.get_element_by_id("m1").unwrap();
        assert_eq!(doc.get(modal).map(|n| n.tag()), Some("div"));
        assert_eq!(doc.style(modal, "display"), Some("none"));
        let para = doc.children(modal)[0];
        assert_eq!(doc.text(para), Some("Hello"));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(matches!(
            Document::from_json("{not json"),
            Err(crate::DomError::Markup(_))
        ));
    }

    #[test]
    fn test_builder_matches_json() {
        let built = NodeSpec::new("ul")
            .class("nav-tabs")
            .child(NodeSpec::new("a").class("nav-link active").attr("href", "#a"));
        let decoded: NodeSpec = serde_json::from_str(
            r##"{"tag": "ul", "class": "nav-tabs",
                "children": [{"tag": "a", "class": "nav-link active", "attrs": {"href": "#a"}}]}"##,
        )
        .unwrap();
        assert_eq!(built, decoded);
    }
}
