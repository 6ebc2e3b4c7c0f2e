//! CSS-subset selectors
//!
//! Supports what widget markup actually uses to reference targets:
//!
//! - type and universal selectors: `div`, `*`
//! - `#id`, `.class`
//! - attribute presence and equality: `[data-toggle]`, `[data-toggle="modal"]`
//! - descendant (`a b`) and child (`a > b`) combinators
//! - selector lists: `.nav-tabs, .nav-pills`
//!
//! Matching runs right-to-left, starting from the candidate element and
//! walking towards the root for each combinator.
//!
//! # Example
//!
//! ```rust
//! use switchboard_dom::{Document, Selector};
//!
//! let mut doc = Document::new();
//! let nav = doc.create_element("ul");
//! doc.add_class(nav, "nav-tabs");
//! let link = doc.create_element("a");
//! doc.set_attr(link, "data-toggle", "tab");
//! doc.append_child(doc.body(), nav);
//! doc.append_child(nav, link);
//!
//! let selector = Selector::parse(".nav-tabs > [data-toggle=\"tab\"]").unwrap();
//! assert_eq!(doc.select(&selector), vec![link]);
//! ```

mod parser;

use crate::error::{DomError, Result};
use crate::tree::{Document, NodeId};

/// A parsed selector list
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators
///
/// Each segment carries the combinator that links it to the *next* segment;
/// the last segment (the one matched against the candidate) carries `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexSelector {
    pub segments: Vec<(CompoundSelector, Option<Combinator>)>,
}

/// Simple selectors that must all match the same element
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundSelector {
    pub parts: Vec<SelectorPart>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorPart {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: any ancestor
    Descendant,
    /// `>`: the direct parent
    Child,
}

impl Selector {
    /// Parse selector text
    pub fn parse(input: &str) -> Result<Self> {
        let alternatives =
            parser::parse_selector_list(input).map_err(|message| DomError::InvalidSelector {
                selector: input.to_string(),
                message,
            })?;
        Ok(Self {
            source: input.trim().to_string(),
            alternatives,
        })
    }

    /// The selector text as written (trimmed)
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn alternatives(&self) -> &[ComplexSelector] {
        &self.alternatives
    }

    /// Whether the element matches any alternative of the list
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|complex| complex.matches(doc, node))
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

impl ComplexSelector {
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        match self.segments.len() {
            0 => false,
            n => self.match_segment(doc, n - 1, node),
        }
    }

    fn match_segment(&self, doc: &Document, index: usize, node: NodeId) -> bool {
        if !self.segments[index].0.matches(doc, node) {
            return false;
        }
        if index == 0 {
            return true;
        }
        let combinator = self.segments[index - 1]
            .1
            .unwrap_or(Combinator::Descendant);
        match combinator {
            Combinator::Child => doc
                .parent(node)
                .is_some_and(|parent| self.match_segment(doc, index - 1, parent)),
            Combinator::Descendant => doc
                .ancestors(node)
                .any(|ancestor| self.match_segment(doc, index - 1, ancestor)),
        }
    }
}

impl CompoundSelector {
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(element) = doc.get(node) else {
            return false;
        };
        self.parts.iter().all(|part| match part {
            SelectorPart::Universal => true,
            SelectorPart::Tag(tag) => element.tag().eq_ignore_ascii_case(tag),
            SelectorPart::Id(id) => element.id() == Some(id.as_str()),
            SelectorPart::Class(class) => element.has_class(class),
            SelectorPart::Attribute { name, value } => match (element.attr(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// body > div.nav-tabs#tabs > [a.nav-link, a.nav-link(data-toggle=tab)] + section > p
    fn sample() -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let tabs = doc.create_element("div");
        doc.set_attr(tabs, "id", "tabs");
        doc.add_class(tabs, "nav-tabs");
        let first = doc.create_element("a");
        doc.add_class(first, "nav-link");
        let second = doc.create_element("a");
        doc.add_class(second, "nav-link");
        doc.set_attr(second, "data-toggle", "tab");
        let section = doc.create_element("section");
        let para = doc.create_element("p");

        let body = doc.body();
        doc.append_child(body, tabs);
        doc.append_child(tabs, first);
        doc.append_child(tabs, second);
        doc.append_child(body, section);
        doc.append_child(section, para);
        (doc, vec![tabs, first, second, section, para])
    }

    fn select(doc: &Document, selector: &str) -> Vec<NodeId> {
        doc.select(&Selector::parse(selector).unwrap())
    }

    #[test]
    fn test_simple_selectors() {
        let (doc, n) = sample();
        assert_eq!(select(&doc, "#tabs"), vec![n[0]]);
        assert_eq!(select(&doc, ".nav-link"), vec![n[1], n[2]]);
        assert_eq!(select(&doc, "section"), vec![n[3]]);
        assert_eq!(select(&doc, "P"), vec![n[4]]);
        assert_eq!(select(&doc, "[data-toggle]"), vec![n[2]]);
        assert_eq!(select(&doc, "[data-toggle=\"tab\"]"), vec![n[2]]);
        assert_eq!(select(&doc, "[data-toggle='tab']"), vec![n[2]]);
        assert_eq!(select(&doc, "[data-toggle=tab]"), vec![n[2]]);
        assert!(select(&doc, "[data-toggle=modal]").is_empty());
    }

    #[test]
    fn test_compound_selectors() {
        let (doc, n) = sample();
        assert_eq!(select(&doc, "a.nav-link[data-toggle]"), vec![n[2]]);
        assert_eq!(select(&doc, "div#tabs.nav-tabs"), vec![n[0]]);
        assert!(select(&doc, "span.nav-link").is_empty());
    }

    #[test]
    fn test_combinators() {
        let (doc, n) = sample();
        assert_eq!(select(&doc, "#tabs > .nav-link"), vec![n[1], n[2]]);
        assert_eq!(select(&doc, "body p"), vec![n[4]]);
        assert!(select(&doc, "body > p").is_empty());
        assert_eq!(select(&doc, "html   section>p"), vec![n[4]]);
    }

    #[test]
    fn test_selector_list() {
        let (doc, n) = sample();
        assert_eq!(select(&doc, "p , #tabs"), vec![n[0], n[4]]);
        let list = Selector::parse(".nav-tabs, .nav-pills").unwrap();
        assert_eq!(list.alternatives().len(), 2);
        assert_eq!(doc.closest(n[2], &list), Some(n[0]));
    }

    #[test]
    fn test_universal() {
        let (doc, _) = sample();
        assert_eq!(select(&doc, "*").len(), doc.len());
        assert_eq!(select(&doc, "#tabs > *").len(), 2);
    }

    #[test]
    fn test_invalid_selectors() {
        for bad in ["", "#", ".", "a >", "[data-x", "a,,b", "##id", "a {"] {
            assert!(
                matches!(Selector::parse(bad), Err(DomError::InvalidSelector { .. })),
                "selector {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_keeps_source() {
        let selector: Selector = "  #modal-1 ".parse().unwrap();
        assert_eq!(selector.to_string(), "#modal-1");
    }
}
