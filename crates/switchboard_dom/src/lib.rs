//! Switchboard Headless Document
//!
//! A small element tree standing in for the browser DOM:
//!
//! - **Document**: slotmap arena of elements with class lists, attributes,
//!   inline style, text and a page-space bounding box
//! - **Selectors**: a CSS subset (`#id`, `.class`, `[attr=value]`, combinators,
//!   lists) used by markup to reference widget targets
//! - **Markup**: JSON element specs for authoring pages and test fixtures
//!
//! # Example
//!
//! ```rust
//! use switchboard_dom::{Document, NodeSpec};
//!
//! let doc = Document::from_specs(&[
//!     NodeSpec::new("button").id("save").class("btn"),
//!     NodeSpec::new("div").class("modal").id("confirm"),
//! ]);
//!
//! let modals = doc.select_str(".modal").unwrap();
//! assert_eq!(modals, vec![doc.get_element_by_id("confirm").unwrap()]);
//! ```

pub mod element;
pub mod error;
pub mod markup;
pub mod selector;
pub mod tree;

pub use element::{Node, Rect};
pub use error::{DomError, Result};
pub use markup::NodeSpec;
pub use selector::Selector;
pub use tree::{Document, NodeId};
