//! Hover tooltips
//!
//! A tooltip exists only between pointer-enter and pointer-leave. The bubble
//! is appended to `<body>` and placed above its trigger, horizontally
//! centred, `tooltip_gap` pixels clear of the trigger's top edge. At most one
//! bubble exists at a time; showing a new one removes the previous one
//! first.

use switchboard_dom::{NodeId, Rect};
use tracing::{debug, trace};

use crate::engine::Engine;

/// Measures rendered tooltip text
///
/// The document has no layout engine, so the bubble's size comes from
/// here instead of from the rendered element.
pub trait TextMeasure {
    /// Width and height of the bubble holding `text`
    fn measure(&self, text: &str) -> (f32, f32);
}

/// Fixed-advance estimate: every character is `char_width` wide and every
/// line `line_height` tall, plus padding on both sides
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f32,
    pub line_height: f32,
    pub padding_x: f32,
    pub padding_y: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 16.0,
            padding_x: 8.0,
            padding_y: 4.0,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str) -> (f32, f32) {
        let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let lines = text.lines().count().max(1);
        (
            columns as f32 * self.char_width + 2.0 * self.padding_x,
            lines as f32 * self.line_height + 2.0 * self.padding_y,
        )
    }
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> (f32, f32),
{
    fn measure(&self, text: &str) -> (f32, f32) {
        self(text)
    }
}

/// Box for a `width` x `height` bubble above `anchor`
pub fn place_tooltip(anchor: Rect, width: f32, height: f32, gap: f32) -> Rect {
    Rect::new(
        anchor.left() + anchor.width / 2.0 - width / 2.0,
        anchor.top() - height - gap,
        width,
        height,
    )
}

/// The bubble currently shown and the trigger it belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveTooltip {
    pub bubble: NodeId,
    pub trigger: NodeId,
}

fn px(value: f32) -> String {
    format!("{value}px")
}

impl Engine {
    pub fn tooltip(&self) -> Option<ActiveTooltip> {
        self.tooltip
    }

    /// First non-empty text attribute of the trigger
    fn tooltip_text(&self, trigger: NodeId) -> Option<String> {
        self.conventions
            .raw
            .tooltip_text_attrs
            .iter()
            .filter_map(|attr| self.doc.attr(trigger, attr))
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// Show the tooltip for `trigger`, returning the new bubble
    ///
    /// Triggers without text show nothing.
    pub fn show_tooltip(&mut self, trigger: NodeId) -> Option<NodeId> {
        let Some(text) = self.tooltip_text(trigger) else {
            debug!("tooltip trigger without text");
            return None;
        };
        self.hide_tooltip();

        let raw = &self.conventions.raw;
        let body = self.doc.body();
        let bubble = self.doc.create_element("div");
        self.doc.set_attr(bubble, "class", &raw.tooltip_class);
        self.doc.set_attr(bubble, "role", "tooltip");
        let inner = self.doc.create_element("div");
        self.doc.set_attr(inner, "class", &raw.tooltip_inner_class);
        self.doc.set_text(inner, text.as_str());
        self.doc.append_child(bubble, inner);
        self.doc.append_child(body, bubble);

        let (width, height) = self.measure.measure(&text);
        let anchor = self.doc.bounding_rect(trigger);
        let rect = place_tooltip(anchor, width, height, self.config.tooltip_gap);
        self.doc.set_rect(bubble, rect);
        self.doc.set_style(bubble, "position", "absolute");
        self.doc.set_style(bubble, "top", &px(rect.top()));
        self.doc.set_style(bubble, "left", &px(rect.left()));
        self.doc
            .set_style(bubble, "z-index", &self.config.tooltip_z_index.to_string());

        self.tooltip = Some(ActiveTooltip { bubble, trigger });
        trace!(top = rect.top(), left = rect.left(), "tooltip shown");
        Some(bubble)
    }

    /// Remove the current bubble, returning whether there was one
    pub fn hide_tooltip(&mut self) -> bool {
        let Some(active) = self.tooltip.take() else {
            return false;
        };
        self.doc.remove(active.bubble);
        trace!("tooltip hidden");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use pretty_assertions::assert_eq;
    use switchboard_dom::{Document, NodeSpec};

    fn engine() -> Engine {
        let doc = Document::from_specs(&[
            NodeSpec::new("button")
                .id("a")
                .attr("data-toggle", "tooltip")
                .attr("title", "Save")
                .rect(100.0, 200.0, 80.0, 30.0),
            NodeSpec::new("button")
                .id("b")
                .attr("data-bs-toggle", "tooltip")
                .attr("data-bs-title", "Delete forever")
                .rect(300.0, 50.0, 40.0, 20.0),
            NodeSpec::new("button")
                .id("empty")
                .attr("data-toggle", "tooltip")
                .attr("title", "  "),
        ]);
        let mut engine = Engine::new(doc, EngineConfig::default())
            .with_measure(|_: &str| (60.0_f32, 24.0_f32));
        engine.init();
        engine
    }

    fn by_id(engine: &Engine, id: &str) -> NodeId {
        engine.document().get_element_by_id(id).unwrap()
    }

    fn bubbles(engine: &Engine) -> usize {
        engine.document().select_str(".tooltip").unwrap().len()
    }

    #[test]
    fn test_place_tooltip() {
        let anchor = Rect::new(100.0, 200.0, 80.0, 30.0);
        assert_eq!(
            place_tooltip(anchor, 60.0, 24.0, 5.0),
            Rect::new(110.0, 171.0, 60.0, 24.0)
        );
    }

    #[test]
    fn test_monospace_measure() {
        let measure = MonospaceMeasure::default();
        assert_eq!(measure.measure("Save"), (48.0, 24.0));
        assert_eq!(measure.measure("ab\nabcd"), (48.0, 40.0));
        assert_eq!(measure.measure(""), (16.0, 24.0));
    }

    #[test]
    fn test_enter_creates_positioned_bubble() {
        let mut engine = engine();
        engine.pointer_enter(by_id(&engine, "a"));

        let active = engine.tooltip().unwrap();
        let doc = engine.document();
        assert_eq!(doc.parent(active.bubble), Some(doc.body()));
        assert!(doc.has_class(active.bubble, "tooltip"));
        assert!(doc.has_class(active.bubble, "show"));
        let inner = doc.children(active.bubble)[0];
        assert!(doc.has_class(inner, "tooltip-inner"));
        assert_eq!(doc.text(inner), Some("Save"));
        assert_eq!(doc.style(active.bubble, "position"), Some("absolute"));
        assert_eq!(doc.style(active.bubble, "top"), Some("171px"));
        assert_eq!(doc.style(active.bubble, "left"), Some("110px"));
        assert_eq!(doc.style(active.bubble, "z-index"), Some("1070"));
    }

    #[test]
    fn test_enter_leave_is_balanced() {
        let mut engine = engine();
        let a = by_id(&engine, "a");
        for _ in 0..3 {
            engine.pointer_enter(a);
            assert_eq!(bubbles(&engine), 1);
            engine.pointer_leave(a);
            assert_eq!(bubbles(&engine), 0);
        }
        assert_eq!(engine.tooltip(), None);
    }

    #[test]
    fn test_single_bubble_across_triggers() {
        let mut engine = engine();
        engine.pointer_enter(by_id(&engine, "a"));
        engine.pointer_enter(by_id(&engine, "b"));
        assert_eq!(bubbles(&engine), 1);
        let active = engine.tooltip().unwrap();
        assert_eq!(active.trigger, by_id(&engine, "b"));
        let inner = engine.document().children(active.bubble)[0];
        assert_eq!(engine.document().text(inner), Some("Delete forever"));
    }

    #[test]
    fn test_leaving_other_trigger_keeps_bubble() {
        let mut engine = engine();
        let a = by_id(&engine, "a");
        let b = by_id(&engine, "b");
        engine.pointer_enter(a);
        engine.pointer_enter(b);
        engine.pointer_leave(a);
        assert_eq!(bubbles(&engine), 1);
        assert_eq!(engine.tooltip().map(|t| t.trigger), Some(b));

        engine.pointer_leave(b);
        assert_eq!(bubbles(&engine), 0);
    }

    #[test]
    fn test_pointer_events_do_not_bubble() {
        let doc = Document::from_specs(&[NodeSpec::new("button")
            .attr("data-toggle", "tooltip")
            .attr("title", "Save")
            .child(NodeSpec::new("span").id("icon"))]);
        let mut engine = Engine::new(doc, EngineConfig::default());
        engine.init();
        engine.pointer_enter(by_id(&engine, "icon"));
        assert_eq!(bubbles(&engine), 0);
    }

    #[test]
    fn test_trigger_without_text_shows_nothing() {
        let mut engine = engine();
        engine.pointer_enter(by_id(&engine, "empty"));
        assert_eq!(bubbles(&engine), 0);
    }

    #[test]
    fn test_removing_trigger_hides_bubble() {
        let mut engine = engine();
        let a = by_id(&engine, "a");
        engine.pointer_enter(a);
        engine.remove_element(a);
        assert_eq!(bubbles(&engine), 0);
        assert_eq!(engine.tooltip(), None);
    }
}
