//! Tab groups
//!
//! A group is the trigger's closest tab list (`.nav-tabs, .nav-pills` by
//! default), or its parent when there is none. Activating a trigger clears
//! the active marker from every link in the group and every pane the group
//! controls, then marks the trigger and its pane.

use smallvec::SmallVec;
use switchboard_dom::NodeId;
use tracing::{debug, trace};

use crate::engine::Engine;
use crate::registry::{Binding, Target, WidgetState};

impl Engine {
    /// The active trigger of a tab group
    pub fn active_tab(&self, group: NodeId) -> Option<NodeId> {
        match self.registry.state(group) {
            Some(WidgetState::TabGroup { active }) => *active,
            _ => None,
        }
    }

    /// The group a tab trigger belongs to
    pub fn tab_group_of(&self, trigger: NodeId) -> Option<NodeId> {
        match self.registry.binding(trigger) {
            Some(Binding::ShowTab { group, .. }) => Some(group),
            _ => None,
        }
    }

    /// Make `trigger` the active tab of its group
    pub fn activate_tab(&mut self, trigger: NodeId) -> bool {
        let Some(Binding::ShowTab { pane, group }) = self.registry.binding(trigger) else {
            debug!("activation requested for an element that is not a tab");
            return false;
        };
        let triggers: SmallVec<[NodeId; 2]> = self
            .registry
            .target(group)
            .map(|t| t.triggers.clone())
            .unwrap_or_default();

        let raw = &self.conventions.raw;
        let mut links: Vec<NodeId> = triggers.to_vec();
        for link in self.doc.descendants(group) {
            if self.doc.has_class(link, &raw.tab_link_class) && !links.contains(&link) {
                links.push(link);
            }
        }

        let mut panes: Vec<NodeId> = self
            .doc
            .parent(pane)
            .map(|parent| self.doc.children(parent).to_vec())
            .unwrap_or_default()
            .into_iter()
            .filter(|p| self.doc.has_class(*p, &raw.tab_pane_class))
            .collect();
        for other in &triggers {
            if let Some(Binding::ShowTab { pane: other_pane, .. }) = self.registry.binding(*other) {
                if !panes.contains(&other_pane) {
                    panes.push(other_pane);
                }
            }
        }

        for link in links {
            self.doc.remove_class(link, &raw.active_class);
            self.doc.set_attr(link, "aria-selected", "false");
        }
        for other_pane in panes {
            self.doc.remove_class(other_pane, &raw.open_class);
            self.doc.remove_class(other_pane, &raw.active_class);
        }
        self.doc.add_class(trigger, &raw.active_class);
        self.doc.set_attr(trigger, "aria-selected", "true");
        self.doc.add_class(pane, &raw.open_class);
        self.doc.add_class(pane, &raw.active_class);

        if let Some(Target {
            state: WidgetState::TabGroup { active },
            ..
        }) = self.registry.target_mut(group)
        {
            *active = Some(trigger);
        }
        trace!("tab activated");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use pretty_assertions::assert_eq;
    use switchboard_dom::{Document, NodeSpec};

    fn tab(id: &str, pane: &str, active: bool) -> NodeSpec {
        let class = if active { "nav-link active" } else { "nav-link" };
        NodeSpec::new("li").class("nav-item").child(
            NodeSpec::new("a")
                .id(id)
                .class(class)
                .attr("data-bs-toggle", "tab")
                .attr("href", format!("#{pane}")),
        )
    }

    fn page() -> Vec<NodeSpec> {
        vec![
            NodeSpec::new("ul").id("tabs").class("nav nav-tabs").children([
                tab("t-home", "home", true),
                tab("t-profile", "profile", false),
                tab("t-contact", "contact", false),
            ]),
            NodeSpec::new("div").class("tab-content").children([
                NodeSpec::new("div").id("home").class("tab-pane fade show active"),
                NodeSpec::new("div").id("profile").class("tab-pane fade"),
                NodeSpec::new("div").id("contact").class("tab-pane fade"),
            ]),
            NodeSpec::new("ul").id("pills").class("nav nav-pills").children([
                tab("p-one", "one", true),
                tab("p-two", "two", false),
            ]),
            NodeSpec::new("div").class("tab-content").children([
                NodeSpec::new("div").id("one").class("tab-pane active"),
                NodeSpec::new("div").id("two").class("tab-pane"),
            ]),
        ]
    }

    fn engine() -> Engine {
        let mut engine = Engine::new(Document::from_specs(&page()), EngineConfig::default());
        engine.init();
        engine
    }

    fn by_id(engine: &Engine, id: &str) -> NodeId {
        engine.document().get_element_by_id(id).unwrap()
    }

    fn active(engine: &Engine, selector: &str) -> Vec<NodeId> {
        engine.document().select_str(selector).unwrap()
    }

    #[test]
    fn test_click_switches_trigger_and_pane() {
        let mut engine = engine();
        engine.click(by_id(&engine, "t-profile"));

        assert_eq!(active(&engine, "#tabs .active"), vec![by_id(&engine, "t-profile")]);
        let profile = by_id(&engine, "profile");
        assert_eq!(
            active(&engine, ".tab-pane.active"),
            vec![profile, by_id(&engine, "one")]
        );
        assert!(engine.document().has_class(profile, "show"));
        assert!(!engine.document().has_class(by_id(&engine, "home"), "show"));
        assert_eq!(
            engine.document().attr(by_id(&engine, "t-home"), "aria-selected"),
            Some("false")
        );
    }

    #[test]
    fn test_groups_are_independent() {
        let mut engine = engine();
        engine.click(by_id(&engine, "t-contact"));
        engine.click(by_id(&engine, "p-two"));
        engine.click(by_id(&engine, "t-home"));

        let tabs = by_id(&engine, "tabs");
        let pills = by_id(&engine, "pills");
        assert_eq!(engine.active_tab(tabs), Some(by_id(&engine, "t-home")));
        assert_eq!(engine.active_tab(pills), Some(by_id(&engine, "p-two")));
        assert!(engine.document().has_class(by_id(&engine, "two"), "active"));
        assert!(!engine.document().has_class(by_id(&engine, "one"), "active"));
    }

    #[test]
    fn test_exactly_one_active_after_any_sequence() {
        let mut engine = engine();
        let order = ["t-profile", "t-profile", "t-contact", "t-home", "t-contact"];
        for id in order {
            engine.click(by_id(&engine, id));
            let doc = engine.document();
            let links = active(&engine, "#tabs .nav-link");
            let panes = active(&engine, "#home, #profile, #contact");
            assert_eq!(links.iter().filter(|l| doc.has_class(**l, "active")).count(), 1);
            assert_eq!(panes.iter().filter(|p| doc.has_class(**p, "active")).count(), 1);
        }
    }

    #[test]
    fn test_initial_active_from_markup() {
        let engine = engine();
        let tabs = by_id(&engine, "tabs");
        assert_eq!(engine.active_tab(tabs), Some(by_id(&engine, "t-home")));
        assert_eq!(engine.tab_group_of(by_id(&engine, "p-one")), Some(by_id(&engine, "pills")));
    }
}
