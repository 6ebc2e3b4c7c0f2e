//! Trigger registry
//!
//! One scan of the document produces two tables:
//!
//! - a dispatch table mapping each trigger element to the [`Binding`] it
//!   performs when activated
//! - a state table mapping each target element to its typed [`WidgetState`]
//!
//! Handlers consult and update these tables; the document only ever receives
//! a projection of the state. Both tables are keyed by node identity, so
//! scanning again replaces entries rather than duplicating them.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use switchboard_dom::{Document, NodeId, Selector};
use tracing::{debug, trace, warn};

use crate::alert::AlertPhase;
use crate::carousel::CarouselState;
use crate::config::CompiledConventions;
use crate::kind::{Dismissal, WidgetKind};
use crate::modal::ModalPhase;

/// Carousel control action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselStep {
    Prev,
    Next,
    /// Show the slide matching this indicator's current position
    Indicator(NodeId),
}

/// What activating a trigger does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    ToggleDropdown { menu: NodeId },
    ToggleCollapse { target: NodeId },
    OpenModal { modal: NodeId },
    DismissModal { modal: NodeId },
    ShowTab { pane: NodeId, group: NodeId },
    /// Hover trigger; the text is read when the pointer enters
    Tooltip,
    Carousel { carousel: NodeId, step: CarouselStep },
    DismissAlert { alert: NodeId },
}

impl Binding {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Binding::ToggleDropdown { .. } => WidgetKind::Dropdown,
            Binding::ToggleCollapse { .. } => WidgetKind::Collapse,
            Binding::OpenModal { .. } | Binding::DismissModal { .. } => WidgetKind::Modal,
            Binding::ShowTab { .. } => WidgetKind::Tab,
            Binding::Tooltip => WidgetKind::Tooltip,
            Binding::Carousel { .. } => WidgetKind::Carousel,
            Binding::DismissAlert { .. } => WidgetKind::Alert,
        }
    }

    /// The target element whose state this binding changes
    pub fn target(&self) -> Option<NodeId> {
        match *self {
            Binding::ToggleDropdown { menu } => Some(menu),
            Binding::ToggleCollapse { target } => Some(target),
            Binding::OpenModal { modal } | Binding::DismissModal { modal } => Some(modal),
            Binding::ShowTab { group, .. } => Some(group),
            Binding::Tooltip => None,
            Binding::Carousel { carousel, .. } => Some(carousel),
            Binding::DismissAlert { alert } => Some(alert),
        }
    }

    fn references(&self, gone: &FxHashSet<NodeId>) -> bool {
        match *self {
            Binding::ShowTab { pane, group } => gone.contains(&pane) || gone.contains(&group),
            _ => self.target().is_some_and(|t| gone.contains(&t)),
        }
    }

    /// Whether a click on the trigger performs the binding
    pub fn handles_click(&self) -> bool {
        !matches!(self, Binding::Tooltip)
    }
}

/// Typed state of one target
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetState {
    Dropdown { open: bool },
    Collapse { open: bool },
    Modal(ModalPhase),
    /// Keyed by the tab list; `active` is the active trigger
    TabGroup { active: Option<NodeId> },
    Carousel {
        slides: CarouselState,
        items: Vec<NodeId>,
        indicators: Vec<NodeId>,
    },
    Alert(AlertPhase),
}

impl WidgetState {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetState::Dropdown { .. } => WidgetKind::Dropdown,
            WidgetState::Collapse { .. } => WidgetKind::Collapse,
            WidgetState::Modal(_) => WidgetKind::Modal,
            WidgetState::TabGroup { .. } => WidgetKind::Tab,
            WidgetState::Carousel { .. } => WidgetKind::Carousel,
            WidgetState::Alert(_) => WidgetKind::Alert,
        }
    }

    /// Whether the target is currently shown
    pub fn is_open(&self) -> bool {
        match self {
            WidgetState::Dropdown { open } | WidgetState::Collapse { open } => *open,
            WidgetState::Modal(phase) => phase.is_open(),
            WidgetState::Alert(phase) => *phase == AlertPhase::Shown,
            WidgetState::TabGroup { .. } | WidgetState::Carousel { .. } => false,
        }
    }

    /// Keep the in-memory state of a target that survives a re-scan
    fn carry_from(&mut self, old: &WidgetState) {
        match (self, old) {
            (
                WidgetState::Carousel { slides, .. },
                WidgetState::Carousel { slides: previous, .. },
            ) => {
                *slides = slides.go_to(previous.index());
            }
            (WidgetState::TabGroup { active }, WidgetState::TabGroup { active: previous }) => {
                if previous.is_some() {
                    *active = *previous;
                }
            }
            (current, previous) if current.kind() == previous.kind() => {
                *current = previous.clone();
            }
            _ => {}
        }
    }
}

/// A registered target
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub kind: WidgetKind,
    pub state: WidgetState,
    pub dismissal: Dismissal,
    /// Triggers bound to this target, in document order
    pub triggers: SmallVec<[NodeId; 2]>,
}

/// Dispatch and state tables for one document
#[derive(Clone, Debug, Default)]
pub struct Registry {
    bindings: FxHashMap<NodeId, Binding>,
    targets: IndexMap<NodeId, Target>,
}

impl Registry {
    /// Discover every trigger and target in the document
    pub fn scan(doc: &Document, conventions: &CompiledConventions) -> Self {
        let mut scanner = Scanner {
            doc,
            conventions,
            registry: Registry::default(),
        };
        let nodes = doc.descendants(doc.root());

        for &node in &nodes {
            scanner.scan_structural(node);
        }
        for &node in &nodes {
            if !scanner.registry.bindings.contains_key(&node) {
                scanner.scan_trigger(node);
            }
        }

        let registry = scanner.registry;
        debug!(
            bindings = registry.bindings.len(),
            targets = registry.targets.len(),
            "registry scanned"
        );
        registry
    }

    /// Scan again, keeping the state of targets that are still present
    pub fn rescan(&mut self, doc: &Document, conventions: &CompiledConventions) {
        let mut next = Registry::scan(doc, conventions);
        for (node, target) in next.targets.iter_mut() {
            if let Some(old) = self.targets.get(node) {
                target.state.carry_from(&old.state);
            }
        }
        *self = next;
    }

    pub fn binding(&self, node: NodeId) -> Option<Binding> {
        self.bindings.get(&node).copied()
    }

    pub fn target(&self, node: NodeId) -> Option<&Target> {
        self.targets.get(&node)
    }

    pub fn target_mut(&mut self, node: NodeId) -> Option<&mut Target> {
        self.targets.get_mut(&node)
    }

    pub fn state(&self, node: NodeId) -> Option<&WidgetState> {
        self.targets.get(&node).map(|t| &t.state)
    }

    /// Targets of one kind, in registration order
    pub fn targets_of(&self, kind: WidgetKind) -> Vec<NodeId> {
        self.targets
            .iter()
            .filter(|(_, t)| t.kind == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn targets(&self) -> impl Iterator<Item = (NodeId, &Target)> {
        self.targets.iter().map(|(id, t)| (*id, t))
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Drop every entry that refers to a removed element
    pub fn forget(&mut self, removed: &[NodeId]) {
        let gone: FxHashSet<NodeId> = removed.iter().copied().collect();
        self.bindings
            .retain(|node, binding| !gone.contains(node) && !binding.references(&gone));
        self.targets.retain(|node, _| !gone.contains(node));

        for target in self.targets.values_mut() {
            target.triggers.retain(|t| !gone.contains(t));
            match &mut target.state {
                WidgetState::TabGroup { active } => {
                    if active.is_some_and(|a| gone.contains(&a)) {
                        *active = None;
                    }
                }
                WidgetState::Carousel {
                    slides,
                    items,
                    indicators,
                } => {
                    items.retain(|i| !gone.contains(i));
                    indicators.retain(|i| !gone.contains(i));
                    *slides = slides.resized(items.len());
                }
                _ => {}
            }
        }
        trace!(removed = gone.len(), "registry entries forgotten");
    }
}

/// Outcome of reading a trigger's target attribute
enum Reference {
    Undeclared,
    Found(NodeId),
    Unresolved,
}

struct Scanner<'a> {
    doc: &'a Document,
    conventions: &'a CompiledConventions,
    registry: Registry,
}

impl Scanner<'_> {
    fn matches(&self, node: NodeId, selector: &Option<Selector>) -> bool {
        selector
            .as_ref()
            .is_some_and(|s| self.doc.matches(node, s))
    }

    fn dismissal(&self, node: NodeId, kind: WidgetKind) -> Dismissal {
        match self.doc.attr(node, &self.conventions.raw.dismiss_on_attr) {
            Some(value) => Dismissal::parse(value),
            None => Dismissal::default_for(kind),
        }
    }

    /// Register a target unless it is already known; false when the node
    /// is registered as a different kind
    fn ensure_target(&mut self, node: NodeId, state: impl FnOnce() -> WidgetState) -> bool {
        if let Some(existing) = self.registry.targets.get(&node) {
            return true_or_warn(existing.kind, state().kind());
        }
        let state = state();
        let kind = state.kind();
        let target = Target {
            kind,
            dismissal: self.dismissal(node, kind),
            state,
            triggers: SmallVec::new(),
        };
        self.registry.targets.insert(node, target);
        true
    }

    fn bind(&mut self, trigger: NodeId, binding: Binding) {
        if let Some(target) = binding.target().and_then(|t| self.registry.targets.get_mut(&t)) {
            if !target.triggers.contains(&trigger) {
                target.triggers.push(trigger);
            }
        }
        trace!(kind = %binding.kind(), "trigger bound");
        self.registry.bindings.insert(trigger, binding);
    }

    /// Targets recognised by their own markup: modals, alerts, carousels
    fn scan_structural(&mut self, node: NodeId) {
        let conventions = self.conventions;
        let raw = &conventions.raw;
        if self.doc.has_class(node, &raw.modal_class) {
            let phase = if self.doc.has_class(node, &raw.open_class) {
                ModalPhase::Open
            } else {
                ModalPhase::Closed
            };
            self.ensure_target(node, || WidgetState::Modal(phase));
        } else if self.matches(node, &self.conventions.alert) {
            self.ensure_target(node, || WidgetState::Alert(AlertPhase::Shown));
        } else if self.matches(node, &self.conventions.carousel) {
            self.scan_carousel(node);
        }
    }

    fn scan_carousel(&mut self, carousel: NodeId) {
        let doc = self.doc;
        let conventions = self.conventions;
        let raw = &conventions.raw;
        let items: Vec<NodeId> = doc
            .descendants(carousel)
            .into_iter()
            .filter(|n| doc.has_class(*n, &raw.carousel_item_class))
            .collect();
        let initial = items
            .iter()
            .position(|i| doc.has_class(*i, &raw.active_class))
            .unwrap_or(0);
        let Some(slides) = CarouselState::new(items.len(), initial) else {
            debug!("carousel without items left inert");
            return;
        };
        let indicators = conventions
            .carousel_indicators
            .as_ref()
            .map(|s| doc.query_selector_all(carousel, s))
            .unwrap_or_default();

        let controls: Vec<(NodeId, CarouselStep)> = [
            (&conventions.carousel_prev, CarouselStep::Prev),
            (&conventions.carousel_next, CarouselStep::Next),
        ]
        .into_iter()
        .filter_map(|(selector, step)| {
            let control = doc.query_selector(carousel, selector.as_ref()?)?;
            Some((control, step))
        })
        .chain(
            indicators
                .iter()
                .map(|node| (*node, CarouselStep::Indicator(*node))),
        )
        .collect();

        self.ensure_target(carousel, || WidgetState::Carousel {
            slides,
            items,
            indicators,
        });
        for (control, step) in controls {
            if self.registry.bindings.contains_key(&control) {
                continue;
            }
            self.bind(control, Binding::Carousel { carousel, step });
        }
    }

    fn scan_trigger(&mut self, node: NodeId) {
        let doc = self.doc;
        let conventions = self.conventions;
        let raw = &conventions.raw;

        let declared = raw
            .toggle_attrs
            .iter()
            .find_map(|attr| doc.attr(node, attr));
        let kind = match declared {
            Some(value) => WidgetKind::from_toggle_value(value),
            None if self.matches(node, &self.conventions.dropdown_trigger) => {
                Some(WidgetKind::Dropdown)
            }
            None if self.matches(node, &self.conventions.collapse_trigger) => {
                Some(WidgetKind::Collapse)
            }
            None => None,
        };

        match kind {
            Some(WidgetKind::Dropdown) => self.scan_dropdown(node),
            Some(WidgetKind::Collapse) => self.scan_collapse(node),
            Some(WidgetKind::Modal) => self.scan_modal_trigger(node),
            Some(WidgetKind::Tab) => self.scan_tab(node),
            Some(WidgetKind::Tooltip) => self.bind(node, Binding::Tooltip),
            _ => {
                if let Some(value) = declared {
                    debug!(value, "unknown toggle kind ignored");
                }
                self.scan_dismiss(node);
            }
        }
    }

    /// Resolve the trigger's explicit target reference
    fn explicit_target(&self, node: NodeId, attrs: &[String]) -> Reference {
        let Some(source) = attrs
            .iter()
            .find_map(|attr| self.doc.attr(node, attr))
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return Reference::Undeclared;
        };
        match Selector::parse(source) {
            Ok(selector) => match self.doc.select(&selector).first() {
                Some(found) => Reference::Found(*found),
                None => {
                    debug!(target = source, "trigger target not found");
                    Reference::Unresolved
                }
            },
            Err(err) => {
                warn!(%err, "trigger with invalid target selector skipped");
                Reference::Unresolved
            }
        }
    }

    fn scan_dropdown(&mut self, trigger: NodeId) {
        let conventions = self.conventions;
        let raw = &conventions.raw;
        let menu = match self.explicit_target(trigger, &raw.target_attrs) {
            Reference::Found(menu) => menu,
            Reference::Undeclared => match self.doc.next_element_sibling(trigger) {
                Some(sibling) if self.doc.has_class(sibling, &raw.dropdown_menu_class) => sibling,
                _ => {
                    debug!("dropdown trigger without menu sibling left inert");
                    return;
                }
            },
            Reference::Unresolved => return,
        };
        let open = self.doc.has_class(menu, &raw.open_class);
        if self.ensure_target(menu, || WidgetState::Dropdown { open }) {
            self.bind(trigger, Binding::ToggleDropdown { menu });
        }
    }

    fn scan_collapse(&mut self, trigger: NodeId) {
        let conventions = self.conventions;
        let raw = &conventions.raw;
        let target = match self.explicit_target(trigger, &raw.target_attrs) {
            Reference::Found(target) => target,
            Reference::Undeclared => match self.doc.next_element_sibling(trigger) {
                Some(sibling) => sibling,
                None => {
                    debug!("collapse trigger without target left inert");
                    return;
                }
            },
            Reference::Unresolved => return,
        };
        let open = self.doc.has_class(target, &raw.open_class);
        if self.ensure_target(target, || WidgetState::Collapse { open }) {
            self.bind(trigger, Binding::ToggleCollapse { target });
        }
    }

    fn scan_modal_trigger(&mut self, trigger: NodeId) {
        let Reference::Found(modal) =
            self.explicit_target(trigger, &self.conventions.raw.target_attrs)
        else {
            debug!("modal trigger without target left inert");
            return;
        };
        if self.ensure_target(modal, || WidgetState::Modal(ModalPhase::Closed)) {
            self.bind(trigger, Binding::OpenModal { modal });
        }
    }

    fn scan_tab(&mut self, trigger: NodeId) {
        let conventions = self.conventions;
        let raw = &conventions.raw;
        let mut attrs = raw.target_attrs.clone();
        attrs.push("href".to_string());
        let Reference::Found(pane) = self.explicit_target(trigger, &attrs) else {
            debug!("tab trigger without pane left inert");
            return;
        };
        let Some(group) = conventions
            .tab_list
            .as_ref()
            .and_then(|list| self.doc.closest(trigger, list))
            .or_else(|| self.doc.parent(trigger))
        else {
            return;
        };

        if !self.ensure_target(group, || WidgetState::TabGroup { active: None }) {
            return;
        }
        let pre_marked = self.doc.has_class(trigger, &raw.active_class);
        if let Some(Target {
            state: WidgetState::TabGroup { active },
            ..
        }) = self.registry.targets.get_mut(&group)
        {
            if active.is_none() && pre_marked {
                *active = Some(trigger);
            }
        }
        self.bind(trigger, Binding::ShowTab { pane, group });
    }

    fn scan_dismiss(&mut self, node: NodeId) {
        let doc = self.doc;
        let conventions = self.conventions;
        let raw = &conventions.raw;
        let dismiss = raw.dismiss_attrs.iter().find_map(|attr| doc.attr(node, attr));
        let wants_alert =
            dismiss == Some("alert") || self.matches(node, &self.conventions.alert_close);

        if dismiss == Some("modal") {
            let modal = doc
                .ancestors_inclusive(node)
                .find(|n| doc.has_class(*n, &raw.modal_class));
            match modal {
                Some(modal) => self.bind(node, Binding::DismissModal { modal }),
                None => debug!("modal dismiss button outside any modal"),
            }
        } else if wants_alert {
            let alert = conventions
                .alert
                .as_ref()
                .and_then(|selector| doc.closest(node, selector));
            match alert {
                Some(alert) => {
                    if self.ensure_target(alert, || WidgetState::Alert(AlertPhase::Shown)) {
                        self.bind(node, Binding::DismissAlert { alert });
                    }
                }
                None => debug!("alert dismiss button outside any alert"),
            }
        }
    }
}

fn true_or_warn(existing: WidgetKind, wanted: WidgetKind) -> bool {
    if existing == wanted {
        return true;
    }
    warn!(%existing, %wanted, "element already registered as another widget kind");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Conventions;
    use pretty_assertions::assert_eq;
    use switchboard_dom::NodeSpec;

    fn scan(specs: &[NodeSpec]) -> (Document, Registry) {
        let doc = Document::from_specs(specs);
        let registry = Registry::scan(&doc, &Conventions::default().compile());
        (doc, registry)
    }

    fn by_id(doc: &Document, id: &str) -> NodeId {
        doc.get_element_by_id(id).unwrap()
    }

    #[test]
    fn test_dropdown_uses_menu_sibling() {
        let (doc, registry) = scan(&[NodeSpec::new("div").children([
            NodeSpec::new("button").id("t").class("dropdown-toggle"),
            NodeSpec::new("ul").id("m").class("dropdown-menu"),
        ])]);
        let menu = by_id(&doc, "m");
        assert_eq!(
            registry.binding(by_id(&doc, "t")),
            Some(Binding::ToggleDropdown { menu })
        );
        let target = registry.target(menu).unwrap();
        assert_eq!(target.state, WidgetState::Dropdown { open: false });
        assert_eq!(target.triggers.as_slice(), &[by_id(&doc, "t")]);
    }

    #[test]
    fn test_dropdown_without_menu_is_inert() {
        let (_, registry) = scan(&[
            NodeSpec::new("button").class("dropdown-toggle"),
            NodeSpec::new("div").class("not-a-menu"),
        ]);
        assert_eq!(registry.binding_count(), 0);
        assert_eq!(registry.target_count(), 0);
    }

    #[test]
    fn test_missing_and_invalid_targets_are_skipped() {
        let (_, registry) = scan(&[
            NodeSpec::new("button")
                .attr("data-toggle", "modal")
                .attr("data-target", "#nowhere"),
            NodeSpec::new("button")
                .attr("data-bs-toggle", "collapse")
                .attr("data-bs-target", "#"),
        ]);
        assert_eq!(registry.binding_count(), 0);
    }

    #[test]
    fn test_modal_targets_and_dismiss_buttons() {
        let (doc, registry) = scan(&[
            NodeSpec::new("button")
                .id("open")
                .attr("data-bs-toggle", "modal")
                .attr("data-bs-target", "#m1"),
            NodeSpec::new("div").id("m1").class("modal").child(
                NodeSpec::new("button")
                    .id("close")
                    .attr("data-bs-dismiss", "modal"),
            ),
            NodeSpec::new("div").id("m2").class("modal"),
        ]);
        let m1 = by_id(&doc, "m1");
        assert_eq!(registry.binding(by_id(&doc, "open")), Some(Binding::OpenModal { modal: m1 }));
        assert_eq!(
            registry.binding(by_id(&doc, "close")),
            Some(Binding::DismissModal { modal: m1 })
        );
        assert_eq!(
            registry.targets_of(WidgetKind::Modal),
            vec![m1, by_id(&doc, "m2")]
        );
        assert_eq!(
            registry.target(m1).unwrap().dismissal,
            Dismissal::default_for(WidgetKind::Modal)
        );
    }

    #[test]
    fn test_dismiss_on_override() {
        let (doc, registry) = scan(&[NodeSpec::new("div")
            .id("m")
            .class("modal")
            .attr("data-dismiss-on", "escape")]);
        let dismissal = registry.target(by_id(&doc, "m")).unwrap().dismissal;
        assert!(dismissal.escape);
        assert!(!dismissal.outside);
    }

    #[test]
    fn test_tabs_group_and_initial_active() {
        let (doc, registry) = scan(&[
            NodeSpec::new("ul").id("nav").class("nav nav-tabs").children([
                NodeSpec::new("a").id("a").class("nav-link").attr("data-toggle", "tab").attr("href", "#pa"),
                NodeSpec::new("a").id("b").class("nav-link active").attr("data-toggle", "tab").attr("href", "#pb"),
            ]),
            NodeSpec::new("div").children([
                NodeSpec::new("div").id("pa").class("tab-pane"),
                NodeSpec::new("div").id("pb").class("tab-pane show active"),
            ]),
        ]);
        let nav = by_id(&doc, "nav");
        assert_eq!(
            registry.binding(by_id(&doc, "a")),
            Some(Binding::ShowTab { pane: by_id(&doc, "pa"), group: nav })
        );
        assert_eq!(
            registry.state(nav),
            Some(&WidgetState::TabGroup { active: Some(by_id(&doc, "b")) })
        );
    }

    #[test]
    fn test_carousel_controls() {
        let (doc, registry) = scan(&[NodeSpec::new("div").id("c").class("carousel").children([
            NodeSpec::new("div").class("carousel-indicators").children([
                NodeSpec::new("button").id("i0"),
                NodeSpec::new("button").id("i1"),
            ]),
            NodeSpec::new("div").class("carousel-item"),
            NodeSpec::new("div").class("carousel-item active"),
            NodeSpec::new("button").id("prev").class("carousel-control-prev"),
            NodeSpec::new("button").id("next").class("carousel-control-next"),
        ])]);
        let carousel = by_id(&doc, "c");
        assert_eq!(
            registry.binding(by_id(&doc, "next")),
            Some(Binding::Carousel { carousel, step: CarouselStep::Next })
        );
        assert_eq!(
            registry.binding(by_id(&doc, "i1")),
            Some(Binding::Carousel { carousel, step: CarouselStep::Indicator(by_id(&doc, "i1")) })
        );
        match registry.state(carousel) {
            Some(WidgetState::Carousel { slides, items, indicators }) => {
                assert_eq!(slides.index(), 1);
                assert_eq!(items.len(), 2);
                assert_eq!(indicators.len(), 2);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let (_, registry) = scan(&[NodeSpec::new("div")
            .class("carousel")
            .child(NodeSpec::new("button").class("carousel-control-next"))]);
        assert_eq!(registry.target_count(), 0);
        assert_eq!(registry.binding_count(), 0);
    }

    #[test]
    fn test_rescan_replaces_entries_and_keeps_state() {
        let (doc, mut registry) = scan(&[
            NodeSpec::new("button")
                .id("t")
                .attr("data-toggle", "collapse")
                .attr("data-target", "#c"),
            NodeSpec::new("div").id("c"),
        ]);
        let target = by_id(&doc, "c");
        registry.target_mut(target).unwrap().state = WidgetState::Collapse { open: true };

        registry.rescan(&doc, &Conventions::default().compile());
        assert_eq!(registry.binding_count(), 1);
        let entry = registry.target(target).unwrap();
        assert_eq!(entry.triggers.len(), 1);
        assert_eq!(entry.state, WidgetState::Collapse { open: true });
    }

    #[test]
    fn test_forget_drops_dangling_bindings() {
        let (mut doc, mut registry) = scan(&[
            NodeSpec::new("button")
                .id("t")
                .attr("data-toggle", "collapse")
                .attr("data-target", "#c"),
            NodeSpec::new("div").id("c"),
        ]);
        let removed = doc.remove(by_id(&doc, "c"));
        registry.forget(&removed);
        assert_eq!(registry.binding_count(), 0);
        assert_eq!(registry.target_count(), 0);
    }
}
