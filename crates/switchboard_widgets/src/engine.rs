//! Widget engine
//!
//! Owns the document, the registry and the timer queue, and routes events
//! to the widget subsystems. Every interaction runs to completion before the
//! next one is looked at, so handlers never observe a half-applied
//! transition.
//!
//! # Example
//!
//! ```rust
//! use switchboard_dom::{Document, NodeSpec};
//! use switchboard_widgets::{Engine, EngineConfig};
//!
//! let doc = Document::from_specs(&[NodeSpec::new("div").children([
//!     NodeSpec::new("button").id("toggle").class("dropdown-toggle"),
//!     NodeSpec::new("ul").id("menu").class("dropdown-menu"),
//! ])]);
//! let mut engine = Engine::new(doc, EngineConfig::default());
//! engine.init();
//!
//! let toggle = engine.document().get_element_by_id("toggle").unwrap();
//! let menu = engine.document().get_element_by_id("menu").unwrap();
//! engine.click(toggle);
//! assert!(engine.is_open(menu));
//! engine.click_outside();
//! assert!(!engine.is_open(menu));
//! ```

use switchboard_core::{Event, EventType, FiredTimer, KeyCode, Modifiers, TimerQueue};
use switchboard_dom::{Document, NodeId};
use tracing::{debug, trace, warn};

use crate::config::{CompiledConventions, EngineConfig};
use crate::registry::{Binding, CarouselStep, Registry};
use crate::tooltip::{ActiveTooltip, MonospaceMeasure, TextMeasure};

/// Deferred work scheduled by the subsystems, owned by one element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerTask {
    /// Finish a modal fade-out with `display: none`
    HideModal,
    /// Remove a dismissed alert from the document
    RemoveAlert,
    /// Start dismissing an alert that was never closed by hand
    AutoDismissAlert,
}

/// The Widget Toggle Engine
pub struct Engine {
    pub(crate) doc: Document,
    pub(crate) config: EngineConfig,
    pub(crate) conventions: CompiledConventions,
    pub(crate) registry: Registry,
    pub(crate) timers: TimerQueue<NodeId, TimerTask>,
    /// The singleton backdrop, present while any modal is open
    pub(crate) backdrop: Option<NodeId>,
    /// Open modals, most recently opened last
    pub(crate) modal_stack: Vec<NodeId>,
    pub(crate) tooltip: Option<ActiveTooltip>,
    pub(crate) measure: Box<dyn TextMeasure>,
    initialized: bool,
}

impl Engine {
    pub fn new(doc: Document, config: EngineConfig) -> Self {
        let conventions = config.conventions.compile();
        Self {
            doc,
            config,
            conventions,
            registry: Registry::default(),
            timers: TimerQueue::new(),
            backdrop: None,
            modal_stack: Vec::new(),
            tooltip: None,
            measure: Box::new(MonospaceMeasure::default()),
            initialized: false,
        }
    }

    /// Replace the text measurement used to size tooltips
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Scan the document and start reacting to events
    ///
    /// Calling this again rebuilds the registry from the current document.
    /// Targets that survive keep their state, and no trigger ends up bound
    /// twice.
    pub fn init(&mut self) {
        if self.initialized {
            warn!("engine initialised again, rebuilding registry");
            self.registry.rescan(&self.doc, &self.conventions);
        } else {
            self.registry = Registry::scan(&self.doc, &self.conventions);
            self.initialized = true;
        }
        self.sync_modal_stack();
        self.schedule_auto_dismiss();
        debug!(
            bindings = self.registry.binding_count(),
            targets = self.registry.target_count(),
            "engine initialised"
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current engine time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    // =========================================================================
    // Event delivery
    // =========================================================================

    /// Deliver one event
    ///
    /// Timers due before the event's timestamp fire first.
    pub fn dispatch(&mut self, mut event: Event) {
        if event.timestamp_ms > self.timers.now_ms() {
            self.advance_to(event.timestamp_ms);
        }
        if !self.initialized {
            debug!(event = ?event.event_type, "event before init ignored");
            return;
        }
        let origin = NodeId::from_raw(event.target);
        if !self.doc.exists(origin) {
            debug!(target = event.target, "event on unknown element ignored");
            return;
        }

        match event.event_type {
            EventType::Click => self.handle_click(origin, &mut event),
            EventType::KeyDown => {
                if let Some(key) = event.key() {
                    self.handle_key(key);
                }
            }
            EventType::PointerEnter => {
                if let Some((trigger, _)) = self.bound_trigger(origin, event.event_type, |b| {
                    *b == Binding::Tooltip
                }) {
                    self.show_tooltip(trigger);
                }
            }
            EventType::PointerLeave => {
                let owns_bubble = self.tooltip.is_some_and(|tip| tip.trigger == origin);
                if owns_bubble {
                    self.hide_tooltip();
                }
            }
        }
    }

    /// Click the centre of an element
    pub fn click(&mut self, node: NodeId) {
        let rect = self.doc.bounding_rect(node);
        let event = Event::click(node.to_raw(), rect.center_x(), rect.top() + rect.height / 2.0)
            .with_timestamp(self.now_ms());
        self.dispatch(event);
    }

    /// Click the page background, outside every widget
    pub fn click_outside(&mut self) {
        let body = self.doc.body();
        self.click(body);
    }

    pub fn key_down(&mut self, key: KeyCode) {
        let event = Event::key_down(self.doc.body().to_raw(), key, Modifiers::NONE)
            .with_timestamp(self.now_ms());
        self.dispatch(event);
    }

    pub fn pointer_enter(&mut self, node: NodeId) {
        let event = Event::new(EventType::PointerEnter, node.to_raw()).with_timestamp(self.now_ms());
        self.dispatch(event);
    }

    pub fn pointer_leave(&mut self, node: NodeId) {
        let event = Event::new(EventType::PointerLeave, node.to_raw()).with_timestamp(self.now_ms());
        self.dispatch(event);
    }

    /// First binding accepted by `accept`, searched from `origin` up through
    /// its ancestors for bubbling events and on `origin` alone otherwise
    fn bound_trigger(
        &self,
        origin: NodeId,
        event_type: EventType,
        accept: impl Fn(&Binding) -> bool,
    ) -> Option<(NodeId, Binding)> {
        let depth = if event_type.bubbles() { usize::MAX } else { 1 };
        self.doc
            .ancestors_inclusive(origin)
            .take(depth)
            .find_map(|node| {
                self.registry
                    .binding(node)
                    .filter(|binding| accept(binding))
                    .map(|binding| (node, binding))
            })
    }

    fn handle_click(&mut self, origin: NodeId, event: &mut Event) {
        let bound = self.bound_trigger(origin, event.event_type, Binding::handles_click);
        if let Some((trigger, binding)) = bound {
            trace!(kind = %binding.kind(), "click delegated to trigger");
            self.apply(trigger, binding, event);
        }
        if !event.propagation_stopped {
            self.click_modal_surface(origin);
        }
        if !event.propagation_stopped {
            self.dismiss_outside(origin);
        }
    }

    fn apply(&mut self, trigger: NodeId, binding: Binding, event: &mut Event) {
        match binding {
            Binding::ToggleDropdown { menu } => {
                event.stop_propagation();
                self.toggle_dropdown(menu);
            }
            Binding::ToggleCollapse { target } => {
                self.toggle_collapse(target);
            }
            Binding::OpenModal { modal } => {
                self.open_modal(modal);
            }
            Binding::DismissModal { modal } => {
                self.close_modal(modal);
            }
            Binding::ShowTab { .. } => {
                self.activate_tab(trigger);
            }
            Binding::Tooltip => {}
            Binding::Carousel { carousel, step } => {
                match step {
                    CarouselStep::Prev => self.carousel_prev(carousel),
                    CarouselStep::Next => self.carousel_next(carousel),
                    CarouselStep::Indicator(dot) => self.carousel_show_indicator(carousel, dot),
                };
            }
            Binding::DismissAlert { alert } => {
                self.dismiss_alert(alert);
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if key != KeyCode::ESCAPE {
            trace!(key = ?key.name(), "key ignored");
            return;
        }
        self.close_top_modal_on_escape();
        self.dismiss_on_escape();
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Move time forward, firing every timer that falls due
    ///
    /// Returns how many timers fired.
    pub fn advance(&mut self, ms: u64) -> usize {
        let deadline = self.timers.now_ms().saturating_add(ms);
        self.advance_to(deadline)
    }

    pub fn advance_to(&mut self, deadline_ms: u64) -> usize {
        let mut fired_count = 0;
        while let Some(fired) = self.timers.pop_due(deadline_ms) {
            self.fire(fired);
            fired_count += 1;
        }
        self.timers.set_now(deadline_ms);
        fired_count
    }

    fn fire(&mut self, fired: FiredTimer<NodeId, TimerTask>) {
        trace!(task = ?fired.task, due_ms = fired.due_ms, "timer fired");
        match fired.task {
            TimerTask::HideModal => self.finish_close_modal(fired.owner, fired.id),
            TimerTask::RemoveAlert => self.finish_dismiss_alert(fired.owner),
            TimerTask::AutoDismissAlert => {
                self.dismiss_alert(fired.owner);
            }
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Remove an element and its subtree
    ///
    /// Every timer owned by a removed element is cancelled and its registry
    /// entries are dropped. Returns the number of removed elements.
    pub fn remove_element(&mut self, node: NodeId) -> usize {
        let removed = self.doc.remove(node);
        if removed.is_empty() {
            return 0;
        }
        let cancelled: usize = removed
            .iter()
            .map(|id| self.timers.cancel_owned_by(*id))
            .sum();
        self.registry.forget(&removed);
        self.forget_modals(&removed);
        if self
            .tooltip
            .is_some_and(|tip| removed.contains(&tip.bubble) || removed.contains(&tip.trigger))
        {
            self.hide_tooltip();
        }
        debug!(removed = removed.len(), cancelled, "element removed");
        removed.len()
    }
}
