//! Engine configuration and markup conventions
//!
//! Every attribute name, class name and selector the engine looks for is
//! configurable. The defaults follow the Bootstrap-style markup the pages
//! were written against, so a default-configured engine works unchanged on
//! `data-toggle="modal"` / `.dropdown-toggle` / `.carousel` markup.

use serde::{Deserialize, Serialize};
use switchboard_dom::{DomError, Selector};
use tracing::warn;

/// What happens when a modal opens while another one is already open
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalPolicy {
    /// Opening a modal closes every other open modal (default)
    #[default]
    Exclusive,
    /// Modals stack; Escape and backdrop clicks close only the top-most one
    Stack,
}

fn default_close_delay_ms() -> u64 {
    150
}

fn default_tooltip_gap() -> f32 {
    5.0
}

fn default_tooltip_z_index() -> i32 {
    1070
}

/// Behavioural settings for the widget engine
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub modal_policy: ModalPolicy,
    /// Fade-out time before a closed modal is hidden or a dismissed alert removed
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,
    /// Vertical gap between a tooltip and its trigger
    #[serde(default = "default_tooltip_gap")]
    pub tooltip_gap: f32,
    #[serde(default = "default_tooltip_z_index")]
    pub tooltip_z_index: i32,
    /// Dismiss every alert after this long unless it declares its own delay
    #[serde(default)]
    pub alert_auto_dismiss_ms: Option<u64>,
    #[serde(default)]
    pub conventions: Conventions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            modal_policy: ModalPolicy::default(),
            close_delay_ms: default_close_delay_ms(),
            tooltip_gap: default_tooltip_gap(),
            tooltip_z_index: default_tooltip_z_index(),
            alert_auto_dismiss_ms: None,
            conventions: Conventions::default(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Declarative markup contract
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Conventions {
    /// Attributes naming a trigger's widget kind (`modal`, `dropdown`, ...)
    pub toggle_attrs: Vec<String>,
    /// Attributes holding a trigger's target selector
    pub target_attrs: Vec<String>,
    /// Attributes naming what a dismiss button closes (`modal`, `alert`)
    pub dismiss_attrs: Vec<String>,
    /// Per-target override of Escape / outside-click dismissal
    pub dismiss_on_attr: String,
    /// Per-alert auto-dismiss delay in milliseconds
    pub autodismiss_attr: String,
    /// Attributes read for tooltip text, in priority order
    pub tooltip_text_attrs: Vec<String>,

    pub dropdown_trigger: String,
    pub dropdown_menu_class: String,
    pub collapse_trigger: String,
    pub tab_list: String,
    pub tab_link_class: String,
    pub tab_pane_class: String,
    pub modal_class: String,
    pub backdrop_class: String,
    pub body_open_class: String,
    pub carousel: String,
    pub carousel_item_class: String,
    pub carousel_prev: String,
    pub carousel_next: String,
    pub carousel_indicators: String,
    pub alert: String,
    pub alert_close: String,
    pub tooltip_class: String,
    pub tooltip_inner_class: String,

    /// Marker for open modals, dropdowns, collapses and shown panes
    pub open_class: String,
    /// Marker for the active tab, pane, carousel item and indicator
    pub active_class: String,
    /// Added to alerts while they fade out
    pub fade_class: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            toggle_attrs: strings(&["data-bs-toggle", "data-toggle"]),
            target_attrs: strings(&["data-bs-target", "data-target"]),
            dismiss_attrs: strings(&["data-bs-dismiss", "data-dismiss"]),
            dismiss_on_attr: "data-dismiss-on".to_string(),
            autodismiss_attr: "data-autodismiss".to_string(),
            tooltip_text_attrs: strings(&["title", "data-bs-title", "data-title"]),

            dropdown_trigger: ".dropdown-toggle".to_string(),
            dropdown_menu_class: "dropdown-menu".to_string(),
            collapse_trigger: ".navbar-toggler, .nav-toggler".to_string(),
            tab_list: ".nav-tabs, .nav-pills".to_string(),
            tab_link_class: "nav-link".to_string(),
            tab_pane_class: "tab-pane".to_string(),
            modal_class: "modal".to_string(),
            backdrop_class: "modal-backdrop fade show".to_string(),
            body_open_class: "modal-open".to_string(),
            carousel: ".carousel".to_string(),
            carousel_item_class: "carousel-item".to_string(),
            carousel_prev: ".carousel-control-prev".to_string(),
            carousel_next: ".carousel-control-next".to_string(),
            carousel_indicators: ".carousel-indicators button".to_string(),
            alert: ".alert".to_string(),
            alert_close: ".close-alert".to_string(),
            tooltip_class: "tooltip fade show".to_string(),
            tooltip_inner_class: "tooltip-inner".to_string(),

            open_class: "show".to_string(),
            active_class: "active".to_string(),
            fade_class: "fade".to_string(),
        }
    }
}

/// Conventions with their selectors parsed once
///
/// A selector that fails to parse is logged and matches nothing, so a bad
/// convention disables one widget kind instead of the whole engine.
#[derive(Clone, Debug)]
pub struct CompiledConventions {
    pub raw: Conventions,
    pub dropdown_trigger: Option<Selector>,
    pub collapse_trigger: Option<Selector>,
    pub tab_list: Option<Selector>,
    pub carousel: Option<Selector>,
    pub carousel_prev: Option<Selector>,
    pub carousel_next: Option<Selector>,
    pub carousel_indicators: Option<Selector>,
    pub alert: Option<Selector>,
    pub alert_close: Option<Selector>,
}

impl Conventions {
    fn selectors(&self) -> [(&'static str, &str); 9] {
        [
            ("dropdown_trigger", &self.dropdown_trigger),
            ("collapse_trigger", &self.collapse_trigger),
            ("tab_list", &self.tab_list),
            ("carousel", &self.carousel),
            ("carousel_prev", &self.carousel_prev),
            ("carousel_next", &self.carousel_next),
            ("carousel_indicators", &self.carousel_indicators),
            ("alert", &self.alert),
            ("alert_close", &self.alert_close),
        ]
    }

    /// Check that every convention selector parses
    pub fn validate(&self) -> Result<(), DomError> {
        for (_, selector) in self.selectors() {
            Selector::parse(selector)?;
        }
        Ok(())
    }

    pub fn compile(&self) -> CompiledConventions {
        let [dropdown_trigger, collapse_trigger, tab_list, carousel, carousel_prev, carousel_next, carousel_indicators, alert, alert_close] =
            self.selectors().map(|(name, source)| match Selector::parse(source) {
                Ok(selector) => Some(selector),
                Err(err) => {
                    warn!(convention = name, %err, "convention selector disabled");
                    None
                }
            });
        CompiledConventions {
            raw: self.clone(),
            dropdown_trigger,
            collapse_trigger,
            tab_list,
            carousel,
            carousel_prev,
            carousel_next,
            carousel_indicators,
            alert,
            alert_close,
        }
    }
}
