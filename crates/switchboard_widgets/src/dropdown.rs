//! Dropdown menus and collapsible regions
//!
//! Both kinds flip the open marker on their target and mirror the result
//! into `aria-expanded` on every bound trigger. Opening a dropdown closes
//! every other dropdown; collapses are independent of each other.

use switchboard_dom::NodeId;
use tracing::{debug, trace};

use crate::engine::Engine;
use crate::kind::WidgetKind;
use crate::registry::WidgetState;

impl Engine {
    /// Whether a dropdown, collapse or modal is currently open
    pub fn is_open(&self, target: NodeId) -> bool {
        self.registry.state(target).is_some_and(WidgetState::is_open)
    }

    /// Toggle a dropdown menu, returning whether it is now open
    pub fn toggle_dropdown(&mut self, menu: NodeId) -> bool {
        let Some(&WidgetState::Dropdown { open }) = self.registry.state(menu) else {
            debug!("toggle requested for an element that is not a dropdown");
            return false;
        };
        for other in self.registry.targets_of(WidgetKind::Dropdown) {
            if other != menu {
                self.set_open(other, false);
            }
        }
        self.set_open(menu, !open);
        !open
    }

    /// Toggle a collapsible region, returning whether it is now open
    pub fn toggle_collapse(&mut self, target: NodeId) -> bool {
        let Some(&WidgetState::Collapse { open }) = self.registry.state(target) else {
            debug!("toggle requested for an element that is not a collapse");
            return false;
        };
        self.set_open(target, !open);
        !open
    }

    /// Open or close a dropdown or collapse target and project the change
    ///
    /// Returns false when nothing changed.
    pub fn set_open(&mut self, target: NodeId, open: bool) -> bool {
        let Some(entry) = self.registry.target_mut(target) else {
            return false;
        };
        match &mut entry.state {
            WidgetState::Dropdown { open: current } | WidgetState::Collapse { open: current } => {
                if *current == open {
                    return false;
                }
                *current = open;
            }
            _ => return false,
        }
        let kind = entry.kind;

        let raw = &self.conventions.raw;
        self.doc.set_class(target, &raw.open_class, open);
        let expanded = if open { "true" } else { "false" };
        for trigger in &entry.triggers {
            self.doc.set_attr(*trigger, "aria-expanded", expanded);
        }
        trace!(%kind, open, "toggle target updated");
        true
    }

    /// Document-level click handling: close what an outside click dismisses
    ///
    /// Dropdowns close on any click that reached the document. Collapses
    /// that opt in close only when the click landed outside them and their
    /// triggers.
    pub(crate) fn dismiss_outside(&mut self, origin: NodeId) {
        for menu in self.registry.targets_of(WidgetKind::Dropdown) {
            if self.dismisses_outside(menu) {
                self.set_open(menu, false);
            }
        }
        for region in self.registry.targets_of(WidgetKind::Collapse) {
            if !self.dismisses_outside(region) || self.doc.contains(region, origin) {
                continue;
            }
            let on_trigger = self.registry.target(region).is_some_and(|t| {
                t.triggers
                    .iter()
                    .any(|trigger| self.doc.contains(*trigger, origin))
            });
            if !on_trigger {
                self.set_open(region, false);
            }
        }
    }

    pub(crate) fn dismiss_on_escape(&mut self) {
        for kind in [WidgetKind::Dropdown, WidgetKind::Collapse] {
            for target in self.registry.targets_of(kind) {
                let escape = self
                    .registry
                    .target(target)
                    .is_some_and(|t| t.dismissal.escape && t.state.is_open());
                if escape {
                    self.set_open(target, false);
                }
            }
        }
    }

    fn dismisses_outside(&self, target: NodeId) -> bool {
        self.registry
            .target(target)
            .is_some_and(|t| t.dismissal.outside && t.state.is_open())
    }
}
