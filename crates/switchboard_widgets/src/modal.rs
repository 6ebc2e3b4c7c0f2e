//! Modal dialogs, the page scroll lock and the shared backdrop

use switchboard_core::TimerId;
use switchboard_dom::NodeId;
use tracing::{debug, trace};

use crate::config::ModalPolicy;
use crate::engine::{Engine, TimerTask};
use crate::kind::WidgetKind;
use crate::registry::WidgetState;

/// Modal lifecycle
///
/// `Closing` covers the fade-out: the open marker is already gone but the
/// dialog stays displayed until its hide timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Open,
    Closing { hide: TimerId },
}

impl ModalPhase {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalPhase::Open)
    }
}

impl Engine {
    pub fn modal_phase(&self, modal: NodeId) -> Option<ModalPhase> {
        match self.registry.state(modal) {
            Some(WidgetState::Modal(phase)) => Some(*phase),
            _ => None,
        }
    }

    /// Open modals, most recently opened last
    pub fn open_modals(&self) -> &[NodeId] {
        &self.modal_stack
    }

    pub fn backdrop(&self) -> Option<NodeId> {
        self.backdrop
    }

    /// Show a modal, returning false when it was already open or is not a
    /// registered modal
    pub fn open_modal(&mut self, modal: NodeId) -> bool {
        match self.modal_phase(modal) {
            Some(ModalPhase::Open) => return false,
            Some(ModalPhase::Closing { hide }) => {
                self.timers.cancel(hide);
            }
            Some(ModalPhase::Closed) => {}
            None => {
                debug!("open requested for an element that is not a modal");
                return false;
            }
        }

        self.set_modal_phase(modal, ModalPhase::Open);
        self.modal_stack.retain(|m| *m != modal);
        self.modal_stack.push(modal);

        if self.config.modal_policy == ModalPolicy::Exclusive {
            let others: Vec<NodeId> = self
                .modal_stack
                .iter()
                .copied()
                .filter(|m| *m != modal)
                .collect();
            for other in others {
                self.close_modal(other);
            }
        }

        let raw = &self.conventions.raw;
        self.doc.set_style(modal, "display", "block");
        self.doc.add_class(modal, &raw.open_class);
        self.doc.remove_attr(modal, "aria-hidden");
        self.doc.set_attr(modal, "aria-modal", "true");
        self.lock_page();
        trace!(open = self.modal_stack.len(), "modal opened");
        true
    }

    /// Start closing a modal
    ///
    /// A modal that is not open is left untouched and false is returned.
    pub fn close_modal(&mut self, modal: NodeId) -> bool {
        match self.modal_phase(modal) {
            Some(ModalPhase::Open) => {}
            Some(_) => {
                debug!("close requested for a modal that is not open");
                return false;
            }
            None => {
                debug!("close requested for an element that is not a modal");
                return false;
            }
        }

        let hide = self
            .timers
            .schedule(modal, self.config.close_delay_ms, TimerTask::HideModal);
        self.set_modal_phase(modal, ModalPhase::Closing { hide });
        self.modal_stack.retain(|m| *m != modal);

        let raw = &self.conventions.raw;
        self.doc.remove_class(modal, &raw.open_class);
        self.doc.set_attr(modal, "aria-hidden", "true");
        self.doc.remove_attr(modal, "aria-modal");
        if self.modal_stack.is_empty() {
            self.unlock_page();
        }
        trace!(open = self.modal_stack.len(), "modal closing");
        true
    }

    pub(crate) fn finish_close_modal(&mut self, modal: NodeId, timer: TimerId) {
        if self.modal_phase(modal) != Some(ModalPhase::Closing { hide: timer }) {
            return;
        }
        self.set_modal_phase(modal, ModalPhase::Closed);
        self.doc.set_style(modal, "display", "none");
        trace!("modal hidden");
    }

    /// Backdrop clicks close the top-most modal, clicks on the modal element
    /// itself (not its content) close that modal
    pub(crate) fn click_modal_surface(&mut self, origin: NodeId) {
        let modal = if Some(origin) == self.backdrop {
            self.modal_stack.last().copied()
        } else if self.modal_phase(origin) == Some(ModalPhase::Open) {
            Some(origin)
        } else {
            None
        };
        let Some(modal) = modal else {
            return;
        };
        if self
            .registry
            .target(modal)
            .is_some_and(|t| t.dismissal.outside)
        {
            self.close_modal(modal);
        }
    }

    pub(crate) fn close_top_modal_on_escape(&mut self) {
        let Some(&top) = self.modal_stack.last() else {
            return;
        };
        if self.registry.target(top).is_some_and(|t| t.dismissal.escape) {
            self.close_modal(top);
        }
    }

    /// Rebuild the open-modal stack after a scan, keeping the existing order
    pub(crate) fn sync_modal_stack(&mut self) {
        let open: Vec<NodeId> = self
            .registry
            .targets_of(WidgetKind::Modal)
            .into_iter()
            .filter(|m| self.modal_phase(*m) == Some(ModalPhase::Open))
            .collect();
        self.modal_stack.retain(|m| open.contains(m));
        for modal in open {
            if !self.modal_stack.contains(&modal) {
                self.modal_stack.push(modal);
            }
        }
        if self.modal_stack.is_empty() {
            return;
        }

        // Modals marked open in markup get the same side effects as opened ones
        let raw = &self.conventions.raw;
        for &modal in &self.modal_stack {
            self.doc.set_style(modal, "display", "block");
            self.doc.add_class(modal, &raw.open_class);
            self.doc.remove_attr(modal, "aria-hidden");
            self.doc.set_attr(modal, "aria-modal", "true");
        }
        self.lock_page();
    }

    pub(crate) fn forget_modals(&mut self, removed: &[NodeId]) {
        let had_open = !self.modal_stack.is_empty();
        self.modal_stack.retain(|m| !removed.contains(m));
        if self.backdrop.is_some_and(|b| removed.contains(&b)) {
            self.backdrop = None;
        }
        if had_open && self.modal_stack.is_empty() {
            self.unlock_page();
        }
    }

    fn set_modal_phase(&mut self, modal: NodeId, phase: ModalPhase) {
        if let Some(target) = self.registry.target_mut(modal) {
            target.state = WidgetState::Modal(phase);
        }
    }

    fn lock_page(&mut self) {
        let body = self.doc.body();
        let raw = &self.conventions.raw;
        self.doc.add_class(body, &raw.body_open_class);
        self.doc.set_style(body, "overflow", "hidden");

        if self.backdrop.is_some_and(|b| self.doc.exists(b)) {
            return;
        }
        let backdrop = self.doc.create_element("div");
        self.doc.set_attr(backdrop, "class", &raw.backdrop_class);
        self.doc.append_child(body, backdrop);
        self.backdrop = Some(backdrop);
        trace!("backdrop created");
    }

    fn unlock_page(&mut self) {
        let body = self.doc.body();
        self.doc.remove_class(body, &self.conventions.raw.body_open_class);
        self.doc.remove_style(body, "overflow");
        if let Some(backdrop) = self.backdrop.take() {
            self.doc.remove(backdrop);
            trace!("backdrop removed");
        }
    }
}
