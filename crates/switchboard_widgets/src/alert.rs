//! Dismissible alerts
//!
//! Dismissing an alert fades it out and removes it from the document after
//! `close_delay_ms`. Alerts may also dismiss themselves after a delay taken
//! from `data-autodismiss` or the engine-wide `alert_auto_dismiss_ms`.
//! Every timer belongs to its alert, so an alert removed by other means
//! takes its pending timers with it.

use switchboard_core::TimerId;
use switchboard_dom::NodeId;
use tracing::{debug, trace, warn};

use crate::engine::{Engine, TimerTask};
use crate::kind::WidgetKind;
use crate::registry::WidgetState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertPhase {
    Shown,
    Dismissing { remove: TimerId },
}

impl Engine {
    pub fn alert_phase(&self, alert: NodeId) -> Option<AlertPhase> {
        match self.registry.state(alert) {
            Some(WidgetState::Alert(phase)) => Some(*phase),
            _ => None,
        }
    }

    /// Start fading an alert out
    pub fn dismiss_alert(&mut self, alert: NodeId) -> bool {
        match self.alert_phase(alert) {
            Some(AlertPhase::Shown) => {}
            Some(AlertPhase::Dismissing { .. }) => return false,
            None => {
                debug!("dismiss requested for an element that is not an alert");
                return false;
            }
        }

        self.timers.cancel_owned_by(alert);
        let remove = self
            .timers
            .schedule(alert, self.config.close_delay_ms, TimerTask::RemoveAlert);
        if let Some(target) = self.registry.target_mut(alert) {
            target.state = WidgetState::Alert(AlertPhase::Dismissing { remove });
        }

        let raw = &self.conventions.raw;
        self.doc.add_class(alert, &raw.fade_class);
        self.doc.remove_class(alert, &raw.open_class);
        trace!("alert dismissing");
        true
    }

    pub(crate) fn finish_dismiss_alert(&mut self, alert: NodeId) {
        if matches!(self.alert_phase(alert), Some(AlertPhase::Dismissing { .. })) {
            self.remove_element(alert);
        }
    }

    /// Arm auto-dismissal for shown alerts that have no timer yet
    pub(crate) fn schedule_auto_dismiss(&mut self) {
        for alert in self.registry.targets_of(WidgetKind::Alert) {
            if self.alert_phase(alert) != Some(AlertPhase::Shown)
                || self.timers.pending_for(alert) > 0
            {
                continue;
            }
            let Some(delay) = self.auto_dismiss_delay(alert) else {
                continue;
            };
            self.timers
                .schedule(alert, delay, TimerTask::AutoDismissAlert);
            trace!(delay_ms = delay, "alert auto-dismiss armed");
        }
    }

    fn auto_dismiss_delay(&self, alert: NodeId) -> Option<u64> {
        let attr = &self.conventions.raw.autodismiss_attr;
        match self.doc.attr(alert, attr) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(delay) => Some(delay),
                Err(_) => {
                    warn!(value, "invalid auto-dismiss delay, using default");
                    self.config.alert_auto_dismiss_ms
                }
            },
            None => self.config.alert_auto_dismiss_ms,
        }
    }
}
