//! Widget kinds and dismissal rules

use tracing::warn;

/// The closed set of widget kinds the engine manages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Dropdown,
    Modal,
    Collapse,
    Tab,
    Tooltip,
    Carousel,
    Alert,
}

impl WidgetKind {
    /// Kind named by a toggle attribute value (`data-toggle="modal"`)
    ///
    /// Carousels and alerts are recognised structurally, not by toggle value.
    pub fn from_toggle_value(value: &str) -> Option<Self> {
        match value.trim() {
            "dropdown" => Some(Self::Dropdown),
            "modal" => Some(Self::Modal),
            "collapse" => Some(Self::Collapse),
            "tab" | "pill" => Some(Self::Tab),
            "tooltip" => Some(Self::Tooltip),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dropdown => "dropdown",
            Self::Modal => "modal",
            Self::Collapse => "collapse",
            Self::Tab => "tab",
            Self::Tooltip => "tooltip",
            Self::Carousel => "carousel",
            Self::Alert => "alert",
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which document-level gestures close an open target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dismissal {
    pub escape: bool,
    pub outside: bool,
}

impl Dismissal {
    pub const NONE: Dismissal = Dismissal {
        escape: false,
        outside: false,
    };

    /// Modals close on Escape and on backdrop clicks, dropdowns on any
    /// click that is not absorbed by a dropdown trigger.
    pub fn default_for(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Modal => Dismissal {
                escape: true,
                outside: true,
            },
            WidgetKind::Dropdown => Dismissal {
                escape: false,
                outside: true,
            },
            _ => Dismissal::NONE,
        }
    }

    /// Parse a `data-dismiss-on` value: `none` or a comma list of
    /// `escape` / `outside`
    pub fn parse(value: &str) -> Self {
        let mut dismissal = Dismissal::NONE;
        for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token {
                "escape" | "esc" => dismissal.escape = true,
                "outside" => dismissal.outside = true,
                "none" => {}
                other => warn!(token = other, "unknown dismissal gesture ignored"),
            }
        }
        dismissal
    }
}
