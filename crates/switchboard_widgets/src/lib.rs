//! Switchboard Widget Engine
//!
//! Declarative UI toggling for a headless document. Markup marks triggers
//! and targets; the engine scans them once and then reacts to events:
//!
//! - **Dropdowns**: mutually exclusive menus, closed by outside clicks
//! - **Collapses**: independent show/hide regions
//! - **Modals**: open/close with fade-out, page scroll lock and a shared backdrop
//! - **Tabs**: one active trigger and pane per group
//! - **Tooltips**: hover bubbles positioned above their trigger
//! - **Carousels**: cyclic slide index with controls and indicators
//! - **Alerts**: dismiss buttons and timed auto-dismissal
//!
//! State lives in the [`Registry`]; the document is a projection of it.

pub mod alert;
pub mod carousel;
pub mod config;
pub mod dropdown;
pub mod engine;
pub mod kind;
pub mod modal;
pub mod registry;
pub mod tabs;
pub mod tooltip;

pub use alert::AlertPhase;
pub use carousel::CarouselState;
pub use config::{CompiledConventions, Conventions, EngineConfig, ModalPolicy};
pub use engine::Engine;
pub use kind::{Dismissal, WidgetKind};
pub use modal::ModalPhase;
pub use registry::{Binding, CarouselStep, Registry, Target, WidgetState};
pub use tooltip::{place_tooltip, ActiveTooltip, MonospaceMeasure, TextMeasure};
