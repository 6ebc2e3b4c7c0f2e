//! Switchboard Headless Runner
//!
//! Loads a page and a script of interactions from JSON, drives the widget
//! engine through them on a deterministic frame clock and reports the
//! first failed check:
//!
//! - **Config**: `switchboard.toml` with `[engine]`, `[conventions]` and
//!   `[headless]` tables
//! - **Scenarios**: clicks, key presses, pointer crossings, waits and
//!   assertions on classes, attributes, styles and match counts
//! - **Reports**: machine-readable JSON results
//!
//! # Example
//!
//! ```rust
//! use switchboard_app::{run_scenario, AppConfig};
//!
//! let scenario = r##"{
//!     "document": [
//!         { "tag": "button", "id": "t", "class": "dropdown-toggle" },
//!         { "tag": "ul", "id": "m", "class": "dropdown-menu" }
//!     ],
//!     "steps": [
//!         { "type": "click", "selector": "#t" },
//!         { "type": "assert_class", "selector": "#m", "class": "show" }
//!     ]
//! }"##;
//! let outcome = run_scenario(scenario, &AppConfig::default()).unwrap();
//! assert!(!outcome.is_failed());
//! ```

pub mod config;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;

pub use config::{AppConfig, HeadlessConfig};
pub use headless_assert::AssertionResult;
pub use headless_report::{FrameSample, HeadlessReport, ReportStatus};
pub use headless_runner::{
    run_loaded_scenario, run_loaded_scenario_with_probe, run_scenario, ProbeContext, RunOutcome,
};
pub use headless_runtime::{HeadlessContext, HeadlessRunConfig, HeadlessRuntime};
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
