//! Scenario definition for headless widget runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use switchboard_core::KeyCode;
use switchboard_dom::{NodeSpec, Selector};

/// A page plus the interactions and checks to run against it.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    /// Elements loaded under `<body>` before the engine initialises
    #[serde(default)]
    pub document: Vec<NodeSpec>,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Check that every step selector parses.
    pub fn validate(&self) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            if let Some(selector) = step.selector() {
                Selector::parse(selector)
                    .with_context(|| format!("step {index} ({})", step.name()))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Click { selector: String },
    ClickOutside,
    Key { key: KeyCode },
    PointerEnter { selector: String },
    PointerLeave { selector: String },
    Wait { ms: u64 },
    Tick { frames: u32 },
    Remove { selector: String },
    OpenModal { selector: String },
    CloseModal { selector: String },
    AssertClass {
        selector: String,
        class: String,
        #[serde(default = "default_present")]
        present: bool,
    },
    AssertCount { selector: String, count: usize },
    /// `value: null` asserts the attribute is absent
    AssertAttr {
        selector: String,
        name: String,
        value: Option<String>,
    },
    AssertStyle {
        selector: String,
        property: String,
        value: Option<String>,
    },
}

fn default_present() -> bool {
    true
}

impl ScenarioStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Click { .. } => "click",
            ScenarioStep::ClickOutside => "click_outside",
            ScenarioStep::Key { .. } => "key",
            ScenarioStep::PointerEnter { .. } => "pointer_enter",
            ScenarioStep::PointerLeave { .. } => "pointer_leave",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Remove { .. } => "remove",
            ScenarioStep::OpenModal { .. } => "open_modal",
            ScenarioStep::CloseModal { .. } => "close_modal",
            ScenarioStep::AssertClass { .. } => "assert_class",
            ScenarioStep::AssertCount { .. } => "assert_count",
            ScenarioStep::AssertAttr { .. } => "assert_attr",
            ScenarioStep::AssertStyle { .. } => "assert_style",
        }
    }

    pub fn selector(&self) -> Option<&str> {
        match self {
            ScenarioStep::Click { selector }
            | ScenarioStep::PointerEnter { selector }
            | ScenarioStep::PointerLeave { selector }
            | ScenarioStep::Remove { selector }
            | ScenarioStep::OpenModal { selector }
            | ScenarioStep::CloseModal { selector }
            | ScenarioStep::AssertClass { selector, .. }
            | ScenarioStep::AssertCount { selector, .. }
            | ScenarioStep::AssertAttr { selector, .. }
            | ScenarioStep::AssertStyle { selector, .. } => Some(selector),
            ScenarioStep::ClickOutside
            | ScenarioStep::Key { .. }
            | ScenarioStep::Wait { .. }
            | ScenarioStep::Tick { .. } => None,
        }
    }

    pub fn is_assertion(&self) -> bool {
        self.name().starts_with("assert_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = HeadlessScenario::from_json(
            r##"{
                "document": [{ "tag": "button", "id": "go" }],
                "steps": [
                    { "type": "click", "selector": "#go" },
                    { "type": "key", "key": "Escape" },
                    { "type": "wait", "ms": 150 },
                    { "type": "assert_class", "selector": "#go", "class": "show" },
                    { "type": "assert_attr", "selector": "#go", "name": "aria-expanded", "value": null }
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(scenario.document.len(), 1);
        assert_eq!(scenario.steps.len(), 5);
        assert!(matches!(
            scenario.steps[1],
            ScenarioStep::Key { key: KeyCode::ESCAPE }
        ));
        assert!(matches!(
            scenario.steps[3],
            ScenarioStep::AssertClass { present: true, .. }
        ));
        assert!(scenario.steps[4].is_assertion());
        assert!(!scenario.steps[0].is_assertion());
        scenario.validate().unwrap();
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = HeadlessScenario::from_json(r#"{ "steps": [{ "type": "key", "key": "Hyper" }] }"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown key name"));
    }

    #[test]
    fn test_validate_reports_step() {
        let scenario = HeadlessScenario::from_json(
            r#"{ "steps": [{ "type": "tick", "frames": 1 }, { "type": "click", "selector": ">>" }] }"#,
        )
        .unwrap();
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("step 1 (click)"));
    }
}
