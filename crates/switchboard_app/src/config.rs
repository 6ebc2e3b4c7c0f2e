//! Runner configuration file handling (switchboard.toml)
//!
//! ```toml
//! [engine]
//! modal_policy = "stack"
//! close_delay_ms = 150
//!
//! [conventions]
//! open_class = "is-open"
//!
//! [headless]
//! tick_ms = 16
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use switchboard_widgets::{Conventions, EngineConfig};

use crate::headless_runtime::HeadlessRunConfig;

/// Top-level runner configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    /// Markup conventions; overrides `[engine.conventions]` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conventions: Option<Conventions>,
    #[serde(default)]
    pub headless: HeadlessConfig,
}

/// Frame loop settings for scenario runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeadlessConfig {
    /// Logical milliseconds between frames
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Sample engine state every N frames
    #[serde(default = "default_probe_every_frames")]
    pub probe_every_frames: u32,
}

fn default_tick_ms() -> u64 {
    16
}

fn default_probe_every_frames() -> u32 {
    4
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            probe_every_frames: default_probe_every_frames(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config
            .conventions()
            .validate()
            .context("Invalid markup convention")?;
        Ok(config)
    }

    /// Load `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn conventions(&self) -> &Conventions {
        self.conventions
            .as_ref()
            .unwrap_or(&self.engine.conventions)
    }

    /// Engine settings with the effective conventions folded in
    pub fn engine_config(&self) -> EngineConfig {
        let mut engine = self.engine.clone();
        if let Some(conventions) = &self.conventions {
            engine.conventions = conventions.clone();
        }
        engine
    }

    pub fn run_config(&self) -> HeadlessRunConfig {
        HeadlessRunConfig {
            tick_ms: self.headless.tick_ms,
            probe_every_frames: self.headless.probe_every_frames,
            ..HeadlessRunConfig::default()
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use switchboard_widgets::ModalPolicy;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.headless.tick_ms, 16);
        assert_eq!(config.engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_sections() {
        let config = AppConfig::from_toml(
            r#"
            [engine]
            modal_policy = "stack"
            alert_auto_dismiss_ms = 5000

            [conventions]
            open_class = "is-open"

            [headless]
            tick_ms = 10
            "#,
        )
        .unwrap();
        let engine = config.engine_config();
        assert_eq!(engine.modal_policy, ModalPolicy::Stack);
        assert_eq!(engine.alert_auto_dismiss_ms, Some(5000));
        assert_eq!(engine.close_delay_ms, 150);
        assert_eq!(engine.conventions.open_class, "is-open");
        assert_eq!(engine.conventions.active_class, "active");
        assert_eq!(config.headless.tick_ms, 10);
        assert_eq!(config.headless.probe_every_frames, 4);
        assert_eq!(config.run_config().tick_ms, 10);
    }

    #[test]
    fn test_top_level_conventions_win() {
        let config = AppConfig::from_toml(
            r#"
            [engine.conventions]
            open_class = "nested"

            [conventions]
            open_class = "top"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine_config().conventions.open_class, "top");
    }

    #[test]
    fn test_invalid_convention_selector_is_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [conventions]
            carousel = "..carousel"
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Invalid markup convention"));
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = std::env::temp_dir().join("switchboard_config_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("switchboard.toml");
        let mut config = AppConfig::default();
        config.headless.tick_ms = 8;
        fs::write(&path, config.to_toml().unwrap()).unwrap();
        assert_eq!(AppConfig::load_from_path(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = AppConfig::load_from_path(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
