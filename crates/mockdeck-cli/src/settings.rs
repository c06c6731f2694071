//! Optional YAML settings file.

use anyhow::Context;
use mockdeck_editor::SavePolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor settings read from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// What saving a mock into a different scenario does
    #[serde(default)]
    pub save_policy: SavePolicy,

    /// Log filter used when `MOCKDECK_LOG` / `--log-level` are not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Scenario created on first use when the store file is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_scenario: Option<String>,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(name) = &self.default_scenario {
            if name.trim().is_empty() {
                anyhow::bail!("'default_scenario' must not be blank");
            }
        }
        Ok(())
    }
}
