//! Application configuration: defaults, a JSON file and `CONTAINMENT_*` overrides.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::containment::{ControllerSettings, RepeatTiming, WheelSettings};

/// Directory under the user's config dir holding `config.json`.
pub const CONFIG_DIR: &str = "xcom-containment";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CONTAINMENT";

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Block leaving the containment screen while over capacity.
    pub containment_limit_enforced: bool,
    /// Units moved per mouse-wheel notch over the arrow column.
    pub change_value_by_mouse_wheel: u32,
    /// Whether the mouse wheel adjusts counts at all.
    pub allow_change_list_values_by_mouse_wheel: bool,
    /// Delay before a held arrow starts repeating.
    pub repeat_initial_delay_ms: u64,
    /// Delay between repeats once started.
    pub repeat_interval_ms: u64,
    /// Scenario to load instead of the built-in sample.
    pub scenario_path: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            containment_limit_enforced: true,
            change_value_by_mouse_wheel: 10,
            allow_change_list_values_by_mouse_wheel: true,
            repeat_initial_delay_ms: 250,
            repeat_interval_ms: 50,
            scenario_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, which may be missing. Environment overrides win.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(
                File::from(path)
                    .format(FileFormat::Json)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Write this configuration as pretty JSON, creating parent directories.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let serialized =
            serde_json::to_string_pretty(self).context("failed to serialize configuration")?;
        fs::write(path, serialized).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Wheel behaviour derived from the two wheel options.
    pub fn wheel_settings(&self) -> WheelSettings {
        WheelSettings::new(
            self.change_value_by_mouse_wheel,
            self.allow_change_list_values_by_mouse_wheel,
        )
    }

    /// Held-arrow timing in milliseconds from the config.
    pub fn repeat_timing(&self) -> RepeatTiming {
        RepeatTiming {
            initial_delay: Duration::from_millis(self.repeat_initial_delay_ms),
            interval: Duration::from_millis(self.repeat_interval_ms),
        }
    }

    /// Settings for a containment screen opened under this configuration.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            limit_enforced: self.containment_limit_enforced,
            wheel: self.wheel_settings(),
            repeat: self.repeat_timing(),
        }
    }
}

/// Default configuration file path.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.json")
}

/// Write the default configuration to `path` unless a file already exists.
pub fn ensure_default_config_at(path: impl Into<PathBuf>) -> Result<PathBuf> {
    let path = path.into();
    if !path.exists() {
        AppConfig::default().persist(&path)?;
        info!("wrote default configuration to {}", path.display());
    }
    Ok(path)
}
