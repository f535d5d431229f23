//! Scenario files bundling a ruleset, one base and translated names.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    lang::Language,
    models::{Base, BaseView, Ruleset},
};

const SAMPLE_SCENARIO: &str = include_str!("../assets/sample_scenario.json");

/// Game state the front end operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name.
    pub name: String,
    /// Rules interpreting the base.
    pub ruleset: Ruleset,
    /// The base being managed.
    pub base: Base,
    /// Translations layered over the built-in strings.
    #[serde(default)]
    pub strings: HashMap<String, String>,
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let scenario = Self::from_json_str(&contents)
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;
        info!(name = %scenario.name, path = %path.display(), "scenario loaded");
        Ok(scenario)
    }

    /// Parse a scenario, logging any dangling ruleset references.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(contents)?;
        for problem in scenario.ruleset.dangling_references() {
            warn!("ruleset problem in scenario '{}': {problem}", scenario.name);
        }
        Ok(scenario)
    }

    /// The scenario shipped with the binary.
    pub fn sample() -> Result<Self> {
        Self::from_json_str(SAMPLE_SCENARIO).context("built-in sample scenario is invalid")
    }

    /// Load `path` when given, otherwise the built-in sample.
    pub fn load_or_sample(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::sample(),
        }
    }

    /// Built-in strings with this scenario's translations on top.
    pub fn language(&self) -> Language {
        Language::with_overrides(self.strings.clone())
    }

    /// Read-only view joining the base with its ruleset.
    pub fn view(&self) -> BaseView<'_> {
        BaseView::new(&self.base, &self.ruleset)
    }
}
