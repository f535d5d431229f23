//! Translation table with `{N}` placeholder substitution.

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("failed to compile placeholder regex"));

const DEFAULT_STRINGS: &[(&str, &str)] = &[
    ("STR_MANAGE_CONTAINMENT", "MANAGE ALIEN CONTAINMENT"),
    ("STR_SPACE_AVAILABLE", "SPACE AVAILABLE> {0}"),
    ("STR_SPACE_USED", "SPACE USED> {0}"),
    ("STR_ALIEN", "ALIEN"),
    ("STR_LIVE_ALIENS", "LIVE ALIENS"),
    ("STR_DEAD_ALIENS", "DEAD ALIENS"),
    ("STR_REMOVE_SELECTED", "REMOVE SELECTED"),
    ("STR_CANCEL", "CANCEL"),
];

/// Translated strings keyed by `STR_*` id.
#[derive(Debug, Clone)]
pub struct Language {
    strings: HashMap<String, String>,
}

impl Default for Language {
    fn default() -> Self {
        Self {
            strings: DEFAULT_STRINGS
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

impl Language {
    /// Built-in English strings overlaid with `overrides`.
    pub fn with_overrides(overrides: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut language = Self::default();
        language.strings.extend(overrides);
        language
    }

    /// Translate `key`, falling back to the key itself.
    pub fn tr(&self, key: &str) -> LocalizedText {
        let text = self
            .strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string());
        LocalizedText(text)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// A translated string awaiting its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText(String);

impl LocalizedText {
    /// Substitute `value` for the lowest-numbered placeholder still present.
    pub fn arg(self, value: impl fmt::Display) -> Self {
        let lowest = PLACEHOLDER_RE
            .captures_iter(&self.0)
            .filter_map(|cap| cap.get(1).and_then(|m| m.as_str().parse::<u32>().ok()))
            .min();
        match lowest {
            Some(index) => {
                let placeholder = format!("{{{index}}}");
                Self(self.0.replace(&placeholder, &value.to_string()))
            }
            None => self,
        }
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<LocalizedText> for String {
    fn from(text: LocalizedText) -> Self {
        text.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_fill_placeholders_in_order() {
        let language = Language::with_overrides([(
            "STR_TRANSFER".to_string(),
            "{1} of {0} moved, {1} left".to_string(),
        )]);
        let text = language.tr("STR_TRANSFER").arg("Omega").arg(3);
        assert_eq!(text.as_str(), "3 of Omega moved, 3 left");
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        let language = Language::default();
        assert_eq!(language.tr("STR_SECTOID_SOLDIER").as_str(), "STR_SECTOID_SOLDIER");
        assert_eq!(
            language.tr("STR_SPACE_USED").arg(-2).into_string(),
            "SPACE USED> -2"
        );
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let language = Language::default();
        let text = language.tr("STR_CANCEL").arg(7);
        assert_eq!(text.to_string(), "CANCEL");
    }
}
