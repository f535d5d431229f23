//! Static game rules: items, alien units, armors and base facilities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    containment::SpecimenRules,
    error::{ContainmentError, Result},
};

/// Definition of a storable item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRule {
    /// String id, also the translation key.
    pub id: String,
    /// Whether the item is an alien specimen occupying containment space.
    #[serde(default)]
    pub alien: bool,
}

/// Definition of an alien unit type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRule {
    /// Armor id worn by this unit.
    pub armor: String,
}

/// Definition of an armor type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorRule {
    /// Item left behind when a unit wearing this armor dies.
    #[serde(default)]
    pub corpse_item: Option<String>,
}

/// Definition of a base facility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilityRule {
    /// Alien containment capacity contributed once built.
    #[serde(default)]
    pub aliens: u32,
}

/// Complete ruleset used by a scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ruleset {
    /// Items in enumeration order; screens list items in this order.
    #[serde(default)]
    pub items: Vec<ItemRule>,
    /// Alien units keyed by id. A live specimen's item id is its unit id.
    #[serde(default)]
    pub units: HashMap<String, UnitRule>,
    /// Armors keyed by id.
    #[serde(default)]
    pub armors: HashMap<String, ArmorRule>,
    /// Facilities keyed by id.
    #[serde(default)]
    pub facilities: HashMap<String, FacilityRule>,
}

impl Ruleset {
    /// Look up an item definition.
    pub fn item(&self, id: &str) -> Option<&ItemRule> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Look up a unit definition.
    pub fn unit(&self, id: &str) -> Option<&UnitRule> {
        self.units.get(id)
    }

    /// Look up a facility definition.
    pub fn facility(&self, id: &str) -> Option<&FacilityRule> {
        self.facilities.get(id)
    }

    /// Item ids in enumeration order.
    pub fn items_list(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    /// Check that every id referenced by the ruleset resolves.
    ///
    /// Returns one message per dangling reference; an empty list means the
    /// ruleset is consistent.
    pub fn dangling_references(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for item in self.items.iter().filter(|item| item.alien) {
            if let Err(err) = self.corpse_item_for(&item.id) {
                problems.push(err.to_string());
            }
        }
        for (id, armor) in &self.armors {
            if let Some(corpse) = armor.corpse_item.as_deref() {
                if self.item(corpse).is_none() {
                    problems.push(format!("armor '{id}' drops unknown item '{corpse}'"));
                }
            }
        }
        problems
    }
}

impl SpecimenRules for Ruleset {
    fn item_ids(&self) -> Vec<&str> {
        self.items_list().collect()
    }

    fn is_alien_specimen(&self, item: &str) -> bool {
        self.item(item).map(|rule| rule.alien).unwrap_or(false)
    }

    fn is_alien_unit(&self, topic: &str) -> bool {
        self.units.contains_key(topic)
    }

    fn corpse_item_for(&self, species: &str) -> Result<String> {
        let missing = |reason: String| ContainmentError::MissingCorpse {
            species: species.to_string(),
            reason,
        };
        let unit = self
            .unit(species)
            .ok_or_else(|| missing("no unit definition".to_string()))?;
        let armor = self
            .armors
            .get(&unit.armor)
            .ok_or_else(|| missing(format!("unknown armor '{}'", unit.armor)))?;
        armor
            .corpse_item
            .clone()
            .filter(|corpse| !corpse.is_empty())
            .ok_or_else(|| missing(format!("armor '{}' has no corpse item", unit.armor)))
    }
}
