#![allow(missing_docs)]

//! Player base state: stores, facilities and research in progress.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    containment::{ContainmentCapacity, Inventory, InventoryMut, SpecimenRules},
    error::{ContainmentError, Result},
};

use super::Ruleset;

/// Item quantities kept in a base's general stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemContainer {
    items: BTreeMap<String, u32>,
}

impl ItemContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over items with a nonzero quantity.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(id, qty)| (id.as_str(), *qty))
    }

    /// Total number of stored units.
    pub fn total(&self) -> u64 {
        self.items.values().map(|qty| u64::from(*qty)).sum()
    }
}

impl FromIterator<(String, u32)> for ItemContainer {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Inventory for ItemContainer {
    fn quantity(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }
}

impl InventoryMut for ItemContainer {
    fn remove_quantity(&mut self, item: &str, count: u32) -> Result<()> {
        let available = self.quantity(item);
        if count > available {
            return Err(ContainmentError::InsufficientStock {
                item: item.to_string(),
                requested: count,
                available,
            });
        }
        if count == available {
            self.items.remove(item);
        } else {
            self.items.insert(item.to_string(), available - count);
        }
        Ok(())
    }

    fn add_quantity(&mut self, item: &str, count: u32) {
        if count == 0 {
            return;
        }
        let held = self.items.entry(item.to_string()).or_insert(0);
        *held = held.saturating_add(count);
    }
}

/// A facility placed in a base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    /// Facility rule id.
    pub rule: String,
    /// Days left until construction completes; zero means operational.
    #[serde(default)]
    pub build_days: u32,
}

impl Facility {
    pub fn is_operational(&self) -> bool {
        self.build_days == 0
    }
}

/// A research project running at a base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchProject {
    /// Research topic id. Interrogations use the alien unit's id.
    pub topic: String,
}

/// A player base.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Base {
    pub name: String,
    #[serde(default)]
    pub items: ItemContainer,
    #[serde(default)]
    pub facilities: Vec<Facility>,
    #[serde(default)]
    pub research: Vec<ResearchProject>,
}

impl Base {
    /// Number of research projects whose topic is a live alien.
    ///
    /// Those specimens are locked in the lab and cannot be exterminated.
    pub fn researched_aliens(&self, rules: &impl SpecimenRules) -> u32 {
        self.research
            .iter()
            .filter(|project| rules.is_alien_unit(&project.topic))
            .count() as u32
    }

    /// Live specimens held in stores.
    pub fn stored_aliens(&self, rules: &impl SpecimenRules) -> u64 {
        self.items
            .iter()
            .filter(|(id, _)| rules.is_alien_specimen(id))
            .map(|(_, qty)| u64::from(qty))
            .sum()
    }

    /// Containment space in use: stored specimens plus those under interrogation.
    pub fn used_containment(&self, rules: &impl SpecimenRules) -> u64 {
        self.stored_aliens(rules) + u64::from(self.researched_aliens(rules))
    }

    /// Containment space provided by operational facilities.
    pub fn available_containment(&self, rules: &Ruleset) -> u64 {
        self.facilities
            .iter()
            .filter(|facility| facility.is_operational())
            .filter_map(|facility| rules.facility(&facility.rule))
            .map(|rule| u64::from(rule.aliens))
            .sum()
    }
}

/// Read-only view joining a base with the ruleset that interprets it.
#[derive(Debug, Clone, Copy)]
pub struct BaseView<'a> {
    base: &'a Base,
    rules: &'a Ruleset,
}

impl<'a> BaseView<'a> {
    pub fn new(base: &'a Base, rules: &'a Ruleset) -> Self {
        Self { base, rules }
    }

    pub fn base(&self) -> &'a Base {
        self.base
    }

    pub fn rules(&self) -> &'a Ruleset {
        self.rules
    }
}

impl Inventory for BaseView<'_> {
    fn quantity(&self, item: &str) -> u32 {
        self.base.items.quantity(item)
    }
}

impl ContainmentCapacity for BaseView<'_> {
    fn used_containment(&self) -> u64 {
        self.base.used_containment(self.rules)
    }

    fn available_containment(&self) -> u64 {
        self.base.available_containment(self.rules)
    }
}
