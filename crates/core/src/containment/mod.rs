//! Alien containment management: marking live specimens for extermination.
//!
//! The controller never owns game state. It reads stores and capacity through
//! the traits below and only mutates stores when a commit is applied.

mod controller;
mod repeat;
mod view;

pub use controller::{
    CommitReport, ContainmentController, ContainmentFigures, ContainmentLine, ContainmentOutcome,
    ControllerSettings, ExterminatedSpecies, WheelSettings, TO_LIMIT,
};
pub use repeat::{Direction, RepeatState, RepeatTimer, RepeatTiming};
pub use view::{ContainmentDisplay, ContainmentRow};

use crate::error::Result;

/// Read access to a base's stores.
pub trait Inventory {
    /// Units of `item` currently held.
    fn quantity(&self, item: &str) -> u32;
}

/// Write access to a base's stores.
pub trait InventoryMut: Inventory {
    /// Remove `count` units of `item`. Fails when fewer are held.
    fn remove_quantity(&mut self, item: &str, count: u32) -> Result<()>;
    /// Add `count` units of `item`.
    fn add_quantity(&mut self, item: &str, count: u32);
}

/// Live containment figures of a base.
pub trait ContainmentCapacity {
    /// Space taken by stored specimens and specimens under interrogation.
    fn used_containment(&self) -> u64;
    /// Space provided by operational containment facilities.
    fn available_containment(&self) -> u64;
}

/// Ruleset queries needed to manage specimens.
pub trait SpecimenRules {
    /// Every item id in ruleset enumeration order.
    fn item_ids(&self) -> Vec<&str>;
    /// Whether `item` is a live alien specimen.
    fn is_alien_specimen(&self, item: &str) -> bool;
    /// Whether a research topic names an alien unit (an interrogation).
    fn is_alien_unit(&self, topic: &str) -> bool;
    /// Corpse item produced when `species` is exterminated.
    fn corpse_item_for(&self, species: &str) -> Result<String>;
}
