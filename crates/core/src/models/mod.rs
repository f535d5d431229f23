//! Shared game models.

/// Base stores, facilities and research.
pub mod base;
/// Item, unit, armor and facility rules.
pub mod ruleset;

pub use base::{Base, BaseView, Facility, ItemContainer, ResearchProject};
pub use ruleset::{ArmorRule, FacilityRule, ItemRule, Ruleset, UnitRule};
