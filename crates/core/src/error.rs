#![allow(missing_docs)]

//! Error types surfaced by the containment model and controller.

use thiserror::Error;

/// Shared `Result` alias for the core crate.
pub type Result<T> = std::result::Result<T, ContainmentError>;

/// Failures raised by containment operations.
///
/// Arithmetic requests that cannot move a counter (zero amount, nothing left to
/// mark, nothing marked) are no-ops and never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainmentError {
    /// The base holds no live specimens, so the screen must not be opened.
    #[error("no live alien specimens are held at this base")]
    NoSpecimens,

    /// A line index outside the specimen list was selected.
    #[error("line {index} is out of range ({len} lines)")]
    SelectionOutOfRange { index: usize, len: usize },

    /// The ruleset cannot turn a species into a corpse item.
    #[error("no corpse item for species '{species}': {reason}")]
    MissingCorpse { species: String, reason: String },

    /// Cancel was requested while the base is over its containment limit.
    #[error("containment is overcrowded; aliens must be removed before leaving")]
    CancelBlocked,

    /// Confirm was requested before enough specimens were marked.
    #[error("not enough containment space ({spaces_free} free)")]
    InsufficientSpace { spaces_free: i64 },

    /// An item id was not found in the ruleset.
    #[error("unknown item '{item}'")]
    UnknownItem { item: String },

    /// More units were removed from stores than the base holds.
    #[error("cannot remove {requested} of '{item}', only {available} in stores")]
    InsufficientStock {
        item: String,
        requested: u32,
        available: u32,
    },
}
