#![allow(missing_docs)]

//! Display-facing rows and the sink that receives them.

/// One rendered line of the containment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainmentRow {
    /// Translated species name.
    pub label: String,
    /// Live specimens that will remain after the pending removal.
    pub remaining: u32,
    /// Specimens marked for extermination.
    pub pending: u32,
    /// Drawn in the highlight colour while live specimens remain.
    pub highlighted: bool,
}

impl ContainmentRow {
    pub fn remaining_text(&self) -> String {
        self.remaining.to_string()
    }

    pub fn pending_text(&self) -> String {
        self.pending.to_string()
    }
}

/// Receiver for everything the containment screen shows.
pub trait ContainmentDisplay {
    /// Replace the row at `index`.
    fn set_row(&mut self, index: usize, row: ContainmentRow);
    /// Update the "space available" and "space used" summary lines.
    fn set_summary(&mut self, space_available: String, space_used: String);
    /// Show or hide the confirm and cancel controls.
    fn set_controls(&mut self, confirm_visible: bool, cancel_visible: bool);
}
