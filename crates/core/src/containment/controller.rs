#![allow(missing_docs)]

//! Pending-removal bookkeeping for the containment screen.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    error::{ContainmentError, Result},
    lang::Language,
    models::{Base, BaseView, Ruleset},
};

use super::{
    repeat::{Direction, RepeatState, RepeatTimer, RepeatTiming},
    view::{ContainmentDisplay, ContainmentRow},
    ContainmentCapacity, Inventory, InventoryMut, SpecimenRules,
};

/// Amount meaning "as far as the counter can go".
pub const TO_LIMIT: u32 = u32::MAX;

/// Mouse-wheel adjustment settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelSettings {
    /// Units moved per wheel notch.
    pub step: u32,
    /// Whether the wheel adjusts counts at all.
    pub enabled: bool,
}

impl WheelSettings {
    /// The wheel only adjusts counts when allowed and the step is nonzero.
    pub fn new(step: u32, allowed: bool) -> Self {
        Self {
            step,
            enabled: allowed && step > 0,
        }
    }
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self::new(10, true)
    }
}

/// Options fixed for the lifetime of one containment screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Whether exceeding containment capacity blocks leaving the screen.
    pub limit_enforced: bool,
    pub wheel: WheelSettings,
    pub repeat: RepeatTiming,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            limit_enforced: true,
            wheel: WheelSettings::default(),
            repeat: RepeatTiming::default(),
        }
    }
}

/// One species held at the base and how many of it are marked for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainmentLine {
    species: String,
    pending: u32,
}

impl ContainmentLine {
    fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            pending: 0,
        }
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Live specimens currently in stores.
    pub fn held(&self, stores: &impl Inventory) -> u32 {
        stores.quantity(&self.species)
    }

    /// Specimens that will remain once pending removals are applied.
    pub fn remaining(&self, stores: &impl Inventory) -> u32 {
        self.held(stores).saturating_sub(self.pending)
    }
}

/// Space figures shown on the screen, recomputed after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainmentFigures {
    /// Space still taken by specimens that are neither marked nor under research.
    pub aliens_remaining_used: i64,
    /// Free space once pending removals are applied. Negative when overfull.
    pub spaces_free: i64,
    pub has_enough_space: bool,
    pub confirm_visible: bool,
    pub cancel_visible: bool,
}

impl ContainmentFigures {
    fn compute(
        capacity: &impl ContainmentCapacity,
        total_pending: u64,
        researched: u32,
        limit_enforced: bool,
        overcrowded: bool,
    ) -> Self {
        let used = signed(capacity.used_containment());
        let available = signed(capacity.available_containment());
        let total_pending = signed(total_pending);

        let aliens_remaining_used = used - total_pending - i64::from(researched);
        let spaces_free = available - used + total_pending;
        let has_enough_space = !limit_enforced || spaces_free >= 0;
        Self {
            aliens_remaining_used,
            spaces_free,
            has_enough_space,
            confirm_visible: has_enough_space,
            cancel_visible: has_enough_space && !overcrowded,
        }
    }
}

fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// One species converted by a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExterminatedSpecies {
    pub species: String,
    pub corpse_item: String,
    pub count: u32,
}

/// Everything a commit changed in stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub removed: Vec<ExterminatedSpecies>,
    pub applied_at: DateTime<Utc>,
}

impl CommitReport {
    /// Total specimens exterminated.
    pub fn total(&self) -> u64 {
        self.removed.iter().map(|entry| u64::from(entry.count)).sum()
    }
}

/// How the screen was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainmentOutcome {
    /// Pending removals were applied to stores.
    Committed(CommitReport),
    /// Pending removals were thrown away.
    Cancelled { discarded: u64 },
}

/// State behind the alien containment screen.
///
/// Lines are fixed when the screen opens. Stores are read live through the
/// site passed to each call and are assumed not to change until the screen
/// closes.
#[derive(Debug, Clone)]
pub struct ContainmentController {
    lines: Vec<ContainmentLine>,
    selected: usize,
    total_pending: u64,
    researched: u32,
    overcrowded: bool,
    settings: ControllerSettings,
    repeat: RepeatTimer,
    figures: ContainmentFigures,
}

impl ContainmentController {
    /// Open the screen over `site`, listing every held alien species in
    /// ruleset order.
    ///
    /// `researched` is the number of specimens under interrogation; they take
    /// space but cannot be removed.
    pub fn open<S, R>(
        site: &S,
        rules: &R,
        researched: u32,
        settings: ControllerSettings,
    ) -> Result<Self>
    where
        S: Inventory + ContainmentCapacity,
        R: SpecimenRules,
    {
        let lines: Vec<ContainmentLine> = rules
            .item_ids()
            .into_iter()
            .filter(|item| site.quantity(item) > 0 && rules.is_alien_specimen(item))
            .map(ContainmentLine::new)
            .collect();
        if lines.is_empty() {
            return Err(ContainmentError::NoSpecimens);
        }

        let used = site.used_containment();
        let available = site.available_containment();
        let overcrowded = settings.limit_enforced && available < used;
        if overcrowded {
            warn!(
                used,
                available, "containment overcrowded; cancel disabled until space is freed"
            );
        }

        let mut controller = Self {
            lines,
            selected: 0,
            total_pending: 0,
            researched,
            overcrowded,
            settings,
            repeat: RepeatTimer::new(settings.repeat),
            figures: ContainmentFigures::default(),
        };
        controller.refresh(site);
        info!(
            species = controller.lines.len(),
            used, available, researched, "containment screen opened"
        );
        Ok(controller)
    }

    /// Open the screen for a base, counting interrogations from its research.
    pub fn for_base(base: &Base, rules: &Ruleset, settings: ControllerSettings) -> Result<Self> {
        let view = BaseView::new(base, rules);
        Self::open(&view, rules, base.researched_aliens(rules), settings)
    }

    pub fn lines(&self) -> &[ContainmentLine] {
        &self.lines
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_line(&self) -> &ContainmentLine {
        &self.lines[self.selected]
    }

    /// Sum of pending removals over all lines.
    pub fn total_pending(&self) -> u64 {
        self.total_pending
    }

    pub fn researched(&self) -> u32 {
        self.researched
    }

    pub fn is_overcrowded(&self) -> bool {
        self.overcrowded
    }

    pub fn figures(&self) -> ContainmentFigures {
        self.figures
    }

    pub fn settings(&self) -> ControllerSettings {
        self.settings
    }

    pub fn repeat_state(&self) -> RepeatState {
        self.repeat.state()
    }

    /// Target `index` with subsequent adjustments.
    pub fn select_line(&mut self, index: usize) -> Result<()> {
        if index >= self.lines.len() {
            return Err(ContainmentError::SelectionOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        self.selected = index;
        Ok(())
    }

    /// Mark up to `amount` more specimens of the selected species.
    ///
    /// Returns how many were actually marked.
    pub fn increase<S>(&mut self, site: &S, amount: u32) -> u32
    where
        S: Inventory + ContainmentCapacity,
    {
        let line = &mut self.lines[self.selected];
        let room = line.remaining(site);
        if amount == 0 || room == 0 {
            return 0;
        }
        let delta = amount.min(room);
        line.pending += delta;
        self.total_pending += u64::from(delta);
        debug!(species = %line.species, pending = line.pending, delta, "marked specimens");
        self.refresh(site);
        delta
    }

    /// Unmark up to `amount` specimens of the selected species.
    ///
    /// Returns how many were actually unmarked.
    pub fn decrease<S>(&mut self, site: &S, amount: u32) -> u32
    where
        S: Inventory + ContainmentCapacity,
    {
        let line = &mut self.lines[self.selected];
        if amount == 0 || line.pending == 0 {
            return 0;
        }
        let delta = amount.min(line.pending);
        line.pending -= delta;
        self.total_pending -= u64::from(delta);
        debug!(species = %line.species, pending = line.pending, delta, "unmarked specimens");
        self.refresh(site);
        delta
    }

    /// Move the selected counter by `amount` in `direction`.
    pub fn step<S>(&mut self, site: &S, direction: Direction, amount: u32) -> u32
    where
        S: Inventory + ContainmentCapacity,
    {
        match direction {
            Direction::Increase => self.increase(site, amount),
            Direction::Decrease => self.decrease(site, amount),
        }
    }

    /// An arrow was pressed: arm auto repeat without stepping yet.
    pub fn press(&mut self, direction: Direction, now: Instant) {
        self.repeat.press(direction, now);
    }

    /// An arrow was released. A click that never repeated moves one unit.
    pub fn release<S>(&mut self, site: &S, direction: Direction) -> u32
    where
        S: Inventory + ContainmentCapacity,
    {
        match self.repeat.release(direction) {
            Some(0) => self.step(site, direction, 1),
            _ => 0,
        }
    }

    /// Secondary click on an arrow: jump straight to held or to zero.
    pub fn to_limit<S>(&mut self, site: &S, direction: Direction) -> u32
    where
        S: Inventory + ContainmentCapacity,
    {
        self.step(site, direction, TO_LIMIT)
    }

    /// A wheel notch. Always stops auto repeat; only adjusts when the wheel is
    /// enabled and the pointer is over the arrow column.
    pub fn wheel<S>(&mut self, site: &S, direction: Direction, over_arrows: bool) -> u32
    where
        S: Inventory + ContainmentCapacity,
    {
        self.repeat.stop();
        if !self.settings.wheel.enabled || !over_arrows {
            return 0;
        }
        self.step(site, direction, self.settings.wheel.step)
    }

    /// Advance auto repeat. Call once per frame.
    pub fn tick<S>(&mut self, site: &S, now: Instant) -> u32
    where
        S: Inventory + ContainmentCapacity,
    {
        match self.repeat.poll(now) {
            Some(direction) => self.step(site, direction, 1),
            None => 0,
        }
    }

    /// Recompute space figures and control visibility from live capacity.
    pub fn refresh(&mut self, capacity: &impl ContainmentCapacity) {
        self.figures = ContainmentFigures::compute(
            capacity,
            self.total_pending,
            self.researched,
            self.settings.limit_enforced,
            self.overcrowded,
        );
    }

    /// Rows for display, in line order.
    pub fn rows(&self, stores: &impl Inventory, language: &Language) -> Vec<ContainmentRow> {
        self.lines
            .iter()
            .map(|line| {
                let remaining = line.remaining(stores);
                ContainmentRow {
                    label: language.tr(&line.species).into_string(),
                    remaining,
                    pending: line.pending,
                    highlighted: remaining != 0,
                }
            })
            .collect()
    }

    pub fn space_available_text(&self, language: &Language) -> String {
        language
            .tr("STR_SPACE_AVAILABLE")
            .arg(self.figures.spaces_free)
            .into_string()
    }

    pub fn space_used_text(&self, language: &Language) -> String {
        language
            .tr("STR_SPACE_USED")
            .arg(self.figures.aliens_remaining_used)
            .into_string()
    }

    /// Push rows, summary and control visibility to `display`.
    pub fn render(
        &self,
        stores: &impl Inventory,
        language: &Language,
        display: &mut impl ContainmentDisplay,
    ) {
        for (index, row) in self.rows(stores, language).into_iter().enumerate() {
            display.set_row(index, row);
        }
        display.set_summary(
            self.space_available_text(language),
            self.space_used_text(language),
        );
        display.set_controls(self.figures.confirm_visible, self.figures.cancel_visible);
    }

    /// Exterminate every marked specimen, leaving corpses in stores.
    ///
    /// All corpse mappings and stock levels are checked before anything is
    /// touched, so a failure leaves stores unchanged.
    pub fn commit<I, R>(&self, stores: &mut I, rules: &R) -> Result<ContainmentOutcome>
    where
        I: InventoryMut,
        R: SpecimenRules,
    {
        if !self.figures.confirm_visible {
            warn!(
                spaces_free = self.figures.spaces_free,
                "commit refused: not enough containment space"
            );
            return Err(ContainmentError::InsufficientSpace {
                spaces_free: self.figures.spaces_free,
            });
        }

        let mut plan = Vec::new();
        for line in self.lines.iter().filter(|line| line.pending > 0) {
            let corpse_item = rules.corpse_item_for(&line.species)?;
            let available = stores.quantity(&line.species);
            if line.pending > available {
                return Err(ContainmentError::InsufficientStock {
                    item: line.species.clone(),
                    requested: line.pending,
                    available,
                });
            }
            plan.push(ExterminatedSpecies {
                species: line.species.clone(),
                corpse_item,
                count: line.pending,
            });
        }

        for entry in &plan {
            stores.remove_quantity(&entry.species, entry.count)?;
            stores.add_quantity(&entry.corpse_item, entry.count);
            debug!(
                species = %entry.species,
                corpse = %entry.corpse_item,
                count = entry.count,
                "specimens exterminated"
            );
        }

        let report = CommitReport {
            removed: plan,
            applied_at: Utc::now(),
        };
        info!(total = report.total(), "containment changes applied");
        Ok(ContainmentOutcome::Committed(report))
    }

    /// Close without applying anything. Refused while overcrowded.
    pub fn cancel(&self) -> Result<ContainmentOutcome> {
        if !self.figures.cancel_visible {
            warn!(
                overcrowded = self.overcrowded,
                "cancel refused while containment is over capacity"
            );
            return Err(ContainmentError::CancelBlocked);
        }
        info!(discarded = self.total_pending, "containment changes discarded");
        Ok(ContainmentOutcome::Cancelled {
            discarded: self.total_pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::{
        base::tests::sample_base, ruleset::tests::sample_ruleset, Facility, FacilityRule,
    };

    fn open(base: &Base, rules: &Ruleset) -> ContainmentController {
        ContainmentController::for_base(base, rules, ControllerSettings::default())
            .expect("base holds specimens")
    }

    fn assert_invariants(controller: &ContainmentController, view: &BaseView<'_>) {
        let mut sum = 0u64;
        for line in controller.lines() {
            assert!(line.pending() <= line.held(view), "pending above held");
            sum += u64::from(line.pending());
        }
        assert_eq!(controller.total_pending(), sum);
    }

    #[test]
    fn lines_follow_ruleset_order_and_skip_non_aliens() {
        let rules = sample_ruleset();
        let base = sample_base();
        let controller = open(&base, &rules);
        let species: Vec<&str> = controller.lines().iter().map(|l| l.species()).collect();
        assert_eq!(species, ["STR_SECTOID_SOLDIER", "STR_FLOATER_SOLDIER"]);
        assert_eq!(controller.researched(), 1);
        assert!(controller.lines().iter().all(|line| line.pending() == 0));
    }

    #[test]
    fn opening_without_specimens_fails() {
        let rules = sample_ruleset();
        let mut base = sample_base();
        base.items = [("STR_RIFLE".to_string(), 3)].into_iter().collect();
        let err = ContainmentController::for_base(&base, &rules, ControllerSettings::default())
            .expect_err("no specimens");
        assert_eq!(err, ContainmentError::NoSpecimens);
    }

    #[test]
    fn selection_is_bounds_checked() {
        let rules = sample_ruleset();
        let base = sample_base();
        let mut controller = open(&base, &rules);
        assert!(controller.select_line(1).is_ok());
        assert_eq!(
            controller.select_line(2),
            Err(ContainmentError::SelectionOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(controller.selected(), 1);
    }

    #[test]
    fn increase_and_decrease_clamp_to_bounds() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);

        assert_eq!(controller.increase(&view, 0), 0);
        assert_eq!(controller.decrease(&view, 0), 0);
        assert_eq!(controller.decrease(&view, 4), 0);

        assert_eq!(controller.increase(&view, TO_LIMIT), 5);
        assert_eq!(controller.selected_line().pending(), 5);
        assert_eq!(controller.increase(&view, 1), 0);
        assert_invariants(&controller, &view);

        assert_eq!(controller.decrease(&view, 2), 2);
        assert_eq!(controller.decrease(&view, TO_LIMIT), 3);
        assert_eq!(controller.selected_line().pending(), 0);
        assert_invariants(&controller, &view);
    }

    #[test]
    fn zero_amounts_leave_state_untouched() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);
        controller.increase(&view, 2);

        for selected in [1, 0] {
            controller.select_line(selected).expect("valid line");
            let lines = controller.lines().to_vec();
            let figures = controller.figures();

            assert_eq!(controller.increase(&view, 0), 0);
            assert_eq!(controller.lines(), lines.as_slice());
            assert_eq!(controller.figures(), figures);

            assert_eq!(controller.decrease(&view, 0), 0);
            assert_eq!(controller.lines(), lines.as_slice());
            assert_eq!(controller.figures(), figures);
        }
    }

    #[test]
    fn scripted_adjustments_keep_invariants() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);

        let script: &[(usize, Direction, u32)] = &[
            (0, Direction::Increase, 3),
            (1, Direction::Increase, 7),
            (0, Direction::Decrease, 1),
            (1, Direction::Decrease, 0),
            (0, Direction::Increase, TO_LIMIT),
            (1, Direction::Decrease, 5),
            (1, Direction::Increase, 1),
            (0, Direction::Decrease, TO_LIMIT),
        ];
        for (index, direction, amount) in script {
            controller.select_line(*index).expect("valid line");
            controller.step(&view, *direction, *amount);
            assert_invariants(&controller, &view);
        }
        assert_eq!(controller.lines()[0].pending(), 0);
        assert_eq!(controller.lines()[1].pending(), 1);
    }

    #[test]
    fn increase_then_decrease_restores_pending() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);
        controller.increase(&view, 1);
        let before = controller.figures();

        let marked = controller.increase(&view, 3);
        assert_eq!(marked, 3);
        assert_eq!(controller.decrease(&view, marked), 3);
        assert_eq!(controller.selected_line().pending(), 1);
        assert_eq!(controller.figures(), before);
    }

    #[test]
    fn figures_track_pending_removals() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);

        // used 8 (7 stored + 1 interrogation), available 10
        assert_eq!(controller.figures().spaces_free, 2);
        assert_eq!(controller.figures().aliens_remaining_used, 7);

        controller.increase(&view, 4);
        let figures = controller.figures();
        assert_eq!(figures.spaces_free, 6);
        assert_eq!(figures.aliens_remaining_used, 3);
        assert!(figures.confirm_visible && figures.cancel_visible);
    }

    #[test]
    fn unenforced_limit_never_blocks() {
        let rules = sample_ruleset();
        let mut base = sample_base();
        base.facilities.clear();
        let settings = ControllerSettings {
            limit_enforced: false,
            ..ControllerSettings::default()
        };
        let controller =
            ContainmentController::for_base(&base, &rules, settings).expect("specimens held");
        assert!(!controller.is_overcrowded());
        assert!(controller.figures().spaces_free < 0);
        assert!(controller.figures().cancel_visible);
        assert!(controller.cancel().is_ok());
    }

    #[test]
    fn overcrowded_base_hides_cancel_until_closed() {
        let mut rules = sample_ruleset();
        rules
            .facilities
            .insert("STR_SMALL_PEN".to_string(), FacilityRule { aliens: 4 });
        let mut base = sample_base();
        base.facilities = vec![Facility {
            rule: "STR_SMALL_PEN".to_string(),
            build_days: 0,
        }];
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);

        // used 8, available 4
        assert!(controller.is_overcrowded());
        assert!(!controller.figures().confirm_visible);
        assert_eq!(controller.cancel(), Err(ContainmentError::CancelBlocked));

        controller.increase(&view, 3);
        assert!(!controller.figures().confirm_visible);
        assert!(matches!(
            controller.commit(&mut base.items.clone(), &rules),
            Err(ContainmentError::InsufficientSpace { spaces_free: -1 })
        ));

        controller.increase(&view, 1);
        assert!(controller.figures().confirm_visible);
        assert!(!controller.figures().cancel_visible);
        assert_eq!(controller.cancel(), Err(ContainmentError::CancelBlocked));
    }

    #[test]
    fn click_without_repeat_moves_one_unit() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);
        let start = Instant::now();

        controller.press(Direction::Increase, start);
        assert_eq!(controller.selected_line().pending(), 0);
        assert_eq!(controller.tick(&view, start + Duration::from_millis(100)), 0);
        assert_eq!(controller.release(&view, Direction::Increase), 1);
        assert_eq!(controller.selected_line().pending(), 1);
        assert_eq!(controller.repeat_state(), RepeatState::Idle);
    }

    #[test]
    fn holding_an_arrow_repeats_until_release() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);
        let start = Instant::now();

        controller.press(Direction::Increase, start);
        assert_eq!(controller.repeat_state(), RepeatState::RepeatIncreasing);
        for ms in [250, 300, 350] {
            assert_eq!(controller.tick(&view, start + Duration::from_millis(ms)), 1);
        }
        assert_eq!(controller.release(&view, Direction::Increase), 0);
        assert_eq!(controller.selected_line().pending(), 3);
        assert_eq!(controller.tick(&view, start + Duration::from_secs(2)), 0);
    }

    #[test]
    fn wheel_cancels_repeat_and_respects_gates() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let settings = ControllerSettings {
            wheel: WheelSettings::new(2, true),
            ..ControllerSettings::default()
        };
        let mut controller =
            ContainmentController::for_base(&base, &rules, settings).expect("specimens held");
        let start = Instant::now();

        controller.press(Direction::Decrease, start);
        assert_eq!(controller.wheel(&view, Direction::Increase, false), 0);
        assert_eq!(controller.repeat_state(), RepeatState::Idle);

        assert_eq!(controller.wheel(&view, Direction::Increase, true), 2);
        assert_eq!(controller.wheel(&view, Direction::Decrease, true), 2);
        assert_eq!(controller.selected_line().pending(), 0);

        let disabled = ControllerSettings {
            wheel: WheelSettings::new(0, true),
            ..ControllerSettings::default()
        };
        let mut controller =
            ContainmentController::for_base(&base, &rules, disabled).expect("specimens held");
        assert!(!controller.settings().wheel.enabled);
        assert_eq!(controller.wheel(&view, Direction::Increase, true), 0);
    }

    #[test]
    fn secondary_click_jumps_to_the_limit() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);
        controller.select_line(1).expect("valid line");
        assert_eq!(controller.to_limit(&view, Direction::Increase), 2);
        assert_eq!(controller.to_limit(&view, Direction::Decrease), 2);
    }

    #[test]
    fn commit_converts_marked_specimens_to_corpses() -> Result<()> {
        let rules = sample_ruleset();
        let mut base = sample_base();
        let mut controller = open(&base, &rules);
        {
            let view = BaseView::new(&base, &rules);
            controller.increase(&view, 3);
        }

        let outcome = controller.commit(&mut base.items, &rules)?;
        let ContainmentOutcome::Committed(report) = outcome else {
            panic!("expected a commit");
        };
        assert_eq!(report.total(), 3);
        assert_eq!(base.items.quantity("STR_SECTOID_SOLDIER"), 2);
        assert_eq!(base.items.quantity("STR_SECTOID_CORPSE"), 3);
        assert_eq!(base.items.quantity("STR_FLOATER_SOLDIER"), 2);
        assert_eq!(base.items.quantity("STR_FLOATER_CORPSE"), 0);
        Ok(())
    }

    #[test]
    fn commit_with_unresolvable_corpse_changes_nothing() {
        let rules = sample_ruleset();
        let mut base = sample_base();
        base.items.add_quantity("STR_SNAKEMAN_SOLDIER", 1);
        let mut controller = open(&base, &rules);
        {
            let view = BaseView::new(&base, &rules);
            controller.increase(&view, 2);
            controller.select_line(2).expect("snakeman line");
            controller.increase(&view, 1);
        }

        let before = base.items.clone();
        let err = controller
            .commit(&mut base.items, &rules)
            .expect_err("snakeman has no corpse");
        assert!(matches!(err, ContainmentError::MissingCorpse { .. }));
        assert_eq!(base.items, before);
    }

    #[derive(Default)]
    struct RecordingDisplay {
        rows: Vec<(usize, ContainmentRow)>,
        summary: Option<(String, String)>,
        controls: Option<(bool, bool)>,
    }

    impl ContainmentDisplay for RecordingDisplay {
        fn set_row(&mut self, index: usize, row: ContainmentRow) {
            self.rows.push((index, row));
        }

        fn set_summary(&mut self, space_available: String, space_used: String) {
            self.summary = Some((space_available, space_used));
        }

        fn set_controls(&mut self, confirm_visible: bool, cancel_visible: bool) {
            self.controls = Some((confirm_visible, cancel_visible));
        }
    }

    #[test]
    fn render_feeds_the_display() {
        let rules = sample_ruleset();
        let base = sample_base();
        let view = BaseView::new(&base, &rules);
        let mut controller = open(&base, &rules);
        controller.select_line(1).expect("valid line");
        controller.increase(&view, TO_LIMIT);

        let language = Language::with_overrides([(
            "STR_FLOATER_SOLDIER".to_string(),
            "Floater Soldier".to_string(),
        )]);
        let mut display = RecordingDisplay::default();
        controller.render(&view, &language, &mut display);

        assert_eq!(display.rows.len(), 2);
        let (index, floater) = &display.rows[1];
        assert_eq!(*index, 1);
        assert_eq!(floater.label, "Floater Soldier");
        assert_eq!(floater.remaining_text(), "0");
        assert_eq!(floater.pending_text(), "2");
        assert!(!floater.highlighted);
        assert!(display.rows[0].1.highlighted);
        assert_eq!(
            display.summary,
            Some((
                "SPACE AVAILABLE> 4".to_string(),
                "SPACE USED> 5".to_string()
            ))
        );
        assert_eq!(display.controls, Some((true, true)));
    }
}
