#![allow(missing_docs)]

//! Press-and-hold auto repeat for the arrow controls.

use std::time::{Duration, Instant};

/// Which way an arrow moves the pending count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Observable state of the repeat machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatState {
    Idle,
    RepeatIncreasing,
    RepeatDecreasing,
}

/// Delays driving the repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTiming {
    /// Wait between the press and the first repeat.
    pub initial_delay: Duration,
    /// Wait between subsequent repeats.
    pub interval: Duration,
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(250),
            interval: Duration::from_millis(50),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    direction: Direction,
    next_fire: Instant,
    fired: u32,
}

/// A single timer shared by both arrows, so at most one direction repeats.
#[derive(Debug, Clone)]
pub struct RepeatTimer {
    timing: RepeatTiming,
    armed: Option<Armed>,
}

impl RepeatTimer {
    pub fn new(timing: RepeatTiming) -> Self {
        Self {
            timing,
            armed: None,
        }
    }

    pub fn timing(&self) -> RepeatTiming {
        self.timing
    }

    pub fn state(&self) -> RepeatState {
        match self.armed.map(|armed| armed.direction) {
            None => RepeatState::Idle,
            Some(Direction::Increase) => RepeatState::RepeatIncreasing,
            Some(Direction::Decrease) => RepeatState::RepeatDecreasing,
        }
    }

    /// Arm the timer for `direction`.
    ///
    /// A press in the direction already repeating is ignored; a press in the
    /// other direction takes over.
    pub fn press(&mut self, direction: Direction, now: Instant) {
        if let Some(armed) = self.armed {
            if armed.direction == direction {
                return;
            }
        }
        self.armed = Some(Armed {
            direction,
            next_fire: now + self.timing.initial_delay,
            fired: 0,
        });
    }

    /// Disarm the timer if it is repeating `direction`.
    ///
    /// Returns how many repeats fired while held, or `None` when that
    /// direction was not armed.
    pub fn release(&mut self, direction: Direction) -> Option<u32> {
        match self.armed {
            Some(armed) if armed.direction == direction => {
                self.armed = None;
                Some(armed.fired)
            }
            _ => None,
        }
    }

    /// Disarm regardless of direction.
    pub fn stop(&mut self) {
        self.armed = None;
    }

    /// Fire at most one repeat if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Direction> {
        let interval = self.timing.interval;
        let armed = self.armed.as_mut()?;
        if now < armed.next_fire {
            return None;
        }
        armed.fired += 1;
        armed.next_fire = now + interval;
        Some(armed.direction)
    }
}

impl Default for RepeatTimer {
    fn default() -> Self {
        Self::new(RepeatTiming::default())
    }
}
