//! Game state and scorecard definitions.

use serde::{Deserialize, Serialize};

use crate::category::{Category, CategorySet, NUM_CATS};
use crate::scoring::{upper_bonus, Dice};

pub const NUM_DICE: usize = 5;
pub const NUM_ROUNDS: u8 = 13;
/// Rolls per round, counting the opening roll.
pub const MAX_ROLLS: u8 = 3;

/// Recorded category scores in the order they were committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    entries: Vec<(Category, u32)>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(NUM_CATS),
        }
    }

    pub fn get(&self, cat: Category) -> Option<u32> {
        self.entries
            .iter()
            .find(|(c, _)| *c == cat)
            .map(|&(_, s)| s)
    }

    pub fn contains(&self, cat: Category) -> bool {
        self.get(cat).is_some()
    }

    /// Record a score. Callers guarantee `cat` has not been recorded yet.
    pub(crate) fn record(&mut self, cat: Category, score: u32) {
        debug_assert!(!self.contains(cat), "category recorded twice: {}", cat);
        self.entries.push((cat, score));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Sum of all recorded category scores (no bonus).
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|&(_, s)| s).sum()
    }

    /// Sum of the upper-section scores; unrecorded faces count as 0.
    pub fn upper_total(&self) -> u32 {
        self.entries
            .iter()
            .filter(|(c, _)| c.is_upper())
            .map(|&(_, s)| s)
            .sum()
    }
}

/// Observable state of a single-player game.
///
/// Invariant: `scores.len() == rounds_played == 13 - available_categories.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub dice: Dice,
    pub rolls_left: u8,
    pub rounds_played: u8,
    pub available_categories: CategorySet,
    pub scores: Scorecard,
    /// Running total; includes the upper bonus only once `done`.
    pub final_score: u32,
    pub done: bool,
}

impl GameState {
    pub fn new(dice: Dice) -> Self {
        Self {
            dice,
            rolls_left: MAX_ROLLS,
            rounds_played: 0,
            available_categories: CategorySet::full(),
            scores: Scorecard::new(),
            final_score: 0,
            done: false,
        }
    }

    pub fn upper_total(&self) -> u32 {
        self.scores.upper_total()
    }

    /// Bonus included in `final_score` (0 until the game is over).
    pub fn bonus(&self) -> u32 {
        if self.done {
            upper_bonus(self.upper_total())
        } else {
            0
        }
    }

    /// Check the bookkeeping invariants; used by tests and debug builds.
    pub fn is_consistent(&self) -> bool {
        let rounds = self.rounds_played as usize;
        self.scores.len() == rounds
            && rounds + self.available_categories.len() == NUM_CATS
            && self.scores.iter().all(|(c, _)| !self.available_categories.contains(c))
            && self.final_score == self.scores.total() + self.bonus()
            && self.done == (self.rounds_played == NUM_ROUNDS)
            && self.dice.iter().all(|d| (1..=6).contains(d))
    }
}
