//! Decision policies: which dice to keep, which category to commit to.

use std::fmt;
use std::str::FromStr;

use rand::seq::IteratorRandom;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use thiserror::Error;

use crate::category::{Category, CategorySet};
use crate::scoring::{scores_for_dice, Dice};

/// Positional keep mask: `true` keeps the die at that position.
pub type KeepMask = [bool; 5];

pub const KEEP_ALL: KeepMask = [true; 5];

/// Strategy consulted by the engine at decision points.
///
/// Implementations must not depend on anything but the arguments and their own
/// internal state (e.g. an owned RNG). `Send` so engines can be moved to worker threads.
pub trait DecisionPolicy: Send {
    fn name(&self) -> &str;

    /// Which dice to keep before a reroll. `rolls_left` is at least 2 here.
    fn choose_dice_to_keep(
        &mut self,
        dice: &Dice,
        rolls_left: u8,
        available: &CategorySet,
    ) -> KeepMask;

    /// Category to commit to. Must be a member of `available`; `None` only if
    /// `available` is empty.
    fn choose_category(&mut self, dice: &Dice, available: &CategorySet) -> Option<Category>;
}

/// Default policy: never reroll, pick a uniformly random available category.
pub struct BaselinePolicy {
    rng: ChaCha8Rng,
}

impl BaselinePolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionPolicy for BaselinePolicy {
    fn name(&self) -> &str {
        "baseline"
    }

    fn choose_dice_to_keep(
        &mut self,
        _dice: &Dice,
        _rolls_left: u8,
        _available: &CategorySet,
    ) -> KeepMask {
        KEEP_ALL
    }

    fn choose_category(&mut self, _dice: &Dice, available: &CategorySet) -> Option<Category> {
        available.iter().choose(&mut self.rng)
    }
}

fn keep_fives_and_sixes(dice: &Dice) -> KeepMask {
    dice.map(|d| d >= 5)
}

/// Keep fives and sixes, then take the best immediate score.
///
/// Ties resolve to the earliest category in enumeration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyHighPolicy;

impl DecisionPolicy for GreedyHighPolicy {
    fn name(&self) -> &str {
        "greedy-high"
    }

    fn choose_dice_to_keep(
        &mut self,
        dice: &Dice,
        _rolls_left: u8,
        _available: &CategorySet,
    ) -> KeepMask {
        keep_fives_and_sixes(dice)
    }

    fn choose_category(&mut self, dice: &Dice, available: &CategorySet) -> Option<Category> {
        let scores = scores_for_dice(dice);
        let mut best: Option<(Category, u32)> = None;
        for cat in available.iter() {
            let s = scores[cat.index()];
            match best {
                Some((_, b)) if s <= b => {}
                _ => best = Some((cat, s)),
            }
        }
        best.map(|(cat, _)| cat)
    }
}

/// Keep fives and sixes, then pick a random available category.
pub struct KeepHighRandomPolicy {
    rng: ChaCha8Rng,
}

impl KeepHighRandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionPolicy for KeepHighRandomPolicy {
    fn name(&self) -> &str {
        "keep-high-random"
    }

    fn choose_dice_to_keep(
        &mut self,
        dice: &Dice,
        _rolls_left: u8,
        _available: &CategorySet,
    ) -> KeepMask {
        keep_fives_and_sixes(dice)
    }

    fn choose_category(&mut self, _dice: &Dice, available: &CategorySet) -> Option<Category> {
        available.iter().choose(&mut self.rng)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy {0:?} (expected baseline|greedy-high|keep-high-random)")]
pub struct ParsePolicyError(pub String);

/// Named policy selector used by configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    Baseline,
    GreedyHigh,
    KeepHighRandom,
}

impl PolicyKind {
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Baseline => "baseline",
            PolicyKind::GreedyHigh => "greedy-high",
            PolicyKind::KeepHighRandom => "keep-high-random",
        }
    }

    /// Build a fresh policy instance. Randomized policies are seeded from `seed`.
    pub fn build(self, seed: u64) -> Box<dyn DecisionPolicy> {
        match self {
            PolicyKind::Baseline => Box::new(BaselinePolicy::new(seed)),
            PolicyKind::GreedyHigh => Box::new(GreedyHighPolicy),
            PolicyKind::KeepHighRandom => Box::new(KeepHighRandomPolicy::new(seed)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" | "default" => Ok(PolicyKind::Baseline),
            "greedy-high" | "greedy" | "naive" => Ok(PolicyKind::GreedyHigh),
            "keep-high-random" => Ok(PolicyKind::KeepHighRandom),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}
