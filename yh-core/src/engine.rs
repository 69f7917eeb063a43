//! Game rules engine: the single place that mutates `GameState`.
//!
//! Turn structure per round:
//! - `rolls_left == 3` or `2`: awaiting a reroll decision (`Phase::AwaitingReroll`)
//! - `rolls_left == 1`: awaiting the category commitment (`Phase::AwaitingCategory`)
//! - after the 13th commitment the game is over (`Phase::GameOver`)
//!
//! Every operation validates before mutating, so an error leaves the state untouched.

use thiserror::Error;

use crate::category::Category;
use crate::chance::{splitmix64, ChanceMode};
use crate::config::EngineConfig;
use crate::policy::{DecisionPolicy, KeepMask, PolicyKind};
use crate::scoring::{score, upper_bonus};
use crate::state::{GameState, MAX_ROLLS, NUM_DICE, NUM_ROUNDS};

/// Seed stream for the default policy, kept apart from the dice stream.
const DEFAULT_POLICY_STREAM: u64 = 0xD1CE_0000_0000_0001;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("keep mask must have exactly 5 entries, got {len}")]
    InvalidMask { len: usize },
    #[error("category {} is not available", .0.map(|c| c.name()).unwrap_or("<none>"))]
    InvalidCategory(Option<Category>),
    #[error("no reroll left this round (rolls_left={rolls_left})")]
    OutOfTurn { rolls_left: u8 },
    #[error("game is over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingReroll,
    AwaitingCategory,
    GameOver,
}

/// One `step` input: a keep mask for reroll decisions and a category for the
/// final decision of a round. Only the half matching the phase is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub keep_mask: KeepMask,
    pub category: Option<Category>,
}

impl Action {
    pub fn keep(keep_mask: KeepMask) -> Self {
        Self {
            keep_mask,
            category: None,
        }
    }

    pub fn commit(category: Category) -> Self {
        Self {
            keep_mask: [true; NUM_DICE],
            category: Some(category),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub state: GameState,
    pub reward: u32,
    pub done: bool,
}

pub struct GameEngine {
    state: GameState,
    chance: ChanceMode,
    policy: Box<dyn DecisionPolicy>,
}

impl GameEngine {
    /// Create an engine and deal the first roll.
    ///
    /// Without an explicit policy, the baseline policy is used, seeded from `cfg.seed`.
    pub fn new(cfg: &EngineConfig, policy: Option<Box<dyn DecisionPolicy>>) -> Self {
        let mut chance = if cfg.deterministic_chance {
            ChanceMode::new_deterministic(cfg.seed)
        } else {
            ChanceMode::new_rng(cfg.seed)
        };
        let policy = policy.unwrap_or_else(|| {
            PolicyKind::Baseline.build(splitmix64(cfg.seed ^ DEFAULT_POLICY_STREAM))
        });
        let state = GameState::new(chance.roll_fresh(0));
        Self {
            state,
            chance,
            policy,
        }
    }

    /// RNG-backed engine with the default policy.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            &EngineConfig {
                seed,
                deterministic_chance: false,
            },
            None,
        )
    }

    /// Start a new game. The chance source is not reseeded.
    pub fn reset(&mut self) -> GameState {
        self.state = GameState::new(self.chance.roll_fresh(0));
        self.get_state()
    }

    /// Independent snapshot of the current state.
    pub fn get_state(&self) -> GameState {
        self.state.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    pub fn phase(&self) -> Phase {
        if self.state.done {
            Phase::GameOver
        } else if self.state.rolls_left > 1 {
            Phase::AwaitingReroll
        } else {
            Phase::AwaitingCategory
        }
    }

    /// Reroll every die whose mask entry is false.
    pub fn reroll(&mut self, keep_mask: &[bool]) -> Result<(), EngineError> {
        let keep: &KeepMask = keep_mask
            .try_into()
            .map_err(|_| EngineError::InvalidMask {
                len: keep_mask.len(),
            })?;
        match self.phase() {
            Phase::GameOver => return Err(EngineError::GameOver),
            Phase::AwaitingCategory => {
                return Err(EngineError::OutOfTurn {
                    rolls_left: self.state.rolls_left,
                })
            }
            Phase::AwaitingReroll => {}
        }

        let roll_idx = MAX_ROLLS - self.state.rolls_left + 1;
        let round_idx = self.state.rounds_played;
        self.state.dice = self
            .chance
            .reroll(self.state.dice, keep, round_idx, roll_idx);
        self.state.rolls_left -= 1;
        Ok(())
    }

    /// Commit the current dice to `category` and return the awarded score.
    ///
    /// Allowed at any point of a live round; standing pat on the opening roll is legal.
    pub fn score_round(&mut self, category: Category) -> Result<u32, EngineError> {
        if self.state.done {
            return Err(EngineError::GameOver);
        }
        if !self.state.available_categories.contains(category) {
            return Err(EngineError::InvalidCategory(Some(category)));
        }

        let s = &mut self.state;
        let awarded = score(category, &s.dice);
        s.scores.record(category, awarded);
        s.final_score += awarded;
        s.available_categories.remove(category);
        s.rounds_played += 1;
        s.rolls_left = MAX_ROLLS;

        if s.rounds_played >= NUM_ROUNDS {
            s.final_score += upper_bonus(s.scores.upper_total());
            s.done = true;
        } else {
            s.dice = self.chance.roll_fresh(s.rounds_played);
        }
        debug_assert!(s.is_consistent());
        Ok(awarded)
    }

    /// Advance the game by one decision.
    ///
    /// - Game over: no-op, reward 0.
    /// - Reroll phase: applies `action.keep_mask`, reward 0.
    /// - Category phase: commits `action.category`, reward is its score.
    pub fn step(&mut self, action: &Action) -> Result<StepOutcome, EngineError> {
        let reward = match self.phase() {
            Phase::GameOver => 0,
            Phase::AwaitingReroll => {
                self.reroll(&action.keep_mask)?;
                0
            }
            Phase::AwaitingCategory => {
                let cat = action.category.ok_or(EngineError::InvalidCategory(None))?;
                self.score_round(cat)?
            }
        };
        Ok(StepOutcome {
            state: self.get_state(),
            reward,
            done: self.state.done,
        })
    }

    /// Ask the policy for the half of the action the current phase needs.
    ///
    /// Returns `None` once the game is over.
    pub fn decide(&mut self) -> Option<Action> {
        let s = &self.state;
        match self.phase() {
            Phase::GameOver => None,
            Phase::AwaitingReroll => Some(Action::keep(self.policy.choose_dice_to_keep(
                &s.dice,
                s.rolls_left,
                &s.available_categories,
            ))),
            Phase::AwaitingCategory => Some(Action {
                keep_mask: [true; NUM_DICE],
                category: self
                    .policy
                    .choose_category(&s.dice, &s.available_categories),
            }),
        }
    }
}
