//! yh-core: Game rules, scoring, state representation, policies, and configuration.

pub mod category;
pub mod chance;
pub mod config;
pub mod engine;
pub mod policy;
pub mod scoring;
pub mod state;

pub use category::{
    avail_bit_for_cat, Category, CategorySet, ParseCategoryError, CAT_NAMES, FULL_MASK, NUM_CATS,
};
pub use chance::{splitmix64, ChanceMode, EventKey};
pub use config::{Config, ConfigError, EngineConfig, SimulationConfig};
pub use engine::{Action, EngineError, GameEngine, Phase, StepOutcome};
pub use policy::{
    BaselinePolicy, DecisionPolicy, GreedyHighPolicy, KeepHighRandomPolicy, KeepMask,
    ParsePolicyError, PolicyKind, KEEP_ALL,
};
pub use scoring::{
    score, score_named, scores_for_dice, upper_bonus, Dice, ScoreError, UPPER_BONUS,
    UPPER_BONUS_THRESHOLD,
};
pub use state::{GameState, Scorecard, MAX_ROLLS, NUM_DICE, NUM_ROUNDS};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");



#[cfg(test)]
mod chance_tests;



#[cfg(test)]
mod scoring_tests;
