//! Turn loop: ask the engine's policy for a decision, feed it back through `step`.

use yh_core::{Category, Dice, GameEngine, Phase};

/// One executed decision, reported to a [`TurnSink`] before the next one is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Reroll {
        round: u8,
        dice_before: Dice,
        keep_mask: [bool; 5],
        dice_after: Dice,
        rolls_left: u8,
    },
    Commit {
        round: u8,
        dice: Dice,
        category: Category,
        score: u32,
        final_score: u32,
    },
}

pub trait TurnSink {
    fn on_turn(&mut self, ev: &TurnEvent);
}

/// Discards all events.
pub struct NoopSink;

impl TurnSink for NoopSink {
    fn on_turn(&mut self, _ev: &TurnEvent) {}
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    pub events: Vec<TurnEvent>,
}

impl TurnSink for VecSink {
    fn on_turn(&mut self, ev: &TurnEvent) {
        self.events.push(*ev);
    }
}

/// Committed round, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub round: u8,
    pub dice: Dice,
    pub category: Category,
    pub score: u32,
}

/// Outcome of a single finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub game_id: u64,
    pub episode_seed: u64,
    pub policy: String,
    pub final_score: u32,
    pub upper_total: u32,
    pub bonus: u32,
    pub rounds: Vec<RoundResult>,
}

impl GameReport {
    pub fn got_bonus(&self) -> bool {
        self.bonus > 0
    }
}

/// Play the engine's current game to completion with its own policy.
///
/// Engine errors (e.g. a policy committing to an unavailable category) are returned
/// as-is; the driver never substitutes a different action.
pub fn play_game(
    engine: &mut GameEngine,
    game_id: u64,
    episode_seed: u64,
    sink: &mut dyn TurnSink,
) -> Result<GameReport, crate::EvalError> {
    let mut rounds = Vec::with_capacity(yh_core::NUM_CATS);

    while let Some(action) = engine.decide() {
        let before = engine.state();
        let round = before.rounds_played;
        let dice_before = before.dice;
        let phase = engine.phase();

        let out = engine.step(&action)?;

        let ev = match phase {
            Phase::AwaitingReroll => TurnEvent::Reroll {
                round,
                dice_before,
                keep_mask: action.keep_mask,
                dice_after: out.state.dice,
                rolls_left: out.state.rolls_left,
            },
            Phase::AwaitingCategory => {
                // step() succeeded, so the category was present and available.
                let category = action.category.ok_or(crate::EvalError::IllegalTransition)?;
                rounds.push(RoundResult {
                    round,
                    dice: dice_before,
                    category,
                    score: out.reward,
                });
                TurnEvent::Commit {
                    round,
                    dice: dice_before,
                    category,
                    score: out.reward,
                    final_score: out.state.final_score,
                }
            }
            Phase::GameOver => return Err(crate::EvalError::IllegalTransition),
        };
        sink.on_turn(&ev);
    }

    let s = engine.state();
    Ok(GameReport {
        game_id,
        episode_seed,
        policy: engine.policy_name().to_string(),
        final_score: s.final_score,
        upper_total: s.upper_total(),
        bonus: s.bonus(),
        rounds,
    })
}
