//! Dice sources owned by an engine instance.
//!
//! Two modes:
//! - `Rng`: a seeded ChaCha8 stream that evolves with every die rolled.
//! - `DeterministicEventKeyed`: dice are a function of (episode_seed, round_idx, roll_idx).
//!   When rerolling k dice, the first k values of that event's sequence are used. Two
//!   policies that reach the same structural event see the same dice, which gives common
//!   random numbers when comparing policies.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::scoring::Dice;

/// Structural event key for deterministic dice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey {
    pub episode_seed: u64,
    pub round_idx: u8,
    /// 0 for the opening roll of a round, 1 and 2 for rerolls.
    pub roll_idx: u8,
}

/// SplitMix64 step (fast, deterministic).
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// One-shot SplitMix64 mix of `x`. Used to derive independent seeds.
pub fn splitmix64(x: u64) -> u64 {
    let mut s = x;
    splitmix64_next(&mut s)
}

fn mix_seed(key: EventKey) -> u64 {
    // Fixed, stable mixing. Avoid std Hash/RandomState.
    let mut x = key.episode_seed;
    x ^= (key.round_idx as u64).wrapping_mul(0xA5A35625E4F7C1AD);
    x ^= (key.roll_idx as u64).wrapping_mul(0x9E3779B97F4A7C15);
    splitmix64(x)
}

/// Deterministically generate 5 dice for the given event key.
pub fn roll5(key: EventKey) -> Dice {
    let mut state = mix_seed(key);
    let mut out = [0u8; 5];
    for o in &mut out {
        let r = splitmix64_next(&mut state);
        *o = ((r % 6) + 1) as u8;
    }
    out
}

/// Apply a positional keep mask using the event-keyed stream.
///
/// Unkept positions are filled left to right from `roll5(key)`.
pub fn apply_keep_mask(prev: Dice, keep: &[bool; 5], key: EventKey) -> Dice {
    if keep.iter().all(|&k| k) {
        return prev;
    }
    let draws = roll5(key);
    let mut next = prev;
    let mut j = 0usize;
    for (die, &kept) in next.iter_mut().zip(keep.iter()) {
        if !kept {
            *die = draws[j];
            j += 1;
        }
    }
    next
}

/// How dice are generated for an engine.
pub enum ChanceMode {
    /// Deterministic, event-keyed dice stream.
    DeterministicEventKeyed { episode_seed: u64 },
    /// Pseudorandom dice stream.
    Rng { rng: Box<ChaCha8Rng> },
}

impl ChanceMode {
    pub fn new_deterministic(episode_seed: u64) -> Self {
        ChanceMode::DeterministicEventKeyed { episode_seed }
    }

    pub fn new_rng(seed: u64) -> Self {
        ChanceMode::Rng {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Opening roll of round `round_idx`.
    pub fn roll_fresh(&mut self, round_idx: u8) -> Dice {
        match self {
            ChanceMode::DeterministicEventKeyed { episode_seed } => roll5(EventKey {
                episode_seed: *episode_seed,
                round_idx,
                roll_idx: 0,
            }),
            ChanceMode::Rng { rng } => {
                let mut out = [0u8; 5];
                for o in &mut out {
                    *o = rng.gen_range(1..=6);
                }
                out
            }
        }
    }

    /// Reroll every position whose mask entry is false.
    pub fn reroll(&mut self, prev: Dice, keep: &[bool; 5], round_idx: u8, roll_idx: u8) -> Dice {
        match self {
            ChanceMode::DeterministicEventKeyed { episode_seed } => {
                let key = EventKey {
                    episode_seed: *episode_seed,
                    round_idx,
                    roll_idx,
                };
                apply_keep_mask(prev, keep, key)
            }
            ChanceMode::Rng { rng } => {
                let mut next = prev;
                for (die, &kept) in next.iter_mut().zip(keep.iter()) {
                    if !kept {
                        *die = rng.gen_range(1..=6);
                    }
                }
                next
            }
        }
    }
}
