//! Dice → category scoring.
//!
//! All functions are pure. Dice must be in 1..=6; order does not matter.

use thiserror::Error;

use crate::category::{Category, NUM_CATS};

/// A 5-dice hand.
pub type Dice = [u8; 5];

pub const UPPER_BONUS: u32 = 35;
pub const UPPER_BONUS_THRESHOLD: u32 = 63;

pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const YAHTZEE_SCORE: u32 = 50;

const SMALL_STRAIGHTS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];
const LARGE_STRAIGHTS: [[u8; 5]; 2] = [[1, 2, 3, 4, 5], [2, 3, 4, 5, 6]];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}

/// Face counts; `counts[f - 1]` is the number of dice showing `f`.
fn face_counts(dice: &Dice) -> [u8; 6] {
    let mut counts = [0u8; 6];
    for &d in dice {
        assert!((1..=6).contains(&d), "die out of range: {}", d);
        counts[(d - 1) as usize] += 1;
    }
    counts
}

fn dice_sum(dice: &Dice) -> u32 {
    dice.iter().map(|&d| d as u32).sum()
}

fn contains_run(counts: &[u8; 6], run: &[u8]) -> bool {
    run.iter().all(|&f| counts[(f - 1) as usize] > 0)
}

/// Score `dice` under `category`.
///
/// # Panics
///
/// Panics if any die is outside 1..=6.
pub fn score(category: Category, dice: &Dice) -> u32 {
    let counts = face_counts(dice);
    score_with_counts(category, dice, &counts)
}

fn score_with_counts(category: Category, dice: &Dice, counts: &[u8; 6]) -> u32 {
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.index() as u32 + 1;
            counts[category.index()] as u32 * face
        }
        Category::ThreeOfAKind => {
            if counts.iter().any(|&c| c >= 3) {
                dice_sum(dice)
            } else {
                0
            }
        }
        Category::FourOfAKind => {
            if counts.iter().any(|&c| c >= 4) {
                dice_sum(dice)
            } else {
                0
            }
        }
        Category::Yahtzee => {
            if counts.iter().any(|&c| c == 5) {
                YAHTZEE_SCORE
            } else {
                0
            }
        }
        Category::Chance => dice_sum(dice),
        Category::FullHouse => {
            // Exactly 3 + 2, or exactly 3 + two singles.
            let has3 = counts.iter().any(|&c| c == 3);
            let has2 = counts.iter().any(|&c| c == 2);
            let singles = counts.iter().filter(|&&c| c == 1).count();
            if has3 && (has2 || singles == 2) {
                FULL_HOUSE_SCORE
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if SMALL_STRAIGHTS.iter().any(|run| contains_run(counts, run)) {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if LARGE_STRAIGHTS.iter().any(|run| contains_run(counts, run)) {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
    }
}

/// Score `dice` under a category given by name.
///
/// Fails with [`ScoreError::UnknownCategory`] if the name is not recognized.
///
/// # Panics
///
/// Panics if any die is outside 1..=6.
pub fn score_named(name: &str, dice: &Dice) -> Result<u32, ScoreError> {
    let cat: Category = name
        .parse()
        .map_err(|_| ScoreError::UnknownCategory(name.to_string()))?;
    Ok(score(cat, dice))
}

/// Compute raw scores for every category, in enumeration order.
///
/// The upper bonus is not included.
///
/// # Panics
///
/// Panics if any die is outside 1..=6.
pub fn scores_for_dice(dice: &Dice) -> [u32; NUM_CATS] {
    let counts = face_counts(dice);
    let mut s = [0u32; NUM_CATS];
    for cat in Category::ALL {
        s[cat.index()] = score_with_counts(cat, dice, &counts);
    }
    s
}

/// Bonus earned by an upper-section total.
pub fn upper_bonus(upper_total: u32) -> u32 {
    if upper_total >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS
    } else {
        0
    }
}
