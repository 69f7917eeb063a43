//! Scoring categories and the ordered availability set.
//!
//! Enumeration order (index 0..13):
//! - 0..=5  : faces 1..6 (upper section)
//! - 6      : chance
//! - 7      : three_of_a_kind
//! - 8      : four_of_a_kind
//! - 9      : yahtzee
//! - 10     : full_house
//! - 11     : small_straight
//! - 12     : large_straight
//!
//! This order is also the tie-breaking order for policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NUM_CATS: usize = 13;

/// One of the 13 fixed scoring slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    Chance,
    ThreeOfAKind,
    FourOfAKind,
    Yahtzee,
    FullHouse,
    SmallStraight,
    LargeStraight,
}

/// Category names in index order (0..13).
pub const CAT_NAMES: [&str; NUM_CATS] = [
    "1",
    "2",
    "3",
    "4",
    "5",
    "6",
    "chance",
    "three_of_a_kind",
    "four_of_a_kind",
    "yahtzee",
    "full_house",
    "small_straight",
    "large_straight",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl Category {
    pub const ALL: [Category; NUM_CATS] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::Chance,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::Yahtzee,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
    ];

    /// Position in the enumeration order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Category::index`].
    pub fn from_index(idx: usize) -> Option<Category> {
        Self::ALL.get(idx).copied()
    }

    /// Upper-section category for a die face in 1..=6.
    pub fn from_face(face: u8) -> Option<Category> {
        match face {
            1..=6 => Some(Self::ALL[(face - 1) as usize]),
            _ => None,
        }
    }

    /// The face counted by an upper-section category.
    pub fn face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_upper(self) -> bool {
        self.index() < 6
    }

    pub fn name(self) -> &'static str {
        CAT_NAMES[self.index()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts canonical names plus the legacy French names
    /// (`brelan`, `carre`, `full`, `petite_suite`, `grande_suite`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cat = match s {
            "1" => Category::Ones,
            "2" => Category::Twos,
            "3" => Category::Threes,
            "4" => Category::Fours,
            "5" => Category::Fives,
            "6" => Category::Sixes,
            "chance" => Category::Chance,
            "three_of_a_kind" | "brelan" => Category::ThreeOfAKind,
            "four_of_a_kind" | "carre" => Category::FourOfAKind,
            "yahtzee" => Category::Yahtzee,
            "full_house" | "full" => Category::FullHouse,
            "small_straight" | "petite_suite" => Category::SmallStraight,
            "large_straight" | "grande_suite" => Category::LargeStraight,
            other => return Err(ParseCategoryError(other.to_string())),
        };
        Ok(cat)
    }
}

impl TryFrom<String> for Category {
    type Error = ParseCategoryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Category> for String {
    fn from(c: Category) -> String {
        c.name().to_string()
    }
}

/// Bit convention: bit `idx` is 1 if the category with that index is available.
#[inline]
pub fn avail_bit_for_cat(cat: Category) -> u16 {
    1u16 << cat.index()
}

/// All categories available.
pub const FULL_MASK: u16 = (1u16 << NUM_CATS) - 1;

/// Ordered set of categories backed by a bitmask.
///
/// Membership is O(1) and iteration always follows the enumeration order,
/// regardless of the order in which categories were removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategorySet {
    mask: u16,
}

impl CategorySet {
    pub fn full() -> Self {
        Self { mask: FULL_MASK }
    }

    pub fn empty() -> Self {
        Self { mask: 0 }
    }

    pub fn from_mask(mask: u16) -> Self {
        Self {
            mask: mask & FULL_MASK,
        }
    }

    #[inline]
    pub fn mask(&self) -> u16 {
        self.mask
    }

    #[inline]
    pub fn contains(&self, cat: Category) -> bool {
        (self.mask & avail_bit_for_cat(cat)) != 0
    }

    /// Insert `cat`; returns true if it was not already present.
    pub fn insert(&mut self, cat: Category) -> bool {
        let was = self.contains(cat);
        self.mask |= avail_bit_for_cat(cat);
        !was
    }

    /// Remove `cat`; returns true if it was present.
    pub fn remove(&mut self, cat: Category) -> bool {
        let was = self.contains(cat);
        self.mask &= !avail_bit_for_cat(cat);
        was
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        let mask = self.mask;
        Category::ALL
            .into_iter()
            .filter(move |&c| (mask & avail_bit_for_cat(c)) != 0)
    }

    pub fn to_vec(&self) -> Vec<Category> {
        self.iter().collect()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = CategorySet::empty();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl Serialize for CategorySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for CategorySet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cats = Vec::<Category>::deserialize(deserializer)?;
        Ok(cats.into_iter().collect())
    }
}
