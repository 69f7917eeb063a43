#[cfg(test)]
mod tests {
    use crate::{score, score_named, scores_for_dice, upper_bonus, Category, Dice, ScoreError};

    fn all_hands() -> impl Iterator<Item = Dice> {
        (0..7776u32).map(|mut n| {
            let mut d = [0u8; 5];
            for x in d.iter_mut() {
                *x = (n % 6) as u8 + 1;
                n /= 6;
            }
            d
        })
    }

    #[test]
    fn scores_are_order_independent_exhaustive() {
        // Every hand scores the same as its sorted and reversed permutations.
        for dice in all_hands() {
            let mut sorted = dice;
            sorted.sort();
            let mut rev = sorted;
            rev.reverse();
            let base = scores_for_dice(&dice);
            assert_eq!(base, scores_for_dice(&sorted), "dice {:?}", dice);
            assert_eq!(base, scores_for_dice(&rev), "dice {:?}", dice);
        }
    }

    #[test]
    fn batch_scores_match_single_category_scores() {
        for dice in all_hands().step_by(7) {
            let batch = scores_for_dice(&dice);
            for cat in Category::ALL {
                assert_eq!(batch[cat.index()], score(cat, &dice));
            }
        }
    }

    #[test]
    fn yahtzee_iff_all_equal() {
        for dice in all_hands() {
            let all_same = dice.iter().all(|&d| d == dice[0]);
            let s = score(Category::Yahtzee, &dice);
            assert_eq!(s == 50, all_same, "dice {:?}", dice);
            assert!(s == 0 || s == 50);
        }
        assert_eq!(score(Category::Yahtzee, &[4, 4, 4, 4, 4]), 50);
        assert_eq!(score(Category::Yahtzee, &[4, 4, 4, 4, 3]), 0);
    }

    #[test]
    fn upper_faces_sum_matching_dice() {
        assert_eq!(score(Category::Threes, &[3, 3, 5, 5, 5]), 6);
        assert_eq!(score(Category::Fives, &[3, 3, 5, 5, 5]), 15);
        assert_eq!(score(Category::Ones, &[3, 3, 5, 5, 5]), 0);
        assert_eq!(score(Category::Sixes, &[6, 6, 6, 6, 6]), 30);
    }

    #[test]
    fn of_a_kind_sums_all_dice() {
        assert_eq!(score(Category::ThreeOfAKind, &[2, 2, 2, 5, 6]), 17);
        assert_eq!(score(Category::ThreeOfAKind, &[2, 2, 3, 5, 6]), 0);
        assert_eq!(score(Category::FourOfAKind, &[4, 4, 4, 4, 1]), 17);
        assert_eq!(score(Category::FourOfAKind, &[4, 4, 4, 1, 1]), 0);
        // Five of a kind also counts as three and four of a kind.
        assert_eq!(score(Category::ThreeOfAKind, &[6, 6, 6, 6, 6]), 30);
        assert_eq!(score(Category::FourOfAKind, &[6, 6, 6, 6, 6]), 30);
    }

    #[test]
    fn chance_is_unconditional_sum() {
        assert_eq!(score(Category::Chance, &[1, 2, 3, 4, 6]), 16);
        assert_eq!(score(Category::Chance, &[1, 1, 1, 1, 1]), 5);
    }

    #[test]
    fn full_house_classic_split() {
        assert_eq!(score(Category::FullHouse, &[2, 2, 2, 5, 5]), 25);
        assert_eq!(score(Category::FullHouse, &[5, 2, 5, 2, 2]), 25);
    }

    #[test]
    fn full_house_accepts_three_plus_two_singles() {
        // House rule: three of a kind plus two distinct singles also qualifies.
        assert_eq!(score(Category::FullHouse, &[3, 3, 3, 1, 6]), 25);
    }

    #[test]
    fn full_house_rejects_other_shapes() {
        assert_eq!(score(Category::FullHouse, &[1, 1, 1, 1, 1]), 0);
        assert_eq!(score(Category::FullHouse, &[4, 4, 4, 4, 2]), 0);
        assert_eq!(score(Category::FullHouse, &[1, 1, 2, 2, 3]), 0);
        assert_eq!(score(Category::FullHouse, &[1, 2, 3, 4, 5]), 0);
    }

    #[test]
    fn small_straight_runs() {
        assert_eq!(score(Category::SmallStraight, &[1, 2, 3, 4, 6]), 30);
        assert_eq!(score(Category::SmallStraight, &[6, 5, 4, 3, 3]), 30);
        assert_eq!(score(Category::SmallStraight, &[2, 3, 4, 5, 5]), 30);
        assert_eq!(score(Category::SmallStraight, &[1, 1, 2, 3, 6]), 0);
        assert_eq!(score(Category::SmallStraight, &[1, 2, 3, 5, 6]), 0);
    }

    #[test]
    fn large_straight_runs() {
        assert_eq!(score(Category::LargeStraight, &[2, 3, 4, 5, 6]), 40);
        assert_eq!(score(Category::LargeStraight, &[5, 4, 3, 2, 1]), 40);
        assert_eq!(score(Category::LargeStraight, &[1, 2, 3, 4, 6]), 0);
        // A large straight is also a small straight.
        assert_eq!(score(Category::SmallStraight, &[2, 3, 4, 5, 6]), 30);
    }

    #[test]
    fn score_named_accepts_canonical_and_legacy_names() {
        let dice = [2, 2, 2, 5, 5];
        assert_eq!(score_named("full_house", &dice), Ok(25));
        assert_eq!(score_named("full", &dice), Ok(25));
        assert_eq!(score_named("brelan", &dice), Ok(16));
        assert_eq!(score_named("2", &dice), Ok(6));
    }

    #[test]
    fn score_named_rejects_unknown_category() {
        let err = score_named("pair", &[1, 1, 2, 3, 4]).unwrap_err();
        assert_eq!(err, ScoreError::UnknownCategory("pair".to_string()));
    }

    #[test]
    fn upper_bonus_threshold() {
        assert_eq!(upper_bonus(62), 0);
        assert_eq!(upper_bonus(63), 35);
        assert_eq!(upper_bonus(105), 35);
    }

    #[test]
    #[should_panic(expected = "die out of range")]
    fn die_above_six_panics() {
        score(Category::Chance, &[1, 2, 3, 4, 7]);
    }

    #[test]
    #[should_panic(expected = "die out of range")]
    fn zero_die_panics() {
        scores_for_dice(&[0, 2, 3, 4, 5]);
    }
}
