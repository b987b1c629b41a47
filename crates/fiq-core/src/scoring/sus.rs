//! System Usability Scale scoring.

use crate::catalogue::SUS_KEYS;
use crate::errors::ScoreError;
use crate::response_set::{LIKERT_MAX, LIKERT_MIN, ResponseSet};

/// Scales the 0-40 contribution sum to 0-100.
pub const SUS_MULTIPLIER: f64 = 2.5;

/// Contribution of one SUS item at 1-based `position`.
///
/// Odd items are positively phrased (`value - 1`), even items negatively
/// phrased (`5 - value`). Both land in 0-4.
#[must_use]
pub const fn sus_contribution(position: usize, value: u8) -> u8 {
    if position % 2 == 1 {
        value.saturating_sub(LIKERT_MIN)
    } else {
        LIKERT_MAX.saturating_sub(value)
    }
}

/// Compute the SUS score (0-100) from `sus_1`..`sus_10`.
///
/// All ten items are required. Keys outside the SUS set are ignored.
///
/// # Errors
///
/// - [`ScoreError::InvalidValue`] if any item is outside 1-5.
/// - [`ScoreError::Incomplete`] listing every missing, zero, or blank item.
pub fn sus_score(responses: &ResponseSet) -> Result<f64, ScoreError> {
    let mut missing = Vec::new();
    let mut total: u32 = 0;

    for (index, key) in SUS_KEYS.iter().enumerate() {
        match responses.likert(key)? {
            Some(value) => total += u32::from(sus_contribution(index + 1, value)),
            None => missing.push((*key).to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(ScoreError::Incomplete { missing });
    }

    Ok(f64::from(total) * SUS_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn responses(values: [i64; 10]) -> ResponseSet {
        SUS_KEYS.iter().copied().zip(values).collect()
    }

    #[test]
    fn all_threes_score_fifty() {
        assert_eq!(sus_score(&responses([3; 10])), Ok(50.0));
    }

    #[test]
    fn best_pattern_scores_hundred() {
        assert_eq!(sus_score(&responses([5, 1, 5, 1, 5, 1, 5, 1, 5, 1])), Ok(100.0));
    }

    #[test]
    fn worst_pattern_scores_zero() {
        assert_eq!(sus_score(&responses([1, 5, 1, 5, 1, 5, 1, 5, 1, 5])), Ok(0.0));
    }

    #[test]
    fn uniform_answers_always_score_fifty() {
        for value in 1..=5 {
            assert_eq!(sus_score(&responses([value; 10])), Ok(50.0));
        }
    }

    #[test]
    fn mixed_answers() {
        // odd items 3+4+2+3+4, even items 3+2+4+3+4: 32 * 2.5
        let score = sus_score(&responses([4, 2, 5, 3, 3, 1, 4, 2, 5, 1])).unwrap();
        assert!((score - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_item_is_undefined_not_zero() {
        let mut set = responses([3; 10]);
        set.remove("sus_4");
        set.insert("sus_9", 0_i64);
        assert_eq!(
            sus_score(&set),
            Err(ScoreError::Incomplete {
                missing: vec!["sus_4".into(), "sus_9".into()]
            })
        );
    }

    #[test]
    fn empty_set_reports_all_items() {
        let err = sus_score(&ResponseSet::new()).unwrap_err();
        assert_eq!(err.fields().len(), 10);
    }

    #[test]
    fn out_of_range_is_invalid() {
        let set = responses([3, 3, 3, 3, 7, 3, 3, 3, 3, 3]);
        assert!(matches!(
            sus_score(&set),
            Err(ScoreError::InvalidValue { key, .. }) if key == "sus_5"
        ));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let set = responses([3; 10]).with("trust_accuracy", 5_i64);
        assert_eq!(sus_score(&set), Ok(50.0));
    }

    #[test]
    fn scoring_is_idempotent() {
        let set = responses([4, 2, 5, 3, 3, 1, 4, 2, 5, 1]);
        assert_eq!(sus_score(&set), sus_score(&set));
    }

    #[test]
    fn every_complete_set_is_in_range() {
        // Walk a deterministic spread of the 5^10 space.
        let mut seed: u64 = 0x5eed;
        for _ in 0..2_000 {
            let mut values = [0_i64; 10];
            for slot in &mut values {
                seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                *slot = i64::try_from((seed >> 33) % 5).unwrap() + 1;
            }
            let score = sus_score(&responses(values)).unwrap();
            assert!((0.0..=100.0).contains(&score), "score {score} for {values:?}");
            assert!((score / SUS_MULTIPLIER).fract().abs() < f64::EPSILON);
        }
    }
}
