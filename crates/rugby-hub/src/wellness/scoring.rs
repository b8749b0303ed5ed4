//! Readiness score and traffic-light classification.
//!
//! This is the single canonical formula: submissions, CSV imports, the stateless score
//! endpoint and the CLI all go through [`compute_readiness`].

use serde::{Deserialize, Serialize};

use super::domain::{Rating, ReadinessStatus};

/// Scores at or above this are green.
pub const GREEN_THRESHOLD: f64 = 4.0;
/// Scores at or above this (and below green) are amber.
pub const AMBER_THRESHOLD: f64 = 2.5;

const TERMS: f64 = 5.0;
const MAX_SUM: f64 = TERMS * Rating::MAX as f64;

/// The five answers feeding the score. Each is optional; missing answers count as 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessInputs {
    #[serde(default)]
    pub sleep_quality: Option<i64>,
    #[serde(default)]
    pub fatigue_level: Option<i64>,
    #[serde(default)]
    pub muscle_soreness: Option<i64>,
    #[serde(default)]
    pub stress_level: Option<i64>,
    #[serde(default)]
    pub mood: Option<i64>,
}

impl ReadinessInputs {
    /// Names of the answers that will fall back to the neutral midpoint.
    pub fn defaulted_fields(&self) -> Vec<&'static str> {
        [
            ("sleep_quality", self.sleep_quality),
            ("fatigue_level", self.fatigue_level),
            ("muscle_soreness", self.muscle_soreness),
            ("stress_level", self.stress_level),
            ("mood", self.mood),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Composite readiness in `[1.0, 5.0]`, rounded to two decimals.
///
/// Fatigue, soreness and stress are inverted (`6 - x`) before summing so that every term
/// reads "higher is better"; the sum in `[5, 25]` is then normalized onto the 0-5 scale.
pub fn compute_readiness(inputs: &ReadinessInputs) -> f64 {
    let sum = u32::from(Rating::or_neutral(inputs.sleep_quality).value())
        + u32::from(Rating::or_neutral(inputs.fatigue_level).inverted())
        + u32::from(Rating::or_neutral(inputs.muscle_soreness).inverted())
        + u32::from(Rating::or_neutral(inputs.stress_level).inverted())
        + u32::from(Rating::or_neutral(inputs.mood).value());

    round_to_hundredths((f64::from(sum) / MAX_SUM) * TERMS)
}

/// Lower bounds are inclusive: exactly 4.0 is green, exactly 2.5 is amber.
pub fn classify(score: f64) -> ReadinessStatus {
    if score >= GREEN_THRESHOLD {
        ReadinessStatus::Green
    } else if score >= AMBER_THRESHOLD {
        ReadinessStatus::Amber
    } else {
        ReadinessStatus::Red
    }
}

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(sleep: i64, fatigue: i64, soreness: i64, stress: i64, mood: i64) -> ReadinessInputs {
        ReadinessInputs {
            sleep_quality: Some(sleep),
            fatigue_level: Some(fatigue),
            muscle_soreness: Some(soreness),
            stress_level: Some(stress),
            mood: Some(mood),
        }
    }

    #[test]
    fn neutral_answers_score_three() {
        assert_eq!(compute_readiness(&inputs(3, 3, 3, 3, 3)), 3.0);
    }

    #[test]
    fn best_case_scores_five() {
        assert_eq!(compute_readiness(&inputs(5, 1, 1, 1, 5)), 5.0);
    }

    #[test]
    fn worst_case_scores_one() {
        assert_eq!(compute_readiness(&inputs(1, 5, 5, 5, 1)), 1.0);
    }

    #[test]
    fn missing_answers_default_to_neutral() {
        let empty = ReadinessInputs::default();
        assert_eq!(compute_readiness(&empty), 3.0);
        assert_eq!(
            compute_readiness(&empty),
            compute_readiness(&inputs(3, 3, 3, 3, 3))
        );

        let partial = ReadinessInputs {
            sleep_quality: Some(5),
            ..ReadinessInputs::default()
        };
        assert_eq!(compute_readiness(&partial), 3.4);
        assert_eq!(
            partial.defaulted_fields(),
            vec!["fatigue_level", "muscle_soreness", "stress_level", "mood"]
        );
    }

    #[test]
    fn out_of_scale_answers_are_clamped() {
        assert_eq!(compute_readiness(&inputs(9, -2, 0, 0, 7)), 5.0);
    }

    #[test]
    fn scores_round_to_two_decimals() {
        // 4 + 3 + 4 + 2 + 4 = 17 -> 3.4
        assert_eq!(compute_readiness(&inputs(4, 3, 2, 4, 4)), 3.4);
        // 2 + 2 + 3 + 3 + 4 = 14 -> 2.8
        assert_eq!(compute_readiness(&inputs(2, 4, 3, 3, 4)), 2.8);
    }

    #[test]
    fn classification_boundaries_are_inclusive_below() {
        assert_eq!(classify(4.0), ReadinessStatus::Green);
        assert_eq!(classify(3.999), ReadinessStatus::Amber);
        assert_eq!(classify(2.5), ReadinessStatus::Amber);
        assert_eq!(classify(2.499), ReadinessStatus::Red);
        assert_eq!(classify(5.0), ReadinessStatus::Green);
        assert_eq!(classify(0.0), ReadinessStatus::Red);
    }

    #[test]
    fn non_numeric_scores_classify_red() {
        assert_eq!(classify(f64::NAN), ReadinessStatus::Red);
    }

    #[test]
    fn inputs_deserialize_with_missing_fields() {
        let parsed: ReadinessInputs = serde_json::from_str(r#"{"sleep_quality": 4}"#).unwrap();
        assert_eq!(parsed.sleep_quality, Some(4));
        assert_eq!(parsed.mood, None);
    }
}
