use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::access::Role;

use super::scoring::{classify, compute_readiness, ReadinessInputs};

/// Identifier of a squad member (player or staff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a stored wellness entry. One per subject and calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn for_day(subject_id: &SubjectId, date: NaiveDate) -> Self {
        Self(format!("{}-{}", subject_id.0, date.format("%Y%m%d")))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A questionnaire answer on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const NEUTRAL: Rating = Rating(3);

    /// Out-of-range answers are pulled onto the scale rather than rejected.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Missing answers resolve to the neutral midpoint.
    pub fn or_neutral(value: Option<i64>) -> Self {
        value.map(Self::clamped).unwrap_or(Self::NEUTRAL)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Flips a "bad when high" answer so that 5 is always the good end.
    pub const fn inverted(self) -> u8 {
        Self::MAX + Self::MIN - self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating {0} is outside the 1-5 scale")]
pub struct RatingOutOfRange(pub u8);

/// Traffic-light classification of a readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Red,
    Amber,
    Green,
}

impl ReadinessStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Amber => "amber",
            Self::Green => "green",
        }
    }
}

/// Inbound questionnaire as submitted by a player, a staff member or a CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessSubmission {
    pub subject_id: SubjectId,
    pub date: NaiveDate,
    #[serde(default)]
    pub sleep_quality: Option<i64>,
    #[serde(default)]
    pub muscle_soreness: Option<i64>,
    #[serde(default)]
    pub fatigue_level: Option<i64>,
    #[serde(default)]
    pub stress_level: Option<i64>,
    #[serde(default)]
    pub mood: Option<i64>,
    #[serde(default)]
    pub nutrition_adherence: Option<i64>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub soreness_areas: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WellnessSubmission {
    pub fn new(subject_id: SubjectId, date: NaiveDate) -> Self {
        Self {
            subject_id,
            date,
            sleep_quality: None,
            muscle_soreness: None,
            fatigue_level: None,
            stress_level: None,
            mood: None,
            nutrition_adherence: None,
            sleep_hours: None,
            soreness_areas: Vec::new(),
            notes: None,
        }
    }

    pub fn readiness_inputs(&self) -> ReadinessInputs {
        ReadinessInputs {
            sleep_quality: self.sleep_quality,
            fatigue_level: self.fatigue_level,
            muscle_soreness: self.muscle_soreness,
            stress_level: self.stress_level,
            mood: self.mood,
        }
    }
}

/// The six stored questionnaire answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessRatings {
    pub sleep_quality: Rating,
    pub muscle_soreness: Rating,
    pub fatigue_level: Rating,
    pub stress_level: Rating,
    pub mood: Rating,
    pub nutrition_adherence: Rating,
}

impl WellnessRatings {
    pub fn from_submission(submission: &WellnessSubmission) -> Self {
        Self {
            sleep_quality: Rating::or_neutral(submission.sleep_quality),
            muscle_soreness: Rating::or_neutral(submission.muscle_soreness),
            fatigue_level: Rating::or_neutral(submission.fatigue_level),
            stress_level: Rating::or_neutral(submission.stress_level),
            mood: Rating::or_neutral(submission.mood),
            nutrition_adherence: Rating::or_neutral(submission.nutrition_adherence),
        }
    }

    pub fn readiness_inputs(&self) -> ReadinessInputs {
        ReadinessInputs {
            sleep_quality: Some(self.sleep_quality.value().into()),
            fatigue_level: Some(self.fatigue_level.value().into()),
            muscle_soreness: Some(self.muscle_soreness.value().into()),
            stress_level: Some(self.stress_level.value().into()),
            mood: Some(self.mood.value().into()),
        }
    }
}

/// Staff follow-up recorded against a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    Acknowledged,
    FollowUpRequired,
    Cleared,
}

impl ReviewState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Acknowledged => "acknowledged",
            Self::FollowUpRequired => "follow_up_required",
            Self::Cleared => "cleared",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub state: ReviewState,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffReview {
    pub reviewer_role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_id: Option<SubjectId>,
    pub state: ReviewState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

/// A stored, scored submission. Only `review` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessEntry {
    pub id: EntryId,
    pub subject_id: SubjectId,
    pub date: NaiveDate,
    pub ratings: WellnessRatings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub soreness_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub readiness_score: f64,
    pub readiness_status: ReadinessStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<StaffReview>,
}

impl WellnessEntry {
    pub fn from_submission(
        submission: WellnessSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, SubmissionError> {
        let subject = submission.subject_id.0.trim();
        if subject.is_empty() {
            return Err(SubmissionError::MissingSubject);
        }
        let subject_id = SubjectId(subject.to_string());

        if let Some(hours) = submission.sleep_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(SubmissionError::InvalidSleepHours(hours));
            }
        }

        let ratings = WellnessRatings::from_submission(&submission);
        let readiness_score = compute_readiness(&ratings.readiness_inputs());

        Ok(Self {
            id: EntryId::for_day(&subject_id, submission.date),
            subject_id,
            date: submission.date,
            ratings,
            sleep_hours: submission.sleep_hours,
            soreness_areas: normalize_areas(submission.soreness_areas),
            notes: submission.notes.filter(|note| !note.trim().is_empty()),
            readiness_score,
            readiness_status: classify(readiness_score),
            submitted_at,
            review: None,
        })
    }
}

fn normalize_areas(areas: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(areas.len());
    for area in areas {
        let area = area.trim().to_ascii_lowercase();
        if !area.is_empty() && !normalized.contains(&area) {
            normalized.push(area);
        }
    }
    normalized
}

/// Submission problems that cannot be defaulted away.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission is missing a player id")]
    MissingSubject,
    #[error("sleep hours must be a non-negative number (found {0})")]
    InvalidSleepHours(f64),
}
