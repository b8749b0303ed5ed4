use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{EntryId, StaffReview, SubjectId, WellnessEntry};
use super::trend::{TrendError, TrendWindow};

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn trailing(window: TrendWindow, end: NaiveDate) -> Result<Self, TrendError> {
        Ok(Self::new(window.start_for(end)?, end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Whether an upsert created a new entry or replaced a same-day submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Created,
    Replaced,
}

/// Storage abstraction injected into the service; stands in for the hosted data store.
pub trait WellnessRepository: Send + Sync {
    /// Insert `entry`, replacing any entry with the same id (same player, same day).
    fn upsert(&self, entry: WellnessEntry) -> Result<UpsertOutcome, RepositoryError>;
    /// Set the staff review on the stored entry and return it. Ratings and score are left as
    /// stored, so a same-day resubmission that lands first is kept.
    fn attach_review(
        &self,
        id: &EntryId,
        review: StaffReview,
    ) -> Result<WellnessEntry, RepositoryError>;
    fn fetch(&self, id: &EntryId) -> Result<Option<WellnessEntry>, RepositoryError>;
    /// Entries for one player inside `range`, oldest first.
    fn entries_for_subject(
        &self,
        subject_id: &SubjectId,
        range: DateRange,
    ) -> Result<Vec<WellnessEntry>, RepositoryError>;
    fn entries_on(&self, date: NaiveDate) -> Result<Vec<WellnessEntry>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("wellness entry not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_orders_bounds_and_is_inclusive() {
        let a = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();
        let range = DateRange::new(b, a);
        assert_eq!(range.start, a);
        assert!(range.contains(a));
        assert!(range.contains(b));
        assert!(!range.contains(b.succ_opt().unwrap()));
        assert_eq!(
            DateRange::trailing(TrendWindow::Week, b),
            Ok(DateRange::new(a, b))
        );
    }
}
