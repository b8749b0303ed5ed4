use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::access::Role;
use crate::wellness::domain::{
    EntryId, StaffReview, SubjectId, WellnessEntry, WellnessSubmission,
};
use crate::wellness::repository::{
    DateRange, RepositoryError, UpsertOutcome, WellnessRepository,
};
use crate::wellness::service::{Actor, WellnessService};
use crate::wellness::trend::TrendConfig;

pub(super) fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date") + Duration::days(offset)
}

pub(super) fn player(id: &str) -> Actor {
    Actor::new(Role::Player, Some(SubjectId(id.to_string())))
}

pub(super) fn staff(role: Role) -> Actor {
    Actor::new(role, Some(SubjectId("staff-1".to_string())))
}

/// Submission where every answer sits at the same point on the "good" scale, so the
/// readiness score equals `answers`.
pub(super) fn submission(subject: &str, date: NaiveDate, answers: i64) -> WellnessSubmission {
    let mut submission = WellnessSubmission::new(SubjectId(subject.to_string()), date);
    submission.sleep_quality = Some(answers);
    submission.mood = Some(answers);
    submission.fatigue_level = Some(6 - answers);
    submission.stress_level = Some(6 - answers);
    submission.muscle_soreness = Some(6 - answers);
    submission
}

pub(super) fn build_service() -> (WellnessService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = WellnessService::new(repository.clone(), TrendConfig::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) entries: Arc<Mutex<HashMap<EntryId, WellnessEntry>>>,
}

impl WellnessRepository for MemoryRepository {
    fn upsert(&self, entry: WellnessEntry) -> Result<UpsertOutcome, RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        match guard.insert(entry.id.clone(), entry) {
            Some(_) => Ok(UpsertOutcome::Replaced),
            None => Ok(UpsertOutcome::Created),
        }
    }

    fn attach_review(
        &self,
        id: &EntryId,
        review: StaffReview,
    ) -> Result<WellnessEntry, RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        let entry = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        entry.review = Some(review);
        Ok(entry.clone())
    }

    fn fetch(&self, id: &EntryId) -> Result<Option<WellnessEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn entries_for_subject(
        &self,
        subject_id: &SubjectId,
        range: DateRange,
    ) -> Result<Vec<WellnessEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        let mut entries: Vec<WellnessEntry> = guard
            .values()
            .filter(|entry| &entry.subject_id == subject_id && range.contains(entry.date))
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.date);
        Ok(entries)
    }

    fn entries_on(&self, date: NaiveDate) -> Result<Vec<WellnessEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|entry| entry.date == date)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl WellnessRepository for UnavailableRepository {
    fn upsert(&self, _entry: WellnessEntry) -> Result<UpsertOutcome, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn attach_review(
        &self,
        _id: &EntryId,
        _review: StaffReview,
    ) -> Result<WellnessEntry, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EntryId) -> Result<Option<WellnessEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn entries_for_subject(
        &self,
        _subject_id: &SubjectId,
        _range: DateRange,
    ) -> Result<Vec<WellnessEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn entries_on(&self, _date: NaiveDate) -> Result<Vec<WellnessEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
