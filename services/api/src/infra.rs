use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rugby_hub::wellness::{
    DateRange, EntryId, RepositoryError, StaffReview, SubjectId, UpsertOutcome, WellnessEntry,
    WellnessRepository,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store used until a hosted database adapter is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryWellnessRepository {
    entries: Arc<Mutex<HashMap<EntryId, WellnessEntry>>>,
}

impl InMemoryWellnessRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<EntryId, WellnessEntry>>, RepositoryError> {
        self.entries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl WellnessRepository for InMemoryWellnessRepository {
    fn upsert(&self, entry: WellnessEntry) -> Result<UpsertOutcome, RepositoryError> {
        let mut guard = self.lock()?;
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
        let mut guard = self.lock()?;
        let entry = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        entry.review = Some(review);
        Ok(entry.clone())
    }

    fn fetch(&self, id: &EntryId) -> Result<Option<WellnessEntry>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn entries_for_subject(
        &self,
        subject_id: &SubjectId,
        range: DateRange,
    ) -> Result<Vec<WellnessEntry>, RepositoryError> {
        let guard = self.lock()?;
        let mut entries: Vec<WellnessEntry> = guard
            .values()
            .filter(|entry| &entry.subject_id == subject_id && range.contains(entry.date))
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.date);
        Ok(entries)
    }

    fn entries_on(&self, date: NaiveDate) -> Result<Vec<WellnessEntry>, RepositoryError> {
        let guard = self.lock()?;
        let mut entries: Vec<WellnessEntry> = guard
            .values()
            .filter(|entry| entry.date == date)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.subject_id.cmp(&b.subject_id));
        Ok(entries)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    rugby_hub::wellness::import::parse_date(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD or DD/MM/YYYY"))
}
