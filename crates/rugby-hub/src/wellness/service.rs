use std::io::Read;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::access::{self, AccessError, Permission, Role};

use super::domain::{
    EntryId, ReviewRequest, StaffReview, SubjectId, SubmissionError, WellnessEntry,
    WellnessSubmission,
};
use super::import::{RejectedRow, WellnessCsvImporter, WellnessImportError};
use super::repository::{DateRange, RepositoryError, UpsertOutcome, WellnessRepository};
use super::summary::{summarize_day, TeamReadinessSummary};
use super::trend::{
    TrendCalculator, TrendConfig, TrendError, TrendSample, TrendWindow, WellnessTrend,
};

/// Who is calling: their role and, when known, their own squad id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub role: Role,
    pub member_id: Option<SubjectId>,
}

impl Actor {
    pub fn new(role: Role, member_id: Option<SubjectId>) -> Self {
        Self { role, member_id }
    }

    pub fn owns(&self, subject_id: &SubjectId) -> bool {
        self.member_id.as_ref() == Some(subject_id)
    }

    /// Own data needs `ViewOwnData`; anyone else's needs `ViewWellnessData`.
    fn require_read(&self, subject_id: &SubjectId) -> Result<(), AccessError> {
        if self.owns(subject_id) && access::has_permission(self.role, Permission::ViewOwnData) {
            return Ok(());
        }
        access::require(self.role, Permission::ViewWellnessData)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub outcome: UpsertOutcome,
    pub entry: WellnessEntry,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub created: usize,
    pub replaced: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Wellness operations behind permission checks.
pub struct WellnessService<R> {
    repository: Arc<R>,
    calculator: Arc<TrendCalculator>,
}

impl<R> WellnessService<R>
where
    R: WellnessRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: TrendConfig) -> Self {
        Self {
            repository,
            calculator: Arc::new(TrendCalculator::new(config)),
        }
    }

    /// Score and store a questionnaire. A second submission for the same player and day
    /// replaces the first and clears any staff review on it.
    pub fn submit(
        &self,
        actor: &Actor,
        submission: WellnessSubmission,
    ) -> Result<SubmissionReceipt, WellnessServiceError> {
        access::require(actor.role, Permission::SubmitWellness)?;
        let subject_id = SubjectId(submission.subject_id.0.trim().to_string());
        if !actor.owns(&subject_id) {
            access::require(actor.role, Permission::ViewAllPlayers)?;
        }

        let entry = WellnessEntry::from_submission(submission, Utc::now())?;
        let outcome = self.repository.upsert(entry.clone())?;

        info!(
            entry_id = %entry.id,
            subject_id = %entry.subject_id,
            readiness_score = entry.readiness_score,
            readiness_status = entry.readiness_status.label(),
            ?outcome,
            "wellness submission stored"
        );

        Ok(SubmissionReceipt { outcome, entry })
    }

    pub fn review(
        &self,
        actor: &Actor,
        entry_id: &EntryId,
        request: ReviewRequest,
    ) -> Result<WellnessEntry, WellnessServiceError> {
        access::require(actor.role, Permission::ReviewWellness)?;

        let review = StaffReview {
            reviewer_role: actor.role,
            reviewer_id: actor.member_id.clone(),
            state: request.state,
            note: request.note.filter(|note| !note.trim().is_empty()),
            reviewed_at: Utc::now(),
        };
        let entry = self.repository.attach_review(entry_id, review)?;

        info!(
            entry_id = %entry.id,
            reviewer_role = actor.role.label(),
            state = request.state.label(),
            "wellness entry reviewed"
        );

        Ok(entry)
    }

    pub fn get(
        &self,
        actor: &Actor,
        entry_id: &EntryId,
    ) -> Result<WellnessEntry, WellnessServiceError> {
        let entry = self
            .repository
            .fetch(entry_id)?
            .ok_or(RepositoryError::NotFound)?;
        actor.require_read(&entry.subject_id)?;
        Ok(entry)
    }

    /// Trend for one player over the window ending on `as_of`.
    pub fn trend(
        &self,
        actor: &Actor,
        subject_id: &SubjectId,
        window: TrendWindow,
        as_of: NaiveDate,
    ) -> Result<WellnessTrend, WellnessServiceError> {
        actor.require_read(subject_id)?;

        let entries = self
            .repository
            .entries_for_subject(subject_id, DateRange::trailing(window, as_of)?)?;
        let samples: Vec<TrendSample> = entries.iter().map(TrendSample::from).collect();

        let trend = self.calculator.compute_as_of(&samples, window, as_of)?;
        if !trend.alerts.is_empty() {
            warn!(
                subject_id = %subject_id,
                window = window.days(),
                alerts = ?trend.alerts,
                "wellness trend alerts raised"
            );
        }
        Ok(trend)
    }

    pub fn team_summary(
        &self,
        actor: &Actor,
        date: NaiveDate,
    ) -> Result<TeamReadinessSummary, WellnessServiceError> {
        access::require(actor.role, Permission::ViewAllPlayers)?;
        access::require(actor.role, Permission::ViewWellnessData)?;

        let entries = self.repository.entries_on(date)?;
        Ok(summarize_day(&entries, date))
    }

    /// Import a CSV export. Unreadable rows are reported, not fatal.
    pub fn import_csv<T: Read>(
        &self,
        actor: &Actor,
        reader: T,
    ) -> Result<ImportReport, WellnessServiceError> {
        access::require(actor.role, Permission::UploadData)?;

        let batch = WellnessCsvImporter::from_reader(reader)?;
        let (entries, rejected) = batch.into_entries(Utc::now());

        let mut report = ImportReport {
            rejected,
            ..ImportReport::default()
        };
        for entry in entries {
            match self.repository.upsert(entry)? {
                UpsertOutcome::Created => report.created += 1,
                UpsertOutcome::Replaced => report.replaced += 1,
            }
        }

        info!(
            created = report.created,
            replaced = report.replaced,
            rejected = report.rejected.len(),
            "wellness import finished"
        );

        Ok(report)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WellnessServiceError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Trend(#[from] TrendError),
    #[error(transparent)]
    Import(#[from] WellnessImportError),
}
