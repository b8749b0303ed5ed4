//! Daily player wellness: questionnaire scoring, trends, staff review and squad summaries.
//!
//! Pure calculations live in [`scoring`], [`trend`] and [`summary`]. [`service`] puts them
//! behind permission checks and a [`repository::WellnessRepository`], and [`router`]
//! exposes the service over HTTP.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod summary;
pub mod trend;

#[cfg(test)]
mod tests;

pub use domain::{
    EntryId, Rating, ReadinessStatus, ReviewRequest, ReviewState, StaffReview, SubjectId,
    SubmissionError, WellnessEntry, WellnessRatings, WellnessSubmission,
};
pub use import::{ImportBatch, RejectedRow, WellnessCsvImporter, WellnessImportError};
pub use repository::{DateRange, RepositoryError, UpsertOutcome, WellnessRepository};
pub use router::{wellness_router, MEMBER_HEADER, ROLE_HEADER};
pub use scoring::{classify, compute_readiness, ReadinessInputs, AMBER_THRESHOLD, GREEN_THRESHOLD};
pub use service::{Actor, ImportReport, SubmissionReceipt, WellnessService, WellnessServiceError};
pub use summary::{summarize_day, TeamReadinessSummary};
pub use trend::{
    compute_trend, AlertRule, TrendCalculator, TrendConfig, TrendDirection, TrendError,
    TrendMetric, TrendSample, TrendWindow, WellnessTrend,
};
