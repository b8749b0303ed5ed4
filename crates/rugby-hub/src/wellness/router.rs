use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::access::{AccessError, Role};

use super::domain::{EntryId, ReviewRequest, SubjectId, WellnessSubmission};
use super::import::WellnessImportError;
use super::repository::{RepositoryError, UpsertOutcome, WellnessRepository};
use super::service::{Actor, WellnessService, WellnessServiceError};
use super::trend::{TrendError, TrendWindow};

/// Header carrying the caller's role label.
pub const ROLE_HEADER: &str = "x-rugby-role";
/// Header carrying the caller's own squad id.
pub const MEMBER_HEADER: &str = "x-rugby-member";

/// Router builder exposing submission, review, trend and summary endpoints.
pub fn wellness_router<R>(service: Arc<WellnessService<R>>) -> Router
where
    R: WellnessRepository + 'static,
{
    Router::new()
        .route("/api/v1/wellness", post(submit_handler::<R>))
        .route("/api/v1/wellness/import", post(import_handler::<R>))
        .route("/api/v1/wellness/summary", get(summary_handler::<R>))
        .route(
            "/api/v1/wellness/entries/:entry_id",
            get(entry_handler::<R>),
        )
        .route(
            "/api/v1/wellness/entries/:entry_id/review",
            put(review_handler::<R>),
        )
        .route(
            "/api/v1/players/:subject_id/wellness/trend",
            get(trend_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryQuery {
    date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrendQuery {
    days: Option<u32>,
    as_of: Option<NaiveDate>,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
    axum::Json(submission): axum::Json<WellnessSubmission>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match service.submit(&actor, submission) {
        Ok(receipt) => {
            let status = match receipt.outcome {
                UpsertOutcome::Created => StatusCode::CREATED,
                UpsertOutcome::Replaced => StatusCode::OK,
            };
            (status, axum::Json(receipt)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn import_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
    body: String,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match service.import_csv(&actor, body.as_bytes()) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
    Query(query): Query<SummaryQuery>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    match service.team_summary(&actor, date) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn entry_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
    Path(entry_id): Path<String>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match service.get(&actor, &EntryId(entry_id)) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn review_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
    Path(entry_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match service.review(&actor, &EntryId(entry_id), request) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn trend_handler<R>(
    State(service): State<Arc<WellnessService<R>>>,
    headers: HeaderMap,
    Path(subject_id): Path<String>,
    Query(query): Query<TrendQuery>,
) -> Response
where
    R: WellnessRepository + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    let window = match TrendWindow::try_from(query.days.unwrap_or(7)) {
        Ok(window) => window,
        Err(error) => return error_response(error.into()),
    };
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    match service.trend(&actor, &SubjectId(subject_id), window, as_of) {
        Ok(trend) => (StatusCode::OK, axum::Json(trend)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Resolve the caller from trusted identity headers set by the upstream gateway.
pub(crate) fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, Response> {
    let Some(raw_role) = headers.get(ROLE_HEADER) else {
        let payload = json!({
            "error": format!("missing {ROLE_HEADER} header"),
        });
        return Err((StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response());
    };

    let role = raw_role
        .to_str()
        .map_err(|_| AccessError::InvalidRole("<non-ascii>".to_string()))
        .and_then(|label| label.parse::<Role>())
        .map_err(|error| error_response(error.into()))?;

    let member_id = headers
        .get(MEMBER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| SubjectId(value.to_string()));

    Ok(Actor::new(role, member_id))
}

pub(crate) fn error_response(error: WellnessServiceError) -> Response {
    let status = match &error {
        WellnessServiceError::Access(AccessError::InvalidPermission(_)) => StatusCode::BAD_REQUEST,
        WellnessServiceError::Access(_) => StatusCode::FORBIDDEN,
        WellnessServiceError::Submission(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WellnessServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        WellnessServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        WellnessServiceError::Trend(TrendError::InsufficientData { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        WellnessServiceError::Trend(
            TrendError::UnsupportedWindow(_) | TrendError::WindowOutOfRange(_),
        ) => StatusCode::BAD_REQUEST,
        WellnessServiceError::Import(WellnessImportError::Io(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        WellnessServiceError::Import(_) => StatusCode::BAD_REQUEST,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
