use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{ReadinessStatus, SubjectId, WellnessEntry};
use super::scoring::round_to_hundredths;

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: ReadinessStatus,
    pub status_label: &'static str,
    pub players: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlaggedPlayer {
    pub subject_id: SubjectId,
    pub readiness_score: f64,
    pub readiness_status: ReadinessStatus,
    pub soreness_areas: Vec<String>,
    pub reviewed: bool,
}

/// Squad-level view of one day's submissions, as shown on the staff dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct TeamReadinessSummary {
    pub date: NaiveDate,
    pub submitted: usize,
    pub status_counts: Vec<StatusCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_readiness: Option<f64>,
    pub flagged: Vec<FlaggedPlayer>,
    pub awaiting_review: usize,
}

impl TeamReadinessSummary {
    pub fn count(&self, status: ReadinessStatus) -> usize {
        self.status_counts
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.players)
            .unwrap_or(0)
    }
}

/// Summarize entries dated `date`. If a player has several entries for the day, the most
/// recently submitted one counts.
pub fn summarize_day(entries: &[WellnessEntry], date: NaiveDate) -> TeamReadinessSummary {
    let mut latest: HashMap<&SubjectId, &WellnessEntry> = HashMap::new();
    for entry in entries.iter().filter(|entry| entry.date == date) {
        latest
            .entry(&entry.subject_id)
            .and_modify(|current| {
                if entry.submitted_at >= current.submitted_at {
                    *current = entry;
                }
            })
            .or_insert(entry);
    }

    let day: Vec<&WellnessEntry> = latest.into_values().collect();

    let status_counts = [
        ReadinessStatus::Green,
        ReadinessStatus::Amber,
        ReadinessStatus::Red,
    ]
    .into_iter()
    .map(|status| StatusCount {
        status,
        status_label: status.label(),
        players: day
            .iter()
            .filter(|entry| entry.readiness_status == status)
            .count(),
    })
    .collect();

    let average_readiness = if day.is_empty() {
        None
    } else {
        let total: f64 = day.iter().map(|entry| entry.readiness_score).sum();
        Some(round_to_hundredths(total / day.len() as f64))
    };

    let mut flagged: Vec<FlaggedPlayer> = day
        .iter()
        .filter(|entry| entry.readiness_status == ReadinessStatus::Red)
        .map(|entry| FlaggedPlayer {
            subject_id: entry.subject_id.clone(),
            readiness_score: entry.readiness_score,
            readiness_status: entry.readiness_status,
            soreness_areas: entry.soreness_areas.clone(),
            reviewed: entry.review.is_some(),
        })
        .collect();
    flagged.sort_by(|a, b| {
        a.readiness_score
            .total_cmp(&b.readiness_score)
            .then_with(|| a.subject_id.cmp(&b.subject_id))
    });

    let awaiting_review = flagged.iter().filter(|player| !player.reviewed).count();

    TeamReadinessSummary {
        date,
        submitted: day.len(),
        status_counts,
        average_readiness,
        flagged,
        awaiting_review,
    }
}
