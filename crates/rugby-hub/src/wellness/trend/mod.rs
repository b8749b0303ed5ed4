//! Trailing-window trend deltas over a single player's wellness history.

mod alerts;

pub use alerts::{default_rules, AlertDirection, AlertRule};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::WellnessEntry;
use super::scoring::round_to_hundredths;

/// Supported trailing windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TrendWindow {
    Week,
    Fortnight,
    Month,
}

impl TrendWindow {
    pub const fn days(self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Fortnight => 14,
            Self::Month => 30,
        }
    }

    /// First day of the window ending on (and including) `end`. Fails when the window
    /// would start before the earliest representable date.
    pub fn start_for(self, end: NaiveDate) -> Result<NaiveDate, TrendError> {
        end.checked_sub_days(Days::new(u64::from(self.days()) - 1))
            .ok_or(TrendError::WindowOutOfRange(end))
    }
}

impl TryFrom<u32> for TrendWindow {
    type Error = TrendError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(Self::Week),
            14 => Ok(Self::Fortnight),
            30 => Ok(Self::Month),
            other => Err(TrendError::UnsupportedWindow(other)),
        }
    }
}

impl From<TrendWindow> for u32 {
    fn from(window: TrendWindow) -> Self {
        window.days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    SleepQuality,
    FatigueLevel,
    MuscleSoreness,
    ReadinessScore,
}

impl TrendMetric {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SleepQuality => "Sleep quality",
            Self::FatigueLevel => "Fatigue",
            Self::MuscleSoreness => "Muscle soreness",
            Self::ReadinessScore => "Readiness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// One dated point of history. Built from stored entries or supplied directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSample {
    pub date: NaiveDate,
    pub sleep_quality: f64,
    pub fatigue_level: f64,
    pub muscle_soreness: f64,
    pub readiness_score: f64,
}

impl TrendSample {
    fn value(&self, metric: TrendMetric) -> f64 {
        match metric {
            TrendMetric::SleepQuality => self.sleep_quality,
            TrendMetric::FatigueLevel => self.fatigue_level,
            TrendMetric::MuscleSoreness => self.muscle_soreness,
            TrendMetric::ReadinessScore => self.readiness_score,
        }
    }
}

impl From<&WellnessEntry> for TrendSample {
    fn from(entry: &WellnessEntry) -> Self {
        Self {
            date: entry.date,
            sleep_quality: f64::from(entry.ratings.sleep_quality.value()),
            fatigue_level: f64::from(entry.ratings.fatigue_level.value()),
            muscle_soreness: f64::from(entry.ratings.muscle_soreness.value()),
            readiness_score: entry.readiness_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    pub metric: TrendMetric,
    pub current: f64,
    pub start: f64,
    pub change: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessTrend {
    pub window: TrendWindow,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub entry_count: usize,
    pub sleep_quality: MetricTrend,
    pub fatigue_level: MetricTrend,
    pub muscle_soreness: MetricTrend,
    pub readiness_score: MetricTrend,
    pub alerts: Vec<String>,
}

impl WellnessTrend {
    pub fn metrics(&self) -> [&MetricTrend; 4] {
        [
            &self.sleep_quality,
            &self.fatigue_level,
            &self.muscle_soreness,
            &self.readiness_score,
        ]
    }

    pub fn metric(&self, metric: TrendMetric) -> &MetricTrend {
        match metric {
            TrendMetric::SleepQuality => &self.sleep_quality,
            TrendMetric::FatigueLevel => &self.fatigue_level,
            TrendMetric::MuscleSoreness => &self.muscle_soreness,
            TrendMetric::ReadinessScore => &self.readiness_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrendError {
    #[error("trend needs at least 2 entries in the window, found {available}")]
    InsufficientData { available: usize },
    #[error("unsupported trend window of {0} days (expected 7, 14 or 30)")]
    UnsupportedWindow(u32),
    #[error("trend window ending {0} falls outside the supported calendar")]
    WindowOutOfRange(NaiveDate),
}

/// Tunables for trend classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Largest absolute change still reported as stable. `0.0` means exact equality.
    pub stable_epsilon: f64,
    pub alert_rules: Vec<AlertRule>,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            stable_epsilon: 0.0,
            alert_rules: default_rules(),
        }
    }
}

/// Stateless calculator applying a [`TrendConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrendCalculator {
    config: TrendConfig,
}

impl TrendCalculator {
    pub fn new(config: TrendConfig) -> Self {
        let stable_epsilon = if config.stable_epsilon.is_finite() {
            config.stable_epsilon.abs()
        } else {
            0.0
        };

        Self {
            config: TrendConfig {
                stable_epsilon,
                ..config
            },
        }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Trend over the window ending on the most recent sample.
    pub fn compute(
        &self,
        samples: &[TrendSample],
        window: TrendWindow,
    ) -> Result<WellnessTrend, TrendError> {
        let Some(latest) = samples.iter().map(|sample| sample.date).max() else {
            return Err(TrendError::InsufficientData { available: 0 });
        };
        self.compute_as_of(samples, window, latest)
    }

    /// Trend over the window ending on `as_of`. Samples after `as_of` are ignored.
    pub fn compute_as_of(
        &self,
        samples: &[TrendSample],
        window: TrendWindow,
        as_of: NaiveDate,
    ) -> Result<WellnessTrend, TrendError> {
        let from = window.start_for(as_of)?;
        let points = window_points(samples, from, as_of);

        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(TrendError::InsufficientData { available: 0 });
        };
        if points.len() < 2 {
            return Err(TrendError::InsufficientData {
                available: points.len(),
            });
        }

        let trend_for = |metric: TrendMetric| self.metric_trend(metric, first, last);
        let sleep_quality = trend_for(TrendMetric::SleepQuality);
        let fatigue_level = trend_for(TrendMetric::FatigueLevel);
        let muscle_soreness = trend_for(TrendMetric::MuscleSoreness);
        let readiness_score = trend_for(TrendMetric::ReadinessScore);

        let alerts = alerts::scan(
            &self.config.alert_rules,
            &[
                &sleep_quality,
                &fatigue_level,
                &muscle_soreness,
                &readiness_score,
            ],
        );

        Ok(WellnessTrend {
            window,
            from,
            to: as_of,
            entry_count: points.len(),
            sleep_quality,
            fatigue_level,
            muscle_soreness,
            readiness_score,
            alerts,
        })
    }

    fn metric_trend(
        &self,
        metric: TrendMetric,
        first: &TrendSample,
        last: &TrendSample,
    ) -> MetricTrend {
        let start = first.value(metric);
        let current = last.value(metric);
        let change = round_to_hundredths(current - start);

        MetricTrend {
            metric,
            current,
            start,
            change,
            direction: self.direction(change),
        }
    }

    fn direction(&self, change: f64) -> TrendDirection {
        if change.abs() <= self.config.stable_epsilon {
            TrendDirection::Stable
        } else if change > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        }
    }
}

/// Trend over the window ending on the most recent sample, using default rules and exact
/// stability comparison.
pub fn compute_trend(
    samples: &[TrendSample],
    window: TrendWindow,
) -> Result<WellnessTrend, TrendError> {
    TrendCalculator::default().compute(samples, window)
}

/// In-window samples ordered by date. A later sample for an already-seen day replaces it.
fn window_points(samples: &[TrendSample], from: NaiveDate, to: NaiveDate) -> Vec<TrendSample> {
    let mut in_window: Vec<TrendSample> = samples
        .iter()
        .filter(|sample| sample.date >= from && sample.date <= to)
        .copied()
        .collect();
    in_window.sort_by_key(|sample| sample.date);

    let mut points: Vec<TrendSample> = Vec::with_capacity(in_window.len());
    for sample in in_window {
        match points.last_mut() {
            Some(previous) if previous.date == sample.date => *previous = sample,
            _ => points.push(sample),
        }
    }
    points
}
