use serde::{Deserialize, Serialize};

use super::{MetricTrend, TrendMetric};

/// Which way a metric has to move for a rule to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDirection {
    Rises,
    Falls,
}

/// Single-metric threshold rule. `threshold` is a magnitude; a rule fires when the change
/// over the window moves past it in `direction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub metric: TrendMetric,
    pub direction: AlertDirection,
    pub threshold: f64,
    pub message: String,
}

impl AlertRule {
    pub fn new(
        metric: TrendMetric,
        direction: AlertDirection,
        threshold: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            metric,
            direction,
            threshold: threshold.abs(),
            message: message.into(),
        }
    }

    pub fn fires_on(&self, change: f64) -> bool {
        match self.direction {
            AlertDirection::Rises => change > self.threshold,
            AlertDirection::Falls => change < -self.threshold,
        }
    }
}

pub fn default_rules() -> Vec<AlertRule> {
    vec![
        AlertRule::new(
            TrendMetric::SleepQuality,
            AlertDirection::Falls,
            0.5,
            "Sleep quality declining",
        ),
        AlertRule::new(
            TrendMetric::FatigueLevel,
            AlertDirection::Rises,
            0.5,
            "Fatigue levels increasing",
        ),
        AlertRule::new(
            TrendMetric::MuscleSoreness,
            AlertDirection::Rises,
            0.5,
            "Muscle soreness increasing",
        ),
        AlertRule::new(
            TrendMetric::ReadinessScore,
            AlertDirection::Falls,
            0.5,
            "Readiness score dropping",
        ),
    ]
}

/// Messages for every rule fired by `metrics`, in rule order.
pub(crate) fn scan(rules: &[AlertRule], metrics: &[&MetricTrend]) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| {
            metrics
                .iter()
                .find(|trend| trend.metric == rule.metric)
                .is_some_and(|trend| rule.fires_on(trend.change))
        })
        .map(|rule| rule.message.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::TrendDirection;
    use super::*;

    fn metric(metric: TrendMetric, change: f64) -> MetricTrend {
        MetricTrend {
            metric,
            current: 3.0,
            start: 3.0 - change,
            change,
            direction: TrendDirection::Stable,
        }
    }

    #[test]
    fn thresholds_are_exclusive() {
        let rule = AlertRule::new(TrendMetric::FatigueLevel, AlertDirection::Rises, 0.5, "up");
        assert!(!rule.fires_on(0.5));
        assert!(rule.fires_on(0.51));
        assert!(!rule.fires_on(-3.0));

        let rule = AlertRule::new(TrendMetric::SleepQuality, AlertDirection::Falls, -0.5, "down");
        assert_eq!(rule.threshold, 0.5);
        assert!(!rule.fires_on(-0.5));
        assert!(rule.fires_on(-1.0));
    }

    #[test]
    fn scan_preserves_rule_order_and_skips_missing_metrics() {
        let sleep = metric(TrendMetric::SleepQuality, -2.0);
        let fatigue = metric(TrendMetric::FatigueLevel, 1.0);
        let alerts = scan(&default_rules(), &[&fatigue, &sleep]);
        assert_eq!(
            alerts,
            vec!["Sleep quality declining", "Fatigue levels increasing"]
        );
    }

    #[test]
    fn custom_rules_extend_the_defaults() {
        let mut rules = default_rules();
        rules.push(AlertRule::new(
            TrendMetric::ReadinessScore,
            AlertDirection::Rises,
            1.0,
            "Readiness rebounding",
        ));
        let readiness = metric(TrendMetric::ReadinessScore, 1.2);
        assert_eq!(scan(&rules, &[&readiness]), vec!["Readiness rebounding"]);
    }
}
