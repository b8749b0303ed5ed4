use chrono::{NaiveDate, TimeZone, Utc};
use rugby_hub::wellness::{
    summarize_day, ReadinessStatus, SubjectId, TrendCalculator, TrendDirection, TrendSample,
    TrendWindow, WellnessCsvImporter, WellnessEntry,
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/squad_wellness.csv");

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).expect("valid date")
}

fn load_entries() -> Vec<WellnessEntry> {
    let batch = WellnessCsvImporter::from_path(FIXTURE).expect("fixture parses");
    let (entries, rejected) =
        batch.into_entries(Utc.with_ymd_and_hms(2025, 5, 7, 8, 0, 0).unwrap());
    assert_eq!(rejected.len(), 2);
    entries
}

#[test]
fn squad_export_reports_unreadable_rows_by_line() {
    let batch = WellnessCsvImporter::from_path(FIXTURE).expect("fixture parses");
    assert_eq!(batch.rows.len(), 9);
    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.rejected[0].line, 10);
    assert!(batch.rejected[0].reason.contains("sleep_quality"));
    assert!(batch.rejected[0].reason.contains("'three'"));

    let (entries, rejected) = batch.into_entries(Utc::now());
    assert_eq!(entries.len(), 8);
    let lines: Vec<u64> = rejected.iter().map(|row| row.line).collect();
    assert_eq!(lines, vec![10, 11]);
    assert!(rejected[1].reason.contains("sleep hours"));
}

#[test]
fn squad_export_maps_spreadsheet_headers() {
    let entries = load_entries();

    let latest = entries
        .iter()
        .find(|entry| entry.id.0 == "p-10-20250507")
        .expect("p-10 entry for 7 May");
    assert_eq!(latest.readiness_score, 2.4);
    assert_eq!(latest.readiness_status, ReadinessStatus::Red);
    assert_eq!(latest.sleep_hours, Some(6.0));
    assert_eq!(latest.soreness_areas, vec!["hamstring", "lower back"]);
    assert_eq!(latest.notes.as_deref(), Some("Slept badly"));

    let day_first = entries
        .iter()
        .find(|entry| entry.subject_id.0 == "p-13")
        .expect("p-13 entry");
    assert_eq!(day_first.date, date(7));
    assert_eq!(day_first.readiness_score, 1.4);
}

#[test]
fn declining_player_raises_every_alert() {
    let entries = load_entries();
    let subject = SubjectId("p-10".to_string());
    let samples: Vec<TrendSample> = entries
        .iter()
        .filter(|entry| entry.subject_id == subject)
        .map(TrendSample::from)
        .collect();

    let trend = TrendCalculator::default()
        .compute_as_of(&samples, TrendWindow::Week, date(7))
        .expect("four entries in the window");

    assert_eq!(trend.from, date(1));
    assert_eq!(trend.entry_count, 4);
    assert_eq!(trend.sleep_quality.change, -2.0);
    assert_eq!(trend.fatigue_level.direction, TrendDirection::Up);
    assert_eq!(trend.readiness_score.start, 4.0);
    assert_eq!(trend.readiness_score.current, 2.4);
    assert_eq!(trend.readiness_score.direction, TrendDirection::Down);
    assert_eq!(
        trend.alerts,
        vec![
            "Sleep quality declining",
            "Fatigue levels increasing",
            "Muscle soreness increasing",
            "Readiness score dropping",
        ]
    );
}

#[test]
fn match_day_summary_flags_red_players() {
    let entries = load_entries();
    let summary = summarize_day(&entries, date(7));

    assert_eq!(summary.submitted, 4);
    assert_eq!(summary.count(ReadinessStatus::Green), 1);
    assert_eq!(summary.count(ReadinessStatus::Amber), 1);
    assert_eq!(summary.count(ReadinessStatus::Red), 2);
    assert_eq!(summary.average_readiness, Some(2.9));

    let flagged: Vec<&str> = summary
        .flagged
        .iter()
        .map(|player| player.subject_id.0.as_str())
        .collect();
    assert_eq!(flagged, vec!["p-13", "p-10"]);
    assert_eq!(summary.awaiting_review, 2);
}
