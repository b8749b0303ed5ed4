use chrono::{NaiveDate, Utc};
use clap::Args;
use rugby_hub::access::{permissions_for, rank, Role};
use rugby_hub::error::AppError;
use rugby_hub::wellness::{
    classify, compute_readiness, summarize_day, ReadinessInputs, RejectedRow, SubjectId,
    TeamReadinessSummary, TrendCalculator, TrendConfig, TrendSample, TrendWindow,
    WellnessCsvImporter, WellnessEntry, WellnessTrend,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ReadinessScoreArgs {
    /// Sleep quality, 1 (poor) to 5 (excellent)
    #[arg(long)]
    pub(crate) sleep_quality: Option<i64>,
    /// Fatigue, 1 (fresh) to 5 (exhausted)
    #[arg(long)]
    pub(crate) fatigue_level: Option<i64>,
    /// Muscle soreness, 1 (none) to 5 (severe)
    #[arg(long)]
    pub(crate) muscle_soreness: Option<i64>,
    /// Stress, 1 (relaxed) to 5 (very stressed)
    #[arg(long)]
    pub(crate) stress_level: Option<i64>,
    /// Mood, 1 (low) to 5 (great)
    #[arg(long)]
    pub(crate) mood: Option<i64>,
}

#[derive(Args, Debug)]
pub(crate) struct WellnessTrendArgs {
    /// Wellness CSV export
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Player id as it appears in the export
    #[arg(long)]
    pub(crate) player: String,
    /// Window length in days (7, 14 or 30)
    #[arg(long, default_value_t = 7)]
    pub(crate) days: u32,
    /// Last day of the window (defaults to the player's latest entry)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Largest change still reported as stable
    #[arg(long, default_value_t = 0.0)]
    pub(crate) epsilon: f64,
}

#[derive(Args, Debug)]
pub(crate) struct WellnessSummaryArgs {
    /// Wellness CSV export
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Day to summarize (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RolesShowArgs {
    /// Role label such as `head_coach`; omit to print every role
    pub(crate) role: Option<String>,
}

pub(crate) fn run_readiness_score(args: ReadinessScoreArgs) {
    let inputs = ReadinessInputs {
        sleep_quality: args.sleep_quality,
        fatigue_level: args.fatigue_level,
        muscle_soreness: args.muscle_soreness,
        stress_level: args.stress_level,
        mood: args.mood,
    };
    print!("{}", format_readiness(&inputs));
}

pub(crate) fn run_wellness_trend(args: WellnessTrendArgs) -> Result<(), AppError> {
    let window = TrendWindow::try_from(args.days)?;
    let (entries, rejected) =
        WellnessCsvImporter::from_path(&args.csv)?.into_entries(Utc::now());

    let subject_id = SubjectId(args.player.trim().to_string());
    let samples: Vec<TrendSample> = entries
        .iter()
        .filter(|entry| entry.subject_id == subject_id)
        .map(TrendSample::from)
        .collect();

    let calculator = TrendCalculator::new(TrendConfig {
        stable_epsilon: args.epsilon,
        ..TrendConfig::default()
    });
    let trend = match args.as_of {
        Some(as_of) => calculator.compute_as_of(&samples, window, as_of)?,
        None => calculator.compute(&samples, window)?,
    };

    print!("{}", format_trend(&subject_id, &trend));
    print!("{}", format_rejected(&rejected));
    Ok(())
}

pub(crate) fn run_wellness_summary(args: WellnessSummaryArgs) -> Result<(), AppError> {
    let (entries, rejected): (Vec<WellnessEntry>, Vec<RejectedRow>) =
        WellnessCsvImporter::from_path(&args.csv)?.into_entries(Utc::now());
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());

    let summary = summarize_day(&entries, date);
    print!("{}", format_summary(&summary));
    print!("{}", format_rejected(&rejected));
    Ok(())
}

pub(crate) fn run_roles_show(args: RolesShowArgs) -> Result<(), AppError> {
    match args.role {
        Some(label) => {
            let role: Role = label.parse()?;
            print!("{}", format_role(role));
        }
        None => {
            for role in Role::ordered() {
                print!("{}", format_role(role));
                println!();
            }
        }
    }
    Ok(())
}

fn format_readiness(inputs: &ReadinessInputs) -> String {
    let score = compute_readiness(inputs);
    let mut out = format!(
        "Readiness score: {score:.2}\nStatus: {}\n",
        classify(score).label()
    );

    let defaulted = inputs.defaulted_fields();
    if !defaulted.is_empty() {
        out.push_str(&format!("Defaulted to 3: {}\n", defaulted.join(", ")));
    }
    out
}

fn format_trend(subject_id: &SubjectId, trend: &WellnessTrend) -> String {
    let mut out = format!(
        "Wellness trend for {} ({} days, {} to {}, {} entries)\n",
        subject_id,
        trend.window.days(),
        trend.from,
        trend.to,
        trend.entry_count
    );
    for metric in trend.metrics() {
        out.push_str(&format!(
            "  {:<16} {:>5.2} -> {:>5.2}  change {:+.2} ({:?})\n",
            metric.metric.label(),
            metric.start,
            metric.current,
            metric.change,
            metric.direction
        ));
    }

    if trend.alerts.is_empty() {
        out.push_str("No alerts.\n");
    } else {
        out.push_str("Alerts:\n");
        for alert in &trend.alerts {
            out.push_str(&format!("  - {alert}\n"));
        }
    }
    out
}

fn format_summary(summary: &TeamReadinessSummary) -> String {
    let mut out = format!(
        "Squad readiness for {}: {} submissions\n",
        summary.date, summary.submitted
    );
    for count in &summary.status_counts {
        out.push_str(&format!("  {:<6} {}\n", count.status_label, count.players));
    }
    if let Some(average) = summary.average_readiness {
        out.push_str(&format!("Average readiness: {average:.2}\n"));
    }

    if !summary.flagged.is_empty() {
        out.push_str(&format!(
            "Flagged players ({} awaiting review):\n",
            summary.awaiting_review
        ));
        for player in &summary.flagged {
            let areas = if player.soreness_areas.is_empty() {
                String::new()
            } else {
                format!(" [{}]", player.soreness_areas.join(", "))
            };
            out.push_str(&format!(
                "  - {} {:.2}{}{}\n",
                player.subject_id,
                player.readiness_score,
                areas,
                if player.reviewed { " (reviewed)" } else { "" }
            ));
        }
    }
    out
}

fn format_role(role: Role) -> String {
    let mut out = format!(
        "{} ({}) rank {}\n",
        role.display_name(),
        role.label(),
        rank(role)
    );
    for permission in permissions_for(role) {
        out.push_str(&format!(
            "  {:<22} {}\n",
            permission.label(),
            permission.description()
        ));
    }
    out
}

fn format_rejected(rejected: &[RejectedRow]) -> String {
    if rejected.is_empty() {
        return String::new();
    }
    let mut out = format!("Skipped {} rows:\n", rejected.len());
    for row in rejected {
        out.push_str(&format!("  line {}: {}\n", row.line, row.reason));
    }
    out
}
