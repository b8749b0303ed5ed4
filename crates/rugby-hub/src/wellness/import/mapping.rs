use super::normalizer::normalize_header;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Columns the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Column {
    SubjectId,
    Date,
    SleepQuality,
    MuscleSoreness,
    FatigueLevel,
    StressLevel,
    Mood,
    NutritionAdherence,
    SleepHours,
    SorenessAreas,
    Notes,
}

impl Column {
    pub(crate) const fn field(self) -> &'static str {
        match self {
            Column::SubjectId => "player_id",
            Column::Date => "date",
            Column::SleepQuality => "sleep_quality",
            Column::MuscleSoreness => "muscle_soreness",
            Column::FatigueLevel => "fatigue_level",
            Column::StressLevel => "stress_level",
            Column::Mood => "mood",
            Column::NutritionAdherence => "nutrition_adherence",
            Column::SleepHours => "sleep_hours",
            Column::SorenessAreas => "soreness_areas",
            Column::Notes => "notes",
        }
    }
}

static HEADER_MAP: OnceLock<HashMap<String, Column>> = OnceLock::new();

pub(crate) fn column_for_header(header: &str) -> Option<Column> {
    header_map().get(&normalize_header(header)).copied()
}

fn header_map() -> &'static HashMap<String, Column> {
    HEADER_MAP.get_or_init(|| {
        const HEADER_TO_COLUMN: &[(&str, Column)] = &[
            // Identity
            ("player_id", Column::SubjectId),
            ("Player", Column::SubjectId),
            ("Player ID", Column::SubjectId),
            ("subject_id", Column::SubjectId),
            ("Athlete ID", Column::SubjectId),
            ("Date", Column::Date),
            ("Entry Date", Column::Date),
            ("Submission Date", Column::Date),
            // Questionnaire
            ("sleep_quality", Column::SleepQuality),
            ("Sleep", Column::SleepQuality),
            ("muscle_soreness", Column::MuscleSoreness),
            ("Soreness", Column::MuscleSoreness),
            ("fatigue_level", Column::FatigueLevel),
            ("Fatigue", Column::FatigueLevel),
            ("stress_level", Column::StressLevel),
            ("Stress", Column::StressLevel),
            ("Mood", Column::Mood),
            ("nutrition_adherence", Column::NutritionAdherence),
            ("Nutrition", Column::NutritionAdherence),
            // Free-form extras
            ("sleep_hours", Column::SleepHours),
            ("Hours Slept", Column::SleepHours),
            ("Sleep Duration", Column::SleepHours),
            ("soreness_areas", Column::SorenessAreas),
            ("Sore Areas", Column::SorenessAreas),
            ("Notes", Column::Notes),
            ("Comments", Column::Notes),
        ];

        let mut map = HashMap::with_capacity(HEADER_TO_COLUMN.len());
        for (header, column) in HEADER_TO_COLUMN {
            map.insert(normalize_header(header), *column);
        }
        map
    })
}
