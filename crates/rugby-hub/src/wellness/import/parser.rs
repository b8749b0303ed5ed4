use super::mapping::{column_for_header, Column};
use crate::wellness::domain::{SubjectId, WellnessSubmission};
use chrono::{DateTime, NaiveDate};
use std::collections::HashMap;
use std::io::Read;

use super::WellnessImportError;

/// A data row that parsed, or the reason it did not. `line` is 1-based and counts the
/// header.
#[derive(Debug)]
pub(crate) struct ParsedRow {
    pub(crate) line: u64,
    pub(crate) outcome: Result<WellnessSubmission, String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, WellnessImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let layout = Layout::from_headers(csv_reader.headers()?)?;
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        rows.push(ParsedRow {
            line,
            outcome: layout.submission(&record),
        });
    }

    Ok(rows)
}

/// Column positions resolved from the header row. The first matching header wins.
struct Layout {
    positions: HashMap<Column, usize>,
}

impl Layout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, WellnessImportError> {
        let mut positions = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(column) = column_for_header(header) {
                positions.entry(column).or_insert(index);
            }
        }

        for required in [Column::SubjectId, Column::Date] {
            if !positions.contains_key(&required) {
                return Err(WellnessImportError::MissingColumn(required.field()));
            }
        }

        Ok(Self { positions })
    }

    fn cell<'r>(&self, record: &'r csv::StringRecord, column: Column) -> Option<&'r str> {
        self.positions
            .get(&column)
            .and_then(|index| record.get(*index))
            .filter(|value| !value.is_empty())
    }

    fn submission(&self, record: &csv::StringRecord) -> Result<WellnessSubmission, String> {
        let subject = self
            .cell(record, Column::SubjectId)
            .ok_or_else(|| "missing player_id".to_string())?;
        let raw_date = self
            .cell(record, Column::Date)
            .ok_or_else(|| "missing date".to_string())?;
        let date =
            parse_date(raw_date).ok_or_else(|| format!("unrecognized date '{raw_date}'"))?;

        let mut submission = WellnessSubmission::new(SubjectId(subject.to_string()), date);
        submission.sleep_quality = self.rating(record, Column::SleepQuality)?;
        submission.muscle_soreness = self.rating(record, Column::MuscleSoreness)?;
        submission.fatigue_level = self.rating(record, Column::FatigueLevel)?;
        submission.stress_level = self.rating(record, Column::StressLevel)?;
        submission.mood = self.rating(record, Column::Mood)?;
        submission.nutrition_adherence = self.rating(record, Column::NutritionAdherence)?;

        if let Some(raw) = self.cell(record, Column::SleepHours) {
            let hours: f64 = raw
                .parse()
                .map_err(|_| format!("invalid sleep_hours value '{raw}'"))?;
            submission.sleep_hours = Some(hours);
        }

        if let Some(raw) = self.cell(record, Column::SorenessAreas) {
            submission.soreness_areas = split_areas(raw);
        }
        submission.notes = self.cell(record, Column::Notes).map(str::to_string);

        Ok(submission)
    }

    fn rating(&self, record: &csv::StringRecord, column: Column) -> Result<Option<i64>, String> {
        let Some(raw) = self.cell(record, column) else {
            return Ok(None);
        };
        parse_rating(raw)
            .map(Some)
            .ok_or_else(|| format!("invalid {} value '{raw}'", column.field()))
    }
}

/// Whole numbers, or decimals rounded to the nearest answer (`"4.0"` exports from
/// spreadsheets).
fn parse_rating(value: &str) -> Option<i64> {
    if let Ok(number) = value.parse::<i64>() {
        return Some(number);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .map(|number| number.round() as i64)
}

fn split_areas(value: &str) -> Vec<String> {
    value
        .split([';', '|'])
        .map(str::trim)
        .filter(|area| !area.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    None
}
