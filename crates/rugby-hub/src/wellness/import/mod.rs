//! CSV import of wellness questionnaires exported from spreadsheets or survey tools.
//!
//! Headers are matched loosely (case, spacing and punctuation are ignored, common aliases
//! such as `Player` or `Sleep` are accepted). Rows that cannot be read are reported back
//! with their line number instead of failing the whole file.

mod mapping;
mod normalizer;
mod parser;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use super::domain::{WellnessEntry, WellnessSubmission};

pub use parser::parse_date;

#[derive(Debug)]
pub enum WellnessImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for WellnessImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WellnessImportError::Io(err) => write!(f, "failed to read wellness export: {}", err),
            WellnessImportError::Csv(err) => write!(f, "invalid wellness CSV data: {}", err),
            WellnessImportError::MissingColumn(column) => {
                write!(f, "wellness CSV has no '{}' column", column)
            }
        }
    }
}

impl std::error::Error for WellnessImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WellnessImportError::Io(err) => Some(err),
            WellnessImportError::Csv(err) => Some(err),
            WellnessImportError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for WellnessImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for WellnessImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedRow {
    pub line: u64,
    pub submission: WellnessSubmission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportBatch {
    pub rows: Vec<ImportedRow>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportBatch {
    /// Score every row. Rows whose submission cannot become an entry join `rejected`.
    pub fn into_entries(self, submitted_at: DateTime<Utc>) -> (Vec<WellnessEntry>, Vec<RejectedRow>) {
        let mut rejected = self.rejected;
        let mut entries = Vec::with_capacity(self.rows.len());

        for row in self.rows {
            match WellnessEntry::from_submission(row.submission, submitted_at) {
                Ok(entry) => entries.push(entry),
                Err(err) => rejected.push(RejectedRow {
                    line: row.line,
                    reason: err.to_string(),
                }),
            }
        }

        rejected.sort_by_key(|row| row.line);
        (entries, rejected)
    }
}

pub struct WellnessCsvImporter;

impl WellnessCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportBatch, WellnessImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ImportBatch, WellnessImportError> {
        let mut batch = ImportBatch::default();

        for row in parser::parse_rows(reader)? {
            match row.outcome {
                Ok(submission) => batch.rows.push(ImportedRow {
                    line: row.line,
                    submission,
                }),
                Err(reason) => batch.rejected.push(RejectedRow {
                    line: row.line,
                    reason,
                }),
            }
        }

        Ok(batch)
    }
}
