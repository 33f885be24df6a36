use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use super::domain::AnswerRecord;

#[derive(Debug)]
pub enum AnswerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { row: usize, source: serde_json::Error },
}

impl std::fmt::Display for AnswerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerImportError::Io(err) => write!(f, "failed to read intake export: {}", err),
            AnswerImportError::Csv(err) => write!(f, "invalid intake CSV data: {}", err),
            AnswerImportError::Row { row, source } => {
                write!(f, "row {} is not a valid answer record: {}", row, source)
            }
        }
    }
}

impl std::error::Error for AnswerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerImportError::Io(err) => Some(err),
            AnswerImportError::Csv(err) => Some(err),
            AnswerImportError::Row { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for AnswerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One questionnaire read from an export; `row` is 1-based, excluding the header.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedAnswers {
    pub row: usize,
    pub answers: AnswerRecord,
}

/// Reads paper-intake exports whose header row uses the form's camelCase keys.
///
/// Blank cells are treated as unanswered and unknown columns are ignored.
pub struct AnswerRecordImporter;

impl AnswerRecordImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedAnswers>, AnswerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ImportedAnswers>, AnswerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut imported = Vec::new();

        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = index + 1;

            let fields: Map<String, Value> = headers
                .iter()
                .zip(record.iter())
                .filter(|(_, value)| !value.is_empty())
                .map(|(header, value)| (header.to_string(), Value::String(value.to_string())))
                .collect();

            let answers = serde_json::from_value::<AnswerRecord>(Value::Object(fields))
                .map_err(|source| AnswerImportError::Row { row, source })?;

            imported.push(ImportedAnswers { row, answers });
        }

        Ok(imported)
    }
}
