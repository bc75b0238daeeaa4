//! Parsing of JTL-style result files.
//!
//! A result file is comma-delimited text with a header row. Each data row is
//! one sampled request; only a handful of columns matter to the statistics
//! engine and each of them is resolved through a [`FieldSource`].

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::error::JtlError;

// ---------------------------------------------------------------------------
// Record / ResultSet
// ---------------------------------------------------------------------------

/// One observed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Record {
    /// Time taken by the request (ms).
    pub elapsed_ms: i64,
    /// When the request was sampled (epoch ms).
    pub timestamp_ms: i64,
    /// Logical endpoint / sampler name. May be empty.
    pub label: String,
    pub success: bool,
}

impl Record {
    pub fn new(elapsed_ms: i64, timestamp_ms: i64, label: impl Into<String>, success: bool) -> Self {
        Self {
            elapsed_ms,
            timestamp_ms,
            label: label.into(),
            success,
        }
    }
}

/// All records of one result file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<Record>,
}

impl ResultSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for ResultSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// FieldSource — ordered column fallback
// ---------------------------------------------------------------------------

/// A logical field read from the first candidate column that holds a value.
///
/// A candidate only counts when the column is present in the header and the
/// cell is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSource {
    pub name: &'static str,
    pub candidates: &'static [&'static str],
}

pub const ELAPSED: FieldSource = FieldSource {
    name: "elapsed",
    candidates: &["elapsed", "time"],
};

pub const TIMESTAMP: FieldSource = FieldSource {
    name: "timeStamp",
    candidates: &["timeStamp", "time"],
};

const LABEL_COLUMN: &str = "label";
const SUCCESS_COLUMN: &str = "success";

impl FieldSource {
    /// Column indices of the candidates present in `headers`, in candidate order.
    pub fn resolve(&self, headers: &StringRecord) -> Vec<(usize, &'static str)> {
        self.candidates
            .iter()
            .filter_map(|&name| column_index(headers, name).map(|idx| (idx, name)))
            .collect()
    }

    /// The first non-empty candidate cell of `row`, with its column name.
    pub fn pick<'r>(
        columns: &[(usize, &'static str)],
        row: &'r StringRecord,
    ) -> Option<(&'static str, &'r str)> {
        columns.iter().find_map(|&(idx, name)| match row.get(idx) {
            Some(value) if !value.is_empty() => Some((name, value)),
            _ => None,
        })
    }

    fn read_i64(
        &self,
        columns: &[(usize, &'static str)],
        row: &StringRecord,
        line: u64,
    ) -> Result<i64, JtlError> {
        let (column, value) = Self::pick(columns, row).ok_or(JtlError::MissingField {
            line,
            field: self.name,
        })?;
        parse_i64(value).ok_or_else(|| JtlError::InvalidInteger {
            line,
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Integer parse tolerant of surrounding whitespace and a leading sign.
pub fn parse_i64(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// `success` cell semantics: only a case-insensitive `true` is a success.
/// The cell is compared as-is; padding makes it a failure.
pub fn parse_success(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

// ---------------------------------------------------------------------------
// parse_records
// ---------------------------------------------------------------------------

/// Parse the full contents of a result file.
///
/// Any malformed row aborts the whole file; there is no per-row skipping.
/// A file without data rows yields an empty [`ResultSet`].
pub fn parse_records(content: &str) -> Result<ResultSet, JtlError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: StringRecord = reader.headers()?.iter().map(str::trim).collect();

    let elapsed_cols = ELAPSED.resolve(&headers);
    let timestamp_cols = TIMESTAMP.resolve(&headers);
    let label_col = column_index(&headers, LABEL_COLUMN);
    let success_col = column_index(&headers, SUCCESS_COLUMN);

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result?;
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);

        let elapsed_ms = ELAPSED.read_i64(&elapsed_cols, &row, line)?;
        let timestamp_ms = TIMESTAMP.read_i64(&timestamp_cols, &row, line)?;
        let label = label_col
            .and_then(|i| row.get(i))
            .unwrap_or_default()
            .to_string();
        let success = match success_col {
            Some(i) => row.get(i).map(parse_success).unwrap_or(false),
            None => true,
        };

        records.push(Record {
            elapsed_ms,
            timestamp_ms,
            label,
            success,
        });
    }

    tracing::debug!("Parsed {} records", records.len());
    Ok(ResultSet::new(records))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
