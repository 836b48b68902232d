use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A loosely-typed cell from an uploaded table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Type a raw CSV cell: finite numbers become `Number`, booleans `Bool`,
    /// blank cells `Null`, everything else stays text.
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Self::Null;
        }
        match trimmed {
            "true" | "TRUE" | "True" => return Self::Bool(true),
            "false" | "FALSE" | "False" => return Self::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(cell.to_string()),
        }
    }

    /// Null or whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Finite numeric value, parsing text if needed. Never zero-fills.
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Display label for the cell.
    pub fn to_label(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// One uploaded row. Keys keep their original casing and column order.
pub type RawRecord = IndexMap<String, RawValue>;

/// Parse CSV text with a header row into raw records.
pub fn parse_csv_records(text: &str) -> Result<Vec<RawRecord>> {
    read_records(text.as_bytes())
}

/// Read a CSV file with a header row into raw records.
pub fn read_csv_records(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path)?;
    read_records(file)
}

fn read_records<R: Read>(input: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(key, cell)| (key.clone(), RawValue::from_cell(cell)))
            .collect();
        records.push(record);
    }
    Ok(records)
}

/// Parse a JSON array of objects into raw records.
pub fn parse_json_records(text: &str) -> Result<Vec<RawRecord>> {
    Ok(serde_json::from_str(text)?)
}
