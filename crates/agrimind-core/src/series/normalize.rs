use serde::{Deserialize, Serialize};

use super::record::{RawRecord, RawValue};

/// Canonical time-series fields recognised in uploaded rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Date,
    Yield,
    Rainfall,
    Temperature,
    VegetationIndex,
}

/// Candidate column names per canonical field, in priority order.
pub const FIELD_SYNONYMS: &[(Field, &[&str])] = &[
    (
        Field::Date,
        &["date", "Date", "timestamp", "Timestamp", "year", "Year"],
    ),
    (Field::Yield, &["yield", "Yield"]),
    (Field::Rainfall, &["rainfall", "Rainfall"]),
    (
        Field::Temperature,
        &["temp", "Temp", "temperature", "Temperature"],
    ),
    (Field::VegetationIndex, &["ndvi", "NDVI"]),
];

impl Field {
    pub fn candidates(self) -> &'static [&'static str] {
        FIELD_SYNONYMS
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, keys)| *keys)
            .unwrap_or(&[])
    }

    /// First candidate column that is present and non-empty.
    pub fn resolve(self, record: &RawRecord) -> Option<&RawValue> {
        self.candidates()
            .iter()
            .filter_map(|key| record.get(*key))
            .find(|value| !value.is_empty())
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "Date"),
            Self::Yield => write!(f, "Yield"),
            Self::Rainfall => write!(f, "Rainfall"),
            Self::Temperature => write!(f, "Temperature"),
            Self::VegetationIndex => write!(f, "Vegetation index"),
        }
    }
}

/// One normalized row. `index` is the upload position; rows are never
/// reordered by date.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub index: usize,
    pub date: String,
    #[serde(rename = "yield")]
    pub yield_value: Option<f64>,
    pub rainfall: Option<f64>,
    pub temperature: Option<f64>,
    pub vegetation_index: Option<f64>,
}

impl TimeSeriesPoint {
    pub fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Date => None,
            Field::Yield => self.yield_value,
            Field::Rainfall => self.rainfall,
            Field::Temperature => self.temperature,
            Field::VegetationIndex => self.vegetation_index,
        }
    }
}

/// Turn uploaded rows into an ordered time series.
pub fn normalize(records: &[RawRecord]) -> Vec<TimeSeriesPoint> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let numeric = |field: Field| field.resolve(record).and_then(RawValue::as_finite);
            TimeSeriesPoint {
                index,
                date: Field::Date
                    .resolve(record)
                    .map(RawValue::to_label)
                    .unwrap_or_default(),
                yield_value: numeric(Field::Yield),
                rainfall: numeric(Field::Rainfall),
                temperature: numeric(Field::Temperature),
                vegetation_index: numeric(Field::VegetationIndex),
            }
        })
        .collect()
}

/// One field across the series, preserving positions of missing values.
pub fn column(points: &[TimeSeriesPoint], field: Field) -> Vec<Option<f64>> {
    points.iter().map(|p| p.value(field)).collect()
}

/// Finite values of one field, in series order.
pub fn finite_values(points: &[TimeSeriesPoint], field: Field) -> Vec<f64> {
    points.iter().filter_map(|p| p.value(field)).collect()
}
