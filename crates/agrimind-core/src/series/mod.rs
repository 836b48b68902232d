pub mod normalize;
pub mod record;

pub use normalize::{column, finite_values, normalize, Field, TimeSeriesPoint, FIELD_SYNONYMS};
pub use record::{parse_csv_records, parse_json_records, read_csv_records, RawRecord, RawValue};
