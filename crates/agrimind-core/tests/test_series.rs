use agrimind_core::series::{
    column, finite_values, normalize, parse_csv_records, parse_json_records, read_csv_records,
    Field, RawValue,
};

mod common;

// ---------------------------------------------------------------------------
// CSV ingestion
// ---------------------------------------------------------------------------

#[test]
fn test_csv_types_cells() {
    let records = parse_csv_records("date,yield,note\n2021,10.5,ok\n").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["date"], RawValue::Number(2021.0));
    assert_eq!(records[0]["yield"], RawValue::Number(10.5));
    assert_eq!(records[0]["note"], RawValue::Text("ok".into()));
}

#[test]
fn test_csv_skips_blank_rows() {
    let records = parse_csv_records("yield,rainfall\n1,2\n,\n3,4\n").unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_csv_keeps_column_order() {
    let records = parse_csv_records("b,a,c\n1,2,3\n").unwrap();
    let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_read_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_file(dir.path(), "farm.csv", common::SAMPLE_CSV);
    let records = read_csv_records(&path).unwrap();
    assert_eq!(records.len(), 5);
}

#[test]
fn test_read_missing_csv_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_csv_records(&dir.path().join("missing.csv")).is_err());
}

#[test]
fn test_json_records() {
    let records =
        parse_json_records(r#"[{"Year": 2020, "Yield": 3.5, "NDVI": null}, {"Year": "2021"}]"#)
            .unwrap();
    let points = normalize(&records);
    assert_eq!(points[0].date, "2020");
    assert_eq!(points[0].yield_value, Some(3.5));
    assert_eq!(points[0].vegetation_index, None);
    assert_eq!(points[1].date, "2021");
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn test_normalize_preserves_upload_order() {
    let records = parse_csv_records("date,yield\n2023,3\n2021,1\n2022,2\n").unwrap();
    let points = normalize(&records);
    let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2023", "2021", "2022"]);
    let indices: Vec<usize> = points.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_normalize_synonyms() {
    let records =
        parse_csv_records("Timestamp,Yield,Rainfall,Temperature,NDVI\nt0,4,30,21,0.5\n").unwrap();
    let p = &normalize(&records)[0];
    assert_eq!(p.date, "t0");
    assert_eq!(p.yield_value, Some(4.0));
    assert_eq!(p.rainfall, Some(30.0));
    assert_eq!(p.temperature, Some(21.0));
    assert_eq!(p.vegetation_index, Some(0.5));
}

#[test]
fn test_first_non_empty_synonym_wins() {
    let records = parse_csv_records("yield,Yield,temp,temperature\n,7,,19\n").unwrap();
    let p = &normalize(&records)[0];
    assert_eq!(p.yield_value, Some(7.0));
    assert_eq!(p.temperature, Some(19.0));
}

#[test]
fn test_non_numeric_is_missing_not_zero() {
    let records = parse_csv_records("yield,rainfall\nn/a,\n").unwrap();
    let p = &normalize(&records)[0];
    assert_eq!(p.yield_value, None);
    assert_eq!(p.rainfall, None);
}

#[test]
fn test_missing_date_is_empty_label() {
    let records = parse_csv_records("yield\n5\n").unwrap();
    assert_eq!(normalize(&records)[0].date, "");
}

#[test]
fn test_column_keeps_gaps() {
    let records = parse_csv_records("yield\n1\nx\n3\n").unwrap();
    let points = normalize(&records);
    assert_eq!(column(&points, Field::Yield), vec![Some(1.0), None, Some(3.0)]);
    assert_eq!(finite_values(&points, Field::Yield), vec![1.0, 3.0]);
}

#[test]
fn test_point_serializes_yield_key() {
    let records = parse_csv_records("date,yield\nd,2\n").unwrap();
    let json = serde_json::to_value(&normalize(&records)[0]).unwrap();
    assert_eq!(json["yield"], 2.0);
}
