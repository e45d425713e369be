use indicator_data::ingestion::{ingest_csv_from_path, ingest_csv_from_reader, ingest_csv_from_str};
use indicator_data::ingestion::csv::reader_builder;
use indicator_data::types::Value;

#[test]
fn ingest_csv_from_path_happy_path() {
    let ds = ingest_csv_from_path("tests/fixtures/gdp_recovery_data.csv").unwrap();

    assert_eq!(ds.row_count(), 7);
    assert_eq!(ds.schema.len(), 8);
    assert_eq!(ds.schema.index_of("Country Code"), Some(1));

    let korea = ds.record(0).unwrap();
    assert_eq!(korea.get("Country"), Some(&Value::from("Korea")));
    assert_eq!(korea.get("GDP_Per_Capita_2019"), Some(&Value::Number(31902.4)));
    assert_eq!(korea.get("COVID_Shock"), Some(&Value::Number(-0.7)));
}

#[test]
fn every_record_has_the_header_columns() {
    let ds = ingest_csv_from_path("tests/fixtures/gdp_recovery_data.csv").unwrap();
    let header: Vec<&str> = ds.schema.column_names().collect();
    for record in ds.records() {
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, header);
    }
}

#[test]
fn short_rows_in_fixture_are_null_padded() {
    let ds = ingest_csv_from_path("tests/fixtures/gdp_recovery_data.csv").unwrap();
    let kenya = ds.record(6).unwrap();
    assert_eq!(kenya.get("Country"), Some(&Value::from("Kenya")));
    assert_eq!(kenya.get("Recovery_2020_2023"), Some(&Value::Number(4.6)));
    assert_eq!(kenya.get("COVID_Shock"), Some(&Value::Null));
}

#[test]
fn malformed_rows_are_absorbed() {
    let ds = ingest_csv_from_path("tests/fixtures/malformed.csv").unwrap();
    assert_eq!(
        ds.rows,
        vec![
            vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)],
            vec![Value::Number(1.0), Value::Null, Value::Null],
            vec![Value::from("x, y"), Value::Number(2.0), Value::Number(3.0)],
            vec![Value::Null, Value::Null, Value::Null],
        ]
    );
}

#[test]
fn ingest_csv_from_reader_accepts_any_read() {
    let input = "Country,Deaths\nKOR,  \nJPN,N/A\n";
    let mut rdr = reader_builder().from_reader(input.as_bytes());

    let ds = ingest_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.rows[0][1], Value::Null);
    assert_eq!(ds.rows[1][1], Value::from("N/A"));
}

#[test]
fn missing_file_is_source_unavailable() {
    let err = ingest_csv_from_path("tests/fixtures/does_not_exist.csv").unwrap_err();
    assert!(err.is_source_unavailable());
    assert!(err.to_string().starts_with("io error"));
}

#[test]
fn invalid_utf8_in_a_file_keeps_the_other_rows() {
    let path = std::env::temp_dir().join(format!("indicator-data-lossy-{}.csv", std::process::id()));
    std::fs::write(&path, b"Country,Deaths\nKOR,\xff\n\xfeJPN,12\nFRA,30\n").unwrap();

    let ds = ingest_csv_from_path(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(ds.row_count(), 3);
    assert_eq!(ds.rows[0][1], Value::from("\u{FFFD}"));
    assert_eq!(ds.rows[1][0], Value::from("\u{FFFD}JPN"));
    assert_eq!(ds.rows[2], vec![Value::from("FRA"), Value::Number(30.0)]);
}

#[test]
fn round_trip_example() {
    let ds = ingest_csv_from_str("a,b\n1,\n,2").unwrap();
    let json = serde_json::to_value(&ds).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "a": 1.0, "b": null }, { "a": null, "b": 2.0 }])
    );
}
