use indicator_data::config::{DashboardConfig, DatasetEntry};
use indicator_data::handlers::{
    DatasetQuery, dataset_correlation, dataset_data, dataset_facets, dataset_preview, dataset_profile,
    dataset_summary, report,
};
use serde_json::{Value as Json, json};

fn fixture_config() -> DashboardConfig {
    let mut cfg = DashboardConfig::empty("tests/fixtures");
    cfg.datasets = vec![
        DatasetEntry::csv("gdp-recovery", "gdp_recovery_data.csv"),
        DatasetEntry::csv("missing", "nope/absent.csv"),
        DatasetEntry::markdown("gdp-recovery-report", "reports/gdp_recovery_report.md"),
        DatasetEntry::markdown("missing-report", "reports/absent.md"),
    ];
    cfg
}

fn body(resp: &indicator_data::handlers::ApiResponse) -> Json {
    serde_json::from_str(&resp.body).unwrap()
}

#[test]
fn data_returns_array_of_objects() {
    let resp = dataset_data(&fixture_config(), "gdp-recovery", &DatasetQuery::default());
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, "application/json");

    let rows = body(&resp);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["Country"], json!("Korea"));
    assert_eq!(rows[5]["Region"], Json::Null);
    assert_eq!(rows[6]["COVID_Shock"], Json::Null);
}

#[test]
fn data_applies_query_filters() {
    let query = DatasetQuery::from_pairs([("Income_Group", "High income"), ("Region", "")]);
    let resp = dataset_data(&fixture_config(), "gdp-recovery", &query);
    let rows = body(&resp);
    let countries: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Country"].as_str().unwrap())
        .collect();
    assert_eq!(countries, vec!["Korea", "Japan", "Germany"]);
}

#[test]
fn unreadable_source_is_a_server_error() {
    let resp = dataset_data(&fixture_config(), "missing", &DatasetQuery::default());
    assert_eq!(resp.status, 500);
    assert_eq!(body(&resp), json!({ "error": "Failed to load data" }));
}

#[test]
fn unknown_dataset_is_not_found() {
    let cfg = fixture_config();
    assert_eq!(dataset_data(&cfg, "nope", &DatasetQuery::default()).status, 404);
    // A report is not a dataset.
    assert_eq!(dataset_preview(&cfg, "gdp-recovery-report").status, 404);
    // And a dataset is not a report.
    assert_eq!(report(&cfg, "gdp-recovery").status, 404);
}

#[test]
fn preview_reports_shape_and_columns() {
    let mut cfg = fixture_config();
    cfg.preview_rows = 2;
    let resp = dataset_preview(&cfg, "gdp-recovery");
    let b = body(&resp);
    assert_eq!(b["data"].as_array().unwrap().len(), 2);
    assert_eq!(b["shape"], json!([7, 8]));
    assert_eq!(b["columns"][0], json!("Country"));
}

#[test]
fn summary_uses_quality_filter() {
    let resp = dataset_summary(&fixture_config(), "gdp-recovery", "GDP_Per_Capita_2019");
    assert_eq!(resp.status, 200);
    let b = body(&resp);
    // Atlantis has six nulls and is dropped.
    assert_eq!(b["count"], json!(6));
    assert_eq!(b["min"], json!(1912.6));
    assert_eq!(b["max"], json!(46793.7));
    assert!((b["median"].as_f64().unwrap() - 20_399.95).abs() < 1e-6);

    let none = body(&dataset_summary(&fixture_config(), "gdp-recovery", "Country"));
    assert_eq!(
        none,
        json!({ "count": 0, "mean": 0.0, "median": 0.0, "min": 0.0, "max": 0.0, "std": 0.0 })
    );
}

#[test]
fn correlation_between_numeric_columns() {
    let cfg = fixture_config();
    let b = body(&dataset_correlation(&cfg, "gdp-recovery", "GDP_Per_Capita_2019", "GDP_2020"));
    assert_eq!(b["x"], json!("GDP_Per_Capita_2019"));
    assert_eq!(b["y"], json!("GDP_2020"));
    let r = b["correlation"].as_f64().unwrap();
    assert!(r > 0.99 && r <= 1.0);

    // Text columns have no numeric pairs.
    let b = body(&dataset_correlation(&cfg, "gdp-recovery", "Country", "GDP_2020"));
    assert_eq!(b["correlation"], Json::Null);

    assert_eq!(dataset_correlation(&cfg, "nope", "a", "b").status, 404);
    assert_eq!(dataset_correlation(&cfg, "missing", "a", "b").status, 500);
}

#[test]
fn facets_list_distinct_values() {
    let resp = dataset_facets(&fixture_config(), "gdp-recovery", &["Income_Group", "Unknown"]);
    let b = body(&resp);
    assert_eq!(
        b["Income_Group"],
        json!(["High income", "Lower middle income", "Upper middle income"])
    );
    assert_eq!(b["Unknown"], json!([]));
}

#[test]
fn profile_counts_missing_cells() {
    let b = body(&dataset_profile(&fixture_config(), "gdp-recovery"));
    assert_eq!(b["rows"], json!(7));
    assert_eq!(b["columns"], json!(8));
    // Brazil 2 + Atlantis 6 + Kenya 1
    assert_eq!(b["missing"], json!(9));
}

#[test]
fn report_is_served_verbatim() {
    let cfg = fixture_config();
    let resp = report(&cfg, "gdp-recovery-report");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, "text/markdown; charset=utf-8");
    assert!(resp.body.starts_with("# GDP Recovery Report"));

    let failed = report(&cfg, "missing-report");
    assert_eq!(failed.status, 500);
    assert_eq!(failed.body, "Failed to load report");
}
