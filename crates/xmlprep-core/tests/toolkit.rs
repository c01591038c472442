//! Tests for the documented behavior of the cleaning routines.

use xmlprep_core::{
    DuplicateLog, PrepareOptions, dedupe_headers, dedupe_headers_with, match_datetime,
    normalize_datetime, prepare_table, sanitize_tag,
};

#[test]
fn dedupe_example_table() {
    assert_eq!(
        dedupe_headers(&["Name", "Age", "Name", "City", "Age"], false),
        vec!["Name", "Age", "Name_2", "City", "Age_2"]
    );
}

#[test]
fn dedupe_empty_with_reporting() {
    let headers: Vec<String> = Vec::new();
    assert!(dedupe_headers(&headers, true).is_empty());

    let mut log = DuplicateLog::new();
    assert!(dedupe_headers_with(&headers, &mut log).is_empty());
    assert!(log.is_empty());
}

#[test]
fn dedupe_reports_counts() {
    let mut log = DuplicateLog::new();
    dedupe_headers_with(&["Name", "Age", "Name", "City", "Age"], &mut log);
    assert_eq!(log.len(), 2);
    assert_eq!(log.count_for("Name"), Some(2));
    assert_eq!(log.count_for("Age"), Some(2));
    assert_eq!(log.count_for("City"), None);
}

#[test]
fn sanitize_examples() {
    assert_eq!(sanitize_tag("<Hello World!>"), "Hello_x0020_World");
    assert_eq!(sanitize_tag(""), "");
    assert_eq!(sanitize_tag("()<>/\\?!\"'@#$%^&*+=~`|[]{};:,."), "");
}

#[test]
fn normalize_examples() {
    assert_eq!(normalize_datetime("12-25-20 12:34:56"), "2020-12-25 12:34:56");
    assert_eq!(normalize_datetime("invalid date"), "invalid date");
    assert_eq!(normalize_datetime("1/02/06"), "2006-01-02 00:00:00");
}

#[test]
fn every_candidate_layout_is_reachable() {
    let samples = [
        ("07-04-21", "01-02-06"),
        ("07-04-21 9:30", "01-02-06 15:04"),
        ("07-04-21 09:30:15", "01-02-06 15:04:05"),
        ("7/04/21", "1/02/06"),
        ("7/04/21 9:30", "1/02/06 15:04"),
        ("7/04/21 09:30:15", "1/02/06 15:04:05"),
    ];
    for (value, layout) in samples {
        assert_eq!(match_datetime(value).unwrap().layout, layout, "{value}");
    }
}

#[test]
fn padded_slash_layouts_are_shadowed() {
    // The unpadded-month layouts accept two digits too, so they win.
    for value in ["07/04/21", "07/04/21 09:30", "07/04/21 09:30:15"] {
        assert!(match_datetime(value).unwrap().layout.starts_with("1/"));
    }
}

#[test]
fn composed_header_pipeline() {
    let headers = dedupe_headers(&["Start Date", "Start Date", "Dose (mg)"], false);
    let tags: Vec<String> = headers.iter().map(|h| sanitize_tag(h)).collect();
    assert_eq!(
        tags,
        vec!["Start_x0020_Date", "Start_x0020_Date_2", "Dose_x0020_mg"]
    );
}

#[test]
fn prepared_table_matches_manual_composition() {
    let rows = vec![vec!["12-25-20".to_string(), "5".to_string()]];
    let table = prepare_table(&["Start Date", "Dose (mg)"], rows, &PrepareOptions::default());
    let tags: Vec<&str> = table.tags().collect();
    assert_eq!(tags, vec!["Start_x0020_Date", "Dose_x0020_mg"]);
    assert_eq!(table.rows[0], vec!["2020-12-25 00:00:00", "5"]);
}
