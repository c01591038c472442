//! End-to-end tests for CSV to XML conversion through files.

use std::fs;

use xmlprep_cli::config::{PrepareOverrides, resolve_prepare_options};
use xmlprep_cli::pipeline::{ConvertRequest, convert, write_summary_json};
use xmlprep_cli::ExportError;

fn write_input(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn converts_file_and_reports_stats() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "people.csv", "Name,Age,Name,Born\nAda,36,Lovelace,12-10-15\n");
    let output = dir.path().join("out").join("people.xml");

    let mut request = ConvertRequest::new(&input);
    request.output = Some(output.clone());
    let outcome = convert(&request).unwrap();

    assert_eq!(outcome.records_written, 1);
    assert_eq!(outcome.stats.renamed_headers, 1);
    assert_eq!(outcome.stats.normalized_dates, 1);
    let tags: Vec<&str> = outcome.columns.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, vec!["Name", "Age", "Name_2", "Born"]);

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<Name_2>Lovelace</Name_2>"));
    assert!(xml.contains("<Born>2015-12-10 00:00:00</Born>"));
}

#[test]
fn semicolon_delimited_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "data.csv", "a;b\n1;2\n");
    let output = dir.path().join("data.xml");

    let mut request = ConvertRequest::new(&input);
    request.output = Some(output.clone());
    request.delimiter = b';';
    convert(&request).unwrap();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<a>1</a>"));
    assert!(xml.contains("<b>2</b>"));
}

#[test]
fn summary_json_round_trips_counts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "in.csv", "x,x,x\n1,2,3\n");
    let mut request = ConvertRequest::new(&input);
    request.output = Some(dir.path().join("in.xml"));
    let outcome = convert(&request).unwrap();

    let summary = dir.path().join("summary.json");
    write_summary_json(&summary, &outcome).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(value["stats"]["renamed_headers"], 2);
    assert_eq!(value["records_written"], 1);
    assert_eq!(value["columns"][2]["tag"], "x_3");
}

#[test]
fn options_file_disables_steps() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "in.csv", "A B,A B\n01-02-06,x\n");
    let config = write_input(&dir, "options.json", r#"{"dedupe_headers": false}"#);
    let output = dir.path().join("in.xml");

    let mut request = ConvertRequest::new(&input);
    request.output = Some(output.clone());
    request.prepare = resolve_prepare_options(
        Some(config.as_path()),
        PrepareOverrides {
            no_dates: true,
            ..PrepareOverrides::default()
        },
    )
    .unwrap();
    let outcome = convert(&request).unwrap();

    assert_eq!(outcome.columns[0].tag, "A_x0020_B");
    assert_eq!(outcome.columns[1].tag, "A_x0020_B");
    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<A_x0020_B>01-02-06</A_x0020_B>"));
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let request = ConvertRequest::new(dir.path().join("absent.csv"));
    let err = convert(&request).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ExportError>(),
        Some(ExportError::CsvRead { .. })
    ));
}

#[test]
fn unsanitized_header_with_space_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "in.csv", "Id,Visit Date\n1,12-25-20\n");
    let mut request = ConvertRequest::new(&input);
    request.output = Some(dir.path().join("in.xml"));
    request.prepare = resolve_prepare_options(
        None,
        PrepareOverrides {
            no_sanitize: true,
            ..PrepareOverrides::default()
        },
    )
    .unwrap();

    let err = convert(&request).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ExportError>(),
        Some(ExportError::InvalidColumnName { column: 2, .. })
    ));
}
