//! Snapshot tests for the XML document layout.

use std::path::Path;

use xmlprep_cli::export::{XmlOptions, write_xml};
use xmlprep_cli::input::read_csv_from;
use xmlprep_core::{PrepareOptions, prepare_table};

const VISITS: &str = "\
Subject,Visit Date,Visit Date,Dose (mg),Notes
S-001,12-25-20 12:34:56,1/02/06,5,A & B
S-002,not recorded,03/04/21 7:05,,x < y
";

fn render(csv: &str, prepare: &PrepareOptions, xml: &XmlOptions) -> String {
    let source = read_csv_from(csv.as_bytes(), b',', Path::new("visits.csv")).unwrap();
    let table = prepare_table(&source.headers, source.rows, prepare);
    let mut buffer = Vec::new();
    write_xml(&mut buffer, &table, xml).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn visits_document() {
    let xml = render(VISITS, &PrepareOptions::default(), &XmlOptions::default());
    insta::assert_snapshot!("visits_document", xml);
}

#[test]
fn custom_element_names_are_sanitized() {
    let options = XmlOptions {
        root_element: "Visit List".to_string(),
        row_element: "<Visit>".to_string(),
        ..XmlOptions::default()
    };
    let xml = render("A\n1\n", &PrepareOptions::default(), &options);
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <Visit_x0020_List>\n  <Visit>\n    <A>1</A>\n  </Visit>\n</Visit_x0020_List>\n"
    );
}

#[test]
fn dates_left_alone_when_disabled() {
    let prepare = PrepareOptions {
        normalize_dates: false,
        ..PrepareOptions::default()
    };
    let xml = render("When\n12-25-20\n", &prepare, &XmlOptions::default());
    assert!(xml.contains("<When>12-25-20</When>"));
}
