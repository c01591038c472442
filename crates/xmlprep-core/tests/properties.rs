//! Property tests for the cleaning routines.

use std::collections::HashSet;

use proptest::prelude::*;

use xmlprep_core::{
    DuplicateLog, INVALID_TAG_CHARS, SPACE_ESCAPE, dedupe_headers, dedupe_headers_with,
    is_invalid_tag_char, normalize_datetime, sanitize_tag,
};

fn header_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["A", "B", "C", "Name", "Age"]), 0..12)
        .prop_map(|headers| headers.into_iter().map(String::from).collect())
}

proptest! {
    #[test]
    fn dedupe_keeps_length_and_first_occurrences(headers in header_strategy()) {
        let output = dedupe_headers(&headers, false);
        prop_assert_eq!(output.len(), headers.len());

        let mut seen = HashSet::new();
        for (input, output) in headers.iter().zip(&output) {
            if seen.insert(input.clone()) {
                prop_assert_eq!(input, output);
            } else {
                let prefix = format!("{input}_");
                prop_assert!(output.starts_with(&prefix));
            }
        }
    }

    #[test]
    fn dedupe_output_is_unique_without_suffixed_inputs(headers in header_strategy()) {
        let output = dedupe_headers(&headers, false);
        let unique: HashSet<&String> = output.iter().collect();
        prop_assert_eq!(unique.len(), output.len());
    }

    #[test]
    fn dedupe_reports_only_repeated_headers(headers in header_strategy()) {
        let mut log = DuplicateLog::new();
        dedupe_headers_with(&headers, &mut log);
        for entry in &log.entries {
            let occurrences = headers.iter().filter(|h| **h == entry.header).count();
            prop_assert!(entry.count > 1);
            prop_assert_eq!(entry.count, occurrences);
        }
    }

    #[test]
    fn sanitize_removes_every_invalid_char(tag in ".*") {
        let clean = sanitize_tag(&tag);
        prop_assert!(!clean.chars().any(is_invalid_tag_char));
    }

    #[test]
    fn sanitize_encodes_each_surviving_space(tag in "[a-z !.()<> ]{0,24}") {
        let spaces = tag.chars().filter(|c| *c == ' ').count();
        let clean = sanitize_tag(&tag);
        prop_assert_eq!(clean.matches(SPACE_ESCAPE).count(), spaces);
        prop_assert!(!clean.contains(' '));
    }

    #[test]
    fn sanitize_only_invalid_chars_is_empty(
        tag in prop::collection::vec(prop::sample::select(INVALID_TAG_CHARS.to_vec()), 0..16)
    ) {
        let tag: String = tag.into_iter().collect();
        prop_assert_eq!(sanitize_tag(&tag), "");
    }

    #[test]
    fn normalize_renders_valid_dates(
        month in 1u32..=12,
        day in 1u32..=28,
        year in 0u32..=99,
        hour in 0u32..=23,
        minute in 0u32..=59,
        second in 0u32..=59,
    ) {
        let value = format!("{month:02}-{day:02}-{year:02} {hour}:{minute:02}:{second:02}");
        let full_year = if year >= 69 { 1900 + year } else { 2000 + year };
        let expected = format!(
            "{full_year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        );
        prop_assert_eq!(normalize_datetime(&value), expected);
    }

    #[test]
    fn normalize_passes_through_letters(value in "[a-zA-Z ]*") {
        prop_assert_eq!(normalize_datetime(&value), value);
    }
}
