//! Data-cleaning routines for tabular exports.
//!
//! This crate prepares raw header and cell strings for formats with strict
//! naming and date rules, such as XML with column-derived element names.
//!
//! # Features
//!
//! - **Header deduplication**: later occurrences of a header get a count
//!   suffix (`Name`, `Name_2`, `Name_3`)
//! - **Tag sanitizing**: strips characters that are invalid in element names
//!   and encodes spaces as `_x0020_`
//! - **Date normalization**: recognizes a fixed list of two-digit-year layouts
//!   and rewrites them as `YYYY-MM-DD HH:MM:SS`
//! - **Table preparation**: applies all three to a header row and its records
//!
//! Every routine is total: unrecognized input is passed through, never
//! rejected.
//!
//! # Example
//!
//! ```
//! use xmlprep_core::{dedupe_headers, normalize_datetime, sanitize_tag};
//!
//! let headers = dedupe_headers(&["Visit Date", "Visit Date"], false);
//! let tags: Vec<String> = headers.iter().map(|h| sanitize_tag(h)).collect();
//! assert_eq!(tags, vec!["Visit_x0020_Date", "Visit_x0020_Date_2"]);
//!
//! assert_eq!(normalize_datetime("1/02/06"), "2006-01-02 00:00:00");
//! ```

pub mod datetime;
pub mod headers;
pub mod table;
pub mod tags;

// === Header Deduplication ===
pub use headers::{
    DuplicateHeader, DuplicateLog, DuplicateSink, SilentSink, TracingSink, dedupe_headers,
    dedupe_headers_with,
};

// === Tag Sanitizing ===
pub use tags::{INVALID_TAG_CHARS, SPACE_ESCAPE, is_invalid_tag_char, sanitize_tag};

// === Date Normalization ===
pub use datetime::{
    CANDIDATE_LAYOUTS, CANONICAL_FORMAT, DateMatch, match_datetime, normalize_datetime,
};

// === Table Preparation ===
pub use table::{
    ColumnName, PrepareOptions, PrepareStats, PreparedTable, fallback_tag, prepare_columns,
    prepare_columns_with, prepare_table, prepare_table_with_stats, prepare_value,
};
