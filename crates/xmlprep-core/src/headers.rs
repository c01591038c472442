//! Column header deduplication.
//!
//! Headers are counted by their original text. The first occurrence of a
//! header is kept as-is; later occurrences get the running count appended
//! (`Name`, `Name_2`, `Name_3`, ...).
//!
//! Renamed headers are not counted again, so an input that already contains
//! `Name_2` next to two `Name` columns yields `Name_2` twice. Callers that
//! need strict uniqueness must check the output themselves.

use std::collections::HashMap;

use tracing::warn;

/// Receives one notification per header text that occurred more than once.
pub trait DuplicateSink {
    /// Called with the original header text and its total occurrence count.
    fn duplicate(&mut self, header: &str, count: usize);
}

impl<F> DuplicateSink for F
where
    F: FnMut(&str, usize),
{
    fn duplicate(&mut self, header: &str, count: usize) {
        self(header, count);
    }
}

/// Logs duplicates as `warn` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DuplicateSink for TracingSink {
    fn duplicate(&mut self, header: &str, count: usize) {
        warn!(header, count, "Header '{header}' was present {count} times");
    }
}

/// Discards duplicate notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DuplicateSink for SilentSink {
    fn duplicate(&mut self, _header: &str, _count: usize) {}
}

/// A header text that occurred more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateHeader {
    /// Original header text.
    pub header: String,
    /// Number of occurrences in the input.
    pub count: usize,
}

/// Collects duplicates for later inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateLog {
    /// Duplicated headers in order of first appearance.
    pub entries: Vec<DuplicateHeader>,
}

impl DuplicateLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no header was duplicated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct duplicated headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the occurrence count recorded for `header`, if it was duplicated.
    pub fn count_for(&self, header: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.header == header)
            .map(|entry| entry.count)
    }
}

impl DuplicateSink for DuplicateLog {
    fn duplicate(&mut self, header: &str, count: usize) {
        self.entries.push(DuplicateHeader {
            header: header.to_string(),
            count,
        });
    }
}

/// Renames duplicate headers, optionally logging each duplicated header.
///
/// # Example
///
/// ```
/// use xmlprep_core::dedupe_headers;
///
/// let headers = ["Name", "Age", "Name", "City", "Age"];
/// assert_eq!(
///     dedupe_headers(&headers, false),
///     vec!["Name", "Age", "Name_2", "City", "Age_2"]
/// );
/// ```
pub fn dedupe_headers<S: AsRef<str>>(headers: &[S], report: bool) -> Vec<String> {
    if report {
        dedupe_headers_with(headers, &mut TracingSink)
    } else {
        dedupe_headers_with(headers, &mut SilentSink)
    }
}

/// Renames duplicate headers and reports every duplicated header to `sink`.
///
/// Duplicates are reported once each, in order of first appearance, after
/// the whole sequence has been counted.
pub fn dedupe_headers_with<S, K>(headers: &[S], sink: &mut K) -> Vec<String>
where
    S: AsRef<str>,
    K: DuplicateSink + ?Sized,
{
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(headers.len());
    let mut first_seen: Vec<&str> = Vec::new();
    let mut output = Vec::with_capacity(headers.len());

    for header in headers {
        let header = header.as_ref();
        let count = counts.entry(header).or_insert_with(|| {
            first_seen.push(header);
            0
        });
        *count += 1;
        if *count > 1 {
            output.push(format!("{header}_{count}"));
        } else {
            output.push(header.to_string());
        }
    }

    for header in first_seen {
        let count = counts.get(header).copied().unwrap_or_default();
        if count > 1 {
            sink.duplicate(header, count);
        }
    }

    output
}
