//! Preparation options: JSON file plus command line switches.

use std::fs;
use std::path::Path;

use tracing::debug;

use xmlprep_core::PrepareOptions;

use crate::error::ConfigError;

/// Loads options from a JSON file. Missing fields keep their defaults.
pub fn load_prepare_options(path: &Path) -> Result<PrepareOptions, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let options: PrepareOptions = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?options, "loaded options file");
    Ok(options)
}

/// Command line switches layered over the loaded options.
///
/// Each switch can only turn a step off (or turn trimming on).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareOverrides {
    pub no_dedupe: bool,
    pub no_sanitize: bool,
    pub no_dates: bool,
    pub quiet_duplicates: bool,
    pub trim: bool,
}

impl PrepareOverrides {
    #[must_use]
    pub fn apply(self, mut options: PrepareOptions) -> PrepareOptions {
        if self.no_dedupe {
            options.dedupe_headers = false;
        }
        if self.no_sanitize {
            options.sanitize_tags = false;
        }
        if self.no_dates {
            options.normalize_dates = false;
        }
        if self.quiet_duplicates {
            options.report_duplicates = false;
        }
        if self.trim {
            options.trim_values = true;
        }
        options
    }
}

/// Resolves the effective options from an optional file and the switches.
pub fn resolve_prepare_options(
    config: Option<&Path>,
    overrides: PrepareOverrides,
) -> Result<PrepareOptions, ConfigError> {
    let base = match config {
        Some(path) => load_prepare_options(path)?,
        None => PrepareOptions::default(),
    };
    Ok(overrides.apply(base))
}
