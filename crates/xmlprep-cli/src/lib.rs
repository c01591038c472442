//! Library side of the `xmlprep` command line tool.
//!
//! Reads CSV input, runs it through the `xmlprep-core` cleaning routines and
//! writes an XML document with one element per column.

pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod logging;
pub mod pipeline;

pub use error::{ConfigError, ExportError};
