//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use xmlprep_cli::config::PrepareOverrides;

#[derive(Parser)]
#[command(
    name = "xmlprep",
    version,
    about = "Clean CSV headers and dates and export them as XML",
    long_about = "Clean tabular data for XML export.\n\n\
                  Duplicate headers are renamed (Name, Name_2, ...), headers are\n\
                  turned into valid element names, and two-digit-year dates are\n\
                  rewritten as YYYY-MM-DD HH:MM:SS."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a CSV file to XML.
    Convert(ConvertArgs),

    /// Show how each header of a CSV file becomes an element name.
    Headers(HeadersArgs),

    /// Normalize date values.
    Dates {
        /// Values to normalize.
        #[arg(value_name = "VALUE", required = true)]
        values: Vec<String>,
    },

    /// Turn values into element names.
    Sanitize {
        /// Values to sanitize.
        #[arg(value_name = "VALUE", required = true)]
        values: Vec<String>,
    },
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// CSV file to convert.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output XML file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Root element name.
    #[arg(long = "root", value_name = "NAME", default_value = "Records")]
    pub root: String,

    /// Element name for each record.
    #[arg(long = "row", value_name = "NAME", default_value = "Row")]
    pub row: String,

    /// Field delimiter (single ASCII character).
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// JSON file with preparation options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a JSON summary of the conversion.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    #[command(flatten)]
    pub steps: StepArgs,
}

#[derive(Parser)]
pub struct HeadersArgs {
    /// CSV file to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Field delimiter (single ASCII character).
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// JSON file with preparation options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub steps: StepArgs,
}

/// Switches that turn preparation steps off.
#[derive(Args, Clone, Copy)]
pub struct StepArgs {
    /// Keep duplicate headers as they are.
    #[arg(long = "no-dedupe")]
    pub no_dedupe: bool,

    /// Use headers as element names without sanitizing.
    ///
    /// Conversion fails if a header contains spaces or characters that are
    /// invalid in element names.
    #[arg(long = "no-sanitize")]
    pub no_sanitize: bool,

    /// Leave date values untouched.
    #[arg(long = "no-dates")]
    pub no_dates: bool,

    /// Do not log duplicate headers.
    #[arg(long = "quiet-duplicates")]
    pub quiet_duplicates: bool,

    /// Trim whitespace around cell values.
    #[arg(long = "trim")]
    pub trim: bool,
}

impl From<StepArgs> for PrepareOverrides {
    fn from(args: StepArgs) -> Self {
        Self {
            no_dedupe: args.no_dedupe,
            no_sanitize: args.no_sanitize,
            no_dates: args.no_dates,
            quiet_duplicates: args.quiet_duplicates,
            trim: args.trim,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii() => Ok(ch as u8),
        (Some('\\'), Some('t')) if value.len() == 2 => Ok(b'\t'),
        _ => Err(format!("expected a single ASCII character, got '{value}'")),
    }
}
