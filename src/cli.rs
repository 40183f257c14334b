//! Command-line interface for the recsv tool
//!
//! Two modes share one invocation shape:
//! - Check (default): tokenize the input and report row statistics
//! - Recode (`-o`): re-encode the input with its own output dialect

use crate::error::CsvResult;
use crate::options::{BlankLinePolicy, LineSeparator, Masking, ReadOptions, WriteOptions};
use crate::reader::CsvReader;
use crate::sink::CharSink;
use crate::source::CharSource;
use crate::writer::CsvWriter;
use clap::Parser;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A streaming CSV checker and recoder
#[derive(Parser, Debug)]
#[command(name = "recsv", version, about = "Check or recode CSV streams")]
pub struct CliArgs {
    /// Input file (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Input field delimiter
    #[arg(short = 'd', long, default_value_t = ',', value_name = "CHAR")]
    pub delimiter: char,

    /// Input mask character
    #[arg(short = 'm', long, default_value_t = '"', value_name = "CHAR")]
    pub mask: char,

    /// Surface blank lines as single-empty-field rows instead of skipping them
    #[arg(long)]
    pub blank_rows: bool,

    /// Recode to this file instead of checking ("-" for stdout)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output field delimiter (defaults to the input delimiter)
    #[arg(long, value_name = "CHAR")]
    pub to_delimiter: Option<char>,

    /// Output mask character (defaults to the input mask)
    #[arg(long, value_name = "CHAR")]
    pub to_mask: Option<char>,

    /// Output line separator: lf, crlf, or cr
    #[arg(long, value_name = "SEP")]
    pub newline: Option<LineSeparator>,

    /// Mask every output field, not just the ones that need it
    #[arg(long)]
    pub mask_all: bool,

    /// Emit the check report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Where recoded output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

/// Execution plan derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Input file, or stdin when `None`.
    pub input: Option<PathBuf>,
    /// Recode target; `None` means check mode.
    pub output: Option<Output>,
    pub read: ReadOptions,
    pub write: WriteOptions,
    pub masking: Masking,
    pub json: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into an execution plan
    pub fn into_plan(self) -> Result<RunPlan, String> {
        let read = ReadOptions {
            delimiter: self.delimiter,
            mask: self.mask,
            blank_lines: if self.blank_rows {
                BlankLinePolicy::SingleEmptyField
            } else {
                BlankLinePolicy::Skip
            },
        };

        // Output dialect falls back to the input dialect field by field.
        let write = WriteOptions {
            delimiter: self.to_delimiter.unwrap_or(self.delimiter),
            mask: self.to_mask.unwrap_or(self.mask),
            line_separator: self.newline.unwrap_or_default(),
        };

        let output = match self.output {
            Some(path) if path == Path::new("-") => Some(Output::Stdout),
            Some(path) => Some(Output::File(path)),
            None => None,
        };

        if output.is_none()
            && (self.to_delimiter.is_some()
                || self.to_mask.is_some()
                || self.newline.is_some()
                || self.mask_all)
        {
            return Err("output dialect flags require --output".to_string());
        }
        if output.is_some() && self.json {
            return Err("--json applies to check mode only".to_string());
        }

        Ok(RunPlan {
            input: self.input,
            output,
            read,
            write,
            masking: if self.mask_all {
                Masking::Always
            } else {
                Masking::Auto
            },
            json: self.json,
        })
    }
}

/// Summary produced by a check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Rows successfully tokenized.
    pub rows: u64,
    /// Smallest field count seen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields_min: Option<usize>,
    /// Largest field count seen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields_max: Option<usize>,
    /// First failure, if any; checking stops there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

/// Location and description of the failure that ended a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportError {
    pub line: u64,
    pub message: String,
}

impl CheckReport {
    /// True when the whole input tokenized cleanly.
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {}", self.rows)?;
        match (self.fields_min, self.fields_max) {
            (Some(min), Some(max)) if min == max => writeln!(f, "fields: {min}")?,
            (Some(min), Some(max)) => writeln!(f, "fields: {min}..{max}")?,
            _ => {}
        }
        if let Some(err) = &self.error {
            writeln!(f, "error: line {}: {}", err.line, err.message)?;
        }
        Ok(())
    }
}

/// Tokenizes everything from `reader`, collecting summary statistics.
///
/// Reads until end of stream or the first failure; the failure lands in
/// the report instead of aborting the run.
pub fn run_check<S: CharSource>(reader: &mut CsvReader<S>) -> CheckReport {
    let mut report = CheckReport {
        rows: 0,
        fields_min: None,
        fields_max: None,
        error: None,
    };

    loop {
        match reader.read_row() {
            Ok(Some(row)) => {
                report.rows += 1;
                let n = row.len();
                report.fields_min = Some(report.fields_min.map_or(n, |m| m.min(n)));
                report.fields_max = Some(report.fields_max.map_or(n, |m| m.max(n)));
            }
            Ok(None) => break,
            Err(err) => {
                let line = err.line().unwrap_or_else(|| reader.line());
                let message = match err.malformed_kind() {
                    Some(kind) => kind.to_string(),
                    None => err.to_string(),
                };
                report.error = Some(ReportError { line, message });
                break;
            }
        }
    }

    report
}

/// Streams rows from `reader` into `writer`, returning the row count.
pub fn run_recode<S, K>(
    reader: &mut CsvReader<S>,
    writer: &mut CsvWriter<K>,
    masking: Masking,
) -> CsvResult<u64>
where
    S: CharSource,
    K: CharSink,
{
    let mut rows = 0;
    while let Some(row) = reader.read_row()? {
        writer.write_row_with(&row, masking)?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}
