//! Error types for the CSV codec
//!
//! The reader distinguishes grammar violations from stream failures:
//! malformed input carries the physical line it was detected on, while
//! I/O errors from the underlying source or sink pass through unchanged.

use std::io;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type CsvResult<T> = Result<T, CsvError>;

/// Errors produced by [`CsvReader`](crate::CsvReader) and
/// [`CsvWriter`](crate::CsvWriter).
///
/// The writer can only fail with [`CsvError::Io`]; it accepts any field
/// content and masks whatever needs masking.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The input violates the CSV grammar. `line` is the 1-based physical
    /// line on which the offending character (or end of stream) was seen.
    #[error("malformed csv at line {line}: {kind}")]
    Malformed { kind: MalformedKind, line: u64 },

    /// A failure reported by the underlying stream, propagated unchanged.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The specific grammar violation behind [`CsvError::Malformed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedKind {
    /// The stream ended while a masked field was still open.
    #[error("unexpected end of data")]
    UnexpectedEndOfData,

    /// A closing mask was followed by something other than a delimiter,
    /// a row terminator, or end of stream.
    #[error("delimiter expected, found {found:?}")]
    DelimiterExpected { found: char },
}

impl CsvError {
    /// True for grammar violations, false for stream failures.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CsvError::Malformed { .. })
    }

    /// The grammar violation, if this is a malformed-input error.
    pub fn malformed_kind(&self) -> Option<MalformedKind> {
        match self {
            CsvError::Malformed { kind, .. } => Some(*kind),
            CsvError::Io(_) => None,
        }
    }

    /// The 1-based input line, if this is a malformed-input error.
    pub fn line(&self) -> Option<u64> {
        match self {
            CsvError::Malformed { line, .. } => Some(*line),
            CsvError::Io(_) => None,
        }
    }
}
