//! recsv - streaming RFC 4180 CSV codec
//!
//! Tokenizes CSV from a character stream one row at a time and
//! serializes rows back out round-trip safe. Delimiter, mask character,
//! and line separator are configurable on both sides; streams stay
//! owned by the caller.

pub mod cli;
pub mod error;
pub mod options;
pub mod reader;
pub mod sink;
pub mod source;
pub mod tracing;
pub mod writer;

// Re-export commonly used types
pub use error::{CsvError, CsvResult, MalformedKind};
pub use options::{BlankLinePolicy, LineSeparator, Masking, ReadOptions, WriteOptions};
pub use reader::{parse_str, CsvReader, Rows};
pub use sink::{CharSink, Utf8Sink};
pub use source::{CharSource, Utf8Source};
pub use writer::{write_string, CsvWriter};
