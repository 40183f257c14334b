//! Dialect configuration for the reader and writer
//!
//! Both sides default to RFC 4180: comma delimiter, double-quote mask.
//! Options are plain structs and may be adjusted between row operations;
//! the row operations take `&mut self`, so they cannot change mid-row.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the reader treats input lines with no characters at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankLinePolicy {
    /// Consume blank lines silently and keep scanning for data.
    #[default]
    Skip,
    /// Surface each blank line as a row holding one empty field.
    SingleEmptyField,
}

/// Row terminator appended by the writer.
///
/// Restricting separators to CR/LF sequences keeps the masking decision
/// simple: a field never needs masking for a separator the writer cannot
/// emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSeparator {
    Lf,
    CrLf,
    Cr,
}

impl LineSeparator {
    /// The literal characters this separator writes.
    pub fn as_str(self) -> &'static str {
        match self {
            LineSeparator::Lf => "\n",
            LineSeparator::CrLf => "\r\n",
            LineSeparator::Cr => "\r",
        }
    }
}

impl Default for LineSeparator {
    fn default() -> Self {
        if cfg!(windows) {
            LineSeparator::CrLf
        } else {
            LineSeparator::Lf
        }
    }
}

impl FromStr for LineSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" => Ok(LineSeparator::Lf),
            "crlf" => Ok(LineSeparator::CrLf),
            "cr" => Ok(LineSeparator::Cr),
            other => Err(format!(
                "unknown line separator '{other}' (expected lf, crlf, or cr)"
            )),
        }
    }
}

/// Per-row override for the writer's masking decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Masking {
    /// Mask only fields that need it to survive a round trip.
    #[default]
    Auto,
    /// Mask every field.
    Always,
}

/// Reader-side dialect settings.
///
/// Behavior is unspecified when `delimiter` and `mask` are set to the
/// same character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Field separator.
    pub delimiter: char,
    /// Character that encloses fields containing structure.
    pub mask: char,
    /// What to do with input lines that contain no characters.
    pub blank_lines: BlankLinePolicy,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            mask: '"',
            blank_lines: BlankLinePolicy::Skip,
        }
    }
}

/// Writer-side dialect settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Field separator.
    pub delimiter: char,
    /// Character wrapped around fields that need protection.
    pub mask: char,
    /// Terminator appended after every row. Defaults to the platform
    /// convention: CRLF on Windows, LF elsewhere.
    pub line_separator: LineSeparator,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            mask: '"',
            line_separator: LineSeparator::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_defaults_are_rfc_4180() {
        let options = ReadOptions::default();
        assert_eq!(options.delimiter, ',');
        assert_eq!(options.mask, '"');
        assert_eq!(options.blank_lines, BlankLinePolicy::Skip);
    }

    #[test]
    fn test_write_defaults_are_rfc_4180() {
        let options = WriteOptions::default();
        assert_eq!(options.delimiter, ',');
        assert_eq!(options.mask, '"');
    }

    #[test]
    fn test_line_separator_strings() {
        assert_eq!(LineSeparator::Lf.as_str(), "\n");
        assert_eq!(LineSeparator::CrLf.as_str(), "\r\n");
        assert_eq!(LineSeparator::Cr.as_str(), "\r");
    }

    #[test]
    fn test_line_separator_from_str() {
        assert_eq!("lf".parse::<LineSeparator>(), Ok(LineSeparator::Lf));
        assert_eq!("CRLF".parse::<LineSeparator>(), Ok(LineSeparator::CrLf));
        assert_eq!("cr".parse::<LineSeparator>(), Ok(LineSeparator::Cr));
        assert!("unix".parse::<LineSeparator>().is_err());
    }

    #[test]
    fn test_options_serde_round_trip() {
        let options = ReadOptions {
            delimiter: ';',
            mask: '\'',
            blank_lines: BlankLinePolicy::SingleEmptyField,
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: ReadOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_write_options_deserialize_with_defaults() {
        let options: WriteOptions = serde_json::from_str(r#"{"delimiter": "\t"}"#).unwrap();
        assert_eq!(options.delimiter, '\t');
        assert_eq!(options.mask, '"');
    }
}
