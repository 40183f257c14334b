//! Streaming CSV tokenizer
//!
//! Rows are scanned one at a time from a [`CharSource`] with a single
//! character of lookahead, so the reader works on live streams without
//! buffering ahead of the row the caller asked for. Three nested levels
//! mirror the grammar: the row loop, the value scanner, and the
//! masked-value scanner.

use crate::error::{CsvError, CsvResult, MalformedKind};
use crate::options::{BlankLinePolicy, ReadOptions};
use crate::source::{CharSource, Utf8Source};
use std::io::Read;
use tracing::debug;

/// Streaming CSV reader over any [`CharSource`].
///
/// The reader owns no stream lifecycle; it consumes characters from the
/// source and leaves opening and closing to the caller. Options may be
/// adjusted between rows through the public [`options`](Self::options)
/// field.
pub struct CsvReader<S> {
    source: S,
    /// Dialect settings, consulted once per row read.
    pub options: ReadOptions,
    line: u64,
    after_cr: bool,
}

impl<R: Read> CsvReader<Utf8Source<R>> {
    /// Wraps a byte reader in a strict UTF-8 decoder.
    pub fn from_reader(reader: R) -> Self {
        Self::new(Utf8Source::new(reader))
    }
}

impl<S: CharSource> CsvReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ReadOptions::default())
    }

    pub fn with_options(source: S, options: ReadOptions) -> Self {
        Self {
            source,
            options,
            line: 1,
            after_cr: false,
        }
    }

    /// The 1-based physical line the next read starts on.
    ///
    /// CR, LF, and CRLF each count as one line ending, including inside
    /// masked fields.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Reads the next row.
    ///
    /// Returns `Ok(None)` once the source is exhausted, and keeps
    /// returning it on later calls. Every returned row has at least one
    /// field: a trailing delimiter yields a final empty field, and the
    /// last row of a stream is returned whether or not a terminator
    /// follows it.
    ///
    /// Rows end at CR, LF, or CRLF, mixed freely within one stream.
    /// Input lines with no characters at all follow
    /// [`ReadOptions::blank_lines`]; the default skips them, which makes
    /// this call scan ahead until it finds data, so on a blocking stream
    /// a run of blank lines blocks until data or end of stream arrives.
    ///
    /// # Errors
    ///
    /// [`CsvError::Malformed`] when the input violates the grammar,
    /// [`CsvError::Io`] when the source fails. After an error the
    /// reader's position within the stream is unspecified and further
    /// reads are not supported.
    pub fn read_row(&mut self) -> CsvResult<Option<Vec<String>>> {
        let options = self.options;
        let mut cur = Cursor {
            source: &mut self.source,
            peeked: None,
            line: self.line,
            after_cr: self.after_cr,
        };

        let result = scan_row(&mut cur, options);

        // Line accounting is written back even when the scan fails.
        self.line = cur.line;
        self.after_cr = cur.after_cr;
        result
    }

    /// Iterates rows until end of stream.
    ///
    /// The iterator yields each row as `Ok` and the first failure as
    /// `Err`; it stops being meaningful after that, like
    /// [`read_row`](Self::read_row) itself.
    pub fn rows(&mut self) -> Rows<'_, S> {
        Rows { reader: self }
    }

    /// Reads every remaining row into memory.
    pub fn read_all(&mut self) -> CsvResult<Vec<Vec<String>>> {
        let mut rows = Vec::new();
        while let Some(row) = self.read_row()? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

/// Iterator returned by [`CsvReader::rows`].
pub struct Rows<'a, S> {
    reader: &'a mut CsvReader<S>,
}

impl<S: CharSource> Iterator for Rows<'_, S> {
    type Item = CsvResult<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_row().transpose()
    }
}

/// Parses a complete in-memory document.
pub fn parse_str(input: &str, options: ReadOptions) -> CsvResult<Vec<Vec<String>>> {
    CsvReader::with_options(input.chars(), options).read_all()
}

/// How a value ended, deciding whether the row continues.
enum ValueEnd {
    Delimiter,
    Newline,
    End,
}

/// One character of lookahead over the source, plus the line accounting
/// that has to survive into error reports.
struct Cursor<'a, S> {
    source: &'a mut S,
    peeked: Option<char>,
    line: u64,
    after_cr: bool,
}

impl<S: CharSource> Cursor<'_, S> {
    fn peek(&mut self) -> CsvResult<Option<char>> {
        if self.peeked.is_none() {
            self.peeked = self.source.read_char()?;
        }
        Ok(self.peeked)
    }

    fn next(&mut self) -> CsvResult<Option<char>> {
        let c = match self.peeked.take() {
            Some(c) => Some(c),
            None => self.source.read_char()?,
        };
        match c {
            Some('\r') => {
                self.line += 1;
                self.after_cr = true;
            }
            Some('\n') => {
                // The LF of a CRLF pair was already counted at the CR.
                if !self.after_cr {
                    self.line += 1;
                }
                self.after_cr = false;
            }
            Some(_) => self.after_cr = false,
            None => {}
        }
        Ok(c)
    }
}

fn scan_row<S: CharSource>(
    cur: &mut Cursor<'_, S>,
    options: ReadOptions,
) -> CsvResult<Option<Vec<String>>> {
    loop {
        absorb_deferred_lf(cur)?;

        let mut row = Vec::new();
        let end = loop {
            let first = row.is_empty();
            let (value, end) = scan_value(cur, options, first)?;
            if let Some(value) = value {
                row.push(value);
            }
            match end {
                ValueEnd::Delimiter => {}
                end => break end,
            }
        };

        if !row.is_empty() {
            return Ok(Some(row));
        }

        match end {
            ValueEnd::End => return Ok(None),
            _ => match options.blank_lines {
                BlankLinePolicy::Skip => {}
                BlankLinePolicy::SingleEmptyField => return Ok(Some(vec![String::new()])),
            },
        }
    }
}

/// Scans one value and the character that ended it.
///
/// Returns no value when a terminator or end of stream arrives before
/// any character of a row: that distinguishes a blank line from a row
/// whose last field is empty.
fn scan_value<S: CharSource>(
    cur: &mut Cursor<'_, S>,
    options: ReadOptions,
    first_in_row: bool,
) -> CsvResult<(Option<String>, ValueEnd)> {
    let c = match cur.next()? {
        Some(c) => c,
        None => {
            let value = if first_in_row { None } else { Some(String::new()) };
            return Ok((value, ValueEnd::End));
        }
    };

    if c == options.mask {
        let (value, end) = scan_masked_value(cur, options)?;
        return Ok((Some(value), end));
    }
    if c == options.delimiter {
        return Ok((Some(String::new()), ValueEnd::Delimiter));
    }
    if c == '\r' || c == '\n' {
        let value = if first_in_row { None } else { Some(String::new()) };
        return Ok((value, ValueEnd::Newline));
    }

    let (value, end) = scan_raw_value(cur, options, c)?;
    Ok((Some(value), end))
}

/// Scans the remainder of an unmasked value. The mask character is only
/// special at the start of a value; here it is literal data.
fn scan_raw_value<S: CharSource>(
    cur: &mut Cursor<'_, S>,
    options: ReadOptions,
    start: char,
) -> CsvResult<(String, ValueEnd)> {
    let mut value = String::new();
    value.push(start);

    loop {
        let c = match cur.next()? {
            Some(c) => c,
            None => return Ok((value, ValueEnd::End)),
        };
        if c == options.delimiter {
            return Ok((value, ValueEnd::Delimiter));
        }
        if c == '\r' || c == '\n' {
            return Ok((value, ValueEnd::Newline));
        }
        value.push(c);
    }
}

/// Scans a masked value whose opening mask was already consumed.
/// Delimiters and line endings inside it are kept verbatim; a doubled
/// mask is one literal mask character.
fn scan_masked_value<S: CharSource>(
    cur: &mut Cursor<'_, S>,
    options: ReadOptions,
) -> CsvResult<(String, ValueEnd)> {
    let mut value = String::new();

    loop {
        let c = match cur.next()? {
            Some(c) => c,
            None => return Err(malformed(cur, MalformedKind::UnexpectedEndOfData)),
        };

        if c != options.mask {
            value.push(c);
            continue;
        }

        if let Some(next) = cur.peek()? {
            if next == options.mask {
                cur.next()?;
                value.push(c);
                continue;
            }
        }

        break;
    }

    // The character after the closing mask must end the value.
    match cur.next()? {
        None => Ok((value, ValueEnd::End)),
        Some(c) if c == options.delimiter => Ok((value, ValueEnd::Delimiter)),
        Some('\r' | '\n') => Ok((value, ValueEnd::Newline)),
        Some(found) => Err(malformed(cur, MalformedKind::DelimiterExpected { found })),
    }
}

/// Consumes the LF completing a CRLF whose CR ended the previous row.
///
/// The pairing is deferred to the next read so a row ending in a bare CR
/// is returned without waiting for another character to arrive.
fn absorb_deferred_lf<S: CharSource>(cur: &mut Cursor<'_, S>) -> CsvResult<()> {
    if cur.after_cr {
        if let Some('\n') = cur.peek()? {
            cur.next()?;
        }
    }
    Ok(())
}

fn malformed<S>(cur: &Cursor<'_, S>, kind: MalformedKind) -> CsvError {
    debug!(line = cur.line, %kind, "malformed input");
    CsvError::Malformed {
        kind,
        line: cur.line,
    }
}
