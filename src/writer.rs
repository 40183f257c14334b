//! Streaming CSV encoder
//!
//! Serializes rows into a [`CharSink`] so a reader with the same dialect
//! reconstructs them exactly. Masking is decided per field by a pure
//! predicate; callers can force it per row for output that must survive
//! blank-line-skipping readers.

use crate::error::CsvResult;
use crate::options::{Masking, WriteOptions};
use crate::sink::{CharSink, Utf8Sink};
use std::io::Write;

/// Streaming CSV writer over any [`CharSink`].
///
/// Rows go straight to the sink with no internal buffering, so a sink
/// failure mid-row leaves whatever was already written; there is no
/// rollback. Options may be adjusted between rows through the public
/// [`options`](Self::options) field.
pub struct CsvWriter<K> {
    sink: K,
    /// Dialect settings, consulted once per row written.
    pub options: WriteOptions,
}

impl<W: Write> CsvWriter<Utf8Sink<W>> {
    /// Wraps a byte writer in a UTF-8 encoder.
    pub fn from_writer(writer: W) -> Self {
        Self::new(Utf8Sink::new(writer))
    }
}

impl<K: CharSink> CsvWriter<K> {
    pub fn new(sink: K) -> Self {
        Self::with_options(sink, WriteOptions::default())
    }

    pub fn with_options(sink: K, options: WriteOptions) -> Self {
        Self { sink, options }
    }

    /// Writes one row, masking only the fields that need it.
    pub fn write_row<I>(&mut self, fields: I) -> CsvResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.write_row_with(fields, Masking::Auto)
    }

    /// Writes one row with an explicit masking choice.
    ///
    /// Fields are joined by the delimiter and the row ends with the
    /// configured line separator. A row with zero fields writes a bare
    /// separator, which a blank-line-skipping reader will not return;
    /// likewise a single empty field round-trips only when masked.
    pub fn write_row_with<I>(&mut self, fields: I, masking: Masking) -> CsvResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut first = true;
        for field in fields {
            if !first {
                self.sink.write_char(self.options.delimiter)?;
            }
            first = false;
            self.write_field(field.as_ref(), masking)?;
        }
        self.sink.write_str(self.options.line_separator.as_str())?;
        Ok(())
    }

    fn write_field(&mut self, field: &str, masking: Masking) -> CsvResult<()> {
        if masking == Masking::Always || needs_mask(field, &self.options) {
            let mask = self.options.mask;
            self.sink.write_char(mask)?;
            for c in field.chars() {
                if c == mask {
                    self.sink.write_char(mask)?;
                }
                self.sink.write_char(c)?;
            }
            self.sink.write_char(mask)?;
        } else {
            self.sink.write_str(field)?;
        }
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> CsvResult<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> K {
        self.sink
    }
}

/// Whether a field must be masked to survive a round trip.
///
/// True when the field contains the mask character, the delimiter, or a
/// line ending. Every separator the writer can emit is built from CR and
/// LF, so this covers all of them.
pub fn needs_mask(field: &str, options: &WriteOptions) -> bool {
    field.contains(&[options.mask, options.delimiter, '\r', '\n'][..])
}

/// Serializes a complete document to a string.
pub fn write_string<R>(rows: R, options: WriteOptions) -> CsvResult<String>
where
    R: IntoIterator,
    R::Item: IntoIterator,
    <R::Item as IntoIterator>::Item: AsRef<str>,
{
    let mut writer = CsvWriter::with_options(String::new(), options);
    for row in rows {
        writer.write_row(row)?;
    }
    Ok(writer.into_inner())
}
