//! Character-level input abstraction
//!
//! The reader pulls decoded characters one at a time through
//! [`CharSource`]. Sources never manage stream lifecycle; whoever opened
//! the underlying reader closes it.

use std::io::{self, Read};

/// A pull-based stream of characters.
///
/// `Ok(None)` signals end of stream and must be stable: once a source
/// reports it, every later call reports it again.
pub trait CharSource {
    /// Read the next character, or `None` at end of stream.
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }
}

/// In-memory parsing runs straight off a string's char iterator.
impl CharSource for std::str::Chars<'_> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.next())
    }
}

/// Strict incremental UTF-8 decoder over any [`Read`].
///
/// Reads exactly the bytes of one character per call, so it never
/// consumes input beyond what the parser has asked for. Invalid UTF-8
/// surfaces as [`io::ErrorKind::InvalidData`]; a sequence truncated by
/// end of stream as [`io::ErrorKind::UnexpectedEof`]. Byte order marks
/// are not interpreted.
pub struct Utf8Source<R> {
    inner: R,
}

impl<R: Read> Utf8Source<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> CharSource for Utf8Source<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let first = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };

        let len = utf8_sequence_len(first).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "invalid utf-8 leading byte")
        })?;

        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(len).skip(1) {
            *slot = self.read_byte()?.ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stream ended inside a utf-8 sequence",
                )
            })?;
        }

        // from_utf8 still rejects bad continuation bytes and overlong forms.
        let decoded = std::str::from_utf8(&buf[..len])
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid utf-8 sequence"))?;
        Ok(decoded.chars().next())
    }
}

/// Sequence length implied by a UTF-8 leading byte.
fn utf8_sequence_len(byte: u8) -> Option<usize> {
    match byte {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
