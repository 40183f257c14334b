//! Character-level output abstraction
//!
//! The writer pushes serialized characters through [`CharSink`]. Like
//! sources, sinks never manage stream lifecycle.

use std::io::{self, Write};

/// A push-based character stream.
pub trait CharSink {
    /// Write one character.
    fn write_char(&mut self, c: char) -> io::Result<()>;

    /// Write every character of `s`. Implementations with a faster bulk
    /// path should override this.
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        for c in s.chars() {
            self.write_char(c)?;
        }
        Ok(())
    }

    /// Flush any buffering in the underlying stream.
    fn flush(&mut self) -> io::Result<()>;
}

impl<K: CharSink + ?Sized> CharSink for &mut K {
    fn write_char(&mut self, c: char) -> io::Result<()> {
        (**self).write_char(c)
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        (**self).write_str(s)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// In-memory serialization accumulates into a `String`.
impl CharSink for String {
    fn write_char(&mut self, c: char) -> io::Result<()> {
        self.push(c);
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// UTF-8 encoding sink over any [`Write`].
pub struct Utf8Sink<W> {
    inner: W,
}

impl<W: Write> Utf8Sink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> CharSink for Utf8Sink<W> {
    fn write_char(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.inner.write_all(c.encode_utf8(&mut buf).as_bytes())
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.inner.write_all(s.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_sink_accumulates() {
        let mut sink = String::new();
        sink.write_char('a').unwrap();
        sink.write_str(",b").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink, "a,b");
    }

    #[test]
    fn test_utf8_sink_encodes_multibyte() {
        let mut sink = Utf8Sink::new(Vec::new());
        sink.write_char('é').unwrap();
        sink.write_char('🦀').unwrap();
        sink.write_str("日本").unwrap();
        assert_eq!(sink.into_inner(), "é🦀日本".as_bytes());
    }

    #[test]
    fn test_default_write_str_goes_through_write_char() {
        struct Recorder(Vec<char>);

        impl CharSink for Recorder {
            fn write_char(&mut self, c: char) -> io::Result<()> {
                self.0.push(c);
                Ok(())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = Recorder(Vec::new());
        sink.write_str("hi").unwrap();
        assert_eq!(sink.0, vec!['h', 'i']);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn put_one<K: CharSink>(mut sink: K) {
            sink.write_char('z').unwrap();
        }

        let mut sink = String::new();
        put_one(&mut sink);
        assert_eq!(sink, "z");
    }
}
