//! Newline-delimited JSON record writer.

use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::timeline::Post;

/// Writes one compact JSON object per line, in the order received.
///
/// No buffering of its own; wrap the destination in a `BufWriter` if needed.
pub struct RecordSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> RecordSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Append one record line.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the destination fails, `Json` if the record cannot be
    /// serialized.
    pub fn write(&mut self, post: &Post) -> Result<()> {
        serde_json::to_writer(&mut self.writer, post).map_err(|e| {
            if e.is_io() {
                Error::Io(io::Error::from(e))
            } else {
                Error::Json(e)
            }
        })?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Records written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the destination.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the flush fails.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::testing::post;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_one_line_per_record() {
        let mut sink = RecordSink::new(Vec::new());
        sink.write(&post(2)).unwrap();
        sink.write(&post(1)).unwrap();
        assert_eq!(sink.written(), 2);

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "{\"id\":2,\"text\":\"post 2\"}\n{\"id\":1,\"text\":\"post 1\"}\n"
        );
    }

    #[test]
    fn test_lines_reparse_to_same_id() {
        let mut sink = RecordSink::new(Vec::new());
        sink.write(&post(987_654_321)).unwrap();
        let out = sink.into_inner().unwrap();

        assert_eq!(Post::from_line(&out).unwrap().id(), 987_654_321);
    }

    #[test]
    fn test_destination_error_propagates() {
        let mut sink = RecordSink::new(FailingWriter);
        let err = sink.write(&post(1)).unwrap_err();

        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(sink.written(), 0);
    }
}
