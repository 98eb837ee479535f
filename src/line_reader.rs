//! `line_reader` — split a (decompressing) byte stream into word-list lines.
//!
//! The word list is one long run of lowercase letters, with `.` closing each
//! line. Lines are pulled through a single fixed-size buffer:
//!
//! 1. Scan from the cursor for the separator. If found, hand back the bytes up
//!    to it and step past it.
//! 2. Otherwise keep the unconsumed tail, refill the whole buffer from the
//!    stream, and scan once more. The tail plus the newly found part is the line.
//! 3. If the stream has ended there are no more lines. A trailing fragment with
//!    no separator is dropped.
//!
//! A line of up to the buffer capacity always fits, because the buffer holds
//! one extra byte for its separator. A longer line that a single refill cannot
//! complete is reported as [`io::ErrorKind::InvalidData`] and the reader stops.

use std::io::{self, Read};

use crate::letters::LINE_SEPARATOR;

/// Buffer size used by [`LineReader::new`].
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Reads separator-terminated lines from any [`Read`].
///
/// Also an iterator over `io::Result<Vec<u8>>`; it yields nothing more after
/// the first error.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    // capacity + 1 bytes, so a full-length line and its separator fit
    buffer: Box<[u8]>,
    capacity: usize,
    position: usize,
    end: usize,
    end_of_stream: bool,
}

impl<R: Read> LineReader<R> {
    /// Reader with the default 8 KiB buffer.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, inner)
    }

    /// Reader accepting lines of up to `capacity` bytes (at least one).
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        let capacity = capacity.max(1);
        LineReader {
            inner,
            buffer: vec![0; capacity + 1].into_boxed_slice(),
            capacity,
            position: 0,
            end: 0,
            end_of_stream: false,
        }
    }

    /// Next line without its separator, or `None` once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates read errors from the underlying stream, and returns
    /// `InvalidData` for a line that does not fit in the buffer.
    pub fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        if let Some(len) = self.seek_separator() {
            let line = self.buffer[self.position..self.position + len].to_vec();
            self.position += len + 1;
            return Ok(Some(line));
        }

        if self.end_of_stream {
            return Ok(None);
        }

        // part or all of the line is still in the stream
        let mut line = self.buffer[self.position..self.end].to_vec();
        self.refill()?;

        match self.seek_separator() {
            Some(len) => {
                line.extend_from_slice(&self.buffer[..len]);
                self.position = len + 1;
                Ok(Some(line))
            }
            None if self.end_of_stream => Ok(None),
            None => {
                self.end_of_stream = true;
                self.position = self.end;
                Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("word-list line longer than the {} byte read buffer", self.capacity),
                ))
            }
        }
    }

    /// Length from the cursor to the next separator in the buffered region.
    fn seek_separator(&self) -> Option<usize> {
        self.buffer[self.position..self.end]
            .iter()
            .position(|&b| b == LINE_SEPARATOR)
    }

    /// Fill the whole buffer, reading until it is full or the stream ends.
    fn refill(&mut self) -> io::Result<()> {
        let mut filled = 0;
        while filled < self.buffer.len() {
            match self.inner.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.end_of_stream = true;
                    self.position = 0;
                    self.end = 0;
                    return Err(e);
                }
            }
        }
        self.position = 0;
        self.end = filled;
        self.end_of_stream = filled < self.buffer.len();
        Ok(())
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out at most one byte per `read`, like a slow decompressor.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match (self.0.split_first(), buf.first_mut()) {
                (Some((&b, rest)), Some(slot)) => {
                    *slot = b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    fn collect<R: Read>(reader: LineReader<R>) -> Vec<String> {
        reader
            .map(|line| String::from_utf8(line.unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn test_simple_lines() {
        let reader = LineReader::new(Cursor::new(b"acts cats.computers.dog.".to_vec()));
        assert_eq!(collect(reader), vec!["acts cats", "computers", "dog"]);
    }

    #[test]
    fn test_empty_input() {
        let mut reader = LineReader::new(Cursor::new(Vec::new()));
        assert!(reader.read_line().unwrap().is_none());
        assert!(reader.read_line().unwrap().is_none());
    }

    #[test]
    fn test_lines_straddling_refills() {
        let input = b"abcd.efghij.kl.mnopqrs.".to_vec();
        let reader = LineReader::with_capacity(8, Cursor::new(input));
        assert_eq!(collect(reader), vec!["abcd", "efghij", "kl", "mnopqrs"]);
    }

    #[test]
    fn test_short_reads_still_fill_buffer() {
        let input = b"abcd.efghij.kl.";
        let reader = LineReader::with_capacity(8, Trickle(input));
        assert_eq!(collect(reader), vec!["abcd", "efghij", "kl"]);
    }

    #[test]
    fn test_buffer_boundary_on_separator() {
        // first refill ends exactly after a separator
        let reader = LineReader::with_capacity(4, Cursor::new(b"abcd.efg.".to_vec()));
        assert_eq!(collect(reader), vec!["abcd", "efg"]);
    }

    #[test]
    fn test_full_capacity_line_at_buffer_start() {
        let mut input = vec![b'a'; DEFAULT_BUFFER_SIZE];
        input.extend_from_slice(b".computers.");
        let reader = LineReader::new(Cursor::new(input));
        let lines = collect(reader);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), DEFAULT_BUFFER_SIZE);
        assert_eq!(lines[1], "computers");
    }

    #[test]
    fn test_full_capacity_line_after_refill() {
        // "abcd." fills the first refill exactly; "wxyz" then starts the next one
        let reader = LineReader::with_capacity(4, Cursor::new(b"abcd.wxyz.cd.".to_vec()));
        assert_eq!(collect(reader), vec!["abcd", "wxyz", "cd"]);
    }

    #[test]
    fn test_unterminated_tail_is_dropped() {
        let reader = LineReader::new(Cursor::new(b"acts.cat".to_vec()));
        assert_eq!(collect(reader), vec!["acts"]);
    }

    #[test]
    fn test_empty_line_between_separators() {
        let reader = LineReader::new(Cursor::new(b"acts..cats.".to_vec()));
        assert_eq!(collect(reader), vec!["acts", "", "cats"]);
    }

    #[test]
    fn test_oversized_line_is_an_error() {
        let mut reader = LineReader::with_capacity(4, Cursor::new(b"abcdefghij.".to_vec()));
        let err = reader.read_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        // fused after the error
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_read_errors_propagate() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("corrupt deflate stream"))
            }
        }
        let mut reader = LineReader::new(Broken);
        assert!(reader.read_line().is_err());
        assert!(reader.next().is_none());
    }
}
