// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented source input.
//!
//! The parser consumes its input one physical line at a time through the
//! [`LineReader`] contract. A reader hands out each line without its
//! terminator and can report, at any point, the line number and opaque file
//! position of the line it returned last. Those two values are what end up
//! in emitted tags, so editors can jump straight to a declaration.
//!
//! Two implementations are provided: [`SourceReader`] over in-memory text
//! and [`BufLineReader`] over anything implementing [`std::io::BufRead`].

use std::io::BufRead;

/// A source location: line number plus opaque file position.
///
/// The line number is 1-based. The file position is whatever the reader
/// reports for the start of the line; for the built-in readers it is a byte
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourcePosition {
    /// 1-based line number.
    pub line: u32,
    /// Opaque file position of the line start.
    pub offset: u64,
}

/// The reader contract: one physical line per call, positions on demand.
pub trait LineReader {
    /// Returns the next physical line without its terminator, or `None` at
    /// end of input. Repeated calls after end of input keep returning
    /// `None`.
    fn read_line(&mut self) -> Option<&str>;

    /// 1-based line number of the line most recently returned.
    fn line_number(&self) -> u32;

    /// Opaque position of the start of the line most recently returned.
    fn file_position(&self) -> u64;
}

/// A [`LineReader`] over an in-memory source string.
///
/// ```
/// use adatags_core::reader::{LineReader, SourceReader};
///
/// let mut reader = SourceReader::new("package P;\nend;");
/// assert_eq!(reader.read_line(), Some("package P;"));
/// assert_eq!(reader.line_number(), 1);
/// assert_eq!(reader.read_line(), Some("end;"));
/// assert_eq!(reader.file_position(), 11);
/// assert_eq!(reader.read_line(), None);
/// ```
#[derive(Debug)]
pub struct SourceReader<'src> {
    source: &'src str,
    offset: usize,
    line_number: u32,
    line_start: u64,
}

impl<'src> SourceReader<'src> {
    /// Creates a reader over `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { source, offset: 0, line_number: 0, line_start: 0 }
    }
}

impl LineReader for SourceReader<'_> {
    fn read_line(&mut self) -> Option<&str> {
        if self.offset >= self.source.len() {
            return None;
        }
        let rest = &self.source[self.offset..];
        let (line, consumed) = match rest.find('\n') {
            Some(nl) => (&rest[..nl], nl + 1),
            None => (rest, rest.len()),
        };
        self.line_start = self.offset as u64;
        self.line_number += 1;
        self.offset += consumed;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    fn line_number(&self) -> u32 {
        self.line_number
    }

    fn file_position(&self) -> u64 {
        self.line_start
    }
}

/// A [`LineReader`] over any buffered byte stream.
///
/// Read errors are treated as end of input: the tag index is best-effort,
/// and a truncated index is the tolerated failure mode. The error is logged
/// via `tracing` so hosts can surface it.
#[derive(Debug)]
pub struct BufLineReader<R> {
    inner: R,
    buf: String,
    line_number: u32,
    line_start: u64,
    next_start: u64,
}

impl<R: BufRead> BufLineReader<R> {
    /// Creates a reader over `inner`.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self { inner, buf: String::new(), line_number: 0, line_start: 0, next_start: 0 }
    }
}

impl<R: BufRead> LineReader for BufLineReader<R> {
    fn read_line(&mut self) -> Option<&str> {
        self.buf.clear();
        match self.inner.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(read) => {
                self.line_start = self.next_start;
                self.next_start += read as u64;
                self.line_number += 1;
                if self.buf.ends_with('\n') {
                    self.buf.pop();
                    if self.buf.ends_with('\r') {
                        self.buf.pop();
                    }
                }
                Some(&self.buf)
            }
            Err(error) => {
                tracing::warn!(%error, "read failed; treating as end of input");
                None
            }
        }
    }

    fn line_number(&self) -> u32 {
        self.line_number
    }

    fn file_position(&self) -> u64 {
        self.line_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_reader_reports_line_starts() {
        let mut reader = SourceReader::new("a\nbb\nccc");
        assert_eq!(reader.read_line(), Some("a"));
        assert_eq!((reader.line_number(), reader.file_position()), (1, 0));
        assert_eq!(reader.read_line(), Some("bb"));
        assert_eq!((reader.line_number(), reader.file_position()), (2, 2));
        assert_eq!(reader.read_line(), Some("ccc"));
        assert_eq!((reader.line_number(), reader.file_position()), (3, 5));
        assert_eq!(reader.read_line(), None);
        assert_eq!(reader.read_line(), None);
    }

    #[test]
    fn source_reader_preserves_empty_lines() {
        let mut reader = SourceReader::new("a\n\nb\n");
        assert_eq!(reader.read_line(), Some("a"));
        assert_eq!(reader.read_line(), Some(""));
        assert_eq!(reader.read_line(), Some("b"));
        assert_eq!(reader.read_line(), None);
    }

    #[test]
    fn source_reader_strips_carriage_returns() {
        let mut reader = SourceReader::new("a\r\nb\r\n");
        assert_eq!(reader.read_line(), Some("a"));
        assert_eq!(reader.read_line(), Some("b"));
    }

    #[test]
    fn buf_reader_matches_source_reader() {
        let text = "one\ntwo\r\nthree";
        let mut buffered = BufLineReader::new(text.as_bytes());
        assert_eq!(buffered.read_line(), Some("one"));
        assert_eq!(buffered.read_line(), Some("two"));
        assert_eq!((buffered.line_number(), buffered.file_position()), (2, 4));
        assert_eq!(buffered.read_line(), Some("three"));
        assert_eq!(buffered.read_line(), None);
    }
}
