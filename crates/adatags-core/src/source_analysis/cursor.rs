// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The input cursor.
//!
//! The cursor owns the current physical line, a byte offset within it, and
//! the source position of the line, refilling from a [`LineReader`] as it
//! advances. All advance primitives are comment-aware: an Ada line comment
//! (`--` through end of line) is consumed wherever it appears, before and
//! after every step, so no caller ever sees one. A comment is only
//! recognised when the preceding character could not continue an
//! identifier, which keeps `Foo--bar` a single word.
//!
//! The cursor also hosts the lexical matcher: [`Cursor::match_literal`] and
//! [`Cursor::match_keyword`] compare at the current position under the
//! identifier-boundary rule, record the match's source position, and
//! advance past the matched text on success. The recorded "last match"
//! position is what anonymous tokens are stamped with, since their name is
//! not at the cursor position when they are created.
//!
//! End of input is sticky: once the reader runs dry the cursor's EOF flag
//! stays set and every primitive becomes a no-op. As a safety net against
//! parser loops stuck in unclosed constructs, the cursor counts reads past
//! end of input and aborts the parse with [`Interrupt::InputExhausted`]
//! after one thousand of them.

use ecow::EcoString;

use super::Interrupt;
use super::keyword::{Keyword, boundary_matches};
use crate::reader::{LineReader, SourcePosition};

/// Reads past end of input tolerated before the parse is abandoned.
const DEEP_EOF_LIMIT: u32 = 1000;

/// Whether an Ada line comment starts at `pos` in `buf`.
///
/// Unlike keyword matching this needs no trailing boundary; it only
/// requires that the `--` not be glued to the tail of an identifier.
pub(crate) fn is_comment(buf: &[u8], pos: usize) -> bool {
    let boundary = pos == 0
        || buf
            .get(pos - 1)
            .is_some_and(|&b| !b.is_ascii_alphanumeric() && b != b'_');
    boundary && buf[pos..].starts_with(b"--")
}

/// Single-threaded read state over one source file.
#[derive(Debug)]
pub(crate) struct Cursor<R> {
    reader: R,
    /// Current physical line, without its terminator.
    line: String,
    /// Byte offset of the read position within `line`.
    pos: usize,
    /// Source position of the current line.
    line_position: SourcePosition,
    /// Set once the reader returns end of input; never cleared.
    at_eof: bool,
    /// Reads attempted past end of input.
    eof_reads: u32,
    /// Position of the most recent successful match.
    last_match: SourcePosition,
}

impl<R: LineReader> Cursor<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pos: 0,
            line_position: SourcePosition::default(),
            at_eof: false,
            eof_reads: 0,
            last_match: SourcePosition::default(),
        }
    }

    /// True once the reader has run dry.
    pub(crate) fn at_eof(&self) -> bool {
        self.at_eof
    }

    /// Source position of the current line.
    pub(crate) fn position(&self) -> SourcePosition {
        self.line_position
    }

    /// Source position of the most recent successful match.
    pub(crate) fn last_match(&self) -> SourcePosition {
        self.last_match
    }

    /// The unread remainder of the current line.
    pub(crate) fn rest(&self) -> &[u8] {
        let bytes = self.line.as_bytes();
        &bytes[self.pos.min(bytes.len())..]
    }

    /// The byte under the cursor, if any.
    pub(crate) fn current_byte(&self) -> Option<u8> {
        self.line.as_bytes().get(self.pos).copied()
    }

    /// Whether a line comment starts at the cursor.
    pub(crate) fn at_comment(&self) -> bool {
        is_comment(self.line.as_bytes(), self.pos)
    }

    /// Discards the rest of the current line and loads the next non-empty
    /// one. On end of input the EOF flag is set; on the [`DEEP_EOF_LIMIT`]th
    /// read past it the parse is abandoned.
    pub(crate) fn read_new_line(&mut self) -> Result<(), Interrupt> {
        loop {
            match self.reader.read_line() {
                None => {
                    self.line.clear();
                    self.pos = 0;
                    self.at_eof = true;
                    self.eof_reads += 1;
                    if self.eof_reads >= DEEP_EOF_LIMIT {
                        tracing::warn!(
                            reads = self.eof_reads,
                            "deep input exhaustion; abandoning parse with partial tree"
                        );
                        return Err(Interrupt::InputExhausted);
                    }
                    return Ok(());
                }
                Some(text) => {
                    self.line.clear();
                    self.line.push_str(text);
                }
            }
            self.pos = 0;
            self.line_position = SourcePosition {
                line: self.reader.line_number(),
                offset: self.reader.file_position(),
            };
            if !self.line.is_empty() {
                return Ok(());
            }
        }
    }

    /// Loads the next line without skipping empty ones and without counting
    /// toward the exhaustion limit. The word-skipping primitives stop at a
    /// line break, and this is how they take it.
    fn refill_once(&mut self) {
        match self.reader.read_line() {
            None => {
                self.line.clear();
                self.pos = 0;
                self.at_eof = true;
            }
            Some(text) => {
                self.line.clear();
                self.line.push_str(text);
                self.pos = 0;
                self.line_position = SourcePosition {
                    line: self.reader.line_number(),
                    offset: self.reader.file_position(),
                };
            }
        }
    }

    /// Advances `amount` bytes, reading a new line if the offset leaves the
    /// current one.
    pub(crate) fn move_by(&mut self, amount: usize) -> Result<(), Interrupt> {
        self.pos += amount;
        if !self.at_eof && self.pos >= self.line.len() {
            self.read_new_line()?;
        }
        Ok(())
    }

    /// Consumes any comment lines starting at the cursor.
    fn skip_comment_lines(&mut self) -> Result<(), Interrupt> {
        while !self.at_eof && self.at_comment() {
            self.read_new_line()?;
        }
        Ok(())
    }

    /// Advances to the next non-whitespace position.
    pub(crate) fn skip_whitespace(&mut self) -> Result<(), Interrupt> {
        self.skip_comment_lines()?;
        while !self.at_eof && self.current_byte().is_some_and(|b| b.is_ascii_whitespace()) {
            self.move_by(1)?;
            self.skip_comment_lines()?;
        }
        Ok(())
    }

    /// Advances to the next whitespace position. A line break counts as
    /// whitespace: the next line is loaded and the cursor stops at its
    /// start.
    pub(crate) fn skip_until_whitespace(&mut self) -> Result<(), Interrupt> {
        self.skip_char_run(|b| b.is_ascii_whitespace())
    }

    /// Advances past the current word: to the next whitespace, `(`, `)`,
    /// `:`, or `;`.
    pub(crate) fn skip_past_word(&mut self) -> Result<(), Interrupt> {
        self.skip_char_run(|b| b.is_ascii_whitespace() || matches!(b, b'(' | b')' | b':' | b';'))
    }

    fn skip_char_run(&mut self, stop: impl Fn(u8) -> bool) -> Result<(), Interrupt> {
        self.skip_comment_lines()?;
        while !self.at_eof {
            match self.current_byte() {
                Some(b) if stop(b) => break,
                Some(_) => {
                    self.pos += 1;
                    if self.pos >= self.line.len() {
                        self.refill_once();
                        return Ok(());
                    }
                    self.skip_comment_lines()?;
                }
                None => {
                    self.refill_once();
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Scans forward until `literal` matches (and is consumed) or input
    /// runs out.
    pub(crate) fn skip_past(&mut self, literal: &str) -> Result<(), Interrupt> {
        self.skip_comment_lines()?;
        while !self.at_eof && !self.match_literal(literal)? {
            self.move_by(1)?;
            self.skip_comment_lines()?;
        }
        Ok(())
    }

    /// Scans forward until `keyword` matches (and is consumed) or input
    /// runs out.
    pub(crate) fn skip_past_keyword(&mut self, keyword: Keyword) -> Result<(), Interrupt> {
        self.skip_past(keyword.text())
    }

    /// Compares `literal` at the cursor under the boundary rule. On a match
    /// the source position is recorded and the cursor advances past the
    /// matched text.
    pub(crate) fn match_literal(&mut self, literal: &str) -> Result<bool, Interrupt> {
        if self.at_eof {
            return Ok(false);
        }
        if boundary_matches(self.rest(), literal) {
            self.last_match = self.line_position;
            self.move_by(literal.len())?;
            return Ok(true);
        }
        Ok(false)
    }

    /// [`Cursor::match_literal`] for a keyword.
    pub(crate) fn match_keyword(&mut self, keyword: Keyword) -> Result<bool, Interrupt> {
        self.match_literal(keyword.text())
    }

    /// Matches an optional name. An absent name matches vacuously, without
    /// consuming anything — this is how anonymous frames accept any
    /// `end …;` as their terminator.
    pub(crate) fn match_opt(&mut self, name: Option<&str>) -> Result<bool, Interrupt> {
        match name {
            None => Ok(true),
            Some(name) => self.match_literal(name),
        }
    }

    /// Repositions after a buffered multi-line scan: advances so that
    /// exactly `from_end` bytes of the current line remain unread.
    pub(crate) fn resume_from_line_end(&mut self, from_end: usize) -> Result<(), Interrupt> {
        let target = self.line.len().saturating_sub(from_end);
        let delta = target.saturating_sub(self.pos);
        self.move_by(delta)
    }

    /// Length of the name starting under the cursor: a run of bytes up to
    /// whitespace or one of `stops`, never shorter than one byte and never
    /// crossing the line.
    pub(crate) fn scan_name(&self, stops: &[u8]) -> usize {
        let bytes = self.line.as_bytes();
        let mut len = 1;
        while self.pos + len < bytes.len() {
            let b = bytes[self.pos + len];
            if b.is_ascii_whitespace() || stops.contains(&b) {
                break;
            }
            len += 1;
        }
        len
    }

    /// Copies `len` bytes starting at the cursor, clamped to the line.
    pub(crate) fn take(&self, len: usize) -> EcoString {
        let bytes = self.line.as_bytes();
        let end = (self.pos + len).min(bytes.len());
        let start = self.pos.min(end);
        EcoString::from(String::from_utf8_lossy(&bytes[start..end]).as_ref())
    }
}
