// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration parsing.
//!
//! This module handles the DECLARATIONS phase and the sub-parsers for the
//! declaration forms themselves:
//!
//! - block units — packages, tasks, protected data (`parse_block`)
//! - subprograms and entries (`parse_subprogram`)
//! - types and subtypes, including enumerations and records (`parse_type`)
//! - variable groups — `A, B : T;` and friends (`parse_variables`)
//! - loop iterators (`parse_loop_var`)
//!
//! Whether a declaration is a spec or a body is not knowable up front: it
//! hinges on whether `;` arrives before an `is`/`do` region. Each sub-parser
//! therefore creates its token with a tentative spec flag and settles it at
//! the terminator. Children created inside a declarative region read the
//! tentative value, which is what makes entities declared in a package
//! spec's visible part come out exported.

use ecow::EcoString;

use super::{Flow, ParseMode, Parser};
use crate::kinds::TagKind;
use crate::reader::{LineReader, SourcePosition};
use crate::source_analysis::cursor::is_comment;
use crate::source_analysis::keyword::{Keyword, boundary_matches};
use crate::source_analysis::{Interrupt, TokenId};

/// Progress of the constant/exception reclassification scan in
/// [`Parser::parse_variables`]: the first word after the group's `:` decides
/// the whole group's kind.
#[derive(Clone, Copy)]
enum TypeScan {
    /// Waiting for the word to start.
    Idle,
    /// Inside the word that started at this buffer offset.
    Word(usize),
    /// The first word has been checked; nothing more to do.
    Done,
}

impl<R: LineReader> Parser<'_, R> {
    /// One statement in a declarative region.
    pub(super) fn declarations_statement(
        &mut self,
        parent: TokenId,
        pending: &mut Vec<TokenId>,
    ) -> Result<Flow, Interrupt> {
        if self.cursor.match_keyword(Keyword::Package)? {
            self.parse_block(parent, TagKind::Package, pending)?;
        } else if self.cursor.match_keyword(Keyword::Procedure)?
            || self.cursor.match_keyword(Keyword::Function)?
        {
            self.parse_subprogram(parent, TagKind::Subprogram, pending)?;
        } else if self.cursor.match_keyword(Keyword::Task)? {
            self.parse_block(parent, TagKind::Task, pending)?;
        } else if self.cursor.match_keyword(Keyword::Protected)? {
            self.parse_block(parent, TagKind::Protected, pending)?;
        } else if self.cursor.match_keyword(Keyword::Generic)? {
            return Ok(Flow::Switch(ParseMode::Generic));
        } else if self.cursor.match_keyword(Keyword::Type)? {
            self.parse_type(parent, TagKind::Type)?;
        } else if self.cursor.match_keyword(Keyword::Subtype)? {
            self.parse_type(parent, TagKind::Subtype)?;
        } else if self.cursor.match_keyword(Keyword::Begin)? {
            return Ok(Flow::Switch(ParseMode::Code));
        } else if self.cursor.match_keyword(Keyword::For)? {
            // representation clause; `use record` extends to `end record;`
            self.cursor.skip_past_keyword(Keyword::Use)?;
            self.cursor.skip_whitespace()?;
            if self.cursor.match_keyword(Keyword::Record)? {
                self.cursor.skip_past_keyword(Keyword::Record)?;
            }
            self.cursor.skip_past(";")?;
        } else if self.cursor.match_keyword(Keyword::End)? {
            self.cursor.skip_whitespace()?;
            let parent_name = self.tree.name(parent).cloned();
            if self.cursor.match_opt(parent_name.as_deref())? {
                self.cursor.skip_past(";")?;
                return Ok(Flow::Finish);
            }
            self.cursor.skip_past(";")?;
        } else if self.cursor.match_keyword(Keyword::Entry)? {
            self.parse_subprogram(parent, TagKind::Entry, pending)?;
        } else if self.cursor.match_keyword(Keyword::Private)? {
            // entities declared from here on are file-scoped
            self.tree.set_private(parent);
            self.cursor.skip_whitespace()?;
        } else {
            self.parse_variables(parent, TagKind::Variable)?;
            self.cursor.skip_past(";")?;
        }
        Ok(Flow::Continue)
    }

    /// Parses a package, task, or protected declaration after its keyword.
    ///
    /// Returns `None` when the declaration turns out not to be one (a
    /// mis-placed `type`), is defined elsewhere (`is separate`), or runs
    /// out of input before a terminator.
    pub(super) fn parse_block(
        &mut self,
        parent: TokenId,
        kind: TagKind,
        pending: &mut Vec<TokenId>,
    ) -> Result<Option<TokenId>, Interrupt> {
        self.cursor.skip_whitespace()?;
        let mut is_spec = true;
        if self.cursor.match_keyword(Keyword::Body)? {
            is_spec = false;
        } else if self.cursor.match_keyword(Keyword::Type)?
            && !matches!(kind, TagKind::Protected | TagKind::Task)
        {
            // only task types and protected types exist
            return Ok(None);
        }
        self.cursor.skip_whitespace()?;

        let len = self.cursor.scan_name(b"(;");
        let name = self.cursor.take(len);
        let token =
            self.tree
                .new_token(Some(name), kind, is_spec, Some(parent), self.cursor.position());
        self.tree.adopt_all(token, pending);
        self.cursor.move_by(len)?;
        self.cursor.skip_whitespace()?;

        // task and protected types may carry discriminants
        if self.cursor.current_byte() == Some(b'(') {
            while !self.cursor.at_eof() && self.cursor.current_byte() != Some(b')') {
                self.cursor.move_by(1)?;
                self.parse_variables(token, TagKind::AutomaticVariable)?;
            }
            self.cursor.move_by(1)?;
        }

        loop {
            self.cursor.skip_whitespace()?;
            if self.cursor.match_keyword(Keyword::Is)? {
                self.cursor.skip_whitespace()?;
                if self.cursor.match_keyword(Keyword::Separate)? {
                    // defined elsewhere; the stub itself carries no tag
                    self.tree.discard(token);
                    self.cursor.skip_past(";")?;
                    return Ok(None);
                }
                if self.cursor.match_keyword(Keyword::New)? {
                    // generic instantiation; nothing to parse inside
                    self.cursor.skip_past(";")?;
                } else {
                    self.parse(ParseMode::Declarations, token)?;
                    self.tree.clear_spec(token);
                }
                break;
            }
            if self.cursor.match_keyword(Keyword::Renames)? {
                self.cursor.skip_past(";")?;
                break;
            }
            if self.cursor.match_literal(";")? {
                self.tree.mark_spec(token);
                break;
            }
            self.cursor.skip_until_whitespace()?;
            if self.cursor.at_eof() {
                self.tree.discard(token);
                return Ok(None);
            }
        }
        Ok(Some(token))
    }

    /// Parses a subprogram or entry declaration after its keyword.
    pub(super) fn parse_subprogram(
        &mut self,
        parent: TokenId,
        kind: TagKind,
        pending: &mut Vec<TokenId>,
    ) -> Result<Option<TokenId>, Interrupt> {
        self.cursor.skip_whitespace()?;
        let len = self.cursor.scan_name(b"(;");
        let name = self.cursor.take(len);
        let token =
            self.tree
                .new_token(Some(name), kind, false, Some(parent), self.cursor.position());
        if kind.attaches_formals() {
            self.tree.adopt_all(token, pending);
        }
        self.cursor.move_by(len)?;
        self.cursor.skip_whitespace()?;

        if self.cursor.current_byte() == Some(b'(') {
            let mut last = None;
            while !self.cursor.at_eof() && self.cursor.current_byte() != Some(b')') {
                self.cursor.move_by(1)?;
                last = self.parse_variables(token, TagKind::AutomaticVariable)?;
            }
            self.cursor.move_by(1)?;

            // an entry family's first parenthesis group is its
            // discriminant; the real parameters may follow in a second one
            if kind == TagKind::Entry && last.is_none() {
                self.cursor.skip_whitespace()?;
                if self.cursor.current_byte() == Some(b'(') {
                    while !self.cursor.at_eof() && self.cursor.current_byte() != Some(b')') {
                        self.cursor.move_by(1)?;
                        self.parse_variables(token, TagKind::AutomaticVariable)?;
                    }
                    self.cursor.move_by(1)?;
                }
            }
        }

        // scan past return types and qualifiers to the `is`, `do`, or `;`
        while !self.cursor.at_eof() {
            self.cursor.skip_whitespace()?;
            if self.cursor.match_keyword(Keyword::Is)? {
                self.cursor.skip_whitespace()?;
                if self.cursor.match_keyword(Keyword::Separate)? {
                    self.tree.discard(token);
                    self.cursor.skip_past(";")?;
                    return Ok(None);
                }
                if self.cursor.match_keyword(Keyword::New)? {
                    self.cursor.skip_past(";")?;
                } else {
                    self.parse(ParseMode::Declarations, token)?;
                }
                break;
            }
            if self.cursor.match_keyword(Keyword::Renames)? {
                self.cursor.skip_past(";")?;
                break;
            }
            if self.cursor.match_keyword(Keyword::Do)? {
                // accept body
                self.parse(ParseMode::Code, token)?;
                break;
            }
            if self.cursor.match_literal(";")? {
                self.tree.mark_spec(token);
                break;
            }
            self.cursor.move_by(1)?;
            self.cursor.skip_past_word()?;
        }
        Ok(Some(token))
    }

    /// Parses a type or subtype declaration after its keyword.
    pub(super) fn parse_type(
        &mut self,
        parent: TokenId,
        kind: TagKind,
    ) -> Result<Option<TokenId>, Interrupt> {
        self.cursor.skip_whitespace()?;
        let len = self.cursor.scan_name(b"(;");
        let name = self.cursor.take(len);
        let token =
            self.tree
                .new_token(Some(name), kind, false, Some(parent), self.cursor.position());
        self.cursor.move_by(len)?;
        self.cursor.skip_whitespace()?;

        if self.cursor.current_byte() == Some(b'(') {
            // discriminants
            while !self.cursor.at_eof() && self.cursor.current_byte() != Some(b')') {
                self.cursor.move_by(1)?;
                self.parse_variables(token, TagKind::AutomaticVariable)?;
            }
            self.cursor.move_by(1)?;
            self.cursor.skip_whitespace()?;
        }

        if self.cursor.match_keyword(Keyword::Is)? {
            self.cursor.skip_whitespace()?;
            if self.cursor.current_byte() == Some(b'(') {
                // enumeration
                self.cursor.move_by(1)?;
                self.parse_variables(token, TagKind::Literal)?;
            } else if self.cursor.match_keyword(Keyword::Record)? {
                // components until `end record`; variant arms are skipped
                // but their bodies still produce components
                while !self.cursor.at_eof() {
                    self.cursor.skip_whitespace()?;
                    if self.cursor.match_keyword(Keyword::End)? {
                        self.cursor.skip_whitespace()?;
                        if self.cursor.match_keyword(Keyword::Record)? {
                            break;
                        }
                        self.cursor.skip_past(";")?;
                    } else if self.cursor.match_keyword(Keyword::Case)? {
                        self.cursor.skip_past_keyword(Keyword::Is)?;
                    } else if self.cursor.match_keyword(Keyword::When)? {
                        self.cursor.skip_past("=>")?;
                    } else {
                        self.parse_variables(token, TagKind::Component)?;
                        self.cursor.skip_past(";")?;
                    }
                }
            }
        } else {
            self.tree.mark_spec(token);
        }
        self.cursor.skip_past(";")?;
        Ok(Some(token))
    }

    /// Captures a `for` loop's iterator and skips to the `loop` keyword.
    pub(super) fn parse_loop_var(&mut self, parent: TokenId) -> Result<(), Interrupt> {
        self.cursor.skip_whitespace()?;
        let len = self.cursor.scan_name(b"");
        let name = self.cursor.take(len);
        self.tree.new_token(
            Some(name),
            TagKind::AutomaticVariable,
            false,
            Some(parent),
            self.cursor.position(),
        );
        self.cursor.move_by(len)?;
        self.cursor.skip_past_keyword(Keyword::Loop)?;
        Ok(())
    }

    /// Parses one declaration group `v1, v2 : [constant|exception] T …`,
    /// producing a token per name with each token attributed to the
    /// physical line the name appeared on.
    ///
    /// The group is first copied into a scratch buffer (line boundaries
    /// marked with NUL, positions remembered per line) while scanning for
    /// its end: an unnested `;`, `:=`, `=>`, or the `)` closing the
    /// surrounding construct. The names are then split back out of the
    /// buffer portion before the `:`. A group with no `:` — unless it is an
    /// enumeration literal list, which has none — produces no tokens.
    ///
    /// Returns the last token created, if any.
    pub(super) fn parse_variables(
        &mut self,
        parent: TokenId,
        kind: TagKind,
    ) -> Result<Option<TokenId>, Interrupt> {
        let mut kind = kind;
        self.cursor.skip_whitespace()?;
        if self.cursor.at_eof() {
            return Ok(None);
        }

        let mut line_positions = vec![self.cursor.position()];
        let mut buf: Vec<u8> = self.cursor.rest().to_vec();
        let mut buf_pos = 0usize;
        let mut depth = 0u32;
        let mut separator: Option<usize> = None;
        let mut type_scan = TypeScan::Idle;

        loop {
            if self.cursor.at_eof() {
                break;
            }
            if buf_pos >= buf.len() {
                self.cursor.read_new_line()?;
                if self.cursor.at_eof() {
                    break;
                }
                line_positions.push(self.cursor.position());
                buf.push(0);
                buf_pos = buf.len();
                buf.extend_from_slice(self.cursor.rest());
                continue;
            }
            let byte = buf[buf_pos];
            if is_comment(&buf, buf_pos) {
                // discard the rest of this buffered line
                buf_pos = buf.len() - 1;
                if !matches!(type_scan, TypeScan::Done) {
                    type_scan = TypeScan::Idle;
                }
            } else if byte == b'(' {
                depth += 1;
            } else if byte == b')' {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if byte == b';'
                || (buf_pos + 1 < buf.len() && matches!(&buf[buf_pos..buf_pos + 2], b":=" | b"=>"))
            {
                break;
            } else if byte == b':' && buf.get(buf_pos + 1) != Some(&b'=') {
                separator = Some(buf_pos);
            } else if kind == TagKind::Variable && separator.is_some() {
                match type_scan {
                    TypeScan::Idle if !byte.is_ascii_whitespace() => {
                        type_scan = TypeScan::Word(buf_pos);
                    }
                    TypeScan::Word(start)
                        if buf
                            .get(buf_pos + 1)
                            .is_none_or(|&b| b.is_ascii_whitespace() || b == b';') =>
                    {
                        if boundary_matches(&buf[start..], Keyword::Constant.text()) {
                            kind = TagKind::Constant;
                        } else if boundary_matches(&buf[start..], Keyword::Exception.text()) {
                            kind = TagKind::Exception;
                        }
                        type_scan = TypeScan::Done;
                    }
                    _ => {}
                }
            }
            buf_pos += 1;
        }

        // enumeration literal lists have no `:`; the closing `)` separates
        if kind == TagKind::Literal && separator.is_none() && buf.get(buf_pos) == Some(&b')') {
            separator = Some(buf_pos);
        }

        let mut token = None;
        if let Some(separator) = separator {
            let mut word_start: Option<usize> = Some(0);
            let mut line_index = 0usize;
            let mut i = 0;
            while i < separator {
                if is_comment(&buf, i) {
                    // jump to the end of this buffered line; a word cut off
                    // by the comment resumes on the next line
                    while i < separator && buf[i] != 0 {
                        i += 1;
                    }
                    if i < separator {
                        line_index += 1;
                    }
                    i += 1;
                    continue;
                }
                let byte = buf[i];
                let at_break = byte.is_ascii_whitespace() || byte == b',' || byte == 0;
                match word_start {
                    Some(start) if at_break => {
                        token = self
                            .variable_token(&buf, start, i, kind, parent, &line_positions, line_index)
                            .or(token);
                        word_start = None;
                    }
                    None if !at_break => word_start = Some(i),
                    _ => {}
                }
                if byte == 0 {
                    line_index += 1;
                }
                i += 1;
            }
            if let Some(start) = word_start {
                token = self
                    .variable_token(&buf, start, separator, kind, parent, &line_positions, line_index)
                    .or(token);
            }
        }

        // put the cursor back where the scan stopped: the distance from the
        // stop to the end of the buffer equals the distance from the target
        // position to the end of the current line
        self.cursor.resume_from_line_end(buf.len() - buf_pos)?;
        Ok(token)
    }

    /// Creates one token of a variable group, unless the word is the `in`
    /// or `out` parameter mode.
    #[expect(clippy::too_many_arguments, reason = "internal splitter helper")]
    fn variable_token(
        &mut self,
        buf: &[u8],
        start: usize,
        end: usize,
        kind: TagKind,
        parent: TokenId,
        line_positions: &[SourcePosition],
        line_index: usize,
    ) -> Option<TokenId> {
        let tail = &buf[start..];
        if boundary_matches(tail, Keyword::In.text()) || boundary_matches(tail, Keyword::Out.text())
        {
            return None;
        }
        let name = EcoString::from(String::from_utf8_lossy(&buf[start..end]).as_ref());
        let position = line_positions.get(line_index).copied().unwrap_or_default();
        Some(self.tree.new_token(Some(name), kind, false, Some(parent), position))
    }
}
