// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Executable-region and exception-handler parsing.
//!
//! Code regions produce few tags of their own — labels, loop and block
//! identifiers, loop iterators — but they must still be walked correctly,
//! because any statement can open a nested declare/begin/loop frame with
//! its own declarations, and a task body can `accept` an entry anywhere.

use super::{Flow, ParseMode, Parser};
use crate::kinds::TagKind;
use crate::reader::LineReader;
use crate::source_analysis::keyword::Keyword;
use crate::source_analysis::{Interrupt, TokenId};

impl<R: LineReader> Parser<'_, R> {
    /// One statement in an executable region.
    pub(super) fn code_statement(&mut self, parent: TokenId) -> Result<Flow, Interrupt> {
        if self.cursor.match_keyword(Keyword::Declare)? {
            let anon = self.tree.new_token(
                None,
                TagKind::Anonymous,
                false,
                Some(parent),
                self.cursor.last_match(),
            );
            self.parse(ParseMode::Declarations, anon)?;
        } else if self.cursor.match_keyword(Keyword::Begin)? {
            // a labelled block would have been entered at its identifier;
            // this one is anonymous
            let anon = self.tree.new_token(
                None,
                TagKind::Anonymous,
                false,
                Some(parent),
                self.cursor.last_match(),
            );
            self.parse(ParseMode::Code, anon)?;
        } else if self.cursor.match_keyword(Keyword::Exception)? {
            return Ok(Flow::Switch(ParseMode::Exceptions));
        } else if self.cursor.match_keyword(Keyword::End)? {
            self.cursor.skip_whitespace()?;
            let parent_name = self.tree.name(parent).cloned();
            if self.cursor.match_opt(parent_name.as_deref())? {
                self.cursor.skip_past(";")?;
                return Ok(Flow::Finish);
            }
            if self.cursor.match_keyword(Keyword::Loop)? {
                // labelled loops close with `end loop <name>;`
                self.cursor.skip_whitespace()?;
                if self.cursor.match_opt(parent_name.as_deref())? {
                    self.cursor.skip_past(";")?;
                    return Ok(Flow::Finish);
                }
            } else {
                self.cursor.skip_past(";")?;
            }
        } else if self.cursor.match_keyword(Keyword::Accept)? {
            self.parse_subprogram(parent, TagKind::Entry, &mut Vec::new())?;
        } else if self.cursor.match_keyword(Keyword::For)? {
            // the iterator is only visible inside the loop, so the loop
            // frame owns it
            let frame = self.anonymous_loop(parent, false);
            self.parse_loop_var(frame)?;
            self.parse(ParseMode::Code, frame)?;
        } else if self.cursor.match_keyword(Keyword::While)? {
            let frame = self.anonymous_loop(parent, false);
            self.cursor.skip_past_keyword(Keyword::Loop)?;
            self.cursor.skip_whitespace()?;
            self.parse(ParseMode::Code, frame)?;
        } else if self.cursor.match_keyword(Keyword::Loop)? {
            let frame = self.anonymous_loop(parent, true);
            self.cursor.skip_whitespace()?;
            self.parse(ParseMode::Code, frame)?;
        } else if self.cursor.rest().starts_with(b"<<") {
            self.cursor.move_by(2)?;
            self.parse_label(parent)?;
        } else if self.cursor.match_keyword(Keyword::Select)?
            || self.cursor.match_keyword(Keyword::Or)?
            || self.cursor.match_keyword(Keyword::Else)?
        {
            self.cursor.skip_whitespace()?;
        } else if self.cursor.match_keyword(Keyword::If)?
            || self.cursor.match_keyword(Keyword::Elsif)?
        {
            self.cursor.skip_past_keyword(Keyword::Then)?;
        } else if self.cursor.match_keyword(Keyword::Case)? {
            self.cursor.skip_past_keyword(Keyword::Is)?;
        } else if self.cursor.match_keyword(Keyword::When)? {
            self.cursor.skip_past("=>")?;
        } else {
            self.identifier_or_statement(parent)?;
        }
        Ok(Flow::Continue)
    }

    /// One arm of an exception-handler region.
    pub(super) fn exceptions_statement(&mut self, parent: TokenId) -> Result<Flow, Interrupt> {
        if self.cursor.match_keyword(Keyword::When)? {
            // `when E : Constraint_Error =>` names a choice variable
            self.cursor.skip_whitespace()?;
            self.parse_variables(parent, TagKind::AutomaticVariable)?;
        } else if self.cursor.match_keyword(Keyword::End)? {
            self.cursor.skip_whitespace()?;
            let parent_name = self.tree.name(parent).cloned();
            if self.cursor.match_opt(parent_name.as_deref())? {
                self.cursor.skip_past(";")?;
                return Ok(Flow::Finish);
            }
            self.cursor.skip_past(";")?;
        } else {
            self.cursor.skip_past(";")?;
        }
        Ok(Flow::Continue)
    }

    /// Creates the anonymous token that collects a loop's children. Plain
    /// `loop` statements are stamped with the keyword's own position; `for`
    /// and `while` loops read the current one.
    fn anonymous_loop(&mut self, parent: TokenId, at_match: bool) -> TokenId {
        let position = if at_match { self.cursor.last_match() } else { self.cursor.position() };
        self.tree.new_token(
            Some(Keyword::Loop.text().into()),
            TagKind::Anonymous,
            false,
            Some(parent),
            position,
        )
    }

    /// `<< name >>`: a statement label.
    fn parse_label(&mut self, parent: TokenId) -> Result<(), Interrupt> {
        self.cursor.skip_whitespace()?;
        if !self.cursor.rest().windows(2).any(|pair| pair == b">>") {
            return Ok(());
        }
        if self.cursor.current_byte().is_none_or(|b| b == b'>') {
            return Ok(());
        }
        let len = self.cursor.scan_name(b">");
        let name = self.cursor.take(len);
        self.tree.new_token(
            Some(name),
            TagKind::Label,
            false,
            Some(parent),
            self.cursor.position(),
        );
        self.cursor.skip_past(">>")?;
        Ok(())
    }

    /// Anything else in a code region is either `<ident>:` opening a named
    /// block or loop, or a plain statement to skip.
    fn identifier_or_statement(&mut self, parent: TokenId) -> Result<(), Interrupt> {
        let rest = self.cursor.rest();
        let mut ident_len = None;
        let mut i = 1;
        while i < rest.len() {
            let byte = rest[i];
            if byte == b':' {
                // `:=` is an assignment, not a label
                if rest.get(i + 1) != Some(&b'=') {
                    ident_len = Some(i);
                }
                break;
            }
            if !byte.is_ascii_alphanumeric() && byte != b'_' {
                break;
            }
            i += 1;
        }
        let Some(len) = ident_len else {
            self.cursor.skip_past(";")?;
            return Ok(());
        };

        let name = self.cursor.take(len);
        let token = self.tree.new_token(
            Some(name),
            TagKind::Identifier,
            false,
            Some(parent),
            self.cursor.position(),
        );
        self.cursor.move_by(len + 1)?;
        self.cursor.skip_whitespace()?;
        if self.cursor.match_keyword(Keyword::Declare)? {
            self.parse(ParseMode::Declarations, token)?;
        } else if self.cursor.match_keyword(Keyword::Begin)? {
            self.parse(ParseMode::Code, token)?;
        } else if self.cursor.match_keyword(Keyword::For)? {
            self.parse_loop_var(token)?;
            self.parse(ParseMode::Code, token)?;
        } else if self.cursor.match_keyword(Keyword::While)? {
            self.cursor.skip_past_keyword(Keyword::Loop)?;
            self.cursor.skip_whitespace()?;
            self.parse(ParseMode::Code, token)?;
        } else if self.cursor.match_keyword(Keyword::Loop)? {
            self.cursor.skip_whitespace()?;
            self.parse(ParseMode::Code, token)?;
        } else {
            // not a block or loop label after all
            self.tree.discard(token);
            self.cursor.skip_past(";")?;
        }
        Ok(())
    }
}
