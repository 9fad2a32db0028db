// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Mode-switched recursive descent over Ada declarations.
//!
//! Ada interleaves declarations and code in phases — generic formals, then
//! declarations, then `begin`/code, then exception handlers — and the same
//! keyword can open any of several constructs depending on the phase. The
//! parser models this with an explicit [`ParseMode`]: each [`Parser::parse`]
//! frame runs one construct at one mode, switching modes in place as the
//! phases go by and recursing for each nested construct.
//!
//! A frame ends when the enclosing construct does — `end <name>;` (or
//! `end loop <name>;`) re-matching the parent's name — or when input runs
//! out. Anything unrecognised is skipped to the next `;` and parsing
//! continues.
//!
//! Sub-parsers for declarations themselves (blocks, subprograms, types,
//! variable groups) live in [`declarations`]; the executable-region and
//! exception-handler statement forms live in [`code`].

mod code;
mod declarations;

use crate::kinds::TagKind;
use crate::reader::LineReader;
use crate::source_analysis::keyword::Keyword;
use crate::source_analysis::{Cursor, Interrupt, TokenId, TokenTree};

/// The parser's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseMode {
    /// Compilation-unit level.
    Root,
    /// Collecting generic formal parameters, awaiting the generic subject.
    Generic,
    /// Inside a declarative region.
    Declarations,
    /// Inside an executable region.
    Code,
    /// Inside an exception-handler region.
    Exceptions,
}

/// What a statement handler tells the frame loop to do next.
enum Flow {
    /// Keep going in the current mode.
    Continue,
    /// Same frame, new phase.
    Switch(ParseMode),
    /// The enclosing construct ended; unwind this frame.
    Finish,
}

/// One file's parse state: the cursor plus the tree under construction.
pub(crate) struct Parser<'t, R> {
    cursor: Cursor<R>,
    tree: &'t mut TokenTree,
}

impl<'t, R: LineReader> Parser<'t, R> {
    pub(crate) fn new(cursor: Cursor<R>, tree: &'t mut TokenTree) -> Self {
        Self { cursor, tree }
    }

    /// Parses the whole input at compilation-unit level.
    pub(crate) fn run(&mut self) -> Result<(), Interrupt> {
        self.parse(ParseMode::Root, TokenTree::ROOT)
    }

    /// Runs one frame at `mode` under `parent` until the construct ends or
    /// input is exhausted.
    fn parse(&mut self, mode: ParseMode, parent: TokenId) -> Result<(), Interrupt> {
        let mut mode = mode;
        let mut parent = parent;
        // Generic formals collected at this frame, detached until their
        // subject exists.
        let mut pending: Vec<TokenId> = Vec::new();
        loop {
            self.cursor.skip_whitespace()?;
            if self.cursor.at_eof() {
                return Ok(());
            }
            // Context clauses carry no tags. In GENERIC mode `with`
            // introduces a formal subprogram instead and is left for the
            // mode arm.
            if self.cursor.match_keyword(Keyword::Pragma)?
                || (mode != ParseMode::Generic && self.cursor.match_keyword(Keyword::With)?)
                || self.cursor.match_keyword(Keyword::Use)?
            {
                self.cursor.skip_past(";")?;
                continue;
            }
            let flow = match mode {
                ParseMode::Root => self.root_statement(&mut parent, &mut pending)?,
                ParseMode::Generic => self.generic_statement(parent, &mut pending)?,
                ParseMode::Declarations => self.declarations_statement(parent, &mut pending)?,
                ParseMode::Code => self.code_statement(parent)?,
                ParseMode::Exceptions => self.exceptions_statement(parent)?,
            };
            match flow {
                Flow::Continue => {}
                Flow::Switch(next) => mode = next,
                Flow::Finish => return Ok(()),
            }
        }
    }

    /// ROOT: compilation-unit-level declarations.
    fn root_statement(
        &mut self,
        parent: &mut TokenId,
        pending: &mut Vec<TokenId>,
    ) -> Result<Flow, Interrupt> {
        if self.cursor.match_keyword(Keyword::Package)? {
            self.parse_block(*parent, TagKind::Package, pending)?;
        } else if self.cursor.match_keyword(Keyword::Procedure)?
            || self.cursor.match_keyword(Keyword::Function)?
        {
            self.parse_subprogram(*parent, TagKind::Subprogram, pending)?;
        } else if self.cursor.match_keyword(Keyword::Task)? {
            self.parse_block(*parent, TagKind::Task, pending)?;
        } else if self.cursor.match_keyword(Keyword::Protected)? {
            self.parse_block(*parent, TagKind::Protected, pending)?;
        } else if self.cursor.match_keyword(Keyword::Generic)? {
            return Ok(Flow::Switch(ParseMode::Generic));
        } else if self.cursor.match_keyword(Keyword::Separate)? {
            // `separate (Parent) <unit>`: make a sentinel carrying the
            // parent name and hang the stub unit's tags off it.
            self.cursor.skip_whitespace()?;
            if self.cursor.current_byte() == Some(b'(') {
                self.cursor.move_by(1)?;
                self.cursor.skip_whitespace()?;
                let len = self.cursor.scan_name(b")");
                let name = self.cursor.take(len);
                *parent = self.tree.new_token(
                    Some(name),
                    TagKind::Separate,
                    false,
                    Some(*parent),
                    self.cursor.position(),
                );
                self.cursor.skip_past(")")?;
            } else {
                self.cursor.skip_past(";")?;
            }
        } else {
            self.cursor.skip_past(";")?;
        }
        Ok(Flow::Continue)
    }

    /// GENERIC: collect formal parameters, then hand the accumulated list
    /// to whichever subject declaration shows up.
    fn generic_statement(
        &mut self,
        parent: TokenId,
        pending: &mut Vec<TokenId>,
    ) -> Result<Flow, Interrupt> {
        if self.cursor.match_keyword(Keyword::Package)? {
            if self.parse_block(parent, TagKind::Package, pending)?.is_some() {
                return Ok(Flow::Switch(ParseMode::Root));
            }
        } else if self.cursor.match_keyword(Keyword::Procedure)?
            || self.cursor.match_keyword(Keyword::Function)?
        {
            if self
                .parse_subprogram(parent, TagKind::Subprogram, pending)?
                .is_some()
            {
                return Ok(Flow::Switch(ParseMode::Root));
            }
        } else if self.cursor.match_keyword(Keyword::Task)? {
            if self.parse_block(parent, TagKind::Task, pending)?.is_some() {
                return Ok(Flow::Switch(ParseMode::Root));
            }
        } else if self.cursor.match_keyword(Keyword::Protected)? {
            if self.parse_block(parent, TagKind::Protected, pending)?.is_some() {
                return Ok(Flow::Switch(ParseMode::Root));
            }
        } else if self.cursor.match_keyword(Keyword::Type)? {
            self.cursor.skip_whitespace()?;
            let len = self.cursor.scan_name(b"(;");
            let name = self.cursor.take(len);
            let formal = self.tree.new_token(
                Some(name),
                TagKind::Formal,
                false,
                None,
                self.cursor.position(),
            );
            pending.push(formal);
            self.cursor.skip_past(";")?;
        } else if self.cursor.match_keyword(Keyword::With)? {
            // formal subprogram: `with function F (…) return T;`
            self.cursor.skip_whitespace()?;
            self.cursor.skip_until_whitespace()?;
            self.cursor.skip_whitespace()?;
            let len = self.cursor.scan_name(b"(;");
            let name = self.cursor.take(len);
            let formal = self.tree.new_token(
                Some(name),
                TagKind::Formal,
                false,
                None,
                self.cursor.position(),
            );
            pending.push(formal);
            self.cursor.move_by(len)?;
            self.cursor.skip_whitespace()?;
            if self.cursor.current_byte() == Some(b'(') {
                while !self.cursor.at_eof() && self.cursor.current_byte() != Some(b')') {
                    self.cursor.move_by(1)?;
                    self.parse_variables(formal, TagKind::AutomaticVariable)?;
                }
                self.cursor.move_by(1)?;
            }
            self.cursor.skip_past(";")?;
        } else {
            self.cursor.skip_past(";")?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::SourceReader;

    fn parse_tree(source: &str) -> TokenTree {
        let mut tree = TokenTree::new();
        let mut cursor = Cursor::new(SourceReader::new(source));
        if cursor.read_new_line().is_ok() && !cursor.at_eof() {
            let _ = Parser::new(cursor, &mut tree).run();
        }
        tree
    }

    fn root_children(tree: &TokenTree) -> Vec<(Option<String>, TagKind)> {
        tree.node(TokenTree::ROOT)
            .children
            .iter()
            .map(|&id| {
                let node = tree.node(id);
                (node.name.as_ref().map(ToString::to_string), node.kind)
            })
            .collect()
    }

    #[test]
    fn empty_input_builds_an_empty_tree() {
        let tree = parse_tree("");
        assert!(tree.node(TokenTree::ROOT).children.is_empty());
    }

    #[test]
    fn top_level_units_hang_off_the_root() {
        let tree = parse_tree("package body P is\nend P;");
        assert_eq!(root_children(&tree), [(Some("P".into()), TagKind::Package)]);
    }

    #[test]
    fn context_clauses_produce_nothing() {
        let tree = parse_tree("with Ada.Text_IO;\nuse Ada.Text_IO;\npragma Pure;\npackage P is\nend P;");
        assert_eq!(root_children(&tree).len(), 1);
    }

    #[test]
    fn generic_formals_attach_to_their_subject() {
        let tree = parse_tree("generic\n  type T is private;\npackage G is\nend G;");
        let root = &tree.node(TokenTree::ROOT).children;
        assert_eq!(root.len(), 1);
        let g = tree.node(root[0]);
        assert_eq!(g.name.as_deref(), Some("G"));
        assert_eq!(g.children.len(), 1);
        let t = tree.node(g.children[0]);
        assert_eq!(t.name.as_deref(), Some("T"));
        assert_eq!(t.kind, TagKind::Formal);
        assert_eq!(t.parent, Some(root[0]));
    }

    #[test]
    fn generic_formal_subprogram_keeps_its_parameters() {
        let tree = parse_tree(
            "generic\n  with function F (X : T) return T;\nprocedure G (Y : T);",
        );
        let root = &tree.node(TokenTree::ROOT).children;
        assert_eq!(root.len(), 1);
        let g = tree.node(root[0]);
        // formals first, then G's own parameter
        assert_eq!(g.children.len(), 2);
        let f = tree.node(g.children[0]);
        assert_eq!(f.name.as_deref(), Some("F"));
        assert_eq!(f.kind, TagKind::Formal);
        let x = tree.node(f.children[0]);
        assert_eq!(x.name.as_deref(), Some("X"));
        assert_eq!(x.kind, TagKind::AutomaticVariable);
        let y = tree.node(g.children[1]);
        assert_eq!(y.name.as_deref(), Some("Y"));
    }

    #[test]
    fn separate_rebinds_the_parent() {
        let tree = parse_tree("separate (Outer.P)\npackage body Inner is\nend Inner;");
        let root = &tree.node(TokenTree::ROOT).children;
        assert_eq!(root.len(), 1);
        let sentinel = tree.node(root[0]);
        assert_eq!(sentinel.kind, TagKind::Separate);
        assert_eq!(sentinel.name.as_deref(), Some("Outer.P"));
        assert_eq!(sentinel.children.len(), 1);
        let inner = tree.node(sentinel.children[0]);
        assert_eq!(inner.name.as_deref(), Some("Inner"));
        assert_eq!(inner.kind, TagKind::Package);
    }

    #[test]
    fn unknown_statements_are_skipped() {
        let tree = parse_tree("gibberish here;\npackage P is\nend P;");
        assert_eq!(root_children(&tree).len(), 1);
    }
}
