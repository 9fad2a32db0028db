// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Ada declaration-tag extraction.
//!
//! This crate turns one Ada compilation unit into a stream of tag records
//! for an editor-indexing pipeline:
//!
//! - [`reader`] — the line-oriented input contract and stock readers
//! - [`kinds`] / [`options`] — the declaration-kind table and the host's
//!   emission policy
//! - [`tags`] — the emitted record and the sink contract
//! - the drivers below, wiring reader → parser → emitter for one file
//!
//! Parsing is best-effort: malformed constructs are skipped to the next
//! terminator, truncated input yields the tags gathered so far, and no
//! parse error ever reaches the host.
//!
//! # Example
//!
//! ```
//! use adatags_core::prelude::*;
//!
//! let source = "package Stack is\n   procedure Push (X : Integer);\nend Stack;";
//! let mut sink = CollectSink::new();
//! find_tags_in_source(source, &TagOptions::default(), &mut sink);
//!
//! let names: Vec<_> = sink.entries().iter().map(|e| e.name.as_str()).collect();
//! assert_eq!(names, ["Stack", "Push"]);
//! assert_eq!(sink.entries()[1].kind, TagKind::SubprogramSpec);
//! ```

#![doc = include_str!("../../../README.md")]

pub mod error;
mod emit;
pub mod kinds;
pub mod options;
pub mod reader;
mod source_analysis;
pub mod tags;

use std::fs::File;
use std::io::BufReader;

use camino::Utf8Path;

use crate::error::IndexError;
use crate::options::TagOptions;
use crate::reader::{BufLineReader, LineReader, SourceReader};
use crate::source_analysis::parser::Parser;
use crate::source_analysis::{Cursor, TokenTree};
use crate::tags::TagSink;

/// Re-export of the types most hosts need.
pub mod prelude {
    pub use crate::kinds::{KindDescriptor, TagKind};
    pub use crate::options::{Include, KindFilter, TagOptions};
    pub use crate::reader::{BufLineReader, LineReader, SourcePosition, SourceReader};
    pub use crate::tags::{CollectSink, TagEntry, TagScope, TagSink};
    pub use crate::{ADA, find_tags, find_tags_in_file, find_tags_in_source};
}

/// Static description of the language this crate indexes.
#[derive(Debug, Clone, Copy)]
pub struct LanguageDefinition {
    /// Language name.
    pub name: &'static str,
    /// File extensions the parser claims. Matching is case-sensitive.
    pub extensions: &'static [&'static str],
}

impl LanguageDefinition {
    /// Whether `path` carries one of the claimed extensions.
    #[must_use]
    pub fn supports(&self, path: &Utf8Path) -> bool {
        path.extension().is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// The Ada language definition.
pub const ADA: LanguageDefinition =
    LanguageDefinition { name: "Ada", extensions: &["adb", "ads", "Ada"] };

/// Extracts tags from `reader` into `sink`.
///
/// This is the full per-file pipeline: read the first line, run the parser
/// at compilation-unit level until input is exhausted (or the
/// deep-exhaustion safety net fires), then walk the token tree and emit.
/// Even an aborted parse emits the partial tree.
pub fn find_tags<R: LineReader, S: TagSink>(reader: R, options: &TagOptions, sink: &mut S) {
    let mut tree = TokenTree::new();
    let mut cursor = Cursor::new(reader);
    if cursor.read_new_line().is_ok() && !cursor.at_eof() {
        if let Err(interrupt) = Parser::new(cursor, &mut tree).run() {
            tracing::debug!(%interrupt, "parse aborted; emitting partial tree");
        }
    }
    emit::emit_tags(&tree, options, sink);
}

/// [`find_tags`] over in-memory source text.
///
/// ```
/// use adatags_core::prelude::*;
///
/// let mut sink = CollectSink::new();
/// let unit = "procedure Main is\nbegin\n   null;\nend Main;";
/// find_tags_in_source(unit, &TagOptions::default(), &mut sink);
/// assert_eq!(sink.entries()[0].kind, TagKind::Subprogram);
/// ```
pub fn find_tags_in_source<S: TagSink>(source: &str, options: &TagOptions, sink: &mut S) {
    find_tags(SourceReader::new(source), options, sink);
}

/// [`find_tags`] over a file on disk.
///
/// # Errors
///
/// Fails if the path does not carry an Ada extension (see [`ADA`]) or the
/// file cannot be opened. Read errors past that point are treated as end
/// of input, like every other truncation.
pub fn find_tags_in_file<S: TagSink>(
    path: &Utf8Path,
    options: &TagOptions,
    sink: &mut S,
) -> Result<(), IndexError> {
    if !ADA.supports(path) {
        return Err(IndexError::UnsupportedExtension { path: path.to_owned() });
    }
    tracing::debug!(%path, "indexing Ada source");
    let file = File::open(path)
        .map_err(|source| IndexError::Open { path: path.to_owned(), source })?;
    find_tags(BufLineReader::new(BufReader::new(file)), options, sink);
    Ok(())
}
