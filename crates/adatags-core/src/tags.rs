// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Tag records and the sink contract.
//!
//! The emitter hands finished [`TagEntry`] records to a [`TagSink`]
//! supplied by the host — typically an adapter writing a tags file or
//! feeding an editor index. [`CollectSink`] is provided for hosts (and
//! tests) that just want the records in memory.

use ecow::EcoString;

use crate::kinds::TagKind;

/// The enclosing scope of a tag: the kind name and name of its parent
/// declaration, e.g. `("package", "Ada.Text_IO")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagScope {
    /// The parent's kind long name, or `"separate"` for sub-units.
    pub kind_name: &'static str,
    /// The parent's declared name.
    pub name: EcoString,
}

/// One emitted tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// The declared name. For qualified emissions this is the full dotted
    /// path.
    pub name: EcoString,
    /// Declaration kind; always an emittable kind with a descriptor.
    pub kind: TagKind,
    /// 1-based source line of the name.
    pub line: u32,
    /// Opaque file position of that line, as reported by the reader.
    pub file_position: u64,
    /// Whether the entity is visible only inside its own file.
    pub is_file_scope: bool,
    /// Enclosing scope, absent for compilation-unit-level declarations.
    pub scope: Option<TagScope>,
}

/// The sink contract: accepts each emitted tag in order.
pub trait TagSink {
    /// Receives one tag record.
    fn make_tag(&mut self, entry: TagEntry);
}

/// A sink that buffers every record in emission order.
#[derive(Debug, Default)]
pub struct CollectSink {
    entries: Vec<TagEntry>,
}

impl CollectSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected records, in emission order.
    #[must_use]
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    /// Consumes the sink and returns the records.
    #[must_use]
    pub fn into_entries(self) -> Vec<TagEntry> {
        self.entries
    }
}

impl TagSink for CollectSink {
    fn make_tag(&mut self, entry: TagEntry) {
        self.entries.push(entry);
    }
}

impl<S: TagSink + ?Sized> TagSink for &mut S {
    fn make_tag(&mut self, entry: TagEntry) {
        (**self).make_tag(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_sink_preserves_order() {
        let mut sink = CollectSink::new();
        for (i, name) in ["A", "B", "C"].into_iter().enumerate() {
            sink.make_tag(TagEntry {
                name: name.into(),
                kind: TagKind::Variable,
                line: u32::try_from(i).unwrap() + 1,
                file_position: 0,
                is_file_scope: false,
                scope: None,
            });
        }
        let names: Vec<_> = sink.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
