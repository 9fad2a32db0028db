// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Host option registry.
//!
//! Emission policy lives with the host, not the parser: which kinds of tags
//! to produce, whether file-scoped (file-local) tags are wanted, and whether
//! qualified `Parent.Child` name variants should be emitted alongside plain
//! names. The parser builds the same token tree regardless; options are read
//! only at emit time.
//!
//! All types deserialize with serde so a host can load them straight from
//! its configuration, and every field has a default, so partial
//! configuration works.

use serde::{Deserialize, Serialize};

use crate::kinds::{KIND_TABLE, TagKind};

/// Everything the emitter consults when turning the token tree into tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagOptions {
    /// Inclusion policy for whole classes of tags.
    pub include: Include,
    /// Per-kind enable switches.
    pub kinds: KindFilter,
}

/// Inclusion switches, mirroring the host's `include.*` option names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Include {
    /// When `false`, tags visible only inside their own file are dropped.
    pub file_scope: bool,
    /// When `true`, also emit a dotted `Parent.Name` variant for every
    /// emitted tag of a non-local kind.
    pub qualified_tags: bool,
}

impl Default for Include {
    fn default() -> Self {
        Self { file_scope: true, qualified_tags: false }
    }
}

/// Per-kind enable table.
///
/// Defaults follow the descriptor table: body/primary kinds on, most
/// specification kinds plus `autovar` and `annon` off.
///
/// ```
/// use adatags_core::kinds::TagKind;
/// use adatags_core::options::KindFilter;
///
/// let mut kinds = KindFilter::default();
/// assert!(kinds.is_enabled(TagKind::Package));
/// assert!(!kinds.is_enabled(TagKind::AutomaticVariable));
/// kinds.enable(TagKind::AutomaticVariable);
/// assert!(kinds.is_enabled(TagKind::AutomaticVariable));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindFilter {
    enabled: [bool; TagKind::COUNT],
}

impl Default for KindFilter {
    fn default() -> Self {
        let mut enabled = [false; TagKind::COUNT];
        for (slot, descriptor) in enabled.iter_mut().zip(&KIND_TABLE) {
            *slot = descriptor.enabled;
        }
        Self { enabled }
    }
}

impl KindFilter {
    /// Returns whether tags of `kind` are emitted. Sentinel kinds are never
    /// enabled.
    #[must_use]
    pub fn is_enabled(&self, kind: TagKind) -> bool {
        kind.index().is_some_and(|i| self.enabled[i])
    }

    /// Enables emission of `kind`. No effect on sentinel kinds.
    pub fn enable(&mut self, kind: TagKind) {
        self.set(kind, true);
    }

    /// Disables emission of `kind`.
    pub fn disable(&mut self, kind: TagKind) {
        self.set(kind, false);
    }

    /// Sets the enable flag for `kind`.
    pub fn set(&mut self, kind: TagKind, enabled: bool) {
        if let Some(i) = kind.index() {
            self.enabled[i] = enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_descriptor_table() {
        let kinds = KindFilter::default();
        assert!(kinds.is_enabled(TagKind::Package));
        assert!(kinds.is_enabled(TagKind::SubprogramSpec));
        assert!(!kinds.is_enabled(TagKind::PackageSpec));
        assert!(!kinds.is_enabled(TagKind::Anonymous));
        assert!(!kinds.is_enabled(TagKind::Separate));
        assert!(!kinds.is_enabled(TagKind::Undefined));
    }

    #[test]
    fn sentinels_cannot_be_enabled() {
        let mut kinds = KindFilter::default();
        kinds.enable(TagKind::Separate);
        assert!(!kinds.is_enabled(TagKind::Separate));
    }

    #[test]
    fn include_defaults() {
        let include = Include::default();
        assert!(include.file_scope);
        assert!(!include.qualified_tags);
    }
}
