// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The token tree.
//!
//! Parsing produces an ordered tree of declaration tokens rooted at a
//! sentinel. The tree is an indexed arena: nodes live in a `Vec`, a
//! [`TokenId`] is an index into it, and each node carries its parent index
//! plus an ordered list of child indices. Discarded tokens (forward
//! declarations of separate units, spurious identifiers) are detached from
//! their parent and simply become unreachable; the emitter only ever walks
//! down from the root.
//!
//! A token's file-scope visibility depends on where its parent stood *at
//! the moment of creation* — a package spec's children are exported, a
//! body's are file-local — so it is computed here, once, in
//! [`TokenTree::new_token`], and never revisited.

use ecow::EcoString;

use crate::kinds::TagKind;
use crate::reader::SourcePosition;

/// Index of a token in its [`TokenTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenId(usize);

/// One declaration token.
#[derive(Debug)]
pub(crate) struct Token {
    /// Declared name; absent for the root and anonymous blocks.
    pub(crate) name: Option<EcoString>,
    pub(crate) kind: TagKind,
    /// Whether the declaration (so far) looks like a spec: it ended with
    /// `;` before any `is`/`do` region.
    pub(crate) is_spec: bool,
    /// Whether `private` has appeared at the current level inside this
    /// token's declarative region.
    pub(crate) is_private: bool,
    /// Computed at creation from the parent's state; see [`TokenTree::new_token`].
    pub(crate) is_file_scope: bool,
    /// Source position of the name occurrence.
    pub(crate) position: SourcePosition,
    pub(crate) parent: Option<TokenId>,
    /// Children in source order.
    pub(crate) children: Vec<TokenId>,
}

/// Arena of tokens owned by a root sentinel.
#[derive(Debug)]
pub(crate) struct TokenTree {
    nodes: Vec<Token>,
}

impl TokenTree {
    /// The root sentinel: kind [`TagKind::Undefined`], no name.
    pub(crate) const ROOT: TokenId = TokenId(0);

    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Token {
                name: None,
                kind: TagKind::Undefined,
                is_spec: false,
                is_private: false,
                is_file_scope: false,
                position: SourcePosition::default(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub(crate) fn node(&self, id: TokenId) -> &Token {
        &self.nodes[id.0]
    }

    /// Creates a token and links it as the last child of `parent` (or
    /// leaves it detached when `parent` is `None`, as for pending generic
    /// formals).
    ///
    /// File scope is resolved here: an entity is *exported* (not
    /// file-scoped) only when its parent is the root, a `separate`
    /// sentinel, or a package/subprogram/protected/task spec — and the
    /// parent's declarative region has not gone `private`. Everything else,
    /// including detached tokens, is file-scoped.
    pub(crate) fn new_token(
        &mut self,
        name: Option<EcoString>,
        kind: TagKind,
        is_spec: bool,
        parent: Option<TokenId>,
        position: SourcePosition,
    ) -> TokenId {
        let exported = parent.is_some_and(|p| {
            let parent = self.node(p);
            !parent.is_private
                && (matches!(parent.kind, TagKind::Undefined | TagKind::Separate)
                    || (parent.is_spec
                        && matches!(
                            parent.kind,
                            TagKind::Package
                                | TagKind::Subprogram
                                | TagKind::Protected
                                | TagKind::Task
                        )))
        });
        let id = TokenId(self.nodes.len());
        // a name scan cut short by end of input comes back empty; an
        // unnamed token is anonymous, not empty-named
        let name = name.filter(|name| !name.is_empty());
        self.nodes.push(Token {
            name,
            kind,
            is_spec,
            is_private: false,
            is_file_scope: !exported,
            position,
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    /// Unlinks `id` from its parent. The node and its subtree become
    /// unreachable from the root.
    pub(crate) fn discard(&mut self, id: TokenId) {
        if let Some(p) = self.nodes[id.0].parent {
            self.nodes[p.0].children.retain(|&c| c != id);
        }
        self.nodes[id.0].parent = None;
    }

    /// Re-parents every token in `pending`, in order, onto `parent`,
    /// leaving `pending` empty. Used to attach collected generic formals to
    /// their subject.
    pub(crate) fn adopt_all(&mut self, parent: TokenId, pending: &mut Vec<TokenId>) {
        for id in pending.drain(..) {
            self.nodes[id.0].parent = Some(parent);
            self.nodes[parent.0].children.push(id);
        }
    }

    pub(crate) fn name(&self, id: TokenId) -> Option<&EcoString> {
        self.node(id).name.as_ref()
    }

    pub(crate) fn mark_spec(&mut self, id: TokenId) {
        self.nodes[id.0].is_spec = true;
    }

    /// Clears the spec flag once a declaration's `is`/`do` region has been
    /// parsed. Children created inside the region have already read the
    /// tentative value.
    pub(crate) fn clear_spec(&mut self, id: TokenId) {
        self.nodes[id.0].is_spec = false;
    }

    pub(crate) fn set_private(&mut self, id: TokenId) {
        self.nodes[id.0].is_private = true;
    }
}
