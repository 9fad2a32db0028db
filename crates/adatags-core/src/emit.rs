// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The emitter: token tree in, tag records out.
//!
//! A pre-order walk — every token is emitted before its children, children
//! in source order — that applies the policies the parser left open:
//!
//! 1. **Spec promotion.** A token whose declaration never grew a body has
//!    its kind promoted to the spec variant; kinds without one collapse to
//!    `Undefined` and are not emitted (their children still are).
//! 2. **Scope.** Each tag names its parent declaration as `(kind, name)`,
//!    or `("separate", name)` under a sub-unit sentinel.
//! 3. **Filtering.** Disabled kinds, nameless tokens, childless anonymous
//!    frames, and (when the host excludes them) file-scoped tags are
//!    dropped.
//! 4. **Qualified names.** When asked, every emitted tag of a non-local
//!    kind gets a second record named `Enclosing.Path.Name`, immediately
//!    after its primary.
//!
//! The walk never mutates the tree; promotion happens on the emitted
//! record only.

use ecow::EcoString;

use crate::kinds::TagKind;
use crate::options::TagOptions;
use crate::source_analysis::{TokenId, TokenTree};
use crate::tags::{TagEntry, TagScope, TagSink};

/// Name stamped onto anonymous declare/begin frames at emit time.
const ANONYMOUS_BLOCK_NAME: &str = "declare";

/// Walks the tree and feeds every surviving tag to `sink`.
pub(crate) fn emit_tags<S: TagSink>(tree: &TokenTree, options: &TagOptions, sink: &mut S) {
    for &child in &tree.node(TokenTree::ROOT).children {
        emit_token(tree, child, None, options, sink);
    }
}

fn emit_token<S: TagSink>(
    tree: &TokenTree,
    id: TokenId,
    parent_scope: Option<&str>,
    options: &TagOptions,
    sink: &mut S,
) {
    let token = tree.node(id);
    let kind = promoted_kind(token.is_spec, token.kind);
    let name = effective_name(token.kind, token.name.as_ref());

    // The dotted path handed down to children; set only while this tag
    // both emits and carries a qualifiable kind.
    let mut current_scope: Option<EcoString> = None;

    let wanted = options.kinds.is_enabled(kind)
        && (token.kind != TagKind::Anonymous || !token.children.is_empty())
        && (options.include.file_scope || !token.is_file_scope);
    if let Some(name) = name.filter(|_| wanted) {
        let entry = TagEntry {
            name: name.clone(),
            kind,
            line: token.position.line,
            file_position: token.position.offset,
            is_file_scope: token.is_file_scope,
            scope: scope_of(tree, id),
        };
        sink.make_tag(entry.clone());
        if options.include.qualified_tags && kind.takes_qualified_name() {
            if let Some(parent_scope) = parent_scope {
                let qualified: EcoString = format!("{parent_scope}.{name}").into();
                sink.make_tag(TagEntry { name: qualified.clone(), ..entry });
                current_scope = Some(qualified);
            } else {
                current_scope = Some(name);
            }
        }
    }

    for &child in &token.children {
        emit_token(tree, child, current_scope.as_deref(), options, sink);
    }
}

/// The one-way spec transition, applied to the emitted record only.
fn promoted_kind(is_spec: bool, kind: TagKind) -> TagKind {
    if is_spec { kind.to_spec() } else { kind }
}

/// A token's name as emitted: anonymous blocks borrow `declare`, anonymous
/// loops were already named `loop` by the parser.
fn effective_name(kind: TagKind, name: Option<&EcoString>) -> Option<EcoString> {
    match name {
        Some(name) => Some(name.clone()),
        None if kind == TagKind::Anonymous => Some(ANONYMOUS_BLOCK_NAME.into()),
        None => None,
    }
}

/// The scope record for a token: its parent's (possibly promoted) kind and
/// effective name.
fn scope_of(tree: &TokenTree, id: TokenId) -> Option<TagScope> {
    let parent = tree.node(tree.node(id).parent?);
    match parent.kind {
        TagKind::Undefined => None,
        TagKind::Separate => Some(TagScope { kind_name: "separate", name: parent.name.clone()? }),
        kind => {
            let kind_name = promoted_kind(parent.is_spec, kind).name()?;
            let name = effective_name(parent.kind, parent.name.as_ref())?;
            Some(TagScope { kind_name, name })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TagOptions;
    use crate::reader::SourceReader;
    use crate::source_analysis::Cursor;
    use crate::source_analysis::parser::Parser;
    use crate::tags::CollectSink;

    fn emit(source: &str, options: &TagOptions) -> Vec<TagEntry> {
        let mut tree = TokenTree::new();
        let mut cursor = Cursor::new(SourceReader::new(source));
        if cursor.read_new_line().is_ok() && !cursor.at_eof() {
            let _ = Parser::new(cursor, &mut tree).run();
        }
        let mut sink = CollectSink::new();
        emit_tags(&tree, options, &mut sink);
        sink.into_entries()
    }

    #[test]
    fn parents_precede_children() {
        let entries = emit("package P is\n  X : Integer;\nend P;", &TagOptions::default());
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["P", "X"]);
    }

    #[test]
    fn spec_promotion_respects_the_kind_enable() {
        // an instantiation without a region stays tentatively spec, and
        // packspec is off by default
        let entries = emit("package P is new G;", &TagOptions::default());
        assert!(entries.is_empty());

        let mut options = TagOptions::default();
        options.kinds.enable(TagKind::PackageSpec);
        let entries = emit("package P is new G;", &options);
        assert_eq!(entries[0].kind, TagKind::PackageSpec);
    }

    #[test]
    fn spec_scope_uses_the_promoted_kind_name() {
        let mut options = TagOptions::default();
        options.kinds.enable(TagKind::AutomaticVariable);
        let entries = emit("procedure Q (A : Integer);", &options);
        let a = entries.iter().find(|e| e.name == "A").unwrap();
        let scope = a.scope.as_ref().unwrap();
        assert_eq!(scope.kind_name, "subprogspec");
        assert_eq!(scope.name, "Q");
    }

    #[test]
    fn childless_anonymous_frames_are_silent() {
        let mut options = TagOptions::default();
        options.kinds.enable(TagKind::Anonymous);
        let entries = emit(
            "procedure M is\nbegin\n  loop\n    null;\n  end loop;\nend M;",
            &options,
        );
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["M"], "empty loop frame must not emit");
    }

    #[test]
    fn anonymous_declare_frame_emits_with_children() {
        let mut options = TagOptions::default();
        options.kinds.enable(TagKind::Anonymous);
        let entries = emit(
            "procedure M is\nbegin\n  declare\n    T : Integer;\n  begin\n    null;\n  end;\nend M;",
            &options,
        );
        let anon = entries.iter().find(|e| e.kind == TagKind::Anonymous).unwrap();
        assert_eq!(anon.name, "declare");
        let t = entries.iter().find(|e| e.name == "T").unwrap();
        let scope = t.scope.as_ref().unwrap();
        assert_eq!(scope.kind_name, "annon");
        assert_eq!(scope.name, "declare");
    }

    #[test]
    fn qualified_tags_follow_their_primaries() {
        let mut options = TagOptions::default();
        options.include.qualified_tags = true;
        let entries = emit(
            "package body Outer is\n  package body Inner is\n    X : Integer;\n  end Inner;\nend Outer;",
            &options,
        );
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Outer", "Inner", "Outer.Inner", "X", "Outer.Inner.X"]);
    }

    #[test]
    fn local_kinds_never_qualify() {
        let mut options = TagOptions::default();
        options.include.qualified_tags = true;
        let entries = emit("package P is\n  type Color is (Red);\nend P;", &options);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        // literals are local: Red gets no dotted variant and contributes no
        // scope segment
        assert_eq!(names, ["P", "Color", "P.Color", "Red"]);
    }

    #[test]
    fn file_scope_filter_drops_private_entities() {
        let source = "package P is\n  A : Integer;\nprivate\n  B : Integer;\nend P;";
        let all = emit(source, &TagOptions::default());
        assert_eq!(all.len(), 3);

        let mut options = TagOptions::default();
        options.include.file_scope = false;
        let public = emit(source, &options);
        let names: Vec<_> = public.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["P", "A"]);
    }

    #[test]
    fn separate_children_scope_to_the_sentinel() {
        let entries = emit(
            "separate (Outer)\npackage body Inner is\n  X : Integer;\nend Inner;",
            &TagOptions::default(),
        );
        let inner = entries.iter().find(|e| e.name == "Inner").unwrap();
        let scope = inner.scope.as_ref().unwrap();
        assert_eq!(scope.kind_name, "separate");
        assert_eq!(scope.name, "Outer");
        // the sentinel itself never emits
        assert!(entries.iter().all(|e| e.name != "Outer"));
    }
}
