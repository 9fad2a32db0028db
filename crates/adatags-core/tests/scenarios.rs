// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios: whole compilation units in, exact tag sets out.

use adatags_core::prelude::*;

fn tags(source: &str, options: &TagOptions) -> Vec<TagEntry> {
    let mut sink = CollectSink::new();
    find_tags_in_source(source, options, &mut sink);
    sink.into_entries()
}

fn names(entries: &[TagEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

fn scope_of<'e>(entries: &'e [TagEntry], name: &str) -> Option<&'e TagScope> {
    entries.iter().find(|e| e.name == name).and_then(|e| e.scope.as_ref())
}

#[test]
fn package_with_one_variable() {
    let source = "package P is X : Integer; end P;";
    let entries = tags(source, &TagOptions::default());

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "P");
    assert_eq!(entries[0].kind, TagKind::Package);
    assert_eq!(entries[0].line, 1);
    assert!(entries[0].scope.is_none());

    assert_eq!(entries[1].name, "X");
    assert_eq!(entries[1].kind, TagKind::Variable);
    assert_eq!(entries[1].line, 1);
    let scope = entries[1].scope.as_ref().unwrap();
    assert_eq!((scope.kind_name, scope.name.as_str()), ("package", "P"));

    // X sits in the package's visible part, so both survive without
    // file-scoped tags
    let mut exported_only = TagOptions::default();
    exported_only.include.file_scope = false;
    let exported = tags(source, &exported_only);
    assert_eq!(names(&exported), ["P", "X"]);
}

#[test]
fn private_part_is_file_scoped() {
    let source = "package P is\n  procedure Q;\nprivate\n  R : Integer;\nend P;";
    let entries = tags(source, &TagOptions::default());

    assert_eq!(names(&entries), ["P", "Q", "R"]);
    let q = &entries[1];
    assert_eq!(q.kind, TagKind::SubprogramSpec);
    assert!(!q.is_file_scope);
    let r = &entries[2];
    assert_eq!(r.kind, TagKind::Variable);
    assert!(r.is_file_scope);

    let mut exported_only = TagOptions::default();
    exported_only.include.file_scope = false;
    assert_eq!(names(&tags(source, &exported_only)), ["P", "Q"]);
}

#[test]
fn loop_iterator_follows_the_autovar_switch() {
    let source = "procedure Main is\n  I : Integer;\nbegin\n  for K in 1..10 loop\n    null;\n  end loop;\nend Main;";

    let entries = tags(source, &TagOptions::default());
    assert_eq!(names(&entries), ["Main", "I"]);
    assert_eq!(entries[0].kind, TagKind::Subprogram);
    let scope = scope_of(&entries, "I").unwrap();
    assert_eq!((scope.kind_name, scope.name.as_str()), ("subprogram", "Main"));

    let mut with_autovars = TagOptions::default();
    with_autovars.kinds.enable(TagKind::AutomaticVariable);
    let entries = tags(source, &with_autovars);
    let k = entries.iter().find(|e| e.name == "K").expect("iterator tag");
    assert_eq!(k.kind, TagKind::AutomaticVariable);
    assert_eq!(k.line, 4);
}

#[test]
fn enumeration_literals_scope_to_their_type() {
    let entries = tags(
        "package P is\n  type Color is (Red, Green, Blue);\nend P;",
        &TagOptions::default(),
    );
    assert_eq!(names(&entries), ["P", "Color", "Red", "Green", "Blue"]);
    assert_eq!(entries[1].kind, TagKind::Type);
    for literal in &entries[2..] {
        assert_eq!(literal.kind, TagKind::Literal);
        let scope = literal.scope.as_ref().unwrap();
        assert_eq!((scope.kind_name, scope.name.as_str()), ("type", "Color"));
    }
}

#[test]
fn record_components_keep_their_lines() {
    let entries = tags(
        "package P is\n  type Rec is record A, B : Integer;\n    C : Float;\n  end record;\nend P;",
        &TagOptions::default(),
    );
    assert_eq!(names(&entries), ["P", "Rec", "A", "B", "C"]);
    assert_eq!(entries[1].kind, TagKind::Type);

    let a = &entries[2];
    let b = &entries[3];
    let c = &entries[4];
    for component in [a, b, c] {
        assert_eq!(component.kind, TagKind::Component);
        let scope = component.scope.as_ref().unwrap();
        assert_eq!((scope.kind_name, scope.name.as_str()), ("type", "Rec"));
    }
    assert_eq!(a.line, 2);
    assert_eq!(b.line, 2);
    assert_eq!(c.line, 3);
}

#[test]
fn generic_formals_attach_to_the_package() {
    let source = "generic\n  type T is private;\n  with function F (X : T) return T;\npackage G is\nend G;";

    let mut options = TagOptions::default();
    options.kinds.enable(TagKind::AutomaticVariable);
    let entries = tags(source, &options);

    assert_eq!(names(&entries), ["G", "T", "F", "X"]);
    assert_eq!(entries[0].kind, TagKind::Package);

    let t = &entries[1];
    assert_eq!(t.kind, TagKind::Formal);
    assert_eq!(t.line, 2);
    let scope = t.scope.as_ref().unwrap();
    assert_eq!((scope.kind_name, scope.name.as_str()), ("package", "G"));

    let f = &entries[2];
    assert_eq!(f.kind, TagKind::Formal);
    assert_eq!(f.line, 3);

    let x = &entries[3];
    assert_eq!(x.kind, TagKind::AutomaticVariable);
    let scope = x.scope.as_ref().unwrap();
    assert_eq!((scope.kind_name, scope.name.as_str()), ("formal", "F"));
}

#[test]
fn separate_bodies_scope_to_the_sentinel_not_the_root() {
    let entries = tags(
        "separate (Parent.Child)\npackage body X is\n  V : Integer;\nend X;",
        &TagOptions::default(),
    );
    assert_eq!(names(&entries), ["X", "V"]);
    let scope = entries[0].scope.as_ref().unwrap();
    assert_eq!((scope.kind_name, scope.name.as_str()), ("separate", "Parent.Child"));
    let scope = entries[1].scope.as_ref().unwrap();
    assert_eq!((scope.kind_name, scope.name.as_str()), ("package", "X"));
}

#[test]
fn comments_do_not_split_identifiers() {
    let entries = tags(
        "package P is\n  Foo--bar : Integer;\nend P;",
        &TagOptions::default(),
    );
    // `Foo--bar` is one identifier, not `Foo` followed by a comment
    assert_eq!(names(&entries), ["P", "Foo--bar"]);
}

#[test]
fn comments_swallow_the_rest_of_the_line() {
    let entries = tags(
        "package P is -- X : Integer;\n  Y : Integer;\nend P;",
        &TagOptions::default(),
    );
    assert_eq!(names(&entries), ["P", "Y"]);
}

#[test]
fn parenthesised_type_expressions_do_not_end_declarations() {
    let entries = tags(
        "package P is\n  Table : array (1 .. 10) of Integer;\n  After : Integer;\nend P;",
        &TagOptions::default(),
    );
    assert_eq!(names(&entries), ["P", "Table", "After"]);
}

#[test]
fn unterminated_block_still_terminates_and_emits() {
    let entries = tags(
        "package body P is\n  X : Integer;\n  procedure Q is\n  begin",
        &TagOptions::default(),
    );
    assert_eq!(names(&entries), ["P", "X", "Q"]);
}

#[test]
fn qualified_tags_build_dotted_paths() {
    let mut options = TagOptions::default();
    options.include.qualified_tags = true;
    let entries = tags(
        "package body Outer is\n  procedure Inner is\n  begin\n    null;\n  end Inner;\nend Outer;",
        &options,
    );
    assert_eq!(names(&entries), ["Outer", "Inner", "Outer.Inner"]);
    // the dotted record mirrors its primary
    assert_eq!(entries[1].kind, entries[2].kind);
    assert_eq!(entries[1].line, entries[2].line);
}

#[test]
fn kind_letters_match_the_host_table() {
    let entries = tags(
        "package P is\n  Oops : exception;\n  N : constant Integer := 1;\nend P;",
        &TagOptions::default(),
    );
    let letters: Vec<char> = entries
        .iter()
        .map(|e| e.kind.descriptor().unwrap().letter)
        .collect();
    assert_eq!(letters, ['p', 'x', 'n']);
}

#[test]
fn task_protected_and_entry_tags() {
    let source = "package P is\n  task type Queue is\n    entry Push (Item : Integer);\n  end Queue;\n  protected Counter is\n    entry Wait;\n  end Counter;\nend P;";

    // the entries terminate with `;`, promote to entryspec, and entryspec
    // is off by default
    let entries = tags(source, &TagOptions::default());
    assert_eq!(names(&entries), ["P", "Queue", "Counter"]);
    assert_eq!(entries[1].kind, TagKind::Task);
    assert_eq!(entries[2].kind, TagKind::Protected);

    let mut options = TagOptions::default();
    options.kinds.enable(TagKind::EntrySpec);
    let entries = tags(source, &options);
    assert_eq!(names(&entries), ["P", "Queue", "Push", "Counter", "Wait"]);
    let push = &entries[2];
    assert_eq!(push.kind, TagKind::EntrySpec);
    let scope = push.scope.as_ref().unwrap();
    assert_eq!((scope.kind_name, scope.name.as_str()), ("task", "Queue"));
}
