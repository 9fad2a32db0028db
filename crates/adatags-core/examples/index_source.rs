// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Example demonstrating the tag-extraction API.
//!
//! Indexes the Ada file given on the command line, or a built-in sample
//! unit when none is given, and prints every tag with its kind, line, and
//! scope.

use adatags_core::prelude::*;
use camino::Utf8PathBuf;

const SAMPLE: &str = "\
package Stacks is
   type Stack is private;
   procedure Push (S : in out Stack; X : Integer);
   Overflow : exception;
private
   Capacity : constant := 64;
end Stacks;
";

fn main() -> miette::Result<()> {
    let mut sink = CollectSink::new();
    let options = TagOptions::default();

    match std::env::args().nth(1) {
        Some(path) => {
            let path = Utf8PathBuf::from(path);
            find_tags_in_file(&path, &options, &mut sink)?;
            println!("Tags in {path}:\n");
        }
        None => {
            find_tags_in_source(SAMPLE, &options, &mut sink);
            println!("Tags in the built-in sample:\n");
        }
    }

    for entry in sink.entries() {
        let kind = entry.kind.descriptor().expect("emitted kinds have descriptors");
        print!("  {:<12} {:<12} line {:<4}", entry.name, kind.name, entry.line);
        if let Some(scope) = &entry.scope {
            print!("  in {} {}", scope.kind_name, scope.name);
        }
        if entry.is_file_scope {
            print!("  (file scope)");
        }
        println!();
    }
    Ok(())
}
