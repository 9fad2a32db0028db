// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for Ada source.
//!
//! This module contains the input cursor, the keyword matcher, the token
//! tree, and the mode-switched recursive-descent parser.
//!
//! # Why not a token stream?
//!
//! Ada reuses the same keywords (`is`, `begin`, `end`, `for`) in
//! structurally different positions and terminates blocks by re-matching
//! the enclosing name rather than a delimiter, so the parser works straight
//! off the line cursor: each construct matches keywords in place, reads the
//! one name it cares about, and skips everything else to the next
//! terminator. Unrecognised input costs only its own tags.
//!
//! # Error handling
//!
//! Recovery is silent by design. The single hard stop is deep input
//! exhaustion — one thousand reads past end of input, the sign of a parser
//! loop stuck on a broken construct — which unwinds to the driver as an
//! explicit [`Interrupt`] value, preserving the partial token tree.

mod cursor;
mod error;
mod keyword;
pub(crate) mod parser;
mod token_tree;


pub(crate) use cursor::Cursor;
pub(crate) use error::Interrupt;
pub(crate) use token_tree::{TokenId, TokenTree};
