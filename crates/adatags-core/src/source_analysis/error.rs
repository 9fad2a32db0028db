// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parser control-flow interrupts.

use thiserror::Error;

/// A non-local stop propagated out of the parse with `?`.
///
/// This is control flow, not a host-visible error: the driver catches it
/// and proceeds to emission with whatever tree has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum Interrupt {
    /// The cursor polled past end of input too many times, which means a
    /// parser loop is stuck inside an unclosed construct.
    #[error("input exhausted while scanning for a terminator")]
    InputExhausted,
}
