// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Host-visible error types.
//!
//! Parse failures never surface here: unrecognised input is skipped and the
//! index stays best-effort. The only errors a host sees come from the file
//! driver — the file could not be opened or is not an Ada source file.

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// An error from the per-file driver.
#[derive(Debug, Error, Diagnostic)]
pub enum IndexError {
    /// The file's extension is not one the Ada parser claims.
    #[error("not an Ada source file: {path}")]
    #[diagnostic(help("recognised extensions are .adb, .ads and .Ada"))]
    UnsupportedExtension {
        /// The offending path.
        path: Utf8PathBuf,
    },

    /// The file could not be opened.
    #[error("failed to open {path}")]
    Open {
        /// The offending path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
