//! Error types for the widgen CLI.
//!
//! This module defines the `WidgenError` enum which consolidates all error
//! variants that can occur during a scaffolding run. Most call sites use
//! `anyhow::Result` with context, but the fatal detection-stage conditions
//! carry typed variants so the top level can recognize them and exit with
//! the right status and message.

use std::path::PathBuf;
use thiserror::Error;

/// Consolidated error type for widgen operations.
///
/// The three detection-stage variants (`ManifestRead`, `DescriptorParse`,
/// `DirectoryConflict`) are terminal for the run: none of them is retried,
/// and the write stage never runs once one of them has been raised.
#[derive(Debug, Error)]
pub enum WidgenError {
    /// `package.json` exists but could not be read or parsed.
    #[error("Failed to read package.json: {message}")]
    ManifestRead {
        /// The underlying cause, surfaced to the user verbatim.
        message: String,
    },

    /// `src/package.xml` exists but is not well-formed XML.
    #[error("{message}")]
    DescriptorParse {
        /// Description of the parse failure.
        message: String,
    },

    /// The target directory holds unrelated content and must not be touched.
    #[error("The directory '{path}' is not empty and does not look like a widget project. \
             Remove its contents or pick another directory.")]
    DirectoryConflict {
        /// The occupied target directory.
        path: PathBuf,
    },

    /// A template failed to render.
    #[error("failed to render template '{name}': {message}")]
    TemplateRender {
        /// The registered template name.
        name: String,
        /// Description of the render failure.
        message: String,
    },

    /// Error reading or writing scaffold files.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O operation that failed.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Subprocess exited with non-zero code.
    ///
    /// Used when a spawned package-manager process fails; the exit code is
    /// propagated to the parent process without an extra error message.
    #[error("process exited with code {code}")]
    ProcessExitCode {
        /// The exit code from the subprocess.
        code: i32,
    },
}

impl WidgenError {
    /// Creates a new `ManifestRead` error.
    #[must_use]
    pub fn manifest_read(message: impl Into<String>) -> Self {
        Self::ManifestRead {
            message: message.into(),
        }
    }

    /// Creates a new `DescriptorParse` error.
    #[must_use]
    pub fn descriptor_parse(message: impl Into<String>) -> Self {
        Self::DescriptorParse {
            message: message.into(),
        }
    }

    /// Creates a new `DirectoryConflict` error.
    #[must_use]
    pub fn directory_conflict(path: PathBuf) -> Self {
        Self::DirectoryConflict { path }
    }

    /// Creates a new `TemplateRender` error.
    #[must_use]
    pub fn template_render(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateRender {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Io` error with context.
    #[must_use]
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Creates a new `ProcessExitCode` error.
    #[must_use]
    pub const fn process_exit_code(code: i32) -> Self {
        Self::ProcessExitCode { code }
    }
}
