//! Error types for pdfweld.
//!
//! This module defines all error types that can occur while merging PDF
//! documents. Errors carry enough context (path or source index) to
//! diagnose a failure without re-deriving merge state.
//!
//! # Error Categories
//!
//! - **I/O Errors**: source unreadable, destination unwritable
//! - **Structural Errors**: expected catalog/page-tree fields missing
//! - **Store Errors**: underlying object-store operations failing

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfweld operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Main error type for pdfweld operations.
///
/// Every failure aborts the merge in progress; no error is recovered
/// locally.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// No source files were provided for merging.
    #[error("no input files specified for merging")]
    NoSourcesToMerge,

    /// A source PDF could not be opened or parsed.
    #[error("failed to open source PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToOpenSource {
        /// Path to the source file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A source PDF is encrypted and cannot be merged.
    #[error(
        "source PDF is encrypted and cannot be merged: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedSource {
        /// Path to the encrypted source.
        path: PathBuf,
    },

    /// A source PDF has no document root in its trailer.
    #[error("source PDF has no document root: {}", .path.display())]
    MissingRoot {
        /// Path to the source file.
        path: PathBuf,
    },

    /// The destination file could not be created.
    #[error("failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where the destination should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The merged document could not be written to disk.
    #[error("failed to write output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A copied document is missing an expected field or has one of the
    /// wrong kind.
    #[error("source {source_index}: {details}")]
    Structural {
        /// Zero-based index of the offending source document.
        source_index: usize,
        /// What was expected and what was found.
        details: String,
    },

    /// An underlying object-store operation failed.
    #[error("{operation}: {source}")]
    Store {
        /// The operation being attempted.
        operation: String,
        /// Underlying store error.
        #[source]
        source: lopdf::Error,
    },
}

impl MergeError {
    /// Create a FailedToOpenSource error.
    pub fn failed_to_open(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToOpenSource {
            path,
            reason: reason.into(),
        }
    }

    /// Create a Structural error naming the offending source index.
    pub fn structural(source_index: usize, details: impl Into<String>) -> Self {
        Self::Structural {
            source_index,
            details: details.into(),
        }
    }

    /// Wrap a store error with the operation being attempted.
    pub fn store(operation: impl Into<String>, source: lopdf::Error) -> Self {
        Self::Store {
            operation: operation.into(),
            source,
        }
    }
}
