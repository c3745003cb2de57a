//! pdfweld - Merge PDF files by unioning their object graphs.
//!
//! This library merges N independently-authored PDF documents into one
//! well-formed document. Shared sub-objects are copied once, reference
//! cycles are preserved rather than looped over, and the per-source page
//! trees are reconciled under a single new page-tree root.
//!
//! Parsing, cross-reference layout, and filter handling are delegated to
//! [`lopdf`]; this crate is purely the merge algorithm on top of that
//! object store.
//!
//! # Examples
//!
//! ```no_run
//! use pdfweld::merge_files;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let report = merge_files(
//!     Path::new("merged.pdf"),
//!     &[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//! )?;
//! println!("created a {} page document", report.total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod merge;
pub mod store;

// Re-export commonly used types
pub use config::MergeOptions;
pub use error::{MergeError, Result};
pub use merge::{MergeReport, Merger, merge_files};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
