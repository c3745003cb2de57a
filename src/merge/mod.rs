//! PDF merging operations.
//!
//! The merge works on whole object graphs rather than page lists: every
//! object reachable from a source's catalog is copied into the
//! destination exactly once, with references translated and cycles
//! preserved, and the per-source page trees are then reconciled under a
//! single new root.
//!
//! # Examples
//!
//! ```no_run
//! use pdfweld::merge::merge_files;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let report = merge_files(
//!     Path::new("merged.pdf"),
//!     &[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//! )?;
//! println!("merged {} pages from {} files", report.total_pages, report.sources_merged);
//! # Ok(())
//! # }
//! ```

pub mod copy;
pub mod merger;
pub mod pages;

pub use copy::{TranslationTable, copy_object};
pub use merger::{MergeReport, Merger};
pub use pages::merge_page_trees;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Merge `sources`, in order, into a new document at `output`.
///
/// Convenience function that runs a [`Merger`] with default options.
///
/// # Errors
///
/// Returns an error if any merge step fails; see [`Merger::merge`].
pub fn merge_files(output: &Path, sources: &[PathBuf]) -> Result<MergeReport> {
    Merger::new().merge(output, sources)
}
