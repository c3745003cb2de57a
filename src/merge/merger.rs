//! The merge orchestrator.
//!
//! Drives a whole merge: create the destination, open every source, copy
//! each source's object graph, reconcile the page trees, install the new
//! catalog, save. Strictly sequential; any failure aborts the merge and
//! releases every opened source.

use lopdf::{Object, dictionary};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::MergeOptions;
use crate::error::{MergeError, Result};
use crate::merge::copy::{TranslationTable, copy_object};
use crate::merge::pages::merge_page_trees;
use crate::store::{OutputFile, SourceFile};

/// Summary of a completed merge.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Number of source documents merged.
    pub sources_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Time taken for the whole merge, including the save.
    pub merge_time: Duration,
}

/// PDF merger that combines whole documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    /// Create a merger with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger with the given options.
    pub fn with_options(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Merge `sources`, in order, into a new document at `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be created, any source
    /// cannot be opened, any copied document is structurally unsound, or
    /// the save fails. Every opened source is released on all exit
    /// paths.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfweld::merge::Merger;
    /// # use std::path::{Path, PathBuf};
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let merger = Merger::new();
    /// let report = merger.merge(
    ///     Path::new("merged.pdf"),
    ///     &[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
    /// )?;
    /// println!("merged {} pages", report.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, output: &Path, sources: &[PathBuf]) -> Result<MergeReport> {
        let start = Instant::now();

        if sources.is_empty() {
            return Err(MergeError::NoSourcesToMerge);
        }

        let mut merged = OutputFile::create(output)?;

        // Open every source up front, failing fast on the first bad
        // path. The Vec owns all handles until after the save; dropping
        // it releases them on every exit path.
        let mut opened = Vec::with_capacity(sources.len());
        for path in sources {
            opened.push(SourceFile::open(path)?);
        }

        // Copy each source's object graph into the destination with a
        // fresh translation table, collecting the copied catalog
        // references.
        let mut roots = Vec::with_capacity(opened.len());
        for source in &opened {
            let root = source.root()?;
            let mut table = TranslationTable::new();
            let copied = copy_object(
                &mut table,
                &mut merged.document,
                &source.document,
                &Object::Reference(root),
            )?;
            let copied_root = copied
                .as_reference()
                .map_err(|e| MergeError::store("resolve copied document root", e))?;

            debug!(
                source = %source.path.display(),
                objects = table.len(),
                "copied source document"
            );

            // Superseded once the merged catalog is installed; kept in
            // step with the copy loop as the last copied source's root.
            merged.set_root(copied_root);
            roots.push(copied_root);
        }

        // The copied catalogs, in source order, drive the page-tree
        // reconciliation.
        let mut catalogs = Vec::with_capacity(roots.len());
        for (index, root) in roots.iter().enumerate() {
            let catalog = merged
                .document
                .get_object(*root)
                .ok()
                .and_then(|object| object.as_dict().ok())
                .cloned()
                .ok_or_else(|| {
                    MergeError::structural(index, "copied document root is not a dictionary")
                })?;
            catalogs.push(catalog);
        }

        let page_tree = merge_page_trees(&mut merged.document, &catalogs)?;

        let catalog_id = merged.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => page_tree,
        });
        merged.set_root(catalog_id);

        let total_pages = merged.document.get_pages().len();
        merged.save(&self.options)?;

        let merge_time = start.elapsed();
        info!(
            output = %output.display(),
            sources = sources.len(),
            pages = total_pages,
            ?merge_time,
            "merge complete"
        );

        Ok(MergeReport {
            sources_merged: sources.len(),
            total_pages,
            merge_time,
        })
    }
}
