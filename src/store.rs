//! Document store handles.
//!
//! Thin wrappers around [`lopdf::Document`] that bind a document to the
//! path it came from (or is headed to) and surface path-bearing errors.
//! The merge engine itself never touches the filesystem; all file I/O
//! happens here.
//!
//! # Examples
//!
//! ```no_run
//! use pdfweld::store::SourceFile;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SourceFile::open(Path::new("input.pdf"))?;
//! println!("document root: {:?}", source.root()?);
//! # Ok(())
//! # }
//! ```

use lopdf::{Document, ObjectId, dictionary};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::MergeOptions;
use crate::error::{MergeError, Result};

/// An opened source document.
///
/// The document stays owned for as long as the handle lives, so object
/// payloads remain available for the whole merge. Dropping the handle
/// releases the document.
#[derive(Debug)]
pub struct SourceFile {
    /// The loaded document.
    pub document: Document,

    /// Path the document was loaded from.
    pub path: PathBuf,
}

impl SourceFile {
    /// Open a source PDF.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// document is encrypted.
    pub fn open(path: &Path) -> Result<Self> {
        let document = Document::load(path)
            .map_err(|e| MergeError::failed_to_open(path.to_path_buf(), e.to_string()))?;

        if document.is_encrypted() {
            return Err(MergeError::EncryptedSource {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            document,
            path: path.to_path_buf(),
        })
    }

    /// The document's root (catalog) reference from its trailer.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::MissingRoot`] if the trailer has no `Root`
    /// entry of reference kind.
    pub fn root(&self) -> Result<ObjectId> {
        self.document
            .trailer
            .get(b"Root")
            .ok()
            .and_then(|object| object.as_reference().ok())
            .ok_or_else(|| MergeError::MissingRoot {
                path: self.path.clone(),
            })
    }
}

/// The destination document being assembled.
#[derive(Debug)]
pub struct OutputFile {
    /// The document under construction.
    pub document: Document,

    /// Path the document will be saved to.
    pub path: PathBuf,
}

impl OutputFile {
    /// Create the destination at `path`.
    ///
    /// The file is created on disk immediately so an unwritable
    /// destination fails before any source is opened. If the merge
    /// fails later, this (possibly empty) file is left in place; no
    /// rollback is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::FailedToCreateOutput`] if the file cannot
    /// be created.
    pub fn create(path: &Path) -> Result<Self> {
        std::fs::File::create(path).map_err(|e| MergeError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            document: Document::with_version("1.5"),
            path: path.to_path_buf(),
        })
    }

    /// Set the document's root reference.
    pub fn set_root(&mut self, root: ObjectId) {
        self.document.trailer.set("Root", root);
    }

    /// Save the document to its path.
    ///
    /// With `atomic_save` enabled the document is written to a temp file
    /// next to the destination and renamed over it, so a failed save
    /// leaves the previous destination state untouched; the temp file is
    /// removed on failure.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::FailedToWrite`] if serialization, flushing,
    /// or the final rename fails.
    pub fn save(&mut self, options: &MergeOptions) -> Result<()> {
        let write_path = if options.atomic_save {
            self.path.with_extension("tmp")
        } else {
            self.path.clone()
        };

        let written = self.write_document(&write_path, options.buffer_size);

        if options.atomic_save {
            let renamed = written.and_then(|()| {
                std::fs::rename(&write_path, &self.path).map_err(|e| MergeError::FailedToWrite {
                    path: self.path.clone(),
                    source: e,
                })
            });
            if renamed.is_err() {
                // A failed atomic save must not leave the temp file
                // behind.
                let _ = std::fs::remove_file(&write_path);
            }
            renamed
        } else {
            written
        }
    }

    fn write_document(&mut self, path: &Path, buffer_size: usize) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| MergeError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

        self.document
            .save_to(&mut writer)
            .map_err(|e| MergeError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        writer.flush().map_err(|e| MergeError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
