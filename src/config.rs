//! Configuration for merge operations.
//!
//! Options control how the merged document is written out; the merge
//! algorithm itself has no tunables.

/// Options for a merge operation.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Write the destination atomically (write to a temp file, then
    /// rename over the destination). When enabled, a failed save leaves
    /// the destination untouched.
    pub atomic_save: bool,

    /// Buffer size for writing the destination, in bytes.
    pub buffer_size: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            atomic_save: true,
            buffer_size: 8192,
        }
    }
}

impl MergeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options that write the destination in place, without the
    /// temp-file-and-rename step.
    pub fn non_atomic() -> Self {
        Self {
            atomic_save: false,
            ..Default::default()
        }
    }
}
