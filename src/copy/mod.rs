//! Core copy operations.
//!
//! [`file`] holds the buffered single-file step and [`tree`] the recursive
//! subtree copy that fans out one task per subdirectory.

pub(crate) mod file;
pub(crate) mod tree;

use std::time::Duration;

/// Statistics from a successful copy operation.
///
/// Returned by [`copy_tree`](crate::copy_tree) and
/// [`copy_multiple`](crate::copy_multiple).
///
/// # Example
///
/// ```no_run
/// use fancopy::{copy_tree, CopyOptions, NoProgress};
/// use std::path::Path;
///
/// let stats = copy_tree(Path::new("src"), Path::new("dst"), &CopyOptions::default(), &NoProgress)?;
/// println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
/// # Ok::<(), fancopy::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Number of files successfully copied
    pub files_copied: u64,
    /// Number of directories created at the destination
    pub dirs_created: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Duration of the copy operation, counting pass included
    pub duration: Duration,
}
