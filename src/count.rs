//! File counting pass used to size progress reporting.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Count the files under `dir`, recursively.
///
/// Every entry that is not a directory counts as one file, matching what
/// the copier will try to copy. Symlinks are not followed, so a symlink to
/// a directory counts as one file.
///
/// # Errors
///
/// Returns [`Error::Read`] if `dir` or any directory below it cannot be
/// listed. The count is all-or-nothing.
///
/// # Example
///
/// ```no_run
/// use fancopy::count_files;
/// use std::path::Path;
///
/// let total = count_files(Path::new("project"))?;
/// println!("{total} files to copy");
/// # Ok::<(), fancopy::Error>(())
/// ```
pub fn count_files(dir: &Path) -> Result<u64> {
    // Pending directories; only one listing is open at a time
    let mut pending: Vec<PathBuf> = vec![dir.to_path_buf()];
    let mut count = 0;

    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|e| Error::read(&current, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::read(&current, e))?;
            let file_type = entry.file_type().map_err(|e| Error::read(&current, e))?;
            if file_type.is_dir() {
                pending.push(entry.path());
            } else {
                count += 1;
            }
        }
    }

    Ok(count)
}
