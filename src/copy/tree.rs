//! Recursive directory copy with one concurrent task per subdirectory.
//!
//! A subtree copy opens a single rayon scope. Each directory level is one
//! task on that scope: it copies its own files sequentially, spawns its
//! subdirectories onto the same scope and returns without waiting for
//! them, so stack use does not grow with tree depth. Every level reports
//! its [`Tally`] over one channel and the caller reduces them in arrival
//! order once the scope has joined, so the first error that *arrived* wins
//! and no lock guards the running totals.

use super::file::copy_file;
use crate::error::Error;
use crate::options::CopyOptions;
use crate::progress::ProgressSender;
use rayon::Scope;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};

/// Files, bytes and directories copied under one subtree, plus the first
/// error observed there.
///
/// Counts are kept even when `first_error` is set.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub files_copied: u64,
    pub bytes_copied: u64,
    pub dirs_created: u64,
    pub first_error: Option<Error>,
}

impl Tally {
    fn failed(error: Error) -> Self {
        Self {
            first_error: Some(error),
            ..Self::default()
        }
    }

    /// Fold `other` into `self`. Counts always add up; `other`'s error is
    /// only kept if `self` has none yet.
    pub(crate) fn merge(&mut self, other: Tally) {
        self.files_copied += other.files_copied;
        self.bytes_copied += other.bytes_copied;
        self.dirs_created += other.dirs_created;
        if self.first_error.is_none() {
            self.first_error = other.first_error;
        }
    }
}

/// Make sure `dir` is a directory.
///
/// Returns `true` only if this call created it. Losing a creation race to
/// another task is not an error and does not count as created.
pub(crate) fn ensure_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    match fs::create_dir(dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Some(parent) = dir.parent() {
                fs::create_dir_all(parent)?;
            }
            claim_dir(fs::create_dir(dir), dir)
        }
        result => claim_dir(result, dir),
    }
}

fn claim_dir(result: io::Result<()>, dir: &Path) -> io::Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Copy `src` into `dst`, recursing into subdirectories concurrently.
///
/// Directory tasks run on the current rayon pool, or the global pool when
/// called from outside one. Returns only after every task spawned for this
/// subtree has finished.
///
/// A file that fails to copy stops the rest of its own directory level;
/// subdirectories already spawned still run to completion and their counts
/// are kept.
pub(crate) fn copy_subtree(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
    progress: &ProgressSender,
) -> Tally {
    let (tx, rx) = mpsc::channel::<Tally>();

    rayon::scope(|s| {
        copy_level(s, src.to_path_buf(), dst.to_path_buf(), options, progress, tx);
    });

    // The scope has joined, so every sender is gone and this terminates
    let mut tally = Tally::default();
    for level in rx {
        tally.merge(level);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        files = tally.files_copied,
        failed = tally.first_error.is_some(),
        "subtree done"
    );

    tally
}

/// Copy the files of one directory level and spawn its subdirectories.
///
/// Sends exactly one [`Tally`] for this level on `tx`, right after the
/// level ends.
fn copy_level<'scope>(
    scope: &Scope<'scope>,
    src: PathBuf,
    dst: PathBuf,
    options: &'scope CopyOptions,
    progress: &'scope ProgressSender,
    tx: Sender<Tally>,
) {
    let level = scan_level(scope, &src, &dst, options, progress, &tx);
    let _ = tx.send(level);
}

fn scan_level<'scope>(
    scope: &Scope<'scope>,
    src: &Path,
    dst: &Path,
    options: &'scope CopyOptions,
    progress: &'scope ProgressSender,
    tx: &Sender<Tally>,
) -> Tally {
    let mut level = Tally::default();

    match ensure_dir(dst) {
        Ok(true) => level.dirs_created += 1,
        Ok(false) => {}
        Err(e) => return Tally::failed(Error::destination(dst, e)),
    }

    let entries = match fs::read_dir(src) {
        Ok(entries) => entries,
        Err(e) => {
            level.first_error = Some(Error::read(src, e));
            return level;
        }
    };

    // Allocated on the first file of this level, reused by its siblings
    let mut buf: Vec<u8> = Vec::new();

    for entry in entries {
        let (name, file_type) = match entry.and_then(|e| Ok((e.file_name(), e.file_type()?))) {
            Ok(entry) => entry,
            Err(e) => {
                level.first_error = Some(Error::read(src, e));
                break;
            }
        };
        let src_path = src.join(&name);
        let dst_path = dst.join(&name);

        if file_type.is_dir() {
            let tx = tx.clone();
            scope.spawn(move |s| copy_level(s, src_path, dst_path, options, progress, tx));
            continue;
        }

        if buf.is_empty() {
            buf = vec![0; options.effective_buffer_size()];
        }
        match copy_file(&src_path, &dst_path, &mut buf) {
            Ok(bytes) => {
                progress.file_copied();
                level.files_copied += 1;
                level.bytes_copied += bytes;
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(src = %src_path.display(), error = %e, "file copy failed");
                level.first_error = Some(e);
                break;
            }
        }
    }

    level
}
