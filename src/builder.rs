//! Builder API for ergonomic copying operations.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use fancopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("dst").source("src").run()?;
//! println!("Copied {} files", stats.files_copied);
//! # Ok::<(), fancopy::Error>(())
//! ```
//!
//! ## Several Sources
//!
//! ```no_run
//! use fancopy::CopyBuilder;
//!
//! // Contents of both directories are merged into `merged`
//! let stats = CopyBuilder::new("merged")
//!     .sources(["assets", "generated"])
//!     .parallel(8)
//!     .buffer_size(256 * 1024)
//!     .run()?;
//! # Ok::<(), fancopy::Error>(())
//! ```

use crate::copy::CopyStats;
use crate::error::{Error, Result};
use crate::options::CopyOptions;
use crate::orchestrator::{copy_multiple, copy_tree};
use crate::progress::{NoProgress, ProgressSink};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing copy operations.
///
/// With one source this runs [`copy_tree`]; with several it runs
/// [`copy_multiple`].
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    sources: Vec<PathBuf>,
    dst: PathBuf,
    options: CopyOptions,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` copying into `dst` with default options.
    pub fn new<P: AsRef<Path>>(dst: P) -> Self {
        Self {
            sources: Vec::new(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
        }
    }

    /// Add a source directory.
    #[must_use]
    pub fn source<P: AsRef<Path>>(mut self, src: P) -> Self {
        self.sources.push(src.as_ref().to_path_buf());
        self
    }

    /// Add several source directories.
    #[must_use]
    pub fn sources<I, P>(mut self, srcs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.sources
            .extend(srcs.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Set the transfer buffer size in bytes (0 = 1 MiB).
    #[must_use]
    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.options = self.options.with_buffer_size(bytes);
        self
    }

    /// Set the number of worker threads.
    #[must_use]
    pub fn parallel(mut self, threads: usize) -> Self {
        self.options = self.options.with_parallel(threads);
        self
    }

    /// Set how many progress signals may queue up before copying blocks.
    #[must_use]
    pub fn progress_capacity(mut self, capacity: usize) -> Self {
        self.options = self.options.with_progress_capacity(capacity);
        self
    }

    /// Replace all options at once.
    #[must_use]
    pub fn options(mut self, options: CopyOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the configured options.
    pub fn get_options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy without progress reporting.
    ///
    /// # Errors
    ///
    /// [`Error::NoSources`] if no source was added, otherwise whatever
    /// [`copy_tree`] or [`copy_multiple`] returns.
    pub fn run(self) -> Result<CopyStats> {
        self.run_with_progress(&NoProgress)
    }

    /// Execute the copy, reporting progress to `sink`.
    ///
    /// # Errors
    ///
    /// Same as [`CopyBuilder::run`].
    pub fn run_with_progress<S: ProgressSink + ?Sized>(self, sink: &S) -> Result<CopyStats> {
        match self.sources.as_slice() {
            [] => Err(Error::NoSources),
            [single] => copy_tree(single, &self.dst, &self.options, sink),
            many => copy_multiple(many, &self.dst, &self.options, sink),
        }
    }
}
