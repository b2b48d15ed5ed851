//! # fancopy
//!
//! Recursive directory copying with concurrent subtree fan-out and
//! per-file progress reporting.
//!
//! ## Core Features
//!
//! - **Concurrent fan-out**: every subdirectory is copied as its own rayon
//!   task; files within one directory are copied in order by that task
//! - **Accurate progress**: a counting pass sizes the total before any byte
//!   is written, and each copied file sends exactly one progress signal
//! - **Partial results survive errors**: a failed copy still reports how
//!   many files made it, alongside the first error observed
//! - **Configurable buffer**: files are streamed through a fixed-size
//!   buffer (1 MiB by default)
//! - **Several sources, one destination**: [`copy_multiple`] merges the
//!   contents of many trees into one directory under a single progress total
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use fancopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("backup").source("project").run()?;
//! println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
//! # Ok::<(), fancopy::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use fancopy::{copy_tree, count_files, CopyOptions, NoProgress};
//! use std::path::Path;
//!
//! let total = count_files(Path::new("src"))?;
//! let options = CopyOptions::default()
//!     .with_parallel(8)
//!     .with_buffer_size(64 * 1024);
//!
//! let stats = copy_tree(Path::new("src"), Path::new("dst"), &options, &NoProgress)?;
//! assert_eq!(stats.files_copied, total);
//! # Ok::<(), fancopy::Error>(())
//! ```
//!
//! ## Failure Semantics
//!
//! A file that fails to copy stops the remaining files of its directory,
//! but subdirectories already being copied run to completion. The call
//! then returns [`Error::Incomplete`] with the number of files actually
//! copied; files that were copied stay at the destination.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | [`ProgressSink`] for `indicatif::ProgressBar` and `create_progress_bar` |
//! | `tracing` | Debug and warning events via the tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod count;
mod error;
mod options;
mod orchestrator;
mod progress;

pub use builder::CopyBuilder;
pub use copy::CopyStats;
pub use count::count_files;
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use options::{CopyOptions, DEFAULT_BUFFER_SIZE, DEFAULT_PROGRESS_CAPACITY};
pub use orchestrator::{copy_multiple, copy_tree};
pub use progress::{NoProgress, ProgressSink};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_progress_bar;
