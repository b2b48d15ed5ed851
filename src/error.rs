//! Error types for fancopy.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur while counting or copying, the [`ErrorCode`] used for
//! machine-readable reporting, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Directory | [`Error::Read`], [`Error::Destination`] |
//! | File | [`Error::SourceOpen`], [`Error::DestinationOpen`], [`Error::Transfer`] |
//! | Partial | [`Error::Incomplete`] |
//! | Usage | [`Error::NoSources`] |

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for fancopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use fancopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Errors that can occur during count and copy operations.
///
/// Every filesystem error carries the path it happened on and keeps the
/// underlying [`io::Error`] reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Listing a directory failed
    #[error("Failed to read directory {path}: {source}")]
    Read {
        /// Directory that could not be listed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Creating a destination directory failed
    #[error("Failed to create directory {path}: {source}")]
    Destination {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Opening a source file for reading failed
    #[error("Failed to open source file {path}: {source}")]
    SourceOpen {
        /// Source file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Creating a destination file for writing failed
    #[error("Failed to create destination file {path}: {source}")]
    DestinationOpen {
        /// Destination file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Transferring bytes between two open files failed
    #[error("Failed to copy {src} to {dst}: {source}")]
    Transfer {
        /// Source file path
        src: PathBuf,
        /// Destination file path
        dst: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The copy started but did not finish.
    ///
    /// `files_copied` is the number of files that were fully written
    /// before and concurrently with the failure. Those files are left in
    /// place at the destination.
    #[error("Copy incomplete after {files_copied} files: {source}")]
    Incomplete {
        /// Files successfully copied anyway
        files_copied: u64,
        /// The first error encountered
        #[source]
        source: Box<Error>,
    },

    /// A copy was requested without any source
    #[error("No source paths given")]
    NoSources,
}

impl Error {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn destination(path: &Path, source: io::Error) -> Self {
        Self::Destination {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Number of files that were copied before this error was returned.
    ///
    /// Errors raised before any copying started report 0.
    pub fn files_copied(&self) -> u64 {
        match self {
            Self::Incomplete { files_copied, .. } => *files_copied,
            _ => 0,
        }
    }

    /// The underlying IO error, looking through [`Error::Incomplete`].
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Read { source, .. }
            | Self::Destination { source, .. }
            | Self::SourceOpen { source, .. }
            | Self::DestinationOpen { source, .. }
            | Self::Transfer { source, .. } => Some(source),
            Self::Incomplete { source, .. } => source.io_error(),
            Self::NoSources => None,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        if let Some(io_err) = self.io_error() {
            if is_no_space_error(io_err) {
                return ErrorCode::NoSpace;
            }
            if io_err.kind() == io::ErrorKind::PermissionDenied {
                return ErrorCode::PermissionDenied;
            }
        }
        match self {
            Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ErrorCode::SourceNotFound
            }
            Self::Read { .. } => ErrorCode::ReadFailed,
            Self::Destination { .. } => ErrorCode::DestinationFailed,
            Self::SourceOpen { .. } => ErrorCode::SourceOpenFailed,
            Self::DestinationOpen { .. } => ErrorCode::DestinationOpenFailed,
            Self::Transfer { .. } => ErrorCode::TransferFailed,
            Self::Incomplete { source, .. } => source.code(),
            Self::NoSources => ErrorCode::InvalidInput,
        }
    }
}

/// Machine-readable error classification.
///
/// The string form (see [`ErrorCode::as_str`]) is stable and is what the
/// `fcp` command prints in its JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A directory could not be listed
    ReadFailed,
    /// A destination directory could not be created
    DestinationFailed,
    /// A source file could not be opened
    SourceOpenFailed,
    /// A destination file could not be created
    DestinationOpenFailed,
    /// Copying file content failed
    TransferFailed,
    /// Destination ran out of space
    NoSpace,
    /// Permission denied on source or destination
    PermissionDenied,
    /// Source path does not exist
    SourceNotFound,
    /// Bad arguments
    InvalidInput,
    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadFailed => "read_failed",
            Self::DestinationFailed => "destination_failed",
            Self::SourceOpenFailed => "source_open_failed",
            Self::DestinationOpenFailed => "destination_open_failed",
            Self::TransferFailed => "transfer_failed",
            Self::NoSpace => "no_space",
            Self::PermissionDenied => "permission_denied",
            Self::SourceNotFound => "source_not_found",
            Self::InvalidInput => "invalid_input",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
