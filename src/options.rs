//! Configuration options for copy operations.
//!
//! # Example
//!
//! ```
//! use fancopy::CopyOptions;
//!
//! let options = CopyOptions::default()
//!     .with_buffer_size(256 * 1024)
//!     .with_parallel(8);
//! assert_eq!(options.effective_buffer_size(), 256 * 1024);
//! ```

/// Default transfer buffer size (1 MiB).
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Default number of progress signals that may be queued before copying
/// tasks block on the progress consumer.
pub const DEFAULT_PROGRESS_CAPACITY: usize = 64;

/// Options for copy operations.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `buffer_size` | 0 (1 MiB) | Bytes per transfer chunk |
/// | `parallel` | `None` | Use rayon's global pool |
/// | `progress_capacity` | 64 | Queued progress signals |
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CopyOptions {
    /// Bytes per transfer chunk. `0` selects [`DEFAULT_BUFFER_SIZE`].
    pub buffer_size: usize,

    /// Worker threads for subtree copies.
    ///
    /// `None` runs on rayon's global pool. `Some(n)` builds a dedicated
    /// pool of `n` threads for the duration of one copy.
    pub parallel: Option<usize>,

    /// Capacity of the progress queue between copying tasks and the
    /// progress consumer. `0` makes every signal a rendezvous.
    pub progress_capacity: usize,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            buffer_size: 0,
            parallel: None,
            progress_capacity: DEFAULT_PROGRESS_CAPACITY,
        }
    }
}

impl CopyOptions {
    /// Set the transfer buffer size in bytes (`0` restores the default)
    #[must_use]
    pub fn with_buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }

    /// Set the number of worker threads
    ///
    /// Value is clamped to at least 1 to prevent panics.
    #[must_use]
    pub fn with_parallel(mut self, n: usize) -> Self {
        self.parallel = Some(n.max(1));
        self
    }

    /// Set the progress queue capacity
    #[must_use]
    pub fn with_progress_capacity(mut self, capacity: usize) -> Self {
        self.progress_capacity = capacity;
        self
    }

    /// Buffer size actually used for transfers.
    pub fn effective_buffer_size(&self) -> usize {
        if self.buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            self.buffer_size
        }
    }
}
