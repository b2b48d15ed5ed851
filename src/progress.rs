//! Progress reporting.
//!
//! Copying tasks never talk to a sink directly. Each copied file produces
//! one unit signal on a bounded queue, and a single consumer owned by the
//! orchestrator turns signals into [`ProgressSink::advance`] calls.

use std::sync::mpsc::{self, Receiver, SyncSender};

/// Receiver of copy progress.
///
/// Implementations only need shared access; the orchestrator calls
/// [`start`](ProgressSink::start) once, then [`advance`](ProgressSink::advance)
/// from a background thread once per copied file, then
/// [`finish`](ProgressSink::finish) only if the copy succeeded.
pub trait ProgressSink: Send + Sync {
    /// Set the number of files expected.
    fn start(&self, total: u64);

    /// One more file finished copying.
    fn advance(&self);

    /// Mark the copy as complete.
    fn finish(&self);
}

/// A sink that ignores all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&self, _total: u64) {}
    fn advance(&self) {}
    fn finish(&self) {}
}

impl<S: ProgressSink + ?Sized> ProgressSink for &S {
    fn start(&self, total: u64) {
        (**self).start(total);
    }

    fn advance(&self) {
        (**self).advance();
    }

    fn finish(&self) {
        (**self).finish();
    }
}

/// Sending half of the progress queue.
///
/// Deliberately not `Clone` and without a close operation: copying code
/// only ever borrows it, and the queue closes when the orchestrator drops
/// its one owned value.
#[derive(Debug)]
pub(crate) struct ProgressSender {
    tx: SyncSender<()>,
}

impl ProgressSender {
    /// Report one copied file, blocking while the queue is full.
    pub(crate) fn file_copied(&self) {
        // The receiver only goes away after every sender is dropped.
        let _ = self.tx.send(());
    }
}

/// Create the progress queue with the given capacity.
pub(crate) fn progress_queue(capacity: usize) -> (ProgressSender, Receiver<()>) {
    let (tx, rx) = mpsc::sync_channel(capacity);
    (ProgressSender { tx }, rx)
}

/// Forward every signal to `sink` until the queue is closed and empty.
pub(crate) fn drain<S: ProgressSink + ?Sized>(rx: Receiver<()>, sink: &S) -> u64 {
    let mut received = 0;
    for () in rx {
        sink.advance();
        received += 1;
    }
    received
}

#[cfg(feature = "progress")]
mod bar {
    use super::ProgressSink;
    use indicatif::{ProgressBar, ProgressStyle};

    impl ProgressSink for ProgressBar {
        fn start(&self, total: u64) {
            self.set_length(total);
        }

        fn advance(&self) {
            self.inc(1);
        }

        fn finish(&self) {
            ProgressBar::finish(self);
        }
    }

    /// Create a default progress bar for file copying
    #[must_use]
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("Copying files: [{bar:50.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb
    }
}

#[cfg(feature = "progress")]
pub use bar::create_progress_bar;
