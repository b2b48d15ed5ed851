//! Top-level copy operations with progress reporting.
//!
//! Both entry points follow the same sequence:
//!
//! 1. Count the files to copy (any failure aborts before anything is written)
//! 2. Start the [`ProgressSink`] with that total
//! 3. Run a draining thread that forwards progress signals to the sink
//! 4. Copy, on a dedicated rayon pool if [`CopyOptions::parallel`] is set
//! 5. Close the progress queue once every copy task has joined
//! 6. Finish the sink and report

use crate::copy::CopyStats;
use crate::copy::tree::{Tally, copy_subtree, ensure_dir};
use crate::count::count_files;
use crate::error::{Error, Result};
use crate::options::CopyOptions;
use crate::progress::{ProgressSender, ProgressSink, drain, progress_queue};
use rayon::prelude::*;
use std::path::Path;
use std::thread;
use std::time::Instant;

/// Copy the directory `src` to `dst`, reporting progress to `sink`.
///
/// `dst` and any missing parents are created. Existing files at the
/// destination are truncated and overwritten.
///
/// # Errors
///
/// - [`Error::Read`] if `src` cannot be counted; nothing is copied and
///   the sink is never started
/// - [`Error::Incomplete`] if the copy started but some directory or file
///   failed; it carries the number of files that did get copied and the
///   first error observed. The sink is not finished in this case.
///
/// # Example
///
/// ```no_run
/// use fancopy::{copy_tree, CopyOptions, NoProgress};
/// use std::path::Path;
///
/// let options = CopyOptions::default().with_buffer_size(256 * 1024);
/// let stats = copy_tree(Path::new("data"), Path::new("backup"), &options, &NoProgress)?;
/// println!("Copied {} files", stats.files_copied);
/// # Ok::<(), fancopy::Error>(())
/// ```
pub fn copy_tree<S>(src: &Path, dst: &Path, options: &CopyOptions, sink: &S) -> Result<CopyStats>
where
    S: ProgressSink + ?Sized,
{
    let start_time = Instant::now();

    let total = count_files(src)?;
    sink.start(total);

    let tally = run_with_progress(options, sink, |progress| {
        copy_subtree(src, dst, options, progress)
    });

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        total,
        copied = tally.files_copied,
        "copy_tree finished"
    );

    let stats = into_stats(tally, start_time)?;
    sink.finish();
    Ok(stats)
}

/// Copy the contents of several directories into one destination.
///
/// The contents of every source are merged directly into `dst`. Sources are
/// copied concurrently and share one sink sized to the combined total.
/// Directories present in several sources are created once and counted
/// once. Files with the same relative path in two sources are written
/// concurrently, so the content such a file ends up with is unspecified.
///
/// # Errors
///
/// - [`Error::Read`] if any source cannot be counted; nothing is copied
/// - [`Error::Destination`] if `dst` cannot be created
/// - [`Error::Incomplete`] if one or more sources failed part way. The
///   count covers all sources; the error is the one from the failing source
///   that comes first in `sources`. The sink is still finished.
pub fn copy_multiple<P, S>(
    sources: &[P],
    dst: &Path,
    options: &CopyOptions,
    sink: &S,
) -> Result<CopyStats>
where
    P: AsRef<Path> + Sync,
    S: ProgressSink + ?Sized,
{
    let start_time = Instant::now();

    let mut total = 0;
    for source in sources {
        total += count_files(source.as_ref())?;
    }
    sink.start(total);

    let mut merged = Tally::default();
    if ensure_dir(dst).map_err(|e| Error::destination(dst, e))? {
        merged.dirs_created += 1;
    }

    let tallies: Vec<Tally> = run_with_progress(options, sink, |progress| {
        sources
            .par_iter()
            .map(|source| copy_subtree(source.as_ref(), dst, options, progress))
            .collect()
    });
    sink.finish();

    // In source order, so the first failing source provides the error
    for tally in tallies {
        merged.merge(tally);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        sources = sources.len(),
        dst = %dst.display(),
        total,
        copied = merged.files_copied,
        "copy_multiple finished"
    );

    into_stats(merged, start_time)
}

/// Run `copy` with a live progress queue drained into `sink`.
///
/// The queue is closed only after `copy` has returned, i.e. after every
/// task it spawned has joined, and the draining thread is joined before
/// this returns.
fn run_with_progress<S, R, F>(options: &CopyOptions, sink: &S, copy: F) -> R
where
    S: ProgressSink + ?Sized,
    R: Send,
    F: FnOnce(&ProgressSender) -> R + Send,
{
    let (tx, rx) = progress_queue(options.progress_capacity);

    thread::scope(|s| {
        let consumer = s.spawn(move || drain(rx, sink));

        let result = in_pool(options, || copy(&tx));

        drop(tx);
        if let Err(panic) = consumer.join() {
            std::panic::resume_unwind(panic);
        }
        result
    })
}

/// Run `op` on a dedicated pool when `options.parallel` asks for one.
fn in_pool<R, OP>(options: &CopyOptions, op: OP) -> R
where
    R: Send,
    OP: FnOnce() -> R + Send,
{
    let Some(threads) = options.parallel else {
        return op();
    };
    if threads == rayon::current_num_threads() {
        return op();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(op),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "failed to create thread pool, using global pool");
            op()
        }
    }
}

fn into_stats(tally: Tally, start_time: Instant) -> Result<CopyStats> {
    if let Some(error) = tally.first_error {
        return Err(Error::Incomplete {
            files_copied: tally.files_copied,
            source: Box::new(error),
        });
    }

    Ok(CopyStats {
        files_copied: tally.files_copied,
        dirs_created: tally.dirs_created,
        bytes_copied: tally.bytes_copied,
        duration: start_time.elapsed(),
    })
}
