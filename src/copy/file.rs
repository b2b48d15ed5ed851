//! Single file copy step.
//!
//! Files are copied with a plain read/write loop through a caller-provided
//! buffer, so the chunk size is exactly [`CopyOptions::buffer_size`].
//!
//! [`CopyOptions::buffer_size`]: crate::CopyOptions::buffer_size

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Copy everything from `reader` into `writer` through `buf`.
///
/// Returns the number of bytes written. Interrupted reads are retried;
/// any other read or write error stops the transfer.
pub(crate) fn transfer<R, W>(reader: &mut R, writer: &mut W, buf: &mut [u8]) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut written: u64 = 0;
    loop {
        let n = match reader.read(buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        written += n as u64;
    }
    writer.flush()?;
    Ok(written)
}

/// Copy the file at `src` to `dst`, creating or truncating `dst`.
///
/// Both handles are closed when this returns, whatever the outcome.
/// Returns the number of bytes copied.
///
/// # Errors
///
/// - [`Error::SourceOpen`] if `src` cannot be opened
/// - [`Error::DestinationOpen`] if `dst` cannot be created
/// - [`Error::Transfer`] if reading or writing fails part way
pub(crate) fn copy_file(src: &Path, dst: &Path, buf: &mut [u8]) -> Result<u64> {
    let mut src_file = File::open(src).map_err(|source| Error::SourceOpen {
        path: src.to_path_buf(),
        source,
    })?;

    // src_file is dropped on this path too
    let mut dst_file = File::create(dst).map_err(|source| Error::DestinationOpen {
        path: dst.to_path_buf(),
        source,
    })?;

    transfer(&mut src_file, &mut dst_file, buf).map_err(|source| Error::Transfer {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })
}
