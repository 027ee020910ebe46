//! Scoped gzip sessions.
//!
//! [`with_gz_file`] opens a [`GzFile`], lends it to a closure and closes it
//! on every exit path. When the closure fails, its error is returned even if
//! closing fails too; the close error is logged. When the closure succeeds,
//! a close failure is returned.

use crate::gzfile::{Direction, GzFile};
use log::warn;
use oxigz_core::error::Result;
use oxigz_core::CompressionLevel;
use std::path::Path;

/// Run `body` with a gzip file open at `path`, closing it afterwards.
///
/// A panic inside `body` still releases the file through [`GzFile`]'s
/// `Drop`.
///
/// # Example
///
/// ```no_run
/// use oxigz::{Direction, with_gz_file};
///
/// let count = with_gz_file("log.gz", Direction::Output, None, |gz| {
///     gz.write_line("started\n")
/// })
/// .unwrap();
/// assert_eq!(count, 8);
/// ```
pub fn with_gz_file<P, T, F>(
    path: P,
    direction: Direction,
    level: Option<CompressionLevel>,
    body: F,
) -> Result<T>
where
    P: AsRef<Path>,
    F: FnOnce(&mut GzFile) -> Result<T>,
{
    let mut gz = GzFile::open(path, direction, level)?;
    let outcome = body(&mut gz);
    let closed = gz.close();

    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!(
                "error closing {} after failure ({}): {}",
                gz.path().display(),
                err,
                close_err
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigz_core::GzError;
    use tempfile::TempDir;

    #[test]
    fn test_session_closes_on_success() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ok.gz");

        let written = with_gz_file(&path, Direction::Output, Some(CompressionLevel::FAST), |gz| {
            gz.write(b"scoped", 6)
        })
        .unwrap();
        assert_eq!(written, 6);

        let text = with_gz_file(&path, Direction::Input, None, |gz| gz.read_line(64)).unwrap();
        assert_eq!(text.as_deref(), Some("scoped"));
    }

    #[test]
    fn test_session_returns_body_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fail.gz");

        let err = with_gz_file(&path, Direction::Output, None, |gz| {
            gz.write(b"partial", 7)?;
            Err::<(), _>(GzError::invalid_argument("stop here"))
        })
        .unwrap_err();
        assert!(err.to_string().contains("stop here"));

        // The handle was closed, so the partial member is complete.
        let mut buf = [0u8; 16];
        let n = with_gz_file(&path, Direction::Input, None, |gz| gz.read(&mut buf, 16)).unwrap();
        assert_eq!(&buf[..n], b"partial");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_session_close_error_surfaces() {
        let err = with_gz_file("/dev/full", Direction::Output, None, |gz| {
            gz.write(b"never fits", 10)?;
            Ok(5)
        })
        .unwrap_err();
        assert!(matches!(err, GzError::Io { .. }));
        assert_eq!(err.errno(), Some(28));
        assert!(err.to_string().contains("cannot close"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_session_body_error_wins_over_close() {
        let err = with_gz_file("/dev/full", Direction::Output, None, |gz| {
            gz.write(b"never fits", 10)?;
            Err::<(), _>(GzError::invalid_argument("body failed"))
        })
        .unwrap_err();
        assert!(matches!(err, GzError::InvalidArgument { .. }));
        assert!(err.to_string().contains("body failed"));
    }

    #[test]
    fn test_session_open_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.gz");
        let mut called = false;

        let result = with_gz_file(&path, Direction::Input, None, |_| {
            called = true;
            Ok(())
        });
        assert!(matches!(result, Err(GzError::Io { .. })));
        assert!(!called);
    }

    #[test]
    fn test_session_body_may_close_early() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("early.gz");

        with_gz_file(&path, Direction::Output, None, |gz| {
            gz.write_byte(b'z')?;
            gz.close()
        })
        .unwrap();

        let byte = with_gz_file(&path, Direction::Input, None, |gz| gz.read_byte()).unwrap();
        assert_eq!(byte, Some(b'z'));
    }
}
