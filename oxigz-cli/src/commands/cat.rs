//! Cat command implementation.

use oxigz::{DEFAULT_CHUNK_SIZE, Direction, GzError, with_gz_file};
use std::io::{self, ErrorKind, Write};
use std::path::Path;

/// Decompress each file in `files` to `out`.
///
/// Stops quietly once the reader on the other end of `out` goes away.
fn cat_to(files: &[impl AsRef<Path>], out: &mut impl Write) -> oxigz::Result<()> {
    let mut buffer = vec![0u8; DEFAULT_CHUNK_SIZE];
    let mut reader_gone = false;

    for file in files {
        with_gz_file(file.as_ref(), Direction::Input, None, |gz| {
            while !gz.eof() {
                let n = gz.read(&mut buffer, DEFAULT_CHUNK_SIZE)?;
                match out.write_all(&buffer[..n]) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                        reader_gone = true;
                        break;
                    }
                    Err(e) => return Err(GzError::io_context("cannot write output", &e)),
                }
            }
            Ok(())
        })?;
        if reader_gone {
            return Ok(());
        }
    }

    match out.flush() {
        Err(e) if e.kind() != ErrorKind::BrokenPipe => {
            Err(GzError::io_context("cannot write output", &e))
        }
        _ => Ok(()),
    }
}

/// Decompress each file in `files` to stdout.
pub fn cmd_cat(files: &[impl AsRef<Path>]) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    cat_to(files, &mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigz::GzFile;
    use tempfile::TempDir;

    fn write_gz(path: &Path, text: &str) {
        let mut gz = GzFile::open(path, Direction::Output, None).unwrap();
        gz.write_line(text).unwrap();
        gz.close().unwrap();
    }

    #[test]
    fn test_cat_concatenates_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.gz");
        let b = dir.path().join("b.gz");
        write_gz(&a, "first\n");
        write_gz(&b, "second\n");

        let mut out = Vec::new();
        cat_to(&[&a, &b], &mut out).unwrap();
        assert_eq!(out, b"first\nsecond\n");
    }

    #[test]
    fn test_cat_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let err = cat_to(&[dir.path().join("nope.gz")], &mut out).unwrap_err();
        assert!(matches!(err, GzError::Io { .. }));
    }
}
