//! File-to-file gzip and gunzip.
//!
//! Both directions copy through a fixed-size buffer: [`gzip`] reads a plain
//! file and writes a gzip file, [`gunzip`] does the reverse. The output path
//! defaults to the name given by the [`pathname`](crate::pathname) rules,
//! and an output path equal to the input path is refused.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let packed = oxigz::gzip(Path::new("report.csv"), None).unwrap();
//! assert_eq!(packed.path, Path::new("report.csv.gz"));
//!
//! let unpacked = oxigz::gunzip(&packed.path, Some(Path::new("copy.csv"))).unwrap();
//! assert_eq!(unpacked.bytes, packed.bytes);
//! ```

use crate::config::PipelineConfig;
use crate::gzfile::Direction;
use crate::pathname::{gunzip_pathname, gzip_pathname};
use crate::session::with_gz_file;
use log::info;
use oxigz_core::error::{GzError, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Path the output was written to.
    pub path: PathBuf,
    /// Uncompressed bytes moved.
    pub bytes: u64,
}

/// Compress `in_path` into a gzip file.
///
/// Writes to `out_path`, or to `in_path` with `.gz` appended.
pub fn gzip(in_path: &Path, out_path: Option<&Path>) -> Result<Transfer> {
    gzip_with(in_path, out_path, &PipelineConfig::default(), |_| {})
}

/// Decompress the gzip file `in_path`.
///
/// Writes to `out_path`, or to `in_path` without its `.gz`.
pub fn gunzip(in_path: &Path, out_path: Option<&Path>) -> Result<Transfer> {
    gunzip_with(in_path, out_path, &PipelineConfig::default(), |_| {})
}

/// [`gzip`] with an explicit configuration.
///
/// `progress` is called after every chunk with the running byte total.
pub fn gzip_with<F>(
    in_path: &Path,
    out_path: Option<&Path>,
    config: &PipelineConfig,
    mut progress: F,
) -> Result<Transfer>
where
    F: FnMut(u64),
{
    config.validate()?;
    let out_path = resolve_output(in_path, out_path, |p| gzip_pathname(p))?;

    let mut input = File::open(in_path)
        .map_err(|e| GzError::io_context(format!("cannot open {}", in_path.display()), &e))?;
    let mut buffer = vec![0u8; config.chunk_size];

    let bytes = with_gz_file(&out_path, Direction::Output, Some(config.level), |gz| {
        let mut total = 0u64;
        loop {
            let n = read_chunk(&mut input, &mut buffer)
                .map_err(|e| GzError::io_context(format!("cannot read {}", in_path.display()), &e))?;
            if n == 0 {
                break;
            }
            gz.write(&buffer, n)?;
            total += n as u64;
            progress(total);
        }
        Ok(total)
    })?;

    info!(
        "compressed {} -> {} ({} bytes)",
        in_path.display(),
        out_path.display(),
        bytes
    );
    Ok(Transfer {
        path: out_path,
        bytes,
    })
}

/// [`gunzip`] with an explicit configuration.
///
/// `progress` is called after every chunk with the running byte total.
pub fn gunzip_with<F>(
    in_path: &Path,
    out_path: Option<&Path>,
    config: &PipelineConfig,
    mut progress: F,
) -> Result<Transfer>
where
    F: FnMut(u64),
{
    config.validate()?;
    let out_path = resolve_output(in_path, out_path, |p| gunzip_pathname(p))?;
    let mut buffer = vec![0u8; config.chunk_size];

    let bytes = with_gz_file(in_path, Direction::Input, None, |gz| {
        let write_err =
            |e: io::Error| GzError::io_context(format!("cannot write {}", out_path.display()), &e);

        let mut output = File::create(&out_path).map_err(write_err)?;
        let mut total = 0u64;
        while !gz.eof() {
            let n = gz.read(&mut buffer, config.chunk_size)?;
            if n > 0 {
                output.write_all(&buffer[..n]).map_err(write_err)?;
                total += n as u64;
                progress(total);
            }
        }
        output.flush().map_err(write_err)?;
        Ok(total)
    })?;

    info!(
        "decompressed {} -> {} ({} bytes)",
        in_path.display(),
        out_path.display(),
        bytes
    );
    Ok(Transfer {
        path: out_path,
        bytes,
    })
}

/// Pick the output path and refuse to overwrite the input.
fn resolve_output(
    in_path: &Path,
    out_path: Option<&Path>,
    derive: impl Fn(&Path) -> PathBuf,
) -> Result<PathBuf> {
    let out_path = match out_path {
        Some(path) => path.to_path_buf(),
        None => derive(in_path),
    };

    let same = out_path == in_path
        || matches!(
            (in_path.canonicalize(), out_path.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        return Err(GzError::invalid_argument(format!(
            "input and output are the same file: {}",
            in_path.display()
        )));
    }

    Ok(out_path)
}

/// Read into `buf`, retrying interrupted reads.
fn read_chunk(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_output_default_names() {
        let out = resolve_output(Path::new("a.txt"), None, |p| gzip_pathname(p)).unwrap();
        assert_eq!(out, PathBuf::from("a.txt.gz"));
        let out = resolve_output(Path::new("a.txt.gz"), None, |p| gunzip_pathname(p)).unwrap();
        assert_eq!(out, PathBuf::from("a.txt"));
    }

    #[test]
    fn test_resolve_output_same_path() {
        let err = resolve_output(Path::new("x.gz"), None, |p| gzip_pathname(p)).unwrap_err();
        assert!(matches!(err, GzError::InvalidArgument { .. }));
        let err = resolve_output(Path::new("x"), None, |p| gunzip_pathname(p)).unwrap_err();
        assert!(matches!(err, GzError::InvalidArgument { .. }));
    }

    #[test]
    fn test_resolve_output_same_file_different_spelling() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"data").unwrap();
        let alias = dir.path().join(".").join("data.bin");

        let err = resolve_output(&path, Some(&alias), |p| gzip_pathname(p)).unwrap_err();
        assert!(matches!(err, GzError::InvalidArgument { .. }));
    }

    #[test]
    fn test_progress_reports_running_total() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("chunks.bin");
        std::fs::write(&input, vec![7u8; 2500]).unwrap();

        let config = PipelineConfig::default().with_chunk_size(1000);
        let mut seen = Vec::new();
        let transfer = gzip_with(&input, None, &config, |n| seen.push(n)).unwrap();
        assert_eq!(transfer.bytes, 2500);
        assert_eq!(seen, vec![1000, 2000, 2500]);

        let mut seen = Vec::new();
        let out = dir.path().join("chunks.out");
        let transfer = gunzip_with(&transfer.path, Some(&out), &config, |n| seen.push(n)).unwrap();
        assert_eq!(transfer.bytes, 2500);
        assert_eq!(seen, vec![1000, 2000, 2500]);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = PipelineConfig::default().with_chunk_size(0);
        let err = gzip_with(Path::new("whatever"), None, &config, |_| {}).unwrap_err();
        assert!(matches!(err, GzError::InvalidArgument { .. }));
    }
}
