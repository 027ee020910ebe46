//! Gunzip command implementation.

use super::{TransferJson, TransferOptions};
use crate::utils::{check_destination, create_progress_bar, file_size};
use log::debug;
use oxigz::{PipelineConfig, gunzip_pathname, gunzip_with};
use std::fs;
use std::path::Path;

/// Decompress each file in `files`.
///
/// `output` overrides the destination and is only accepted with one input.
pub fn cmd_gunzip(
    files: &[impl AsRef<Path>],
    output: Option<&Path>,
    options: &TransferOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if output.is_some() && files.len() > 1 {
        return Err("--output can only be used with a single input file".into());
    }

    let config = PipelineConfig::default();

    for file in files {
        let file = file.as_ref();
        let dest = output.map_or_else(|| gunzip_pathname(file), Path::to_path_buf);
        if dest != file {
            check_destination(&dest, options.force)?;
        }

        // The uncompressed size is not known up front.
        let pb = create_progress_bar(None, options.progress);
        pb.set_message(file.display().to_string());
        let transfer = gunzip_with(file, Some(&dest), &config, |n| pb.set_position(n))?;
        pb.finish_and_clear();

        let compressed_size = file_size(file);
        if !options.keep {
            debug!("removing {}", file.display());
            fs::remove_file(file)?;
        }

        TransferJson::new(
            file,
            &transfer.path,
            transfer.bytes,
            compressed_size,
            options.keep,
        )
        .print(options.json)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cmd_gzip;
    use tempfile::TempDir;

    #[test]
    fn test_gunzip_restores_and_removes_archive() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("notes.txt");
        fs::write(&src, b"line one\nline two\n").unwrap();

        cmd_gzip(&[&src], None, -1, &TransferOptions::default()).unwrap();
        let archive = dir.path().join("notes.txt.gz");
        assert!(!src.exists());

        cmd_gunzip(&[&archive], None, &TransferOptions::default()).unwrap();
        assert!(!archive.exists());
        assert_eq!(fs::read(&src).unwrap(), b"line one\nline two\n");
    }

    #[test]
    fn test_gunzip_explicit_output_keeps_archive() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("data.bin");
        fs::write(&src, vec![42u8; 10_000]).unwrap();
        cmd_gzip(&[&src], None, 1, &TransferOptions::default()).unwrap();

        let archive = dir.path().join("data.bin.gz");
        let out = dir.path().join("copy.bin");
        let keep = TransferOptions {
            keep: true,
            json: true,
            ..Default::default()
        };
        cmd_gunzip(&[&archive], Some(&out), &keep).unwrap();
        assert!(archive.exists());
        assert_eq!(fs::read(&out).unwrap(), vec![42u8; 10_000]);
    }

    #[test]
    fn test_gunzip_corrupt_keeps_source() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("bad.gz");
        fs::write(&archive, b"definitely not gzip").unwrap();

        assert!(cmd_gunzip(&[&archive], None, &TransferOptions::default()).is_err());
        assert!(archive.exists());
    }
}
