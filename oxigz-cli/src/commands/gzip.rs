//! Gzip command implementation.

use super::{TransferJson, TransferOptions};
use crate::utils::{check_destination, create_progress_bar, file_size};
use log::{debug, warn};
use oxigz::{CompressionLevel, PipelineConfig, gzip_pathname, gzip_with, has_gz_extension};
use std::fs;
use std::path::Path;

/// Compress each file in `files`.
///
/// `output` overrides the destination and is only accepted with one input.
/// Without `output`, inputs already ending in `.gz` are skipped.
pub fn cmd_gzip(
    files: &[impl AsRef<Path>],
    output: Option<&Path>,
    level: i32,
    options: &TransferOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if output.is_some() && files.len() > 1 {
        return Err("--output can only be used with a single input file".into());
    }

    let level = CompressionLevel::new(level)?;
    let config = PipelineConfig::default().with_level(level);

    for file in files {
        let file = file.as_ref();
        if output.is_none() && has_gz_extension(file) {
            warn!("{} already has .gz suffix, skipping", file.display());
            continue;
        }

        let dest = output.map_or_else(|| gzip_pathname(file), Path::to_path_buf);
        if dest != file {
            check_destination(&dest, options.force)?;
        }

        let pb = create_progress_bar(Some(file_size(file)), options.progress);
        pb.set_message(file.display().to_string());
        let transfer = gzip_with(file, Some(&dest), &config, |n| pb.set_position(n))?;
        pb.finish_and_clear();

        if !options.keep {
            debug!("removing {}", file.display());
            fs::remove_file(file)?;
        }

        TransferJson::new(
            file,
            &transfer.path,
            transfer.bytes,
            file_size(&transfer.path),
            options.keep,
        )
        .print(options.json)?;
    }

    Ok(())
}
