//! Command implementations for the oxigz CLI.

pub mod cat;
pub mod gunzip;
pub mod gzip;

pub use cat::cmd_cat;
pub use gunzip::cmd_gunzip;
pub use gzip::cmd_gzip;
pub use test::cmd_test;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Flags shared by `gzip` and `gunzip`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferOptions {
    /// Keep the source file after a successful transfer.
    pub keep: bool,
    /// Overwrite an existing destination.
    pub force: bool,
    /// Print one JSON object per file instead of a text line.
    pub json: bool,
    /// Show a progress bar while copying.
    pub progress: bool,
}

/// JSON report for one transferred file.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransferJson {
    /// Path that was read.
    pub input: String,
    /// Path that was written.
    pub output: String,
    /// Uncompressed bytes.
    pub size: u64,
    /// Size of the gzip file on disk.
    pub compressed_size: u64,
    /// Compressed size as a percentage of `size`.
    pub ratio: f64,
    /// Whether the source file was left in place.
    pub kept: bool,
}

impl TransferJson {
    /// Build a report, computing the ratio from the two sizes.
    pub fn new(input: &Path, output: &Path, size: u64, compressed_size: u64, kept: bool) -> Self {
        Self {
            input: input.display().to_string(),
            output: output.display().to_string(),
            size,
            compressed_size,
            ratio: crate::utils::ratio(size, compressed_size),
            kept,
        }
    }

    /// Print as JSON or as a human-readable line.
    pub fn print(&self, json: bool) -> Result<(), Box<dyn std::error::Error>> {
        if json {
            println!("{}", serde_json::to_string(self)?);
        } else {
            println!(
                "{} -> {} ({} / {}, {:.1}%)",
                self.input,
                self.output,
                crate::utils::format_size(self.size),
                crate::utils::format_size(self.compressed_size),
                self.ratio
            );
        }
        Ok(())
    }
}
