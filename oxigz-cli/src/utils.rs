//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Create a byte-counting progress bar with standard styling.
///
/// `len` of `None` gives a spinner, used when the total is unknown.
pub fn create_progress_bar(len: Option<u64>, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    match len {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .expect("progress bar template is valid")
                    .progress_chars("█▓▒░ "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("[{elapsed_precise}] {spinner} {bytes} {msg}")
                    .expect("spinner template is valid"),
            );
            pb
        }
    }
}

/// Refuse to replace an existing destination unless forced.
pub fn check_destination(dest: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if dest.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            dest.display()
        )
        .into());
    }
    Ok(())
}

/// Size of a file on disk, or 0 if it cannot be read.
pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Compressed size as a percentage of the original.
pub fn ratio(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        0.0
    } else {
        compressed as f64 / original as f64 * 100.0
    }
}

/// Format a byte count for display.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_destination() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exists.gz");
        assert!(check_destination(&path, false).is_ok());

        std::fs::write(&path, b"x").unwrap();
        let err = check_destination(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(check_destination(&path, true).is_ok());
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(0, 20), 0.0);
        assert_eq!(ratio(200, 50), 25.0);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
