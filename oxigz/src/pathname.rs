//! `.gz` filename conventions.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension marking a gzip-compressed file.
pub const GZ_EXTENSION: &str = "gz";

/// Whether `path` ends in a `.gz` extension.
pub fn has_gz_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext == GZ_EXTENSION)
}

/// Name of the compressed file for `path`.
///
/// Appends `.gz` to the full file name, keeping any existing extension
/// (`foo.tar` becomes `foo.tar.gz`). A path already ending in `.gz` is
/// returned unchanged.
pub fn gzip_pathname(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if has_gz_extension(path) {
        return path.to_path_buf();
    }

    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(GZ_EXTENSION);
    PathBuf::from(name)
}

/// Name of the decompressed file for `path`.
///
/// Strips a trailing `.gz` (`foo.tar.gz` becomes `foo.tar`, `foo.gz`
/// becomes `foo`). Any other path is returned unchanged.
pub fn gunzip_pathname(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if has_gz_extension(path) {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_pathname() {
        assert_eq!(gzip_pathname("foo.tar"), PathBuf::from("foo.tar.gz"));
        assert_eq!(gzip_pathname("foo"), PathBuf::from("foo.gz"));
        assert_eq!(gzip_pathname("foo.gz"), PathBuf::from("foo.gz"));
        assert_eq!(gzip_pathname("dir.d/data"), PathBuf::from("dir.d/data.gz"));
        assert_eq!(gzip_pathname(".profile"), PathBuf::from(".profile.gz"));
    }

    #[test]
    fn test_gunzip_pathname() {
        assert_eq!(gunzip_pathname("foo.tar.gz"), PathBuf::from("foo.tar"));
        assert_eq!(gunzip_pathname("foo.gz"), PathBuf::from("foo"));
        assert_eq!(gunzip_pathname("foo.tar"), PathBuf::from("foo.tar"));
        assert_eq!(gunzip_pathname("foo"), PathBuf::from("foo"));
        assert_eq!(gunzip_pathname("a/b.c/d.gz"), PathBuf::from("a/b.c/d"));
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        assert!(!has_gz_extension("foo.GZ"));
        assert_eq!(gzip_pathname("foo.GZ"), PathBuf::from("foo.GZ.gz"));
    }

    #[test]
    fn test_idempotent() {
        for p in ["foo", "foo.tar", "foo.gz", "foo.tar.gz", "a/b.c/d", ".hidden"] {
            let once = gzip_pathname(p);
            assert_eq!(gzip_pathname(&once), once);
            let once = gunzip_pathname(p);
            assert_eq!(gunzip_pathname(&once), once, "{p}");
        }
    }

    #[test]
    fn test_inverse() {
        for p in ["foo", "foo.tar", "a/b.c/d", ".hidden", "x.tar.bz2"] {
            assert_eq!(gunzip_pathname(gzip_pathname(p)), PathBuf::from(p));
        }
    }
}
