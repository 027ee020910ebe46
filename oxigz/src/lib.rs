//! # oxigz
//!
//! gzip and zlib I/O built on a DEFLATE backend (`flate2`).
//!
//! - [`codec`]: one-shot zlib compress/uncompress between byte ranges
//! - [`stream`]: low-level deflate/inflate sessions
//! - [`gzfile`]: owned gzip file handles with byte, line and buffer I/O
//! - [`session`]: scoped handles that are closed on every exit path
//! - [`pipeline`]: file-to-file `gzip` / `gunzip`
//! - [`pathname`]: `.gz` filename conventions
//! - [`config`]: pipeline configuration
//!
//! ## Example
//!
//! ```rust
//! use oxigz::{CompressionLevel, codec};
//!
//! let data = b"Hello, World! Hello, World!";
//! let packed = codec::compress_to_vec(data, CompressionLevel::BEST).unwrap();
//! let unpacked = codec::uncompress_to_vec(&packed).unwrap();
//! assert_eq!(unpacked, data);
//!
//! assert_eq!(oxigz::gzip_pathname("notes.txt"), std::path::Path::new("notes.txt.gz"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod config;
pub mod gzfile;
pub mod pathname;
pub mod pipeline;
pub mod session;
pub mod stream;

// Re-exports
pub use codec::{compress, compress_bound, compress_to_vec, uncompress, uncompress_to_vec};
pub use config::{DEFAULT_CHUNK_SIZE, PipelineConfig};
pub use gzfile::{Direction, GzFile};
pub use oxigz_core::{CompressionLevel, FlushMode, GzError, Result};
pub use pathname::{gunzip_pathname, gzip_pathname, has_gz_extension};
pub use pipeline::{Transfer, gunzip, gunzip_with, gzip, gzip_with};
pub use session::with_gz_file;
pub use stream::{DeflateStream, Format, InflateStream};
