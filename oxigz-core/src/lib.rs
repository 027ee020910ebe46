//! # oxigz Core
//!
//! Core components shared by the oxigz crates:
//!
//! - [`error`]: Error types and zlib status codes
//! - [`range`]: Validated byte ranges for buffer codec calls
//! - [`traits`]: Streaming codec traits, compression levels and flush modes
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     oxigz gzip / gunzip / test / cat                    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Pipeline                                                │
//! │     file-to-file gzip/gunzip, filename policy           │
//! ├─────────────────────────────────────────────────────────┤
//! │ Streams                                                 │
//! │     GzFile handle, scoped sessions, buffer codec        │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     errors, levels, ranges, codec traits                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxigz_core::{ByteRange, CompressionLevel};
//!
//! let level = CompressionLevel::new(9).unwrap();
//! assert_eq!(level.effective(), 9);
//! assert!(CompressionLevel::new(10).is_err());
//!
//! let range = ByteRange::resolve(2..6, 8, "source").unwrap();
//! assert_eq!(range.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod range;
pub mod traits;

// Re-exports for convenience
pub use error::{GzError, Result};
pub use range::ByteRange;
pub use traits::{
    CompressStatus, CompressionLevel, Compressor, DecompressStatus, Decompressor, FlushMode,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{GzError, Result};
    pub use crate::range::ByteRange;
    pub use crate::traits::{CompressionLevel, Compressor, Decompressor, FlushMode};
}
