//! Core traits and parameter types for compression operations.
//!
//! This module defines the streaming codec traits and the small value types
//! (compression level, flush mode) shared by every layer.

use crate::error::{GzError, Result};
use std::fmt;

/// Status of a streaming decompression operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressStatus {
    /// More input is needed to continue decompression.
    NeedsInput,
    /// More output buffer space is needed.
    NeedsOutput,
    /// Decompression is complete.
    Done,
}

/// Status of a streaming compression operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressStatus {
    /// More input data can be accepted.
    NeedsInput,
    /// More output buffer space is needed.
    NeedsOutput,
    /// Compression is complete.
    Done,
}

/// Flush mode for compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// No flush - buffer data for best compression.
    #[default]
    None,
    /// Sync flush - emit all pending output.
    Sync,
    /// Full flush - emit and reset encoder state.
    Full,
    /// Finish - complete the stream.
    Finish,
}

/// A streaming decompressor (decoder).
pub trait Decompressor {
    /// Decompress data from input to output.
    ///
    /// # Returns
    ///
    /// A tuple of (bytes consumed from input, bytes written to output, status)
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecompressStatus)>;

    /// Reset the decompressor to its initial state.
    fn reset(&mut self);

    /// Check if the decompressor has finished.
    fn is_finished(&self) -> bool;

    /// Decompress all data at once (convenience method).
    ///
    /// Fails with a data error if the input ends before the stream does.
    fn decompress_all(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut input_pos = 0;
        let mut buffer = vec![0u8; 32768];

        loop {
            let (consumed, produced, status) = self.decompress(&input[input_pos..], &mut buffer)?;

            input_pos += consumed;
            output.extend_from_slice(&buffer[..produced]);

            match status {
                DecompressStatus::Done => break,
                DecompressStatus::NeedsInput if input_pos >= input.len() => {
                    return Err(GzError::zlib(crate::error::Z_DATA_ERROR));
                }
                DecompressStatus::NeedsOutput | DecompressStatus::NeedsInput => continue,
            }
        }

        Ok(output)
    }
}

/// A streaming compressor (encoder).
pub trait Compressor {
    /// Compress data from input to output.
    ///
    /// # Returns
    ///
    /// A tuple of (bytes consumed from input, bytes written to output, status)
    fn compress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<(usize, usize, CompressStatus)>;

    /// Reset the compressor to its initial state.
    fn reset(&mut self);

    /// Check if the compressor has finished.
    fn is_finished(&self) -> bool;

    /// Compress all data at once (convenience method).
    fn compress_all(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut input_pos = 0;
        let mut buffer = vec![0u8; 32768];

        loop {
            let (consumed, produced, status) =
                self.compress(&input[input_pos..], &mut buffer, FlushMode::Finish)?;

            input_pos += consumed;
            output.extend_from_slice(&buffer[..produced]);

            if status == CompressStatus::Done {
                break;
            }
            if consumed == 0 && produced == 0 {
                return Err(GzError::zlib(crate::error::Z_BUF_ERROR));
            }
        }

        Ok(output)
    }
}

/// Compression level: 0-9, or the library default.
///
/// Unlike a clamped level, construction from an integer rejects anything
/// outside `-1..=9`, where `-1` selects the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionLevel(i8);

impl CompressionLevel {
    /// No compression (store only).
    pub const NONE: Self = Self(0);
    /// Fastest compression.
    pub const FAST: Self = Self(1);
    /// Library default (currently equivalent to level 6).
    pub const DEFAULT: Self = Self(-1);
    /// Best compression (slowest).
    pub const BEST: Self = Self(9);

    /// Raw value used for the default sentinel.
    pub const DEFAULT_VALUE: i32 = -1;

    /// Level the default sentinel resolves to.
    const DEFAULT_EFFECTIVE: u32 = 6;

    /// Create a compression level, rejecting values outside 0-9 and the
    /// default sentinel `-1`.
    pub fn new(level: i32) -> Result<Self> {
        match level {
            -1..=9 => Ok(Self(level as i8)),
            _ => Err(GzError::invalid_argument(format!(
                "compression level {level} is not in 0..=9 or {}",
                Self::DEFAULT_VALUE
            ))),
        }
    }

    /// Get the raw level value (`-1` for the default).
    pub fn value(&self) -> i32 {
        i32::from(self.0)
    }

    /// Whether this is the default sentinel.
    pub fn is_default(&self) -> bool {
        self.0 < 0
    }

    /// The concrete 0-9 level handed to the codec.
    pub fn effective(&self) -> u32 {
        if self.is_default() {
            Self::DEFAULT_EFFECTIVE
        } else {
            self.0 as u32
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i32> for CompressionLevel {
    type Error = GzError;

    fn try_from(level: i32) -> Result<Self> {
        Self::new(level)
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("default")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
