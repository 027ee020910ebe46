//! Low-level deflate/inflate sessions.
//!
//! A [`DeflateStream`] or [`InflateStream`] owns one codec state for its
//! whole lifetime: creating one initializes the state, dropping it releases
//! it. Both implement the incremental [`Compressor`]/[`Decompressor`] traits.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use oxigz_core::error::{GzError, Result, Z_DATA_ERROR, Z_STREAM_ERROR};
use oxigz_core::traits::{CompressStatus, Compressor, DecompressStatus, Decompressor, FlushMode};
use oxigz_core::CompressionLevel;

/// Framing around the deflate payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// zlib header and Adler-32 trailer (RFC 1950).
    #[default]
    Zlib,
    /// Bare deflate data (RFC 1951).
    Raw,
}

impl Format {
    fn zlib_header(self) -> bool {
        self == Self::Zlib
    }
}

fn flush_compress(mode: FlushMode) -> FlushCompress {
    match mode {
        FlushMode::None => FlushCompress::None,
        FlushMode::Sync => FlushCompress::Sync,
        FlushMode::Full => FlushCompress::Full,
        FlushMode::Finish => FlushCompress::Finish,
    }
}

/// A streaming deflate session.
#[derive(Debug)]
pub struct DeflateStream {
    inner: Compress,
    level: CompressionLevel,
    format: Format,
    finished: bool,
}

impl DeflateStream {
    /// Start a new compression session.
    pub fn new(level: CompressionLevel, format: Format) -> Self {
        Self {
            inner: Compress::new(Compression::new(level.effective()), format.zlib_header()),
            level,
            format,
            finished: false,
        }
    }

    /// Compression level this session was created with.
    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    /// Framing this session produces.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Total input bytes consumed so far.
    pub fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    /// Total output bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.inner.total_out()
    }
}

impl Compressor for DeflateStream {
    fn compress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<(usize, usize, CompressStatus)> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();

        let status = self
            .inner
            .compress(input, output, flush_compress(flush))
            .map_err(|_| GzError::zlib(Z_STREAM_ERROR))?;

        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;

        let status = match status {
            Status::StreamEnd => {
                self.finished = true;
                CompressStatus::Done
            }
            _ if produced == output.len() => CompressStatus::NeedsOutput,
            _ if consumed == 0 && produced == 0 && flush == FlushMode::Finish => {
                CompressStatus::NeedsOutput
            }
            _ => CompressStatus::NeedsInput,
        };

        Ok((consumed, produced, status))
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.finished = false;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// A streaming inflate session.
#[derive(Debug)]
pub struct InflateStream {
    inner: Decompress,
    format: Format,
    finished: bool,
}

impl InflateStream {
    /// Start a new decompression session.
    pub fn new(format: Format) -> Self {
        Self {
            inner: Decompress::new(format.zlib_header()),
            format,
            finished: false,
        }
    }

    /// Framing this session expects.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Total input bytes consumed so far.
    pub fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    /// Total output bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.inner.total_out()
    }
}

impl Decompressor for InflateStream {
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecompressStatus)> {
        if self.finished {
            return Ok((0, 0, DecompressStatus::Done));
        }

        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();

        let status = self
            .inner
            .decompress(input, output, FlushDecompress::None)
            .map_err(|_| GzError::zlib(Z_DATA_ERROR))?;

        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;

        let status = match status {
            Status::StreamEnd => {
                self.finished = true;
                DecompressStatus::Done
            }
            _ if produced == output.len() => DecompressStatus::NeedsOutput,
            _ => DecompressStatus::NeedsInput,
        };

        Ok((consumed, produced, status))
    }

    fn reset(&mut self) {
        self.inner.reset(self.format.zlib_header());
        self.finished = false;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zlib_roundtrip() {
        let data = b"streaming data, streaming data, streaming data".repeat(50);
        let mut deflater = DeflateStream::new(CompressionLevel::BEST, Format::Zlib);
        let packed = deflater.compress_all(&data).unwrap();
        assert!(deflater.is_finished());
        assert_eq!(deflater.total_in() as usize, data.len());

        let mut inflater = InflateStream::new(Format::Zlib);
        assert_eq!(inflater.decompress_all(&packed).unwrap(), data);
        assert!(inflater.is_finished());
    }

    #[test]
    fn test_raw_roundtrip() {
        let data = b"raw deflate without framing".to_vec();
        let packed = DeflateStream::new(CompressionLevel::FAST, Format::Raw)
            .compress_all(&data)
            .unwrap();
        assert_ne!(packed[0], 0x78);
        let out = InflateStream::new(Format::Raw)
            .decompress_all(&packed)
            .unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_incremental_chunks() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let mut deflater = DeflateStream::new(CompressionLevel::DEFAULT, Format::Zlib);
        let mut packed = Vec::new();
        let mut buf = [0u8; 512];

        for chunk in data.chunks(1000) {
            let mut pos = 0;
            while pos < chunk.len() {
                let (consumed, produced, _) = deflater
                    .compress(&chunk[pos..], &mut buf, FlushMode::None)
                    .unwrap();
                pos += consumed;
                packed.extend_from_slice(&buf[..produced]);
            }
        }
        loop {
            let (_, produced, status) = deflater.compress(&[], &mut buf, FlushMode::Finish).unwrap();
            packed.extend_from_slice(&buf[..produced]);
            if status == CompressStatus::Done {
                break;
            }
        }

        let mut inflater = InflateStream::new(Format::Zlib);
        assert_eq!(inflater.decompress_all(&packed).unwrap(), data);
    }

    #[test]
    fn test_reset_reuses_session() {
        let mut deflater = DeflateStream::new(CompressionLevel::DEFAULT, Format::Zlib);
        let first = deflater.compress_all(b"first").unwrap();
        deflater.reset();
        assert!(!deflater.is_finished());
        let second = deflater.compress_all(b"second").unwrap();

        let mut inflater = InflateStream::new(Format::Zlib);
        assert_eq!(inflater.decompress_all(&first).unwrap(), b"first");
        inflater.reset();
        assert_eq!(inflater.decompress_all(&second).unwrap(), b"second");
    }

    #[test]
    fn test_corrupt_input() {
        let mut inflater = InflateStream::new(Format::Zlib);
        let err = inflater.decompress_all(b"\x00\x01\x02\x03garbage").unwrap_err();
        assert_eq!(err.code(), Some(Z_DATA_ERROR));
    }

    #[test]
    fn test_truncated_input() {
        let packed = DeflateStream::new(CompressionLevel::DEFAULT, Format::Zlib)
            .compress_all(&b"truncate me please".repeat(100))
            .unwrap();
        let mut inflater = InflateStream::new(Format::Zlib);
        let err = inflater.decompress_all(&packed[..packed.len() - 6]).unwrap_err();
        assert_eq!(err.code(), Some(Z_DATA_ERROR));
    }
}
