//! One-shot zlib buffer codec.
//!
//! [`compress`] and [`uncompress`] transform a range of one byte slice into
//! a range of another, like zlib's `compress2`/`uncompress`. The output is
//! zlib format (RFC 1950).
//!
//! ```
//! use oxigz::codec::{compress, compress_bound, uncompress};
//! use oxigz::CompressionLevel;
//!
//! let data = b"Hello, World! Hello, World!";
//! let mut packed = vec![0u8; compress_bound(data.len())];
//! let n = compress(data, .., &mut packed, .., CompressionLevel::DEFAULT).unwrap();
//!
//! let mut unpacked = vec![0u8; data.len()];
//! let m = uncompress(&packed, ..n, &mut unpacked, ..).unwrap();
//! assert_eq!(&unpacked[..m], data);
//! ```

use crate::stream::{Format, InflateStream};
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use oxigz_core::error::{GzError, Result, Z_BUF_ERROR, Z_DATA_ERROR, Z_STREAM_ERROR};
use oxigz_core::traits::Decompressor;
use oxigz_core::{ByteRange, CompressionLevel};
use std::ops::RangeBounds;

/// Upper bound on the compressed size of `source_len` bytes.
pub fn compress_bound(source_len: usize) -> usize {
    source_len + (source_len >> 12) + (source_len >> 14) + (source_len >> 25) + 13
}

/// Compress `source[source_range]` into `dest[dest_range]`.
///
/// Returns the number of bytes written, starting at the start of
/// `dest_range`. Bytes past that count are left untouched. If the output
/// does not fit, fails with `Z_BUF_ERROR` and `dest` is not modified.
pub fn compress<S, D>(
    source: &[u8],
    source_range: S,
    dest: &mut [u8],
    dest_range: D,
    level: CompressionLevel,
) -> Result<usize>
where
    S: RangeBounds<usize>,
    D: RangeBounds<usize>,
{
    let src = ByteRange::resolve(source_range, source.len(), "source")?;
    let dst = ByteRange::resolve(dest_range, dest.len(), "dest")?;

    let input = &source[src.as_range()];
    let mut scratch = vec![0u8; dst.len()];
    let mut engine = Compress::new(Compression::new(level.effective()), true);

    loop {
        let consumed = engine.total_in() as usize;
        let produced = engine.total_out() as usize;
        let status = engine
            .compress(
                &input[consumed..],
                &mut scratch[produced..],
                FlushCompress::Finish,
            )
            .map_err(|_| GzError::zlib(Z_STREAM_ERROR))?;

        if status == Status::StreamEnd {
            break;
        }
        if engine.total_in() as usize == consumed && engine.total_out() as usize == produced {
            return Err(GzError::zlib(Z_BUF_ERROR));
        }
    }

    let written = engine.total_out() as usize;
    dest[dst.start()..dst.start() + written].copy_from_slice(&scratch[..written]);
    Ok(written)
}

/// Decompress zlib data in `source[source_range]` into `dest[dest_range]`.
///
/// Returns the number of bytes written, starting at the start of
/// `dest_range`. Fails with `Z_BUF_ERROR` if the output does not fit and
/// with `Z_DATA_ERROR` if the input is corrupt or truncated; `dest` is not
/// modified in either case.
pub fn uncompress<S, D>(source: &[u8], source_range: S, dest: &mut [u8], dest_range: D) -> Result<usize>
where
    S: RangeBounds<usize>,
    D: RangeBounds<usize>,
{
    let src = ByteRange::resolve(source_range, source.len(), "source")?;
    let dst = ByteRange::resolve(dest_range, dest.len(), "dest")?;

    let input = &source[src.as_range()];
    let mut scratch = vec![0u8; dst.len()];
    let mut engine = Decompress::new(true);

    loop {
        let consumed = engine.total_in() as usize;
        let produced = engine.total_out() as usize;
        let status = engine
            .decompress(
                &input[consumed..],
                &mut scratch[produced..],
                FlushDecompress::None,
            )
            .map_err(|_| GzError::zlib(Z_DATA_ERROR))?;

        if status == Status::StreamEnd {
            break;
        }
        if engine.total_in() as usize == consumed && engine.total_out() as usize == produced {
            // No room left means the caller's buffer is too small; otherwise
            // the input ran out before the end of the stream.
            let code = if produced == scratch.len() {
                Z_BUF_ERROR
            } else {
                Z_DATA_ERROR
            };
            return Err(GzError::zlib(code));
        }
    }

    let written = engine.total_out() as usize;
    dest[dst.start()..dst.start() + written].copy_from_slice(&scratch[..written]);
    Ok(written)
}

/// Compress `data` into a freshly allocated zlib buffer.
pub fn compress_to_vec(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    let mut output = vec![0u8; compress_bound(data.len())];
    let written = compress(data, .., &mut output, .., level)?;
    output.truncate(written);
    Ok(output)
}

/// Decompress a complete zlib buffer, growing the output as needed.
pub fn uncompress_to_vec(data: &[u8]) -> Result<Vec<u8>> {
    InflateStream::new(Format::Zlib).decompress_all(data)
}
