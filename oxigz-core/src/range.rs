//! Byte range descriptors for buffer codec calls.

use crate::error::{GzError, Result};
use std::ops::{Bound, Range, RangeBounds};

/// A validated `start..end` range within a buffer of known length.
///
/// Holds `start <= end <= len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    start: usize,
    end: usize,
}

impl ByteRange {
    /// Resolve `range` against a buffer of `len` bytes.
    ///
    /// Open bounds default to `0` and `len`. `what` names the buffer in the
    /// error message (e.g. "source").
    pub fn resolve<R: RangeBounds<usize>>(range: R, len: usize, what: &str) -> Result<Self> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s
                .checked_add(1)
                .ok_or_else(|| GzError::invalid_argument(format!("{what} start overflows")))?,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e
                .checked_add(1)
                .ok_or_else(|| GzError::invalid_argument(format!("{what} end overflows")))?,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };

        if start > end {
            return Err(GzError::invalid_argument(format!(
                "{what} start {start} is after end {end}"
            )));
        }
        if end > len {
            return Err(GzError::invalid_argument(format!(
                "{what} end {end} exceeds buffer length {len}"
            )));
        }

        Ok(Self { start, end })
    }

    /// First index of the range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last index of the range.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The range as a `std::ops::Range`, for slicing.
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_bounds() {
        let r = ByteRange::resolve(.., 10, "source").unwrap();
        assert_eq!((r.start(), r.end(), r.len()), (0, 10, 10));

        let r = ByteRange::resolve(3.., 10, "source").unwrap();
        assert_eq!(r.as_range(), 3..10);

        let r = ByteRange::resolve(..=4, 10, "source").unwrap();
        assert_eq!(r.as_range(), 0..5);
    }

    #[test]
    fn test_empty_range() {
        let r = ByteRange::resolve(10..10, 10, "dest").unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn test_start_after_end() {
        #[allow(clippy::reversed_empty_ranges)]
        let err = ByteRange::resolve(5..3, 10, "source").unwrap_err();
        assert!(matches!(err, GzError::InvalidArgument { .. }));
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn test_start_past_length() {
        let err = ByteRange::resolve(11.., 10, "dest").unwrap_err();
        assert!(matches!(err, GzError::InvalidArgument { .. }));
    }

    #[test]
    fn test_end_past_length() {
        assert!(ByteRange::resolve(0..11, 10, "dest").is_err());
        assert!(ByteRange::resolve(0..=10, 10, "dest").is_err());
    }
}
