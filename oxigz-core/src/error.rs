//! Error types for oxigz operations.
//!
//! Every failure falls into one of three kinds:
//!
//! - [`GzError::Zlib`]: a negative status from the zlib codec
//! - [`GzError::Io`]: a failed file or gzip stream operation
//! - [`GzError::InvalidArgument`]: a caller-side precondition failure,
//!   detected before any codec or file call is made

use std::io;
use thiserror::Error;

/// zlib status: stream state inconsistent or parameter invalid.
pub const Z_STREAM_ERROR: i32 = -2;
/// zlib status: input data corrupted or incomplete.
pub const Z_DATA_ERROR: i32 = -3;
/// zlib status: not enough memory.
pub const Z_MEM_ERROR: i32 = -4;
/// zlib status: not enough room in the output buffer.
pub const Z_BUF_ERROR: i32 = -5;
/// zlib status: library version mismatch.
pub const Z_VERSION_ERROR: i32 = -6;

/// Message reported when a closed gzip stream is used.
pub const CLOSED_STREAM_MESSAGE: &str = "attempted to read/write to a closed stream";

/// The main error type for oxigz operations.
#[derive(Debug, Error)]
pub enum GzError {
    /// Negative status returned by the compression codec.
    #[error("{message} (code {code})")]
    Zlib {
        /// zlib status code (always negative).
        code: i32,
        /// Description of the status code.
        message: String,
    },

    /// Failure of a file or gzip stream operation.
    #[error("I/O error: {message}")]
    Io {
        /// OS error number captured at the failing call, if any.
        errno: Option<i32>,
        /// Description of the failure.
        message: String,
    },

    /// Caller-side precondition failure.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the violated precondition.
        message: String,
    },
}

/// Result type alias for oxigz operations.
pub type Result<T> = std::result::Result<T, GzError>;

/// Look up the description of a zlib status code.
pub fn zlib_message(code: i32) -> String {
    match code {
        Z_STREAM_ERROR => "stream error".to_string(),
        Z_DATA_ERROR => "data error: input data is corrupted".to_string(),
        Z_MEM_ERROR => "insufficient memory".to_string(),
        Z_BUF_ERROR => "buffer error: not enough room in the output buffer".to_string(),
        Z_VERSION_ERROR => "incompatible zlib version".to_string(),
        _ => format!("zlib error {code}"),
    }
}

impl GzError {
    /// Create a codec error from a zlib status code.
    pub fn zlib(code: i32) -> Self {
        Self::Zlib {
            code,
            message: zlib_message(code),
        }
    }

    /// Create an I/O error.
    pub fn io(errno: Option<i32>, message: impl Into<String>) -> Self {
        Self::Io {
            errno,
            message: message.into(),
        }
    }

    /// Create an I/O error from a std error, prefixing its message with `context`.
    pub fn io_context(context: impl std::fmt::Display, err: &io::Error) -> Self {
        Self::Io {
            errno: err.raw_os_error(),
            message: format!("{context}: {err}"),
        }
    }

    /// Create the error reported for any operation on a closed stream.
    pub fn closed_stream() -> Self {
        Self::Io {
            errno: None,
            message: CLOSED_STREAM_MESSAGE.to_string(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// The zlib status code, for codec errors.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Zlib { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The OS error number, for I/O errors that captured one.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Io { errno, .. } => *errno,
            _ => None,
        }
    }

    /// Whether this error reports use of a closed stream.
    pub fn is_closed_stream(&self) -> bool {
        matches!(self, Self::Io { errno: None, message } if message == CLOSED_STREAM_MESSAGE)
    }

    /// Whether repeating the failed call could plausibly succeed.
    ///
    /// Only interrupted or would-block OS errors qualify. Codec failures,
    /// contract violations and closed-stream errors never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Io {
                errno: Some(errno), ..
            } => matches!(
                io::Error::from_raw_os_error(*errno).kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}

impl From<io::Error> for GzError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            errno: err.raw_os_error(),
            message: err.to_string(),
        }
    }
}
