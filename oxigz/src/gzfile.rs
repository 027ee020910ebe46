//! Owned gzip file handles.
//!
//! A [`GzFile`] wraps one open gzip stream over a file on disk, in either
//! direction. It offers byte-, line- and buffer-oriented reads and writes,
//! position queries, seeking and flushing, with zlib's `gzFile` semantics.
//!
//! The handle is either open or closed. Closing is explicit, idempotent, and
//! can fail when the trailer cannot be written. Every other operation on a
//! closed handle fails with [`GzError::closed_stream`]. Dropping an open
//! handle closes it and logs any failure.
//!
//! ```no_run
//! use oxigz::{Direction, GzFile};
//!
//! let mut out = GzFile::open("notes.txt.gz", Direction::Output, None).unwrap();
//! out.write_line("first line\n").unwrap();
//! out.close().unwrap();
//!
//! let mut input = GzFile::open("notes.txt.gz", Direction::Input, None).unwrap();
//! assert_eq!(input.read_line(128).unwrap().as_deref(), Some("first line\n"));
//! input.close().unwrap();
//! ```

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, warn};
use oxigz_core::error::{GzError, Result};
use oxigz_core::{CompressionLevel, FlushMode};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Chunk size used when seeking skips or zero-fills data.
const SEEK_CHUNK: usize = 8192;

/// Direction a gzip file is opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Decompress from an existing file.
    Input,
    /// Compress into a new (or truncated) file.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

type Decoder = BufReader<MultiGzDecoder<File>>;

/// Writer side: the encoder plus whether its current member is complete.
struct Encoder {
    inner: GzEncoder<File>,
    compression: Compression,
    member_finished: bool,
}

impl Encoder {
    /// Start a fresh gzip member after a `FlushMode::Finish`.
    fn restart_member(&mut self) -> io::Result<()> {
        if self.member_finished {
            let file = self.inner.get_ref().try_clone()?;
            self.inner = GzEncoder::new(file, self.compression);
            self.member_finished = false;
        }
        Ok(())
    }
}

enum Stream {
    Reader(Decoder),
    Writer(Encoder),
}

/// An open (or closed) gzip file.
pub struct GzFile {
    stream: Option<Stream>,
    path: PathBuf,
    direction: Direction,
    position: u64,
    eof: bool,
}

impl fmt::Debug for GzFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GzFile")
            .field("path", &self.path)
            .field("direction", &self.direction)
            .field("open", &self.is_open())
            .field("position", &self.position)
            .field("eof", &self.eof)
            .finish()
    }
}

fn reader_of(stream: &mut Option<Stream>) -> Result<&mut Decoder> {
    match stream {
        Some(Stream::Reader(reader)) => Ok(reader),
        Some(Stream::Writer(_)) => Err(GzError::invalid_argument(
            "gzip stream is open for output, not input",
        )),
        None => Err(GzError::closed_stream()),
    }
}

fn writer_of(stream: &mut Option<Stream>) -> Result<&mut Encoder> {
    match stream {
        Some(Stream::Writer(writer)) => Ok(writer),
        Some(Stream::Reader(_)) => Err(GzError::invalid_argument(
            "gzip stream is open for input, not output",
        )),
        None => Err(GzError::closed_stream()),
    }
}

fn open_decoder(path: &Path) -> Result<Decoder> {
    let file = File::open(path)
        .map_err(|e| GzError::io_context(format!("cannot open {}", path.display()), &e))?;
    Ok(BufReader::new(MultiGzDecoder::new(file)))
}

impl GzFile {
    /// Open `path` for gzip input or output.
    ///
    /// `level` applies to output only; `None` selects the default level.
    /// Output truncates an existing file.
    pub fn open(
        path: impl AsRef<Path>,
        direction: Direction,
        level: Option<CompressionLevel>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let level = level.unwrap_or_default();

        let stream = match direction {
            Direction::Input => Stream::Reader(open_decoder(path)?),
            Direction::Output => {
                let file = File::create(path).map_err(|e| {
                    GzError::io_context(format!("cannot open {}", path.display()), &e)
                })?;
                let compression = Compression::new(level.effective());
                Stream::Writer(Encoder {
                    inner: GzEncoder::new(file, compression),
                    compression,
                    member_finished: false,
                })
            }
        };

        debug!("opened {} for gzip {direction} (level {level})", path.display());

        Ok(Self {
            stream: Some(stream),
            path: path.to_path_buf(),
            direction,
            position: 0,
            eof: false,
        })
    }

    /// Close the stream, writing the gzip trailer for output handles.
    ///
    /// Closing a closed handle does nothing. The handle counts as closed
    /// even if this call fails.
    pub fn close(&mut self) -> Result<()> {
        let Some(stream) = self.stream.take() else {
            return Ok(());
        };

        debug!("closing gzip {} {}", self.direction, self.path.display());

        match stream {
            Stream::Reader(_) => Ok(()),
            Stream::Writer(encoder) => {
                let mut file = encoder.inner.finish().map_err(|e| {
                    GzError::io_context(format!("cannot close {}", self.path.display()), &e)
                })?;
                file.flush().map_err(|e| {
                    GzError::io_context(format!("cannot close {}", self.path.display()), &e)
                })
            }
        }
    }

    /// Whether the handle is still open.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Direction the handle was opened in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Path the handle was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a read has reached the end of the decompressed data.
    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Read up to `n` decompressed bytes into the start of `buf`.
    ///
    /// Keeps reading until `n` bytes are available or the data ends, so a
    /// short count means end of stream. Returns 0 at end of stream.
    pub fn read(&mut self, buf: &mut [u8], n: usize) -> Result<usize> {
        let reader = reader_of(&mut self.stream)?;
        let want = n.min(buf.len());

        let mut filled = 0;
        while filled < want {
            match reader.read(&mut buf[filled..want]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(k) => filled += k,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(GzError::io_context(
                        format!("cannot read {}", self.path.display()),
                        &e,
                    ));
                }
            }
        }

        self.position += filled as u64;
        Ok(filled)
    }

    /// Compress and write `buf[..n]`.
    ///
    /// A write that stores nothing is a failure, including a request for
    /// zero bytes.
    pub fn write(&mut self, buf: &[u8], n: usize) -> Result<usize> {
        let encoder = writer_of(&mut self.stream)?;
        if n > buf.len() {
            return Err(GzError::invalid_argument(format!(
                "write of {n} bytes from a {}-byte buffer",
                buf.len()
            )));
        }

        let context = || format!("cannot write {}", self.path.display());
        if n == 0 {
            return Err(GzError::io(
                None,
                format!("{}: gzip write stored 0 bytes", context()),
            ));
        }

        encoder
            .restart_member()
            .map_err(|e| GzError::io_context(context(), &e))?;
        encoder
            .inner
            .write_all(&buf[..n])
            .map_err(|e| GzError::io_context(context(), &e))?;

        self.position += n as u64;
        Ok(n)
    }

    /// Read one decompressed byte, or `None` at end of stream.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let reader = reader_of(&mut self.stream)?;
        let byte = loop {
            match reader.fill_buf() {
                Ok([]) => break None,
                Ok(available) => break Some(available[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(GzError::io_context(
                        format!("cannot read {}", self.path.display()),
                        &e,
                    ));
                }
            }
        };

        match byte {
            Some(b) => {
                reader.consume(1);
                self.position += 1;
                Ok(Some(b))
            }
            None => {
                self.eof = true;
                Ok(None)
            }
        }
    }

    /// Write one byte, returning it.
    pub fn write_byte(&mut self, byte: u8) -> Result<u8> {
        self.write(&[byte], 1)?;
        Ok(byte)
    }

    /// Read one line of at most `max_len - 1` bytes.
    ///
    /// The line keeps its trailing `\n` if one was read before the limit.
    /// Invalid UTF-8 is replaced. Returns `None` at end of stream.
    pub fn read_line(&mut self, max_len: usize) -> Result<Option<String>> {
        let reader = reader_of(&mut self.stream)?;
        if max_len < 2 {
            return Err(GzError::invalid_argument(format!(
                "line buffer of {max_len} bytes cannot hold a line"
            )));
        }

        let limit = max_len - 1;
        let mut line = Vec::new();

        while line.len() < limit {
            let (taken, newline) = match reader.fill_buf() {
                Ok([]) => {
                    self.eof = true;
                    break;
                }
                Ok(available) => {
                    let window = &available[..available.len().min(limit - line.len())];
                    match window.iter().position(|&b| b == b'\n') {
                        Some(i) => {
                            line.extend_from_slice(&window[..=i]);
                            (i + 1, true)
                        }
                        None => {
                            line.extend_from_slice(window);
                            (window.len(), false)
                        }
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(GzError::io_context(
                        format!("cannot read {}", self.path.display()),
                        &e,
                    ));
                }
            };

            reader.consume(taken);
            if newline {
                break;
            }
        }

        if line.is_empty() {
            return Ok(None);
        }

        self.position += line.len() as u64;
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    /// Write `text` as-is; it must not contain NUL bytes.
    ///
    /// Returns the number of bytes written. An empty string writes nothing.
    pub fn write_line(&mut self, text: &str) -> Result<usize> {
        writer_of(&mut self.stream)?;
        if text.contains('\0') {
            return Err(GzError::invalid_argument("line contains a NUL byte"));
        }
        if text.is_empty() {
            return Ok(0);
        }
        self.write(text.as_bytes(), text.len())
    }

    /// Current offset in the uncompressed data.
    pub fn tell(&self) -> Result<u64> {
        if self.stream.is_none() {
            return Err(GzError::closed_stream());
        }
        Ok(self.position)
    }

    /// Move to `offset` bytes from the start of the uncompressed data.
    ///
    /// Input handles can seek both ways; seeking backwards restarts
    /// decompression from the beginning of the file, and seeking past the
    /// end stops at the end with [`eof`](Self::eof) set. Output handles can
    /// only seek forwards, which writes zeros. Returns the new offset.
    pub fn seek(&mut self, offset: u64) -> Result<u64> {
        let reading = match &self.stream {
            None => return Err(GzError::closed_stream()),
            Some(Stream::Reader(_)) => true,
            Some(Stream::Writer(_)) => false,
        };
        if reading {
            self.seek_input(offset)?;
        } else {
            self.seek_output(offset)?;
        }
        Ok(self.position)
    }

    fn seek_input(&mut self, offset: u64) -> Result<()> {
        if offset < self.position {
            self.stream = Some(Stream::Reader(open_decoder(&self.path)?));
            self.position = 0;
        }
        self.eof = false;

        let mut scratch = vec![0u8; SEEK_CHUNK];
        while self.position < offset {
            let step = (offset - self.position).min(SEEK_CHUNK as u64) as usize;
            if self.read(&mut scratch, step)? < step {
                break;
            }
        }
        Ok(())
    }

    fn seek_output(&mut self, offset: u64) -> Result<()> {
        if offset < self.position {
            return Err(GzError::io(
                None,
                format!(
                    "cannot seek backwards in gzip output {} ({} < {})",
                    self.path.display(),
                    offset,
                    self.position
                ),
            ));
        }

        let zeros = vec![0u8; SEEK_CHUNK];
        while self.position < offset {
            let step = (offset - self.position).min(SEEK_CHUNK as u64) as usize;
            self.write(&zeros, step)?;
        }
        Ok(())
    }

    /// Flush pending compressed output.
    ///
    /// `Sync` and `Full` push everything written so far to the file.
    /// `Finish` also completes the current gzip member; later writes start
    /// a new member. Flushing an input handle does nothing.
    pub fn flush(&mut self, mode: FlushMode) -> Result<()> {
        let encoder = match &mut self.stream {
            None => return Err(GzError::closed_stream()),
            Some(Stream::Reader(_)) => return Ok(()),
            Some(Stream::Writer(encoder)) => encoder,
        };

        let result = match mode {
            FlushMode::None => Ok(()),
            FlushMode::Sync | FlushMode::Full if encoder.member_finished => {
                encoder.inner.get_mut().flush()
            }
            FlushMode::Sync | FlushMode::Full => encoder.inner.flush(),
            FlushMode::Finish => {
                let finished = encoder
                    .inner
                    .try_finish()
                    .and_then(|()| encoder.inner.get_mut().flush());
                if finished.is_ok() {
                    encoder.member_finished = true;
                }
                finished
            }
        };

        result.map_err(|e| GzError::io_context(format!("cannot flush {}", self.path.display()), &e))
    }
}

impl Drop for GzFile {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("error closing {}: {}", self.path.display(), e);
        }
    }
}
