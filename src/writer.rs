use std::io::{Seek, Write};
use std::path::PathBuf;

use bstr::ByteSlice;
use log::{debug, trace, warn};
use zerocopy::byteorder::{BigEndian, LittleEndian, F32, F64, I16, I32, I64, U16, U32, U64};
use zerocopy::IntoBytes;

use crate::{Endian, Result, Target, Whence, WriterError};

/// Generates a `write_*` method that encodes `$ty` through the zerocopy wire type `$wire`,
/// picking the byte order from `self.endian`.
macro_rules! write_fixed {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $wire:ident) => {
        $(#[$meta])*
        pub fn $name(&mut self, value: $ty) -> Result<usize> {
            match self.endian {
                Endian::Little => self.write(<$wire<LittleEndian>>::new(value).as_bytes()),
                Endian::Big => self.write(<$wire<BigEndian>>::new(value).as_bytes()),
            }
        }
    };
}

/// Encodes fixed-width integers and text into a seekable sink, using a byte order chosen at
/// construction.
///
/// A writer starts out closed. [`open`](Self::open) asks the [`Target`] for a fresh sink (for a
/// file path, the file is created or truncated), and [`close`](Self::close) flushes and releases
/// it. Every `write_*` and positioning method fails with [`WriterError::InvalidState`] while the
/// writer is closed.
///
/// Values are written exactly as their bit pattern, with no padding or alignment. The widths are
/// the same on every platform; in particular `write_long` and `write_ulong` always write 4 bytes.
///
/// Dropping an open writer flushes and releases the sink, so a writer that leaves scope early
/// (for example through `?`) never leaks its sink. Errors from that final flush can only be
/// logged; call [`close`](Self::close) or [`finish`](Self::finish) to observe them.
///
/// ```no_run
/// use binary_stream_writer::{BinaryStreamWriter, Endian};
///
/// # fn main() -> binary_stream_writer::Result<()> {
/// let mut w = BinaryStreamWriter::create("header.bin", Endian::Big).open()?;
/// w.write_ascii_string("HDR1")?;
/// w.write_uint(0xdead_beef)?;
/// w.close()?;
/// # Ok(())
/// # }
/// ```
pub struct BinaryStreamWriter<T: Target = PathBuf> {
    target: T,
    endian: Endian,
    sink: Option<T::Sink>,
}

impl BinaryStreamWriter<PathBuf> {
    /// Creates a closed writer for the file at `path`.
    pub fn create(path: impl Into<PathBuf>, endian: Endian) -> Self {
        Self::new(path.into(), endian)
    }
}

impl<T: Target> BinaryStreamWriter<T> {
    /// Constructor. The writer is closed; nothing is created until [`open`](Self::open).
    pub fn new(target: T, endian: Endian) -> Self {
        Self {
            target,
            endian,
            sink: None,
        }
    }

    /// The byte order used for multi-byte values.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// The target this writer opens.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns `true` between a successful [`open`](Self::open) and the next
    /// [`close`](Self::close).
    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    /// Acquires a sink from the target, creating it or discarding its existing content, and
    /// returns the opened writer.
    ///
    /// A writer that was closed may be opened again; the target is truncated again.
    ///
    /// # Errors
    ///
    /// * [`WriterError::InvalidState`] if the writer is already open.
    /// * [`WriterError::Io`] if the target cannot be created or opened.
    ///
    /// `open` takes the writer by value, so on either error the writer and its target are
    /// dropped. Build a new writer to try again.
    pub fn open(mut self) -> Result<Self> {
        if self.sink.is_some() {
            return Err(WriterError::ALREADY_OPEN);
        }
        let sink = self.target.create_or_truncate()?;
        debug!("opened {:?}-endian stream", self.endian);
        self.sink = Some(sink);
        Ok(self)
    }

    /// Flushes and releases the sink. Closing a closed writer does nothing.
    ///
    /// The sink is released even when the flush fails. Only the flush result is reported: errors
    /// the OS raises while the sink itself is dropped (for example, closing a `File`) are lost.
    pub fn close(&mut self) -> Result<()> {
        let Some(mut sink) = self.sink.take() else {
            return Ok(());
        };
        debug!("closing {:?}-endian stream", self.endian);
        sink.flush()?;
        Ok(())
    }

    /// Flushes the sink and hands it back to the caller, consuming the writer.
    pub fn finish(mut self) -> Result<T::Sink> {
        let mut sink = self.sink.take().ok_or(WriterError::NOT_OPEN)?;
        sink.flush()?;
        Ok(sink)
    }

    fn sink(&mut self) -> Result<&mut T::Sink> {
        self.sink.as_mut().ok_or(WriterError::NOT_OPEN)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.sink.is_some() {
            Ok(())
        } else {
            Err(WriterError::NOT_OPEN)
        }
    }

    /// Writes `bytes` verbatim and returns `bytes.len()`.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        self.sink()?.write_all(bytes)?;
        Ok(bytes.len())
    }

    fn write_nul_terminated(&mut self, payload: &[u8]) -> Result<usize> {
        let sink = self.sink()?;
        sink.write_all(payload)?;
        sink.write_all(&[0])?;
        Ok(payload.len() + 1)
    }

    /// Writes a single `i8` value
    pub fn write_byte(&mut self, value: i8) -> Result<usize> {
        self.write(&[value as u8])
    }

    /// Writes a single `u8` value
    pub fn write_ubyte(&mut self, value: u8) -> Result<usize> {
        self.write(&[value])
    }

    /// Writes a `bool` value. True is encoded as 1. False is encoded as 0.
    pub fn write_bool(&mut self, value: bool) -> Result<usize> {
        self.write_ubyte(value as u8)
    }

    write_fixed! {
        /// Writes a single `i16` value
        write_short, i16, I16
    }

    write_fixed! {
        /// Writes a single `u16` value
        write_ushort, u16, U16
    }

    write_fixed! {
        /// Writes a single `i32` value
        write_int, i32, I32
    }

    write_fixed! {
        /// Writes a single `u32` value
        write_uint, u32, U32
    }

    write_fixed! {
        /// Writes a C `long`. The width is fixed at 4 bytes regardless of the platform this
        /// crate is built for; use [`write_long_long`](Self::write_long_long) for 8 bytes.
        write_long, i32, I32
    }

    write_fixed! {
        /// Writes a C `unsigned long`. The width is fixed at 4 bytes regardless of the platform
        /// this crate is built for; use [`write_ulong_long`](Self::write_ulong_long) for 8 bytes.
        write_ulong, u32, U32
    }

    write_fixed! {
        /// Writes a single `i64` value
        write_long_long, i64, I64
    }

    write_fixed! {
        /// Writes a single `u64` value
        write_ulong_long, u64, U64
    }

    write_fixed! {
        /// Writes an `f32` value as its 4-byte IEEE-754 representation.
        write_float, f32, F32
    }

    write_fixed! {
        /// Writes an `f64` value as its 8-byte IEEE-754 representation.
        write_double, f64, F64
    }

    /// Writes `s` as ASCII, one byte per character, with no length prefix.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Encoding`] if `s` contains a character above U+007F. The check
    /// happens before anything is written, so the sink is left untouched.
    pub fn write_ascii_string(&mut self, s: &str) -> Result<usize> {
        self.ensure_open()?;
        check_ascii_str(s)?;
        self.write(s.as_bytes())
    }

    /// Like [`write_ascii_string`](Self::write_ascii_string), followed by one `0x00` byte.
    pub fn write_ascii_nt_string(&mut self, s: &str) -> Result<usize> {
        self.ensure_open()?;
        check_ascii_str(s)?;
        self.write_nul_terminated(s.as_bytes())
    }

    /// Writes a byte string that must consist only of ASCII bytes.
    ///
    /// This accepts data that is not UTF-8, such as a `bstr::BStr`. A rejected byte is reported
    /// in [`WriterError::Encoding`] as the `char` with the same value.
    pub fn write_ascii_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        self.ensure_open()?;
        if let Some(position) = bytes.find_non_ascii_byte() {
            return Err(WriterError::Encoding {
                character: char::from(bytes[position]),
                position,
            });
        }
        self.write(bytes)
    }

    /// Writes the UTF-8 encoding of `s`, with no length prefix.
    pub fn write_utf8_string(&mut self, s: &str) -> Result<usize> {
        self.write(s.as_bytes())
    }

    /// Writes the UTF-8 encoding of `s`, followed by one `0x00` byte.
    ///
    /// Any NUL characters inside `s` are written as-is, so a reader that stops at the first
    /// `0x00` will see a shorter string.
    pub fn write_utf8_nt_string(&mut self, s: &str) -> Result<usize> {
        self.write_nul_terminated(s.as_bytes())
    }

    /// Moves the write position and returns the new absolute position.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Io`] if the sink cannot seek, or if the new position would be
    /// negative (including any negative `offset` with [`Whence::Beginning`]).
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        let sink = self.sink()?;
        let pos = sink.seek(whence.seek_from(offset)?)?;
        trace!("seek {offset} from {whence:?} -> {pos}");
        Ok(pos)
    }

    /// Moves the write position by `count` bytes, which may be negative, without writing.
    ///
    /// Skipping past the end of the sink leaves a gap. What the gap contains is up to the sink.
    pub fn skip(&mut self, count: i64) -> Result<u64> {
        self.seek(count, Whence::Current)
    }

    /// Moves the write position back to the start of the sink.
    pub fn rewind(&mut self) -> Result<()> {
        self.seek(0, Whence::Beginning)?;
        Ok(())
    }

    /// Returns the current absolute write position.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.sink()?.stream_position()?)
    }
}

impl<T: Target> Drop for BinaryStreamWriter<T> {
    fn drop(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            if let Err(e) = sink.flush() {
                warn!("failed to flush stream while dropping writer: {e}");
            }
        }
    }
}

fn check_ascii_str(s: &str) -> Result<()> {
    match s.as_bytes().find_non_ascii_byte() {
        None => Ok(()),
        // Everything before `position` is ASCII, so it is a char boundary.
        Some(position) => Err(WriterError::Encoding {
            character: s[position..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
            position,
        }),
    }
}
