use std::fs::{File, OpenOptions};
use std::io::{self, Seek, Write};
use std::path::PathBuf;

/// Something a [`BinaryStreamWriter`](crate::BinaryStreamWriter) can open for writing.
///
/// A target is asked for a fresh sink each time the writer is opened. Implementations must
/// return a sink positioned at offset 0 with no prior content, creating the underlying resource
/// if it does not exist.
pub trait Target {
    /// The writable, seekable byte sink produced by this target.
    type Sink: Write + Seek;

    /// Creates the sink, or truncates it if it already exists.
    fn create_or_truncate(&self) -> io::Result<Self::Sink>;
}

/// A filesystem path. Opening creates the file, or truncates an existing one.
impl Target for PathBuf {
    type Sink = File;

    fn create_or_truncate(&self) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self)
    }
}

/// A factory closure, for sinks that are not files. For example, an in-memory target:
///
/// ```
/// use binary_stream_writer::{BinaryStreamWriter, Endian};
/// use std::io::{self, Cursor};
///
/// let w = BinaryStreamWriter::new(|| Ok::<_, io::Error>(Cursor::new(Vec::new())), Endian::Big);
/// let mut w = w.open().unwrap();
/// w.write_ushort(0x1234).unwrap();
/// assert_eq!(w.finish().unwrap().into_inner(), [0x12, 0x34]);
/// ```
impl<F, S> Target for F
where
    F: Fn() -> io::Result<S>,
    S: Write + Seek,
{
    type Sink = S;

    fn create_or_truncate(&self) -> io::Result<S> {
        self()
    }
}
