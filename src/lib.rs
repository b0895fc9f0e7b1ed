//! Writes fixed-width integers, floats, and text to a seekable byte sink, in a byte order chosen
//! when the writer is constructed.
//!
//! The central type is [`BinaryStreamWriter`]. It owns at most one open sink, obtained from a
//! [`Target`]: usually a file path, which is created or truncated on open, or any closure that
//! produces a `Write + Seek` value. All encodings are byte-exact and identical on every platform.
//!
//! The writer does not decide what a file looks like. Callers assemble their own format from the
//! primitive writes and positioning operations.

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod endian;
mod error;
mod position;
mod target;
mod writer;


pub use endian::Endian;
pub use error::{Result, WriterError};
pub use position::Whence;
pub use target::Target;
pub use writer::BinaryStreamWriter;
