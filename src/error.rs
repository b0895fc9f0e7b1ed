use std::io;

use thiserror::Error;

/// Result type for the fallible operations of [`BinaryStreamWriter`](crate::BinaryStreamWriter).
pub type Result<T> = core::result::Result<T, WriterError>;

/// Error type for [`BinaryStreamWriter`](crate::BinaryStreamWriter).
#[derive(Debug, Error)]
pub enum WriterError {
    /// The sink failed to open, write, seek, or flush. The underlying error is preserved.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The text contains a character that the requested encoding cannot represent.
    /// Nothing was written.
    #[error("cannot encode {character:?} at byte offset {position} as ASCII")]
    Encoding {
        /// The first character that could not be encoded.
        character: char,
        /// Byte offset of `character` within the input.
        position: usize,
    },

    /// The operation requires the stream to be in a different lifecycle state, for example
    /// writing before `open` or after `close`.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

impl WriterError {
    pub(crate) const NOT_OPEN: WriterError = WriterError::InvalidState("stream not open");
    pub(crate) const ALREADY_OPEN: WriterError = WriterError::InvalidState("stream already open");
}
