use std::io::{self, SeekFrom};

/// Origin of a [`seek`](crate::BinaryStreamWriter::seek) offset.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Whence {
    /// Offset is relative to the start of the sink. It must not be negative.
    #[default]
    Beginning,
    /// Offset is relative to the current write position.
    Current,
    /// Offset is relative to the end of the sink.
    End,
}

impl Whence {
    /// Pairs `offset` with this origin, producing the `SeekFrom` understood by the sink.
    pub(crate) fn seek_from(self, offset: i64) -> io::Result<SeekFrom> {
        match self {
            Whence::Beginning => u64::try_from(offset).map(SeekFrom::Start).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("negative seek position {offset}"),
                )
            }),
            Whence::Current => Ok(SeekFrom::Current(offset)),
            Whence::End => Ok(SeekFrom::End(offset)),
        }
    }
}
