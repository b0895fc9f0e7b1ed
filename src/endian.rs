/// Byte order used when encoding multi-byte values.
///
/// The byte order is chosen when a [`BinaryStreamWriter`](crate::BinaryStreamWriter) is
/// constructed and never changes afterward. Single-byte values are unaffected by it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Endian {
    /// Least-significant byte first.
    #[default]
    Little,
    /// Most-significant byte first.
    Big,
}

impl Endian {
    /// The byte order of the target this crate was compiled for.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;

    /// The byte order of the target this crate was compiled for.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    /// Returns `true` for [`Endian::Little`].
    pub fn is_little(self) -> bool {
        self == Endian::Little
    }
}
