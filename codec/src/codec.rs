//! Core codec traits

use crate::error::Error;
use bytes::{Buf, BufMut};

/// Trait for types with a known, fixed encoded length.
pub trait FixedSize {
    /// The length of the encoded value.
    const SIZE: usize;
}

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Implementations should panic if the buffer doesn't have enough capacity.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that can be read/decoded from a buffer.
pub trait Read: Sized {
    /// Reads a value from the buffer, consuming the necessary bytes.
    ///
    /// Returns an error if the buffer does not hold enough bytes.
    fn read(buf: &mut impl Buf) -> Result<Self, Error>;
}

/// Trait for fixed-size types that can be read at an absolute byte offset of a slice.
pub trait ReadAt: Read + FixedSize {
    /// Reads the value stored at `buf[offset..offset + SIZE]`.
    ///
    /// Panics if the range is out of bounds. Callers that cannot vouch for the layout of `buf`
    /// should use [ReadAt::try_read_at] instead.
    fn read_at(buf: &[u8], offset: usize) -> Self;

    /// Reads the value stored at `buf[offset..offset + SIZE]`, failing if the range is out of bounds.
    ///
    /// (Provided method).
    fn try_read_at(buf: &[u8], offset: usize) -> Result<Self, Error> {
        match offset.checked_add(Self::SIZE) {
            Some(end) if end <= buf.len() => Ok(Self::read_at(buf, offset)),
            _ => Err(Error::OutOfRange(offset, Self::SIZE, buf.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_insufficient_buffer() {
        let mut reader = Bytes::from_static(&[0x01, 0x02]);
        assert!(matches!(u32::read(&mut reader), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_try_read_at_out_of_range() {
        let buf = [0u8; 6];
        assert_eq!(u32::try_read_at(&buf, 2), Ok(0));
        assert_eq!(u32::try_read_at(&buf, 3), Err(Error::OutOfRange(3, 4, 6)));
        assert_eq!(
            u64::try_read_at(&buf, usize::MAX),
            Err(Error::OutOfRange(usize::MAX, 8, 6))
        );
    }

    #[test]
    #[should_panic]
    fn test_read_at_panics_out_of_range() {
        let buf = [0u8; 3];
        u32::read_at(&buf, 0);
    }
}
