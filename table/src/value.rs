//! Fixed-width value slots shared by every encoding.
//!
//! A value area is a contiguous run of `N * W` bytes holding `N` slots of `W` bytes each, with
//! no per-slot header: slot `k` occupies `[k * W, (k + 1) * W)` relative to the start of the
//! area. Encodings place the area (or interleave slots with their own records) and hand out
//! absolute byte offsets; the width alone tells a caller how to decode a slot.

use crate::Error;
use bytes::BufMut;

/// Width of every value stored in a blob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueSize {
    Byte = 1,
    Short = 2,
    #[default]
    Int = 4,
    Long = 8,
}

impl ValueSize {
    /// Number of bytes in each slot.
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// The one-byte tag stored in self-describing headers.
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Parses a tag (the width in bytes).
    pub fn from_tag(tag: u8) -> Result<Self, Error> {
        match tag {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Short),
            4 => Ok(Self::Int),
            8 => Ok(Self::Long),
            _ => Err(Error::InvalidValueSize(tag)),
        }
    }

    /// Largest number of entries whose slots can be addressed by a signed 32-bit offset.
    #[inline]
    pub const fn max_entries(self) -> usize {
        (1usize << 31) / self.bytes()
    }
}

impl TryFrom<u8> for ValueSize {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

/// Append-only value area for a blob under construction.
pub struct ValueArea {
    size: ValueSize,
    start: usize,
    len: usize,
}

impl ValueArea {
    /// Creates an empty area whose first slot will live at blob offset `start`.
    pub fn new(size: ValueSize, start: usize) -> Self {
        Self {
            size,
            start,
            len: 0,
        }
    }

    /// Absolute blob offset of slot `ordinal`.
    #[inline]
    pub fn offset(&self, ordinal: usize) -> usize {
        self.start + ordinal * self.size.bytes()
    }

    /// Total bytes occupied by `count` slots.
    #[inline]
    pub fn span(&self, count: usize) -> usize {
        count * self.size.bytes()
    }

    /// Number of slots appended so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no slot has been appended.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` to `buf` as the next slot and returns its absolute offset.
    ///
    /// `buf` must already hold exactly the bytes preceding this slot.
    pub fn push(&mut self, buf: &mut impl BufMut, value: &[u8]) -> usize {
        assert_eq!(value.len(), self.size.bytes(), "slot width mismatch");
        let offset = self.offset(self.len);
        buf.put_slice(value);
        self.len += 1;
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ValueSize::Byte, 1)]
    #[test_case(ValueSize::Short, 2)]
    #[test_case(ValueSize::Int, 4)]
    #[test_case(ValueSize::Long, 8)]
    fn test_value_size_tag(size: ValueSize, bytes: usize) {
        assert_eq!(size.bytes(), bytes);
        assert_eq!(ValueSize::from_tag(size.tag()), Ok(size));
        assert_eq!(ValueSize::try_from(bytes as u8), Ok(size));
    }

    #[test]
    fn test_invalid_tag() {
        for tag in [0u8, 3, 5, 6, 7, 9, 16, 255] {
            assert_eq!(ValueSize::from_tag(tag), Err(Error::InvalidValueSize(tag)));
        }
    }

    #[test]
    fn test_max_entries() {
        assert_eq!(ValueSize::Byte.max_entries(), 1 << 31);
        assert_eq!(ValueSize::Long.max_entries(), 1 << 28);
    }

    #[test]
    fn test_value_area_offsets() {
        let mut buf = vec![0xaa; 10];
        let mut area = ValueArea::new(ValueSize::Short, buf.len());
        assert!(area.is_empty());
        assert_eq!(area.push(&mut buf, &[1, 0]), 10);
        assert_eq!(area.push(&mut buf, &[2, 0]), 12);
        assert_eq!(area.push(&mut buf, &[3, 0]), 14);
        assert_eq!(area.len(), 3);
        assert_eq!(area.span(3), 6);
        assert_eq!(&buf[10..], &[1, 0, 2, 0, 3, 0]);
    }

    #[test]
    #[should_panic(expected = "slot width mismatch")]
    fn test_value_area_width_mismatch() {
        let mut buf = Vec::new();
        ValueArea::new(ValueSize::Int, 0).push(&mut buf, &[1, 2]);
    }
}
