//! A bitmap-compressed trie over the nibbles of a `u64` key.
//!
//! The key is consumed most-significant nibble first, `n = log2(B)` bits per level, where `B` is
//! the bitmask width (8, 16, 32 or 64 bits). Each internal node records which of its `B` possible
//! children exist in a bitmap and stores pointers only to those children, packed in ascending
//! bit order. The pointer for child `i` therefore sits at position `rank(bitmap, i)`.
//!
//! # Format
//!
//! ```text
//! +--------------------------------------+----------------------+
//! | Nodes (depth-first pre-order, root 0)| Value area           |
//! +--------------------------------------+----------------------+
//!
//! Node:
//! +------------------+------------+------------+-----+
//! | Bitmap (B/8, LE) | Ptr0 (u32) | Ptr1 (u32) | ... |  (one pointer per set bit)
//! +------------------+------------+------------+-----+
//! ```
//!
//! Pointers are absolute byte offsets into the blob. Every key consumes exactly
//! `depth = ceil(64 / n)` levels, so a pointer read at the last level is the offset of a value
//! slot and every other pointer is the offset of a node. When `n` does not divide 64, the last
//! level consumes only the remaining low-order bits.
//!
//! Nodes are emitted before their descendants (the root is always at offset 0) and children in
//! ascending bit order. The value area follows the last node and holds one slot per entry in
//! ascending key order. An empty entry set is encoded as an empty blob.
//!
//! # Example
//!
//! ```rust
//! use htable_table::{trie::{BitmaskSize, Config, Reader, Writer}, Entries, Reader as _, ValueSize};
//!
//! let mut entries = Entries::new(ValueSize::Int);
//! entries.put(3, &103.3f32).unwrap();
//! entries.put(1, &101.1f32).unwrap();
//!
//! let cfg = Config { bitmask: BitmaskSize::Short, value_size: ValueSize::Int };
//! let blob = Writer::new(cfg).unwrap().write(&entries).unwrap();
//!
//! let reader = Reader::new(&blob, BitmaskSize::Short).unwrap();
//! let offset = reader.find(3).unwrap();
//! assert_eq!(reader.get_float(offset), 103.3);
//! assert_eq!(reader.lookup(2), htable_table::NOT_FOUND);
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use crate::{Error, ValueSize};

/// Width of the bitmap stored in every node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BitmaskSize {
    /// 8 bits: 3 key bits per level, 22 levels.
    Byte,
    /// 16 bits: 4 key bits per level, 16 levels.
    #[default]
    Short,
    /// 32 bits: 5 key bits per level, 13 levels.
    Int,
    /// 64 bits: 6 key bits per level, 11 levels.
    Long,
}

impl BitmaskSize {
    /// Number of bits in the bitmap (the fan-out of a node).
    pub const fn bits(self) -> u32 {
        match self {
            Self::Byte => 8,
            Self::Short => 16,
            Self::Int => 32,
            Self::Long => 64,
        }
    }

    /// Number of bytes the bitmap occupies.
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Key bits consumed per level.
    pub const fn nibble_bits(self) -> u32 {
        self.bits().trailing_zeros()
    }

    /// Number of levels every key traverses.
    pub const fn depth(self) -> u32 {
        64u32.div_ceil(self.nibble_bits())
    }

    /// Parses a width expressed in bytes.
    pub fn from_bytes(bytes: u8) -> Result<Self, Error> {
        match bytes {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Short),
            4 => Ok(Self::Int),
            8 => Ok(Self::Long),
            _ => Err(Error::InvalidBitmaskSize(bytes)),
        }
    }
}

/// Configuration for [Writer].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Width of each node's bitmap.
    pub bitmask: BitmaskSize,

    /// Width of every value.
    pub value_size: ValueSize,
}

impl Config {
    /// Trie configuration with the default bitmask for values of `value_size`.
    pub fn new(value_size: ValueSize) -> Self {
        Self {
            bitmask: BitmaskSize::default(),
            value_size,
        }
    }

    /// Every combination of bitmask and value size is valid.
    pub fn validate(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(ValueSize::default())
    }
}

/// Extracts the nibble of `key` consumed at `level`, for nibbles of `width` bits.
#[inline]
pub(crate) fn nibble(key: u64, level: u32, width: u32) -> u32 {
    let remaining = 64 - level * width;
    if remaining >= width {
        ((key >> (remaining - width)) & ((1 << width) - 1)) as u32
    } else {
        (key & ((1 << remaining) - 1)) as u32
    }
}
