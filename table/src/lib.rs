//! Build and probe immutable tables mapping `u64` keys to fixed-width numeric values.
//!
//! # Overview
//!
//! A table is written once from a set of entries and then probed many times. It is stored as a
//! single self-contained byte blob in one of two encodings:
//! - [trie]: a bitmap-compressed trie over the nibbles of the key. Lookups visit a bounded number
//!   of nodes regardless of how many entries are stored.
//! - [chain]: a chained hash table with a self-describing header. Lookups read one bucket and
//!   then compare keys along a (short) chain.
//!
//! Both encodings store values in fixed-width slots (see [ValueSize]) and answer a lookup with the
//! byte offset of the matching slot, or [NOT_FOUND]. The caller decides how to decode the slot
//! with the width-typed accessors of [Reader].
//!
//! [Format] selects an encoding at runtime, so the choice can travel with a field's configuration
//! instead of with the blob.
//!
//! # Example
//!
//! ```rust
//! use htable_table::{chain, Entries, Format, Reader, ValueSize, NOT_FOUND};
//!
//! let mut entries = Entries::new(ValueSize::Short);
//! entries.put(42, &7u16).unwrap();
//!
//! let format = Format::Chain(chain::Config::new(ValueSize::Short));
//! let blob = format.write(&entries).unwrap();
//! let reader = format.reader(&blob).unwrap();
//!
//! let offset = reader.lookup(42);
//! assert_ne!(offset, NOT_FOUND);
//! assert_eq!(reader.get_short(offset as usize), 7);
//! assert_eq!(reader.lookup(43), NOT_FOUND);
//! ```

pub mod chain;
mod entries;
mod error;
mod format;
pub mod trie;
mod value;

pub use entries::{Entries, Iter};
pub use error::Error;
pub use format::{AnyReader, Format};
pub use value::{ValueArea, ValueSize};

use htable_codec::ReadAt;

/// Returned by [Reader::lookup] when a key is absent.
pub const NOT_FOUND: i32 = -1;

/// Read access to an encoded table.
///
/// Accessors decode the slot at a byte offset previously returned by a lookup. They panic if the
/// offset does not leave room for a value of the requested width.
pub trait Reader {
    /// The encoded blob.
    fn data(&self) -> &[u8];

    /// Returns the byte offset of `key`'s value slot, if present.
    fn find(&self, key: u64) -> Option<usize>;

    /// Returns the byte offset of `key`'s value slot or [NOT_FOUND].
    fn lookup(&self, key: u64) -> i32 {
        self.find(key)
            .and_then(|offset| i32::try_from(offset).ok())
            .unwrap_or(NOT_FOUND)
    }

    /// Reads an unsigned byte at `offset`.
    fn get_byte(&self, offset: usize) -> u8 {
        u8::read_at(self.data(), offset)
    }

    /// Reads a little-endian unsigned 16-bit integer at `offset`.
    fn get_short(&self, offset: usize) -> u16 {
        u16::read_at(self.data(), offset)
    }

    /// Reads a little-endian unsigned 32-bit integer at `offset`.
    fn get_int(&self, offset: usize) -> u32 {
        u32::read_at(self.data(), offset)
    }

    /// Reads a little-endian unsigned 64-bit integer at `offset`.
    fn get_long(&self, offset: usize) -> u64 {
        u64::read_at(self.data(), offset)
    }

    /// Reads a little-endian IEEE-754 single at `offset`.
    fn get_float(&self, offset: usize) -> f32 {
        f32::read_at(self.data(), offset)
    }

    /// Reads a little-endian IEEE-754 double at `offset`.
    fn get_double(&self, offset: usize) -> f64 {
        f64::read_at(self.data(), offset)
    }
}
