//! A chained hash table with a self-describing header.
//!
//! Keys are hashed with the 64-bit MurmurHash3 finalizer (truncated to its low 32 bits) and
//! assigned to one of `S` buckets, where `S` is a power of two. Each bucket holds the offset of
//! the first record of its chain and every record links to the next one, so a lookup reads one
//! directory slot and then compares keys along a single chain.
//!
//! # Format
//!
//! ```text
//! +----------+----------+---------+------------------------+----------------------+
//! | S (u32)  | N (u32)  | W (u8)  | Bucket directory (S*4) | Records (N*(12+W))   |
//! +----------+----------+---------+------------------------+----------------------+
//!
//! Record:
//! +-----------+------------+--------------+
//! | Key (u64) | Next (u32) | Value (W)    |
//! +-----------+------------+--------------+
//! ```
//!
//! All integers are little-endian. Directory entries and `Next` pointers are absolute record
//! offsets, with `0xFFFFFFFF` terminating a chain (or marking an empty bucket). `W` is the value
//! width in bytes, so a reader needs nothing beyond the blob itself.
//!
//! Records are stored in ascending key order and each one is prepended to its bucket's chain, so
//! the same mapping always produces the same blob. An empty entry set is encoded as an empty
//! blob.
//!
//! # Sizing
//!
//! `S` is the smallest power of two that holds `N` entries at the configured filling ratio
//! (a percentage), but never less than the configured minimum table size.
//!
//! # Example
//!
//! ```rust
//! use htable_table::{chain::{Config, Reader, Writer}, Entries, Reader as _, ValueSize};
//!
//! let entries = Entries::from_pairs(ValueSize::Byte, &[1, 2, 3], &[101u8, 102, 103]).unwrap();
//! let blob = Writer::new(Config::new(ValueSize::Byte)).unwrap().write(&entries).unwrap();
//!
//! let reader = Reader::new(&blob).unwrap();
//! assert_eq!(reader.get_byte(reader.find(2).unwrap()), 102);
//! assert_eq!(reader.lookup(4), htable_table::NOT_FOUND);
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use crate::{Error, ValueSize};

/// Bytes in the header (`S`, `N`, `W`).
pub const HEADER_SIZE: usize = 9;

/// Bytes preceding the value in every record (key and next pointer).
pub const RECORD_HEADER_SIZE: usize = 12;

/// Terminates a chain.
pub const EMPTY: u32 = u32::MAX;

/// Default percentage of buckets expected to be occupied.
pub const DEFAULT_FILLING_RATIO: u32 = 50;

/// Default minimum number of buckets.
pub const DEFAULT_MIN_TABLE_SIZE: u32 = 16;

/// Configuration for [Writer].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Width of every value.
    pub value_size: ValueSize,

    /// Target number of entries per 100 buckets, in `1..=100`.
    pub filling_ratio: u32,

    /// Lower bound on the number of buckets. Must be a power of two.
    pub min_table_size: u32,
}

impl Config {
    /// Chain configuration with default sizing for values of `value_size`.
    pub fn new(value_size: ValueSize) -> Self {
        Self {
            value_size,
            filling_ratio: DEFAULT_FILLING_RATIO,
            min_table_size: DEFAULT_MIN_TABLE_SIZE,
        }
    }

    /// Checks that the sizing parameters are usable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.filling_ratio == 0 || self.filling_ratio > 100 {
            return Err(Error::InvalidFillingRatio(self.filling_ratio));
        }
        if !self.min_table_size.is_power_of_two() {
            return Err(Error::InvalidMinTableSize(self.min_table_size));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(ValueSize::default())
    }
}

/// Hashes `key` with the MurmurHash3 64-bit finalizer, keeping the low 32 bits.
#[inline]
pub fn hash(key: u64) -> u32 {
    let mut h = key;
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h as u32
}

/// Bucket of `key` in a table of `table_size` (a power of two) buckets.
#[inline]
pub(crate) fn bucket(key: u64, table_size: usize) -> usize {
    hash(key) as usize & (table_size - 1)
}
