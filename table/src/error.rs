//! Errors raised while building or opening a table.

use thiserror::Error;

/// Errors that can occur when building a blob or opening a reader over one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    // Input invariants (build time)
    #[error("keys not sorted: {key} follows {previous}")]
    Unsorted { previous: u64, key: u64 },
    #[error("duplicate key: {0}")]
    DuplicateKey(u64),
    #[error("value for key {key} has {found} bytes, expected {expected}")]
    ValueSizeMismatch {
        key: u64,
        expected: usize,
        found: usize,
    },
    #[error("keys and values differ in length: {keys} != {values}")]
    LengthMismatch { keys: usize, values: usize },
    #[error("too many entries: {0}")]
    TooManyEntries(usize),
    #[error("blob too large: {0} bytes")]
    BlobTooLarge(usize),

    // Configuration (build time)
    #[error("invalid value size: {0}")]
    InvalidValueSize(u8),
    #[error("invalid bitmask size: {0}")]
    InvalidBitmaskSize(u8),
    #[error("filling ratio must be within [1, 100]: {0}")]
    InvalidFillingRatio(u32),
    #[error("min hash table size must be a power of two: {0}")]
    InvalidMinTableSize(u32),

    // Corrupt blob (read time)
    #[error("corrupt blob: {0}")]
    Corrupt(&'static str),
    #[error("codec error: {0}")]
    Codec(#[from] htable_codec::Error),
}
