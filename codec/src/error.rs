//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("read out of range: offset {0} + {1} bytes > {2}")]
    OutOfRange(usize, usize, usize), // offset, size, buffer length
}
