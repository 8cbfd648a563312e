//! Read and write little-endian fixed-width primitives and bitmaps.
//!
//! # Overview
//!
//! The encodings built on top of this crate are flat byte blobs that are written once and then
//! probed many times by offset. This crate provides the two building blocks they need:
//! - [Write] and [Read] for fixed-width integers and floats, always in little-endian byte order.
//!   [ReadAt] reads a value directly at a byte offset of a borrowed slice (no cursor required).
//! - [Bitmap] for 8, 16, 32 and 64-bit bitmaps: population count and ranked population count.
//!
//! # Example
//!
//! ```
//! use htable_codec::{Bitmap, FixedSize, ReadAt, Write};
//!
//! let mut buf = Vec::new();
//! 0b1011_0100u8.write(&mut buf);
//! 7u32.write(&mut buf);
//! 101.5f32.write(&mut buf);
//! assert_eq!(buf.len(), u8::SIZE + u32::SIZE + f32::SIZE);
//!
//! let bitmap = u8::read_at(&buf, 0);
//! assert!(bitmap.contains(5));
//! assert_eq!(bitmap.rank(5), 2);
//! assert_eq!(u32::read_at(&buf, 1), 7);
//! assert_eq!(f32::read_at(&buf, 5), 101.5);
//! ```

pub mod bitmap;
pub mod codec;
pub mod error;
pub mod primitives;

// Re-export main types and traits
pub use bitmap::Bitmap;
pub use codec::{FixedSize, Read, ReadAt, Write};
pub use error::Error;
