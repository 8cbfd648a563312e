//! Codec implementations for Rust primitive types.
//!
//! Every integer and float is written little-endian, regardless of the host. Blobs produced on
//! one machine are therefore readable on any other, and offsets computed by a writer remain
//! valid for every reader.

use crate::{Error, FixedSize, Read, ReadAt, Write};
use bytes::{Buf, BufMut};

// Numeric types implementation
macro_rules! impl_numeric {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                buf.$write_method(*self);
            }
        }

        impl Read for $type {
            #[inline]
            fn read(buf: &mut impl Buf) -> Result<Self, Error> {
                if buf.remaining() < std::mem::size_of::<$type>() {
                    return Err(Error::EndOfBuffer);
                }
                Ok(buf.$read_method())
            }
        }

        impl ReadAt for $type {
            #[inline]
            fn read_at(buf: &[u8], offset: usize) -> Self {
                let mut slice = &buf[offset..offset + std::mem::size_of::<$type>()];
                slice.$read_method()
            }
        }

        impl FixedSize for $type {
            const SIZE: usize = std::mem::size_of::<$type>();
        }
    };
}

impl_numeric!(u8, get_u8, put_u8);
impl_numeric!(u16, get_u16_le, put_u16_le);
impl_numeric!(u32, get_u32_le, put_u32_le);
impl_numeric!(u64, get_u64_le, put_u64_le);
impl_numeric!(i8, get_i8, put_i8);
impl_numeric!(i16, get_i16_le, put_i16_le);
impl_numeric!(i32, get_i32_le, put_i32_le);
impl_numeric!(i64, get_i64_le, put_i64_le);
impl_numeric!(f32, get_f32_le, put_f32_le);
impl_numeric!(f64, get_f64_le, put_f64_le);
