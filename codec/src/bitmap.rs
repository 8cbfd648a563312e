//! Fixed-width bitmaps with population count and rank.
//!
//! A bitmap is an unsigned integer in which bit `i` (counting from the least significant bit)
//! marks the presence of the `i`-th element of some sparse, fixed-capacity array. Only present
//! elements are stored, packed in ascending bit order, so the slot of element `i` is the number
//! of set bits strictly below `i` (its rank).

use crate::{FixedSize, ReadAt, Write};

/// A fixed-width bitmap that can be stored in a blob.
pub trait Bitmap: Copy + Eq + std::fmt::Debug + ReadAt + Write {
    /// Number of bits in the bitmap.
    const BITS: u32;

    /// A bitmap with no bits set.
    const EMPTY: Self;

    /// Number of set bits.
    fn count(self) -> u32;

    /// Number of set bits at positions strictly below `index`.
    ///
    /// An `index` of [Bitmap::BITS] (or above) yields [Bitmap::count].
    fn rank(self, index: u32) -> u32;

    /// Returns whether bit `index` is set.
    fn contains(self, index: u32) -> bool;

    /// Returns a copy of the bitmap with bit `index` set.
    fn with(self, index: u32) -> Self;
}

macro_rules! impl_bitmap {
    ($type:ty) => {
        impl Bitmap for $type {
            const BITS: u32 = <$type>::BITS;
            const EMPTY: Self = 0;

            #[inline]
            fn count(self) -> u32 {
                self.count_ones()
            }

            #[inline]
            fn rank(self, index: u32) -> u32 {
                let below = match (1 as $type).checked_shl(index) {
                    Some(bit) => bit - 1,
                    None => <$type>::MAX,
                };
                (self & below).count_ones()
            }

            #[inline]
            fn contains(self, index: u32) -> bool {
                debug_assert!(index < Self::BITS);
                (self >> index) & 1 == 1
            }

            #[inline]
            fn with(self, index: u32) -> Self {
                debug_assert!(index < Self::BITS);
                self | (1 << index)
            }
        }

        const _: () = assert!(<$type as FixedSize>::SIZE * 8 == <$type>::BITS as usize);
    };
}

impl_bitmap!(u8);
impl_bitmap!(u16);
impl_bitmap!(u32);
impl_bitmap!(u64);
