use super::{nibble, BitmaskSize};
use crate::Error;
use htable_codec::{Bitmap, FixedSize, ReadAt};

/// Zero-copy view over a trie blob.
#[derive(Clone, Copy, Debug)]
pub struct Reader<'a> {
    blob: &'a [u8],
    bitmask: BitmaskSize,
}

impl<'a> Reader<'a> {
    /// Opens `blob`, which must have been built with `bitmask`.
    ///
    /// Only the root node is checked: later nodes are trusted to be well-formed.
    pub fn new(blob: &'a [u8], bitmask: BitmaskSize) -> Result<Self, Error> {
        if !blob.is_empty() {
            let root = match bitmask {
                BitmaskSize::Byte => root_size::<u8>(blob)?,
                BitmaskSize::Short => root_size::<u16>(blob)?,
                BitmaskSize::Int => root_size::<u32>(blob)?,
                BitmaskSize::Long => root_size::<u64>(blob)?,
            };
            if root > blob.len() {
                return Err(Error::Corrupt("root node exceeds blob"));
            }
        }
        Ok(Self { blob, bitmask })
    }

    /// Bitmask size the blob is interpreted with.
    pub fn bitmask(&self) -> BitmaskSize {
        self.bitmask
    }
}

fn root_size<M: Bitmap>(blob: &[u8]) -> Result<usize, Error> {
    let bitmap = M::try_read_at(blob, 0)?;
    if bitmap == M::EMPTY {
        return Err(Error::Corrupt("empty root bitmap"));
    }
    Ok(M::SIZE + bitmap.count() as usize * u32::SIZE)
}

/// Walks from the root, consuming one nibble of `key` per level.
///
/// Returns the number of nodes visited (including one that rejects the key) and, if the key is
/// present, the offset of its value slot.
fn walk<M: Bitmap>(blob: &[u8], key: u64) -> (u32, Option<usize>) {
    let width = M::BITS.trailing_zeros();
    let depth = 64u32.div_ceil(width);
    let mut offset = 0;
    for level in 0..depth {
        let bit = nibble(key, level, width);
        let bitmap = M::read_at(blob, offset);
        if !bitmap.contains(bit) {
            return (level + 1, None);
        }
        let pointer = offset + M::SIZE + bitmap.rank(bit) as usize * u32::SIZE;
        let child = u32::read_at(blob, pointer) as usize;
        debug_assert!(child > offset, "child must follow its parent");
        offset = child;
    }
    (depth, Some(offset))
}

impl Reader<'_> {
    fn walk(&self, key: u64) -> (u32, Option<usize>) {
        if self.blob.is_empty() {
            return (0, None);
        }
        match self.bitmask {
            BitmaskSize::Byte => walk::<u8>(self.blob, key),
            BitmaskSize::Short => walk::<u16>(self.blob, key),
            BitmaskSize::Int => walk::<u32>(self.blob, key),
            BitmaskSize::Long => walk::<u64>(self.blob, key),
        }
    }

    /// Number of nodes visited when looking up `key`.
    pub fn visits(&self, key: u64) -> u32 {
        self.walk(key).0
    }
}

impl crate::Reader for Reader<'_> {
    fn data(&self) -> &[u8] {
        self.blob
    }

    fn find(&self, key: u64) -> Option<usize> {
        self.walk(key).1
    }
}
