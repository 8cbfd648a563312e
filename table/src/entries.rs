//! Assemble and validate the key/value pairs handed to a writer.

use crate::{Error, ValueSize};
use htable_codec::{FixedSize, Write};
use std::collections::{btree_map, BTreeMap};

/// An ordered set of entries whose values all share one [ValueSize].
///
/// Entries may be inserted in any order; iteration always yields ascending keys, so the same
/// mapping produces the same blob regardless of how it was presented. Inserting a key twice
/// keeps the last value.
#[derive(Clone, Debug)]
pub struct Entries {
    value_size: ValueSize,
    map: BTreeMap<u64, Vec<u8>>,
}

impl Entries {
    /// Creates an empty set for values of `value_size` bytes.
    pub fn new(value_size: ValueSize) -> Self {
        Self {
            value_size,
            map: BTreeMap::new(),
        }
    }

    /// Builds a set from parallel slices of keys and typed values.
    pub fn from_pairs<V: Write + FixedSize>(
        value_size: ValueSize,
        keys: &[u64],
        values: &[V],
    ) -> Result<Self, Error> {
        if keys.len() != values.len() {
            return Err(Error::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut entries = Self::new(value_size);
        for (key, value) in keys.iter().zip(values) {
            entries.put(*key, value)?;
        }
        Ok(entries)
    }

    /// Inserts a raw, already-encoded value.
    pub fn insert(&mut self, key: u64, value: &[u8]) -> Result<(), Error> {
        if value.len() != self.value_size.bytes() {
            return Err(Error::ValueSizeMismatch {
                key,
                expected: self.value_size.bytes(),
                found: value.len(),
            });
        }
        self.map.insert(key, value.to_vec());
        Ok(())
    }

    /// Inserts a typed value, encoded little-endian.
    pub fn put<V: Write + FixedSize>(&mut self, key: u64, value: &V) -> Result<(), Error> {
        if V::SIZE != self.value_size.bytes() {
            return Err(Error::ValueSizeMismatch {
                key,
                expected: self.value_size.bytes(),
                found: V::SIZE,
            });
        }
        let mut encoded = Vec::with_capacity(V::SIZE);
        value.write(&mut encoded);
        self.map.insert(key, encoded);
        Ok(())
    }

    /// Width of every value in the set.
    pub fn value_size(&self) -> ValueSize {
        self.value_size
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over entries in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.map.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = (u64, &'a [u8]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [Entries] in ascending key order.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, u64, Vec<u8>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u64, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (*key, value.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Collects `entries` into a vector, checking that keys are strictly ascending, that every value
/// is `value_size` bytes wide, and that every slot remains addressable by a signed 32-bit offset.
pub(crate) fn collect<'a, I>(entries: I, value_size: ValueSize) -> Result<Vec<(u64, &'a [u8])>, Error>
where
    I: IntoIterator<Item = (u64, &'a [u8])>,
{
    let entries = entries.into_iter();
    let mut sorted: Vec<(u64, &'a [u8])> = Vec::with_capacity(entries.size_hint().0);
    for (key, value) in entries {
        if value.len() != value_size.bytes() {
            return Err(Error::ValueSizeMismatch {
                key,
                expected: value_size.bytes(),
                found: value.len(),
            });
        }
        if let Some((previous, _)) = sorted.last() {
            if key == *previous {
                return Err(Error::DuplicateKey(key));
            }
            if key < *previous {
                return Err(Error::Unsorted {
                    previous: *previous,
                    key,
                });
            }
        }
        sorted.push((key, value));
    }
    if sorted.len() > value_size.max_entries() {
        return Err(Error::TooManyEntries(sorted.len()));
    }
    Ok(sorted)
}

/// Fails if a blob of `size` bytes could not be addressed by signed 32-bit offsets.
pub(crate) fn check_blob_size(size: usize) -> Result<(), Error> {
    if size > i32::MAX as usize {
        return Err(Error::BlobTooLarge(size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_sorted_iteration() {
        let mut entries = Entries::new(ValueSize::Byte);
        entries.put(3, &103u8).unwrap();
        entries.put(1, &101u8).unwrap();
        entries.put(2, &102u8).unwrap();
        let collected: Vec<_> = entries.iter().collect();
        assert_eq!(
            collected,
            vec![(1, &[101u8][..]), (2, &[102u8][..]), (3, &[103u8][..])]
        );
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_entries_last_write_wins() {
        let mut entries = Entries::new(ValueSize::Short);
        entries.put(7, &1u16).unwrap();
        entries.put(7, &2u16).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.iter().next(), Some((7, &[2u8, 0][..])));
    }

    #[test]
    fn test_entries_width_checked() {
        let mut entries = Entries::new(ValueSize::Int);
        assert_eq!(
            entries.put(1, &1.5f64),
            Err(Error::ValueSizeMismatch {
                key: 1,
                expected: 4,
                found: 8
            })
        );
        assert_eq!(
            entries.insert(2, &[1, 2]),
            Err(Error::ValueSizeMismatch {
                key: 2,
                expected: 4,
                found: 2
            })
        );
        entries.put(1, &1.5f32).unwrap();
        entries.insert(2, &[1, 2, 3, 4]).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_from_pairs() {
        let entries =
            Entries::from_pairs(ValueSize::Int, &[2, 1], &[102.2f32, 101.1f32]).unwrap();
        let keys: Vec<u64> = entries.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![1, 2]);

        assert_eq!(
            Entries::from_pairs(ValueSize::Byte, &[1, 2, 3], &[1u8, 2]).unwrap_err(),
            Error::LengthMismatch { keys: 3, values: 2 }
        );
    }

    #[test]
    fn test_collect_rejects_unsorted() {
        let input: Vec<(u64, &[u8])> = vec![(2, &[0]), (1, &[0])];
        assert_eq!(
            collect(input, ValueSize::Byte),
            Err(Error::Unsorted {
                previous: 2,
                key: 1
            })
        );
    }

    #[test]
    fn test_collect_rejects_duplicate() {
        let input: Vec<(u64, &[u8])> = vec![(1, &[0]), (5, &[1]), (5, &[2])];
        assert_eq!(collect(input, ValueSize::Byte), Err(Error::DuplicateKey(5)));
    }

    #[test]
    fn test_collect_rejects_width() {
        let input: Vec<(u64, &[u8])> = vec![(1, &[0, 0]), (2, &[0])];
        assert_eq!(
            collect(input, ValueSize::Short),
            Err(Error::ValueSizeMismatch {
                key: 2,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_collect_accepts_extremes() {
        let input: Vec<(u64, &[u8])> = vec![(0, &[0]), (u64::MAX, &[1])];
        assert_eq!(collect(input, ValueSize::Byte).unwrap().len(), 2);
    }

    #[test]
    fn test_check_blob_size() {
        assert!(check_blob_size(i32::MAX as usize).is_ok());
        assert_eq!(
            check_blob_size(1 << 31),
            Err(Error::BlobTooLarge(1 << 31))
        );
    }
}
