use super::{bucket, EMPTY, HEADER_SIZE, RECORD_HEADER_SIZE};
use crate::{Error, ValueSize};
use htable_codec::{FixedSize, Read, ReadAt};

/// Zero-copy view over a chained hash table blob.
#[derive(Clone, Copy, Debug)]
pub struct Reader<'a> {
    blob: &'a [u8],
    table_size: usize,
    len: usize,
    value_size: Option<ValueSize>,
}

impl<'a> Reader<'a> {
    /// Opens `blob`, checking that its header is consistent with its length.
    pub fn new(blob: &'a [u8]) -> Result<Self, Error> {
        if blob.is_empty() {
            return Ok(Self {
                blob,
                table_size: 0,
                len: 0,
                value_size: None,
            });
        }
        if blob.len() < HEADER_SIZE {
            return Err(Error::Corrupt("truncated header"));
        }
        let mut header = &blob[..HEADER_SIZE];
        let table_size = u32::read(&mut header)? as usize;
        let len = u32::read(&mut header)? as usize;
        let value_size = ValueSize::from_tag(u8::read(&mut header)?)?;
        if !table_size.is_power_of_two() {
            return Err(Error::Corrupt("table size is not a power of two"));
        }
        let records_start = HEADER_SIZE + table_size * u32::SIZE;
        let expected = records_start + len * (RECORD_HEADER_SIZE + value_size.bytes());
        if blob.len() != expected {
            return Err(Error::Corrupt("length does not match header"));
        }
        Ok(Self {
            blob,
            table_size,
            len,
            value_size: Some(value_size),
        })
    }

    /// Number of buckets.
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Width of the values, or `None` for an empty blob.
    pub fn value_size(&self) -> Option<ValueSize> {
        self.value_size
    }

    /// Number of records compared when looking up `key`.
    pub fn probes(&self, key: u64) -> usize {
        self.probe(key).0
    }

    /// Follows the chain of `key`'s bucket, returning the number of records compared and the
    /// offset of the matching value (if any).
    fn probe(&self, key: u64) -> (usize, Option<usize>) {
        if self.len == 0 {
            return (0, None);
        }
        let slot = HEADER_SIZE + bucket(key, self.table_size) * u32::SIZE;
        let mut record = u32::read_at(self.blob, slot);
        let mut probes = 0;

        // A well-formed chain never holds more than every record.
        while record != EMPTY && probes < self.len {
            let offset = record as usize;
            probes += 1;
            if u64::read_at(self.blob, offset) == key {
                return (probes, Some(offset + RECORD_HEADER_SIZE));
            }
            record = u32::read_at(self.blob, offset + u64::SIZE);
        }
        (probes, None)
    }
}

impl crate::Reader for Reader<'_> {
    fn data(&self) -> &[u8] {
        self.blob
    }

    fn find(&self, key: u64) -> Option<usize> {
        self.probe(key).1
    }
}
