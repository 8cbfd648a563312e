use super::{bucket, Config, EMPTY, HEADER_SIZE, RECORD_HEADER_SIZE};
use crate::{
    entries::{check_blob_size, collect},
    Error,
};
use bytes::{BufMut, Bytes, BytesMut};
use htable_codec::{FixedSize, Write};
use tracing::debug;

/// Builds chained hash table blobs.
#[derive(Clone, Debug)]
pub struct Writer {
    cfg: Config,
}

impl Writer {
    /// Creates a writer, validating `cfg`.
    pub fn new(cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// The configuration blobs are built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Number of buckets used for `len` entries: the smallest power of two holding `len` entries
    /// at the configured filling ratio, but never fewer than the configured minimum.
    pub fn table_size(&self, len: usize) -> usize {
        let target = (len as u64 * 100).div_ceil(self.cfg.filling_ratio as u64);
        (target.next_power_of_two() as usize).max(self.cfg.min_table_size as usize)
    }

    /// Encodes `entries` (strictly ascending keys, values of the configured width).
    ///
    /// Records are stored in input order and each one is prepended to its bucket's chain. An
    /// empty input yields an empty blob.
    pub fn write<'a, I>(&self, entries: I) -> Result<Bytes, Error>
    where
        I: IntoIterator<Item = (u64, &'a [u8])>,
    {
        let value_size = self.cfg.value_size;
        let entries = collect(entries, value_size)?;
        if entries.is_empty() {
            return Ok(Bytes::new());
        }

        let table_size = self.table_size(entries.len());
        let record_size = RECORD_HEADER_SIZE + value_size.bytes();
        let records_start = HEADER_SIZE + table_size * u32::SIZE;
        let size = records_start + entries.len() * record_size;
        check_blob_size(size)?;

        // Link every record into its bucket's chain before emitting anything.
        let mut heads = vec![EMPTY; table_size];
        let mut next = Vec::with_capacity(entries.len());
        for (index, (key, _)) in entries.iter().enumerate() {
            let head = &mut heads[bucket(*key, table_size)];
            next.push(*head);
            *head = (records_start + index * record_size) as u32;
        }

        let mut buf = BytesMut::with_capacity(size);
        (table_size as u32).write(&mut buf);
        (entries.len() as u32).write(&mut buf);
        value_size.tag().write(&mut buf);
        for head in &heads {
            head.write(&mut buf);
        }
        for ((key, value), next) in entries.iter().zip(&next) {
            key.write(&mut buf);
            next.write(&mut buf);
            buf.put_slice(value);
        }
        assert_eq!(buf.len(), size, "encoded size mismatch");

        let used = heads.iter().filter(|head| **head != EMPTY).count();
        debug!(
            entries = entries.len(),
            table_size,
            buckets_used = used,
            size,
            "built chain hash table"
        );
        Ok(buf.freeze())
    }
}
