//! Select an encoding at runtime.

use crate::{chain, trie, Error, Reader, ValueSize};
use bytes::Bytes;

/// An encoding together with its writer configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Trie(trie::Config),
    Chain(chain::Config),
}

impl Default for Format {
    fn default() -> Self {
        Self::Chain(chain::Config::default())
    }
}

impl Format {
    /// Width of the values the format stores.
    pub fn value_size(&self) -> ValueSize {
        match self {
            Self::Trie(cfg) => cfg.value_size,
            Self::Chain(cfg) => cfg.value_size,
        }
    }

    /// Checks the writer configuration.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Trie(cfg) => cfg.validate(),
            Self::Chain(cfg) => cfg.validate(),
        }
    }

    /// Encodes `entries` (strictly ascending keys) with this format.
    pub fn write<'a, I>(&self, entries: I) -> Result<Bytes, Error>
    where
        I: IntoIterator<Item = (u64, &'a [u8])>,
    {
        match self {
            Self::Trie(cfg) => trie::Writer::new(cfg.clone())?.write(entries),
            Self::Chain(cfg) => chain::Writer::new(cfg.clone())?.write(entries),
        }
    }

    /// Opens a blob previously built with this format.
    pub fn reader<'a>(&self, blob: &'a [u8]) -> Result<AnyReader<'a>, Error> {
        match self {
            Self::Trie(cfg) => Ok(AnyReader::Trie(trie::Reader::new(blob, cfg.bitmask)?)),
            Self::Chain(cfg) => {
                let reader = chain::Reader::new(blob)?;
                if let Some(value_size) = reader.value_size() {
                    if value_size != cfg.value_size {
                        return Err(Error::Corrupt("value size does not match format"));
                    }
                }
                Ok(AnyReader::Chain(reader))
            }
        }
    }
}

/// A reader over either encoding.
#[derive(Clone, Copy, Debug)]
pub enum AnyReader<'a> {
    Trie(trie::Reader<'a>),
    Chain(chain::Reader<'a>),
}

impl Reader for AnyReader<'_> {
    fn data(&self) -> &[u8] {
        match self {
            Self::Trie(reader) => reader.data(),
            Self::Chain(reader) => reader.data(),
        }
    }

    fn find(&self, key: u64) -> Option<usize> {
        match self {
            Self::Trie(reader) => reader.find(key),
            Self::Chain(reader) => reader.find(key),
        }
    }
}
