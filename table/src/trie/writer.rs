use super::{nibble, BitmaskSize, Config};
use crate::{
    entries::{check_blob_size, collect},
    value::ValueArea,
    Error,
};
use bytes::{Bytes, BytesMut};
use htable_codec::{Bitmap, FixedSize, Write};
use tracing::debug;

/// Pointer held by a node before offsets are resolved.
#[derive(Clone, Copy)]
enum Child {
    /// Index of an internal node in the arena.
    Node(usize),
    /// Ordinal of a value slot.
    Slot(usize),
}

/// In-memory node awaiting serialization.
struct Node<M: Bitmap> {
    bitmap: M,
    children: Vec<Child>,
}

impl<M: Bitmap> Node<M> {
    /// Encoded size of the node: bitmap followed by one pointer per set bit.
    fn size(&self) -> usize {
        M::SIZE + self.children.len() * u32::SIZE
    }
}

/// Nodes laid out in depth-first pre-order: a node always precedes its descendants, so the
/// root lands at offset 0.
struct Arena<M: Bitmap> {
    width: u32,
    depth: u32,
    nodes: Vec<Node<M>>,
}

impl<M: Bitmap> Arena<M> {
    fn new() -> Self {
        let width = M::BITS.trailing_zeros();
        Self {
            width,
            depth: 64u32.div_ceil(width),
            nodes: Vec::new(),
        }
    }

    /// Adds the node covering `entries` (all sharing the nibbles above `level`) and its
    /// descendants. `first` is the ordinal of `entries[0]` in the full set.
    fn insert(&mut self, entries: &[(u64, &[u8])], first: usize, level: u32) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            bitmap: M::EMPTY,
            children: Vec::new(),
        });

        let mut bitmap = M::EMPTY;
        let mut children = Vec::new();
        let mut start = 0;
        while start < entries.len() {
            // Sorted keys sharing all higher nibbles are grouped by the nibble at this level.
            let bit = nibble(entries[start].0, level, self.width);
            let mut end = start + 1;
            while end < entries.len() && nibble(entries[end].0, level, self.width) == bit {
                end += 1;
            }
            debug_assert!(!bitmap.contains(bit), "nibbles must ascend within a node");
            bitmap = bitmap.with(bit);

            if level + 1 == self.depth {
                // All key bits are consumed, so unique keys leave one entry per bit.
                debug_assert_eq!(end - start, 1);
                children.push(Child::Slot(first + start));
            } else {
                let child = self.insert(&entries[start..end], first + start, level + 1);
                children.push(Child::Node(child));
            }
            start = end;
        }

        self.nodes[index] = Node { bitmap, children };
        index
    }

    /// Resolves offsets and serializes nodes followed by the value area.
    fn encode(self, entries: &[(u64, &[u8])], area: &mut ValueArea, buf: &mut BytesMut) {
        let mut offsets = Vec::with_capacity(self.nodes.len());
        let mut offset = 0;
        for node in &self.nodes {
            offsets.push(offset);
            offset += node.size();
        }
        debug_assert_eq!(offset, area.offset(0));

        for node in &self.nodes {
            node.bitmap.write(buf);
            for child in &node.children {
                let target = match *child {
                    Child::Node(index) => offsets[index],
                    Child::Slot(ordinal) => area.offset(ordinal),
                };
                (target as u32).write(buf);
            }
        }
        for (_, value) in entries {
            area.push(buf, value);
        }
    }
}

/// Builds trie blobs.
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

    /// Encodes `entries` (strictly ascending keys, values of the configured width).
    ///
    /// An empty input yields an empty blob.
    pub fn write<'a, I>(&self, entries: I) -> Result<Bytes, Error>
    where
        I: IntoIterator<Item = (u64, &'a [u8])>,
    {
        let entries = collect(entries, self.cfg.value_size)?;
        if entries.is_empty() {
            return Ok(Bytes::new());
        }
        match self.cfg.bitmask {
            BitmaskSize::Byte => self.write_with::<u8>(&entries),
            BitmaskSize::Short => self.write_with::<u16>(&entries),
            BitmaskSize::Int => self.write_with::<u32>(&entries),
            BitmaskSize::Long => self.write_with::<u64>(&entries),
        }
    }

    fn write_with<M: Bitmap>(&self, entries: &[(u64, &[u8])]) -> Result<Bytes, Error> {
        let mut arena = Arena::<M>::new();
        arena.insert(entries, 0, 0);

        let nodes_size: usize = arena.nodes.iter().map(Node::size).sum();
        let mut area = ValueArea::new(self.cfg.value_size, nodes_size);
        let size = nodes_size + area.span(entries.len());
        check_blob_size(size)?;

        let node_count = arena.nodes.len();
        let mut buf = BytesMut::with_capacity(size);
        arena.encode(entries, &mut area, &mut buf);
        assert_eq!(buf.len(), size, "encoded size mismatch");
        debug!(
            entries = entries.len(),
            nodes = node_count,
            size,
            bitmask = M::BITS,
            "built trie"
        );
        Ok(buf.freeze())
    }
}
