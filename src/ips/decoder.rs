// IPS decoder: magic validation and cluster-by-cluster parsing.
//
// The read cursor lives inside `ClusterIter`, so a decoder holds no shared
// state and any number of buffers can be decoded concurrently.

use thiserror::Error;

use super::cluster::{Cluster, Payload};
use super::cursor::ByteCursor;
use super::header::{self, IPS_MAGIC, RLE_SIZE};
use super::patch::Patch;

// ---------------------------------------------------------------------------
// Decoder error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid magic: the binary is not an IPS patch")]
    InvalidMagic,
    #[error("truncated patch: needed {needed} byte(s) at offset {offset}")]
    Truncated { offset: usize, needed: usize },
    #[error("address {0:#X} does not fit in 24 bits")]
    AddressOutOfRange(u32),
    #[error("literal length {0} is outside 1..=65535")]
    LiteralLength(usize),
}

// ---------------------------------------------------------------------------
// Cluster iterator
// ---------------------------------------------------------------------------

/// Lazily decodes clusters from an in-memory IPS patch.
///
/// Yields `Ok(cluster)` for each record until the `EOF` marker, or a single
/// `Err` on the first malformed record, then `None`.
#[derive(Debug, Clone)]
pub struct ClusterIter<'a> {
    data: &'a [u8],
    cursor: ByteCursor<'a>,
    eof_offset: Option<usize>,
    failed: bool,
}

impl<'a> ClusterIter<'a> {
    /// Validate the magic and position the cursor on the first record.
    pub fn new(data: &'a [u8]) -> Result<Self, FormatError> {
        if !header::has_magic(data) {
            return Err(FormatError::InvalidMagic);
        }
        Ok(Self {
            data,
            cursor: ByteCursor::new(data, IPS_MAGIC.len()),
            eof_offset: None,
            failed: false,
        })
    }

    /// Offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.cursor.position()
    }

    /// Offset of the `EOF` marker, once it has been reached.
    pub fn eof_offset(&self) -> Option<usize> {
        self.eof_offset
    }

    fn next_cluster(&mut self) -> Result<Option<Cluster>, FormatError> {
        let start = self.cursor.position();
        if header::is_eof_at(self.data, start) {
            self.eof_offset = Some(start);
            return Ok(None);
        }

        let address = self.cursor.read_u24_be()?;
        let size = self.cursor.read_u16_be()?;
        let payload = if size == RLE_SIZE {
            let len = self.cursor.read_u16_be()?;
            let byte = self.cursor.read_u8()?;
            Payload::Fill { byte, len }
        } else {
            Payload::Literal(self.cursor.take(size as usize)?.to_vec())
        };

        Cluster::new(address, payload).map(Some)
    }
}

impl Iterator for ClusterIter<'_> {
    type Item = Result<Cluster, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.eof_offset.is_some() {
            return None;
        }
        match self.next_cluster() {
            Ok(cluster) => cluster.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for ClusterIter<'_> {}

// ---------------------------------------------------------------------------
// Convenience functions
// ---------------------------------------------------------------------------

/// Decode a complete IPS patch held in memory.
///
/// Bytes after the `EOF` marker are ignored. No partial patch is returned on
/// error.
pub fn decode(data: &[u8]) -> Result<Patch, FormatError> {
    ClusterIter::new(data)?.collect()
}

/// Decode `patch` and apply it to `target` in one step.
pub fn apply_memory(patch: &[u8], target: &[u8]) -> Result<Vec<u8>, FormatError> {
    Ok(decode(patch)?.apply(target))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
