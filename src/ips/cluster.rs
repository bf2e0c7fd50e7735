// IPS cluster: a single addressed write (literal bytes or a run-length fill).

use super::decoder::FormatError;
use super::header::MAX_ADDRESS;

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// What a cluster writes at its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Bytes copied verbatim into the output.
    Literal(Vec<u8>),
    /// `byte` repeated `len` times.
    Fill { byte: u8, len: u16 },
}

impl Payload {
    /// Number of output bytes this payload writes.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Literal(data) => data.len(),
            Self::Fill { len, .. } => *len as usize,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Cluster
// ---------------------------------------------------------------------------

/// One patch record. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    address: u32,
    payload: Payload,
}

impl Cluster {
    /// Build a cluster from a 24-bit address and a payload.
    ///
    /// Literal data must hold 1..=65535 bytes, since a zero size field on
    /// the wire means a fill record.
    pub fn new(address: u32, payload: Payload) -> Result<Self, FormatError> {
        if address > MAX_ADDRESS {
            return Err(FormatError::AddressOutOfRange(address));
        }
        if let Payload::Literal(data) = &payload
            && (data.is_empty() || data.len() > u16::MAX as usize)
        {
            return Err(FormatError::LiteralLength(data.len()));
        }
        Ok(Self { address, payload })
    }

    /// Literal-bytes cluster.
    pub fn literal(address: u32, data: impl Into<Vec<u8>>) -> Result<Self, FormatError> {
        Self::new(address, Payload::Literal(data.into()))
    }

    /// Run-length fill cluster.
    pub fn fill(address: u32, byte: u8, len: u16) -> Result<Self, FormatError> {
        Self::new(address, Payload::Fill { byte, len })
    }

    #[inline]
    pub fn address(&self) -> u32 {
        self.address
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Bytes written by this cluster.
    #[inline]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// One past the last output offset this cluster writes.
    #[inline]
    pub fn end(&self) -> usize {
        self.address as usize + self.len()
    }

    /// Write the payload into `dst` at this cluster's address.
    ///
    /// `dst` must be at least `self.end()` bytes long; `Patch::apply`
    /// sizes its buffer so this always holds.
    pub fn apply_to(&self, dst: &mut [u8]) {
        let range = self.address as usize..self.end();
        match &self.payload {
            Payload::Literal(data) => dst[range].copy_from_slice(data),
            Payload::Fill { byte, .. } => dst[range].fill(*byte),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
