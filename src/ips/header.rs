// IPS file framing: magic, end-of-file marker, and record field limits.
//
// Layout (big-endian throughout):
//
//   "PATCH" | record* | "EOF"
//
//   record = address:u24 size:u16 ( data[size] | run_len:u16 fill:u8 )
//
// A record with `size == 0` is a run-length fill record.

// ---------------------------------------------------------------------------
// Magic and marker
// ---------------------------------------------------------------------------

pub const IPS_MAGIC: [u8; 5] = *b"PATCH";

pub const EOF_MARKER: [u8; 3] = *b"EOF";

// ---------------------------------------------------------------------------
// Record fields
// ---------------------------------------------------------------------------

/// Largest address expressible in the 24-bit address field.
pub const MAX_ADDRESS: u32 = 0x00FF_FFFF;

/// Size field value that marks a run-length fill record.
pub const RLE_SIZE: u16 = 0;

/// Returns `true` if `data` begins with the IPS magic.
#[inline]
pub fn has_magic(data: &[u8]) -> bool {
    data.starts_with(&IPS_MAGIC)
}

/// Returns `true` if the `EOF` marker sits at `offset`.
///
/// Fewer than three remaining bytes is not a marker; the caller decides
/// whether that is a truncation.
#[inline]
pub fn is_eof_at(data: &[u8], offset: usize) -> bool {
    offset
        .checked_add(EOF_MARKER.len())
        .and_then(|end| data.get(offset..end))
        .is_some_and(|tail| tail == EOF_MARKER)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
