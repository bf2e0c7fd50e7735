// IPS (International Patching System) format implementation.
//
// # Modules
//
// - `header`  - Magic, `EOF` marker and record field limits
// - `cursor`  - Bounds-checked big-endian reads over a byte slice
// - `cluster` - A single patch record (literal bytes or run-length fill)
// - `patch`   - Ordered cluster list and the applicator
// - `decoder` - Magic validation and record parsing

pub mod cluster;
pub mod cursor;
pub mod decoder;
pub mod header;
pub mod patch;

// Re-export key types for convenience.
pub use cluster::{Cluster, Payload};
pub use decoder::{ClusterIter, FormatError, apply_memory, decode};
pub use header::{EOF_MARKER, IPS_MAGIC, MAX_ADDRESS};
pub use patch::Patch;
