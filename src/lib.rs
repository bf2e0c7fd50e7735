//! ips-patcher: IPS (International Patching System) patch application in Rust.
//!
//! The crate provides:
//! - A pure in-memory IPS decoder and applicator (`ips`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use ips_patcher::ips;
//!
//! // PATCH | 000005 0003 AA BB CC | EOF
//! let raw = b"PATCH\x00\x00\x05\x00\x03\xAA\xBB\xCC\x45\x4F\x46";
//!
//! let patch = ips::decode(raw).unwrap();
//! let patched = patch.apply(&[]);
//! assert_eq!(patched, [0, 0, 0, 0, 0, 0xAA, 0xBB, 0xCC]);
//! ```

pub mod io;
pub mod ips;

#[cfg(feature = "cli")]
pub mod cli;
