// File-level I/O helpers for applying IPS patches.
//
// Provides `read_bytes()`, `write_bytes()` and the `patch_file()` pipeline
// that reads a patch and a target, applies the patch, and writes the result.
// Optionally computes SHA-256 checksums (feature-gated behind `file-io`).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "file-io")]
use sha2::Digest;

use thiserror::Error;

use crate::ips::{self, FormatError};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Size and checksum of one file touched by `patch_file()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Path as given by the caller.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// SHA-256 of the contents (if `file-io` feature is enabled).
    pub sha256: Option<[u8; 32]>,
}

impl FileSummary {
    fn of(path: &Path, data: &[u8]) -> Self {
        Self {
            path: path.to_path_buf(),
            size: data.len() as u64,
            sha256: sha256(data),
        }
    }

    /// Lowercase hex SHA-256, or `None` without the `file-io` feature.
    #[cfg(feature = "file-io")]
    pub fn sha256_hex(&self) -> Option<String> {
        self.sha256.map(hex::encode)
    }

    #[cfg(not(feature = "file-io"))]
    pub fn sha256_hex(&self) -> Option<String> {
        None
    }
}

/// Which file a `FileSummary` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Patch,
    Target,
    Output,
}

/// Statistics returned by `patch_file()`.
#[derive(Debug, Clone)]
pub struct PatchStats {
    pub patch: FileSummary,
    pub target: FileSummary,
    pub output: FileSummary,
    /// Number of clusters in the decoded patch.
    pub clusters: usize,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The patch file is not a well-formed IPS stream.
    #[error("failed to parse {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl IoError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Default buffer size
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// read_bytes / write_bytes
// ---------------------------------------------------------------------------

/// Read a whole file into memory.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, IoError> {
    let data = std::fs::read(path).map_err(|e| IoError::io(path, e))?;
    log::debug!("read {} ({} bytes)", path.display(), data.len());
    Ok(data)
}

/// Create or truncate `path` and write `data` to it.
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::io(path, e))?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
    writer
        .write_all(data)
        .and_then(|()| writer.flush())
        .map_err(|e| IoError::io(path, e))?;
    log::debug!("wrote {} ({} bytes)", path.display(), data.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// patch_file
// ---------------------------------------------------------------------------

/// Apply the IPS patch at `patch_path` to `target_path`, writing the result
/// to `output_path`.
///
/// The patch is decoded before the target is read, so a malformed patch
/// never touches the target or output. The output summary is taken from the
/// file as read back after writing.
pub fn patch_file(
    patch_path: &Path,
    target_path: &Path,
    output_path: &Path,
) -> Result<PatchStats, IoError> {
    patch_file_with(patch_path, target_path, output_path, |_, _| {})
}

/// Like `patch_file()`, but reports each file's summary to `on_summary` as
/// soon as that file has been read, before later steps can fail.
pub fn patch_file_with<F>(
    patch_path: &Path,
    target_path: &Path,
    output_path: &Path,
    mut on_summary: F,
) -> Result<PatchStats, IoError>
where
    F: FnMut(FileRole, &FileSummary),
{
    let patch_data = read_bytes(patch_path)?;
    let patch_summary = FileSummary::of(patch_path, &patch_data);
    on_summary(FileRole::Patch, &patch_summary);

    let patch = ips::decode(&patch_data).map_err(|source| IoError::Format {
        path: patch_path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "decoded {} cluster(s), highest patched offset {:#X}",
        patch.len(),
        patch.highest_patched_offset()
    );

    let target = read_bytes(target_path)?;
    let target_summary = FileSummary::of(target_path, &target);
    on_summary(FileRole::Target, &target_summary);

    let output = patch.apply(&target);
    write_bytes(output_path, &output)?;

    let written = read_bytes(output_path)?;
    let output_summary = FileSummary::of(output_path, &written);
    on_summary(FileRole::Output, &output_summary);

    Ok(PatchStats {
        patch: patch_summary,
        target: target_summary,
        output: output_summary,
        clusters: patch.len(),
    })
}

// ---------------------------------------------------------------------------
// Checksums
// ---------------------------------------------------------------------------

#[cfg(feature = "file-io")]
fn sha256(data: &[u8]) -> Option<[u8; 32]> {
    Some(sha2::Sha256::digest(data).into())
}

#[cfg(not(feature = "file-io"))]
fn sha256(_data: &[u8]) -> Option<[u8; 32]> {
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
