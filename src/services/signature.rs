// Binary signature sniffing for zip archives

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use crate::utils::error::{ImportError, Result};

/// Zip local-file-header magic number (`PK\x03\x04`)
pub const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Whether a header slice starts with the zip local-file-header magic
pub fn is_zip_magic(header: &[u8]) -> bool {
    header.starts_with(&ZIP_MAGIC)
}

/// Classify an existing filesystem object as a zip archive or not.
///
/// Directories are never archives. Files shorter than the magic number are
/// not archives. Any other read failure is reported instead of being
/// treated as "not an archive".
pub fn is_archive(path: &Path) -> Result<bool> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ImportError::from_io_at(path, "Failed to inspect", e))?;
    if metadata.is_dir() {
        return Ok(false);
    }

    let mut file =
        File::open(path).map_err(|e| ImportError::from_io_at(path, "Failed to open", e))?;

    let mut header = [0u8; 4];
    match file.read_exact(&mut header) {
        Ok(()) => Ok(is_zip_magic(&header)),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(ImportError::from_io_at(path, "Failed to read signature of", e)),
    }
}
