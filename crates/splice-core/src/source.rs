use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::SpliceFile;
use crate::format::splice::{decode, error::SpliceError};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SPLICE decode error: {0}")]
    Format(#[from] SpliceError),
}

/// Read a `.splice` file into memory and decode it.
///
/// # Errors
/// Returns `SourceError::Io` when the file cannot be read and
/// `SourceError::Format` when its contents are not a valid SPLICE buffer.
pub fn decode_file(path: &Path) -> Result<SpliceFile, SourceError> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read splice file");
    Ok(decode(&bytes)?)
}
