//! File I/O utilities.
//!
//! Thin wrappers that map filesystem failures to `SammelbandError::Io`,
//! which always bubbles up unchanged.

use crate::{Result, SammelbandError};
use std::path::Path;
use tokio::fs;

/// Read a file asynchronously.
pub async fn read_file_async(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).await.map_err(SammelbandError::Io)
}

/// Read a file synchronously.
pub fn read_file_sync(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    std::fs::read(path.as_ref()).map_err(SammelbandError::Io)
}

/// Write a file synchronously.
pub fn write_file_sync(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    std::fs::write(path.as_ref(), bytes).map_err(SammelbandError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("payload.bin");
        write_file_sync(&path, b"sammelband").expect("write");
        assert_eq!(read_file_sync(&path).expect("read"), b"sammelband");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_file_sync("/nonexistent/sammelband/input.pdf").unwrap_err();
        assert!(matches!(err, SammelbandError::Io(_)));
    }
}
