//! Whole-file reads that never fail the scan

use std::path::Path;

/// Read a source file, decoding invalid UTF-8 lossily.
///
/// A file that vanished or cannot be read yields `None`; callers treat it
/// as contributing nothing.
pub fn read_source(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Skipping missing file: {}", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", path.display(), e);
            None
        }
    }
}
