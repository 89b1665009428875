//! Word-store error types.
//!
//! Only two failures abort a load: an unreadable backing file and a due
//! timestamp that does not parse. Everything else the parser recovers from,
//! reporting a [`crate::store::ParseDiagnostic`] instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving a word database file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `<activedue>`/`<passivedue>` line carried a value that is not a
    /// number. Scheduling state would silently corrupt if this were
    /// coerced, so it is fatal rather than recovered.
    #[error("line {line}: invalid due timestamp '{value}'")]
    InvalidDueTimestamp { line: usize, value: String },
}

impl StoreError {
    /// Returns `true` if the failure came from file I/O rather than from
    /// the file's contents.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io { .. })
    }
}
