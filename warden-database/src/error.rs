use std::path::PathBuf;

use crate::model::warnings::SubjectId;

/// Failures surfaced by the warning store and ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The store file exists but does not hold a warning mapping.
    #[error("warning store `{}` is corrupt: {source}", .path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("user {subject} has no warnings to remove")]
    NoWarnings { subject: SubjectId },

    #[error("warning store I/O failed on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode warnings: {0}")]
    Serialize(#[from] serde_json::Error),
}
