//! Error types for daybook.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level result type for daybook operations.
pub type Result<T> = std::result::Result<T, DaybookError>;

/// Identifies which step of the save transaction failed.
///
/// Steps run in this order; a failure halts the transaction and no later
/// step is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStep {
    /// Moving the document into the directory for its effective date.
    Relocate,
    /// Renaming the document file.
    Rename,
    /// Writing the working buffer to the final path.
    WriteContent,
}

impl fmt::Display for SaveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SaveStep::Relocate => "relocate",
            SaveStep::Rename => "rename",
            SaveStep::WriteContent => "write-content",
        };
        f.write_str(name)
    }
}

/// Top-level error type for daybook.
#[derive(Debug, Error)]
pub enum DaybookError {
    /// Revert was requested but no backup exists for the open document.
    #[error("no backup exists for {}", .path.display())]
    BackupMissing { path: PathBuf },

    /// A save transaction step failed. The session remains dirty and no
    /// later step was applied; the document is still recoverable at its
    /// pre-transaction location.
    #[error("save failed at {} step for {}: {}", .step, .path.display(), .source)]
    SaveStepFailed {
        step: SaveStep,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document path does not fall under any category subtree, so a
    /// save cannot determine its storage root. Aborted before any mutation.
    #[error("cannot resolve a category for {}", .path.display())]
    CategoryUnresolved { path: PathBuf },

    /// A document with the same name already exists at the creation target.
    #[error("document already exists at {}", .path.display())]
    DocumentExists { path: PathBuf },

    /// An operation that requires an open document was called on a closed
    /// session.
    #[error("no document is open")]
    NoOpenDocument,

    #[error("settings error: {0}")]
    Settings(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
