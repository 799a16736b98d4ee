//! One-generation backup store.
//!
//! Each live document has at most one backup: a byte-for-byte sibling
//! named `<base>._old.md`. Backup identity is derived purely from the
//! document's current path, so moving or renaming a document orphans its
//! old backup; the save transaction deletes the orphan explicitly.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use daybook_core::{DaybookError, Result};

/// Marker suffix distinguishing backup files from documents. Files carrying
/// it are excluded from the folder index.
pub const BACKUP_MARKER: &str = "_old.md";

/// The backup sibling path for a document.
#[must_use]
pub fn backup_path(document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    document.with_file_name(format!("{stem}.{BACKUP_MARKER}"))
}

/// Whether a file name carries the backup marker.
#[must_use]
pub fn is_backup(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(BACKUP_MARKER))
}

/// Copy the document's current on-disk bytes to its backup sibling,
/// replacing any previous backup.
///
/// # Errors
///
/// Returns [`DaybookError::Io`] if the copy fails. Callers outside the
/// critical save path absorb this with a warning — editing continues, only
/// revert capability is lost.
pub fn create(document: &Path) -> Result<()> {
    let target = backup_path(document);
    fs::copy(document, &target)?;
    debug!(path = %target.display(), "backup created");
    Ok(())
}

/// Whether a backup exists for `document`.
#[must_use]
pub fn exists(document: &Path) -> bool {
    backup_path(document).is_file()
}

/// Read the backup bytes for `document`.
///
/// # Errors
///
/// Returns [`DaybookError::BackupMissing`] if no backup is present.
pub fn read(document: &Path) -> Result<Vec<u8>> {
    match fs::read(backup_path(document)) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DaybookError::BackupMissing {
            path: document.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Delete the backup for `document` if present. Idempotent.
///
/// # Errors
///
/// Returns [`DaybookError::Io`] on failures other than the backup already
/// being absent.
pub fn delete(document: &Path) -> Result<()> {
    match fs::remove_file(backup_path(document)) {
        Ok(()) => {
            debug!(path = %backup_path(document).display(), "backup deleted");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc_in(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("essay.md");
        fs::write(&path, "the original text\n").unwrap();
        path
    }

    #[test]
    fn backup_path_uses_marker_sibling() {
        let doc = Path::new("archive/long-form/2024/03 March/05 Tuesday/essay.md");
        assert_eq!(
            backup_path(doc),
            Path::new("archive/long-form/2024/03 March/05 Tuesday/essay._old.md")
        );
    }

    #[test]
    fn backup_files_are_recognized_documents_are_not() {
        assert!(is_backup(Path::new("essay._old.md")));
        assert!(!is_backup(Path::new("essay.md")));
        assert!(!is_backup(Path::new("old-stories.md")));
    }

    #[test]
    fn create_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let doc = doc_in(&dir);

        assert!(!exists(&doc));
        create(&doc).unwrap();
        assert!(exists(&doc));
        assert_eq!(read(&doc).unwrap(), b"the original text\n");
    }

    #[test]
    fn create_replaces_previous_backup() {
        let dir = TempDir::new().unwrap();
        let doc = doc_in(&dir);

        create(&doc).unwrap();
        fs::write(&doc, "newer text\n").unwrap();
        create(&doc).unwrap();
        assert_eq!(read(&doc).unwrap(), b"newer text\n");
    }

    #[test]
    fn read_without_backup_is_backup_missing() {
        let dir = TempDir::new().unwrap();
        let doc = doc_in(&dir);

        let err = read(&doc).unwrap_err();
        assert!(matches!(err, DaybookError::BackupMissing { .. }));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let doc = doc_in(&dir);

        create(&doc).unwrap();
        delete(&doc).unwrap();
        assert!(!exists(&doc));
        // Deleting again is not an error.
        delete(&doc).unwrap();
    }
}
