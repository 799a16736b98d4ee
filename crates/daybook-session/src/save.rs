//! The save transaction.
//!
//! Commits the session's working state to storage as an ordered sequence:
//!
//! 1. relocate the file when the effective date resolves to a different
//!    directory (overwriting a same-named file at the destination)
//! 2. rename the file when the sanitized pending name differs (again
//!    overwriting)
//! 3. write the working buffer to the final path with atomic replace
//! 4. delete the backup keyed to the original path when identity changed
//! 5. create a fresh backup keyed to the final path
//!
//! Steps 1–3 must each succeed before the next begins. A failure halts the
//! transaction with the failing step identified and leaves the session
//! dirty so the user can retry; the document is still recoverable at its
//! pre-transaction location. Steps 4–5 are backup rotation: the document
//! bytes are already durable, so their failures are absorbed with a
//! warning (a stale backup after a partial rename is an accepted risk).

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use daybook_archive::backup;
use daybook_archive::home::{write_atomic, Home};
use daybook_core::path::{archive_path, DOC_EXTENSION};
use daybook_core::slug::slugify;
use daybook_core::{DaybookError, Result, SaveStep};

use crate::session::EditSession;

impl EditSession {
    /// Commit the working buffer and pending name/date to storage.
    ///
    /// Returns the document's final path. The effective date is the
    /// pending date if one is set, else the original; likewise for the
    /// name. On success the session references the final path with
    /// pending fields cleared and dirty flags recomputed (all false). The
    /// caller rebuilds the folder index afterwards.
    ///
    /// Calling on a clean session is a no-op returning the current path.
    ///
    /// # Errors
    ///
    /// - [`DaybookError::NoOpenDocument`] when no document is open.
    /// - [`DaybookError::CategoryUnresolved`] when the document path falls
    ///   under no category subtree; nothing has been mutated.
    /// - [`DaybookError::SaveStepFailed`] when a required step fails; no
    ///   later step was applied and the session remains dirty.
    pub fn save(&mut self, home: &Home) -> Result<PathBuf> {
        let doc = self.open.as_mut().ok_or(DaybookError::NoOpenDocument)?;
        if !doc.dirty.any() {
            return Ok(doc.path.clone());
        }

        let original = doc.path.clone();
        let category = home
            .category_of(&original)
            .ok_or_else(|| DaybookError::CategoryUnresolved {
                path: original.clone(),
            })?;

        let effective_date = doc.pending_date.unwrap_or(doc.date);
        let effective_name = doc
            .pending_name
            .as_deref()
            .map(slugify)
            .unwrap_or_else(|| doc.name.clone());

        let mut current = original.clone();

        // Step 1: relocate into the directory for the effective date.
        let target_dir = home.root().join(archive_path(category, effective_date));
        let dir_differs = current
            .parent()
            .is_none_or(|dir| normalized(dir) != normalized(&target_dir));
        if dir_differs {
            let file_name = current.file_name().map(ToOwned::to_owned).unwrap_or_default();
            let moved = target_dir.join(file_name);
            fs::create_dir_all(&target_dir)
                .and_then(|()| replace(&current, &moved))
                .map_err(|e| step_failed(SaveStep::Relocate, &current, e))?;
            debug!(from = %current.display(), to = %moved.display(), "relocated document");
            current = moved;
        }

        // Step 2: rename to the effective base name.
        let target_file = format!("{effective_name}.{DOC_EXTENSION}");
        if current.file_name().and_then(|n| n.to_str()) != Some(target_file.as_str()) {
            let renamed = current.with_file_name(&target_file);
            replace(&current, &renamed).map_err(|e| step_failed(SaveStep::Rename, &current, e))?;
            debug!(from = %current.display(), to = %renamed.display(), "renamed document");
            current = renamed;
        }

        // Step 3: write the buffer to the final path.
        write_atomic(&current, doc.buffer.as_bytes())
            .map_err(|e| step_failed(SaveStep::WriteContent, &current, e))?;

        // Steps 4–5: backup rotation. Non-fatal from here on.
        if normalized(&current) != normalized(&original) {
            if let Err(e) = backup::delete(&original) {
                warn!(path = %original.display(), error = %e, "orphaned backup cleanup failed");
            }
        }
        if let Err(e) = backup::create(&current) {
            warn!(path = %current.display(), error = %e, "backup rotation failed; revert unavailable until next save");
        }

        // The session now references the final identity.
        doc.path = current.clone();
        doc.name = effective_name;
        doc.date = effective_date;
        doc.date_fallback = false;
        doc.pending_name = None;
        doc.pending_date = None;
        self.recompute_dirty();
        debug!(path = %current.display(), "save transaction committed");
        Ok(current)
    }
}

fn step_failed(step: SaveStep, path: &Path, source: io::Error) -> DaybookError {
    DaybookError::SaveStepFailed {
        step,
        path: path.to_path_buf(),
        source,
    }
}

/// Move `from` onto `to`, overwriting any pre-existing file at `to`.
fn replace(from: &Path, to: &Path) -> io::Result<()> {
    match fs::remove_file(to) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::rename(from, to)
}

/// Strip `.` components so `./archive/x` and `archive/x` compare equal.
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
