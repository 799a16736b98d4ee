//! The document editing session.
//!
//! Exactly one document is open at a time; opening another tears the
//! previous one down, including its backup — one-level undo is scoped to
//! the currently open document only.
//!
//! Dirty state is tracked per axis and recomputed on every edit:
//! - content: working buffer vs the bytes currently on disk, re-read at
//!   evaluation time (a live comparison, never a sticky flag)
//! - name: sanitized pending name vs the on-disk base name
//! - date: pending date present and different in value from the on-disk
//!   date (mere presence does not count, so an untouched date picker
//!   causes no directory churn)
//!
//! All mutation goes through `&mut self`, so the borrow checker enforces
//! the single-writer rule; a session shared across threads is owned behind
//! a single lock, which serializes read/edit/save/revert as required.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::warn;

use daybook_archive::backup;
use daybook_core::path::parse_date;
use daybook_core::slug::slugify;
use daybook_core::{DaybookError, Result};

/// Dirty state of the open document, one flag per divergence axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyState {
    /// Working buffer differs from the bytes currently on disk.
    pub content: bool,
    /// Sanitized pending name differs from the on-disk base name.
    pub name: bool,
    /// Pending date is set and differs from the on-disk date.
    pub date: bool,
}

impl DirtyState {
    /// Whether any axis diverges. This is what gates the Save affordance —
    /// it reflects structural moves (rename, re-date) that do not touch
    /// file bytes at all.
    #[must_use]
    pub fn any(self) -> bool {
        self.content || self.name || self.date
    }
}

/// Observable session state. The transitional states (loading, saving,
/// reverting) are method-scoped and never observable between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Clean,
    Dirty,
}

/// Working state of the currently open document.
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub(crate) path: PathBuf,
    pub(crate) name: String,
    pub(crate) date: NaiveDate,
    pub(crate) date_fallback: bool,
    pub(crate) buffer: String,
    pub(crate) pending_name: Option<String>,
    pub(crate) pending_date: Option<NaiveDate>,
    pub(crate) dirty: DirtyState,
}

impl OpenDocument {
    /// Current storage path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name derived from the current file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Authored date derived from the current path (or today, when the
    /// path was undated).
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether the date fell back to "today" because the path carried no
    /// parseable date.
    #[must_use]
    pub fn used_date_fallback(&self) -> bool {
        self.date_fallback
    }

    /// The working buffer.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn pending_name(&self) -> Option<&str> {
        self.pending_name.as_deref()
    }

    #[must_use]
    pub fn pending_date(&self) -> Option<NaiveDate> {
        self.pending_date
    }

    #[must_use]
    pub fn dirty(&self) -> DirtyState {
        self.dirty
    }
}

/// The editing session: `Closed` or holding one [`OpenDocument`].
#[derive(Debug, Default)]
pub struct EditSession {
    pub(crate) open: Option<OpenDocument>,
    suppress: bool,
}

impl EditSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The open document, if any.
    #[must_use]
    pub fn document(&self) -> Option<&OpenDocument> {
        self.open.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Dirty state of the open document; all-clear when closed.
    #[must_use]
    pub fn dirty(&self) -> DirtyState {
        self.open.as_ref().map(|doc| doc.dirty).unwrap_or_default()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.open {
            None => SessionState::Closed,
            Some(doc) if doc.dirty.any() => SessionState::Dirty,
            Some(_) => SessionState::Clean,
        }
    }

    /// Whether a backup exists for the open document, i.e. whether revert
    /// is available.
    #[must_use]
    pub fn has_backup(&self) -> bool {
        self.open
            .as_ref()
            .is_some_and(|doc| backup::exists(&doc.path))
    }

    /// Open the document at `path` for editing.
    ///
    /// Any previously open document is torn down first, including its
    /// backup. A backup is then ensured for the new document (created if
    /// absent; creation failure is absorbed with a warning — editing
    /// continues without revert capability). The base name derives from
    /// the file name and the date from the path, falling back to today
    /// when the path carries no parseable date.
    ///
    /// # Errors
    ///
    /// Returns [`DaybookError::Io`] if the document cannot be read, in
    /// which case the session is left closed.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();

        if let Some(prev) = self.open.take() {
            if prev.path != path {
                if let Err(e) = backup::delete(&prev.path) {
                    warn!(path = %prev.path.display(), error = %e, "backup cleanup failed");
                }
            }
        }

        if !backup::exists(&path) {
            if let Err(e) = backup::create(&path) {
                warn!(path = %path.display(), error = %e, "backup creation failed; revert unavailable");
            }
        }

        let contents = fs::read_to_string(&path)?;
        let name = base_name(&path);
        let (date, date_fallback) = match parse_date(&path) {
            Some(date) => (date, false),
            None => {
                warn!(path = %path.display(), "path carries no date; defaulting to today");
                (Local::now().date_naive(), true)
            }
        };

        self.open = Some(OpenDocument {
            path,
            name,
            date,
            date_fallback,
            buffer: String::new(),
            pending_name: None,
            pending_date: None,
            dirty: DirtyState::default(),
        });
        self.with_suppressed(|session| session.set_buffer(contents));
        Ok(())
    }

    /// Replace the working buffer with `text` and recompute dirty state.
    ///
    /// # Errors
    ///
    /// Returns [`DaybookError::NoOpenDocument`] when no document is open.
    pub fn edit_content(&mut self, text: impl Into<String>) -> Result<()> {
        if self.open.is_none() {
            return Err(DaybookError::NoOpenDocument);
        }
        self.set_buffer(text.into());
        Ok(())
    }

    /// Set the pending name and recompute dirty state. The candidate is
    /// kept raw; sanitization happens at comparison and save time.
    ///
    /// # Errors
    ///
    /// Returns [`DaybookError::NoOpenDocument`] when no document is open.
    pub fn edit_name(&mut self, name: impl Into<String>) -> Result<()> {
        let doc = self.open.as_mut().ok_or(DaybookError::NoOpenDocument)?;
        doc.pending_name = Some(name.into());
        self.recompute_dirty();
        Ok(())
    }

    /// Set the pending date and recompute dirty state.
    ///
    /// # Errors
    ///
    /// Returns [`DaybookError::NoOpenDocument`] when no document is open.
    pub fn edit_date(&mut self, date: NaiveDate) -> Result<()> {
        let doc = self.open.as_mut().ok_or(DaybookError::NoOpenDocument)?;
        doc.pending_date = Some(date);
        self.recompute_dirty();
        Ok(())
    }

    /// Restore the working buffer from the backup and clear pending
    /// name/date back to the values derivable from the current path.
    ///
    /// Revert is buffer-level: it does not rewrite the on-disk file, so a
    /// subsequent save is required to persist the reverted state.
    ///
    /// # Errors
    ///
    /// Returns [`DaybookError::BackupMissing`] when no backup exists, and
    /// [`DaybookError::NoOpenDocument`] when no document is open.
    pub fn revert(&mut self) -> Result<()> {
        let doc = self.open.as_mut().ok_or(DaybookError::NoOpenDocument)?;
        let bytes = backup::read(&doc.path)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        doc.pending_name = None;
        doc.pending_date = None;
        self.with_suppressed(|session| session.set_buffer(text));
        self.recompute_dirty();
        Ok(())
    }

    /// Close the open document, deleting its backup. One-level undo does
    /// not survive navigating away. No-op when already closed.
    pub fn close(&mut self) {
        if let Some(doc) = self.open.take() {
            if let Err(e) = backup::delete(&doc.path) {
                warn!(path = %doc.path.display(), error = %e, "backup cleanup failed");
            }
        }
    }

    /// Run `f` with edit-triggered dirty recomputation disabled.
    ///
    /// Programmatic buffer assignment (open, revert) goes through the same
    /// setter as user edits but must not be treated as one. The scope is
    /// entered before the assignment and exited synchronously afterwards;
    /// nothing is deferred to a scheduler tick.
    fn with_suppressed<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let prev = self.suppress;
        self.suppress = true;
        let out = f(self);
        self.suppress = prev;
        out
    }

    fn set_buffer(&mut self, text: String) {
        if let Some(doc) = self.open.as_mut() {
            doc.buffer = text;
        }
        if !self.suppress {
            self.recompute_dirty();
        }
    }

    /// Recompute all three dirty flags from current state.
    pub(crate) fn recompute_dirty(&mut self) {
        let Some(doc) = self.open.as_mut() else { return };
        // Live comparison against disk. An unreadable file counts as
        // unchanged, matching load behavior.
        let content = match fs::read_to_string(&doc.path) {
            Ok(on_disk) => doc.buffer != on_disk,
            Err(_) => false,
        };
        let name = doc
            .pending_name
            .as_deref()
            .is_some_and(|candidate| slugify(candidate) != doc.name);
        let date = doc.pending_date.is_some_and(|pending| pending != doc.date);
        doc.dirty = DirtyState {
            content,
            name,
            date,
        };
    }
}

pub(crate) fn base_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
