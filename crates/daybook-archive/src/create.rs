//! Creating new documents.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;

use daybook_core::path::document_path;
use daybook_core::slug::slugify;
use daybook_core::{Category, DaybookError, Result};

use crate::home::{write_atomic, Home};

/// Create a new empty document for `category`, dated `date`.
///
/// The title is sanitized into the storage base name, the dated directory
/// chain is created, and the document is written atomically. Callers
/// rebuild the folder index afterwards.
///
/// Whether creation is offered for a category is the presentation layer's
/// concern (settings toggles); this function accepts any category.
///
/// # Errors
///
/// Returns [`DaybookError::DocumentExists`] if a document with the same
/// name already exists at the target location — creation never overwrites.
pub fn create_document(
    home: &Home,
    category: Category,
    title: &str,
    date: NaiveDate,
) -> Result<PathBuf> {
    let name = slugify(title);
    let path = home.root().join(document_path(category, date, &name));
    if path.exists() {
        return Err(DaybookError::DocumentExists { path });
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    write_atomic(&path, b"")?;
    debug!(path = %path.display(), "created document");
    Ok(path)
}
