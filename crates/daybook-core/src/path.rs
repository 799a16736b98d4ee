//! Path resolution for the dated archive hierarchy.
//!
//! Documents live under a fixed three-level calendar hierarchy:
//!
//! ```text
//! archive/<category>/<YYYY>/<MM Month>/<DD Weekday>/<name>.md
//! ```
//!
//! Month and weekday names use chrono's default English rendering, which
//! does not consult the system locale, so resolved paths are identical
//! across machines.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::category::Category;

/// File extension of every document.
pub const DOC_EXTENSION: &str = "md";

/// Resolve the storage directory for a category and date, relative to the
/// home root. Pure and deterministic.
#[must_use]
pub fn archive_path(category: Category, date: NaiveDate) -> PathBuf {
    let mut path = PathBuf::from(category.subtree());
    path.push(date.format("%Y").to_string());
    path.push(date.format("%m %B").to_string());
    path.push(date.format("%d %A").to_string());
    path
}

/// Resolve the full home-relative path of a document.
#[must_use]
pub fn document_path(category: Category, date: NaiveDate, base_name: &str) -> PathBuf {
    archive_path(category, date).join(format!("{base_name}.{DOC_EXTENSION}"))
}

/// Parse the authored date back out of a document path.
///
/// Reads the last three directory segments above the file name
/// (`<YYYY>/<MM Month>/<DD Weekday>`), using only their leading numerals —
/// the month and weekday names are decorative. Returns `None` when there
/// are not enough segments or the numerals do not form a valid calendar
/// date; callers fall back to the current date and log a warning.
#[must_use]
pub fn parse_date(path: &Path) -> Option<NaiveDate> {
    let dir = path.parent()?;
    let mut segments = dir
        .components()
        .rev()
        .filter_map(|c| c.as_os_str().to_str());
    let day = leading_number(segments.next()?)?;
    let month = leading_number(segments.next()?)?;
    let year = leading_number(segments.next()?)?;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn leading_number(segment: &str) -> Option<u32> {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    if end == 0 {
        return None;
    }
    segment[..end].parse().ok()
}
