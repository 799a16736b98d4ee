//! Base-name sanitization.
//!
//! Document base names are restricted to `[a-z0-9-]`: lowercase, spaces
//! mapped to hyphens, everything else stripped. The physical file name is
//! always `<base>.md`.

/// Fallback base name when sanitization strips every character.
pub const FALLBACK_NAME: &str = "untitled";

/// Sanitize a human title into a storage base name.
///
/// Lowercases ASCII alphanumerics, maps whitespace and underscores to
/// hyphens, drops everything else, collapses hyphen runs, and trims edge
/// hyphens. An empty result falls back to [`FALLBACK_NAME`] so a document
/// can always be named.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        match c {
            c if c.is_ascii_alphanumeric() => out.push(c.to_ascii_lowercase()),
            c if c.is_whitespace() || c == '_' || c == '-' => {
                if !out.is_empty() && !out.ends_with('-') {
                    out.push('-');
                }
            }
            _ => {}
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        out
    }
}
