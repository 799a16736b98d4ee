//! Document categories and their storage subtrees.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level classification of a document. Each category is rooted at its
/// own subtree under `archive/` in the home directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ShortForm,
    LongForm,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::ShortForm, Category::LongForm];

    /// Directory name of the category under `archive/`.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::ShortForm => "short-form",
            Category::LongForm => "long-form",
        }
    }

    /// Storage subtree of this category, relative to the home root.
    #[must_use]
    pub fn subtree(self) -> &'static str {
        match self {
            Category::ShortForm => "archive/short-form",
            Category::LongForm => "archive/long-form",
        }
    }

    /// Which category subtree a home-relative path falls under, if any.
    ///
    /// Documents outside both subtrees (e.g. `lost-files/`) have no
    /// category; a save transaction treats that as "cannot save".
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Category> {
        let mut components = path.components();
        components.find(|c| c.as_os_str().to_str() == Some("archive"))?;
        match components.next()?.as_os_str().to_str()? {
            "short-form" => Some(Category::ShortForm),
            "long-form" => Some(Category::LongForm),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "short-form" => Ok(Category::ShortForm),
            "long-form" => Ok(Category::LongForm),
            other => Err(format!(
                "unknown category '{other}' (expected 'short-form' or 'long-form')"
            )),
        }
    }
}
