//! The home directory: scaffolding, settings persistence, category
//! resolution.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use daybook_core::{Category, DaybookError, Result, Settings};

/// Fixed subdirectories created eagerly when a home directory is
/// initialized.
pub const FIXED_SUBDIRECTORIES: [&str; 7] = [
    "input",
    "archive/long-form",
    "archive/short-form",
    "reusable-images",
    "lost-files",
    "generated-static-html",
    "plug-ins",
];

/// Handle to a daybook home directory.
///
/// Passed explicitly into every entry point that touches storage, so tests
/// can supply isolated roots; there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct Home {
    root: PathBuf,
}

impl Home {
    /// Open a handle to an existing or to-be-initialized home directory.
    #[must_use]
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The home root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute root of a category subtree.
    #[must_use]
    pub fn category_root(&self, category: Category) -> PathBuf {
        self.root.join(category.subtree())
    }

    /// Create the fixed subdirectory structure. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`DaybookError::Io`] if a directory cannot be created.
    pub fn scaffold(&self) -> Result<()> {
        for subdir in FIXED_SUBDIRECTORIES {
            let dir = self.root.join(subdir);
            if !dir.is_dir() {
                fs::create_dir_all(&dir)?;
                debug!(path = %dir.display(), "created home subdirectory");
            }
        }
        Ok(())
    }

    /// Path of the settings file in the home root.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.root.join(Settings::FILE_NAME)
    }

    /// Load settings, falling back to defaults when the file is absent or
    /// unreadable.
    #[must_use]
    pub fn load_settings(&self) -> Settings {
        let path = self.settings_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "settings unreadable, using defaults");
                }
                return Settings::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "settings malformed, using defaults");
                Settings::default()
            }
        }
    }

    /// Persist settings atomically, then re-assert the fixed subdirectory
    /// structure.
    ///
    /// # Errors
    ///
    /// Returns [`DaybookError::Settings`] if serialization fails, or
    /// [`DaybookError::Io`] if the write or scaffolding fails.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let raw = serde_json::to_string_pretty(settings)
            .map_err(|e| DaybookError::Settings(e.to_string()))?;
        fs::create_dir_all(&self.root)?;
        write_atomic(&self.settings_path(), raw.as_bytes())?;
        self.scaffold()
    }

    /// Which category subtree `path` falls under, if any.
    ///
    /// Accepts absolute paths under the home root as well as home-relative
    /// ones. A save transaction treats `None` as "cannot save".
    #[must_use]
    pub fn category_of(&self, path: &Path) -> Option<Category> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        Category::from_path(relative)
    }
}

/// Write `bytes` to `path` through a temporary sibling and rename, so a
/// crash mid-write cannot leave a truncated file.
///
/// # Errors
///
/// Returns the underlying I/O error if the temporary file cannot be
/// written or moved into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
    io::Write::write_all(&mut tmp, bytes)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scaffold_creates_all_fixed_subdirectories() {
        let dir = TempDir::new().unwrap();
        let home = Home::open(dir.path());
        home.scaffold().unwrap();

        for subdir in FIXED_SUBDIRECTORIES {
            assert!(dir.path().join(subdir).is_dir(), "missing {subdir}");
        }

        // Running again is a no-op, not an error.
        home.scaffold().unwrap();
    }

    #[test]
    fn load_settings_defaults_when_absent() {
        let dir = TempDir::new().unwrap();
        let home = Home::open(dir.path());
        assert_eq!(home.load_settings(), Settings::default());
    }

    #[test]
    fn load_settings_defaults_when_malformed() {
        let dir = TempDir::new().unwrap();
        let home = Home::open(dir.path());
        fs::write(home.settings_path(), "not json {").unwrap();
        assert_eq!(home.load_settings(), Settings::default());
    }

    #[test]
    fn save_settings_round_trips_and_scaffolds() {
        let dir = TempDir::new().unwrap();
        let home = Home::open(dir.path());

        let settings = Settings {
            home_directory: dir.path().display().to_string(),
            site_url: "https://example.org".to_string(),
            short_form_enabled: false,
            long_form_enabled: true,
        };
        home.save_settings(&settings).unwrap();

        assert_eq!(home.load_settings(), settings);
        // Saving settings re-asserts the directory structure.
        assert!(dir.path().join("archive/long-form").is_dir());
        assert!(dir.path().join("plug-ins").is_dir());
    }

    #[test]
    fn category_of_resolves_absolute_and_relative_paths() {
        let dir = TempDir::new().unwrap();
        let home = Home::open(dir.path());

        let absolute = dir
            .path()
            .join("archive/short-form/2024/03 March/05 Tuesday/note.md");
        assert_eq!(home.category_of(&absolute), Some(Category::ShortForm));

        let relative = Path::new("archive/long-form/2024/03 March/05 Tuesday/essay.md");
        assert_eq!(home.category_of(relative), Some(Category::LongForm));

        let outside = dir.path().join("lost-files/orphan.md");
        assert_eq!(home.category_of(&outside), None);
    }

    #[test]
    fn write_atomic_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }
}
