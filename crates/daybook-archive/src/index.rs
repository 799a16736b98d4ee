//! The navigable folder index.
//!
//! An immutable snapshot of the archive tree, built by plain structural
//! recursion over the category subtrees. It is rebuilt wholesale after
//! every operation that changes the tree shape (create, move, rename) and
//! never patched incrementally, so it can never reflect partial structure.
//! The cost is O(total files) per rebuild, acceptable because rebuilds are
//! user-action-triggered.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use daybook_core::path::DOC_EXTENSION;
use daybook_core::Category;

use crate::backup;
use crate::home::Home;

/// One directory level of the archive tree.
///
/// Children and documents appear in file-system enumeration order, which
/// is not guaranteed sorted; callers must not rely on ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    /// Path of this directory.
    pub path: PathBuf,
    /// Child directories, in discovery order.
    pub children: Vec<FolderNode>,
    /// Documents directly in this directory, in discovery order.
    pub documents: Vec<PathBuf>,
}

impl FolderNode {
    /// Directory name of this node.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or("")
    }

    /// Total number of documents in this subtree.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
            + self
                .children
                .iter()
                .map(FolderNode::document_count)
                .sum::<usize>()
    }

    fn contains(&self, path: &Path) -> bool {
        self.documents.iter().any(|d| d == path)
            || self.children.iter().any(|c| c.contains(path))
    }
}

/// Immutable snapshot of the archive tree, one root per category whose
/// directory exists.
#[derive(Debug, Clone, Default)]
pub struct FolderIndex {
    /// Category roots in [`Category::ALL`] order. Categories whose root
    /// directory is absent are omitted entirely.
    pub roots: Vec<(Category, FolderNode)>,
}

impl FolderIndex {
    /// Scan the category subtrees of `home` and build a fresh snapshot.
    ///
    /// Unreadable directories yield an empty subtree and a warning; the
    /// scan never aborts.
    #[must_use]
    pub fn build(home: &Home) -> Self {
        let mut roots = Vec::new();
        for category in Category::ALL {
            let root = home.category_root(category);
            if root.is_dir() {
                roots.push((category, scan_dir(&root)));
            }
        }
        Self { roots }
    }

    /// The root node for `category`, if its directory existed at build
    /// time.
    #[must_use]
    pub fn root(&self, category: Category) -> Option<&FolderNode> {
        self.roots
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, node)| node)
    }

    /// Whether `path` is indexed as a document anywhere in the snapshot.
    #[must_use]
    pub fn contains_document(&self, path: &Path) -> bool {
        self.roots.iter().any(|(_, node)| node.contains(path))
    }

    /// Total number of documents across all categories.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.roots
            .iter()
            .map(|(_, node)| node.document_count())
            .sum()
    }
}

fn scan_dir(dir: &Path) -> FolderNode {
    let mut node = FolderNode {
        path: dir.to_path_buf(),
        children: Vec::new(),
        documents: Vec::new(),
    };
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
            return node;
        }
    };
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.is_dir() {
            node.children.push(scan_dir(&path));
        } else if is_document(&path) {
            node.documents.push(path);
        }
    }
    node
}

/// A file is a document iff its extension is `md` and its name does not
/// carry the backup marker.
fn is_document(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(DOC_EXTENSION) && !backup::is_backup(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn build_omits_absent_categories() {
        let dir = TempDir::new().unwrap();
        let home = Home::open(dir.path());
        fs::create_dir_all(home.category_root(Category::LongForm)).unwrap();

        let index = FolderIndex::build(&home);
        assert!(index.root(Category::LongForm).is_some());
        assert!(index.root(Category::ShortForm).is_none());
        assert_eq!(index.roots.len(), 1);
    }

    #[test]
    fn build_discovers_nested_documents() {
        let dir = TempDir::new().unwrap();
        let home = Home::open(dir.path());
        let essay = write(
            dir.path(),
            "archive/long-form/2024/03 March/05 Tuesday/essay.md",
            "text",
        );
        let note = write(
            dir.path(),
            "archive/short-form/2024/04 April/10 Wednesday/note.md",
            "text",
        );

        let index = FolderIndex::build(&home);
        assert!(index.contains_document(&essay));
        assert!(index.contains_document(&note));
        assert_eq!(index.document_count(), 2);

        // The tree mirrors the directory hierarchy.
        let long_form = index.root(Category::LongForm).unwrap();
        assert_eq!(long_form.children.len(), 1);
        assert_eq!(long_form.children[0].name(), "2024");
    }

    #[test]
    fn build_excludes_backups_and_foreign_files() {
        let dir = TempDir::new().unwrap();
        let home = Home::open(dir.path());
        let essay = write(
            dir.path(),
            "archive/long-form/2024/03 March/05 Tuesday/essay.md",
            "text",
        );
        write(
            dir.path(),
            "archive/long-form/2024/03 March/05 Tuesday/essay._old.md",
            "backup",
        );
        write(
            dir.path(),
            "archive/long-form/2024/03 March/05 Tuesday/photo.png",
            "bytes",
        );

        let index = FolderIndex::build(&home);
        assert!(index.contains_document(&essay));
        assert_eq!(index.document_count(), 1);
    }

    #[test]
    fn rebuild_reflects_structural_changes() {
        let dir = TempDir::new().unwrap();
        let home = Home::open(dir.path());
        let essay = write(
            dir.path(),
            "archive/long-form/2024/03 March/05 Tuesday/essay.md",
            "text",
        );

        let before = FolderIndex::build(&home);
        assert!(before.contains_document(&essay));

        let moved = write(
            dir.path(),
            "archive/long-form/2024/04 April/10 Wednesday/essay.md",
            "text",
        );
        fs::remove_file(&essay).unwrap();

        // The old snapshot is immutable; a fresh build sees the new shape.
        assert!(before.contains_document(&essay));
        let after = FolderIndex::build(&home);
        assert!(!after.contains_document(&essay));
        assert!(after.contains_document(&moved));
    }
}
