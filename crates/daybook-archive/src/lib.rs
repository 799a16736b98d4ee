//! # daybook-archive
//!
//! File-system layer for the daybook home directory: scaffolding and
//! settings persistence, the navigable folder index, the one-generation
//! backup store, and document creation.
//!
//! The home directory is the authoritative source of truth. The folder
//! index is a derived snapshot, rebuilt wholesale after any structural
//! change rather than patched incrementally.

pub mod backup;
pub mod create;
pub mod home;
pub mod index;

pub use create::create_document;
pub use home::Home;
pub use index::{FolderIndex, FolderNode};
