//! # daybook-session
//!
//! The document editing-session engine.
//!
//! [`EditSession`] holds the single open document's working state — buffer,
//! pending rename, pending date — and tracks divergence from disk along
//! three independent axes. The save transaction (`EditSession::save`)
//! commits changes back to storage as an ordered move/rename/write
//! sequence guarded by the one-generation backup store.

pub mod save;
pub mod session;

pub use session::{DirtyState, EditSession, OpenDocument, SessionState};
