//! # daybook-core
//!
//! Core types and pure functions for the daybook archive.
//!
//! This crate defines the foundational pieces used across all other daybook
//! crates:
//! - [`Category`] — short-form / long-form document classification
//! - [`Settings`] — home-directory configuration
//! - Path resolution for the dated hierarchy ([`path`])
//! - Base-name sanitization ([`slug`])
//! - Error hierarchy ([`DaybookError`], [`SaveStep`])
//!
//! Everything here is pure: no I/O, no global state. The file-system layer
//! lives in `daybook-archive`, the editing engine in `daybook-session`.

pub mod category;
pub mod config;
pub mod error;
pub mod path;
pub mod slug;

pub use category::Category;
pub use config::Settings;
pub use error::{DaybookError, Result, SaveStep};
