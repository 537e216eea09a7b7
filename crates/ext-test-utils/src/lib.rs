//! Shared test utilities for the extension-manager workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] — git repository fixtures, including clones of local upstreams
//! - [`tree`] — [`tree::ExtensionTree`] builder for builtin and user extension roots

pub mod git;
pub mod tree;
