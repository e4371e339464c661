//! Core types for dirtally.
//!
//! This crate models a scanned directory tree in memory. Directories carry
//! aggregated size, usage and item counts which are either recomputed from
//! scratch with [`FileTree::update_stats`] or kept consistent incrementally
//! by [`FileTree::remove_file`].

mod aggregate;
mod children;
mod config;
mod delete;
mod error;
mod node;
mod remove;
mod tree;

pub use children::Children;
pub use config::{DEFAULT_DIR_OVERHEAD, TreeConfig, TreeConfigBuilder};
pub use delete::Deleter;
pub use error::{Result, TreeError};
pub use node::{FileNode, NodeId, NodeKind, NodeStats};
pub use remove::RemovedEntry;
pub use tree::{Ancestors, Descendants, FileTree};
