//! Error types for tree operations.

use std::path::PathBuf;

use compact_str::CompactString;
use thiserror::Error;

use crate::node::NodeId;

/// Result alias used throughout the crate.
pub type Result<T, E = TreeError> = std::result::Result<T, E>;

/// Errors that can occur while building or mutating a [`FileTree`](crate::FileTree).
#[derive(Debug, Error)]
pub enum TreeError {
    /// The tree is malformed (dangling node, empty base path, cycle).
    #[error("Invalid tree at node {id}: {reason}")]
    InvalidTree { id: NodeId, reason: String },

    /// The id does not refer to a live node.
    #[error("Unknown node: {id}")]
    UnknownNode { id: NodeId },

    /// A directory-only operation was applied to a file.
    #[error("Node {id} is not a directory")]
    NotADirectory { id: NodeId },

    /// The removal target is not a direct child of the given directory.
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// The node is already linked under a parent.
    #[error("Node {id} already has a parent")]
    AlreadyLinked { id: NodeId },

    /// A sibling with the same name already exists.
    #[error("Directory {parent} already contains an entry named {name:?}")]
    DuplicateName { parent: NodeId, name: CompactString },

    /// The deletion port failed to remove the path.
    #[error("Failed to delete {path}: {source}")]
    Deletion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TreeError {
    /// Create an invalid-tree error for a node.
    pub fn invalid(id: NodeId, reason: impl Into<String>) -> Self {
        Self::InvalidTree {
            id,
            reason: reason.into(),
        }
    }

    /// Create a deletion error with path context.
    pub fn deletion(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Deletion {
            path: path.into(),
            source,
        }
    }
}
