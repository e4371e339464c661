//! File and directory node types.

use std::fmt;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::children::Children;

/// Unique identifier for a node within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Return the id as an arena index.
    #[inline]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type of file system node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Leaf entry: regular file, symlink, device, anything without children.
    File,
    /// Directory.
    Directory,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a leaf.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// Snapshot of a node's measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStats {
    /// Logical size in bytes.
    pub size: i64,
    /// Allocated size on disk in bytes.
    pub usage: i64,
    /// This node plus all of its descendants.
    pub item_count: u64,
}

/// A single file or directory in the tree.
///
/// Nodes are owned by the tree arena. `parent` is a navigation-only link;
/// ownership always flows from a directory to the ids in its `children`.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// File/directory name (not full path).
    pub name: CompactString,

    /// Node type, fixed at creation.
    pub kind: NodeKind,

    /// Logical size in bytes (aggregate for directories).
    pub size: i64,

    /// Allocated size on disk in bytes (aggregate for directories).
    pub usage: i64,

    /// Count of this node and all descendants.
    pub item_count: u64,

    /// Absolute location of the containing directory, roots only.
    pub(crate) base_path: Option<PathBuf>,

    pub(crate) parent: Option<NodeId>,

    pub(crate) children: Children,
}

impl FileNode {
    /// Create a new leaf node with an item count of one.
    pub fn new_file(name: impl Into<CompactString>, size: i64, usage: i64) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            size,
            usage,
            item_count: 1,
            base_path: None,
            parent: None,
            children: Children::new(),
        }
    }

    /// Create a new, not yet aggregated, directory node.
    pub fn new_directory(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            size: 0,
            usage: 0,
            item_count: 0,
            base_path: None,
            parent: None,
            children: Children::new(),
        }
    }

    /// Override the pre-set item count.
    pub fn with_item_count(mut self, item_count: u64) -> Self {
        self.item_count = item_count;
        self
    }

    /// Mark this node as a root located inside `base_path`.
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Base path of a root node.
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Parent directory, `None` for roots and detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child ids.
    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Current measurements.
    pub fn stats(&self) -> NodeStats {
        NodeStats {
            size: self.size,
            usage: self.usage,
            item_count: self.item_count,
        }
    }
}
