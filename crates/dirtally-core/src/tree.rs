//! Arena-backed file tree container.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use compact_str::CompactString;

use crate::children::Children;
use crate::config::TreeConfig;
use crate::error::{Result, TreeError};
use crate::node::{FileNode, NodeId, NodeStats};

/// In-memory directory tree.
///
/// Every node lives in a single arena. Directories own their children through
/// the ids in [`FileNode::children`]; the `parent` id only serves navigation.
/// Slots of removed nodes are left empty and their ids are never handed out
/// again.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    nodes: Vec<Option<FileNode>>,
    roots: Vec<NodeId>,
    live: usize,
    pub(crate) config: TreeConfig,
}

impl FileTree {
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with a custom configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create an empty tree with pre-allocated capacity.
    pub fn with_capacity(estimated_nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(estimated_nodes),
            ..Self::default()
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Place a node in the arena without linking it.
    ///
    /// A node carrying a base path becomes a root. Any other node stays
    /// detached until [`FileTree::link`] attaches it to a directory. The node
    /// enters without children, even when it is a copy of a populated
    /// directory; children are only ever added through linking.
    pub fn insert(&mut self, mut node: FileNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        node.parent = None;
        node.children = Children::new();
        if node.base_path.is_some() {
            self.roots.push(id);
        }
        self.nodes.push(Some(node));
        self.live += 1;
        id
    }

    /// Add a root directory located inside `base_path`.
    pub fn add_root(
        &mut self,
        name: impl Into<CompactString>,
        base_path: impl Into<PathBuf>,
    ) -> Result<NodeId> {
        let node = FileNode::new_directory(name);
        self.insert_root(node, base_path.into())
    }

    /// Add a single-file root located inside `base_path`.
    pub fn add_root_file(
        &mut self,
        name: impl Into<CompactString>,
        base_path: impl Into<PathBuf>,
        size: i64,
        usage: i64,
    ) -> Result<NodeId> {
        let node = FileNode::new_file(name, size, usage)
            .with_item_count(self.config.default_item_count);
        self.insert_root(node, base_path.into())
    }

    fn insert_root(&mut self, node: FileNode, base_path: PathBuf) -> Result<NodeId> {
        if base_path.as_os_str().is_empty() {
            return Err(TreeError::invalid(
                NodeId::new(self.nodes.len() as u64),
                format!("root {:?} has an empty base path", node.name),
            ));
        }
        Ok(self.insert(node.with_base_path(base_path)))
    }

    /// Create a directory under `parent`.
    pub fn add_dir(&mut self, parent: NodeId, name: impl Into<CompactString>) -> Result<NodeId> {
        self.add_child(parent, FileNode::new_directory(name))
    }

    /// Create a file under `parent` with the configured item count.
    pub fn add_file(
        &mut self,
        parent: NodeId,
        name: impl Into<CompactString>,
        size: i64,
        usage: i64,
    ) -> Result<NodeId> {
        let node = FileNode::new_file(name, size, usage)
            .with_item_count(self.config.default_item_count);
        self.add_child(parent, node)
    }

    fn add_child(&mut self, parent: NodeId, node: FileNode) -> Result<NodeId> {
        self.check_adoptable(parent, &node.name)?;
        let child = self.insert(node);
        self.attach(parent, child);
        Ok(child)
    }

    /// Attach a detached node as the last child of `parent`.
    pub fn link(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let node = self.node(child)?;
        if node.parent.is_some() {
            return Err(TreeError::AlreadyLinked { id: child });
        }
        if node.base_path.is_some() {
            return Err(TreeError::invalid(
                child,
                "a root cannot be linked under another directory",
            ));
        }
        self.check_adoptable(parent, &node.name)?;
        if parent == child || self.ancestors(parent).any(|id| id == child) {
            return Err(TreeError::invalid(
                child,
                format!("linking under {parent} creates a cycle"),
            ));
        }
        self.attach(parent, child);
        Ok(())
    }

    fn check_adoptable(&self, parent: NodeId, name: &str) -> Result<()> {
        let dir = self.node(parent)?;
        if !dir.is_dir() {
            return Err(TreeError::NotADirectory { id: parent });
        }
        if self.find_child_by_name(parent, name)?.is_some() {
            return Err(TreeError::DuplicateName {
                parent,
                name: name.into(),
            });
        }
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.slot_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(dir) = self.slot_mut(parent) {
            dir.children.push(child);
        }
    }

    /// Get a node if the id is live.
    pub fn get(&self, id: NodeId) -> Option<&FileNode> {
        self.nodes.get(id.idx()).and_then(Option::as_ref)
    }

    /// Get a node, failing on unknown ids.
    pub fn node(&self, id: NodeId) -> Result<&FileNode> {
        self.get(id).ok_or(TreeError::UnknownNode { id })
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut FileNode> {
        self.nodes.get_mut(id.idx()).and_then(Option::as_mut)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut FileNode> {
        self.slot_mut(id).ok_or(TreeError::UnknownNode { id })
    }

    /// Check whether the id refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Root node ids in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterate the direct children of `id` in order.
    pub fn children(&self, id: NodeId) -> Result<impl Iterator<Item = (NodeId, &FileNode)> + '_> {
        let node = self.node(id)?;
        Ok(node
            .children
            .iter()
            .filter_map(move |child| self.get(child).map(|n| (child, n))))
    }

    /// Parent of `id`, `None` for roots and detached nodes.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).and_then(|n| n.parent),
        }
    }

    /// Descendants of `id` in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get(id) {
            stack.extend(node.children.iter().rev());
        }
        Descendants { tree: self, stack }
    }

    /// Current measurements of a node.
    pub fn stats(&self, id: NodeId) -> Result<NodeStats> {
        Ok(self.node(id)?.stats())
    }

    /// Absolute filesystem path of a node.
    ///
    /// Walks up to the first node with a base path. Reaching a node that has
    /// neither a base path nor a parent means the tree is malformed.
    pub fn path(&self, id: NodeId) -> Result<PathBuf> {
        let mut names = Vec::new();
        let mut current = id;
        let base = loop {
            let node = self.node(current)?;
            names.push(node.name.as_str());
            if let Some(base) = node.base_path().filter(|p| !p.as_os_str().is_empty()) {
                break base;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => {
                    return Err(TreeError::invalid(
                        current,
                        format!("{:?} has neither a base path nor a parent", node.name),
                    ));
                }
            }
        };

        let mut path = PathBuf::from(base);
        for name in names.iter().rev() {
            path.push(name);
        }
        Ok(path)
    }

    /// Position of the first child of `dir` named `name`.
    pub fn find_child_by_name(&self, dir: NodeId, name: &str) -> Result<Option<usize>> {
        let node = self.node(dir)?;
        Ok(node
            .children
            .position(|&child| self.get(child).is_some_and(|c| c.name.as_str() == name)))
    }

    /// Copy of `dir`'s children with the first entry named `name` excised.
    pub fn children_without_name(&self, dir: NodeId, name: &str) -> Result<Children> {
        let node = self.node(dir)?;
        Ok(match self.find_child_by_name(dir, name)? {
            Some(index) => node.children.without_index(index),
            None => node.children.clone(),
        })
    }

    /// Resolve a path relative to `dir`, one name per component.
    pub fn lookup(&self, dir: NodeId, relative: impl AsRef<Path>) -> Result<Option<NodeId>> {
        let mut current = dir;
        for component in relative.as_ref().iter() {
            let Some(name) = component.to_str() else {
                return Ok(None);
            };
            let Some(index) = self.find_child_by_name(current, name)? else {
                return Ok(None);
            };
            match self.node(current)?.children.get(index) {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Sort children by size in descending order, recursively.
    pub fn sort_children_by_size(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.slot_mut(current) else {
                continue;
            };
            let mut children = std::mem::take(&mut node.children);
            children.sort_by_key(|&child| Reverse(self.get(child).map_or(0, |c| c.size)));
            stack.extend(children.iter());
            if let Some(node) = self.slot_mut(current) {
                node.children = children;
            }
        }
        Ok(())
    }

    pub(crate) fn free(&mut self, id: NodeId) {
        if let Some(slot) = self.nodes.get_mut(id.idx()) {
            if slot.take().is_some() {
                self.live -= 1;
            }
        }
        self.roots.retain(|&root| root != id);
    }
}

/// Iterator over the ancestors of a node.
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a FileTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.get(id).and_then(|n| n.parent);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a FileTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        if let Some(node) = self.tree.get(id) {
            self.stack.extend(node.children.iter().rev());
        }
        Some(id)
    }
}
